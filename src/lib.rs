// ==========================================
// 影片 ID 映射系统 - 核心库
// ==========================================
// 系统定位: 外部片源 ID → 内部影片 ID 映射（片名 + 年份精确匹配）
// 运行方式: 纯内存批处理，每个外部数据集调用一次
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - CSV 解析与校验
pub mod importer;

// 引擎层 - 影片库与匹配
pub mod engine;

// 配置层 - 列名配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{DatabaseType, IdMapping, Movie, Role};

// 导入
pub use importer::{CsvStream, ImportError, ImportResult};

// 引擎
pub use engine::{
    DefaultMatcherFactory, MatchError, MatchReport, MatchResult, Matcher, MatcherFactory,
    MatcherImpl, ReferenceStore,
};

// 配置
pub use config::MatcherConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "影片 ID 映射系统";
