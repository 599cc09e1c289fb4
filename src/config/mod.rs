// ==========================================
// 影片 ID 映射系统 - 配置层
// ==========================================
// 职责: 数据集列名配置，支持 JSON 覆写
// ==========================================

pub mod matcher_config;

// 重导出核心配置
pub use matcher_config::{
    column_defaults, ExternalColumns, MatcherConfig, MovieColumns, RoleColumns,
};
