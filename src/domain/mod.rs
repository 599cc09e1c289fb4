// ==========================================
// 影片 ID 映射系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含解析逻辑，不含匹配逻辑
// ==========================================

pub mod movie;
pub mod types;

// 重导出核心类型
pub use movie::{
    titles_equal_ignore_case, ExternalRecord, IdMapping, Movie, RawMovieRecord, RawRoleRecord,
    Role,
};
pub use types::DatabaseType;
