// ==========================================
// 影片 ID 映射系统 - 引擎层
// ==========================================
// 职责: 内部影片库 + 外部片源匹配
// 红线: 纯内存批处理，不落库，不做模糊匹配
// ==========================================

pub mod error;
pub mod factory;
pub mod matcher;
pub mod reference_store;

// 重导出核心引擎
pub use error::{MatchError, MatchResult};
pub use factory::{DefaultMatcherFactory, MatcherFactory};
pub use matcher::{MatchReport, Matcher, MatcherImpl};
pub use reference_store::{ImportSummary, ReferenceStore, MOVIES_CONTEXT, ROLES_CONTEXT};
