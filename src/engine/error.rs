// ==========================================
// 影片 ID 映射系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::types::DatabaseType;
use crate::importer::error::ImportError;
use thiserror::Error;

/// 匹配引擎错误类型
#[derive(Error, Debug)]
pub enum MatchError {
    // ===== 配置错误（调用方问题，立即失败）=====
    #[error("不支持的片源类型: {0}")]
    UnsupportedDatabase(DatabaseType),

    #[error("无法识别的片源类型: {0}")]
    UnknownDatabase(String),

    // ===== 数据流错误 =====
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Result 类型别名
pub type MatchResult<T> = Result<T, MatchError>;

impl DatabaseType {
    /// 校验片源已支持，否则返回 UnsupportedDatabase
    pub fn ensure_supported(self) -> MatchResult<Self> {
        if self.is_supported() {
            Ok(self)
        } else {
            Err(MatchError::UnsupportedDatabase(self))
        }
    }
}
