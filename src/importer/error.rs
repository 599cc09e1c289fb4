// ==========================================
// 影片 ID 映射系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 致命错误（ImportError）/ 行级跳过原因（SkipReason）
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 导入模块错误类型（致命，终止整个解析调用）
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件/流相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("数据流读取失败: {0}")]
    StreamReadError(String),

    #[error("CSV 解析失败 (行 {row}): {message}")]
    CsvParseError { row: usize, message: String },

    // ===== 表头错误 =====
    #[error("表头缺少必需列 [{context}]: {column}")]
    MissingColumn { context: String, column: String },

    // ===== 配置错误 =====
    #[error("配置读取失败 (source: {source_name}): {message}")]
    ConfigReadError {
        source_name: String,
        message: String,
    },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::StreamReadError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

// ==========================================
// SkipReason - 行级跳过原因（非致命）
// ==========================================
// 用途: 记录被丢弃的数据行，仅供日志/报告，不影响输出
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    #[error("字段数不匹配: 期望 {expected}，实际 {actual}")]
    FieldCountMismatch { expected: usize, actual: usize },

    #[error("数值转换失败 (字段 {field}): {value}")]
    InvalidNumber { field: String, value: String },

    #[error("必填字段缺失: {field}")]
    MissingField { field: String },

    #[error("定位串不包含片源名称 {provider}: {locator}")]
    ProviderMismatch { provider: String, locator: String },
}

impl SkipReason {
    /// 原因分类键（用于报告统计）
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::FieldCountMismatch { .. } => "FIELD_COUNT_MISMATCH",
            SkipReason::InvalidNumber { .. } => "INVALID_NUMBER",
            SkipReason::MissingField { .. } => "MISSING_FIELD",
            SkipReason::ProviderMismatch { .. } => "PROVIDER_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_stream_read_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: ImportError = io_err.into();

        assert!(matches!(err, ImportError::StreamReadError(_)));
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::FieldCountMismatch {
            expected: 3,
            actual: 2,
        };

        assert_eq!(reason.to_string(), "字段数不匹配: 期望 3，实际 2");
        assert_eq!(reason.kind(), "FIELD_COUNT_MISMATCH");
    }
}
