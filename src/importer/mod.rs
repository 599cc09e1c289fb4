// ==========================================
// 影片 ID 映射系统 - 导入层
// ==========================================
// 职责: CSV 数据流 → 已校验的类型化记录
// 流程: 分词 → 字段数校验 → 字段映射 → 分类校验
// ==========================================

// 模块声明
pub mod csv_stream;
pub mod date_normalizer;
pub mod error;
pub mod field_mapper;
pub mod header_index;
pub mod record_parser;
pub mod record_validator;

// 重导出核心类型
pub use csv_stream::{tokenize_line, CsvStream};
pub use date_normalizer::{extract_year, try_extract_year, UNKNOWN_YEAR};
pub use error::{ImportError, ImportResult, SkipReason};
pub use field_mapper::{ExternalRowMapper, MovieRowMapper, RoleRowMapper};
pub use header_index::HeaderIndex;
pub use record_parser::{parse_records, CsvRow, ParsedRecords, RowMapper, RowValidator, SkippedRow};
pub use record_validator::{MovieValidator, ProviderLocatorValidator, RoleValidator};
