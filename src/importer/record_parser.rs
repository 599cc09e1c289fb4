// ==========================================
// 影片 ID 映射系统 - 记录解析器
// ==========================================
// 流程: 分词 → 字段数校验 → 字段映射 → 分类校验 → 输出
// 规则: 行级问题记录并跳过；分词失败/读流失败为致命错误
// ==========================================

use crate::importer::csv_stream::{tokenize_line, CsvStream};
use crate::importer::error::{ImportError, ImportResult, SkipReason};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

// ==========================================
// CsvRow - 已分词的数据行视图
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CsvRow<'r> {
    pub row_number: usize, // 数据行号（从 1 开始，不含表头）
    pub fields: &'r [String],
}

impl<'r> CsvRow<'r> {
    /// 按下标取字段（下标越界视为空串）
    pub fn field(&self, index: usize) -> &'r str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// 行的最后一个字段（外部片源的定位串）
    pub fn last_field(&self) -> &'r str {
        self.fields.last().map(String::as_str).unwrap_or("")
    }
}

// ==========================================
// RowMapper Trait
// ==========================================
// 用途: 行 → 候选记录（类型转换）
// 实现者: MovieRowMapper, RoleRowMapper, ExternalRowMapper
pub trait RowMapper {
    type Output;

    /// 映射单行
    ///
    /// # 返回
    /// - Ok: 候选记录
    /// - Err(SkipReason::InvalidNumber): 数值转换失败，该行跳过
    fn map_row(&self, row: &CsvRow<'_>) -> Result<Self::Output, SkipReason>;
}

// ==========================================
// RowValidator Trait
// ==========================================
// 用途: 候选记录 → 最终记录（按记录种类校验）
// 实现者: MovieValidator, RoleValidator, ProviderLocatorValidator
pub trait RowValidator<R> {
    type Output;

    fn validate(&self, record: R, row: &CsvRow<'_>) -> Result<Self::Output, SkipReason>;
}

// ==========================================
// 解析结果
// ==========================================

/// 被跳过的数据行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub context: String,
    pub row_number: usize,
    pub reason: SkipReason,
    pub raw_line: String,
}

/// 解析输出：保留的记录（原始顺序）+ 跳过明细
#[derive(Debug, Clone)]
pub struct ParsedRecords<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRow>,
}

impl<T> ParsedRecords<T> {
    /// 已处理的数据行总数
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    /// 按原因分类统计跳过行数
    pub fn skip_counts(&self) -> BTreeMap<&'static str, usize> {
        self.skipped.iter().fold(BTreeMap::new(), |mut acc, s| {
            *acc.entry(s.reason.kind()).or_insert(0) += 1;
            acc
        })
    }
}

// ==========================================
// 解析入口
// ==========================================

/// 将数据流解析为已校验的记录序列
///
/// # 参数
/// - stream: 表头 + 数据行
/// - mapper: 行映射器（已绑定该数据流的表头索引）
/// - validator: 分类校验器
/// - context: 数据集标签（用于日志与跳过明细）
///
/// # 返回
/// - Ok(ParsedRecords): 保留记录按数据行顺序排列
/// - Err(CsvParseError): 某行分词失败（整个解析终止）
/// - Err(StreamReadError): 数据行读取失败
pub fn parse_records<M, V>(
    stream: CsvStream<'_>,
    mapper: &M,
    validator: &V,
    context: &str,
) -> ImportResult<ParsedRecords<V::Output>>
where
    M: RowMapper,
    V: RowValidator<M::Output>,
{
    let (header_row, data_rows) = stream.into_parts();
    let expected = header_row.split(',').count();

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (idx, line) in data_rows.enumerate() {
        let row_number = idx + 1;
        let line = line.map_err(|e| {
            ImportError::StreamReadError(format!("[{}] 行 {}: {}", context, row_number, e))
        })?;

        let fields = tokenize_line(&line, row_number)?;
        let row = CsvRow {
            row_number,
            fields: &fields,
        };

        match map_and_validate(&row, expected, mapper, validator) {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!(
                    context = context,
                    row_number = row_number,
                    reason = %reason,
                    line = %line,
                    "跳过记录"
                );
                skipped.push(SkippedRow {
                    context: context.to_string(),
                    row_number,
                    reason,
                    raw_line: line,
                });
            }
        }
    }

    debug!(
        context = context,
        kept = records.len(),
        skipped = skipped.len(),
        "数据流解析完成"
    );

    Ok(ParsedRecords { records, skipped })
}

fn map_and_validate<M, V>(
    row: &CsvRow<'_>,
    expected: usize,
    mapper: &M,
    validator: &V,
) -> Result<V::Output, SkipReason>
where
    M: RowMapper,
    V: RowValidator<M::Output>,
{
    if row.fields.len() != expected {
        return Err(SkipReason::FieldCountMismatch {
            expected,
            actual: row.fields.len(),
        });
    }

    let candidate = mapper.map_row(row)?;
    validator.validate(candidate, row)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 取第一列为整数
    struct FirstColumnMapper;

    impl RowMapper for FirstColumnMapper {
        type Output = i64;

        fn map_row(&self, row: &CsvRow<'_>) -> Result<i64, SkipReason> {
            row.field(0)
                .trim()
                .parse()
                .map_err(|_| SkipReason::InvalidNumber {
                    field: "n".to_string(),
                    value: row.field(0).to_string(),
                })
        }
    }

    // 只保留偶数
    struct EvenValidator;

    impl RowValidator<i64> for EvenValidator {
        type Output = i64;

        fn validate(&self, record: i64, _row: &CsvRow<'_>) -> Result<i64, SkipReason> {
            if record % 2 == 0 {
                Ok(record)
            } else {
                Err(SkipReason::MissingField {
                    field: "even".to_string(),
                })
            }
        }
    }

    fn stream(lines: Vec<&'static str>) -> CsvStream<'static> {
        CsvStream::from_lines("n,label", lines)
    }

    #[test]
    fn test_parse_keeps_order() {
        let parsed = parse_records(
            stream(vec!["4,a", "2,b", "8,c"]),
            &FirstColumnMapper,
            &EvenValidator,
            "test",
        )
        .unwrap();

        assert_eq!(parsed.records, vec![4, 2, 8]);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_parse_skips_field_count_mismatch() {
        let parsed = parse_records(
            stream(vec!["2,a", "4,b,extra", "6"]),
            &FirstColumnMapper,
            &EvenValidator,
            "test",
        )
        .unwrap();

        assert_eq!(parsed.records, vec![2]);
        assert_eq!(parsed.skipped.len(), 2);
        assert_eq!(parsed.skipped[0].row_number, 2);
        assert_eq!(
            parsed.skipped[0].reason,
            SkipReason::FieldCountMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_parse_skips_conversion_and_validation_failures() {
        let parsed = parse_records(
            stream(vec!["x,a", "3,b", "10,c"]),
            &FirstColumnMapper,
            &EvenValidator,
            "test",
        )
        .unwrap();

        assert_eq!(parsed.records, vec![10]);
        assert_eq!(parsed.total_rows(), 3);

        let counts = parsed.skip_counts();
        assert_eq!(counts.get("INVALID_NUMBER"), Some(&1));
        assert_eq!(counts.get("MISSING_FIELD"), Some(&1));
    }

    #[test]
    fn test_parse_quoted_field_counts_as_one() {
        let parsed = parse_records(
            stream(vec![r#"2,"a, b""#]),
            &FirstColumnMapper,
            &EvenValidator,
            "test",
        )
        .unwrap();

        assert_eq!(parsed.records, vec![2]);
    }

    #[test]
    fn test_parse_unterminated_quote_is_fatal() {
        let result = parse_records(
            stream(vec!["2,a", r#"4,"b"#, "6,c"]),
            &FirstColumnMapper,
            &EvenValidator,
            "test",
        );

        assert!(matches!(
            result,
            Err(ImportError::CsvParseError { row: 2, .. })
        ));
    }

    #[test]
    fn test_parse_stream_read_error_is_fatal() {
        let rows = vec![
            Ok("2,a".to_string()),
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone")),
        ];
        let result = parse_records(
            CsvStream::new("n,label", rows),
            &FirstColumnMapper,
            &EvenValidator,
            "test",
        );

        assert!(matches!(result, Err(ImportError::StreamReadError(_))));
    }
}
