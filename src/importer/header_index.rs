// ==========================================
// 影片 ID 映射系统 - 表头索引
// ==========================================
// 职责: 表头行 → 列名→列下标映射（每个数据流构建一次，之后只读）
// 规则: 表头按纯逗号切分；重复列名取最后一次出现的下标
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct HeaderIndex {
    columns: HashMap<String, usize>,
    field_count: usize,
}

impl HeaderIndex {
    /// 解析表头行
    ///
    /// # 参数
    /// - header_row: 表头原始行
    /// - context: 数据集标签（用于日志）
    pub fn parse(header_row: &str, context: &str) -> Self {
        let names: Vec<&str> = header_row.split(',').collect();
        let mut columns = HashMap::with_capacity(names.len());

        for (idx, name) in names.iter().enumerate() {
            if let Some(previous) = columns.insert(name.to_string(), idx) {
                warn!(
                    context = context,
                    column = %name,
                    previous_index = previous,
                    index = idx,
                    "表头列名重复，使用最后一次出现的位置"
                );
            }
        }

        Self {
            columns,
            field_count: names.len(),
        }
    }

    /// 表头字段数（数据行字段数须与之一致）
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn get(&self, column: &str) -> Option<usize> {
        self.columns.get(column).copied()
    }

    /// 获取必需列下标，缺失时报错
    pub fn require(&self, column: &str, context: &str) -> ImportResult<usize> {
        self.get(column).ok_or_else(|| ImportError::MissingColumn {
            context: context.to_string(),
            column: column.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let index = HeaderIndex::parse("id,title,year", "movies");

        assert_eq!(index.field_count(), 3);
        assert_eq!(index.get("id"), Some(0));
        assert_eq!(index.get("year"), Some(2));
        assert_eq!(index.get("rating"), None);
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let index = HeaderIndex::parse("id,title,id", "movies");

        assert_eq!(index.field_count(), 3);
        assert_eq!(index.get("id"), Some(2));
    }

    #[test]
    fn test_require_missing_column() {
        let index = HeaderIndex::parse("id,title", "movies");

        let err = index.require("year", "movies").unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingColumn { ref column, .. } if column == "year"
        ));
    }
}
