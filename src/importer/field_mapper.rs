// ==========================================
// 影片 ID 映射系统 - 字段映射器实现
// ==========================================
// 职责: 数据行 → 候选记录（列定位 + 类型转换）
// 说明: 列下标在构造时由表头索引一次性解析，行映射阶段只读
// ==========================================

use crate::config::{ExternalColumns, MovieColumns, RoleColumns};
use crate::domain::movie::{ExternalRecord, RawMovieRecord, RawRoleRecord};
use crate::importer::date_normalizer::extract_year;
use crate::importer::error::{ImportResult, SkipReason};
use crate::importer::header_index::HeaderIndex;
use crate::importer::record_parser::{CsvRow, RowMapper};
use std::str::FromStr;

// ==========================================
// 字段提取辅助函数
// ==========================================

/// 提取字符串字段（原样保留，仅空串视为缺失）
fn get_string(row: &CsvRow<'_>, index: usize) -> Option<String> {
    let value = row.field(index);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// 解析整数字段（TRIM 后为空 → None，非数字 → 跳过原因）
fn parse_number<T: FromStr>(
    row: &CsvRow<'_>,
    index: usize,
    field: &str,
) -> Result<Option<T>, SkipReason> {
    let value = row.field(index).trim();
    match value {
        "" => Ok(None),
        value => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| SkipReason::InvalidNumber {
                field: field.to_string(),
                value: value.to_string(),
            }),
    }
}

// ==========================================
// MovieRowMapper - 影片库
// ==========================================
#[derive(Debug, Clone)]
pub struct MovieRowMapper {
    id_idx: usize,
    title_idx: usize,
    year_idx: usize,
    columns: MovieColumns,
}

impl MovieRowMapper {
    /// 按表头定位列（id/title/year 均为必需列）
    pub fn from_header(
        header: &HeaderIndex,
        columns: &MovieColumns,
        context: &str,
    ) -> ImportResult<Self> {
        Ok(Self {
            id_idx: header.require(&columns.id, context)?,
            title_idx: header.require(&columns.title, context)?,
            year_idx: header.require(&columns.year, context)?,
            columns: columns.clone(),
        })
    }
}

impl RowMapper for MovieRowMapper {
    type Output = RawMovieRecord;

    fn map_row(&self, row: &CsvRow<'_>) -> Result<RawMovieRecord, SkipReason> {
        Ok(RawMovieRecord {
            id: parse_number(row, self.id_idx, &self.columns.id)?,
            title: get_string(row, self.title_idx),
            year: parse_number(row, self.year_idx, &self.columns.year)?,
        })
    }
}

// ==========================================
// RoleRowMapper - 演职人员
// ==========================================
#[derive(Debug, Clone)]
pub struct RoleRowMapper {
    movie_id_idx: usize,
    name_idx: Option<usize>, // 可选列
    role_idx: Option<usize>, // 可选列
    columns: RoleColumns,
}

impl RoleRowMapper {
    /// 按表头定位列（仅 movie_id 为必需列）
    pub fn from_header(
        header: &HeaderIndex,
        columns: &RoleColumns,
        context: &str,
    ) -> ImportResult<Self> {
        Ok(Self {
            movie_id_idx: header.require(&columns.movie_id, context)?,
            name_idx: header.get(&columns.name),
            role_idx: header.get(&columns.role),
            columns: columns.clone(),
        })
    }
}

impl RowMapper for RoleRowMapper {
    type Output = RawRoleRecord;

    fn map_row(&self, row: &CsvRow<'_>) -> Result<RawRoleRecord, SkipReason> {
        Ok(RawRoleRecord {
            movie_id: parse_number(row, self.movie_id_idx, &self.columns.movie_id)?,
            name: self.name_idx.and_then(|idx| get_string(row, idx)),
            role: self.role_idx.and_then(|idx| get_string(row, idx)),
        })
    }
}

// ==========================================
// ExternalRowMapper - 外部片源
// ==========================================
#[derive(Debug, Clone)]
pub struct ExternalRowMapper {
    media_id_idx: usize,
    title_idx: usize,
    release_date_idx: usize,
}

impl ExternalRowMapper {
    pub fn from_header(
        header: &HeaderIndex,
        columns: &ExternalColumns,
        context: &str,
    ) -> ImportResult<Self> {
        Ok(Self {
            media_id_idx: header.require(&columns.media_id, context)?,
            title_idx: header.require(&columns.title, context)?,
            release_date_idx: header.require(&columns.release_date, context)?,
        })
    }
}

impl RowMapper for ExternalRowMapper {
    type Output = ExternalRecord;

    fn map_row(&self, row: &CsvRow<'_>) -> Result<ExternalRecord, SkipReason> {
        Ok(ExternalRecord {
            external_id: row.field(self.media_id_idx).to_string(),
            title: row.field(self.title_idx).to_string(),
            year: extract_year(row.field(self.release_date_idx)),
        })
    }
}
