// ==========================================
// 影片 ID 映射系统 - 记录校验器实现
// ==========================================
// 职责: 按记录种类校验候选记录，通过后转为最终记录
// 规则:
// - Movie: id/year 必填，title 必填且非空
// - Role: movie_id 必填（name/role 可缺失）
// - 外部片源: 行末定位串须包含片源名称（不区分大小写）
// ==========================================

use crate::domain::movie::{ExternalRecord, Movie, RawMovieRecord, RawRoleRecord, Role};
use crate::domain::types::DatabaseType;
use crate::importer::error::SkipReason;
use crate::importer::record_parser::{CsvRow, RowValidator};

fn missing(field: &str) -> SkipReason {
    SkipReason::MissingField {
        field: field.to_string(),
    }
}

// ==========================================
// MovieValidator
// ==========================================
pub struct MovieValidator;

impl RowValidator<RawMovieRecord> for MovieValidator {
    type Output = Movie;

    fn validate(&self, record: RawMovieRecord, _row: &CsvRow<'_>) -> Result<Movie, SkipReason> {
        let id = record.id.ok_or_else(|| missing("id"))?;
        let title = record
            .title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| missing("title"))?;
        let year = record.year.ok_or_else(|| missing("year"))?;

        Ok(Movie { id, title, year })
    }
}

// ==========================================
// RoleValidator
// ==========================================
pub struct RoleValidator;

impl RowValidator<RawRoleRecord> for RoleValidator {
    type Output = Role;

    fn validate(&self, record: RawRoleRecord, _row: &CsvRow<'_>) -> Result<Role, SkipReason> {
        let movie_id = record.movie_id.ok_or_else(|| missing("movie_id"))?;

        Ok(Role {
            movie_id,
            name: record.name,
            role: record.role,
        })
    }
}

// ==========================================
// ProviderLocatorValidator - 外部片源
// ==========================================
pub struct ProviderLocatorValidator {
    provider: String,       // 原始片源名称（用于报告）
    provider_lower: String, // 小写形式（用于匹配）
}

impl ProviderLocatorValidator {
    pub fn new(provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
            provider_lower: provider.to_lowercase(),
        }
    }

    pub fn for_database(database_type: DatabaseType) -> Self {
        Self::new(database_type.name())
    }

    /// 定位串是否包含片源名称
    pub fn accepts(&self, locator: &str) -> bool {
        locator.to_lowercase().contains(&self.provider_lower)
    }
}

impl RowValidator<ExternalRecord> for ProviderLocatorValidator {
    type Output = ExternalRecord;

    fn validate(
        &self,
        record: ExternalRecord,
        row: &CsvRow<'_>,
    ) -> Result<ExternalRecord, SkipReason> {
        let locator = row.last_field();
        if self.accepts(locator) {
            Ok(record)
        } else {
            Err(SkipReason::ProviderMismatch {
                provider: self.provider.clone(),
                locator: locator.to_string(),
            })
        }
    }
}
