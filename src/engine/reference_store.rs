// ==========================================
// 影片 ID 映射系统 - 内部影片库 (Reference Store)
// ==========================================
// 职责: 导入影片/演职人员数据，提供 片名+年份 查找
// 红线: 构建完成后只读，可被多个匹配调用并发读取
// ==========================================

use crate::config::MatcherConfig;
use crate::domain::movie::{Movie, Role};
use crate::importer::csv_stream::CsvStream;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{MovieRowMapper, RoleRowMapper};
use crate::importer::header_index::HeaderIndex;
use crate::importer::record_parser::parse_records;
use crate::importer::record_validator::{MovieValidator, RoleValidator};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// 影片库数据集标签
pub const MOVIES_CONTEXT: &str = "movies";

/// 演职人员数据集标签
pub const ROLES_CONTEXT: &str = "roles";

// ==========================================
// ImportSummary - 导入统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub movies_imported: usize,
    pub movies_skipped: usize,
    pub roles_imported: usize,
    pub roles_skipped: usize,
    pub skip_counts: BTreeMap<&'static str, usize>, // 按原因统计（明细仅记录在日志中）
}

// ==========================================
// ReferenceStore
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    movies: Vec<Movie>,
    roles: Vec<Role>,
    summary: ImportSummary,
}

impl ReferenceStore {
    /// 从两个数据流导入
    ///
    /// # 参数
    /// - movies: 影片库数据流（id/title/year）
    /// - roles: 演职人员数据流（movie_id/name/role）
    /// - config: 列名配置
    ///
    /// # 返回
    /// - Ok(ReferenceStore): 已跳过无效行，保持原始行顺序
    /// - Err: 缺少必需列 / 分词失败 / 读流失败
    #[instrument(skip_all)]
    pub fn import(
        movies: CsvStream<'_>,
        roles: CsvStream<'_>,
        config: &MatcherConfig,
    ) -> ImportResult<Self> {
        info!("开始导入影片库");

        let movie_header = HeaderIndex::parse(movies.header_row(), MOVIES_CONTEXT);
        let movie_mapper =
            MovieRowMapper::from_header(&movie_header, &config.movies, MOVIES_CONTEXT)?;
        let parsed_movies = parse_records(movies, &movie_mapper, &MovieValidator, MOVIES_CONTEXT)?;

        let role_header = HeaderIndex::parse(roles.header_row(), ROLES_CONTEXT);
        let role_mapper = RoleRowMapper::from_header(&role_header, &config.roles, ROLES_CONTEXT)?;
        let parsed_roles = parse_records(roles, &role_mapper, &RoleValidator, ROLES_CONTEXT)?;

        let mut summary = ImportSummary {
            movies_imported: parsed_movies.records.len(),
            movies_skipped: parsed_movies.skipped.len(),
            roles_imported: parsed_roles.records.len(),
            roles_skipped: parsed_roles.skipped.len(),
            skip_counts: parsed_movies.skip_counts(),
        };
        for (kind, count) in parsed_roles.skip_counts() {
            *summary.skip_counts.entry(kind).or_insert(0) += count;
        }

        info!(
            movies = summary.movies_imported,
            movies_skipped = summary.movies_skipped,
            roles = summary.roles_imported,
            roles_skipped = summary.roles_skipped,
            "影片库导入完成"
        );

        Ok(Self {
            movies: parsed_movies.records,
            roles: parsed_roles.records,
            summary,
        })
    }

    /// 直接由记录构建（不经过 CSV）
    pub fn from_records(movies: Vec<Movie>, roles: Vec<Role>) -> Self {
        let summary = ImportSummary {
            movies_imported: movies.len(),
            roles_imported: roles.len(),
            ..ImportSummary::default()
        };

        Self {
            movies,
            roles,
            summary,
        }
    }

    /// 按 片名+年份 查找影片
    ///
    /// # 规则
    /// - 年份完全相等，片名不区分大小写
    /// - 线性扫描，返回库内顺序第一个命中的影片
    pub fn find_movie_by_title_year(&self, title: &str, year: i32) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.matches(title, year))
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// 某影片的全部演职人员（按导入顺序）
    pub fn roles_for_movie(&self, movie_id: i64) -> impl Iterator<Item = &Role> + '_ {
        self.roles.iter().filter(move |r| r.movie_id == movie_id)
    }

    pub fn import_summary(&self) -> &ImportSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;

    fn movies_stream(lines: Vec<&'static str>) -> CsvStream<'static> {
        CsvStream::from_lines("id,title,year", lines)
    }

    fn roles_stream(lines: Vec<&'static str>) -> CsvStream<'static> {
        CsvStream::from_lines("movie_id,name,role", lines)
    }

    #[test]
    fn test_import_basic() {
        let store = ReferenceStore::import(
            movies_stream(vec!["1,Inception,2010", "2,Heat,1995"]),
            roles_stream(vec!["1,Christopher Nolan,director", "2,Al Pacino,cast"]),
            &MatcherConfig::default(),
        )
        .unwrap();

        assert_eq!(store.movies().len(), 2);
        assert_eq!(store.roles().len(), 2);
        assert_eq!(store.movies()[1], Movie::new(2, "Heat", 1995));
        assert_eq!(store.import_summary().movies_imported, 2);
    }

    #[test]
    fn test_import_skips_invalid_movies() {
        let store = ReferenceStore::import(
            movies_stream(vec![
                "1,Inception,2010",
                ",Missing Id,2001",
                "3,,1999",
                "4,Missing Year,",
                "x,Bad Id,2000",
                "6,Too,Many,Fields",
                "7,Heat,1995",
            ]),
            roles_stream(vec![]),
            &MatcherConfig::default(),
        )
        .unwrap();

        let ids: Vec<i64> = store.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 7]);

        let summary = store.import_summary();
        assert_eq!(summary.movies_skipped, 5);
        assert_eq!(summary.skip_counts.get("MISSING_FIELD"), Some(&3));
        assert_eq!(summary.skip_counts.get("INVALID_NUMBER"), Some(&1));
        assert_eq!(summary.skip_counts.get("FIELD_COUNT_MISMATCH"), Some(&1));
    }

    #[test]
    fn test_import_skips_role_without_movie_id() {
        let store = ReferenceStore::import(
            movies_stream(vec!["1,Inception,2010"]),
            roles_stream(vec![",Nobody,cast", "1,,", "1,Tom Hardy,cast"]),
            &MatcherConfig::default(),
        )
        .unwrap();

        assert_eq!(store.roles().len(), 2);
        assert_eq!(store.roles()[0].name, None);
        assert_eq!(store.roles_for_movie(1).count(), 2);
        assert_eq!(store.import_summary().roles_skipped, 1);
    }

    #[test]
    fn test_import_missing_required_column() {
        let result = ReferenceStore::import(
            CsvStream::from_lines("id,name,year", vec!["1,Inception,2010"]),
            roles_stream(vec![]),
            &MatcherConfig::default(),
        );

        assert!(matches!(result, Err(ImportError::MissingColumn { .. })));
    }

    #[test]
    fn test_find_movie_case_insensitive() {
        let store = ReferenceStore::from_records(vec![Movie::new(1, "Inception", 2010)], vec![]);

        assert_eq!(
            store.find_movie_by_title_year("INCEPTION", 2010).map(|m| m.id),
            Some(1)
        );
        assert!(store.find_movie_by_title_year("Inception", 2011).is_none());
    }

    #[test]
    fn test_find_movie_returns_first_in_store_order() {
        let store = ReferenceStore::from_records(
            vec![
                Movie::new(10, "Solaris", 2002),
                Movie::new(11, "SOLARIS", 2002),
            ],
            vec![],
        );

        assert_eq!(
            store.find_movie_by_title_year("solaris", 2002).map(|m| m.id),
            Some(10)
        );
    }
}
