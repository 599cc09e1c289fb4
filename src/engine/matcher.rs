// ==========================================
// 影片 ID 映射系统 - 匹配引擎
// ==========================================
// 职责: 外部片源数据流 → 去重后的 ID 映射集合
// 流程: 解析 → 片源过滤 → 片名+年份查找 → 按值去重 → 输出
// 红线: 单次调用无状态；内部影片库只读
// ==========================================

use crate::config::MatcherConfig;
use crate::domain::movie::{ExternalRecord, IdMapping};
use crate::domain::types::DatabaseType;
use crate::engine::error::MatchResult;
use crate::engine::reference_store::ReferenceStore;
use crate::importer::csv_stream::CsvStream;
use crate::importer::date_normalizer::UNKNOWN_YEAR;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::ExternalRowMapper;
use crate::importer::header_index::HeaderIndex;
use crate::importer::record_parser::{parse_records, SkippedRow};
use crate::importer::record_validator::ProviderLocatorValidator;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// MatchReport - 单次匹配结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub run_id: String,
    pub database_type: DatabaseType,
    pub mappings: Vec<IdMapping>, // 已去重，按 (internal_id, external_id) 排序
    pub candidate_rows: usize,    // 通过解析与片源过滤的行数
    pub unmatched_rows: usize,    // 未在影片库中找到的行数
    pub duplicate_rows: usize,    // 因映射重复被合并的行数
    pub skipped: Vec<SkippedRow>, // 解析阶段跳过的行
}

// ==========================================
// Matcher Trait
// ==========================================
// 用途: 匹配引擎主接口
// 实现者: MatcherImpl
pub trait Matcher: Send + Sync {
    /// 匹配外部片源并返回完整报告
    ///
    /// # 参数
    /// - database_type: 片源类型（须已支持）
    /// - external: 外部片源数据流（MediaId/Title/OriginalReleaseDate/.../定位串）
    ///
    /// # 返回
    /// - Ok(MatchReport): 映射集合 + 统计
    /// - Err: 片源不支持 / 缺少必需列 / 分词失败 / 读流失败
    fn match_with_report(
        &self,
        database_type: DatabaseType,
        external: CsvStream<'_>,
    ) -> MatchResult<MatchReport>;

    /// 匹配外部片源，仅返回去重后的映射（顺序不保证与输入一致）
    fn match_external(
        &self,
        database_type: DatabaseType,
        external: CsvStream<'_>,
    ) -> MatchResult<Vec<IdMapping>> {
        self.match_with_report(database_type, external)
            .map(|report| report.mappings)
    }
}

// ==========================================
// MatcherImpl
// ==========================================
pub struct MatcherImpl {
    store: ReferenceStore,
    config: MatcherConfig,
}

impl MatcherImpl {
    /// 使用默认列名导入影片库
    pub fn new(movies: CsvStream<'_>, roles: CsvStream<'_>) -> ImportResult<Self> {
        Self::with_config(movies, roles, MatcherConfig::default())
    }

    /// 使用指定列名导入影片库
    pub fn with_config(
        movies: CsvStream<'_>,
        roles: CsvStream<'_>,
        config: MatcherConfig,
    ) -> ImportResult<Self> {
        let store = ReferenceStore::import(movies, roles, &config)?;
        Ok(Self { store, config })
    }

    /// 基于已构建的影片库创建
    pub fn from_store(store: ReferenceStore, config: MatcherConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// 外部行 → 映射（哨兵年份直接判为未命中）
    fn resolve(&self, record: &ExternalRecord) -> Option<IdMapping> {
        if record.year == UNKNOWN_YEAR {
            debug!(external_id = %record.external_id, "发行日期无法解析，跳过查找");
            return None;
        }

        self.store
            .find_movie_by_title_year(&record.title, record.year)
            .map(|movie| IdMapping::new(movie.id, record.external_id.clone()))
    }
}

impl Matcher for MatcherImpl {
    #[instrument(skip(self, external), fields(database = %database_type, run_id))]
    fn match_with_report(
        &self,
        database_type: DatabaseType,
        external: CsvStream<'_>,
    ) -> MatchResult<MatchReport> {
        let database_type = database_type.ensure_supported()?;
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        info!("开始匹配外部片源");

        // === 步骤 1: 解析 + 片源过滤 ===
        let context = database_type.name();
        let header = HeaderIndex::parse(external.header_row(), context);
        let mapper = ExternalRowMapper::from_header(&header, &self.config.external, context)?;
        let validator = ProviderLocatorValidator::for_database(database_type);
        let parsed = parse_records(external, &mapper, &validator, context)?;
        let candidate_rows = parsed.records.len();

        // === 步骤 2: 查找影片 ===
        let resolved: Vec<IdMapping> = parsed
            .records
            .iter()
            .filter_map(|record| self.resolve(record))
            .collect();
        let resolved_rows = resolved.len();

        // === 步骤 3: 按值去重 ===
        let unique: BTreeSet<IdMapping> = resolved.into_iter().collect();
        let mappings: Vec<IdMapping> = unique.into_iter().collect();

        let report = MatchReport {
            run_id,
            database_type,
            candidate_rows,
            unmatched_rows: candidate_rows - resolved_rows,
            duplicate_rows: resolved_rows - mappings.len(),
            mappings,
            skipped: parsed.skipped,
        };

        info!(
            candidates = report.candidate_rows,
            mapped = report.mappings.len(),
            unmatched = report.unmatched_rows,
            duplicates = report.duplicate_rows,
            skipped = report.skipped.len(),
            "外部片源匹配完成"
        );

        Ok(report)
    }
}
