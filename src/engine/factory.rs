// ==========================================
// 影片 ID 映射系统 - 匹配引擎工厂
// ==========================================
// 职责: 按片源类型创建匹配引擎
// 红线: 不支持的片源在读取任何数据前立即失败
// ==========================================

use crate::config::MatcherConfig;
use crate::domain::types::DatabaseType;
use crate::engine::error::{MatchError, MatchResult};
use crate::engine::matcher::{Matcher, MatcherImpl};
use crate::importer::csv_stream::CsvStream;
use tracing::error;

// ==========================================
// MatcherFactory Trait
// ==========================================
pub trait MatcherFactory {
    /// 创建匹配引擎
    ///
    /// # 参数
    /// - database_type: 片源类型
    /// - movies: 影片库数据流
    /// - roles: 演职人员数据流
    ///
    /// # 返回
    /// - Ok(Box<dyn Matcher>): 已导入影片库的匹配引擎
    /// - Err(UnsupportedDatabase): 片源不支持
    /// - Err(Import): 影片库导入失败
    fn create_matcher(
        &self,
        database_type: DatabaseType,
        movies: CsvStream<'_>,
        roles: CsvStream<'_>,
    ) -> MatchResult<Box<dyn Matcher>>;
}

// ==========================================
// DefaultMatcherFactory
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct DefaultMatcherFactory {
    config: MatcherConfig,
}

impl DefaultMatcherFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }
}

impl MatcherFactory for DefaultMatcherFactory {
    fn create_matcher(
        &self,
        database_type: DatabaseType,
        movies: CsvStream<'_>,
        roles: CsvStream<'_>,
    ) -> MatchResult<Box<dyn Matcher>> {
        match database_type {
            DatabaseType::Xbox => {
                let matcher = MatcherImpl::with_config(movies, roles, self.config.clone())?;
                Ok(Box::new(matcher))
            }
            unsupported => {
                error!(database = %unsupported, "不支持的片源类型");
                Err(MatchError::UnsupportedDatabase(unsupported))
            }
        }
    }
}
