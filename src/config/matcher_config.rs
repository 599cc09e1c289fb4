// ==========================================
// 影片 ID 映射系统 - 匹配配置
// ==========================================
// 职责: 各数据集的列名配置（JSON 可覆写，缺省项取默认值）
// 红线: 不包含业务逻辑
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// 默认列名
// ==========================================
pub mod column_defaults {
    // 影片库
    pub const MOVIE_ID: &str = "id";
    pub const MOVIE_TITLE: &str = "title";
    pub const MOVIE_YEAR: &str = "year";

    // 演职人员
    pub const ROLE_MOVIE_ID: &str = "movie_id";
    pub const ROLE_NAME: &str = "name";
    pub const ROLE_ROLE: &str = "role";

    // 外部片源
    pub const EXTERNAL_MEDIA_ID: &str = "MediaId";
    pub const EXTERNAL_TITLE: &str = "Title";
    pub const EXTERNAL_RELEASE_DATE: &str = "OriginalReleaseDate";
}

/// 影片库列名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieColumns {
    pub id: String,
    pub title: String,
    pub year: String,
}

impl Default for MovieColumns {
    fn default() -> Self {
        Self {
            id: column_defaults::MOVIE_ID.to_string(),
            title: column_defaults::MOVIE_TITLE.to_string(),
            year: column_defaults::MOVIE_YEAR.to_string(),
        }
    }
}

/// 演职人员列名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleColumns {
    pub movie_id: String,
    pub name: String,
    pub role: String,
}

impl Default for RoleColumns {
    fn default() -> Self {
        Self {
            movie_id: column_defaults::ROLE_MOVIE_ID.to_string(),
            name: column_defaults::ROLE_NAME.to_string(),
            role: column_defaults::ROLE_ROLE.to_string(),
        }
    }
}

/// 外部片源列名（定位串固定为每行最后一列，不配置）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalColumns {
    pub media_id: String,
    pub title: String,
    pub release_date: String,
}

impl Default for ExternalColumns {
    fn default() -> Self {
        Self {
            media_id: column_defaults::EXTERNAL_MEDIA_ID.to_string(),
            title: column_defaults::EXTERNAL_TITLE.to_string(),
            release_date: column_defaults::EXTERNAL_RELEASE_DATE.to_string(),
        }
    }
}

// ==========================================
// MatcherConfig - 匹配配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub movies: MovieColumns,
    pub roles: RoleColumns,
    pub external: ExternalColumns,
}

impl MatcherConfig {
    /// 从 JSON 字符串加载（未出现的键使用默认值）
    pub fn from_json_str(json: &str) -> ImportResult<Self> {
        serde_json::from_str(json).map_err(|e| ImportError::ConfigReadError {
            source_name: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| ImportError::ConfigReadError {
            source_name: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
