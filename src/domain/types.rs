// ==========================================
// 影片 ID 映射系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 外部片源类型 (Database Type)
// ==========================================
// 封闭枚举: 新增片源必须在此登记
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatabaseType {
    Xbox,          // Xbox 影视商店
    GooglePlay,    // Google Play 影视
    Vudu,          // Vudu
    AmazonInstant, // Amazon Instant Video
}

impl DatabaseType {
    /// 片源名称（同时用于定位串匹配）
    pub fn name(&self) -> &'static str {
        match self {
            DatabaseType::Xbox => "XBOX",
            DatabaseType::GooglePlay => "GOOGLE_PLAY",
            DatabaseType::Vudu => "VUDU",
            DatabaseType::AmazonInstant => "AMAZON_INSTANT",
        }
    }

    /// 是否已有匹配实现
    pub fn is_supported(&self) -> bool {
        matches!(self, DatabaseType::Xbox)
    }

    /// 全部已知片源（含未实现的）
    pub fn all() -> [DatabaseType; 4] {
        [
            DatabaseType::Xbox,
            DatabaseType::GooglePlay,
            DatabaseType::Vudu,
            DatabaseType::AmazonInstant,
        ]
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");

        DatabaseType::all()
            .into_iter()
            .find(|t| t.name() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = DatabaseType::all().iter().map(|t| t.name()).collect();
                format!("未知片源类型: {}（可选: {}）", normalized, known.join(", "))
            })
    }
}
