// ==========================================
// 影片 ID 映射系统 - 影片领域模型
// ==========================================
// 用途: 导入层写入（Reference Store），匹配引擎只读
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Movie - 内部影片
// ==========================================
// 红线: 解析后不可变；id 假定在同一影片库内唯一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,       // 内部影片 ID
    pub title: String, // 片名（非空）
    pub year: i32,     // 上映年份
}

impl Movie {
    pub fn new(id: i64, title: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            year,
        }
    }

    /// 年份完全相等 + 片名不区分大小写相等
    pub fn matches(&self, title: &str, year: i32) -> bool {
        self.year == year && titles_equal_ignore_case(&self.title, title)
    }
}

/// 不区分大小写的片名比较（逐字符 Unicode 小写折叠，与区域设置无关）
pub fn titles_equal_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

// ==========================================
// Role - 演职人员
// ==========================================
// 说明: movie_id 不校验是否存在于影片库；当前匹配流程不使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub movie_id: i64,        // 关联 Movie.id
    pub name: Option<String>, // 人名
    pub role: Option<String>, // 角色（演员/导演等）
}

// ==========================================
// IdMapping - 外部 ID → 内部 ID 映射
// ==========================================
// 值语义: 两个字段全部相等即视为同一映射
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdMapping {
    pub internal_id: i64,
    pub external_id: String,
}

impl IdMapping {
    pub fn new(internal_id: i64, external_id: impl Into<String>) -> Self {
        Self {
            internal_id,
            external_id: external_id.into(),
        }
    }
}

// ==========================================
// 导入中间结构体
// ==========================================
// 用途: 字段映射 → 此结构 → 校验后转为领域实体
// 生命周期: 仅在导入流程内

/// 影片行（映射后、校验前）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMovieRecord {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub year: Option<i32>,
}

/// 演职人员行（映射后、校验前）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRoleRecord {
    pub movie_id: Option<i64>,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// 外部片源行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRecord {
    pub external_id: String,
    pub title: String,
    pub year: i32, // 解析失败时为 UNKNOWN_YEAR
}
