// ==========================================
// 影片 ID 映射系统 - 日期/年份规整
// ==========================================
// 职责: 从外部片源的发行时间戳中提取 4 位年份
// 格式: 仅支持 M/d/yyyy h:mm:ss AM|PM（例: 3/14/2008 12:00:00 AM）
// ==========================================

use chrono::{Datelike, NaiveDateTime};

/// 发行时间戳格式（chrono 语法）
const RELEASE_DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// 年份提取失败时的哨兵值（任何真实影片都不会使用）
pub const UNKNOWN_YEAR: i32 = -1;

/// 提取年份，失败返回 None
///
/// # 失败情形
/// - 格式不符（含多余字符）
/// - 非数字分量
/// - 日期不存在（如 2/30）
/// - 年份不是 4 位
pub fn try_extract_year(raw_date: &str) -> Option<i32> {
    // 整串匹配：AM/PM 之后的任何字符（如时区 "PST"）均判为失败，不做前缀解析
    let parsed = NaiveDateTime::parse_from_str(raw_date.trim(), RELEASE_DATE_FORMAT).ok()?;
    let year = parsed.year();

    (1000..=9999).contains(&year).then_some(year)
}

/// 提取年份，失败返回哨兵值 [`UNKNOWN_YEAR`]
pub fn extract_year(raw_date: &str) -> i32 {
    try_extract_year(raw_date).unwrap_or(UNKNOWN_YEAR)
}
