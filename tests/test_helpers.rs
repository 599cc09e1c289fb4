// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据流构建、样例数据等功能
// ==========================================

#![allow(dead_code)]

use movie_matcher::{CsvStream, DatabaseType, DefaultMatcherFactory, Matcher, MatcherFactory};
use std::io::Write;
use tempfile::NamedTempFile;

pub const MOVIES_HEADER: &str = "id,title,year,length,rating";
pub const ROLES_HEADER: &str = "movie_id,name,role";
pub const XBOX_HEADER: &str =
    "MediaId,Title,OriginalReleaseDate,MediaType,Actors,Director,XboxLiveURL";

/// 影片库样例
pub fn sample_movie_rows() -> Vec<&'static str> {
    vec![
        "1,Inception,2010,148,PG-13",
        "2,Heat,1995,170,R",
        r#"3,"Good, the Bad and the Ugly",1966,161,R"#,
        "4,Solaris,1972,167,PG",
        "5,Solaris,2002,99,PG-13",
    ]
}

/// 演职人员样例
pub fn sample_role_rows() -> Vec<&'static str> {
    vec![
        "1,Christopher Nolan,director",
        "1,Leonardo DiCaprio,cast",
        "2,Michael Mann,director",
        "3,Sergio Leone,director",
    ]
}

pub fn movies_stream(lines: Vec<&'static str>) -> CsvStream<'static> {
    CsvStream::from_lines(MOVIES_HEADER, lines)
}

pub fn roles_stream(lines: Vec<&'static str>) -> CsvStream<'static> {
    CsvStream::from_lines(ROLES_HEADER, lines)
}

pub fn xbox_stream(lines: Vec<&'static str>) -> CsvStream<'static> {
    CsvStream::from_lines(XBOX_HEADER, lines)
}

/// 使用样例数据创建 Xbox 匹配引擎
pub fn sample_matcher() -> Box<dyn Matcher> {
    DefaultMatcherFactory::new()
        .create_matcher(
            DatabaseType::Xbox,
            movies_stream(sample_movie_rows()),
            roles_stream(sample_role_rows()),
        )
        .expect("创建匹配引擎失败")
}

/// 创建临时 CSV 文件
///
/// # 返回
/// - NamedTempFile: 临时文件（需要保持存活）
pub fn write_temp_csv(header: &str, rows: &[&str]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("创建临时文件失败");
    writeln!(temp_file, "{}", header).unwrap();
    for row in rows {
        writeln!(temp_file, "{}", row).unwrap();
    }
    temp_file
}
