// ==========================================
// 影片 ID 映射系统 - 命令行入口
// ==========================================
// 用法:
//   movie-matcher <movies.csv> <roles.csv> <PROVIDER> <external.csv> [config.json]
//
// 输出: 去重后的 ID 映射（JSON 数组，stdout）；日志输出到 stderr
// 环境变量:
//   RUST_LOG=debug                 调整日志级别
//   MOVIE_MATCHER_LOG_FORMAT=json  JSON 格式日志
// ==========================================

use anyhow::{Context, Result};
use movie_matcher::engine::MatchError;
use movie_matcher::{
    logging, CsvStream, DatabaseType, DefaultMatcherFactory, MatcherConfig, MatcherFactory,
};

const USAGE: &str =
    "用法: movie-matcher <movies.csv> <roles.csv> <PROVIDER> <external.csv> [config.json]";

fn main() -> Result<()> {
    match std::env::var("MOVIE_MATCHER_LOG_FORMAT").as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    tracing::info!("{} v{}", movie_matcher::APP_NAME, movie_matcher::VERSION);

    // 片源类型先于任何文件读取校验
    let database_type: DatabaseType = args[2]
        .parse()
        .map_err(MatchError::UnknownDatabase)?;
    database_type.ensure_supported()?;

    let config = match args.get(4) {
        Some(path) => MatcherConfig::from_json_file(path)
            .with_context(|| format!("加载配置失败: {}", path))?,
        None => MatcherConfig::default(),
    };

    let movies = CsvStream::from_path(&args[0])
        .with_context(|| format!("打开影片库失败: {}", args[0]))?;
    let roles = CsvStream::from_path(&args[1])
        .with_context(|| format!("打开演职人员数据失败: {}", args[1]))?;

    let factory = DefaultMatcherFactory::with_config(config);
    let matcher = factory.create_matcher(database_type, movies, roles)?;

    let external = CsvStream::from_path(&args[3])
        .with_context(|| format!("打开外部片源失败: {}", args[3]))?;
    let report = matcher.match_with_report(database_type, external)?;

    println!("{}", serde_json::to_string_pretty(&report.mappings)?);

    Ok(())
}
