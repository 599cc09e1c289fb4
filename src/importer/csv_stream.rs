// ==========================================
// 影片 ID 映射系统 - CSV 数据流与行分词器
// ==========================================
// 职责: 提供表头行 + 惰性数据行序列；单行按逗号分词（支持引号）
// 说明: 数据流本身不做任何校验，校验由 RecordParser 负责
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// 数据行迭代器（I/O 失败以 Err 形式出现）
pub type DataRows<'a> = Box<dyn Iterator<Item = io::Result<String>> + 'a>;

// ==========================================
// CsvStream - 表头 + 惰性数据行
// ==========================================
pub struct CsvStream<'a> {
    header_row: String,
    data_rows: DataRows<'a>,
}

impl<'a> CsvStream<'a> {
    /// 由表头和（可能失败的）数据行迭代器创建
    pub fn new<I>(header_row: impl Into<String>, data_rows: I) -> Self
    where
        I: IntoIterator<Item = io::Result<String>>,
        I::IntoIter: 'a,
    {
        Self {
            header_row: header_row.into(),
            data_rows: Box::new(data_rows.into_iter()),
        }
    }

    /// 由内存中的行创建（测试/内嵌数据常用）
    pub fn from_lines<I, S>(header_row: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S> + 'a,
        I::IntoIter: 'a,
        S: Into<String> + 'a,
    {
        Self::new(header_row, lines.into_iter().map(|line| Ok(line.into())))
    }

    /// 从任意 BufRead 读取：首行为表头，其余为数据行
    ///
    /// # 说明
    /// - 行尾 `\r` 会被去掉（兼容 CRLF 文件）
    /// - 完全空白的行直接跳过，不进入解析
    pub fn from_reader<R>(reader: R) -> ImportResult<Self>
    where
        R: BufRead + 'a,
    {
        let mut lines = reader.lines();

        let header_row = match lines.next() {
            Some(line) => strip_line_ending(line?),
            None => {
                return Err(ImportError::StreamReadError(
                    "数据流为空，缺少表头行".to_string(),
                ))
            }
        };

        let data_rows = lines
            .map(|line| line.map(strip_line_ending))
            .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()));

        Ok(Self::new(header_row, data_rows))
    }

    /// 打开 CSV 文件
    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportResult<CsvStream<'static>> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        CsvStream::from_reader(BufReader::new(file))
    }

    pub fn header_row(&self) -> &str {
        &self.header_row
    }

    /// 拆分为表头与数据行（数据行只能消费一次）
    pub fn into_parts(self) -> (String, DataRows<'a>) {
        (self.header_row, self.data_rows)
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\r') {
        line.pop();
    }
    line
}

// ==========================================
// 行分词器
// ==========================================

/// 将单行按逗号切分为字段（双引号内的逗号不切分，`""` 表示转义引号）
///
/// # 参数
/// - line: 原始数据行
/// - row_number: 行号（用于错误信息）
///
/// # 返回
/// - Ok(Vec<String>): 字段列表；空行返回空列表
/// - Err(CsvParseError): 引号未闭合等格式错误（致命）
pub fn tokenize_line(line: &str, row_number: usize) -> ImportResult<Vec<String>> {
    // 合法行内的引号总是成对出现
    if line.bytes().filter(|b| *b == b'"').count() % 2 != 0 {
        return Err(ImportError::CsvParseError {
            row: row_number,
            message: format!("引号未闭合: {}", line),
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Ok(record.iter().map(str::to_string).collect()),
        Ok(false) => Ok(Vec::new()),
        Err(e) => Err(ImportError::CsvParseError {
            row: row_number,
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_tokenize_plain_line() {
        let fields = tokenize_line("1,Inception,2010", 1).unwrap();
        assert_eq!(fields, vec!["1", "Inception", "2010"]);
    }

    #[test]
    fn test_tokenize_quoted_comma() {
        let fields = tokenize_line(r#"2,"Good, the Bad",1966"#, 1).unwrap();
        assert_eq!(fields, vec!["2", "Good, the Bad", "1966"]);
    }

    #[test]
    fn test_tokenize_escaped_quote() {
        let fields = tokenize_line(r#"3,"The ""Thing""",1982"#, 1).unwrap();
        assert_eq!(fields[1], r#"The "Thing""#);
    }

    #[test]
    fn test_tokenize_keeps_empty_fields() {
        let fields = tokenize_line("1,,", 1).unwrap();
        assert_eq!(fields, vec!["1", "", ""]);
    }

    #[test]
    fn test_tokenize_unterminated_quote_is_error() {
        let result = tokenize_line(r#"1,"Inception,2010"#, 7);
        assert!(matches!(
            result,
            Err(ImportError::CsvParseError { row: 7, .. })
        ));
    }

    #[test]
    fn test_from_reader_splits_header_and_skips_blank_lines() {
        let input = "id,title,year\r\n1,Inception,2010\r\n\r\n2,Heat,1995\r\n";
        let stream = CsvStream::from_reader(Cursor::new(input)).unwrap();

        assert_eq!(stream.header_row(), "id,title,year");

        let (_, rows) = stream.into_parts();
        let rows: Vec<String> = rows.map(|r| r.unwrap()).collect();
        assert_eq!(rows, vec!["1,Inception,2010", "2,Heat,1995"]);
    }

    #[test]
    fn test_from_reader_empty_input() {
        let result = CsvStream::from_reader(Cursor::new(""));
        assert!(matches!(result, Err(ImportError::StreamReadError(_))));
    }

    #[test]
    fn test_from_path_not_found() {
        let result = CsvStream::from_path("non_existent_movies.csv");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
