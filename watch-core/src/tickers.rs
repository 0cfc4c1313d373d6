use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Код индекса S&P 500 на фиде.
pub const SP500_TICKER: &str = "SP500.IDX";

/// Чтение тикеров (по одному на строку, `#` начинает комментарий)
pub fn read_tickers<R: io::Read>(reader: R) -> io::Result<Vec<String>> {
    let mut set = BTreeSet::new();
    let buf = BufReader::new(reader);

    for line in buf.lines() {
        let line = line?;
        if let Some(t) = normalize_line(&line) {
            set.insert(t);
        }
    }

    Ok(set.into_iter().collect())
}

/// Чтение тикеров из файла
pub fn read_tickers_from_path(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let f = File::open(path)?;
    read_tickers(f)
}

fn normalize_line(line: &str) -> Option<String> {
    let s = line.trim();
    if s.is_empty() || s.starts_with('#') {
        return None;
    }

    // Поддержка inline-комментариев: "AAPL.US # comment"
    let s = s.split('#').next().unwrap_or("").trim();
    normalize_ticker(s)
}

/// Нормализация одного тикера:
/// - trim + ASCII uppercase
/// - пустой ввод -> None
/// - всё, что содержит "500", трактуется как индекс S&P 500
fn normalize_ticker(raw: &str) -> Option<String> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }

    if t.contains("500") {
        return Some(SP500_TICKER.to_string());
    }

    Some(t.to_ascii_uppercase())
}

/// Парсит список тикеров из строки вида "AAPL.US, TSLA.US, ,GOOG.US".
/// Правила:
/// - разделитель: запятая
/// - trim пробелов
/// - пустые элементы игнорируются
/// - нормализация: ASCII uppercase + алиас SP500.IDX
/// - результат: отсортирован + уникален (BTreeSet)
pub fn parse_tickers_csv(raw: &str) -> Vec<String> {
    let mut set = BTreeSet::new();

    for part in raw.split(',') {
        if let Some(t) = normalize_ticker(part) {
            set.insert(t);
        }
    }

    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};
    use std::time::{SystemTime, UNIX_EPOCH};
    use std::{fs, path::PathBuf};

    #[test]
    fn parse_tickers_csv_sorts_and_dedups_and_filters_empty() {
        let got = parse_tickers_csv(" aapl.us, TSLA.US, ,goog.us ,AAPL.US,, tsla.us ");
        assert_eq!(got, vec!["AAPL.US", "GOOG.US", "TSLA.US"]);
    }

    #[test]
    fn parse_tickers_csv_empty_gives_empty_vec() {
        assert!(parse_tickers_csv("").is_empty());
        assert!(parse_tickers_csv(" , ,  ,").is_empty());
    }

    #[test]
    fn anything_containing_500_becomes_the_sp500_index() {
        assert_eq!(parse_tickers_csv("500"), vec![SP500_TICKER]);
        assert_eq!(parse_tickers_csv("sp500"), vec![SP500_TICKER]);
        // сам код индекса тоже нормализуется в себя
        assert_eq!(parse_tickers_csv("SP500.IDX"), vec![SP500_TICKER]);
        // и дубликаты схлопываются
        assert_eq!(parse_tickers_csv("500, sp500, AAPL.US"), vec!["AAPL.US", SP500_TICKER]);
    }

    #[test]
    fn normalize_line_ignores_empty_and_full_line_comments() {
        assert_eq!(normalize_line(""), None);
        assert_eq!(normalize_line("   "), None);
        assert_eq!(normalize_line("# comment"), None);
        assert_eq!(normalize_line("   # comment"), None);
        assert_eq!(normalize_line("#"), None);
    }

    #[test]
    fn normalize_line_supports_inline_comments_and_uppercase() {
        assert_eq!(normalize_line("aapl.us"), Some("AAPL.US".to_string()));
        assert_eq!(normalize_line("  aapl.us  "), Some("AAPL.US".to_string()));
        assert_eq!(normalize_line("aapl.us # long comment"), Some("AAPL.US".to_string()));
        assert_eq!(normalize_line("tsla.us#comment"), Some("TSLA.US".to_string()));
        assert_eq!(normalize_line("   # only comment after trim"), None);
        assert_eq!(normalize_line("AAPL.US #"), Some("AAPL.US".to_string()));
    }

    #[test]
    fn read_tickers_sorts_and_deduplicates() {
        let input = "\
msft.us
aapl.us
GOOG.US
AAPL.US
  goog.us
# ignored
";
        let got = read_tickers(Cursor::new(input)).unwrap();

        // BTreeSet => сортировка + уникальность
        assert_eq!(got, vec!["AAPL.US", "GOOG.US", "MSFT.US"]);
    }

    #[test]
    fn read_tickers_ignores_blank_lines_and_comments() {
        let input = "\n   \n# one\n   # two\n#\n   #\n";
        let got = read_tickers(Cursor::new(input)).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn read_tickers_applies_the_sp500_alias() {
        let input = "sp500\naapl.us\n";
        let got = read_tickers(Cursor::new(input)).unwrap();
        assert_eq!(got, vec!["AAPL.US", SP500_TICKER]);
    }

    #[test]
    fn read_tickers_from_path_reads_file() {
        // уникальный путь в temp без сторонних crate
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path: PathBuf = std::env::temp_dir();
        path.push(format!("watch_core_tickers_test_{nanos}_{}.txt", std::process::id()));

        let input = "aapl.us\nmsft.us\n#comment\nAAPL.US\n";
        fs::write(&path, input).unwrap();

        let got = read_tickers_from_path(&path).unwrap();
        assert_eq!(got, vec!["AAPL.US", "MSFT.US"]);

        // cleanup
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn read_tickers_propagates_read_error() {
        // Reader, который читает немного, а потом падает
        struct FailingReader {
            inner: Cursor<Vec<u8>>,
            fail_after: usize,
            read_total: usize,
        }

        impl Read for FailingReader {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.read_total >= self.fail_after {
                    return Err(io::Error::other("boom"));
                }

                let remaining_before_fail = self.fail_after - self.read_total;
                let to_read = buf.len().min(remaining_before_fail);

                let n = self.inner.read(&mut buf[..to_read])?;
                self.read_total += n;

                Ok(n)
            }
        }

        let data = b"aapl.us\nmsft.us\n".to_vec();
        let reader = FailingReader {
            inner: Cursor::new(data),
            fail_after: 6,
            read_total: 0,
        };

        let err = read_tickers(reader).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(err.to_string().contains("boom"));
    }
}
