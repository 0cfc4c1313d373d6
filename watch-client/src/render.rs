use std::io::Write;

use log::warn;

use watch_core::QuoteSnapshot;
use watch_core::fields::{FIELD_CATALOG, TICKER_KEY, field_label};

/// ANSI: очистить экран и поставить курсор в левый верхний угол
const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[1;1H";

const RULE: &str = "-------------------------------------------------";

/// Маркер отсутствующего значения fallback-поля
const UNAVAILABLE: &str = "н/д";

/// Поля шапки: цена и время последней сделки
const HEADER_FIELDS: &[&str] = &["ltp", "ltt"];

/// Приёмник готовых снимков котировок.
///
/// Вызывается ровно один раз на каждое декодированное обновление,
/// после вливания события в кэш, в порядке прихода кадров.
pub(crate) trait QuoteSink {
    /// Принять снимок для отображения.
    fn on_quote(&mut self, snapshot: &QuoteSnapshot);
}

/// Отрисовка снимков в текстовую консоль.
///
/// Шапка: тикер, цена и время последней сделки; дальше остальные поля
/// снимка в порядке каталога, в конце — поля с неизвестными кодами.
/// Fallback-поля без значения выводятся с явным маркером, а не пропадают.
pub(crate) struct ConsoleRenderer<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> ConsoleRenderer<W> {
    pub(crate) fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    fn write_snapshot(&mut self, snapshot: &QuoteSnapshot) -> std::io::Result<()> {
        if self.clear_screen {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "{}: {}", field_label(TICKER_KEY), snapshot.ticker)?;
        for code in HEADER_FIELDS {
            let value = snapshot
                .fields
                .get(*code)
                .map(String::as_str)
                .unwrap_or(UNAVAILABLE);
            writeln!(self.out, "{}: {}", field_label(code), value)?;
        }
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out)?;

        for info in FIELD_CATALOG {
            if info.code == TICKER_KEY || HEADER_FIELDS.contains(&info.code) {
                continue;
            }
            if let Some(value) = snapshot.fields.get(info.code) {
                writeln!(self.out, "{}: {}", info.label, value)?;
            } else if snapshot.unavailable.contains(&info.code.to_string()) {
                writeln!(self.out, "{}: {}", info.label, UNAVAILABLE)?;
            }
        }

        // поля, которых нет в каталоге, выводим как есть
        for (code, value) in &snapshot.fields {
            if watch_core::fields::field_info(code).is_none() {
                writeln!(self.out, "{code}: {value}")?;
            }
        }

        self.out.flush()
    }
}

impl<W: Write> QuoteSink for ConsoleRenderer<W> {
    fn on_quote(&mut self, snapshot: &QuoteSnapshot) {
        // сбой поверхности вывода не должен валить сессию
        if let Err(e) = self.write_snapshot(snapshot) {
            warn!("render failed: {e}");
        }
    }
}
