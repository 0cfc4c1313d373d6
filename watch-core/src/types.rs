use std::collections::BTreeMap;
use std::time::SystemTime;

/// Одно обновление котировки, принятое из фида.
///
/// `fields` содержит только непустые скалярные значения payload,
/// без маршрутизирующего ключа `"c"`. Фид шлёт поля разреженно:
/// в обновлении присутствуют ровно те поля, которые изменились.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteUpdate {
    /// Тикер инструмента (значение ключа `"c"`)
    pub ticker: String,
    /// Поля обновления: код -> значение
    pub fields: BTreeMap<String, String>,
    /// Момент приёма кадра
    pub received_at: SystemTime,
}

impl QuoteUpdate {
    /// Создаёт обновление с текущим временем приёма.
    pub fn new(ticker: String, fields: BTreeMap<String, String>) -> Self {
        Self {
            ticker,
            fields,
            received_at: SystemTime::now(),
        }
    }
}
