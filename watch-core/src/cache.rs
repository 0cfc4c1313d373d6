use std::collections::{BTreeMap, HashMap};

/// Снимок котировки для одного прохода отрисовки.
///
/// Объединение свежих полей события и кэшированных fallback-полей;
/// при совпадении кода свежее значение всегда побеждает кэшированное.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSnapshot {
    /// Тикер инструмента
    pub ticker: String,
    /// Разрешённые значения: код -> значение
    pub fields: BTreeMap<String, String>,
    /// Fallback-поля, для которых значения нет ни в событии, ни в кэше
    pub unavailable: Vec<String>,
}

/// Кэш последних известных значений fallback-полей по тикерам.
///
/// Однажды увиденное значение пары (тикер, поле) живёт до конца процесса:
/// значения только перезаписываются, но не удаляются. Кэш хранит только
/// поля из настроенного fallback-набора; остальные поля события проходят
/// в снимок транзитом.
///
/// Кэш мутируется только из цикла приёма (один писатель), поэтому
/// блокировок здесь нет.
#[derive(Debug)]
pub struct QuoteCache {
    fallback_fields: Vec<String>,
    entries: HashMap<String, HashMap<String, String>>,
}

impl QuoteCache {
    /// Создаёт пустой кэш с заданным fallback-набором полей.
    pub fn new<I, S>(fallback_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fallback_fields: fallback_fields.into_iter().map(Into::into).collect(),
            entries: HashMap::new(),
        }
    }

    /// Настроенный fallback-набор.
    pub fn fallback_fields(&self) -> &[String] {
        &self.fallback_fields
    }

    /// Вливает свежие поля события и возвращает снимок для отрисовки.
    ///
    /// Для каждого поля fallback-набора: непустое свежее значение
    /// запоминается и используется; иначе берётся последнее известное
    /// значение из кэша; иначе поле попадает в `unavailable`. Каждое
    /// fallback-поле оказывается ровно в одном из двух мест снимка.
    pub fn merge(&mut self, ticker: &str, fresh: &BTreeMap<String, String>) -> QuoteSnapshot {
        let entry = self.entries.entry(ticker.to_string()).or_default();

        let mut fields = BTreeMap::new();
        for (code, value) in fresh {
            if value.is_empty() {
                continue;
            }
            if self.fallback_fields.contains(code) {
                entry.insert(code.clone(), value.clone());
            }
            fields.insert(code.clone(), value.clone());
        }

        let mut unavailable = Vec::new();
        for code in &self.fallback_fields {
            if fields.contains_key(code) {
                continue;
            }
            match entry.get(code) {
                Some(cached) => {
                    fields.insert(code.clone(), cached.clone());
                }
                None => unavailable.push(code.clone()),
            }
        }

        QuoteSnapshot {
            ticker: ticker.to_string(),
            fields,
            unavailable,
        }
    }
}
