use std::time::Duration;

/// URL фида по умолчанию
pub(crate) const DEFAULT_FEED_URL: &str = "wss://wss.tradernet.ru";

/// Fallback-набор по умолчанию для CLI (см. watch_core::fields::DEFAULT_FALLBACK_FIELDS)
pub(crate) const DEFAULT_FALLBACK_FIELDS_CSV: &str = "ltp,ltt,lts,chg,pcp";

/// Таймаут одного блокирующего чтения; между тиками проверяется отмена
pub(crate) const RECV_TICK: Duration = Duration::from_millis(200);

/// Сколько ждём завершения close-рукопожатия
pub(crate) const CLOSE_WAIT: Duration = Duration::from_secs(2);
