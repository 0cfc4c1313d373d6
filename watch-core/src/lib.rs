//! # watch-core
//!
//! Базовые типы и протокол фида котировок для Watch Client.
//!
//! Этот крейт содержит:
//!
//! - [`protocol`] — разбор текстовых кадров фида и формирование кадра подписки
//! - [`fields`] — каталог известных полей котировки (код, подпись, тип значения)
//! - [`cache`] — кэш последних известных значений fallback-полей
//! - [`tickers`] — чтение и нормализация списка тикеров из текста/файла
//! - [`types`] — доменные типы
//! - [`error`] — типы ошибок, которые возвращают компоненты `watch-core`
//!
//! ## Быстрый пример: разбор кадра `"q"`
//!
//! ```rust
//! use watch_core::protocol::{FeedEvent, decode_frame};
//!
//! let event = decode_frame(r#"["q", {"c": "AAPL.US", "ltp": "150.2"}]"#).unwrap();
//! match event {
//!     FeedEvent::Quote(update) => {
//!         assert_eq!(update.ticker, "AAPL.US");
//!         assert_eq!(update.fields["ltp"], "150.2");
//!     }
//!     other => panic!("unexpected event: {other:?}"),
//! }
//! ```
//!
//! ## Пример: кадр подписки
//!
//! ```rust
//! use watch_core::protocol::subscribe_frame;
//!
//! let tickers = vec!["SP500.IDX".to_string(), "AAPL.US".to_string()];
//! let frame = subscribe_frame(&tickers).unwrap();
//! assert_eq!(frame, r#"["quotes",["SP500.IDX","AAPL.US"]]"#);
//! ```
//!
//! ## Пример: fallback-кэш
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use watch_core::cache::QuoteCache;
//!
//! let mut cache = QuoteCache::new(["ltp", "ltt"]);
//!
//! let mut fresh = BTreeMap::new();
//! fresh.insert("ltp".to_string(), "150.2".to_string());
//! let snap = cache.merge("AAPL.US", &fresh);
//! assert_eq!(snap.fields["ltp"], "150.2");
//! assert_eq!(snap.unavailable, vec!["ltt".to_string()]);
//!
//! // следующее событие без ltp берёт значение из кэша
//! let snap = cache.merge("AAPL.US", &BTreeMap::new());
//! assert_eq!(snap.fields["ltp"], "150.2");
//! ```
//!
//! ## Дизайн
//!
//! `watch-core` задуман как "нулевая" зависимость для всех частей системы:
//! клиент, утилиты, тесты. Поэтому здесь держим только чистые типы,
//! разбор/сериализацию и простую утилитарщину, без runtime/async,
//! без сокетов и без тяжёлых зависимостей.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Текстовый протокол фида (кадры `[eventType, payload]`, подписка).
pub mod protocol;

/// Каталог известных полей котировки.
pub mod fields;

/// Кэш последних известных значений fallback-полей.
pub mod cache;

/// Чтение/нормализация списка тикеров из текста и файлов.
pub mod tickers;

/// Доменные типы (например обновление котировки).
pub mod types;

/// Ошибки `watch-core`.
pub mod error;

// --- Re-exports (публичный фасад API) ---

pub use crate::cache::{QuoteCache, QuoteSnapshot};
pub use crate::error::{DecodeError, WatchCoreError};
pub use crate::fields::{
    DEFAULT_FALLBACK_FIELDS, FIELD_CATALOG, FieldInfo, FieldKind, TICKER_KEY, field_info,
    field_label,
};
pub use crate::protocol::{FeedEvent, decode_frame, subscribe_frame};
pub use crate::types::QuoteUpdate;
