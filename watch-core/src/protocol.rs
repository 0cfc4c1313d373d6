use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::fields::TICKER_KEY;
use crate::types::QuoteUpdate;

/// Тип события с обновлением котировки.
const QUOTE_EVENT: &str = "q";

/// Служебные типы событий, которые фид шлёт помимо котировок.
/// Для отрисовки они не нужны, но и ошибкой не являются.
const CONTROL_EVENTS: &[&str] = &["userData"];

/// Внешняя оболочка кадра: двухэлементный массив `[eventType, payload]`.
#[derive(Debug, Deserialize)]
struct RawFrame(String, Value);

/// Разобранное событие фида.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Обновление котировки
    Quote(QuoteUpdate),
    /// Служебное событие, не влияющее на отрисовку
    Ignored {
        /// Тип события
        event_type: String,
    },
}

/// Разбирает один текстовый кадр фида.
///
/// Любой структурный дефект кадра возвращается как [`DecodeError`],
/// наружу ничего не паникует и не пробрасывается.
pub fn decode_frame(raw: &str) -> Result<FeedEvent, DecodeError> {
    let RawFrame(event_type, payload) = serde_json::from_str(raw)?;

    if event_type == QUOTE_EVENT {
        return decode_quote(payload);
    }

    if CONTROL_EVENTS.contains(&event_type.as_str()) {
        return Ok(FeedEvent::Ignored { event_type });
    }

    Err(DecodeError::UnknownEvent(event_type))
}

fn decode_quote(payload: Value) -> Result<FeedEvent, DecodeError> {
    let Value::Object(map) = payload else {
        return Err(DecodeError::Payload);
    };

    let ticker = map
        .get(TICKER_KEY)
        .and_then(scalar_to_string)
        .ok_or(DecodeError::MissingTicker)?;

    let mut fields = BTreeMap::new();
    for (code, value) in &map {
        if code == TICKER_KEY {
            continue;
        }
        if let Some(text) = scalar_to_string(value) {
            fields.insert(code.clone(), text);
        }
    }

    Ok(FeedEvent::Quote(QuoteUpdate::new(ticker, fields)))
}

/// Скаляр -> строка. `null`, массивы, объекты и пустые строки
/// трактуются как отсутствие значения.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Формирует кадр подписки на котировки.
///
/// Для `["SP500.IDX", "AAPL.US"]` получается буквально
/// `["quotes",["SP500.IDX","AAPL.US"]]`.
pub fn subscribe_frame(tickers: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&("quotes", tickers))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(raw: &str) -> QuoteUpdate {
        match decode_frame(raw) {
            Ok(FeedEvent::Quote(update)) => update,
            other => panic!("expected quote event, got: {other:?}"),
        }
    }

    #[test]
    fn decodes_quote_event_with_ticker_and_fields() {
        let update = quote(r#"["q", {"c": "AAPL.US", "ltp": "150.2"}]"#);

        assert_eq!(update.ticker, "AAPL.US");
        assert_eq!(update.fields["ltp"], "150.2");
        assert!(!update.fields.contains_key("c"));
    }

    #[test]
    fn normalizes_scalar_values_to_text() {
        let update = quote(r#"["q", {"c": "AAPL.US", "ltp": 150.2, "trades": 42}]"#);

        assert_eq!(update.fields["ltp"], "150.2");
        assert_eq!(update.fields["trades"], "42");
    }

    #[test]
    fn drops_null_empty_and_nested_values() {
        let update = quote(r#"["q", {"c": "AAPL.US", "ltt": null, "name": "", "x": [1], "y": {}}]"#);

        assert!(update.fields.is_empty());
    }

    #[test]
    fn quote_without_ticker_is_a_decode_error() {
        let err = decode_frame(r#"["q", {"ltp": "150.2"}]"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingTicker));
    }

    #[test]
    fn empty_ticker_is_a_decode_error() {
        let err = decode_frame(r#"["q", {"c": "", "ltp": "150.2"}]"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingTicker));
    }

    #[test]
    fn quote_payload_must_be_an_object() {
        let err = decode_frame(r#"["q", ["AAPL.US"]]"#).unwrap_err();
        assert!(matches!(err, DecodeError::Payload));
    }

    #[test]
    fn user_data_event_is_ignored_not_an_error() {
        let event = decode_frame(r#"["userData", {"mode": "demo"}]"#).unwrap();
        assert_eq!(
            event,
            FeedEvent::Ignored {
                event_type: "userData".to_string()
            }
        );
    }

    #[test]
    fn unknown_event_type_is_a_decode_error() {
        let err = decode_frame(r#"["portfolio", {}]"#).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownEvent(t) if t == "portfolio"));
    }

    #[test]
    fn non_json_text_is_an_envelope_error() {
        let err = decode_frame("plain text, not a frame").unwrap_err();
        assert!(matches!(err, DecodeError::Envelope(_)));
    }

    #[test]
    fn wrong_arity_and_wrong_shape_are_envelope_errors() {
        for raw in [r#"["q"]"#, r#"["q", {}, 1]"#, r#"{"q": {}}"#, r#"[1, {}]"#] {
            let err = decode_frame(raw).unwrap_err();
            assert!(matches!(err, DecodeError::Envelope(_)), "raw: {raw}");
        }
    }

    #[test]
    fn subscribe_frame_matches_feed_grammar_literally() {
        let tickers = vec!["SP500.IDX".to_string(), "AAPL.US".to_string()];
        let frame = subscribe_frame(&tickers).unwrap();

        assert_eq!(frame, r#"["quotes",["SP500.IDX","AAPL.US"]]"#);
    }

    #[test]
    fn subscribe_frame_for_single_ticker() {
        let frame = subscribe_frame(std::slice::from_ref(&"GAZP".to_string())).unwrap();
        assert_eq!(frame, r#"["quotes",["GAZP"]]"#);
    }
}
