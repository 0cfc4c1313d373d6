use thiserror::Error;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum WatchCoreError {
    /// Ошибки разбора кадров фида
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Ошибки чтения списка тикеров
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Ошибки разбора одного кадра фида.
///
/// Битый кадр — штатная ситуация: сессия логирует ошибку и продолжает
/// принимать следующие кадры. Эти ошибки никогда не считаются
/// транспортным сбоем.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Кадр не разобрался как массив `[eventType, payload]`
    #[error("malformed frame, expected [event, payload] array: {0}")]
    Envelope(#[from] serde_json::Error),

    /// Тип события не из числа известных
    #[error("unknown event type: {0}")]
    UnknownEvent(String),

    /// Payload события `"q"` не является объектом
    #[error("quote payload is not an object")]
    Payload,

    /// В payload нет тикера `"c"` — обновление некуда маршрутизировать
    #[error("quote payload has no ticker field \"c\"")]
    MissingTicker,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn umbrella_error_is_transparent() {
        let top = WatchCoreError::from(DecodeError::MissingTicker);
        assert_eq!(top.to_string(), "quote payload has no ticker field \"c\"");

        let top = WatchCoreError::from(std::io::Error::other("boom"));
        assert_eq!(top.to_string(), "boom");
    }
}
