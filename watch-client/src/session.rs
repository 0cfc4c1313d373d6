use std::net::TcpStream;
use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use thiserror::Error;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use watch_core::QuoteCache;
use watch_core::protocol::{FeedEvent, decode_frame, subscribe_frame};

use crate::config::{CLOSE_WAIT, RECV_TICK};
use crate::render::QuoteSink;

type WsSocket = WebSocket<MaybeTlsStream<TcpStream>>;

/// Состояния сессии.
///
/// Нормальный путь: Disconnected -> Connecting -> Subscribing -> Streaming
/// -> Closing -> Closed. Faulted — терминальное состояние, достижимое из
/// любого нетерминального.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionState {
    Disconnected,
    Connecting,
    Subscribing,
    Streaming,
    Closing,
    Closed,
    Faulted,
}

/// Фатальные ошибки сессии.
///
/// Ретраев здесь нет: ошибка отдаётся владельцу сессии, он сам решает,
/// поднимать ли новую. Битые кадры сюда не попадают — они логируются
/// внутри цикла приёма, и приём продолжается.
#[derive(Debug, Error)]
pub(crate) enum SessionError {
    #[error("failed to connect to {url}")]
    Connect {
        url: String,
        #[source]
        source: Box<tungstenite::Error>,
    },

    #[error("failed to encode subscribe request")]
    SubscribeEncode(#[source] serde_json::Error),

    #[error("failed to send subscribe request")]
    SubscribeSend(#[source] Box<tungstenite::Error>),

    #[error("transport failed mid-stream")]
    Transport(#[source] Box<tungstenite::Error>),
}

/// Сессия стриминга котировок: одно подключение, один цикл приёма.
///
/// Кэш и приёмник снимков инжектируются при создании; трогает их только
/// цикл приёма (один писатель), поэтому блокировок нет.
pub(crate) struct StreamSession<S: QuoteSink> {
    cache: QuoteCache,
    sink: S,
    shutdown: Arc<AtomicBool>,
    state: SessionState,
}

impl<S: QuoteSink> StreamSession<S> {
    pub(crate) fn new(cache: QuoteCache, sink: S, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            cache,
            sink,
            shutdown,
            state: SessionState::Disconnected,
        }
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    /// Подключается, подписывается и крутит цикл приёма до отмены,
    /// close от пира или транспортного сбоя.
    pub(crate) fn run(&mut self, url: &str, tickers: &[String]) -> Result<(), SessionError> {
        let mut socket = self.connect(url)?;
        self.subscribe(&mut socket, tickers)?;
        self.stream(&mut socket)
    }

    fn set_state(&mut self, next: SessionState) {
        debug!("session state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fault(&mut self, err: SessionError) -> SessionError {
        self.set_state(SessionState::Faulted);
        err
    }

    fn connect(&mut self, url: &str) -> Result<WsSocket, SessionError> {
        self.set_state(SessionState::Connecting);

        let (mut socket, response) = tungstenite::connect(url).map_err(|e| {
            self.fault(SessionError::Connect {
                url: url.to_string(),
                source: Box::new(e),
            })
        })?;
        info!("connected to {url} (handshake status {})", response.status());

        set_read_timeout(&mut socket, RECV_TICK);
        Ok(socket)
    }

    fn subscribe(&mut self, socket: &mut WsSocket, tickers: &[String]) -> Result<(), SessionError> {
        self.set_state(SessionState::Subscribing);

        let frame = subscribe_frame(tickers)
            .map_err(|e| self.fault(SessionError::SubscribeEncode(e)))?;
        socket
            .send(Message::Text(frame))
            .map_err(|e| self.fault(SessionError::SubscribeSend(Box::new(e))))?;

        info!("subscribed to {} tickers: {}", tickers.len(), tickers.join(","));
        Ok(())
    }

    fn stream(&mut self, socket: &mut WsSocket) -> Result<(), SessionError> {
        self.set_state(SessionState::Streaming);

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                info!("cancellation requested; closing session");
                return self.close_handshake(socket, true);
            }

            match socket.read() {
                Ok(Message::Text(text)) => self.handle_frame(&text),
                Ok(Message::Close(frame)) => {
                    info!("peer requested close: {frame:?}");
                    // ответный close уже поставлен в очередь библиотекой,
                    // осталось дочитать рукопожатие
                    return self.close_handshake(socket, false);
                }
                Ok(other) => {
                    debug!("ignoring non-text frame: {other:?}");
                }
                Err(e) if is_recv_tick(&e) => {
                    // таймаут чтения: просто тик цикла
                }
                Err(tungstenite::Error::ConnectionClosed) => {
                    self.set_state(SessionState::Closed);
                    info!("connection closed");
                    return Ok(());
                }
                Err(e) => {
                    return Err(self.fault(SessionError::Transport(Box::new(e))));
                }
            }
        }
    }

    /// Один декодированный кадр. Битый кадр логируется, цикл продолжается;
    /// на каждое обновление котировки — ровно один вызов приёмника,
    /// после вливания в кэш.
    fn handle_frame(&mut self, raw: &str) {
        match decode_frame(raw) {
            Ok(FeedEvent::Quote(update)) => {
                let snapshot = self.cache.merge(&update.ticker, &update.fields);
                self.sink.on_quote(&snapshot);
            }
            Ok(FeedEvent::Ignored { event_type }) => {
                debug!("ignoring {event_type} event");
            }
            Err(e) => {
                warn!("bad frame: {e}");
            }
        }
    }

    /// Closing -> Closed: доводит close-рукопожатие до конца или бросает
    /// его по таймауту. `initiated_by_us` — кто послал close первым.
    fn close_handshake(
        &mut self,
        socket: &mut WsSocket,
        initiated_by_us: bool,
    ) -> Result<(), SessionError> {
        self.set_state(SessionState::Closing);

        if initiated_by_us {
            if let Err(e) = socket.close(None) {
                debug!("close request failed: {e}");
            }
        }

        let deadline = Instant::now() + CLOSE_WAIT;
        while Instant::now() < deadline {
            match socket.read() {
                Ok(frame) => debug!("discarding frame during close: {frame:?}"),
                Err(e) if is_recv_tick(&e) => {}
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    break;
                }
                Err(e) => {
                    debug!("transport error during close: {e}");
                    break;
                }
            }
        }

        self.set_state(SessionState::Closed);
        info!("session closed");
        Ok(())
    }
}

/// Ограничивает блокирующее чтение одним тиком, чтобы между тиками
/// цикл мог заметить отмену.
fn set_read_timeout(socket: &mut WsSocket, tick: Duration) {
    let stream: &TcpStream = match socket.get_ref() {
        MaybeTlsStream::Plain(s) => s,
        MaybeTlsStream::NativeTls(s) => s.get_ref(),
        _ => return,
    };

    if let Err(e) = stream.set_read_timeout(Some(tick)) {
        warn!("failed to set read timeout: {e}");
    }
}

/// Таймаут чтения — не ошибка, а тик цикла приёма.
fn is_recv_tick(err: &tungstenite::Error) -> bool {
    matches!(
        err,
        tungstenite::Error::Io(e)
            if e.kind() == std::io::ErrorKind::WouldBlock
                || e.kind() == std::io::ErrorKind::TimedOut
    )
}
