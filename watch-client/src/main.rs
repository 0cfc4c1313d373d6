//! Точка входа `watch-client`.
//!
//! Жизненный цикл:
//! - парсинг CLI и загрузка списка тикеров
//! - подключение к websocket-фиду и разовая подписка `["quotes",[...]]`
//! - цикл приёма: декодирование кадров, вливание в fallback-кэш, отрисовка
//! - корректная остановка по `Ctrl+C`

mod cli;
mod config;
mod render;
mod session;
mod tickers;

use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};

use clap::Parser;
use log::info;

use watch_core::QuoteCache;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let shutdown = Arc::new(AtomicBool::new(false));

    // Ctrl+C => ставим shutdown=true
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
            info!("shutting down...");
        })?;
    }

    let args = cli::Args::parse();
    args.validate()?;

    let tickers = tickers::load_tickers(&args)?;
    let fallback = args.fallback_fields()?;

    info!(
        "Starting watch-client: url={}, tickers={}, fallback={}",
        args.url,
        tickers.join(","),
        fallback.join(",")
    );

    let cache = QuoteCache::new(fallback);
    let renderer = render::ConsoleRenderer::new(std::io::stdout(), !args.no_clear);

    let mut session = session::StreamSession::new(cache, renderer, shutdown);
    session.run(&args.url, &tickers)?;

    info!("session finished in state {:?}", session.state());
    Ok(())
}
