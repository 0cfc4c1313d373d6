use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser};

use crate::config;

/// Watch Client - наблюдение за котировками через websocket-фид.
///
/// Подключается к фиду, один раз отправляет подписку ["quotes",[...]]
/// и до Ctrl+C отрисовывает приходящие обновления котировок.
#[derive(Parser, Debug, Clone)]
#[command(name = "watch-client", version, about)]
#[command(
    group(
        ArgGroup::new("tickers_source")
            .required(true)
            .args(["tickers_file", "tickers"])
    )
)]
pub(crate) struct Args {
    /// URL websocket-фида, например wss://wss.tradernet.ru
    #[arg(long, default_value = config::DEFAULT_FEED_URL)]
    pub(crate) url: String,

    /// Файл тикеров (по одному на строку). Нельзя вместе с --tickers
    #[arg(long, conflicts_with = "tickers")]
    pub(crate) tickers_file: Option<PathBuf>,

    /// Список тикеров строкой, например: "AAPL.US,TSLA.US" или "SP500.IDX, GAZP"
    /// Нельзя вместе с --tickers-file
    #[arg(long, conflicts_with = "tickers_file")]
    pub(crate) tickers: Option<String>,

    /// Какие поля держать в fallback-кэше (CSV из кодов полей фида)
    #[arg(long, default_value = config::DEFAULT_FALLBACK_FIELDS_CSV)]
    pub(crate) fallback_fields: String,

    /// Не очищать экран перед каждой отрисовкой
    #[arg(long)]
    pub(crate) no_clear: bool,
}

impl Args {
    /// Валидация аргументов (схема URL, файл существует и т.д.)
    pub(crate) fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            bail!("--url is empty");
        }
        if !self.url.starts_with("ws://") && !self.url.starts_with("wss://") {
            bail!("--url must start with ws:// or wss:// (got: {})", self.url);
        }

        if let Some(path) = &self.tickers_file {
            let md = std::fs::metadata(path)
                .with_context(|| format!("tickers file not found: {:?}", path))?;
            if !md.is_file() {
                bail!("--tickers-file must point to a file: {:?}", path);
            }
        }

        // ArgGroup уже гарантирует, что ровно один из (tickers_file|tickers) задан,
        // но оставим защиту на всякий случай:
        if self.tickers_file.is_none() && self.tickers.is_none() {
            bail!("either --tickers-file or --tickers must be provided");
        }
        if self.tickers_file.is_some() && self.tickers.is_some() {
            bail!("--tickers-file and --tickers are mutually exclusive");
        }

        Ok(())
    }

    /// Fallback-набор из CLI; неизвестные коды полей — ошибка конфигурации.
    pub(crate) fn fallback_fields(&self) -> Result<Vec<String>> {
        let mut out = Vec::new();

        for part in self.fallback_fields.split(',') {
            let code = part.trim().to_ascii_lowercase();
            if code.is_empty() {
                continue;
            }
            if watch_core::fields::field_info(&code).is_none() {
                bail!("unknown fallback field code: {code}");
            }
            if !out.contains(&code) {
                out.push(code);
            }
        }

        if out.is_empty() {
            bail!("--fallback-fields must name at least one field");
        }

        Ok(out)
    }
}
