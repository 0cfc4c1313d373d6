//! Чёрноящичные проверки CLI: все сценарии падают до какого-либо
//! обращения к сети.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn watch_client() -> Command {
    Command::cargo_bin("watch-client").unwrap()
}

#[test]
fn requires_a_tickers_source() {
    watch_client()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn rejects_both_ticker_sources_at_once() {
    watch_client()
        .args(["--tickers", "AAPL.US", "--tickers-file", "tickers.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn rejects_non_websocket_url() {
    watch_client()
        .args(["--url", "https://example.com", "--tickers", "AAPL.US"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ws://"));
}

#[test]
fn rejects_missing_tickers_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    watch_client()
        .arg("--tickers-file")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn rejects_tickers_file_with_no_tickers() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# только комментарии").unwrap();
    writeln!(file, "   ").unwrap();
    file.flush().unwrap();

    watch_client()
        .arg("--tickers-file")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn rejects_empty_tickers_argument() {
    watch_client()
        .args(["--tickers", " , , "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn rejects_unknown_fallback_field_code() {
    watch_client()
        .args(["--tickers", "AAPL.US", "--fallback-fields", "ltp,bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus"));
}
