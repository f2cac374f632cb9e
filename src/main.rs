// =============================================================================
// Trend Screener — Main Entry Point
// =============================================================================
//
// Usage:
//   trend-screener                  interactive command loop on stdin
//   trend-screener analyze [SYM]    one analysis, then exit
//   trend-screener screen           one screening pass, then exit
//   trend-screener init-config      write the default config file
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod binance;
mod config;
mod error;
mod indicators;
mod market_data;
mod news;
mod rate_limit;
mod report;
mod screener;
mod types;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::binance::BinanceClient;
use crate::config::AppConfig;
use crate::news::NewsCalendar;
use crate::rate_limit::AnalysisRateLimiter;

const DEFAULT_CONFIG_PATH: &str = "trend_screener.json";

/// Everything a command needs, built once at startup.
struct App {
    config: AppConfig,
    source: BinanceClient,
    news: NewsCalendar,
    limiter: AnalysisRateLimiter,
}

impl App {
    async fn analyze(&self, symbol: Option<&str>) -> String {
        if let Err(remaining) = self.limiter.check() {
            return format!(
                "Please wait {}s before requesting another analysis.",
                remaining.as_secs().max(1)
            );
        }

        let symbol = symbol
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.config.symbol.clone());

        match analysis::analyze_symbol(&self.source, &symbol, &self.config).await {
            Ok(summary) => {
                info!(
                    symbol = %summary.symbol,
                    signal = %summary.signal,
                    regime = %summary.regime,
                    "analysis complete"
                );
                report::render_analysis(&summary, &self.upcoming_news())
            }
            Err(e) if e.is_insufficient_data() => {
                warn!(symbol = %symbol, error = %e, "analysis skipped");
                format!("{symbol}: {e}")
            }
            Err(e) => {
                error!(symbol = %symbol, error = %e, "analysis failed");
                format!("{symbol}: analysis failed ({e})")
            }
        }
    }

    async fn screen(&self) -> String {
        let results = screener::run_screen(
            &self.source,
            &self.config.candidates,
            &self.config.screen_interval,
            self.config.screen_limit,
            &self.config.screener,
        )
        .await;
        report::render_screen(&results)
    }

    fn upcoming_news(&self) -> Vec<news::NewsEvent> {
        let today = chrono::Utc::now().date_naive();
        self.news.upcoming(today, self.config.news_horizon_days)
    }

    fn news_text(&self) -> String {
        let events = self.upcoming_news();
        if events.is_empty() {
            return "No upcoming events.".to_string();
        }
        events
            .iter()
            .map(|e| format!("{} {}", e.date.format("%Y-%m-%d"), e.label))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn status_text(&self) -> String {
        let snapshot = self.limiter.snapshot();
        serde_json::to_string_pretty(&snapshot)
            .unwrap_or_else(|e| format!("status unavailable: {e}"))
    }

    /// Handle one command line. Returns `None` when the loop should stop.
    async fn dispatch(&self, line: &str) -> Option<String> {
        let mut parts = line.split_whitespace();
        let reply = match parts.next() {
            None => return Some(String::new()),
            Some("/analyze") | Some("analyze") => self.analyze(parts.next()).await,
            Some("/screen") | Some("screen") => self.screen().await,
            Some("/news") | Some("news") => self.news_text(),
            Some("/status") | Some("status") => self.status_text(),
            Some("/quit") | Some("quit") | Some("/exit") => return None,
            Some("/help") | Some("help") => HELP.to_string(),
            Some(other) => format!("Unknown command '{other}'. Try /help."),
        };
        Some(reply)
    }
}

const HELP: &str = "Commands:\n  /analyze [SYMBOL]  trend, MA and RSI signal\n  /screen            sideways + golden-cross scan\n  /news              upcoming events\n  /status            rate-limiter state\n  /quit              exit";

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── 2. Configuration ─────────────────────────────────────────────────
    let config_path = std::env::var("TREND_SCREENER_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("init-config") {
        AppConfig::default().save(&config_path)?;
        println!("Wrote default config to {config_path}");
        return Ok(());
    }

    let mut config = AppConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    config.apply_env(|key| std::env::var(key).ok());

    let news = NewsCalendar::load(&config.news_calendar_path).unwrap_or_else(|e| {
        warn!(error = %e, "No news calendar loaded");
        NewsCalendar::default()
    });
    if news.is_empty() {
        info!("News calendar has no events; /news will stay empty");
    }

    info!(
        symbol = %config.symbol,
        timeframe = %config.timeframe,
        candidates = ?config.candidates,
        "Trend screener starting"
    );

    // ── 3. Collaborators ─────────────────────────────────────────────────
    let app = App {
        limiter: AnalysisRateLimiter::from_secs(config.analysis_interval_secs),
        source: BinanceClient::new()?,
        news,
        config,
    };

    // ── 4. One-shot commands ─────────────────────────────────────────────
    if !args.is_empty() {
        if let Some(reply) = app.dispatch(&args.join(" ")).await {
            println!("{reply}");
        }
        return Ok(());
    }

    // ── 5. Interactive loop ──────────────────────────────────────────────
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match app.dispatch(line.trim()).await {
                    Some(reply) if reply.is_empty() => {}
                    Some(reply) => println!("{reply}"),
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Trend screener stopped");
    Ok(())
}
