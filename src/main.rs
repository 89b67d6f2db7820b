use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use wallabag_tui::api::{Gateway, ListQuery, WallabagClient};
use wallabag_tui::app::{App, AppEvent};
use wallabag_tui::config::Config;
use wallabag_tui::content::HtmlRenderer;
use wallabag_tui::store::ItemStore;
use wallabag_tui::ui;

#[derive(Parser, Debug)]
#[command(
    name = "wallabag-tui",
    about = "Terminal dashboard for a Wallabag read-it-later server"
)]
struct Args {
    /// Config file (default: ~/.config/wallabag-tui/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Build the log filter.
///
/// `RUST_LOG` always wins. Without it, a log file gets `info`, while stderr
/// only gets `error`: stderr is the terminal the UI draws on, and recovered
/// failures (a rejected toggle, a failed article load) are logged at `warn`.
///
/// # Arguments
///
/// * `rust_log` - Value of `RUST_LOG`, if set
/// * `to_file` - Whether logs go to `--log-file`
fn log_filter(rust_log: Option<&str>, to_file: bool) -> EnvFilter {
    match rust_log {
        Some(directives) => EnvFilter::new(directives),
        None if to_file => EnvFilter::new("info"),
        None => EnvFilter::new("error"),
    }
}

/// Logs go to `--log-file` when given, otherwise to stderr.
fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(rust_log.as_deref(), log_file.is_some());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file '{}'", path.display()))?;
            builder.with_ansi(false).with_writer(Arc::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    let Some(config_path) = args.config.clone().or_else(Config::default_path) else {
        eprintln!("Error: cannot locate config file: neither XDG_CONFIG_HOME nor HOME is set");
        eprintln!("Pass one explicitly with --config PATH.");
        std::process::exit(1);
    };

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = %config_path.display(), error = %e, "Failed to load configuration");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let client = match WallabagClient::new(&config.server) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let gateway: Arc<dyn Gateway> = Arc::new(client);

    let query = ListQuery {
        limit: config.ui.list_limit,
        ..ListQuery::default()
    };
    let items = match gateway.list_items(&query).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(error = %e, "Bulk list fetch failed");
            eprintln!("Error loading articles: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(count = items.len(), "Loaded articles");

    let mut app = App::new(
        ItemStore::from_items(items),
        gateway,
        Arc::new(HtmlRenderer),
        config.ui.content_width,
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_stderr_only_gets_errors_by_default() {
        assert_eq!(log_filter(None, false).max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_log_file_gets_info_by_default() {
        assert_eq!(log_filter(None, true).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_rust_log_overrides_default() {
        assert_eq!(
            log_filter(Some("debug"), false).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("wallabag_tui=trace"), true).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
