use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fin_dashboard::api::{DataClient, FinancialDataProvider, FixtureProvider};
use fin_dashboard::models::Config;
use fin_dashboard::ui;

/// Terminal dashboard for filtered, sortable financial records
#[derive(Parser)]
#[command(name = "fin-dashboard")]
#[command(version)]
#[command(about = "Browse income-statement records with date and amount filters")]
#[command(long_about = "
Fetches financial records from the /data endpoint of the configured backend and
shows them in a sortable table. Every filter change issues one new request.

Configuration is read from the environment (or a .env file):
  FIN_DASHBOARD_BASE_URL      backend base URL
  FIN_DASHBOARD_TIMEOUT_SECS  request timeout in seconds

Examples:
  fin-dashboard
  fin-dashboard --base-url http://localhost:8000
  fin-dashboard --fixture records.json
")]
struct Args {
    /// Backend base URL, overrides FIN_DASHBOARD_BASE_URL
    #[arg(long, short = 'u')]
    base_url: Option<String>,

    /// Request timeout in seconds, overrides FIN_DASHBOARD_TIMEOUT_SECS
    #[arg(long, short = 't')]
    timeout_secs: Option<u64>,

    /// Read records from a local JSON file instead of the backend
    #[arg(long, short = 'f')]
    fixture: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    // The TUI owns the terminal, so stay quiet on stderr unless asked
    let default_filter = if log_file.is_some() {
        "fin_dashboard=info"
    } else {
        "fin_dashboard=error"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Arc::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let provider: Arc<dyn FinancialDataProvider> = match &args.fixture {
        Some(path) => Arc::new(FixtureProvider::new(path)),
        None => {
            let config = match load_config(&args) {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to load configuration: {}", e);
                    eprintln!("❌ Configuration Error: {}", e);
                    std::process::exit(1);
                }
            };
            Arc::new(DataClient::new(&config)?)
        }
    };

    info!("Starting dashboard against {}", provider.source_name());

    if let Err(e) = ui::run_app(provider).await {
        eprintln!("❌ TUI Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
