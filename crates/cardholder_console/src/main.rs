//! Cardholder Console
//!
//! Terminal front-end for the customer/credit card REST API.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use cardholder_client::prelude::*;
use cardholder_console::prelude::*;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Manage customers and their credit cards from the terminal
#[derive(Parser, Debug)]
#[command(name = "cardholder")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format); cardholder.toml is used if present
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the REST API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Path to open at startup
    #[arg(long, default_value = "/")]
    start: String,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        CliArgs {
            config_file: args.config.clone(),
            api_url: args.api_url.clone(),
            log_level: args.log_level.clone(),
        }
    }
}

/// Log to the configured file; stdout belongs to the TUI
fn init_tracing(config: &ConsoleConfig) -> Result<(), ConsoleError> {
    let Some(path) = config.log_path() else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase())),
        )
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(|e| ConsoleError::logging(e.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&CliArgs::from(&args))?;

    init_tracing(&config)?;

    tracing::info!("Cardholder Console v{}", cardholder_console::VERSION);
    tracing::info!(
        api_url = %config.api_url,
        log_level = %config.log_level,
        request_timeout_secs = config.request_timeout_secs,
        start = %args.start,
        "Console configuration loaded"
    );

    let api = ApiClient::from_config(&config.client_config()).map_err(ConsoleError::from)?;
    let customers: Arc<dyn CustomerApi> = Arc::new(CustomerClient::new(api.clone()));
    let cards: Arc<dyn CreditCardApi> = Arc::new(CreditCardClient::new(api));

    let shell = Shell::new(customers, cards, Route::resolve(&args.start));
    let mut app = TuiApp::new(shell)?;
    app.run().await?;

    Ok(())
}
