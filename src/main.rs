//! Application entry point.
//!
//! Reads one JSON deposit request per stdin line and writes one JSON credit
//! report per stdout line.

use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::io::BufReader;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use account_credits::app::{CreditService, process_requests};
use account_credits::config::{Config, LogFormat};
use account_credits::infra::{AllowListCurrencyExchange, UuidAccountFactory};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format);

    info!(
        currencies = ?config.allowed_currencies,
        "Starting account-credits"
    );

    let exchange = Arc::new(AllowListCurrencyExchange::from_config(&config));
    let factory = Arc::new(UuidAccountFactory::new());
    let service = CreditService::new(factory, exchange);

    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    let processed = tokio::select! {
        result = process_requests(&service, reader, writer) => {
            result.context("Failed to process deposit requests")?
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C");
            0
        }
    };

    info!(processed, "Shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
