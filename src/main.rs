use std::sync::Arc;

use anyhow::Context;
use bank_api::{account::service::AccountService, config::Config, db, server::Server};
use clap::Parser;
use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// HTTP API for bank account records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Insert the demo account before serving.
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load config")?;

    let store = db::connect(&config)
        .await
        .context("Failed to connect to the database")?;
    store.init().await.context("Failed to create account table")?;

    let account_svc = Arc::new(AccountService::new(store, config.bcrypt_cost));

    if cli.seed {
        info!("seeding db");
        let account = account_svc
            .open_account("dan", "d", "hunter88888")
            .await
            .context("Failed to seed account")?;
        info!(number = account.number, "new account");
    }

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        let _ = shutdown_tx.send(());
    });

    Server::new(config.listen_addr.clone(), account_svc)
        .start(shutdown_rx)
        .await
}
