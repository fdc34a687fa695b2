use anyhow::Context;
use clap::Parser;
use stack_core::{Handler, MemoryStore};
use stack_server::{Config, PgStore, StoreKind};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::parse();
    // Fail on missing credentials before taking the port.
    let database = match config.store {
        StoreKind::Postgres => Some(config.database()?),
        StoreKind::Memory => None,
    };

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, store = ?config.store, "stack service ready");

    match database {
        Some(database) => stack_server::run(listener, Handler::new(PgStore::new(&database))).await,
        None => stack_server::run(listener, Handler::new(MemoryStore::new())).await,
    }
    Ok(())
}
