//! Standalone mock backend, for running the agents against a long-lived
//! process instead of the driver's in-process instance.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apiduel::backend;
use apiduel::backend::store::MockStore;
use apiduel::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "apiduel=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = config::server_port();
    let store = Arc::new(MockStore::seeded()?);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    backend::serve(addr, store).await?;

    Ok(())
}
