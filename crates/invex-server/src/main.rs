use std::path::PathBuf;

use anyhow::Context;
use invex_core::InvexConfig;
use invex_server::{AppState, app};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration from `INVEX_CONFIG`, with `INVEX_HOST` / `INVEX_PORT` overrides.
fn load_config() -> anyhow::Result<InvexConfig> {
    let mut config = match std::env::var_os("INVEX_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            InvexConfig::from_file(&path)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => InvexConfig::default(),
    };

    if let Ok(host) = std::env::var("INVEX_HOST") {
        config.server.host = host;
    }
    if let Ok(port) = std::env::var("INVEX_PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("invalid INVEX_PORT {port:?}"))?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invex_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    let address = config.server.bind_address();
    let state = AppState::from_config(config)?;

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;

    info!("invex listening on http://{}", address);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
