use anyhow::Context;

use clientes_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clientes_observability::init();

    let config = ApiConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "invalid configuration; refusing to start");
    })?;

    let app = clientes_api::app::build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, issuer = %config.jwt.issuer, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
