use anyhow::Context;

use fashionista_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fashionista_observability::init();

    let config = ApiConfig::from_env()?;
    let model_config = config.load_model_config()?;

    let app = fashionista_api::app::build_app(&model_config).context("invalid demand model configuration")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
