use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wkhtmltopdf_api::{app, Config, Renderer, WkhtmltopdfRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wkhtmltopdf_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let renderer: Arc<dyn Renderer> = Arc::new(WkhtmltopdfRenderer::new(config.bin.clone()));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;

    info!("wkhtmltopdf API listening on http://{}", config.listen);

    axum::serve(listener, app(renderer)).await?;

    Ok(())
}
