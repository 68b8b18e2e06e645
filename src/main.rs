use anyhow::{Context, Result};
use hotel_offers::{web, AppConfig, HotelSearchService, RapidApiClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const ENV_FILE: &str = ".env";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hotel_offers=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load(ENV_FILE).context("loading configuration")?;
    config.validate().context("validating configuration")?;
    let config = Arc::new(config);

    let provider =
        RapidApiClient::new(config.provider.clone()).context("building provider client")?;
    let service = HotelSearchService::new(Arc::new(provider), config.clone());
    let app = web::router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(
        "Hotel search listening on {} (provider {}, {} concurrent fetches)",
        config.bind_addr, config.provider.base_url, config.max_concurrent_fetches
    );

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
