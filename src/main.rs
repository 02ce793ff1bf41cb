use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use alert_bridge::api::{run_server, AppState};
use alert_bridge::broker::dhan::DhanClient;
use alert_bridge::broker::traits::BrokerApi;
use alert_bridge::catalog::InstrumentCatalog;
use alert_bridge::config::AppConfig;
use alert_bridge::services::refresh::CatalogRefreshService;
use alert_bridge::services::resolver::InstrumentResolver;
use alert_bridge::services::translator::AlertTranslator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Setup Logging
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    dotenvy::dotenv().ok();

    info!("Starting Alert Bridge...");

    // Load Configuration
    let config = AppConfig::load();
    info!(
        "Loaded configuration: broker {} / catalog {}",
        config.dhan.base_url, config.catalog.source
    );

    // Populate the instrument catalog. A failed load is logged, not fatal:
    // symbol-based resolution misses until the next reload.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    let catalog = InstrumentCatalog::new();
    match catalog.load(&http, &config.catalog.source).await {
        Ok(rows) => info!("Instrument catalog loaded: {} instruments", rows),
        Err(e) => error!("Instrument catalog load failed, starting empty: {}", e),
    }

    // Optional scheduled reloads
    if let Some(cron) = &config.catalog.refresh_cron {
        let refresh = CatalogRefreshService::new(catalog.clone(), config.catalog.source.clone());
        if let Err(e) = refresh.start(cron).await {
            warn!("Failed to start catalog refresh job: {}", e);
        }
    }

    // Broker client and translation pipeline
    let broker: Arc<dyn BrokerApi> = Arc::new(DhanClient::new(&config.dhan));
    let translator = AlertTranslator::new(InstrumentResolver::new(catalog.clone(), broker.clone()));

    let state = Arc::new(AppState {
        catalog,
        broker,
        translator,
        http,
        config,
    });

    info!("Initializing API server...");
    run_server(state).await;

    Ok(())
}
