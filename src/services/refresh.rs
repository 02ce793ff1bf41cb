//! Scheduled background reload of the instrument catalog.
//!
//! Rebuilds the whole mapping from the configured source and swaps it in
//! atomically; in-flight requests keep their snapshot.

use std::time::Duration;

use reqwest::Client;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};

use crate::catalog::InstrumentCatalog;

pub struct CatalogRefreshService {
    catalog: InstrumentCatalog,
    source: String,
    client: Client,
}

impl CatalogRefreshService {
    pub fn new(catalog: InstrumentCatalog, source: String) -> Self {
        Self {
            catalog,
            source,
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("Failed to create HTTP client for catalog refresh"),
        }
    }

    /// Start the refresh cron job, e.g. `"0 0 8 * * *"` for a daily reload
    /// before market open.
    pub async fn start(&self, cron_expression: &str) -> Result<(), Box<dyn std::error::Error>> {
        let scheduler = JobScheduler::new().await?;

        let catalog = self.catalog.clone();
        let source = self.source.clone();
        let client = self.client.clone();

        let job = Job::new_async(cron_expression, move |_uuid, _l| {
            let catalog = catalog.clone();
            let source = source.clone();
            let client = client.clone();

            Box::pin(async move {
                match catalog.load(&client, &source).await {
                    Ok(rows) => info!("catalog refreshed: {} instruments", rows),
                    Err(e) => warn!("catalog refresh failed, keeping previous snapshot: {}", e),
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        info!(
            "catalog refresh job started with schedule {} for {}",
            cron_expression, self.source
        );
        Ok(())
    }
}
