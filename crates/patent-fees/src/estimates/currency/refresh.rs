use super::provider::RateProvider;
use super::{RateMetadata, RateTable, SharedRateTable};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// What a refresh attempt left in the shared table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshOutcome {
    pub metadata: RateMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RefreshOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Fetches provider rates and swaps them into the shared table.
///
/// Computations keep reading the previous snapshot while a fetch is in flight.
/// Concurrent refreshes are allowed; whichever finishes last wins.
pub struct RateRefresher<P> {
    provider: Arc<P>,
    table: SharedRateTable,
}

impl<P> Clone for RateRefresher<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            table: self.table.clone(),
        }
    }
}

impl<P> RateRefresher<P>
where
    P: RateProvider + 'static,
{
    pub fn new(provider: Arc<P>, table: SharedRateTable) -> Self {
        Self { provider, table }
    }

    pub fn table(&self) -> &SharedRateTable {
        &self.table
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let fetched = self.provider.fetch_latest().await;
        let fetched_at = Utc::now();

        let result = fetched.and_then(|quote| {
            let previous = self.table.snapshot();
            quote.into_rate_table(&previous, self.provider.source_label(), fetched_at)
        });

        match result {
            Ok(table) => {
                let metadata = table.metadata().clone();
                info!(
                    source = %metadata.source,
                    as_of = metadata.as_of.as_deref().unwrap_or("unknown"),
                    "exchange rates refreshed"
                );
                self.table.replace(table);
                RefreshOutcome {
                    metadata,
                    error: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "exchange rate refresh failed; reverting to fallback rates");
                let table = RateTable::fallback_at(Some(fetched_at));
                let metadata = table.metadata().clone();
                self.table.replace(table);
                RefreshOutcome {
                    metadata,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Refreshes on a fixed interval until the runtime shuts down.
    pub fn spawn_periodic(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let refresher = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                refresher.refresh().await;
            }
        })
    }
}
