use ferrous_doh_domain::{DnsQuery, Provider, QueryResult, ResultMap};
use futures::future::join_all;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::ports::DohClient;

/// Queries every provider for one (hostname, type) pair.
///
/// All requests are in flight at once and the batch completes only when
/// every provider has settled. A failing provider yields a failed
/// `QueryResult` and never affects its siblings.
pub struct RunQueryUseCase {
    client: Arc<dyn DohClient>,
    providers: Arc<[Provider]>,
}

impl RunQueryUseCase {
    pub fn new(client: Arc<dyn DohClient>, providers: Vec<Provider>) -> Self {
        Self {
            client,
            providers: providers.into(),
        }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    #[instrument(skip(self), fields(domain = %query.domain, record_type = %query.record_type))]
    pub async fn execute(&self, query: &DnsQuery) -> ResultMap {
        debug!(providers = self.providers.len(), "Fanning out to all providers");

        let lookups = self
            .providers
            .iter()
            .map(|provider| self.query_provider(provider, query));

        let results: ResultMap = join_all(lookups).await.into_iter().collect();

        debug!(
            succeeded = results.values().filter(|r| r.ok).count(),
            total = results.len(),
            "All providers settled"
        );

        results
    }

    async fn query_provider(&self, provider: &Provider, query: &DnsQuery) -> QueryResult {
        let start = Instant::now();
        let outcome = self.client.fetch(provider, query).await;
        let took = elapsed_ms(start);

        match outcome {
            Ok(json) => {
                debug!(provider = %provider.id, took_ms = took, "Provider answered");
                QueryResult::success(provider, took, json)
            }
            Err(e) => {
                warn!(provider = %provider.id, took_ms = took, error = %e, "Provider query failed");
                QueryResult::failure(provider, took, e.to_string())
            }
        }
    }
}

/// Whole milliseconds since `start`, rounded.
fn elapsed_ms(start: Instant) -> u64 {
    (start.elapsed().as_secs_f64() * 1000.0).round() as u64
}
