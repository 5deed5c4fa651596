//! Dispatch coordinator: bounded-concurrency batch fetching
//!
//! Fans a batch of URLs out through a fetcher while a semaphore bounds the
//! number of in-flight requests. Every target produces exactly one outcome,
//! in the slot matching its position in the input; completion order across
//! targets is not guaranteed. A single failure never aborts the batch.

use crate::fetch::client::{FetchEngine, FetchOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Seam between the dispatch coordinator and the fetch engine
///
/// The coordinator only needs `fetch`; scheduling behavior is tested
/// against mock implementations without touching the network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

#[async_trait]
impl Fetcher for FetchEngine {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        FetchEngine::fetch(self, url).await
    }
}

/// Result of a batch run: one outcome per target, association preserved
#[derive(Debug)]
pub struct BatchReport {
    /// Outcomes in the same order as the input targets
    pub outcomes: Vec<FetchOutcome>,
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    /// Iterates over successful outcomes only
    pub fn successes(&self) -> impl Iterator<Item = &FetchOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }
}

/// Fetches every target with at most `max_concurrency` requests in flight
///
/// With a batch timeout set, fetches still pending on expiry are abandoned
/// and reported as failures; completed outcomes are kept.
pub async fn run_batch<F>(
    fetcher: Arc<F>,
    targets: Vec<String>,
    max_concurrency: usize,
    batch_timeout: Option<Duration>,
) -> BatchReport
where
    F: Fetcher + 'static,
{
    let requested = targets.len();
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut join_set = JoinSet::new();

    for (index, url) in targets.iter().cloned().enumerate() {
        let fetcher = Arc::clone(&fetcher);
        let semaphore = Arc::clone(&semaphore);

        join_set.spawn(async move {
            // Closing the semaphore is never done here, so acquire only
            // fails if the runtime is shutting down.
            let _permit = semaphore.acquire_owned().await;
            let outcome = fetcher.fetch(&url).await;
            (index, outcome)
        });
    }

    let deadline = batch_timeout.map(|t| Instant::now() + t);
    let mut slots: Vec<Option<FetchOutcome>> = (0..requested).map(|_| None).collect();

    loop {
        let joined = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, join_set.join_next()).await {
                Ok(joined) => joined,
                Err(_) => {
                    tracing::warn!(
                        "Batch timeout expired with {} fetches pending; abandoning them",
                        join_set.len()
                    );
                    join_set.abort_all();
                    break;
                }
            },
            None => join_set.join_next().await,
        };

        match joined {
            Some(Ok((index, outcome))) => slots[index] = Some(outcome),
            Some(Err(join_error)) => {
                // Cancelled or panicked task; its slot is reported as
                // abandoned below.
                tracing::error!("Fetch task failed to join: {}", join_error);
            }
            None => break,
        }
    }

    let outcomes: Vec<FetchOutcome> = slots
        .into_iter()
        .zip(targets)
        .map(|(slot, url)| slot.unwrap_or_else(|| FetchOutcome::abandoned(url)))
        .collect();

    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    let failed = requested - succeeded;

    tracing::info!(
        "Batch complete: {} requested, {} succeeded, {} failed",
        requested,
        succeeded,
        failed
    );

    BatchReport {
        outcomes,
        requested,
        succeeded,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::client::FetchStatus;
    use crate::fetch::retry::FailureKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock fetcher that tracks how many fetches run concurrently
    struct GaugedFetcher {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        fail_urls: Vec<String>,
    }

    impl GaugedFetcher {
        fn new(fail_urls: Vec<String>) -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                fail_urls,
            }
        }
    }

    #[async_trait]
    impl Fetcher for GaugedFetcher {
        async fn fetch(&self, url: &str) -> FetchOutcome {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_urls.iter().any(|f| f == url) {
                FetchOutcome {
                    url: url.to_string(),
                    status: FetchStatus::Failed {
                        kind: FailureKind::Status(500),
                    },
                    elapsed: Duration::from_millis(20),
                    attempts: 1,
                }
            } else {
                FetchOutcome {
                    url: url.to_string(),
                    status: FetchStatus::Success {
                        body: format!("body of {}", url),
                        http_status: 200,
                        served_by: url.to_string(),
                    },
                    elapsed: Duration::from_millis(20),
                    attempts: 1,
                }
            }
        }
    }

    fn targets(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| format!("https://example.com/page{}", i))
            .collect()
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let fetcher = Arc::new(GaugedFetcher::new(vec![]));
        let report = run_batch(Arc::clone(&fetcher), targets(10), 3, None).await;

        assert_eq!(report.requested, 10);
        assert_eq!(report.succeeded, 10);
        assert!(
            fetcher.max_in_flight.load(Ordering::SeqCst) <= 3,
            "more than 3 fetches were in flight simultaneously"
        );
    }

    #[tokio::test]
    async fn test_all_targets_get_an_outcome() {
        let urls = targets(10);
        let fetcher = Arc::new(GaugedFetcher::new(vec![urls[2].clone(), urls[7].clone()]));
        let report = run_batch(fetcher, urls.clone(), 4, None).await;

        assert_eq!(report.outcomes.len(), 10);
        assert_eq!(report.succeeded, 8);
        assert_eq!(report.failed, 2);
        assert_eq!(report.successes().count(), 8);
        // Association between target and outcome survives unordered completion
        for (target, outcome) in urls.iter().zip(&report.outcomes) {
            assert_eq!(target, &outcome.url);
        }
        assert!(!report.outcomes[2].is_success());
        assert!(!report.outcomes[7].is_success());
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let urls = targets(4);
        let fetcher = Arc::new(GaugedFetcher::new(urls.clone()));
        let report = run_batch(fetcher, urls, 2, None).await;

        assert_eq!(report.requested, 4);
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 4);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let fetcher = Arc::new(GaugedFetcher::new(vec![]));
        let report = run_batch(fetcher, vec![], 3, None).await;

        assert_eq!(report.requested, 0);
        assert_eq!(report.outcomes.len(), 0);
    }

    /// Fetcher that never completes, for batch-timeout behavior
    struct StalledFetcher;

    #[async_trait]
    impl Fetcher for StalledFetcher {
        async fn fetch(&self, url: &str) -> FetchOutcome {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            FetchOutcome::abandoned(url.to_string())
        }
    }

    #[tokio::test]
    async fn test_batch_timeout_abandons_pending() {
        let fetcher = Arc::new(StalledFetcher);
        let report = run_batch(
            fetcher,
            targets(3),
            3,
            Some(Duration::from_millis(50)),
        )
        .await;

        assert_eq!(report.requested, 3);
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 3);
        for outcome in &report.outcomes {
            assert!(matches!(
                outcome.failure(),
                Some(FailureKind::Abandoned)
            ));
        }
    }
}
