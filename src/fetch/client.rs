//! Fetch engine: pooled HTTP session with retry, backoff and site fallback
//!
//! The engine owns the connection pool for its lifetime. Every fetch:
//! - waits the configured politeness delay plus random jitter
//! - rotates the User-Agent header from the configured pool
//! - retries transient failures with exponential backoff
//! - after exhausting retries on the primary site, maps the URL onto the
//!   fallback mirror and runs the full retry policy once more
//!
//! A fetch always produces exactly one terminal [`FetchOutcome`]; failures
//! are reported as values, never panics.

use crate::config::{FetchConfig, SiteConfig};
use crate::fetch::retry::{backoff_delay, classify_error, classify_status, FailureKind};
use rand::Rng;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use url::Url;

/// Terminal status of a fetch
#[derive(Debug, Clone)]
pub enum FetchStatus {
    /// The request succeeded within the retry budget
    Success {
        /// Response body
        body: String,
        /// HTTP status code
        http_status: u16,
        /// URL that actually served the response (differs from the request
        /// URL when the fallback mirror answered)
        served_by: String,
    },

    /// All attempts, including any fallback attempts, failed
    Failed {
        /// Classification of the last failure
        kind: FailureKind,
    },
}

/// One terminal outcome per logical fetch request
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// The URL the caller asked for
    pub url: String,
    pub status: FetchStatus,
    /// Wall-clock time from first attempt to terminal outcome
    pub elapsed: Duration,
    /// Total attempts across primary and fallback
    pub attempts: u32,
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, FetchStatus::Success { .. })
    }

    /// Response body for successful outcomes
    pub fn body(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Success { body, .. } => Some(body),
            FetchStatus::Failed { .. } => None,
        }
    }

    /// Failure classification for failed outcomes
    pub fn failure(&self) -> Option<&FailureKind> {
        match &self.status {
            FetchStatus::Success { .. } => None,
            FetchStatus::Failed { kind } => Some(kind),
        }
    }

    /// Builds an outcome for a fetch abandoned before completion
    pub fn abandoned(url: String) -> Self {
        Self {
            url,
            status: FetchStatus::Failed {
                kind: FailureKind::Abandoned,
            },
            elapsed: Duration::ZERO,
            attempts: 0,
        }
    }
}

/// Pooled HTTP session shared by all fetches of a pipeline run
pub struct FetchEngine {
    client: Client,
    fetch: FetchConfig,
    sites: SiteConfig,
    ua_cursor: AtomicUsize,
}

impl FetchEngine {
    /// Creates the engine and its connection pool
    pub fn new(fetch: FetchConfig, sites: SiteConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(fetch.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            // The legacy mirror serves an incomplete certificate chain.
            .danger_accept_invalid_certs(true)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            fetch,
            sites,
            ua_cursor: AtomicUsize::new(0),
        })
    }

    /// Fetches a URL, absorbing transient failures into the retry loop and
    /// trying the fallback mirror after the primary exhausts its budget
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let started = Instant::now();

        let (result, attempts) = self.fetch_with_retries(url).await;
        match result {
            Ok((body, http_status)) => {
                let elapsed = started.elapsed();
                tracing::debug!("Fetched {} in {:?} ({} attempts)", url, elapsed, attempts);
                FetchOutcome {
                    url: url.to_string(),
                    status: FetchStatus::Success {
                        body,
                        http_status,
                        served_by: url.to_string(),
                    },
                    elapsed,
                    attempts,
                }
            }
            Err(kind) if kind.is_transient() => self.try_fallback(url, kind, attempts, started).await,
            Err(kind) => {
                tracing::warn!("Permanent failure for {}: {}", url, kind);
                FetchOutcome {
                    url: url.to_string(),
                    status: FetchStatus::Failed { kind },
                    elapsed: started.elapsed(),
                    attempts,
                }
            }
        }
    }

    /// Releases the connection pool
    pub fn close(self) {
        tracing::debug!("Fetch engine closed, connection pool released");
    }

    /// Runs the retry loop against the fallback mirror, if one applies
    async fn try_fallback(
        &self,
        url: &str,
        primary_kind: FailureKind,
        primary_attempts: u32,
        started: Instant,
    ) -> FetchOutcome {
        let Some(fallback) = self.fallback_url(url) else {
            tracing::warn!(
                "Exhausted {} attempts for {} ({}); no fallback mapping",
                primary_attempts,
                url,
                primary_kind
            );
            return FetchOutcome {
                url: url.to_string(),
                status: FetchStatus::Failed { kind: primary_kind },
                elapsed: started.elapsed(),
                attempts: primary_attempts,
            };
        };

        tracing::warn!(
            "Primary site exhausted {} attempts for {} ({}); trying fallback {}",
            primary_attempts,
            url,
            primary_kind,
            fallback
        );

        let (result, fallback_attempts) = self.fetch_with_retries(&fallback).await;
        let attempts = primary_attempts + fallback_attempts;
        match result {
            Ok((body, http_status)) => FetchOutcome {
                url: url.to_string(),
                status: FetchStatus::Success {
                    body,
                    http_status,
                    served_by: fallback,
                },
                elapsed: started.elapsed(),
                attempts,
            },
            Err(kind) => {
                tracing::warn!("Fallback {} also failed: {}", fallback, kind);
                FetchOutcome {
                    url: url.to_string(),
                    status: FetchStatus::Failed { kind },
                    elapsed: started.elapsed(),
                    attempts,
                }
            }
        }
    }

    /// Attempts a single URL up to `max_retries` times
    ///
    /// Returns the successful body and status, or the last failure, plus
    /// the number of attempts consumed. Attempt N+1 never starts before
    /// attempt N's backoff has elapsed.
    async fn fetch_with_retries(
        &self,
        url: &str,
    ) -> (std::result::Result<(String, u16), FailureKind>, u32) {
        let cap = Duration::from_secs(self.fetch.backoff_cap_secs);
        let mut attempt: u32 = 0;

        loop {
            self.politeness_wait().await;

            match self.attempt(url).await {
                Ok(success) => return (Ok(success), attempt + 1),
                Err(kind) => {
                    attempt += 1;
                    if !kind.is_transient() || attempt >= self.fetch.max_retries {
                        return (Err(kind), attempt);
                    }

                    let delay = backoff_delay(attempt - 1, cap);
                    tracing::warn!(
                        "Attempt {} failed for {} ({}); retrying in {:?}",
                        attempt,
                        url,
                        kind,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Sends one GET request and classifies the result
    async fn attempt(&self, url: &str) -> std::result::Result<(String, u16), FailureKind> {
        let request_url =
            Url::parse(url).map_err(|e| FailureKind::Malformed(format!("{}: {}", url, e)))?;

        let response = self
            .client
            .get(request_url)
            .header(USER_AGENT, self.next_user_agent())
            .send()
            .await
            .map_err(|e| classify_error(&e))?;

        let status = response.status();
        if let Some(kind) = classify_status(status) {
            return Err(kind);
        }

        let body = response
            .text()
            .await
            .map_err(|e| FailureKind::Body(e.to_string()))?;

        Ok((body, status.as_u16()))
    }

    /// Waits the configured base delay plus random jitter
    async fn politeness_wait(&self) {
        let jitter_ms = if self.fetch.jitter_ms > 0 {
            rand::rng().random_range(0..=self.fetch.jitter_ms)
        } else {
            0
        };

        let delay = Duration::from_millis(self.fetch.request_delay_ms + jitter_ms);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Rotates through the configured User-Agent pool
    fn next_user_agent(&self) -> &str {
        let index = self.ua_cursor.fetch_add(1, Ordering::Relaxed);
        &self.fetch.user_agents[index % self.fetch.user_agents.len()]
    }

    /// Maps a primary-site URL onto the fallback mirror
    ///
    /// Returns `None` when no fallback is configured or the URL does not
    /// belong to the primary site. The path is rewritten through the
    /// configured path-map table; unmapped paths carry over unchanged.
    fn fallback_url(&self, url: &str) -> Option<String> {
        let fallback_base = self.sites.fallback_base_url.trim_end_matches('/');
        if fallback_base.is_empty() {
            return None;
        }

        let primary_base = self.sites.primary_base_url.trim_end_matches('/');
        let path = url.strip_prefix(primary_base)?;

        let mapped = self
            .sites
            .path_map
            .iter()
            .find_map(|entry| {
                path.strip_prefix(&entry.primary)
                    .map(|tail| format!("{}{}", entry.fallback, tail))
            })
            .unwrap_or_else(|| path.to_string());

        Some(format!("{}{}", fallback_base, mapped))
    }
}
