//! Resilient fetch pipeline
//!
//! This module contains the networking core:
//! - The fetch engine: pooled session, politeness delay, User-Agent
//!   rotation, retry with exponential backoff, primary/fallback topology
//! - Failure classification (transient vs permanent) and backoff policy
//! - The dispatch coordinator: bounded-concurrency batch fetching with
//!   guaranteed one-outcome-per-target collection

mod client;
mod dispatch;
mod retry;

pub use client::{FetchEngine, FetchOutcome, FetchStatus};
pub use dispatch::{run_batch, BatchReport, Fetcher};
pub use retry::{backoff_delay, FailureKind};
