//! # KairosDB Remote-Write Adapter
//!
//! An adapter that forwards batches of time-series samples to
//! [KairosDB](https://kairosdb.github.io/) over its HTTP write API.
//!
//! The adapter does exactly two things:
//!
//! - **Translate**: convert a generic batch of timestamped, labeled float
//!   samples into KairosDB's metric submission format, filtering out values
//!   KairosDB cannot represent (NaN, ±infinity).
//! - **Write**: POST the translated batch to `/api/v1/datapoints`, surface
//!   any per-metric errors KairosDB reports, and expose a counter of
//!   samples dropped for unsupported float values.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kairosdb_adapter::{Client, KairosConfig, Sample, Timestamp, METRIC_NAME_LABEL};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(KairosConfig::new("http://kairosdb:8080"))?;
//!
//! let labels = [
//!     (METRIC_NAME_LABEL.to_string(), "http_requests_total".to_string()),
//!     ("job".to_string(), "api".to_string()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let samples = vec![Sample::new(labels, Timestamp::from_millis(1700000000000), 42.0)];
//! client.write(&samples).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Scope
//!
//! The adapter performs a single, synchronous push per [`Client::write`]
//! call. It does not decide when to flush, does not retry failed writes,
//! and keeps no state across calls other than the ignored-samples counter.
//! Retry, backoff, and batching belong to the upstream delivery component;
//! [`KairosError::is_retryable`] tells it which failures are worth another
//! attempt.
//!
//! ## Observability
//!
//! Events are emitted through [`tracing`]; with no subscriber installed
//! they are discarded, so no logging configuration is required. The
//! ignored-samples counter is exposed through the
//! [`prometheus::core::Collector`] impl on [`Client`], ready to be
//! registered with a scrape registry.

pub mod client;
pub mod config;
pub mod model;
pub mod translate;

mod error;

pub use client::{Client, SampleWriter};
pub use config::KairosConfig;
pub use error::{KairosError, KairosResult};
pub use model::{Labels, Sample, Timestamp, METRIC_NAME_LABEL};
pub use translate::{translate, DataPoint, Metric, SkippedSamples};
