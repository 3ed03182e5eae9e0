//! The KairosDB write client.

use async_trait::async_trait;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::IntCounter;
use serde::Deserialize;
use tracing::error;

use crate::config::KairosConfig;
use crate::error::{KairosError, KairosResult};
use crate::model::Sample;
use crate::translate::{translate, Metric};

const DATAPOINTS_PATH: &str = "/api/v1/datapoints";

const IGNORED_SAMPLES_NAME: &str = "prometheus_kairosdb_ignored_samples_total";
const IGNORED_SAMPLES_HELP: &str =
    "The total number of samples not sent to KairosDB due to unsupported float values (Inf, -Inf, NaN).";

/// A writer the upstream multiplexer can hand sample batches to.
#[async_trait]
pub trait SampleWriter {
    /// Send a batch of samples to the backing store.
    async fn write(&self, samples: &[Sample]) -> KairosResult<()>;

    /// A fixed identifier for per-backend reporting.
    fn name(&self) -> &'static str;
}

/// Response detail extracted from a KairosDB reply.
///
/// KairosDB reports per-metric problems as an `errors` array in the body,
/// which can accompany a 2xx status. A successful push is a 204 with an
/// empty body.
#[derive(Debug)]
struct PushResponse {
    status: u16,
    errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// HTTP client for the KairosDB write API.
///
/// `Client` is cheap to clone and safe to call from multiple tasks
/// concurrently; the only shared mutable state is the atomic
/// ignored-samples counter.
#[derive(Clone)]
pub struct Client {
    config: KairosConfig,
    http: reqwest::Client,
    ignored_samples: IntCounter,
}

impl Client {
    /// Create a new client for the given configuration.
    ///
    /// The configured timeout is installed on the HTTP transport; the
    /// adapter imposes no timeout of its own.
    pub fn new(config: KairosConfig) -> KairosResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| KairosError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        let ignored_samples = IntCounter::new(IGNORED_SAMPLES_NAME, IGNORED_SAMPLES_HELP)
            .map_err(|e| KairosError::Configuration {
                message: format!("Failed to create ignored-samples counter: {}", e),
            })?;

        Ok(Self {
            config,
            http,
            ignored_samples,
        })
    }

    /// Send a batch of samples to KairosDB.
    ///
    /// Translates the batch and performs a single push. Samples dropped for
    /// unsupported float values are added to the ignored-samples counter;
    /// samples dropped for lacking a metric name are logged during
    /// translation but not counted there, since the counter documents
    /// itself as covering float values only. Any response received from
    /// KairosDB has its status and each
    /// embedded error message logged, even on success; the API can return
    /// 2xx with per-metric errors in the body. Call-level failures are
    /// returned unchanged; no retry is performed here. Retry and backoff
    /// belong to the upstream delivery component.
    pub async fn write(&self, samples: &[Sample]) -> KairosResult<()> {
        let (metrics, skipped) = translate(samples);
        self.ignored_samples.inc_by(skipped.unsupported_values);

        let response = self.push(&metrics).await?;

        error!(status = response.status, "kairosdb response");
        for message in &response.errors {
            error!(err = %message, "kairosdb reported error");
        }

        if (200..300).contains(&response.status) {
            Ok(())
        } else {
            Err(KairosError::Server {
                status: response.status,
                message: response.errors.join("; "),
            })
        }
    }

    /// The fixed adapter identifier.
    pub fn name(&self) -> &'static str {
        "kairosdb"
    }

    /// POST the metric batch to the datapoints endpoint.
    async fn push(&self, metrics: &[Metric]) -> KairosResult<PushResponse> {
        let url = format!("{}{}", self.config.base_url(), DATAPOINTS_PATH);
        let body = serde_json::to_vec(metrics).map_err(|e| KairosError::Serialization {
            message: e.to_string(),
        })?;

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| KairosError::Network {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        // A 204 carries no body. Anything else may carry an errors array;
        // an unstructured body becomes a single error message.
        let errors = if body.is_empty() {
            Vec::new()
        } else {
            match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => parsed.errors,
                Err(_) => vec![body],
            }
        };

        Ok(PushResponse { status, errors })
    }
}

#[async_trait]
impl SampleWriter for Client {
    async fn write(&self, samples: &[Sample]) -> KairosResult<()> {
        Client::write(self, samples).await
    }

    fn name(&self) -> &'static str {
        Client::name(self)
    }
}

impl Collector for Client {
    fn desc(&self) -> Vec<&Desc> {
        self.ignored_samples.desc()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.ignored_samples.collect()
    }
}
