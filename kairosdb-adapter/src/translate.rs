//! Translation from sample batches to the KairosDB submission format.
//!
//! Translation is pure: no I/O, no error return. Samples that cannot be
//! represented are skipped and counted, never propagated as errors. One
//! malformed value must not poison an otherwise-valid batch.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::model::Sample;

/// A single `(timestamp_ms, value)` pair, serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint(pub i64, pub f64);

/// One metric in the KairosDB submission payload.
///
/// Serializes as `{"name":…,"tags":{…},"datapoints":[[ms,value],…]}`, the
/// body format accepted by `POST /api/v1/datapoints`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub name: String,
    pub tags: BTreeMap<String, String>,
    pub datapoints: Vec<DataPoint>,
}

/// Per-reason counts of samples dropped during translation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkippedSamples {
    /// Samples whose value was NaN or ±infinity. KairosDB has no
    /// representation for these and a malformed payload would abort the
    /// whole batch.
    pub unsupported_values: u64,
    /// Samples carrying no identity label, which would otherwise produce
    /// a metric with an empty name.
    pub missing_name: u64,
}

/// Convert a sample batch into a KairosDB metric batch.
///
/// Returns the translated metrics in first-seen order plus per-reason
/// counts of samples skipped.
///
/// Samples identical in metric name and tag set accumulate their data
/// points into a single metric entry, in batch order. Samples that share a
/// name but differ in tags produce separate entries.
pub fn translate(samples: &[Sample]) -> (Vec<Metric>, SkippedSamples) {
    let mut metrics: Vec<Metric> = Vec::new();
    let mut skipped = SkippedSamples::default();

    for sample in samples {
        if !sample.value.is_finite() {
            debug!(value = sample.value, "skipping sample with unsupported float value");
            skipped.unsupported_values += 1;
            continue;
        }

        let name = match sample.metric_name() {
            Some(name) => name,
            None => {
                debug!("skipping sample without a metric name");
                skipped.missing_name += 1;
                continue;
            }
        };

        let tags = sample.tags();
        let point = DataPoint(sample.timestamp.as_millis(), sample.value);

        match metrics
            .iter_mut()
            .find(|m| m.name == name && m.tags == tags)
        {
            Some(metric) => metric.datapoints.push(point),
            None => metrics.push(Metric {
                name: name.to_string(),
                tags,
                datapoints: vec![point],
            }),
        }
    }

    (metrics, skipped)
}
