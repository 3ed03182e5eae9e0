//! Sample and timestamp types consumed by the adapter.
//!
//! A [`Sample`] is one observation delivered by the upstream pipeline: a set
//! of labels (one of which names the series), a timestamp, and a float value.
//! Samples are immutable once built; the adapter never mutates them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The distinguished label whose value names the metric/series.
pub const METRIC_NAME_LABEL: &str = "__name__";

/// Label name/value pairs attached to a sample, identity label included.
pub type Labels = BTreeMap<String, String>;

/// A point in time with nanosecond resolution.
///
/// KairosDB timestamps are whole milliseconds; [`Timestamp::as_millis`]
/// truncates sub-millisecond precision rather than rounding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from nanoseconds since the Unix epoch.
    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Create a timestamp from milliseconds since the Unix epoch.
    ///
    /// Millisecond values beyond the representable nanosecond range
    /// (roughly year 2262) saturate instead of overflowing.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(1_000_000))
    }

    /// Nanoseconds since the Unix epoch.
    pub fn as_nanos(self) -> i64 {
        self.0
    }

    /// Whole milliseconds since the Unix epoch, truncating any
    /// sub-millisecond precision.
    pub fn as_millis(self) -> i64 {
        self.0 / 1_000_000
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        // DateTime values outside the representable nanosecond range do not
        // occur for wall-clock metric timestamps; fall back to milliseconds.
        match dt.timestamp_nanos_opt() {
            Some(nanos) => Self::from_nanos(nanos),
            None => Self::from_millis(dt.timestamp_millis()),
        }
    }
}

/// One observation produced by the upstream pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Label set, including the identity label.
    pub labels: Labels,
    /// When the observation was taken.
    pub timestamp: Timestamp,
    /// The observed value.
    pub value: f64,
}

impl Sample {
    /// Create a sample from its parts.
    pub fn new(labels: Labels, timestamp: Timestamp, value: f64) -> Self {
        Self {
            labels,
            timestamp,
            value,
        }
    }

    /// The value of the identity label, if present and non-empty.
    pub fn metric_name(&self) -> Option<&str> {
        self.labels
            .get(METRIC_NAME_LABEL)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// The sample's labels minus the identity label, with empty-valued
    /// entries dropped. KairosDB rejects tags with empty values.
    pub fn tags(&self) -> BTreeMap<String, String> {
        self.labels
            .iter()
            .filter(|(name, value)| name.as_str() != METRIC_NAME_LABEL && !value.is_empty())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_timestamp_millis_roundtrip() {
        let ts = Timestamp::from_millis(123456789123);
        assert_eq!(ts.as_millis(), 123456789123);
        assert_eq!(ts.as_nanos(), 123456789123 * 1_000_000);
    }

    #[test]
    fn test_timestamp_from_millis_saturates_instead_of_overflowing() {
        assert_eq!(
            Timestamp::from_millis(i64::MAX),
            Timestamp::from_nanos(i64::MAX)
        );
        assert_eq!(
            Timestamp::from_millis(i64::MIN),
            Timestamp::from_nanos(i64::MIN)
        );
    }

    #[test]
    fn test_timestamp_truncates_sub_millisecond() {
        // 1.9999 ms must truncate to 1 ms, not round to 2.
        let ts = Timestamp::from_nanos(1_999_900);
        assert_eq!(ts.as_millis(), 1);
    }

    #[test]
    fn test_metric_name_extraction() {
        let sample = Sample::new(
            labels(&[(METRIC_NAME_LABEL, "testmetric"), ("job", "node")]),
            Timestamp::from_millis(0),
            1.0,
        );
        assert_eq!(sample.metric_name(), Some("testmetric"));
    }

    #[test]
    fn test_metric_name_missing_or_empty() {
        let missing = Sample::new(labels(&[("job", "node")]), Timestamp::from_millis(0), 1.0);
        assert_eq!(missing.metric_name(), None);

        let empty = Sample::new(
            labels(&[(METRIC_NAME_LABEL, "")]),
            Timestamp::from_millis(0),
            1.0,
        );
        assert_eq!(empty.metric_name(), None);
    }

    #[test]
    fn test_tags_exclude_identity_label_and_empty_values() {
        let sample = Sample::new(
            labels(&[
                (METRIC_NAME_LABEL, "testmetric"),
                ("job", "node"),
                ("instance", ""),
            ]),
            Timestamp::from_millis(0),
            1.0,
        );

        let tags = sample.tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("job").map(String::as_str), Some("node"));
        assert!(!tags.contains_key(METRIC_NAME_LABEL));
        assert!(!tags.contains_key("instance"));
    }
}
