//! Error types for the analytics engine.
//!
//! Malformed parameters (a reversed range, mismatched series) are fatal to
//! the call that received them; malformed individual tickets never are —
//! they are skipped and counted by the aggregation passes.

use chrono::NaiveDate;
use pulseboard_shared::UnknownStatus;

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Start date after end date. Never silently swapped or clamped.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Trend comparison requires two equal-shaped series.
    #[error("series length mismatch: current has {current}, previous has {previous}")]
    SeriesLengthMismatch { current: usize, previous: usize },

    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),

    /// A collaborator (ticket store, narrative gateway) failed. Metrics
    /// already computed are still returned by the callers that can.
    #[error("upstream service '{service}' unavailable: {message}")]
    Upstream { service: String, message: String },
}

impl AnalyticsError {
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
