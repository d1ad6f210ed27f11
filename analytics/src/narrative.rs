//! Narrative gateway interface.
//!
//! An external text-generation service turns a finalized
//! [`TrendSignals`] object into prose. This crate only passes the signals
//! in and forwards the returned text unchanged — and a narrative failure
//! must never discard signals that were already computed.

use async_trait::async_trait;
use pulseboard_shared::{NarrativeSummary, TrendSignals};
use uuid::Uuid;

use crate::error::AnalyticsResult;

#[async_trait]
pub trait NarrativeGateway: Send + Sync {
    /// Produce a prose summary for one organization's signals.
    async fn summarize(
        &self,
        org_id: Uuid,
        signals: &TrendSignals,
    ) -> AnalyticsResult<NarrativeSummary>;
}

/// Signals plus the narrative, if the gateway produced one.
#[derive(Debug, Clone)]
pub struct NarratedSignals {
    pub signals: TrendSignals,
    pub narrative: Option<NarrativeSummary>,
}

/// Invoke the gateway, keeping the signals whether or not it succeeds.
/// Gateway failures are logged and reported as an absent narrative.
pub async fn narrate_signals(
    gateway: &dyn NarrativeGateway,
    org_id: Uuid,
    signals: TrendSignals,
) -> NarratedSignals {
    match gateway.summarize(org_id, &signals).await {
        Ok(narrative) => NarratedSignals {
            signals,
            narrative: Some(narrative),
        },
        Err(err) => {
            tracing::warn!(%org_id, error = %err, "narrative generation failed, returning signals only");
            NarratedSignals {
                signals,
                narrative: None,
            }
        }
    }
}
