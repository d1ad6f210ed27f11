//! Facade tying the aggregation, metric, risk, and trend passes together.
//!
//! This is what a request handler calls: one ticket set in, one report
//! out. Every pass receives the caller's `now`, so identical inputs give
//! identical output.

use chrono::{DateTime, NaiveDate, Utc};
use pulseboard_shared::{Ticket, TrendSignals};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::{bucket_tickets, BucketSeries, BucketUnit};
use crate::config::RiskThresholds;
use crate::error::AnalyticsResult;
use crate::metrics::{
    aging_buckets, mean_resolution_time, sla_compliance, volume_metrics, AgingBuckets,
    ResolutionUnit, VolumeMetrics,
};
use crate::risk::{EscalationSource, RiskReport, RiskScanner};
use crate::trends::{preceding_range, trend_signals};

/// Everything a dashboard view needs for one window, in one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub series: BucketSeries,
    pub volume: VolumeMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_compliance_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_resolution_hours: Option<Decimal>,
    pub aging: AgingBuckets,
    pub risk: RiskReport,
}

pub struct AnalyticsEngine {
    thresholds: RiskThresholds,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(RiskThresholds::default())
    }
}

impl AnalyticsEngine {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Full dashboard computation for one already-fetched ticket set.
    pub fn dashboard(
        &self,
        tickets: &[Ticket],
        start: NaiveDate,
        end: NaiveDate,
        unit: BucketUnit,
        now: DateTime<Utc>,
        enrichment: &dyn EscalationSource,
    ) -> AnalyticsResult<DashboardReport> {
        let series = bucket_tickets(tickets, start, end, unit)?;

        let active: Vec<Ticket> = tickets.iter().filter(|t| t.is_active()).cloned().collect();
        let risk = RiskScanner::new(self.thresholds.clone()).scan(&active, now, enrichment);

        Ok(DashboardReport {
            series,
            volume: volume_metrics(tickets),
            sla_compliance_pct: sla_compliance(tickets),
            mean_resolution_hours: mean_resolution_time(tickets, ResolutionUnit::Hours),
            aging: aging_buckets(tickets, now),
            risk,
        })
    }

    /// Trend signals for `[start, end]` against the window of identical
    /// duration immediately before it. The caller fetches both ticket
    /// sets; the preceding range is available via
    /// [`preceding_range`](crate::trends::preceding_range).
    pub fn period_overview(
        &self,
        current_tickets: &[Ticket],
        previous_tickets: &[Ticket],
        start: NaiveDate,
        end: NaiveDate,
    ) -> AnalyticsResult<TrendSignals> {
        let (prev_start, prev_end) = preceding_range(start, end)?;
        let current = bucket_tickets(current_tickets, start, end, BucketUnit::Day)?;
        let previous = bucket_tickets(previous_tickets, prev_start, prev_end, BucketUnit::Day)?;
        Ok(trend_signals(
            &current.buckets,
            &previous.buckets,
            start,
            end,
            &self.thresholds,
        ))
    }
}
