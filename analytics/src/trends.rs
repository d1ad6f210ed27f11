//! Current-period vs preceding-period comparison.
//!
//! The preceding period is always the same duration immediately before the
//! current period's start, never a fixed calendar unit.

use chrono::{Duration, NaiveDate};
use pulseboard_shared::{TimeBucket, TrendSignals};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classifier::classify_period;
use crate::config::RiskThresholds;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Absolute and percent movement of one metric between two periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDelta {
    pub absolute: Decimal,
    pub percent: Decimal,
}

/// Percent change from `previous` to `current`. A zero previous value is
/// defined as a 0% change, never infinity or NaN.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    ((current - previous) / previous * Decimal::from(100)).round_dp(1)
}

/// Point-wise deltas between two equal-shaped series.
pub fn compare_series(
    current: &[Decimal],
    previous: &[Decimal],
) -> AnalyticsResult<Vec<TrendDelta>> {
    if current.len() != previous.len() {
        return Err(AnalyticsError::SeriesLengthMismatch {
            current: current.len(),
            previous: previous.len(),
        });
    }
    Ok(current
        .iter()
        .zip(previous)
        .map(|(&cur, &prev)| TrendDelta {
            absolute: cur - prev,
            percent: percent_change(cur, prev),
        })
        .collect())
}

/// The interval of identical duration ending the day before `start`.
pub fn preceding_range(
    start: NaiveDate,
    end: NaiveDate,
) -> AnalyticsResult<(NaiveDate, NaiveDate)> {
    if start > end {
        return Err(AnalyticsError::InvalidRange { start, end });
    }
    let span = end - start;
    let prev_end = start - Duration::days(1);
    Ok((prev_end - span, prev_end))
}

fn total_created(buckets: &[TimeBucket]) -> u64 {
    buckets.iter().map(|b| u64::from(b.created)).sum()
}

/// Weighted SLA compliance across a bucket series; `None` when no bucket
/// saw an SLA-bearing ticket.
fn series_sla_pct(buckets: &[TimeBucket]) -> Option<Decimal> {
    let applicable: u64 = buckets.iter().map(|b| u64::from(b.sla_applicable)).sum();
    if applicable == 0 {
        return None;
    }
    let met: u64 = buckets.iter().map(|b| u64::from(b.sla_met)).sum();
    Some(Decimal::from(met) / Decimal::from(applicable) * Decimal::from(100))
}

/// Collapse a current and preceding bucket series into the signals object
/// handed to narrative generation. Percentages are rounded here, at the
/// output boundary.
pub fn trend_signals(
    current: &[TimeBucket],
    previous: &[TimeBucket],
    period_start: NaiveDate,
    period_end: NaiveDate,
    thresholds: &RiskThresholds,
) -> TrendSignals {
    let avg_volume = if current.is_empty() {
        Decimal::ZERO
    } else {
        (Decimal::from(total_created(current)) / Decimal::from(current.len() as u64)).round_dp(1)
    };
    let volume_change_pct = percent_change(
        Decimal::from(total_created(current)),
        Decimal::from(total_created(previous)),
    );

    let current_sla = series_sla_pct(current);
    let previous_sla = series_sla_pct(previous);
    let sla_change_points = match (current_sla, previous_sla) {
        (Some(cur), Some(prev)) => Some((cur - prev).round_dp(1)),
        _ => None,
    };

    let risk_level = classify_period(current_sla, volume_change_pct, thresholds);

    TrendSignals {
        period_start,
        period_end,
        avg_volume,
        volume_change_pct,
        avg_sla_pct: current_sla.map(|pct| pct.round_dp(1)),
        sla_change_points,
        risk_level,
    }
}
