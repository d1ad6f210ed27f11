//! Scalar and per-category metric derivation over a ticket set.
//!
//! Percentages are carried as `Decimal` and rounded to one decimal place at
//! the output boundary only; internal accumulation stays unrounded.

use chrono::{DateTime, Duration, Utc};
use pulseboard_shared::Ticket;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const HOUR_SECS: i64 = 3_600;

/// Volume rollup for a ticket set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMetrics {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
    /// Counts keyed by category, falling back to ticket type, falling back
    /// to a literal "Unknown" bucket.
    pub by_category: HashMap<String, usize>,
}

pub fn volume_metrics(tickets: &[Ticket]) -> VolumeMetrics {
    let mut by_category: HashMap<String, usize> = HashMap::new();
    let mut open = 0;
    let mut resolved = 0;

    for ticket in tickets {
        if ticket.is_active() {
            open += 1;
        } else {
            resolved += 1;
        }
        let key = ticket
            .category
            .as_deref()
            .or(ticket.ticket_type.as_deref())
            .unwrap_or("Unknown");
        *by_category.entry(key.to_string()).or_insert(0) += 1;
    }

    VolumeMetrics {
        total: tickets.len(),
        open,
        resolved,
        by_category,
    }
}

/// SLA compliance percentage over the tickets that carry a due timestamp.
///
/// `None` means no ticket in the set has an SLA at all — callers must not
/// conflate that with 0% (all breached) or 100% (all met).
pub fn sla_compliance(tickets: &[Ticket]) -> Option<Decimal> {
    let mut applicable = 0u64;
    let mut met = 0u64;
    for ticket in tickets {
        let Some(due_by) = ticket.due_by else {
            continue;
        };
        applicable += 1;
        if ticket.last_activity().is_some_and(|t| t <= due_by) {
            met += 1;
        }
    }
    if applicable == 0 {
        return None;
    }
    Some(percent(met, applicable))
}

fn percent(part: u64, whole: u64) -> Decimal {
    (Decimal::from(part) / Decimal::from(whole) * Decimal::from(100)).round_dp(1)
}

/// Unit for resolution-time reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionUnit {
    Hours,
    Days,
}

/// Mean time from creation to last activity across resolved/closed
/// tickets, in whole hours or days. `None` when nothing is resolved.
pub fn mean_resolution_time(tickets: &[Ticket], unit: ResolutionUnit) -> Option<Decimal> {
    let mut total = 0i64;
    let mut count = 0u64;
    for ticket in tickets {
        if ticket.is_active() {
            continue;
        }
        let (Some(created), Some(finished)) = (ticket.created_at, ticket.last_activity()) else {
            continue;
        };
        let elapsed = finished - created;
        total += match unit {
            ResolutionUnit::Hours => elapsed.num_hours(),
            ResolutionUnit::Days => elapsed.num_days(),
        };
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some((Decimal::from(total) / Decimal::from(count)).round_dp(1))
}

/// Open tickets classified into fixed age bands by elapsed hours since
/// creation. Upper edges are inclusive: a ticket at exactly 24h belongs to
/// the first band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBuckets {
    /// [0, 24] hours.
    pub up_to_one_day: usize,
    /// (24, 72] hours.
    pub one_to_three_days: usize,
    /// (72, 168] hours.
    pub three_days_to_week: usize,
    /// (168, inf) hours.
    pub over_a_week: usize,
}

impl AgingBuckets {
    fn record(&mut self, elapsed: Duration) {
        let secs = elapsed.num_seconds();
        if secs <= 24 * HOUR_SECS {
            self.up_to_one_day += 1;
        } else if secs <= 72 * HOUR_SECS {
            self.one_to_three_days += 1;
        } else if secs <= 168 * HOUR_SECS {
            self.three_days_to_week += 1;
        } else {
            self.over_a_week += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.up_to_one_day + self.one_to_three_days + self.three_days_to_week + self.over_a_week
    }
}

pub fn aging_buckets(tickets: &[Ticket], now: DateTime<Utc>) -> AgingBuckets {
    let mut buckets = AgingBuckets::default();
    for ticket in tickets {
        if !ticket.is_active() {
            continue;
        }
        let Some(created) = ticket.created_at else {
            continue;
        };
        buckets.record(now - created);
    }
    buckets
}
