//! Time-window aggregation: tickets into gap-free calendar bucket series.

use chrono::{Datelike, Duration, NaiveDate};
use pulseboard_shared::{Ticket, TimeBucket};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Calendar unit a series is bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketUnit {
    Day,
    Month,
}

impl BucketUnit {
    /// The bucket key a given date falls into.
    fn key_for(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Month => first_of_month(date.year(), date.month()),
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Day 1 of a valid (year, month) always exists.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// An aggregated series plus the number of malformed records that were
/// skipped while building it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketSeries {
    pub unit: BucketUnit,
    pub buckets: Vec<TimeBucket>,
    pub skipped_records: usize,
}

/// Every bucket key in `[start, end]`, ascending, one per calendar unit.
fn bucket_keys(start: NaiveDate, end: NaiveDate, unit: BucketUnit) -> Vec<NaiveDate> {
    match unit {
        BucketUnit::Day => {
            let mut keys = Vec::new();
            let mut day = start;
            while day <= end {
                keys.push(day);
                day += Duration::days(1);
            }
            keys
        }
        BucketUnit::Month => {
            let mut keys = Vec::new();
            let (mut year, mut month) = (start.year(), start.month());
            let last = first_of_month(end.year(), end.month());
            loop {
                let key = first_of_month(year, month);
                keys.push(key);
                if key == last {
                    break;
                }
                if month == 12 {
                    year += 1;
                    month = 1;
                } else {
                    month += 1;
                }
            }
            keys
        }
    }
}

/// Bucket a ticket set over an inclusive `[start, end]` interval.
///
/// Every calendar unit in range gets a bucket, zeroed up front, so charts
/// always see a full series even for zero tickets. Creation dates in range
/// increment `created` (plus the SLA counters when a due timestamp is
/// present); resolution dates in range increment `resolved`. Dates outside
/// the interval are silently excluded. Tickets without a creation
/// timestamp are skipped and counted, never fatal.
pub fn bucket_tickets(
    tickets: &[Ticket],
    start: NaiveDate,
    end: NaiveDate,
    unit: BucketUnit,
) -> AnalyticsResult<BucketSeries> {
    if start > end {
        return Err(AnalyticsError::InvalidRange { start, end });
    }

    let keys = bucket_keys(start, end, unit);
    let index: HashMap<NaiveDate, usize> =
        keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
    let mut buckets: Vec<TimeBucket> = keys.into_iter().map(TimeBucket::zeroed).collect();

    let mut skipped = 0usize;
    for ticket in tickets {
        let Some(created_at) = ticket.created_at else {
            skipped += 1;
            continue;
        };

        let created_date = created_at.date_naive();
        if created_date >= start && created_date <= end {
            if let Some(&i) = index.get(&unit.key_for(created_date)) {
                buckets[i].created += 1;
                if let Some(due_by) = ticket.due_by {
                    buckets[i].sla_applicable += 1;
                    if ticket.last_activity().is_some_and(|t| t <= due_by) {
                        buckets[i].sla_met += 1;
                    }
                }
            }
        }

        if let Some(resolved_at) = ticket.resolved_at {
            let resolved_date = resolved_at.date_naive();
            if resolved_date >= start && resolved_date <= end {
                if let Some(&i) = index.get(&unit.key_for(resolved_date)) {
                    buckets[i].resolved += 1;
                }
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped tickets without a creation timestamp");
    }

    Ok(BucketSeries {
        unit,
        buckets,
        skipped_records: skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pulseboard_shared::{TicketPriority, TicketStatus};
    use uuid::Uuid;

    fn ticket_created(y: i32, m: u32, d: u32) -> Ticket {
        Ticket {
            id: Uuid::new_v4(),
            created_at: Some(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()),
            updated_at: None,
            resolved_at: None,
            due_by: None,
            status: TicketStatus::Open,
            priority: TicketPriority::Medium,
            category: None,
            ticket_type: None,
            assignee: None,
            company: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zero_tickets_still_yields_full_series() {
        let series =
            bucket_tickets(&[], date(2025, 1, 1), date(2025, 1, 10), BucketUnit::Day).unwrap();
        assert_eq!(series.buckets.len(), 10);
        assert!(series.buckets.iter().all(|b| b.created == 0));
        assert_eq!(series.buckets[0].date, date(2025, 1, 1));
        assert_eq!(series.buckets[9].date, date(2025, 1, 10));
    }

    #[test]
    fn reversed_range_is_an_error() {
        let err = bucket_tickets(&[], date(2025, 2, 10), date(2025, 2, 1), BucketUnit::Day)
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidRange { .. }));
    }

    #[test]
    fn created_counts_land_in_their_day() {
        let tickets = vec![
            ticket_created(2025, 1, 2),
            ticket_created(2025, 1, 2),
            ticket_created(2025, 1, 5),
        ];
        let series =
            bucket_tickets(&tickets, date(2025, 1, 1), date(2025, 1, 7), BucketUnit::Day).unwrap();
        assert_eq!(series.buckets[1].created, 2);
        assert_eq!(series.buckets[4].created, 1);
        assert_eq!(series.buckets.iter().map(|b| b.created).sum::<u32>(), 3);
    }

    #[test]
    fn out_of_range_tickets_are_silently_excluded() {
        let tickets = vec![ticket_created(2024, 12, 31), ticket_created(2025, 2, 1)];
        let series =
            bucket_tickets(&tickets, date(2025, 1, 1), date(2025, 1, 31), BucketUnit::Day).unwrap();
        assert_eq!(series.buckets.iter().map(|b| b.created).sum::<u32>(), 0);
        assert_eq!(series.skipped_records, 0);
    }

    #[test]
    fn missing_creation_timestamp_is_skipped_and_counted() {
        let mut bad = ticket_created(2025, 1, 3);
        bad.created_at = None;
        let tickets = vec![bad, ticket_created(2025, 1, 3)];
        let series =
            bucket_tickets(&tickets, date(2025, 1, 1), date(2025, 1, 5), BucketUnit::Day).unwrap();
        assert_eq!(series.skipped_records, 1);
        assert_eq!(series.buckets[2].created, 1);
    }

    #[test]
    fn month_series_spans_year_boundary_without_gaps() {
        let series = bucket_tickets(
            &[],
            date(2024, 11, 15),
            date(2025, 2, 3),
            BucketUnit::Month,
        )
        .unwrap();
        let keys: Vec<NaiveDate> = series.buckets.iter().map(|b| b.date).collect();
        assert_eq!(
            keys,
            vec![
                date(2024, 11, 1),
                date(2024, 12, 1),
                date(2025, 1, 1),
                date(2025, 2, 1),
            ]
        );
    }

    #[test]
    fn sla_counters_track_due_and_met() {
        let due = Utc.with_ymd_and_hms(2025, 1, 4, 0, 0, 0).unwrap();
        let mut met = ticket_created(2025, 1, 2);
        met.due_by = Some(due);
        met.updated_at = Some(Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap());

        let mut missed = ticket_created(2025, 1, 2);
        missed.due_by = Some(due);
        missed.updated_at = Some(Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap());

        let series = bucket_tickets(
            &[met, missed],
            date(2025, 1, 1),
            date(2025, 1, 7),
            BucketUnit::Day,
        )
        .unwrap();
        assert_eq!(series.buckets[1].sla_applicable, 2);
        assert_eq!(series.buckets[1].sla_met, 1);
    }

    #[test]
    fn resolved_counts_follow_resolution_date() {
        let mut t = ticket_created(2025, 1, 2);
        t.status = TicketStatus::Resolved;
        t.resolved_at = Some(Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap());
        let series =
            bucket_tickets(&[t], date(2025, 1, 1), date(2025, 1, 7), BucketUnit::Day).unwrap();
        assert_eq!(series.buckets[1].created, 1);
        assert_eq!(series.buckets[5].resolved, 1);
    }
}
