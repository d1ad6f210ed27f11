//! Ticket repository interface.
//!
//! Persistence lives entirely outside this crate; the engine only states
//! what it needs: ticket records for an organization and a date range.

use async_trait::async_trait;
use chrono::NaiveDate;
use pulseboard_shared::Ticket;
use uuid::Uuid;

use crate::error::AnalyticsResult;

/// Source of ticket records. Implemented over whatever storage the
/// surrounding system uses; failures surface as
/// [`AnalyticsError::Upstream`](crate::AnalyticsError::Upstream).
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Tickets created within the inclusive `[start, end]` range.
    async fn tickets_in_range(
        &self,
        org_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AnalyticsResult<Vec<Ticket>>;

    /// The current active (not resolved/closed) ticket set.
    async fn active_tickets(&self, org_id: Uuid) -> AnalyticsResult<Vec<Ticket>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;

    struct FlakyStore;

    #[async_trait]
    impl TicketStore for FlakyStore {
        async fn tickets_in_range(
            &self,
            _org_id: Uuid,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> AnalyticsResult<Vec<Ticket>> {
            Err(AnalyticsError::upstream("ticket-store", "connection reset"))
        }

        async fn active_tickets(&self, _org_id: Uuid) -> AnalyticsResult<Vec<Ticket>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn store_failures_surface_as_upstream_errors() {
        let store = FlakyStore;
        let err = store
            .tickets_in_range(
                Uuid::new_v4(),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Upstream { .. }));
    }
}
