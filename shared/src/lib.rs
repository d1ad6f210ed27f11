//! Shared domain types for the pulseboard analytics engine.
//!
//! Everything here is a plain serde-serializable record: the engine computes
//! over these, the UI and the narrative gateway consume them as JSON.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

// ==================== Ticket lifecycle ====================

/// Closed set of ticket lifecycle states.
///
/// Upstream systems report status as free text; [`TicketStatus::from_str`]
/// is the one place raw strings are normalized. Unrecognized strings are an
/// error, not an "other" bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Waiting,
    Escalated,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ticket status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for TicketStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open" | "new" => Ok(Self::Open),
            "in progress" | "in_progress" | "in-progress" => Ok(Self::InProgress),
            "waiting" | "pending" | "on hold" | "on_hold" | "on-hold" => Ok(Self::Waiting),
            "escalated" => Ok(Self::Escalated),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TicketStatus {
    /// True for every state outside the resolved/closed family.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Resolved | Self::Closed)
    }
}

/// Ticket priority. Upstream strings that match nothing fold to `Unknown`;
/// unlike statuses, the data model treats unknown priority as a real value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Urgent,
    High,
    Medium,
    Low,
    Unknown,
}

impl TicketPriority {
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "urgent" | "critical" => Self::Urgent,
            "high" => Self::High,
            "medium" | "normal" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unknown,
        }
    }
}

// ==================== Ticket ====================

/// An immutable support-ticket record as supplied by the ticket store.
///
/// `created_at` is the one field every metric depends on; it is optional
/// here so that malformed upstream records can be skipped and counted
/// instead of failing a whole aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub due_by: Option<DateTime<Utc>>,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: Option<String>,
    pub ticket_type: Option<String>,
    pub assignee: Option<String>,
    pub company: Option<String>,
}

impl Ticket {
    /// Last activity instant: `updated_at`, falling back to `created_at`
    /// for tickets never touched after creation.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn assignee_or_unassigned(&self) -> &str {
        self.assignee.as_deref().unwrap_or("Unassigned")
    }

    pub fn company_or_unknown(&self) -> &str {
        self.company.as_deref().unwrap_or("Unknown")
    }
}

// ==================== Risk ====================

/// Ordinal risk tier. `Ord` follows severity, so `max()` resolves ties
/// toward the severer tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// The four independent risk dimensions the scanner evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    Escalation,
    SlaBreach,
    AgentOverload,
    VolumeSpike,
}

/// One evaluated risk dimension: how many tickets qualify, how that count
/// moved, the tier it maps to, and the qualifying tickets themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMetric {
    pub kind: RiskKind,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_delta: Option<Decimal>,
    pub level: RiskLevel,
    pub insight: String,
    pub tickets: Vec<Ticket>,
}

// ==================== Time series ====================

/// One calendar-day or calendar-month slot in an aggregation series.
///
/// Buckets are created eagerly for every unit in the requested interval,
/// so the emitted series never has gaps. For month buckets the key is the
/// first day of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub date: NaiveDate,
    pub created: u32,
    pub resolved: u32,
    pub sla_met: u32,
    pub sla_applicable: u32,
}

impl TimeBucket {
    pub fn zeroed(date: NaiveDate) -> Self {
        Self {
            date,
            created: 0,
            resolved: 0,
            sla_met: 0,
            sla_applicable: 0,
        }
    }
}

// ==================== Trend signals ====================

/// Compact summary of one comparison window; the canonical hand-off object
/// to narrative generation. SLA fields are `None` when no ticket in the
/// window carried a due timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSignals {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub avg_volume: Decimal,
    pub volume_change_pct: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_sla_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_change_points: Option<Decimal>,
    pub risk_level: RiskLevel,
}

// ==================== Narrative ====================

/// Output of the external narrative gateway, stored and forwarded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeSummary {
    pub summary: String,
    pub root_cause: String,
    pub recommended_action: String,
    /// 0-100.
    pub confidence: u8,
}
