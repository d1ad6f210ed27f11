//! Risk scanning over the current active-ticket set.
//!
//! Four independent rules: escalation, SLA breach, agent overload, volume
//! spike. A ticket may qualify under several rules and appears in each
//! rule's own list. The caller injects `now`; nothing here reads a clock.

use chrono::{DateTime, Duration, Utc};
use pulseboard_shared::{RiskKind, RiskLevel, RiskMetric, Ticket, TicketStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::classifier::{classify_count, classify_period};
use crate::config::RiskThresholds;

/// Optional enrichment: an external per-ticket escalation classification
/// keyed by ticket id. Absence is normal — the escalation rule degrades to
/// status-only matching.
pub trait EscalationSource {
    fn risk_for(&self, ticket_id: Uuid) -> Option<RiskLevel>;
}

/// The no-enrichment case.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl EscalationSource for NoEnrichment {
    fn risk_for(&self, _ticket_id: Uuid) -> Option<RiskLevel> {
        None
    }
}

impl EscalationSource for HashMap<Uuid, RiskLevel> {
    fn risk_for(&self, ticket_id: Uuid) -> Option<RiskLevel> {
        self.get(&ticket_id).copied()
    }
}

/// Result of one scan: all four rules, evaluated independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub escalation: RiskMetric,
    pub sla: RiskMetric,
    pub overload: RiskMetric,
    pub volume: RiskMetric,
}

impl RiskReport {
    /// Severest tier across the four rules.
    pub fn overall_level(&self) -> RiskLevel {
        self.escalation
            .level
            .max(self.sla.level)
            .max(self.overload.level)
            .max(self.volume.level)
    }
}

pub struct RiskScanner {
    thresholds: RiskThresholds,
}

impl RiskScanner {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluate all four rules against the active ticket set at `now`.
    pub fn scan(
        &self,
        active: &[Ticket],
        now: DateTime<Utc>,
        enrichment: &dyn EscalationSource,
    ) -> RiskReport {
        let report = RiskReport {
            escalation: self.escalation_rule(active, enrichment),
            sla: self.sla_rule(active, now),
            overload: self.overload_rule(active),
            volume: self.volume_rule(active, now),
        };
        tracing::debug!(
            escalation = report.escalation.count,
            sla = report.sla.count,
            overload = report.overload.count,
            volume = report.volume.count,
            "risk scan complete"
        );
        report
    }

    fn escalation_rule(&self, active: &[Ticket], enrichment: &dyn EscalationSource) -> RiskMetric {
        let tickets: Vec<Ticket> = active
            .iter()
            .filter(|t| {
                t.status == TicketStatus::Escalated
                    || enrichment.risk_for(t.id) == Some(RiskLevel::High)
            })
            .cloned()
            .collect();
        let count = tickets.len();
        RiskMetric {
            kind: RiskKind::Escalation,
            count,
            trend_delta: None,
            level: classify_count(
                count,
                self.thresholds.escalation_high_count,
                self.thresholds.escalation_medium_count,
            ),
            insight: format!("{count} tickets escalated or flagged as likely to escalate"),
            tickets,
        }
    }

    fn sla_rule(&self, active: &[Ticket], now: DateTime<Utc>) -> RiskMetric {
        let tickets: Vec<Ticket> = active
            .iter()
            .filter(|t| self.sla_at_risk(t, now))
            .cloned()
            .collect();
        let count = tickets.len();
        RiskMetric {
            kind: RiskKind::SlaBreach,
            count,
            trend_delta: None,
            level: classify_count(
                count,
                self.thresholds.sla_high_count,
                self.thresholds.sla_medium_count,
            ),
            insight: format!("{count} tickets breached or close to breaching their SLA"),
            tickets,
        }
    }

    /// A ticket is SLA risk when its due timestamp has passed, or when less
    /// than `sla_warning_fraction` of the SLA window remains. No due
    /// timestamp means the rule never applies.
    fn sla_at_risk(&self, ticket: &Ticket, now: DateTime<Utc>) -> bool {
        let Some(due_by) = ticket.due_by else {
            return false;
        };
        if due_by <= now {
            return true;
        }
        let Some(created) = ticket.created_at else {
            // Future due date but no creation timestamp: the window
            // fraction is undefined, so only the breach check applies.
            return false;
        };
        let window = (due_by - created).num_seconds();
        if window <= 0 {
            return true;
        }
        let remaining = (due_by - now).num_seconds() as f64 / window as f64;
        remaining < self.thresholds.sla_warning_fraction
    }

    fn overload_rule(&self, active: &[Ticket]) -> RiskMetric {
        let mut per_agent: HashMap<&str, usize> = HashMap::new();
        for ticket in active {
            *per_agent.entry(ticket.assignee_or_unassigned()).or_insert(0) += 1;
        }
        let overloaded: Vec<&str> = per_agent
            .iter()
            .filter(|&(_, &n)| n > self.thresholds.agent_overload_capacity)
            .map(|(agent, _)| *agent)
            .collect();

        let tickets: Vec<Ticket> = active
            .iter()
            .filter(|t| overloaded.contains(&t.assignee_or_unassigned()))
            .cloned()
            .collect();
        let count = tickets.len();
        RiskMetric {
            kind: RiskKind::AgentOverload,
            count,
            trend_delta: None,
            level: classify_count(
                overloaded.len(),
                self.thresholds.overload_high_agents,
                self.thresholds.overload_medium_agents,
            ),
            insight: format!(
                "{} agents over capacity, holding {count} open tickets",
                overloaded.len()
            ),
            tickets,
        }
    }

    fn volume_rule(&self, active: &[Ticket], now: DateTime<Utc>) -> RiskMetric {
        let day_ago = now - Duration::hours(24);
        let two_days_ago = now - Duration::hours(48);

        let created_within = |from: DateTime<Utc>, to: DateTime<Utc>| {
            active
                .iter()
                .filter(|t| t.created_at.is_some_and(|c| c > from && c <= to))
                .count()
        };
        let last24 = created_within(day_ago, now);
        let prev24 = created_within(two_days_ago, day_ago);

        // Zero-valued previous window is a 0% change, not a division error.
        let change_pct = if prev24 == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(last24 as i64 - prev24 as i64) / Decimal::from(prev24)
                * Decimal::from(100))
            .round_dp(1)
        };

        let tickets: Vec<Ticket> = active
            .iter()
            .filter(|t| t.created_at.is_some_and(|c| c > day_ago && c <= now))
            .cloned()
            .collect();
        RiskMetric {
            kind: RiskKind::VolumeSpike,
            count: last24,
            trend_delta: Some(change_pct),
            level: classify_period(None, change_pct, &self.thresholds),
            insight: format!(
                "{last24} tickets in the last 24h vs {prev24} the day before ({change_pct}% change)"
            ),
            tickets,
        }
    }
}
