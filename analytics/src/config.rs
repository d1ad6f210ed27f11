//! Risk threshold configuration.
//!
//! Every cutoff the scanner and classifier use lives here, constructed once
//! and passed in, instead of being re-declared per call site.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Named thresholds for risk scanning and classification.
///
/// `Default` carries the production values; tests and tenant overrides
/// construct their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Open tickets an agent can hold before counting as overloaded.
    /// The original dashboards disagreed between 12 and 15; 12 (the
    /// stricter value) is the single value used everywhere now.
    pub agent_overload_capacity: usize,

    /// Fraction of the SLA window remaining below which an unbreached
    /// ticket still counts as SLA risk.
    pub sla_warning_fraction: f64,

    /// Escalation-rule count cutoffs: count > high => HIGH,
    /// count > medium => MEDIUM.
    pub escalation_high_count: usize,
    pub escalation_medium_count: usize,

    /// SLA-rule count cutoffs.
    pub sla_high_count: usize,
    pub sla_medium_count: usize,

    /// Overload-rule cutoffs, counted in overloaded agents.
    pub overload_high_agents: usize,
    pub overload_medium_agents: usize,

    /// Period classifier: average SLA compliance floors (percent).
    pub sla_high_floor: Decimal,
    pub sla_medium_floor: Decimal,

    /// Period classifier: volume-change ceilings (percent).
    pub volume_high_pct: Decimal,
    pub volume_medium_pct: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            agent_overload_capacity: 12,
            sla_warning_fraction: 0.20,
            escalation_high_count: 8,
            escalation_medium_count: 5,
            sla_high_count: 10,
            sla_medium_count: 5,
            overload_high_agents: 2,
            overload_medium_agents: 0,
            sla_high_floor: Decimal::from(80),
            sla_medium_floor: Decimal::from(90),
            volume_high_pct: Decimal::from(25),
            volume_medium_pct: Decimal::from(15),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_cutoffs() {
        let t = RiskThresholds::default();
        assert_eq!(t.agent_overload_capacity, 12);
        assert_eq!(t.sla_warning_fraction, 0.20);
        assert_eq!(t.escalation_high_count, 8);
        assert_eq!(t.sla_high_floor, Decimal::from(80));
        assert_eq!(t.sla_medium_floor, Decimal::from(90));
        assert_eq!(t.volume_high_pct, Decimal::from(25));
        assert_eq!(t.volume_medium_pct, Decimal::from(15));
    }
}
