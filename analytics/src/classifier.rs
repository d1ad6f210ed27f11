//! Pure threshold-to-tier classification.
//!
//! No hidden state, no clock reads: every function here is a total mapping
//! from its arguments to a [`RiskLevel`].

use pulseboard_shared::RiskLevel;
use rust_decimal::Decimal;

use crate::config::RiskThresholds;

/// Map a rule's qualifying count onto a tier: `count > high` is HIGH,
/// `count > medium` is MEDIUM, anything else LOW.
pub fn classify_count(count: usize, high: usize, medium: usize) -> RiskLevel {
    if count > high {
        RiskLevel::High
    } else if count > medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Period-level classifier over average SLA compliance and volume change.
///
/// Conditions are ORed, and ties resolve to the severer tier: low SLA or a
/// volume surge alone is enough. An absent SLA average (no SLA-bearing
/// tickets in the window) leaves only the volume conditions in play.
pub fn classify_period(
    avg_sla_pct: Option<Decimal>,
    volume_change_pct: Decimal,
    thresholds: &RiskThresholds,
) -> RiskLevel {
    let sla_below = |floor: Decimal| avg_sla_pct.is_some_and(|sla| sla < floor);

    if sla_below(thresholds.sla_high_floor) || volume_change_pct > thresholds.volume_high_pct {
        RiskLevel::High
    } else if sla_below(thresholds.sla_medium_floor)
        || volume_change_pct > thresholds.volume_medium_pct
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> RiskThresholds {
        RiskThresholds::default()
    }

    #[test]
    fn count_classifier_boundaries() {
        assert_eq!(classify_count(9, 8, 5), RiskLevel::High);
        assert_eq!(classify_count(8, 8, 5), RiskLevel::Medium);
        assert_eq!(classify_count(6, 8, 5), RiskLevel::Medium);
        assert_eq!(classify_count(5, 8, 5), RiskLevel::Low);
        assert_eq!(classify_count(0, 8, 5), RiskLevel::Low);
    }

    #[test]
    fn healthy_period_is_low() {
        let level = classify_period(Some(Decimal::from(95)), Decimal::from(5), &thresholds());
        assert_eq!(level, RiskLevel::Low);
    }

    #[test]
    fn sla_alone_triggers_medium() {
        let level = classify_period(Some(Decimal::from(85)), Decimal::from(5), &thresholds());
        assert_eq!(level, RiskLevel::Medium);
    }

    #[test]
    fn sla_alone_triggers_high() {
        let level = classify_period(Some(Decimal::from(79)), Decimal::from(0), &thresholds());
        assert_eq!(level, RiskLevel::High);
    }

    #[test]
    fn volume_surge_alone_triggers_high() {
        let level = classify_period(Some(Decimal::from(99)), Decimal::from(100), &thresholds());
        assert_eq!(level, RiskLevel::High);
    }

    #[test]
    fn missing_sla_leaves_volume_conditions() {
        assert_eq!(
            classify_period(None, Decimal::from(20), &thresholds()),
            RiskLevel::Medium
        );
        assert_eq!(
            classify_period(None, Decimal::from(5), &thresholds()),
            RiskLevel::Low
        );
    }
}
