//! Differential stacking.
//!
//! Each configured [`DifferentialRule`] is triggered independently by one
//! attribute of the shift or the schedule. Triggered stackable rules all add
//! to the hourly rate; among triggered non-stackable rules only the highest
//! amount is paid.

use rust_decimal::Decimal;

use crate::config::{DifferentialKind, DifferentialRule, EngineConfig};
use crate::models::AppliedDifferential;

/// The shift and schedule attributes that trigger differentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifferentialTriggers {
    /// Night shift.
    pub is_night: bool,
    /// Starts on Saturday or Sunday.
    pub is_weekend: bool,
    /// Starts on a holiday.
    pub is_holiday: bool,
    /// Charge duty for the whole schedule.
    pub charge_nurse: bool,
    /// Preceptor duty for the whole schedule.
    pub preceptor_duty: bool,
    /// At least one certification held.
    pub has_certification: bool,
}

impl DifferentialTriggers {
    /// Whether the rule of this kind is triggered.
    pub fn triggers(&self, kind: DifferentialKind) -> bool {
        match kind {
            DifferentialKind::Night => self.is_night,
            DifferentialKind::Weekend => self.is_weekend,
            DifferentialKind::Holiday => self.is_holiday,
            DifferentialKind::Charge => self.charge_nurse,
            DifferentialKind::Preceptor => self.preceptor_duty,
            DifferentialKind::Certification => self.has_certification,
        }
    }
}

/// Selects the differentials paid for a shift, in configured display order.
///
/// # Example
///
/// ```no_run
/// use shift_engine::calculation::{apply_differentials, DifferentialTriggers};
/// use shift_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let triggers = DifferentialTriggers { is_night: true, is_weekend: true, ..Default::default() };
/// let paid = apply_differentials(&triggers, loader.config());
/// assert_eq!(paid.len(), 2);
/// ```
pub fn apply_differentials(
    triggers: &DifferentialTriggers,
    config: &EngineConfig,
) -> Vec<AppliedDifferential> {
    let triggered: Vec<&DifferentialRule> = config
        .differentials()
        .iter()
        .filter(|rule| triggers.triggers(rule.kind))
        .collect();

    // First rule wins ties.
    let mut best_exclusive: Option<&DifferentialRule> = None;
    for rule in triggered.iter().filter(|r| !r.stackable) {
        if best_exclusive.is_none_or(|best| rule.amount > best.amount) {
            best_exclusive = Some(rule);
        }
    }

    triggered
        .into_iter()
        .filter(|rule| {
            rule.stackable || best_exclusive.is_some_and(|best| best.kind == rule.kind)
        })
        .map(|rule| AppliedDifferential {
            kind: rule.kind,
            name: rule.name.clone(),
            amount: rule.amount,
        })
        .collect()
}

/// Sums the hourly amounts of paid differentials, or `None` on overflow.
pub fn differentials_total(differentials: &[AppliedDifferential]) -> Option<Decimal> {
    differentials
        .iter()
        .try_fold(Decimal::ZERO, |total, d| total.checked_add(d.amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::sample_config;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn kinds(paid: &[AppliedDifferential]) -> Vec<DifferentialKind> {
        paid.iter().map(|d| d.kind).collect()
    }

    #[test]
    fn test_no_triggers_pays_nothing() {
        let paid = apply_differentials(&DifferentialTriggers::default(), &sample_config());
        assert!(paid.is_empty());
        assert_eq!(differentials_total(&paid), Some(Decimal::ZERO));
    }

    #[test]
    fn test_all_triggers_stack_in_display_order() {
        let triggers = DifferentialTriggers {
            is_night: true,
            is_weekend: true,
            is_holiday: true,
            charge_nurse: true,
            preceptor_duty: true,
            has_certification: true,
        };
        let paid = apply_differentials(&triggers, &sample_config());
        assert_eq!(kinds(&paid), DifferentialKind::ALL.to_vec());
        // 5 + 3 + 10 + 4 + 2.50 + 1.50
        assert_eq!(differentials_total(&paid), Some(dec("26.00")));
    }

    #[test]
    fn test_night_only() {
        let triggers = DifferentialTriggers {
            is_night: true,
            ..Default::default()
        };
        let paid = apply_differentials(&triggers, &sample_config());
        assert_eq!(kinds(&paid), vec![DifferentialKind::Night]);
        assert_eq!(paid[0].amount, dec("5.00"));
        assert_eq!(paid[0].name, "Night");
    }

    #[test]
    fn test_only_highest_non_stackable_is_paid() {
        let mut config = sample_config();
        let mut rules = config.differentials().to_vec();
        for rule in rules.iter_mut() {
            if matches!(
                rule.kind,
                DifferentialKind::Weekend | DifferentialKind::Holiday
            ) {
                rule.stackable = false;
            }
        }
        config = crate::config::EngineConfig::new(
            config.metadata().clone(),
            config.settings().clone(),
            config.units().clone(),
            rules,
            config.holidays().clone(),
        );

        let triggers = DifferentialTriggers {
            is_night: true,
            is_weekend: true,
            is_holiday: true,
            ..Default::default()
        };
        let paid = apply_differentials(&triggers, &config);
        assert_eq!(
            kinds(&paid),
            vec![DifferentialKind::Night, DifferentialKind::Holiday]
        );
        assert_eq!(differentials_total(&paid), Some(dec("15.00")));
    }

    #[test]
    fn test_single_non_stackable_rule_is_still_paid() {
        let config = sample_config();
        let rules: Vec<DifferentialRule> = config
            .differentials()
            .iter()
            .cloned()
            .map(|mut r| {
                r.stackable = r.kind != DifferentialKind::Charge;
                r
            })
            .collect();
        let config = crate::config::EngineConfig::new(
            config.metadata().clone(),
            config.settings().clone(),
            config.units().clone(),
            rules,
            config.holidays().clone(),
        );

        let triggers = DifferentialTriggers {
            charge_nurse: true,
            has_certification: true,
            ..Default::default()
        };
        let paid = apply_differentials(&triggers, &config);
        assert_eq!(
            kinds(&paid),
            vec![DifferentialKind::Charge, DifferentialKind::Certification]
        );
    }
}
