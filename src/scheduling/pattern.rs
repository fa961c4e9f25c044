//! Pattern policy resolution.
//!
//! Each [`ShiftPattern`] resolves to a [`PatternPolicy`]: a shift length and
//! a [`WorkRule`] that decides which days are worked. Weekday templates are
//! indexed Sunday-first, matching [`weekday_index`](crate::calculation::weekday_index).

use rust_decimal::Decimal;

use crate::calculation::ShiftLength;
use crate::models::ShiftPattern;

const NO_DAYS: [bool; 7] = [false; 7];
const MON_TUE_WED: [bool; 7] = [false, true, true, true, false, false, false];
const MON_TO_FRI: [bool; 7] = [false, true, true, true, true, true, false];
const EVERY_DAY: [bool; 7] = [true; 7];
const SAT_SUN: [bool; 7] = [true, false, false, false, false, false, true];
const MON_WED_FRI: [bool; 7] = [false, true, false, true, false, true, false];

/// How a pattern decides which days are worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkRule {
    /// A weekly template of worked weekdays, Sunday first.
    Weekdays([bool; 7]),
    /// Every day of even weeks, no day of odd weeks. Overrides day-level
    /// logic, including the hour and consecutive caps.
    AlternatingWeeks,
}

/// The resolved rule set for one shift pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternPolicy {
    /// The pattern this policy was resolved from.
    pub pattern: ShiftPattern,
    /// Shift length.
    pub length: ShiftLength,
    /// Work-day rule.
    pub rule: WorkRule,
}

impl PatternPolicy {
    /// Resolves the policy for a pattern.
    ///
    /// `self_scheduled` and `prefer_weekend` only affect
    /// [`ShiftPattern::SelfScheduled`]: without opt-in it schedules nothing;
    /// with it, weekdays are open and weekends are added when preferred.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::models::ShiftPattern;
    /// use shift_engine::scheduling::PatternPolicy;
    ///
    /// let baylor = PatternPolicy::resolve(ShiftPattern::Baylor, false, false);
    /// assert!(baylor.is_work_day(0)); // Sunday
    /// assert!(!baylor.is_work_day(3)); // Wednesday
    /// ```
    pub fn resolve(pattern: ShiftPattern, self_scheduled: bool, prefer_weekend: bool) -> Self {
        let (length, rule) = match pattern {
            ShiftPattern::ThreeTwelves => (ShiftLength::Twelve, WorkRule::Weekdays(MON_TUE_WED)),
            ShiftPattern::FiveEights => (ShiftLength::Eight, WorkRule::Weekdays(MON_TO_FRI)),
            ShiftPattern::Baylor => (ShiftLength::Twelve, WorkRule::Weekdays(SAT_SUN)),
            ShiftPattern::SevenOnSevenOff => (ShiftLength::Twelve, WorkRule::AlternatingWeeks),
            ShiftPattern::SelfScheduled => {
                let days = match (self_scheduled, prefer_weekend) {
                    (false, _) => NO_DAYS,
                    (true, false) => MON_TO_FRI,
                    (true, true) => EVERY_DAY,
                };
                (ShiftLength::Twelve, WorkRule::Weekdays(days))
            }
            ShiftPattern::BlockScheduling => (ShiftLength::Twelve, WorkRule::Weekdays(MON_WED_FRI)),
        };

        Self {
            pattern,
            length,
            rule,
        }
    }

    /// Paid hours per shift.
    pub fn shift_hours(&self) -> Decimal {
        Decimal::from(self.length.hours())
    }

    /// Whether the day with this Sunday-first index is worked.
    ///
    /// Always true for week-level rules; use [`PatternPolicy::is_on_week`].
    pub fn is_work_day(&self, weekday: u32) -> bool {
        match self.rule {
            WorkRule::Weekdays(days) => days.get(weekday as usize).copied().unwrap_or(false),
            WorkRule::AlternatingWeeks => true,
        }
    }

    /// Whether the zero-based week is worked at all.
    pub fn is_on_week(&self, week_index: u32) -> bool {
        match self.rule {
            WorkRule::Weekdays(_) => true,
            WorkRule::AlternatingWeeks => week_index % 2 == 0,
        }
    }

    /// Whether this pattern fixes its own run lengths and ignores the
    /// weekly-hour and consecutive-shift caps.
    pub fn is_week_level(&self) -> bool {
        matches!(self.rule, WorkRule::AlternatingWeeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worked_days(policy: &PatternPolicy) -> Vec<u32> {
        (0..7).filter(|d| policy.is_work_day(*d)).collect()
    }

    #[test]
    fn test_three_twelves() {
        let policy = PatternPolicy::resolve(ShiftPattern::ThreeTwelves, false, false);
        assert_eq!(policy.shift_hours(), Decimal::new(12, 0));
        assert_eq!(worked_days(&policy), vec![1, 2, 3]);
    }

    #[test]
    fn test_five_eights_is_weekdays_only() {
        let policy = PatternPolicy::resolve(ShiftPattern::FiveEights, false, true);
        assert_eq!(policy.shift_hours(), Decimal::new(8, 0));
        assert_eq!(worked_days(&policy), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_baylor_is_weekend_only() {
        let policy = PatternPolicy::resolve(ShiftPattern::Baylor, false, false);
        assert_eq!(worked_days(&policy), vec![0, 6]);
    }

    #[test]
    fn test_block_scheduling_is_mon_wed_fri() {
        let policy = PatternPolicy::resolve(ShiftPattern::BlockScheduling, false, false);
        assert_eq!(worked_days(&policy), vec![1, 3, 5]);
    }

    #[test]
    fn test_seven_on_seven_off_alternates_weeks() {
        let policy = PatternPolicy::resolve(ShiftPattern::SevenOnSevenOff, false, false);
        assert!(policy.is_week_level());
        assert!(policy.is_on_week(0));
        assert!(!policy.is_on_week(1));
        assert!(policy.is_on_week(2));
        assert_eq!(worked_days(&policy).len(), 7);
    }

    #[test]
    fn test_self_scheduled_requires_opt_in() {
        let off = PatternPolicy::resolve(ShiftPattern::SelfScheduled, false, true);
        assert!(worked_days(&off).is_empty());

        let weekdays = PatternPolicy::resolve(ShiftPattern::SelfScheduled, true, false);
        assert_eq!(worked_days(&weekdays), vec![1, 2, 3, 4, 5]);

        let all = PatternPolicy::resolve(ShiftPattern::SelfScheduled, true, true);
        assert_eq!(worked_days(&all).len(), 7);
    }

    #[test]
    fn test_out_of_range_weekday_is_not_worked() {
        let policy = PatternPolicy::resolve(ShiftPattern::FiveEights, false, false);
        assert!(!policy.is_work_day(7));
    }

    #[test]
    fn test_day_level_patterns_are_on_every_week() {
        let policy = PatternPolicy::resolve(ShiftPattern::Baylor, false, false);
        assert!(!policy.is_week_level());
        assert!((0..10).all(|w| policy.is_on_week(w)));
    }
}
