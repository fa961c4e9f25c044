//! Day-by-day schedule simulation.
//!
//! The simulator walks the requested span one calendar day at a time and
//! decides, for each day, whether a shift is worked. Day-level patterns are
//! subject to the weekly-hour cap, requested days off, the pattern template
//! and the consecutive-shift cap, in that order. Week-level patterns
//! ("7on-7off") work every day of their on weeks and skip off weeks whole.

use chrono::{Days, NaiveDate, NaiveDateTime, TimeDelta};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculation::{
    DayHalf, DutyFlags, ShiftLength, calculate_base_pay, price_at_base_pay, shift_title,
    weekday_index,
};
use crate::config::{EngineConfig, ShiftTimes};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DayDecision, DayOutcome, ScheduleResult, SchedulingCriteria, ShiftEvent, ShiftType,
};

use super::{PatternPolicy, RotationState};

/// Generates a schedule from criteria.
///
/// The criteria are validated first, so out-of-range values and unknown
/// unit types are reported as errors instead of producing an empty schedule.
///
/// # Example
///
/// ```no_run
/// use shift_engine::config::ConfigLoader;
/// use shift_engine::models::{SchedulingCriteria, ShiftPattern};
/// use shift_engine::scheduling::simulate;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let criteria = SchedulingCriteria::new(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     4,
///     ShiftPattern::Baylor,
///     "ICU",
/// );
/// let schedule = simulate(&criteria, loader.config()).unwrap();
/// assert_eq!(schedule.events.len(), 8);
/// ```
pub fn simulate(criteria: &SchedulingCriteria, config: &EngineConfig) -> EngineResult<ScheduleResult> {
    criteria.validate(config)?;

    let mut simulation = Simulation::new(criteria, config)?;
    for week_index in 0..criteria.total_weeks {
        simulation.run_week(week_index)?;
    }

    let result = ScheduleResult::from_parts(simulation.events, simulation.decisions);
    info!(
        pattern = %criteria.shift_pattern,
        weeks = criteria.total_weeks,
        shifts = result.summary.shift_count,
        total_hours = %result.total_hours,
        total_earnings = %result.total_earnings,
        "Schedule generated"
    );
    Ok(result)
}

/// Mutable state for a single run; dropped when the run ends.
struct Simulation<'a> {
    criteria: &'a SchedulingCriteria,
    config: &'a EngineConfig,
    policy: PatternPolicy,
    rotation: RotationState,
    /// Calendar days worked back to back, for the consecutive-shift cap.
    consecutive_days: u32,
    base_pay: Decimal,
    duties: DutyFlags,
    rng: Option<StdRng>,
    events: Vec<ShiftEvent>,
    decisions: Vec<DayDecision>,
}

impl<'a> Simulation<'a> {
    fn new(criteria: &'a SchedulingCriteria, config: &'a EngineConfig) -> EngineResult<Self> {
        // The last night shift ends the day after the final scheduled date.
        let span = u64::from(criteria.total_weeks) * 7 + 1;
        if criteria.start_date.checked_add_days(Days::new(span)).is_none() {
            return Err(EngineError::InvalidCriteria {
                field: "start_date".to_string(),
                message: "schedule runs past the last representable date".to_string(),
            });
        }

        let policy = PatternPolicy::resolve(
            criteria.shift_pattern,
            criteria.self_scheduled,
            criteria.prefer_weekend,
        );
        let rotation = RotationState::new(
            criteria.rotation_pattern,
            criteria.prefer_night,
            config.settings().rotation_run_length,
        );
        let band = config.unit(&criteria.unit_type)?;

        Ok(Self {
            criteria,
            config,
            policy,
            rotation,
            consecutive_days: 0,
            base_pay: calculate_base_pay(band, criteria.experience_years),
            duties: DutyFlags {
                charge_nurse: criteria.charge_nurse,
                preceptor_duty: criteria.preceptor_duty,
                has_certification: !criteria.certifications.is_empty(),
            },
            rng: criteria.title_seed.map(StdRng::seed_from_u64),
            events: Vec::with_capacity(criteria.total_weeks as usize * 7),
            decisions: Vec::with_capacity(criteria.total_weeks as usize * 7),
        })
    }

    fn run_week(&mut self, week_index: u32) -> EngineResult<()> {
        let shift_hours = self.policy.shift_hours();
        let mut weekly_hours = Decimal::ZERO;

        for day in 0..7 {
            let date = self.date_of(week_index, day)?;
            let outcome = if !self.policy.is_on_week(week_index) {
                DayOutcome::OffWeek
            } else if self.policy.is_week_level() {
                self.decide_week_level(date)
            } else {
                self.decide_day_level(date, weekly_hours + shift_hours)
            };

            if outcome == DayOutcome::Worked {
                let event = self.build_event(date)?;
                self.events.push(event);
                weekly_hours += shift_hours;
                self.consecutive_days += 1;
                if !self.policy.is_week_level() && self.rotation.record_worked() {
                    debug!(%date, now = ?self.rotation.current(), "Rotation flipped");
                }
            } else {
                if outcome == DayOutcome::ForcedRest {
                    debug!(
                        %date,
                        run = self.consecutive_days,
                        "Consecutive-shift cap reached, forcing rest day"
                    );
                }
                self.consecutive_days = 0;
                self.rotation.record_skipped();
            }

            self.decisions.push(DayDecision {
                date,
                week_index,
                outcome,
            });
        }

        Ok(())
    }

    fn decide_week_level(&self, date: NaiveDate) -> DayOutcome {
        if self.criteria.requested_days_off.contains(&date) {
            DayOutcome::RequestedOff
        } else {
            DayOutcome::Worked
        }
    }

    fn decide_day_level(&self, date: NaiveDate, hours_if_worked: Decimal) -> DayOutcome {
        if hours_if_worked > self.criteria.max_weekly_hours {
            DayOutcome::WeeklyHourCap
        } else if self.criteria.requested_days_off.contains(&date) {
            DayOutcome::RequestedOff
        } else if !self.policy.is_work_day(weekday_index(date)) {
            DayOutcome::PatternOff
        } else if self.consecutive_days >= self.criteria.max_consecutive_shifts {
            DayOutcome::ForcedRest
        } else {
            DayOutcome::Worked
        }
    }

    fn date_of(&self, week_index: u32, day: u32) -> EngineResult<NaiveDate> {
        let offset = u64::from(week_index) * 7 + u64::from(day);
        self.criteria
            .start_date
            .checked_add_days(Days::new(offset))
            .ok_or_else(|| EngineError::InvalidCriteria {
                field: "start_date".to_string(),
                message: "schedule runs past the last representable date".to_string(),
            })
    }

    fn build_event(&mut self, date: NaiveDate) -> EngineResult<ShiftEvent> {
        let shift_type = self.rotation.current();
        let length = self.policy.length;
        let half = if length == ShiftLength::Eight && shift_type == ShiftType::Day {
            DayHalf::choose(self.rng.as_mut())
        } else {
            DayHalf::Am
        };

        let (start, end) = shift_window(
            date,
            length,
            shift_type,
            half,
            &self.config.settings().shift_times,
        );
        let is_night = shift_type == ShiftType::Night;
        let hours = self.policy.shift_hours();
        let pricing =
            price_at_base_pay(self.base_pay, date, is_night, hours, self.duties, self.config)?;

        Ok(ShiftEvent {
            title: shift_title(length, shift_type, pricing.is_weekend, half).to_string(),
            shift_type,
            start,
            end,
            hours,
            base_pay: pricing.base_pay,
            hourly_rate: pricing.hourly_rate,
            differentials: pricing.differentials,
            earnings: pricing.earnings,
            is_holiday: pricing.is_holiday,
            holiday_name: pricing.holiday_name,
            is_weekend: pricing.is_weekend,
            is_night,
        })
    }
}

/// Start and end of a shift on `date`.
fn shift_window(
    date: NaiveDate,
    length: ShiftLength,
    shift_type: ShiftType,
    half: DayHalf,
    times: &ShiftTimes,
) -> (NaiveDateTime, NaiveDateTime) {
    let start_time = match (length, shift_type, half) {
        (ShiftLength::Twelve, ShiftType::Day, _) => times.day_12h,
        (ShiftLength::Twelve, ShiftType::Night, _) => times.night_12h,
        (ShiftLength::Eight, ShiftType::Day, DayHalf::Am) => times.day_8h_am,
        (ShiftLength::Eight, ShiftType::Day, DayHalf::Pm) => times.day_8h_pm,
        (ShiftLength::Eight, ShiftType::Night, _) => times.night_8h,
    };
    let start = date.and_time(start_time);
    let end = start + TimeDelta::hours(i64::from(length.hours()));
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DifferentialKind;
    use crate::config::fixtures::sample_config;
    use crate::models::{RotationPattern, ShiftPattern};
    use chrono::{Datelike, Weekday};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// 2026-03-01 is a Sunday.
    fn criteria(pattern: ShiftPattern, weeks: u32) -> SchedulingCriteria {
        SchedulingCriteria::new(date("2026-03-01"), weeks, pattern, "ICU")
    }

    fn longest_run(result: &ScheduleResult) -> u32 {
        let mut longest = 0;
        let mut run = 0;
        for d in &result.decisions {
            if d.outcome == DayOutcome::Worked {
                run += 1;
                longest = longest.max(run);
            } else {
                run = 0;
            }
        }
        longest
    }

    #[test]
    fn test_five_eights_two_weeks() {
        let c = SchedulingCriteria {
            max_weekly_hours: dec("40"),
            ..criteria(ShiftPattern::FiveEights, 2)
        };
        let result = simulate(&c, &sample_config()).unwrap();

        assert_eq!(result.events.len(), 10);
        for event in &result.events {
            assert_eq!(event.hours, dec("8"));
            assert!(!event.is_weekend);
            assert!(!matches!(event.date().weekday(), Weekday::Sat | Weekday::Sun));
        }
        assert_eq!(result.total_hours, dec("80"));
    }

    #[test]
    fn test_baylor_four_weeks() {
        let result = simulate(&criteria(ShiftPattern::Baylor, 4), &sample_config()).unwrap();

        assert_eq!(result.events.len(), 8);
        for event in &result.events {
            assert_eq!(event.hours, dec("12"));
            assert!(matches!(event.date().weekday(), Weekday::Sat | Weekday::Sun));
            assert!(event.has_differential(DifferentialKind::Weekend));
        }
    }

    #[test]
    fn test_seven_on_seven_off() {
        let c = SchedulingCriteria {
            max_weekly_hours: dec("40"),
            max_consecutive_shifts: 3,
            ..criteria(ShiftPattern::SevenOnSevenOff, 2)
        };
        let result = simulate(&c, &sample_config()).unwrap();

        assert_eq!(result.events_in_week(0).len(), 7);
        assert_eq!(result.events_in_week(1).len(), 0);
        assert_eq!(result.events.len(), 7);
        for (i, event) in result.events.iter().enumerate() {
            assert_eq!(event.date(), date("2026-03-01") + Days::new(i as u64));
        }
        assert!(
            result.decisions[7..]
                .iter()
                .all(|d| d.outcome == DayOutcome::OffWeek)
        );
    }

    #[test]
    fn test_seven_on_seven_off_does_not_rotate() {
        let c = SchedulingCriteria {
            rotation_pattern: RotationPattern::Rotating,
            prefer_night: true,
            ..criteria(ShiftPattern::SevenOnSevenOff, 3)
        };
        let result = simulate(&c, &sample_config()).unwrap();
        assert_eq!(result.events.len(), 14);
        assert!(result.events.iter().all(|e| e.is_night));
    }

    #[test]
    fn test_seven_on_seven_off_honours_requested_days_off() {
        let mut c = criteria(ShiftPattern::SevenOnSevenOff, 2);
        c.requested_days_off.insert(date("2026-03-04"));
        let result = simulate(&c, &sample_config()).unwrap();
        assert_eq!(result.events.len(), 6);
        assert!(result.events.iter().all(|e| e.date() != date("2026-03-04")));
    }

    #[test]
    fn test_weekly_hour_cap_limits_shifts() {
        // Five weekdays open, 12h shifts, 36h cap -> three per week.
        let c = SchedulingCriteria {
            self_scheduled: true,
            max_weekly_hours: dec("36"),
            ..criteria(ShiftPattern::SelfScheduled, 2)
        };
        let result = simulate(&c, &sample_config()).unwrap();
        assert_eq!(result.events.len(), 6);
        assert_eq!(result.events_in_week(0).len(), 3);
        assert!(
            result
                .decisions
                .iter()
                .any(|d| d.outcome == DayOutcome::WeeklyHourCap)
        );
    }

    #[test]
    fn test_self_scheduled_without_opt_in_is_empty() {
        let result =
            simulate(&criteria(ShiftPattern::SelfScheduled, 2), &sample_config()).unwrap();
        assert!(result.events.is_empty());
        assert_eq!(result.total_earnings, Decimal::ZERO);
        assert_eq!(result.decisions.len(), 14);
    }

    #[test]
    fn test_consecutive_cap_forces_rest_day() {
        // Every day open, 12h shifts, high weekly cap.
        let c = SchedulingCriteria {
            self_scheduled: true,
            prefer_weekend: true,
            max_weekly_hours: dec("84"),
            max_consecutive_shifts: 3,
            ..criteria(ShiftPattern::SelfScheduled, 2)
        };
        let result = simulate(&c, &sample_config()).unwrap();

        assert_eq!(longest_run(&result), 3);
        assert_eq!(result.decisions[3].outcome, DayOutcome::ForcedRest);
        // Work 3, rest 1, repeated over 14 days: 11 worked, 3 forced rests.
        assert_eq!(result.events.len(), 11);
        assert_eq!(result.summary.forced_rest_days, 3);
    }

    #[test]
    fn test_consecutive_cap_spans_week_boundary() {
        // Start on a Thursday: Thu..Sun then Mon.. all worked without a cap.
        let c = SchedulingCriteria {
            start_date: date("2026-03-05"),
            self_scheduled: true,
            prefer_weekend: true,
            max_weekly_hours: dec("84"),
            max_consecutive_shifts: 10,
            ..criteria(ShiftPattern::SelfScheduled, 2)
        };
        let result = simulate(&c, &sample_config()).unwrap();
        assert_eq!(longest_run(&result), 10);
        assert_eq!(result.decisions[10].outcome, DayOutcome::ForcedRest);
    }

    #[test]
    fn test_rotation_counter_is_independent_of_consecutive_cap() {
        // A rotating schedule with a cap of five still forces rest after
        // five days even though the rotation flips after three.
        let c = SchedulingCriteria {
            rotation_pattern: RotationPattern::Rotating,
            self_scheduled: true,
            prefer_weekend: true,
            max_weekly_hours: dec("84"),
            max_consecutive_shifts: 5,
            ..criteria(ShiftPattern::SelfScheduled, 1)
        };
        let result = simulate(&c, &sample_config()).unwrap();

        assert_eq!(longest_run(&result), 5);
        assert_eq!(result.decisions[5].outcome, DayOutcome::ForcedRest);
        let types: Vec<ShiftType> = result.events.iter().map(|e| e.shift_type).collect();
        assert_eq!(
            &types[..5],
            &[
                ShiftType::Day,
                ShiftType::Day,
                ShiftType::Day,
                ShiftType::Night,
                ShiftType::Night,
            ]
        );
    }

    #[test]
    fn test_requested_day_off_resets_streak() {
        // Five open weekdays from Monday; cap 3; Tuesday requested off.
        let mut c = SchedulingCriteria {
            self_scheduled: true,
            max_weekly_hours: dec("84"),
            max_consecutive_shifts: 3,
            ..criteria(ShiftPattern::SelfScheduled, 1)
        };
        c.requested_days_off.insert(date("2026-03-03"));
        let result = simulate(&c, &sample_config()).unwrap();

        let worked: Vec<NaiveDate> = result.events.iter().map(|e| e.date()).collect();
        // Mon, then Wed Thu Fri as a fresh run of three.
        assert_eq!(
            worked,
            vec![
                date("2026-03-02"),
                date("2026-03-04"),
                date("2026-03-05"),
                date("2026-03-06"),
            ]
        );
        assert_eq!(result.decisions[2].outcome, DayOutcome::RequestedOff);
        assert_eq!(result.summary.forced_rest_days, 0);
    }

    #[test]
    fn test_rotation_flips_after_three_worked_shifts() {
        let c = SchedulingCriteria {
            rotation_pattern: RotationPattern::Rotating,
            ..criteria(ShiftPattern::ThreeTwelves, 2)
        };
        let result = simulate(&c, &sample_config()).unwrap();
        // The flip after Wednesday carries over the pattern's days off.
        let types: Vec<ShiftType> = result.events.iter().map(|e| e.shift_type).collect();
        assert_eq!(
            types,
            vec![
                ShiftType::Day,
                ShiftType::Day,
                ShiftType::Day,
                ShiftType::Night,
                ShiftType::Night,
                ShiftType::Night,
            ]
        );
    }

    #[test]
    fn test_prefer_night_fixed_schedule_is_all_nights() {
        let c = SchedulingCriteria {
            prefer_night: true,
            ..criteria(ShiftPattern::BlockScheduling, 2)
        };
        let result = simulate(&c, &sample_config()).unwrap();
        assert_eq!(result.events.len(), 6);
        for event in &result.events {
            assert!(event.is_night);
            assert!(event.has_differential(DifferentialKind::Night));
            assert_eq!(event.start.time(), chrono::NaiveTime::from_hms_opt(19, 0, 0).unwrap());
            assert_eq!(event.end.date(), event.date().succ_opt().unwrap());
        }
    }

    #[test]
    fn test_events_never_overlap_when_rotating_eight_hour_shifts() {
        let c = SchedulingCriteria {
            rotation_pattern: RotationPattern::Rotating,
            max_weekly_hours: dec("40"),
            title_seed: Some(7),
            ..criteria(ShiftPattern::FiveEights, 6)
        };
        let result = simulate(&c, &sample_config()).unwrap();
        for pair in result.events.windows(2) {
            assert!(pair[1].start >= pair[0].end, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_title_seed_is_repeatable_and_pay_neutral() {
        let seeded = SchedulingCriteria {
            max_weekly_hours: dec("40"),
            title_seed: Some(2026),
            ..criteria(ShiftPattern::FiveEights, 4)
        };
        let config = sample_config();
        let a = simulate(&seeded, &config).unwrap();
        let b = simulate(&seeded, &config).unwrap();
        assert_eq!(a, b);

        let unseeded = SchedulingCriteria {
            title_seed: None,
            ..seeded
        };
        let c = simulate(&unseeded, &config).unwrap();
        assert!(c.events.iter().all(|e| e.title == "Day Shift AM (8h)"));
        assert_eq!(a.total_earnings, c.total_earnings);
    }

    #[test]
    fn test_invariants_hold_with_all_differentials() {
        let mut c = SchedulingCriteria {
            rotation_pattern: RotationPattern::Rotating,
            experience_years: dec("12.5"),
            charge_nurse: true,
            preceptor_duty: true,
            start_date: date("2026-12-20"),
            ..criteria(ShiftPattern::BlockScheduling, 3)
        };
        c.certifications.insert("CCRN".to_string());
        let result = simulate(&c, &sample_config()).unwrap();

        let hours: Decimal = result.events.iter().map(|e| e.hours).sum();
        let earnings: Decimal = result.events.iter().map(|e| e.earnings).sum();
        assert_eq!(result.total_hours, hours);
        assert_eq!(result.total_earnings, earnings);
        for event in &result.events {
            assert_eq!(event.earnings, event.hourly_rate * event.hours);
            assert!(event.has_differential(DifferentialKind::Charge));
            assert!(event.has_differential(DifferentialKind::Preceptor));
            assert!(event.has_differential(DifferentialKind::Certification));
        }
        // Friday 2026-12-25 is Christmas.
        let christmas = result
            .events
            .iter()
            .find(|e| e.date() == date("2026-12-25"))
            .unwrap();
        assert!(christmas.is_holiday);
        // Christmas and New Year's Day 2027 both fall on a Friday.
        assert_eq!(result.summary.holiday_shifts, 2);
    }

    #[test]
    fn test_base_pay_from_experience() {
        let c = SchedulingCriteria {
            experience_years: dec("20"),
            ..criteria(ShiftPattern::ThreeTwelves, 1)
        };
        let result = simulate(&c, &sample_config()).unwrap();
        assert!(result.events.iter().all(|e| e.base_pay == dec("52.00")));
        assert!(result.events.iter().all(|e| e.hourly_rate == dec("52.00")));
    }

    #[test]
    fn test_invalid_criteria_rejected_before_simulation() {
        let c = SchedulingCriteria {
            total_weeks: 0,
            ..criteria(ShiftPattern::ThreeTwelves, 1)
        };
        assert!(matches!(
            simulate(&c, &sample_config()),
            Err(EngineError::InvalidCriteria { .. })
        ));

        let c = SchedulingCriteria {
            unit_type: "Nowhere".to_string(),
            ..criteria(ShiftPattern::ThreeTwelves, 1)
        };
        assert!(matches!(
            simulate(&c, &sample_config()),
            Err(EngineError::UnitNotFound { .. })
        ));
    }

    #[test]
    fn test_one_decision_per_day_in_order() {
        let result = simulate(&criteria(ShiftPattern::ThreeTwelves, 3), &sample_config()).unwrap();
        assert_eq!(result.decisions.len(), 21);
        for (i, d) in result.decisions.iter().enumerate() {
            assert_eq!(d.date, date("2026-03-01") + Days::new(i as u64));
            assert_eq!(d.week_index, i as u32 / 7);
        }
    }

    #[test]
    fn test_shift_window_times() {
        let times = sample_config().settings().shift_times.clone();
        let d = date("2026-03-02");
        let (start, end) = shift_window(d, ShiftLength::Eight, ShiftType::Day, DayHalf::Pm, &times);
        assert_eq!(start.to_string(), "2026-03-02 15:00:00");
        assert_eq!(end.to_string(), "2026-03-02 23:00:00");

        let (start, end) =
            shift_window(d, ShiftLength::Eight, ShiftType::Night, DayHalf::Am, &times);
        assert_eq!(start.to_string(), "2026-03-02 23:00:00");
        assert_eq!(end.to_string(), "2026-03-03 07:00:00");
    }
}
