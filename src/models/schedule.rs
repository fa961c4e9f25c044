//! Schedule result models.
//!
//! This module contains the [`ScheduleResult`] type and its associated
//! structures: the per-day decision trail and the aggregate summary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ShiftEvent;

/// What the simulator decided for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOutcome {
    /// A shift was scheduled.
    Worked,
    /// The shift pattern does not work this day.
    PatternOff,
    /// The date was requested off.
    RequestedOff,
    /// Another shift would exceed the weekly hour cap.
    WeeklyHourCap,
    /// The consecutive-shift cap forced a rest day.
    ForcedRest,
    /// An off week of an alternating-week pattern.
    OffWeek,
}

/// One entry in the schedule's decision trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDecision {
    /// The calendar day.
    pub date: NaiveDate,
    /// Zero-based week of the schedule the day falls in.
    pub week_index: u32,
    /// What happened.
    pub outcome: DayOutcome,
}

/// Aggregate counts over a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Number of shifts scheduled.
    pub shift_count: usize,
    /// Day shifts.
    pub day_shifts: usize,
    /// Night shifts.
    pub night_shifts: usize,
    /// Shifts starting on a weekend.
    pub weekend_shifts: usize,
    /// Shifts starting on a holiday.
    pub holiday_shifts: usize,
    /// Days the consecutive-shift cap turned into rest days.
    pub forced_rest_days: usize,
    /// Total earnings divided by total hours, rounded to cents; zero for an
    /// empty schedule.
    pub average_hourly_rate: Decimal,
}

/// The complete result of schedule generation.
///
/// Totals and summary are derived from the events when the result is built,
/// so `total_hours` and `total_earnings` always equal the sums over `events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Scheduled shifts in chronological order.
    pub events: Vec<ShiftEvent>,
    /// Sum of event earnings.
    pub total_earnings: Decimal,
    /// Sum of event hours.
    pub total_hours: Decimal,
    /// One decision per simulated day, in date order.
    pub decisions: Vec<DayDecision>,
    /// Aggregate counts.
    pub summary: ScheduleSummary,
}

impl ScheduleResult {
    /// Builds a result from its events and decisions, computing the totals.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::models::ScheduleResult;
    /// use rust_decimal::Decimal;
    ///
    /// let empty = ScheduleResult::from_parts(vec![], vec![]);
    /// assert_eq!(empty.total_hours, Decimal::ZERO);
    /// assert_eq!(empty.summary.average_hourly_rate, Decimal::ZERO);
    /// ```
    pub fn from_parts(events: Vec<ShiftEvent>, decisions: Vec<DayDecision>) -> Self {
        let total_hours: Decimal = events.iter().map(|e| e.hours).sum();
        let total_earnings: Decimal = events.iter().map(|e| e.earnings).sum();

        let average_hourly_rate = if total_hours.is_zero() {
            Decimal::ZERO
        } else {
            (total_earnings / total_hours).round_dp(2)
        };

        let night_shifts = events.iter().filter(|e| e.is_night).count();
        let summary = ScheduleSummary {
            shift_count: events.len(),
            day_shifts: events.len() - night_shifts,
            night_shifts,
            weekend_shifts: events.iter().filter(|e| e.is_weekend).count(),
            holiday_shifts: events.iter().filter(|e| e.is_holiday).count(),
            forced_rest_days: decisions
                .iter()
                .filter(|d| d.outcome == DayOutcome::ForcedRest)
                .count(),
            average_hourly_rate,
        };

        Self {
            events,
            total_earnings,
            total_hours,
            decisions,
            summary,
        }
    }

    /// Events starting within the given zero-based schedule week.
    pub fn events_in_week(&self, week_index: u32) -> Vec<&ShiftEvent> {
        let worked: Vec<NaiveDate> = self
            .decisions
            .iter()
            .filter(|d| d.week_index == week_index && d.outcome == DayOutcome::Worked)
            .map(|d| d.date)
            .collect();
        self.events
            .iter()
            .filter(|e| worked.contains(&e.date()))
            .collect()
    }
}
