//! Incremental constraint checks for placing a single shift.
//!
//! Bulk generation enforces its own caps; these checks are for ad-hoc edits,
//! where a candidate shift is tested against shifts already on the calendar.
//! Each check is independent of the order of `existing`.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ShiftWindow;

/// Limits a candidate shift is checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintRules {
    /// Minimum hours between the end of one shift and the start of the next.
    pub min_rest_hours: Decimal,
    /// Longest allowed run of consecutive calendar days with a shift.
    pub max_consecutive_shifts: u32,
    /// Longest allowed run of consecutive nights.
    pub max_consecutive_nights: u32,
}

/// Why a candidate shift was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintViolation {
    /// Too little rest between the candidate and an existing shift.
    #[error("only {gap_hours}h rest next to the shift starting {existing_start}")]
    InsufficientRest {
        /// Start of the neighbouring shift.
        existing_start: NaiveDateTime,
        /// Hours between the two shifts.
        gap_hours: Decimal,
    },

    /// The candidate overlaps an existing shift.
    #[error("overlaps the shift starting {existing_start}")]
    Overlap {
        /// Start of the overlapping shift.
        existing_start: NaiveDateTime,
    },

    /// The candidate extends a run of consecutive days past the limit.
    #[error("{run} consecutive shifts exceeds the limit of {max}")]
    ConsecutiveShifts {
        /// Run length including the candidate.
        run: u32,
        /// Configured limit.
        max: u32,
    },

    /// The candidate extends a run of consecutive nights past the limit.
    #[error("{run} consecutive nights exceeds the limit of {max}")]
    ConsecutiveNights {
        /// Run length including the candidate.
        run: u32,
        /// Configured limit.
        max: u32,
    },
}

/// Checks a candidate shift, returning the first violation found.
///
/// Rest and overlap are checked first, then the consecutive-day run, then
/// the consecutive-night run.
pub fn check_shift(
    candidate: &ShiftWindow,
    existing: &[ShiftWindow],
    rules: &ConstraintRules,
) -> Result<(), ConstraintViolation> {
    match violations(candidate, existing, rules).into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Every violation the candidate shift would cause.
pub fn violations(
    candidate: &ShiftWindow,
    existing: &[ShiftWindow],
    rules: &ConstraintRules,
) -> Vec<ConstraintViolation> {
    let mut out: Vec<ConstraintViolation> = existing
        .iter()
        .filter_map(|other| rest_violation(candidate, other, rules.min_rest_hours))
        .collect();

    let worked: BTreeSet<NaiveDate> = existing.iter().map(ShiftWindow::date).collect();
    let run = run_through(candidate.date(), &worked);
    if run > rules.max_consecutive_shifts {
        out.push(ConstraintViolation::ConsecutiveShifts {
            run,
            max: rules.max_consecutive_shifts,
        });
    }

    if candidate.is_night {
        let nights: BTreeSet<NaiveDate> = existing
            .iter()
            .filter(|s| s.is_night)
            .map(ShiftWindow::date)
            .collect();
        let run = run_through(candidate.date(), &nights);
        if run > rules.max_consecutive_nights {
            out.push(ConstraintViolation::ConsecutiveNights {
                run,
                max: rules.max_consecutive_nights,
            });
        }
    }

    out
}

/// Whether the candidate shift passes every check.
///
/// # Example
///
/// ```
/// use shift_engine::models::ShiftWindow;
/// use shift_engine::validation::{meets_constraints, ConstraintRules};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let rules = ConstraintRules {
///     min_rest_hours: Decimal::new(10, 0),
///     max_consecutive_shifts: 5,
///     max_consecutive_nights: 3,
/// };
/// let prior = ShiftWindow { start: at("2026-03-02 07:00"), end: at("2026-03-02 19:00"), is_night: false };
/// let too_soon = ShiftWindow { start: at("2026-03-03 01:00"), end: at("2026-03-03 09:00"), is_night: false };
/// let next_day = ShiftWindow { start: at("2026-03-03 07:00"), end: at("2026-03-03 19:00"), is_night: false };
///
/// assert!(!meets_constraints(&too_soon, &[prior], &rules));
/// assert!(meets_constraints(&next_day, &[prior], &rules));
/// ```
pub fn meets_constraints(
    candidate: &ShiftWindow,
    existing: &[ShiftWindow],
    rules: &ConstraintRules,
) -> bool {
    check_shift(candidate, existing, rules).is_ok()
}

fn rest_violation(
    candidate: &ShiftWindow,
    other: &ShiftWindow,
    min_rest_hours: Decimal,
) -> Option<ConstraintViolation> {
    if candidate.overlaps(other) {
        return Some(ConstraintViolation::Overlap {
            existing_start: other.start,
        });
    }

    let gap = if other.end <= candidate.start {
        candidate.start - other.end
    } else {
        other.start - candidate.end
    };
    let gap_hours = (Decimal::from(gap.num_minutes()) / Decimal::from(60)).round_dp(2);

    (gap_hours < min_rest_hours).then_some(ConstraintViolation::InsufficientRest {
        existing_start: other.start,
        gap_hours,
    })
}

/// Length of the run of consecutive dates through `date`, counting `date`.
fn run_through(date: NaiveDate, dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut run = 1;

    let mut cursor = date.pred_opt();
    while let Some(day) = cursor.filter(|d| dates.contains(d)) {
        run += 1;
        cursor = day.pred_opt();
    }

    let mut cursor = date.succ_opt();
    while let Some(day) = cursor.filter(|d| dates.contains(d)) {
        run += 1;
        cursor = day.succ_opt();
    }

    run
}
