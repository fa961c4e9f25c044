//! Shift event model and the time window it occupies.
//!
//! A [`ShiftEvent`] is one priced shift on the generated calendar. Its
//! [`ShiftWindow`] is the bare time span the constraint validator works on.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DifferentialKind;

use super::ShiftType;

/// A differential paid on a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDifferential {
    /// What triggered it.
    pub kind: DifferentialKind,
    /// Display name.
    pub name: String,
    /// Hourly amount.
    pub amount: Decimal,
}

/// A single scheduled and priced shift.
///
/// # Example
///
/// ```
/// use shift_engine::models::{ShiftEvent, ShiftType};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let event = ShiftEvent {
///     title: "Day Shift".to_string(),
///     shift_type: ShiftType::Day,
///     start: NaiveDateTime::parse_from_str("2026-03-02 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2026-03-02 19:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     hours: Decimal::new(12, 0),
///     base_pay: Decimal::new(36, 0),
///     hourly_rate: Decimal::new(36, 0),
///     differentials: vec![],
///     earnings: Decimal::new(432, 0),
///     is_holiday: false,
///     holiday_name: None,
///     is_weekend: false,
///     is_night: false,
/// };
/// assert_eq!(event.earnings, event.hourly_rate * event.hours);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEvent {
    /// Display title from the fixed label set.
    pub title: String,
    /// Day or night.
    pub shift_type: ShiftType,
    /// Local start time.
    pub start: NaiveDateTime,
    /// Local end time.
    pub end: NaiveDateTime,
    /// Paid hours.
    pub hours: Decimal,
    /// Base hourly pay before differentials.
    pub base_pay: Decimal,
    /// Base pay plus all paid differentials.
    pub hourly_rate: Decimal,
    /// Paid differentials in display order.
    pub differentials: Vec<AppliedDifferential>,
    /// `hourly_rate * hours`.
    pub earnings: Decimal,
    /// Whether the shift starts on a holiday.
    pub is_holiday: bool,
    /// The holiday's name when `is_holiday` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
    /// Whether the shift starts on a Saturday or Sunday.
    pub is_weekend: bool,
    /// Whether this is a night shift.
    pub is_night: bool,
}

impl ShiftEvent {
    /// The calendar date the shift starts on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Whether a differential of the given kind was paid.
    pub fn has_differential(&self, kind: DifferentialKind) -> bool {
        self.differentials.iter().any(|d| d.kind == kind)
    }

    /// The time span this shift occupies.
    pub fn window(&self) -> ShiftWindow {
        ShiftWindow {
            start: self.start,
            end: self.end,
            is_night: self.is_night,
        }
    }
}

/// The time span of a shift, without pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Local start time.
    pub start: NaiveDateTime,
    /// Local end time.
    pub end: NaiveDateTime,
    /// Whether this is a night shift.
    #[serde(default)]
    pub is_night: bool,
}

impl ShiftWindow {
    /// The calendar date the shift starts on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Whether two windows share any instant.
    pub fn overlaps(&self, other: &ShiftWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}
