//! Shift titles.
//!
//! Titles come from a fixed label set keyed by shift length, day or night,
//! and whether the shift starts on a weekend. They are display-only and never
//! affect pay.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::ShiftType;

/// The two shift lengths patterns use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftLength {
    /// 8-hour shifts.
    Eight,
    /// 12-hour shifts.
    Twelve,
}

impl ShiftLength {
    /// Whole hours in a shift of this length.
    pub fn hours(self) -> u32 {
        match self {
            ShiftLength::Eight => 8,
            ShiftLength::Twelve => 12,
        }
    }
}

/// Which half of the day an 8-hour day shift covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayHalf {
    /// Morning.
    Am,
    /// Afternoon into evening.
    Pm,
}

impl DayHalf {
    /// Picks a half with a fair coin from `rng`, or AM without one.
    pub fn choose<R: Rng>(rng: Option<&mut R>) -> Self {
        match rng {
            Some(rng) => {
                if rng.random_bool(0.5) {
                    DayHalf::Pm
                } else {
                    DayHalf::Am
                }
            }
            None => DayHalf::Am,
        }
    }
}

/// Returns the display title for a shift.
///
/// `half` only matters for 8-hour day shifts.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::{shift_title, DayHalf, ShiftLength};
/// use shift_engine::models::ShiftType;
///
/// assert_eq!(
///     shift_title(ShiftLength::Twelve, ShiftType::Night, true, DayHalf::Am),
///     "Weekend Night (12h)"
/// );
/// ```
pub fn shift_title(
    length: ShiftLength,
    shift_type: ShiftType,
    is_weekend: bool,
    half: DayHalf,
) -> &'static str {
    match (length, shift_type, is_weekend, half) {
        (ShiftLength::Twelve, ShiftType::Day, false, _) => "Day Shift (12h)",
        (ShiftLength::Twelve, ShiftType::Day, true, _) => "Weekend Day (12h)",
        (ShiftLength::Twelve, ShiftType::Night, false, _) => "Night Shift (12h)",
        (ShiftLength::Twelve, ShiftType::Night, true, _) => "Weekend Night (12h)",
        (ShiftLength::Eight, ShiftType::Day, false, DayHalf::Am) => "Day Shift AM (8h)",
        (ShiftLength::Eight, ShiftType::Day, false, DayHalf::Pm) => "Evening Shift PM (8h)",
        (ShiftLength::Eight, ShiftType::Day, true, DayHalf::Am) => "Weekend AM (8h)",
        (ShiftLength::Eight, ShiftType::Day, true, DayHalf::Pm) => "Weekend PM (8h)",
        (ShiftLength::Eight, ShiftType::Night, false, _) => "Night Shift (8h)",
        (ShiftLength::Eight, ShiftType::Night, true, _) => "Weekend Night (8h)",
    }
}
