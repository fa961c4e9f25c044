//! Compensation logic for the shift schedule engine.
//!
//! This module contains the pricing functions for shifts: base pay
//! interpolated over a unit's pay band, day detection for weekend
//! differentials, differential stacking, shift titles, and the composed
//! [`price_shift`] entry point.

mod base_pay;
mod compensation;
mod day_detection;
mod differentials;
mod shift_title;

pub use base_pay::{EXPERIENCE_CEILING_YEARS, calculate_base_pay};
pub use compensation::{DutyFlags, PriceRequest, ShiftPricing, price_at_base_pay, price_shift};
pub use day_detection::{DayType, get_day_type, weekday_index};
pub use differentials::{DifferentialTriggers, apply_differentials, differentials_total};
pub use shift_title::{DayHalf, ShiftLength, shift_title};
