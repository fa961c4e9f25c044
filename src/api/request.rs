//! Request types for the Shift Schedule Engine API.
//!
//! This module defines the JSON request structures for the `/schedule` and
//! `/constraints/check` endpoints. `/price` takes a
//! [`PriceRequest`](crate::calculation::PriceRequest) directly.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{RotationPattern, SchedulingCriteria, ShiftPattern, ShiftWindow};
use crate::validation::ConstraintRules;

/// Request body for the `/schedule` endpoint.
///
/// Pattern names arrive as strings so unknown names are reported as
/// `INVALID_CONFIGURATION`, and counts are signed so negative values are
/// reported as `INVALID_CRITERIA` rather than as JSON errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// The first day of the schedule.
    pub start_date: NaiveDate,
    /// Number of weeks to generate.
    pub total_weeks: i64,
    /// Shift pattern name, e.g. "3x12s" or "7on-7off".
    pub shift_pattern: String,
    /// Rotation pattern name, "Fixed" or "Rotating".
    #[serde(default = "default_rotation_pattern")]
    pub rotation_pattern: String,
    /// Unit code, e.g. "ICU".
    pub unit_type: String,
    /// Years of experience.
    #[serde(default)]
    pub experience_years: Decimal,
    /// Weekly hour cap.
    #[serde(default = "default_max_weekly_hours")]
    pub max_weekly_hours: Decimal,
    /// Consecutive-shift cap.
    #[serde(default = "default_max_consecutive_shifts")]
    pub max_consecutive_shifts: i64,
    /// Start on nights.
    #[serde(default)]
    pub prefer_night: bool,
    /// Open weekends for self-scheduling.
    #[serde(default)]
    pub prefer_weekend: bool,
    /// Charge duty.
    #[serde(default)]
    pub charge_nurse: bool,
    /// Preceptor duty.
    #[serde(default)]
    pub preceptor_duty: bool,
    /// Certifications held.
    #[serde(default)]
    pub certifications: BTreeSet<String>,
    /// Dates that must not be worked.
    #[serde(default)]
    pub requested_days_off: BTreeSet<NaiveDate>,
    /// Opt-in for the self-scheduled pattern.
    #[serde(default)]
    pub self_scheduled: bool,
    /// Seed for the AM/PM title choice.
    #[serde(default)]
    pub title_seed: Option<u64>,
}

fn default_rotation_pattern() -> String {
    RotationPattern::Fixed.to_string()
}

fn default_max_weekly_hours() -> Decimal {
    Decimal::new(48, 0)
}

fn default_max_consecutive_shifts() -> i64 {
    5
}

fn non_negative_count(field: &str, value: i64) -> Result<u32, EngineError> {
    u32::try_from(value).map_err(|_| EngineError::InvalidCriteria {
        field: field.to_string(),
        message: format!("must be a non-negative whole number, got {}", value),
    })
}

impl TryFrom<ScheduleRequest> for SchedulingCriteria {
    type Error = EngineError;

    fn try_from(req: ScheduleRequest) -> Result<Self, Self::Error> {
        let shift_pattern: ShiftPattern = req.shift_pattern.parse()?;
        let rotation_pattern: RotationPattern = req.rotation_pattern.parse()?;

        Ok(SchedulingCriteria {
            start_date: req.start_date,
            total_weeks: non_negative_count("total_weeks", req.total_weeks)?,
            shift_pattern,
            rotation_pattern,
            unit_type: req.unit_type,
            experience_years: req.experience_years,
            max_weekly_hours: req.max_weekly_hours,
            max_consecutive_shifts: non_negative_count(
                "max_consecutive_shifts",
                req.max_consecutive_shifts,
            )?,
            prefer_night: req.prefer_night,
            prefer_weekend: req.prefer_weekend,
            charge_nurse: req.charge_nurse,
            preceptor_duty: req.preceptor_duty,
            certifications: req.certifications,
            requested_days_off: req.requested_days_off,
            self_scheduled: req.self_scheduled,
            title_seed: req.title_seed,
        })
    }
}

/// Request body for the `/constraints/check` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintCheckRequest {
    /// The shift being placed.
    pub shift: ShiftWindow,
    /// Shifts already on the calendar.
    #[serde(default)]
    pub existing_shifts: Vec<ShiftWindow>,
    /// Limits to check against.
    pub rules: ConstraintRules,
}
