//! Scheduling criteria and the pattern enums they are built from.
//!
//! This module defines [`SchedulingCriteria`], the immutable input to schedule
//! generation, together with the [`ShiftPattern`], [`RotationPattern`] and
//! [`ShiftType`] sum types.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

/// A named weekly work-day template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftPattern {
    /// Three 12-hour shifts a week.
    #[serde(rename = "3x12s")]
    ThreeTwelves,
    /// Five 8-hour shifts a week.
    #[serde(rename = "5x8s")]
    FiveEights,
    /// Weekend-only 12-hour shifts.
    #[serde(rename = "Baylor")]
    Baylor,
    /// Alternating weeks of seven 12-hour shifts and seven days off.
    #[serde(rename = "7on-7off")]
    SevenOnSevenOff,
    /// Nurse-selected days.
    #[serde(rename = "Self-Scheduled")]
    SelfScheduled,
    /// A fixed Monday/Wednesday/Friday block.
    #[serde(rename = "Block Scheduling")]
    BlockScheduling,
}

impl ShiftPattern {
    /// All patterns, in the order a pattern selector lists them.
    pub const ALL: [ShiftPattern; 6] = [
        ShiftPattern::ThreeTwelves,
        ShiftPattern::FiveEights,
        ShiftPattern::Baylor,
        ShiftPattern::SevenOnSevenOff,
        ShiftPattern::SelfScheduled,
        ShiftPattern::BlockScheduling,
    ];

    /// The display name, which is also the accepted input name.
    pub fn name(&self) -> &'static str {
        match self {
            ShiftPattern::ThreeTwelves => "3x12s",
            ShiftPattern::FiveEights => "5x8s",
            ShiftPattern::Baylor => "Baylor",
            ShiftPattern::SevenOnSevenOff => "7on-7off",
            ShiftPattern::SelfScheduled => "Self-Scheduled",
            ShiftPattern::BlockScheduling => "Block Scheduling",
        }
    }
}

impl std::fmt::Display for ShiftPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShiftPattern {
    type Err = EngineError;

    /// Parses a pattern name.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::models::ShiftPattern;
    ///
    /// let pattern: ShiftPattern = "Baylor".parse().unwrap();
    /// assert_eq!(pattern, ShiftPattern::Baylor);
    /// assert!("4x10s".parse::<ShiftPattern>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShiftPattern::ALL
            .into_iter()
            .find(|p| p.name() == s.trim())
            .ok_or_else(|| EngineError::InvalidConfiguration {
                field: "shift_pattern".to_string(),
                message: format!("unknown shift pattern '{}'", s),
            })
    }
}

/// Whether day/night assignment changes across a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationPattern {
    /// Keep the initial shift type for the whole schedule.
    Fixed,
    /// Flip between day and night after each run of worked shifts.
    Rotating,
}

impl std::fmt::Display for RotationPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationPattern::Fixed => write!(f, "Fixed"),
            RotationPattern::Rotating => write!(f, "Rotating"),
        }
    }
}

impl FromStr for RotationPattern {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Fixed" => Ok(RotationPattern::Fixed),
            "Rotating" => Ok(RotationPattern::Rotating),
            other => Err(EngineError::InvalidConfiguration {
                field: "rotation_pattern".to_string(),
                message: format!("unknown rotation pattern '{}'", other),
            }),
        }
    }
}

/// Day or night shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// A shift starting in the morning or afternoon.
    Day,
    /// A shift running overnight.
    Night,
}

impl ShiftType {
    /// Returns the other shift type.
    pub fn flipped(self) -> Self {
        match self {
            ShiftType::Day => ShiftType::Night,
            ShiftType::Night => ShiftType::Day,
        }
    }
}

/// Everything the engine needs to generate a schedule.
///
/// Built by the caller once per request and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingCriteria {
    /// The first calendar day of the schedule.
    pub start_date: NaiveDate,
    /// How many seven-day weeks to generate.
    pub total_weeks: u32,
    /// The weekly work-day template.
    pub shift_pattern: ShiftPattern,
    /// The day/night rotation policy.
    pub rotation_pattern: RotationPattern,
    /// Unit code, looked up in the configured pay bands.
    pub unit_type: String,
    /// Years of nursing experience.
    pub experience_years: Decimal,
    /// Maximum hours scheduled in any one week of the schedule.
    pub max_weekly_hours: Decimal,
    /// Maximum back-to-back calendar days worked before a rest day.
    pub max_consecutive_shifts: u32,
    /// Start on nights rather than days.
    #[serde(default)]
    pub prefer_night: bool,
    /// Allow weekend days in self-scheduled patterns.
    #[serde(default)]
    pub prefer_weekend: bool,
    /// Charge duty on every shift.
    #[serde(default)]
    pub charge_nurse: bool,
    /// Preceptor duty on every shift.
    #[serde(default)]
    pub preceptor_duty: bool,
    /// Certifications held.
    #[serde(default)]
    pub certifications: BTreeSet<String>,
    /// Dates the nurse must not be scheduled.
    #[serde(default)]
    pub requested_days_off: BTreeSet<NaiveDate>,
    /// Whether the nurse has opted in to choosing their own days.
    #[serde(default)]
    pub self_scheduled: bool,
    /// Seed for the AM/PM title tie-break on 8-hour day shifts. Without a
    /// seed every such shift is an AM shift.
    #[serde(default)]
    pub title_seed: Option<u64>,
}

impl SchedulingCriteria {
    /// Creates criteria with conservative defaults: fixed day rotation, no
    /// experience, a 48-hour weekly cap and at most five consecutive days.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::models::{SchedulingCriteria, ShiftPattern};
    /// use chrono::NaiveDate;
    ///
    /// let criteria = SchedulingCriteria::new(
    ///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    ///     4,
    ///     ShiftPattern::ThreeTwelves,
    ///     "ICU",
    /// );
    /// assert_eq!(criteria.max_consecutive_shifts, 5);
    /// ```
    pub fn new(
        start_date: NaiveDate,
        total_weeks: u32,
        shift_pattern: ShiftPattern,
        unit_type: impl Into<String>,
    ) -> Self {
        Self {
            start_date,
            total_weeks,
            shift_pattern,
            rotation_pattern: RotationPattern::Fixed,
            unit_type: unit_type.into(),
            experience_years: Decimal::ZERO,
            max_weekly_hours: Decimal::new(48, 0),
            max_consecutive_shifts: 5,
            prefer_night: false,
            prefer_weekend: false,
            charge_nurse: false,
            preceptor_duty: false,
            certifications: BTreeSet::new(),
            requested_days_off: BTreeSet::new(),
            self_scheduled: false,
            title_seed: None,
        }
    }

    /// Rejects criteria the simulator cannot meaningfully run.
    ///
    /// Checks the numeric ranges and that the unit type has a configured
    /// pay band.
    pub fn validate(&self, config: &EngineConfig) -> EngineResult<()> {
        let max_weeks = config.settings().max_total_weeks;
        if self.total_weeks == 0 || self.total_weeks > max_weeks {
            return Err(invalid_criteria(
                "total_weeks",
                format!("must be between 1 and {}, got {}", max_weeks, self.total_weeks),
            ));
        }
        if self.max_consecutive_shifts == 0 {
            return Err(invalid_criteria(
                "max_consecutive_shifts",
                "must be at least 1".to_string(),
            ));
        }
        if self.max_weekly_hours <= Decimal::ZERO {
            return Err(invalid_criteria(
                "max_weekly_hours",
                format!("must be positive, got {}", self.max_weekly_hours),
            ));
        }
        if self.experience_years < Decimal::ZERO {
            return Err(invalid_criteria(
                "experience_years",
                format!("must not be negative, got {}", self.experience_years),
            ));
        }
        config.unit(&self.unit_type)?;
        Ok(())
    }
}

fn invalid_criteria(field: &str, message: String) -> EngineError {
    EngineError::InvalidCriteria {
        field: field.to_string(),
        message,
    }
}
