//! Configuration types for schedule generation and pricing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the configuration set.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// The human-readable name of this configuration set.
    pub name: String,
    /// The version or effective date of the rates.
    pub version: String,
}

/// Local start times for each kind of shift.
///
/// Shift end times are derived from the start time and the pattern's
/// shift duration, so a 12-hour night starting at 19:00 ends at 07:00
/// the following day.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftTimes {
    /// Start of a 12-hour day shift.
    pub day_12h: NaiveTime,
    /// Start of a 12-hour night shift.
    pub night_12h: NaiveTime,
    /// Start of an 8-hour morning shift.
    pub day_8h_am: NaiveTime,
    /// Start of an 8-hour afternoon shift.
    pub day_8h_pm: NaiveTime,
    /// Start of an 8-hour night shift.
    pub night_8h: NaiveTime,
}

/// Engine-wide scheduling settings from engine.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSettings {
    /// Number of consecutive worked shifts before a rotating schedule flips
    /// between day and night.
    pub rotation_run_length: u32,
    /// Upper bound on the number of weeks a single schedule may span.
    pub max_total_weeks: u32,
    /// Shift start times.
    pub shift_times: ShiftTimes,
}

/// Layout of engine.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineFile {
    /// Configuration metadata.
    pub metadata: EngineMetadata,
    /// Scheduling settings.
    pub schedule: ScheduleSettings,
}

/// The hourly pay band for a unit type.
///
/// Base pay is interpolated linearly between `min_rate` (no experience) and
/// `max_rate` (twenty or more years of experience).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitBand {
    /// The human-readable name of the unit.
    pub name: String,
    /// Hourly rate at zero years of experience.
    pub min_rate: Decimal,
    /// Hourly rate at the experience ceiling.
    pub max_rate: Decimal,
}

/// Layout of units.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitsFile {
    /// Map of unit code to pay band.
    pub units: BTreeMap<String, UnitBand>,
}

/// The kinds of differential the engine knows how to trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferentialKind {
    /// Paid on night shifts.
    Night,
    /// Paid on shifts starting on Saturday or Sunday.
    Weekend,
    /// Paid on shifts starting on a holiday.
    Holiday,
    /// Paid on every shift when the nurse holds charge duty.
    Charge,
    /// Paid on every shift when the nurse has preceptor duty.
    Preceptor,
    /// Paid on every shift when the nurse holds any certification.
    Certification,
}

impl DifferentialKind {
    /// All kinds, in display order.
    pub const ALL: [DifferentialKind; 6] = [
        DifferentialKind::Night,
        DifferentialKind::Weekend,
        DifferentialKind::Holiday,
        DifferentialKind::Charge,
        DifferentialKind::Preceptor,
        DifferentialKind::Certification,
    ];
}

impl std::fmt::Display for DifferentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifferentialKind::Night => write!(f, "night"),
            DifferentialKind::Weekend => write!(f, "weekend"),
            DifferentialKind::Holiday => write!(f, "holiday"),
            DifferentialKind::Charge => write!(f, "charge"),
            DifferentialKind::Preceptor => write!(f, "preceptor"),
            DifferentialKind::Certification => write!(f, "certification"),
        }
    }
}

/// A single differential rule: an hourly amount added on top of base pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferentialRule {
    /// What triggers this differential.
    pub kind: DifferentialKind,
    /// Display name shown alongside the amount.
    pub name: String,
    /// Hourly amount.
    pub amount: Decimal,
    /// Whether this rule adds on top of other rules. Among non-stackable
    /// rules that apply to the same shift only the highest is paid.
    #[serde(default = "default_stackable")]
    pub stackable: bool,
}

fn default_stackable() -> bool {
    true
}

/// Layout of differentials.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct DifferentialsFile {
    /// Differential rules in display order.
    pub differentials: Vec<DifferentialRule>,
}

/// A holiday that falls on the same month and day every year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixedHoliday {
    /// The name of the holiday.
    pub name: String,
    /// Month, 1 to 12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
}

/// A holiday on one specific date, for holidays that move year to year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatedHoliday {
    /// The name of the holiday.
    pub name: String,
    /// The date it is observed.
    pub date: NaiveDate,
}

/// The holiday calendar, from holidays.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidayCalendar {
    /// Holidays recurring on a fixed month and day.
    #[serde(default)]
    pub fixed: Vec<FixedHoliday>,
    /// One-off dated holidays.
    #[serde(default)]
    pub dated: Vec<DatedHoliday>,
}

impl HolidayCalendar {
    /// Returns the name of the holiday on `date`, if any.
    ///
    /// Dated entries take precedence over fixed ones.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::config::{FixedHoliday, HolidayCalendar};
    /// use chrono::NaiveDate;
    ///
    /// let calendar = HolidayCalendar {
    ///     fixed: vec![FixedHoliday { name: "Christmas Day".to_string(), month: 12, day: 25 }],
    ///     dated: vec![],
    /// };
    /// let christmas = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
    /// assert_eq!(calendar.holiday_on(christmas), Some("Christmas Day"));
    /// ```
    pub fn holiday_on(&self, date: NaiveDate) -> Option<&str> {
        self.dated
            .iter()
            .find(|h| h.date == date)
            .map(|h| h.name.as_str())
            .or_else(|| {
                self.fixed
                    .iter()
                    .find(|h| h.month == date.month() && h.day == date.day())
                    .map(|h| h.name.as_str())
            })
    }
}

/// The complete engine configuration.
///
/// An explicitly constructed, immutable value that every engine call takes
/// by reference. Different tenants or rate years simply construct different
/// values.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    settings: ScheduleSettings,
    units: BTreeMap<String, UnitBand>,
    differentials: Vec<DifferentialRule>,
    holidays: HolidayCalendar,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    ///
    /// The parts are not checked here; call [`EngineConfig::validate`] before
    /// using a configuration assembled from untrusted input.
    pub fn new(
        metadata: EngineMetadata,
        settings: ScheduleSettings,
        units: BTreeMap<String, UnitBand>,
        differentials: Vec<DifferentialRule>,
        holidays: HolidayCalendar,
    ) -> Self {
        Self {
            metadata,
            settings,
            units,
            differentials,
            holidays,
        }
    }

    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> EngineResult<()> {
        if self.settings.rotation_run_length == 0 {
            return Err(invalid("rotation_run_length", "must be at least 1"));
        }
        if self.settings.max_total_weeks == 0 {
            return Err(invalid("max_total_weeks", "must be at least 1"));
        }

        for (code, band) in &self.units {
            if band.min_rate < Decimal::ZERO || band.min_rate > band.max_rate {
                return Err(invalid(
                    &format!("units.{}", code),
                    &format!(
                        "pay band {}..{} is not a non-negative ascending range",
                        band.min_rate, band.max_rate
                    ),
                ));
            }
        }

        for kind in DifferentialKind::ALL {
            let count = self.differentials.iter().filter(|d| d.kind == kind).count();
            if count != 1 {
                return Err(invalid(
                    "differentials",
                    &format!("expected exactly one '{}' rule, found {}", kind, count),
                ));
            }
        }

        self.validate_shift_times()?;

        for holiday in &self.holidays.fixed {
            // 2000 is a leap year, so Feb 29 is accepted.
            if NaiveDate::from_ymd_opt(2000, holiday.month, holiday.day).is_none() {
                return Err(invalid(
                    "holidays.fixed",
                    &format!(
                        "'{}' has no valid date {}-{}",
                        holiday.name, holiday.month, holiday.day
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Every shift of a given length must end by the earliest start of that
    /// length on the next day, so back-to-back days never overlap whatever
    /// the rotation does.
    fn validate_shift_times(&self) -> EngineResult<()> {
        const DAY_SECONDS: u32 = 24 * 3600;
        let times = &self.settings.shift_times;
        let twelve = [times.day_12h, times.night_12h];
        let eight = [times.day_8h_am, times.day_8h_pm, times.night_8h];

        for (hours, starts) in [(12u32, &twelve[..]), (8, &eight[..])] {
            let earliest = starts
                .iter()
                .map(Timelike::num_seconds_from_midnight)
                .min()
                .unwrap_or(0);
            for start in starts {
                let end = start.num_seconds_from_midnight() + hours * 3600;
                if end > DAY_SECONDS + earliest {
                    return Err(invalid(
                        "shift_times",
                        &format!(
                            "a {}h shift starting {} overlaps the next day's {}h shift",
                            hours, start, hours
                        ),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the scheduling settings.
    pub fn settings(&self) -> &ScheduleSettings {
        &self.settings
    }

    /// Returns all unit pay bands keyed by unit code.
    pub fn units(&self) -> &BTreeMap<String, UnitBand> {
        &self.units
    }

    /// Looks up the pay band for a unit type.
    pub fn unit(&self, unit_type: &str) -> EngineResult<&UnitBand> {
        self.units
            .get(unit_type)
            .ok_or_else(|| EngineError::UnitNotFound {
                unit: unit_type.to_string(),
            })
    }

    /// Returns the differential rules in display order.
    pub fn differentials(&self) -> &[DifferentialRule] {
        &self.differentials
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfiguration {
        field: field.to_string(),
        message: message.to_string(),
    }
}
