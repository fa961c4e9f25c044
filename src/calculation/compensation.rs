//! Shift pricing.
//!
//! This module composes base pay, holiday lookup and differential stacking
//! into the hourly rate and earnings for a single shift.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::AppliedDifferential;

use super::{
    DifferentialTriggers, apply_differentials, calculate_base_pay, differentials_total,
    get_day_type,
};

/// Longest single shift that can be priced.
pub const MAX_SHIFT_HOURS: i64 = 24;

/// Everything needed to price one shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRequest {
    /// The date the shift starts on.
    pub date: NaiveDate,
    /// Whether it is a night shift.
    #[serde(default)]
    pub is_night: bool,
    /// Paid hours.
    pub hours: Decimal,
    /// Unit code.
    pub unit_type: String,
    /// Years of experience.
    pub experience_years: Decimal,
    /// Certifications held.
    #[serde(default)]
    pub certifications: BTreeSet<String>,
    /// Charge duty.
    #[serde(default)]
    pub charge_nurse: bool,
    /// Preceptor duty.
    #[serde(default)]
    pub preceptor_duty: bool,
}

/// The priced outcome for one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPricing {
    /// Base hourly pay from the unit band.
    pub base_pay: Decimal,
    /// Base pay plus paid differentials.
    pub hourly_rate: Decimal,
    /// `hourly_rate * hours`.
    pub earnings: Decimal,
    /// Paid differentials in display order.
    pub differentials: Vec<AppliedDifferential>,
    /// Whether the date is a holiday.
    pub is_holiday: bool,
    /// The holiday's name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
    /// Whether the date is a Saturday or Sunday.
    pub is_weekend: bool,
}

/// Prices a single shift.
///
/// # Returns
///
/// Returns the pricing, `UnitNotFound` if the unit type has no configured
/// pay band, or `InvalidCriteria` if `hours` is not in `(0, 24]`.
///
/// # Example
///
/// ```no_run
/// use shift_engine::calculation::{price_shift, PriceRequest};
/// use shift_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let request = PriceRequest {
///     date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(), // Wednesday
///     is_night: false,
///     hours: Decimal::new(12, 0),
///     unit_type: "ICU".to_string(),
///     experience_years: Decimal::new(20, 0),
///     certifications: Default::default(),
///     charge_nurse: false,
///     preceptor_duty: false,
/// };
/// let pricing = price_shift(&request, loader.config()).unwrap();
/// assert_eq!(pricing.base_pay, Decimal::new(52, 0));
/// assert_eq!(pricing.earnings, Decimal::new(624, 0));
/// ```
pub fn price_shift(request: &PriceRequest, config: &EngineConfig) -> EngineResult<ShiftPricing> {
    if request.hours <= Decimal::ZERO || request.hours > Decimal::new(MAX_SHIFT_HOURS, 0) {
        return Err(EngineError::InvalidCriteria {
            field: "hours".to_string(),
            message: format!(
                "must be greater than 0 and at most {}, got {}",
                MAX_SHIFT_HOURS, request.hours
            ),
        });
    }

    let band = config.unit(&request.unit_type)?;
    let base_pay = calculate_base_pay(band, request.experience_years);
    let duties = DutyFlags {
        charge_nurse: request.charge_nurse,
        preceptor_duty: request.preceptor_duty,
        has_certification: !request.certifications.is_empty(),
    };

    price_at_base_pay(
        base_pay,
        request.date,
        request.is_night,
        request.hours,
        duties,
        config,
    )
}

/// Schedule-wide duties that trigger differentials on every shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DutyFlags {
    /// Charge duty.
    pub charge_nurse: bool,
    /// Preceptor duty.
    pub preceptor_duty: bool,
    /// At least one certification held.
    pub has_certification: bool,
}

/// Prices a shift once base pay is known.
///
/// The simulator resolves base pay once per schedule and prices every shift
/// through here. Returns `InvalidCriteria` if the rate or earnings do not
/// fit in a `Decimal`.
pub fn price_at_base_pay(
    base_pay: Decimal,
    date: NaiveDate,
    is_night: bool,
    hours: Decimal,
    duties: DutyFlags,
    config: &EngineConfig,
) -> EngineResult<ShiftPricing> {
    let holiday_name = config.holidays().holiday_on(date).map(str::to_string);
    let is_weekend = get_day_type(date).is_weekend();

    let triggers = DifferentialTriggers {
        is_night,
        is_weekend,
        is_holiday: holiday_name.is_some(),
        charge_nurse: duties.charge_nurse,
        preceptor_duty: duties.preceptor_duty,
        has_certification: duties.has_certification,
    };
    let differentials = apply_differentials(&triggers, config);

    let hourly_rate = differentials_total(&differentials)
        .and_then(|total| base_pay.checked_add(total))
        .ok_or_else(|| overflow("hourly_rate"))?;
    let earnings = hourly_rate
        .checked_mul(hours)
        .ok_or_else(|| overflow("hours"))?;

    Ok(ShiftPricing {
        base_pay,
        hourly_rate,
        earnings,
        differentials,
        is_holiday: holiday_name.is_some(),
        holiday_name,
        is_weekend,
    })
}

fn overflow(field: &str) -> EngineError {
    EngineError::InvalidCriteria {
        field: field.to_string(),
        message: "pay amount is too large to represent".to_string(),
    }
}
