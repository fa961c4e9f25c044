//! Base pay calculation.
//!
//! Base pay is a linear interpolation over a unit's pay band by years of
//! experience, saturating at [`EXPERIENCE_CEILING_YEARS`].

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::UnitBand;

/// Years of experience at which base pay reaches the top of the band.
pub const EXPERIENCE_CEILING_YEARS: i64 = 20;

/// Calculates the base hourly pay for a unit band and experience level.
///
/// `min_rate + min(experience, 20) * (max_rate - min_rate) / 20`, rounded to
/// cents with midpoints away from zero. Negative experience is treated as
/// zero.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::calculate_base_pay;
/// use shift_engine::config::UnitBand;
/// use rust_decimal::Decimal;
///
/// let icu = UnitBand {
///     name: "Intensive Care Unit".to_string(),
///     min_rate: Decimal::new(36, 0),
///     max_rate: Decimal::new(52, 0),
/// };
/// assert_eq!(calculate_base_pay(&icu, Decimal::new(10, 0)), Decimal::new(44, 0));
/// ```
pub fn calculate_base_pay(band: &UnitBand, experience_years: Decimal) -> Decimal {
    let ceiling = Decimal::new(EXPERIENCE_CEILING_YEARS, 0);
    let years = experience_years.max(Decimal::ZERO).min(ceiling);
    let raw = band.min_rate + years * (band.max_rate - band.min_rate) / ceiling;
    raw.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn icu() -> UnitBand {
        UnitBand {
            name: "Intensive Care Unit".to_string(),
            min_rate: dec("36.00"),
            max_rate: dec("52.00"),
        }
    }

    #[test]
    fn test_zero_experience_is_band_minimum() {
        assert_eq!(calculate_base_pay(&icu(), Decimal::ZERO), dec("36.00"));
    }

    #[test]
    fn test_twenty_years_is_band_maximum() {
        assert_eq!(calculate_base_pay(&icu(), dec("20")), dec("52.00"));
    }

    #[test]
    fn test_experience_saturates_at_ceiling() {
        assert_eq!(calculate_base_pay(&icu(), dec("35")), dec("52.00"));
    }

    #[test]
    fn test_interpolates_linearly() {
        // 36 + 7 * 16 / 20 = 41.60
        assert_eq!(calculate_base_pay(&icu(), dec("7")), dec("41.60"));
    }

    #[test]
    fn test_fractional_experience_rounds_to_cents() {
        // 36 + 2.5 * 16 / 20 = 38.00
        assert_eq!(calculate_base_pay(&icu(), dec("2.5")), dec("38.00"));
        // 30 + 1 * 15 / 20 = 30.75
        let med_surg = UnitBand {
            name: "Medical-Surgical".to_string(),
            min_rate: dec("30.00"),
            max_rate: dec("45.00"),
        };
        assert_eq!(calculate_base_pay(&med_surg, dec("1")), dec("30.75"));
        // 30 + 0.33 * 15 / 20 = 30.2475 -> 30.25
        assert_eq!(calculate_base_pay(&med_surg, dec("0.33")), dec("30.25"));
    }

    #[test]
    fn test_negative_experience_treated_as_zero() {
        assert_eq!(calculate_base_pay(&icu(), dec("-3")), dec("36.00"));
    }
}
