//! Date inputs and time-to-maturity normalization.
//!
//! A contract date is either a calendar date or an already-computed year
//! fraction. Calendar pairs resolve to `(maturity - pricing).days / 365.0`
//! (ACT/365 fixed, the convention of the quote data this library targets);
//! year-fraction pairs resolve to their plain difference. Both
//! representations must agree within one contract.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::PricingError;

/// Calendar-date formats accepted by [`DateInput::from_str`], tried in order.
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// A pricing or maturity date, resolved once at contract construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DateInput {
    /// Calendar date; pairs resolve under ACT/365 fixed.
    Calendar(NaiveDate),
    /// Pre-computed year fraction.
    YearFraction(f64),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Calendar(date)
    }
}

impl From<f64> for DateInput {
    fn from(years: f64) -> Self {
        Self::YearFraction(years)
    }
}

/// Parses `MM/DD/YYYY` or ISO `YYYY-MM-DD` calendar dates.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use ironvol::dates::DateInput;
///
/// let d: DateInput = "03/31/2016".parse().unwrap();
/// assert_eq!(
///     d,
///     DateInput::Calendar(NaiveDate::from_ymd_opt(2016, 3, 31).unwrap())
/// );
/// assert!("31-03-2016".parse::<DateInput>().is_err());
/// ```
impl FromStr for DateInput {
    type Err = PricingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Ok(Self::Calendar(date));
            }
        }
        Err(PricingError::InvalidDate(format!(
            "`{raw}` matches no supported format (MM/DD/YYYY or YYYY-MM-DD)"
        )))
    }
}

impl std::fmt::Display for DateInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calendar(date) => write!(f, "{}", date.format("%m/%d/%Y")),
            Self::YearFraction(years) => write!(f, "{years}"),
        }
    }
}

/// Resolves a pricing/maturity pair into a time-to-maturity in years.
///
/// Fails with [`PricingError::InvertedDates`] when the pricing date is
/// strictly after maturity, and with [`PricingError::InvalidDate`] when the
/// two inputs use different representations. Equal dates resolve to `0.0`;
/// pricing operations reject that separately as a degenerate contract since
/// `sqrt(T)` appears in a denominator.
///
/// # Examples
/// ```
/// use ironvol::dates::{time_to_maturity, DateInput};
///
/// let pricing: DateInput = "03/31/2016".parse().unwrap();
/// let maturity: DateInput = "03/31/2017".parse().unwrap();
/// let t = time_to_maturity(pricing, maturity).unwrap();
/// assert!((t - 1.0).abs() < 1.0e-12);
/// ```
pub fn time_to_maturity(pricing: DateInput, maturity: DateInput) -> Result<f64, PricingError> {
    match (pricing, maturity) {
        (DateInput::Calendar(t), DateInput::Calendar(m)) => {
            if t > m {
                return Err(PricingError::InvertedDates { pricing, maturity });
            }
            Ok((m - t).num_days() as f64 / 365.0)
        }
        (DateInput::YearFraction(t), DateInput::YearFraction(m)) => {
            if t > m {
                return Err(PricingError::InvertedDates { pricing, maturity });
            }
            Ok(m - t)
        }
        _ => Err(PricingError::InvalidDate(
            "pricing and maturity dates must both be calendar dates or both year fractions"
                .to_string(),
        )),
    }
}
