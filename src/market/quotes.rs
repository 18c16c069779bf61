//! Row-level interface to the quote-ingestion collaborator.
//!
//! The collaborator owns file reading and dataset filtering; this module only
//! defines the stable row payload it supplies and the per-row implied-vol
//! computation whose `(strike, maturity, implied vol)` output the plotting
//! collaborator consumes.

use serde::{Deserialize, Serialize};

use crate::core::{OptionType, PricingError};
use crate::dates::DateInput;
use crate::instruments::VanillaContract;
use crate::vol;

/// One option quote row as supplied by the ingestion collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Observation date of the quote.
    pub trade_date: DateInput,
    /// Expiry date of the option.
    pub expiry_date: DateInput,
    /// Strike level.
    pub strike: f64,
    /// Best bid premium.
    pub bid: f64,
    /// Best offer premium.
    pub offer: f64,
}

impl OptionQuote {
    /// Mid premium, `(bid + offer) / 2`, used as the calibration target.
    pub fn mid_price(&self) -> f64 {
        0.5 * (self.bid + self.offer)
    }
}

/// Per-row output consumed by the plotting collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteImpliedVol {
    pub strike: f64,
    pub time_to_maturity: f64,
    pub implied_vol: f64,
}

/// Implied volatility for one quote row.
///
/// Builds a normalized contract from the quote and the shared market state
/// (`spot`, `rate`, `dividend_yield`), then inverts the mid premium seeded at
/// `sigma_guess`.
///
/// # Errors
/// Forwards normalization errors (inverted dates, non-positive strike) and
/// solver errors ([`PricingError::RootFindDidNotConverge`], degenerate rows).
///
/// # Examples
/// ```
/// use ironvol::core::OptionType;
/// use ironvol::market::{implied_vol_for_quote, OptionQuote};
///
/// let quote = OptionQuote {
///     trade_date: "03/31/2016".parse().unwrap(),
///     expiry_date: "06/30/2016".parse().unwrap(),
///     strike: 2100.0,
///     bid: 47.0,
///     offer: 49.0,
/// };
/// let row = implied_vol_for_quote(&quote, OptionType::Call, 2059.74, 0.0059, 0.0217, 0.15)
///     .unwrap();
/// assert!(row.implied_vol > 0.0 && row.implied_vol < 1.0);
/// ```
pub fn implied_vol_for_quote(
    quote: &OptionQuote,
    option_type: OptionType,
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    sigma_guess: f64,
) -> Result<QuoteImpliedVol, PricingError> {
    let contract = VanillaContract::builder()
        .spot(spot)
        .strike(quote.strike)
        .pricing_date(quote.trade_date)
        .maturity_date(quote.expiry_date)
        .rate(rate)
        .volatility(sigma_guess)
        .dividend_yield(dividend_yield)
        .option_type(option_type)
        .build()?;

    let implied_vol = vol::implied_vol(&contract, quote.mid_price(), sigma_guess)?;

    Ok(QuoteImpliedVol {
        strike: quote.strike,
        time_to_maturity: contract.time_to_maturity(),
        implied_vol,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quote() -> OptionQuote {
        OptionQuote {
            trade_date: "03/31/2016".parse().unwrap(),
            expiry_date: "06/30/2016".parse().unwrap(),
            strike: 2100.0,
            bid: 46.0,
            offer: 50.0,
        }
    }

    #[test]
    fn mid_price_averages_bid_and_offer() {
        assert_eq!(quote().mid_price(), 48.0);
    }

    #[test]
    fn quote_rows_deserialize_from_collaborator_payloads() {
        let raw = r#"{
            "trade_date": {"Calendar": "2016-03-31"},
            "expiry_date": {"Calendar": "2016-06-30"},
            "strike": 2100.0,
            "bid": 46.0,
            "offer": 50.0
        }"#;
        let parsed: OptionQuote = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed, quote());
    }

    #[test]
    fn row_implied_vol_reprices_the_mid() {
        let quote = quote();
        let row =
            implied_vol_for_quote(&quote, OptionType::Call, 2059.74, 0.0059, 0.0217, 0.15).unwrap();
        assert_relative_eq!(row.strike, 2100.0, epsilon = 1e-12);
        assert_relative_eq!(row.time_to_maturity, 91.0 / 365.0, epsilon = 1e-12);

        let contract = VanillaContract::builder()
            .spot(2059.74)
            .strike(quote.strike)
            .pricing_date(quote.trade_date)
            .maturity_date(quote.expiry_date)
            .rate(0.0059)
            .volatility(row.implied_vol)
            .dividend_yield(0.0217)
            .option_type(OptionType::Call)
            .build()
            .unwrap();
        assert_relative_eq!(contract.value().unwrap(), quote.mid_price(), epsilon = 1e-7);
    }

    #[test]
    fn inverted_quote_dates_are_rejected() {
        let mut bad = quote();
        std::mem::swap(&mut bad.trade_date, &mut bad.expiry_date);
        let err =
            implied_vol_for_quote(&bad, OptionType::Call, 2059.74, 0.0059, 0.0217, 0.15)
                .unwrap_err();
        assert!(matches!(err, PricingError::InvertedDates { .. }));
    }
}
