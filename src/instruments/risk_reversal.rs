//! Risk-reversal strategy: short an out-of-the-money put at `K1`, long an
//! out-of-the-money call at `K2 > K1`, both legs sharing spot, dates, rate,
//! volatility, and dividend yield.
//!
//! Net present value is `call_leg - put_leg`. [`RiskReversal::payoff_curve`]
//! sweeps integer spot levels over `[trunc(0.9 K1), trunc(1.1 K2)]`, holding
//! everything else fixed, and yields `(spot, value)` pairs in increasing spot
//! order.

use crate::core::{OptionType, PricingError};
use crate::dates::{time_to_maturity, DateInput};
use crate::instruments::VanillaContract;
use crate::pricing::{self, bs_price};

/// Two-leg risk-reversal strategy on a single underlying.
///
/// Construct through [`RiskReversal::builder`], which enforces the strike
/// ordering invariant `strike_put < strike_call`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskReversal {
    /// Underlying level at the pricing date.
    pub spot: f64,
    /// Strike of the short put leg (`K1`).
    pub strike_put: f64,
    /// Strike of the long call leg (`K2`).
    pub strike_call: f64,
    /// Pricing date shared by both legs.
    pub pricing_date: DateInput,
    /// Maturity date shared by both legs.
    pub maturity_date: DateInput,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Annualized volatility shared by both legs.
    pub volatility: f64,
    /// Continuously compounded dividend yield.
    pub dividend_yield: f64,
    time_to_maturity: f64,
}

impl RiskReversal {
    /// Starts a strategy builder.
    pub fn builder() -> RiskReversalBuilder {
        RiskReversalBuilder::default()
    }

    /// Time to maturity in years, shared by both legs.
    #[inline]
    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    /// The short put leg as a standalone contract.
    pub fn put_leg(&self) -> VanillaContract {
        self.leg(OptionType::Put, self.strike_put)
    }

    /// The long call leg as a standalone contract.
    pub fn call_leg(&self) -> VanillaContract {
        self.leg(OptionType::Call, self.strike_call)
    }

    fn leg(&self, option_type: OptionType, strike: f64) -> VanillaContract {
        VanillaContract {
            spot: self.spot,
            strike,
            pricing_date: self.pricing_date,
            maturity_date: self.maturity_date,
            rate: self.rate,
            volatility: self.volatility,
            dividend_yield: self.dividend_yield,
            option_type,
            time_to_maturity: self.time_to_maturity,
        }
    }

    /// Copy of the strategy with only the spot replaced.
    #[must_use]
    pub fn with_spot(&self, spot: f64) -> Self {
        Self { spot, ..*self }
    }

    /// Net present value: long call minus short put.
    ///
    /// # Errors
    /// [`PricingError::DegenerateContract`] when `T <= 0` or `sigma <= 0`.
    pub fn value(&self) -> Result<f64, PricingError> {
        Ok(pricing::value(&self.call_leg())? - pricing::value(&self.put_leg())?)
    }

    /// Payoff curve over the default sweep domain
    /// `[trunc(0.9 * strike_put), trunc(1.1 * strike_call)]`.
    pub fn payoff_curve(&self) -> Result<PayoffCurve, PricingError> {
        let lower = (0.9 * self.strike_put).trunc();
        let upper = (1.1 * self.strike_call).trunc();
        self.payoff_curve_between(lower, upper)
    }

    /// Payoff curve at each integer spot within `[lower, upper]`, in
    /// increasing spot order.
    ///
    /// # Errors
    /// - [`PricingError::InvalidRange`] when `lower > upper`.
    /// - [`PricingError::InvalidInput`] when `lower < 0` (spots are prices).
    /// - [`PricingError::DegenerateContract`] when `T <= 0` or `sigma <= 0`;
    ///   checked once here so the iterator itself cannot fail.
    pub fn payoff_curve_between(
        &self,
        lower: f64,
        upper: f64,
    ) -> Result<PayoffCurve, PricingError> {
        if lower > upper {
            return Err(PricingError::InvalidRange { lower, upper });
        }
        if lower < 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "sweep lower bound must be non-negative, got {lower}"
            )));
        }
        if self.time_to_maturity <= 0.0 {
            return Err(PricingError::DegenerateContract {
                field: "time_to_maturity",
                value: self.time_to_maturity,
            });
        }
        if self.volatility <= 0.0 {
            return Err(PricingError::DegenerateContract {
                field: "volatility",
                value: self.volatility,
            });
        }

        Ok(PayoffCurve {
            strategy: *self,
            next: lower.ceil() as i64,
            end: upper.floor() as i64,
        })
    }
}

/// Builder for [`RiskReversal`].
///
/// `dividend_yield` defaults to `0.0`; every other field is required.
#[derive(Debug, Clone, Default)]
pub struct RiskReversalBuilder {
    spot: Option<f64>,
    strike_put: Option<f64>,
    strike_call: Option<f64>,
    pricing_date: Option<DateInput>,
    maturity_date: Option<DateInput>,
    rate: Option<f64>,
    volatility: Option<f64>,
    dividend_yield: Option<f64>,
}

impl RiskReversalBuilder {
    /// Sets the underlying level.
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the short put strike (`K1`).
    pub fn strike_put(mut self, strike_put: f64) -> Self {
        self.strike_put = Some(strike_put);
        self
    }

    /// Sets the long call strike (`K2`).
    pub fn strike_call(mut self, strike_call: f64) -> Self {
        self.strike_call = Some(strike_call);
        self
    }

    /// Sets the pricing date from a calendar date or year fraction.
    pub fn pricing_date(mut self, date: impl Into<DateInput>) -> Self {
        self.pricing_date = Some(date.into());
        self
    }

    /// Sets the maturity date from a calendar date or year fraction.
    pub fn maturity_date(mut self, date: impl Into<DateInput>) -> Self {
        self.maturity_date = Some(date.into());
        self
    }

    /// Sets the continuously compounded risk-free rate.
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the annualized volatility.
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the continuous dividend yield (defaults to zero).
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Validates the strike ordering and normalizes into a [`RiskReversal`].
    ///
    /// # Errors
    /// - [`PricingError::StrikeOrderingViolation`] unless
    ///   `strike_put < strike_call`.
    /// - [`PricingError::InvalidInput`] for missing fields or non-positive
    ///   spot/strikes.
    /// - [`PricingError::InvertedDates`] / [`PricingError::InvalidDate`]
    ///   from date resolution.
    pub fn build(self) -> Result<RiskReversal, PricingError> {
        let spot = require(self.spot, "spot")?;
        let strike_put = require(self.strike_put, "strike_put")?;
        let strike_call = require(self.strike_call, "strike_call")?;
        let pricing_date = self
            .pricing_date
            .ok_or_else(|| PricingError::InvalidInput("pricing_date is required".to_string()))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| PricingError::InvalidInput("maturity_date is required".to_string()))?;
        let rate = require(self.rate, "rate")?;
        let volatility = require(self.volatility, "volatility")?;
        let dividend_yield = self.dividend_yield.unwrap_or(0.0);

        for (name, level) in [
            ("spot", spot),
            ("strike_put", strike_put),
            ("strike_call", strike_call),
        ] {
            if level <= 0.0 {
                return Err(PricingError::InvalidInput(format!(
                    "{name} must be > 0, got {level}"
                )));
            }
        }
        if strike_put >= strike_call {
            return Err(PricingError::StrikeOrderingViolation {
                strike_put,
                strike_call,
            });
        }

        let time_to_maturity = time_to_maturity(pricing_date, maturity_date)?;

        Ok(RiskReversal {
            spot,
            strike_put,
            strike_call,
            pricing_date,
            maturity_date,
            rate,
            volatility,
            dividend_yield,
            time_to_maturity,
        })
    }
}

fn require(field: Option<f64>, name: &str) -> Result<f64, PricingError> {
    field.ok_or_else(|| PricingError::InvalidInput(format!("{name} is required")))
}

/// Finite `(spot, value)` sweep of a risk reversal, in increasing spot order.
///
/// The sweep domain is validated up front, so iteration is infallible; clone
/// the iterator to restart it.
#[derive(Debug, Clone)]
pub struct PayoffCurve {
    strategy: RiskReversal,
    next: i64,
    end: i64,
}

impl Iterator for PayoffCurve {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            return None;
        }
        let spot = self.next as f64;
        self.next += 1;

        let rr = &self.strategy;
        let t = rr.time_to_maturity;
        let call = bs_price(
            OptionType::Call,
            spot,
            rr.strike_call,
            rr.rate,
            rr.dividend_yield,
            rr.volatility,
            t,
        );
        let put = bs_price(
            OptionType::Put,
            spot,
            rr.strike_put,
            rr.rate,
            rr.dividend_yield,
            rr.volatility,
            t,
        );
        Some((spot, call - put))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PayoffCurve {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn strategy() -> RiskReversal {
        RiskReversal::builder()
            .spot(100.0)
            .strike_put(90.0)
            .strike_call(110.0)
            .pricing_date(0.0)
            .maturity_date(1.0)
            .rate(0.05)
            .volatility(0.2)
            .build()
            .unwrap()
    }

    #[test]
    fn value_is_call_leg_minus_put_leg() {
        let rr = strategy();
        let expected = rr.call_leg().value().unwrap() - rr.put_leg().value().unwrap();
        assert_relative_eq!(rr.value().unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn legs_share_everything_but_strike_and_side() {
        let rr = strategy();
        let put = rr.put_leg();
        let call = rr.call_leg();
        assert_eq!(put.option_type, OptionType::Put);
        assert_eq!(call.option_type, OptionType::Call);
        assert_eq!(put.strike, 90.0);
        assert_eq!(call.strike, 110.0);
        assert_eq!(put.time_to_maturity(), call.time_to_maturity());
        assert_eq!(put.volatility, call.volatility);
    }

    #[test]
    fn strike_ordering_is_enforced() {
        let err = RiskReversal::builder()
            .spot(100.0)
            .strike_put(110.0)
            .strike_call(90.0)
            .pricing_date(0.0)
            .maturity_date(1.0)
            .rate(0.05)
            .volatility(0.2)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::StrikeOrderingViolation {
                strike_put: 110.0,
                strike_call: 90.0
            }
        );

        // Equal strikes are also a violation.
        let err = RiskReversal::builder()
            .spot(100.0)
            .strike_put(100.0)
            .strike_call(100.0)
            .pricing_date(0.0)
            .maturity_date(1.0)
            .rate(0.05)
            .volatility(0.2)
            .build()
            .unwrap_err();
        assert!(matches!(err, PricingError::StrikeOrderingViolation { .. }));
    }

    #[test]
    fn default_sweep_covers_81_to_121_with_41_points() {
        let curve: Vec<(f64, f64)> = strategy().payoff_curve().unwrap().collect();
        assert_eq!(curve.len(), 41);
        assert_eq!(curve.first().unwrap().0, 81.0);
        assert_eq!(curve.last().unwrap().0, 121.0);
        for w in curve.windows(2) {
            assert!(w[1].0 > w[0].0, "spots must strictly increase");
        }
    }

    #[test]
    fn sweep_values_match_revalued_strategy() {
        let rr = strategy();
        for (spot, value) in rr.payoff_curve().unwrap() {
            let expected = rr.with_spot(spot).value().unwrap();
            assert_relative_eq!(value, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn sweep_crosses_from_negative_to_positive() {
        let curve: Vec<(f64, f64)> = strategy().payoff_curve().unwrap().collect();
        assert!(curve.first().unwrap().1 < 0.0);
        assert!(curve.last().unwrap().1 > 0.0);
    }

    #[test]
    fn empty_range_is_rejected() {
        let err = strategy().payoff_curve_between(120.0, 80.0).unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidRange {
                lower: 120.0,
                upper: 80.0
            }
        );
    }

    #[test]
    fn degenerate_strategy_fails_before_iteration() {
        let rr = RiskReversal::builder()
            .spot(100.0)
            .strike_put(90.0)
            .strike_call(110.0)
            .pricing_date(1.0)
            .maturity_date(1.0)
            .rate(0.05)
            .volatility(0.2)
            .build()
            .unwrap();
        assert!(matches!(
            rr.payoff_curve(),
            Err(PricingError::DegenerateContract { .. })
        ));
        assert!(matches!(
            rr.value(),
            Err(PricingError::DegenerateContract { .. })
        ));
    }

    #[test]
    fn curve_is_exact_size_and_restartable() {
        let curve = strategy().payoff_curve_between(95.0, 105.0).unwrap();
        assert_eq!(curve.len(), 11);
        let restarted = curve.clone();
        assert_eq!(curve.count(), restarted.count());
    }
}
