//! Canonical European vanilla contract, normalized once at construction.
//!
//! [`VanillaContract`] resolves its date inputs into a time-to-maturity,
//! canonicalizes the call/put tag, and rejects inverted dates and
//! non-positive levels when it is built. After that it is an immutable value:
//! every pricing, greek, and implied-vol operation is a pure function of it,
//! and the implied-vol search works on cheap [`with_volatility`] copies
//! rather than mutating the caller's contract.
//!
//! [`with_volatility`]: VanillaContract::with_volatility

use crate::core::{Greeks, OptionType, PricingError};
use crate::dates::{time_to_maturity, DateInput};
use crate::{pricing, vol};

/// Normalized European vanilla option contract.
///
/// Construct through [`VanillaContract::builder`]; the builder performs the
/// one-time normalization, so an existing contract is always safe to price.
///
/// # Examples
/// ```
/// use ironvol::core::OptionType;
/// use ironvol::instruments::VanillaContract;
///
/// use ironvol::dates::DateInput;
///
/// let put = VanillaContract::builder()
///     .spot(2059.74)
///     .strike(2000.0)
///     .pricing_date("03/31/2016".parse::<DateInput>().unwrap())
///     .maturity_date("06/30/2016".parse::<DateInput>().unwrap())
///     .rate(0.0059)
///     .volatility(0.15)
///     .dividend_yield(0.0217)
///     .option_type_tag("p")
///     .build()
///     .unwrap();
/// assert!(put.time_to_maturity() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaContract {
    /// Underlying level at the pricing date.
    pub spot: f64,
    /// Strike level.
    pub strike: f64,
    /// Pricing date (calendar date or year fraction).
    pub pricing_date: DateInput,
    /// Maturity date, same representation as the pricing date.
    pub maturity_date: DateInput,
    /// Continuously compounded risk-free rate, decimal fraction.
    pub rate: f64,
    /// Annualized volatility, decimal fraction.
    pub volatility: f64,
    /// Continuously compounded dividend yield, decimal fraction.
    pub dividend_yield: f64,
    /// Call or put.
    pub option_type: OptionType,
    pub(crate) time_to_maturity: f64,
}

impl VanillaContract {
    /// Starts a contract builder.
    pub fn builder() -> ContractBuilder {
        ContractBuilder::default()
    }

    /// Time to maturity in years, derived once at construction.
    #[inline]
    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    /// Copy of this contract with only the volatility replaced.
    ///
    /// The derived time-to-maturity is carried over unchanged, so repeated
    /// calls (as in the implied-vol search) stay cheap and never re-touch
    /// the date inputs.
    #[must_use]
    pub fn with_volatility(&self, volatility: f64) -> Self {
        Self { volatility, ..*self }
    }

    /// Present value. See [`pricing::value`].
    pub fn value(&self) -> Result<f64, PricingError> {
        pricing::value(self)
    }

    /// The `(d1, d2)` pair. See [`pricing::d1_d2`].
    pub fn d1_d2(&self) -> Result<(f64, f64), PricingError> {
        pricing::d1_d2(self)
    }

    /// Delta. See [`pricing::delta`].
    pub fn delta(&self) -> Result<f64, PricingError> {
        pricing::delta(self)
    }

    /// Gamma. See [`pricing::gamma`].
    pub fn gamma(&self) -> Result<f64, PricingError> {
        pricing::gamma(self)
    }

    /// Vega. See [`pricing::vega`].
    pub fn vega(&self) -> Result<f64, PricingError> {
        pricing::vega(self)
    }

    /// Theta. See [`pricing::theta`].
    pub fn theta(&self) -> Result<f64, PricingError> {
        pricing::theta(self)
    }

    /// Rho. See [`pricing::rho`].
    pub fn rho(&self) -> Result<f64, PricingError> {
        pricing::rho(self)
    }

    /// All five greeks in one pass. See [`pricing::greeks`].
    pub fn greeks(&self) -> Result<Greeks, PricingError> {
        pricing::greeks(self)
    }

    /// Volatility implied by an observed market price, seeded at
    /// `initial_guess`. See [`vol::implied_vol`].
    pub fn implied_volatility(
        &self,
        market_price: f64,
        initial_guess: f64,
    ) -> Result<f64, PricingError> {
        vol::implied_vol(self, market_price, initial_guess)
    }
}

/// Builder for [`VanillaContract`]; performs the one-time normalization.
///
/// `dividend_yield` defaults to `0.0`; every other field is required.
#[derive(Debug, Clone, Default)]
pub struct ContractBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    pricing_date: Option<DateInput>,
    maturity_date: Option<DateInput>,
    rate: Option<f64>,
    volatility: Option<f64>,
    dividend_yield: Option<f64>,
    option_type: Option<OptionType>,
    option_type_tag: Option<String>,
}

impl ContractBuilder {
    /// Sets the underlying level.
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike level.
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
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

    /// Sets the option side.
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type);
        self
    }

    /// Sets the option side from a market tag (`call`/`c`/`put`/`p`, any
    /// case), canonicalized at [`build`](Self::build).
    pub fn option_type_tag(mut self, tag: impl Into<String>) -> Self {
        self.option_type_tag = Some(tag.into());
        self
    }

    /// Normalizes the inputs into an immutable [`VanillaContract`].
    ///
    /// # Errors
    /// - [`PricingError::InvalidInput`] for missing fields or non-positive
    ///   spot/strike.
    /// - [`PricingError::InvalidOptionType`] for an unrecognized tag.
    /// - [`PricingError::InvertedDates`] / [`PricingError::InvalidDate`]
    ///   from date resolution.
    pub fn build(self) -> Result<VanillaContract, PricingError> {
        let spot = require(self.spot, "spot")?;
        let strike = require(self.strike, "strike")?;
        let pricing_date = self
            .pricing_date
            .ok_or_else(|| PricingError::InvalidInput("pricing_date is required".to_string()))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| PricingError::InvalidInput("maturity_date is required".to_string()))?;
        let rate = require(self.rate, "rate")?;
        let volatility = require(self.volatility, "volatility")?;
        let dividend_yield = self.dividend_yield.unwrap_or(0.0);

        let option_type = match (self.option_type, self.option_type_tag) {
            (Some(option_type), _) => option_type,
            (None, Some(tag)) => tag.parse()?,
            (None, None) => {
                return Err(PricingError::InvalidInput(
                    "option_type is required".to_string(),
                ));
            }
        };

        if spot <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "spot must be > 0, got {spot}"
            )));
        }
        if strike <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "strike must be > 0, got {strike}"
            )));
        }

        let time_to_maturity = time_to_maturity(pricing_date, maturity_date)?;

        Ok(VanillaContract {
            spot,
            strike,
            pricing_date,
            maturity_date,
            rate,
            volatility,
            dividend_yield,
            option_type,
            time_to_maturity,
        })
    }
}

fn require(field: Option<f64>, name: &str) -> Result<f64, PricingError> {
    field.ok_or_else(|| PricingError::InvalidInput(format!("{name} is required")))
}
