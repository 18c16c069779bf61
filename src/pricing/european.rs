//! European vanilla pricing under Black-Scholes-Merton with a continuous
//! dividend yield.
//!
//! Two layers. The `bs_*` kernels are pure `f64` functions in Black-Scholes
//! notation that never emit NaN: expired or zero-vol inputs collapse to
//! discounted intrinsic value. The contract-level operations (`value`,
//! `delta`, ..., [`greeks`]) operate on a normalized [`VanillaContract`] and
//! fail fast with [`PricingError::DegenerateContract`] before the division by
//! `sigma * sqrt(T)` can happen, so callers always get a finite number or a
//! typed error.
//!
//! Reference: Hull (11th ed.), Ch. 13 for the closed forms and Ch. 19 for
//! the greek sign conventions.

use crate::core::{Greeks, OptionType, PricingError};
use crate::instruments::VanillaContract;
use crate::math::{normal_cdf, normal_pdf};

#[inline]
fn d1_d2_raw(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> (f64, f64) {
    let sig_sqrt_t = vol * expiry.sqrt();
    let d1 =
        ((spot / strike).ln() + (rate - dividend_yield + 0.5 * vol * vol) * expiry) / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// Black-Scholes-Merton spot-option price.
///
/// Parameters:
/// - `spot`: current underlying level.
/// - `strike`: strike price.
/// - `rate`, `dividend_yield`: continuously compounded, decimal fractions.
/// - `vol`: annualized volatility.
/// - `expiry`: time to maturity in years.
///
/// Edge cases: `expiry <= 0` returns intrinsic value and `vol <= 0` returns
/// discounted intrinsic, so the kernel itself never divides by zero.
///
/// # Examples
/// ```rust
/// use ironvol::core::OptionType;
/// use ironvol::pricing::bs_price;
///
/// let call = bs_price(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);
/// let put = bs_price(OptionType::Put, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);
/// assert!(call > put);
/// ```
#[inline]
pub fn bs_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 {
        return option_type.intrinsic(spot, strike);
    }
    let df_r = (-rate * expiry).exp();
    let df_q = (-dividend_yield * expiry).exp();
    if vol <= 0.0 {
        return match option_type {
            OptionType::Call => (spot * df_q - strike * df_r).max(0.0),
            OptionType::Put => (strike * df_r - spot * df_q).max(0.0),
        };
    }

    let (d1, d2) = d1_d2_raw(spot, strike, rate, dividend_yield, vol, expiry);
    match option_type {
        OptionType::Call => spot * df_q * normal_cdf(d1) - strike * df_r * normal_cdf(d2),
        OptionType::Put => strike * df_r * normal_cdf(-d2) - spot * df_q * normal_cdf(-d1),
    }
}

/// Spot sensitivity kernel: `e^(-qT) Φ(d1)` for calls, `e^(-qT) (Φ(d1) - 1)`
/// for puts.
#[inline]
pub fn bs_delta(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 || vol <= 0.0 {
        return 0.0;
    }
    let (d1, _) = d1_d2_raw(spot, strike, rate, dividend_yield, vol, expiry);
    let df_q = (-dividend_yield * expiry).exp();
    match option_type {
        OptionType::Call => df_q * normal_cdf(d1),
        OptionType::Put => df_q * (normal_cdf(d1) - 1.0),
    }
}

/// Second-order spot sensitivity kernel, identical for calls and puts.
#[inline]
pub fn bs_gamma(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 || vol <= 0.0 || spot <= 0.0 {
        return 0.0;
    }
    let (d1, _) = d1_d2_raw(spot, strike, rate, dividend_yield, vol, expiry);
    let df_q = (-dividend_yield * expiry).exp();
    df_q * normal_pdf(d1) / (spot * vol * expiry.sqrt())
}

/// Volatility sensitivity kernel, identical for calls and puts.
#[inline]
pub fn bs_vega(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 || vol <= 0.0 || spot <= 0.0 {
        return 0.0;
    }
    let (d1, _) = d1_d2_raw(spot, strike, rate, dividend_yield, vol, expiry);
    let df_q = (-dividend_yield * expiry).exp();
    spot * df_q * normal_pdf(d1) * expiry.sqrt()
}

/// Calendar-time sensitivity kernel.
#[inline]
pub fn bs_theta(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 || vol <= 0.0 || spot <= 0.0 {
        return 0.0;
    }
    let (d1, d2) = d1_d2_raw(spot, strike, rate, dividend_yield, vol, expiry);
    let sqrt_t = expiry.sqrt();
    let df_q = (-dividend_yield * expiry).exp();
    let df_r = (-rate * expiry).exp();
    match option_type {
        OptionType::Call => {
            -spot * df_q * normal_pdf(d1) * vol / (2.0 * sqrt_t)
                + dividend_yield * spot * df_q * normal_cdf(d1)
                - rate * strike * df_r * normal_cdf(d2)
        }
        OptionType::Put => {
            -spot * df_q * normal_pdf(d1) * vol / (2.0 * sqrt_t)
                - dividend_yield * spot * df_q * normal_cdf(-d1)
                + rate * strike * df_r * normal_cdf(-d2)
        }
    }
}

/// Rate sensitivity kernel: `K T e^(-rT) Φ(d2)` for calls, negated with
/// `Φ(-d2)` for puts.
#[inline]
pub fn bs_rho(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 || vol <= 0.0 || spot <= 0.0 {
        return 0.0;
    }
    let (_, d2) = d1_d2_raw(spot, strike, rate, dividend_yield, vol, expiry);
    let df_r = (-rate * expiry).exp();
    match option_type {
        OptionType::Call => strike * expiry * df_r * normal_cdf(d2),
        OptionType::Put => -strike * expiry * df_r * normal_cdf(-d2),
    }
}

/// Rejects contracts whose formulas would divide by `sigma * sqrt(T)`.
fn reject_degenerate(contract: &VanillaContract) -> Result<(), PricingError> {
    let t = contract.time_to_maturity();
    if t <= 0.0 {
        return Err(PricingError::DegenerateContract {
            field: "time_to_maturity",
            value: t,
        });
    }
    if contract.volatility <= 0.0 {
        return Err(PricingError::DegenerateContract {
            field: "volatility",
            value: contract.volatility,
        });
    }
    Ok(())
}

/// The `(d1, d2)` pair for a normalized contract.
///
/// # Errors
/// [`PricingError::DegenerateContract`] when `T <= 0` or `sigma <= 0`.
pub fn d1_d2(contract: &VanillaContract) -> Result<(f64, f64), PricingError> {
    reject_degenerate(contract)?;
    Ok(d1_d2_raw(
        contract.spot,
        contract.strike,
        contract.rate,
        contract.dividend_yield,
        contract.volatility,
        contract.time_to_maturity(),
    ))
}

/// Present value of a normalized contract.
///
/// # Errors
/// [`PricingError::DegenerateContract`] when `T <= 0` or `sigma <= 0`.
pub fn value(contract: &VanillaContract) -> Result<f64, PricingError> {
    reject_degenerate(contract)?;
    Ok(bs_price(
        contract.option_type,
        contract.spot,
        contract.strike,
        contract.rate,
        contract.dividend_yield,
        contract.volatility,
        contract.time_to_maturity(),
    ))
}

/// Delta of a normalized contract.
pub fn delta(contract: &VanillaContract) -> Result<f64, PricingError> {
    reject_degenerate(contract)?;
    Ok(bs_delta(
        contract.option_type,
        contract.spot,
        contract.strike,
        contract.rate,
        contract.dividend_yield,
        contract.volatility,
        contract.time_to_maturity(),
    ))
}

/// Gamma of a normalized contract (identical for calls and puts).
pub fn gamma(contract: &VanillaContract) -> Result<f64, PricingError> {
    reject_degenerate(contract)?;
    Ok(bs_gamma(
        contract.spot,
        contract.strike,
        contract.rate,
        contract.dividend_yield,
        contract.volatility,
        contract.time_to_maturity(),
    ))
}

/// Vega of a normalized contract (identical for calls and puts).
pub fn vega(contract: &VanillaContract) -> Result<f64, PricingError> {
    reject_degenerate(contract)?;
    Ok(bs_vega(
        contract.spot,
        contract.strike,
        contract.rate,
        contract.dividend_yield,
        contract.volatility,
        contract.time_to_maturity(),
    ))
}

/// Theta of a normalized contract.
pub fn theta(contract: &VanillaContract) -> Result<f64, PricingError> {
    reject_degenerate(contract)?;
    Ok(bs_theta(
        contract.option_type,
        contract.spot,
        contract.strike,
        contract.rate,
        contract.dividend_yield,
        contract.volatility,
        contract.time_to_maturity(),
    ))
}

/// Rho of a normalized contract.
pub fn rho(contract: &VanillaContract) -> Result<f64, PricingError> {
    reject_degenerate(contract)?;
    Ok(bs_rho(
        contract.option_type,
        contract.spot,
        contract.strike,
        contract.rate,
        contract.dividend_yield,
        contract.volatility,
        contract.time_to_maturity(),
    ))
}

/// All five greeks of a normalized contract in one pass.
///
/// # Errors
/// [`PricingError::DegenerateContract`] when `T <= 0` or `sigma <= 0`.
pub fn greeks(contract: &VanillaContract) -> Result<Greeks, PricingError> {
    reject_degenerate(contract)?;
    let (ot, s, k, r, q, v, t) = (
        contract.option_type,
        contract.spot,
        contract.strike,
        contract.rate,
        contract.dividend_yield,
        contract.volatility,
        contract.time_to_maturity(),
    );
    Ok(Greeks {
        delta: bs_delta(ot, s, k, r, q, v, t),
        gamma: bs_gamma(s, k, r, q, v, t),
        vega: bs_vega(s, k, r, q, v, t),
        theta: bs_theta(ot, s, k, r, q, v, t),
        rho: bs_rho(ot, s, k, r, q, v, t),
    })
}
