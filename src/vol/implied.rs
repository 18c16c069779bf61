//! Black-Scholes implied-volatility inversion.
//!
//! Newton-Raphson on analytic vega seeded at the caller's guess, with a
//! bisection fallback for the tiny-vega regimes where Newton stagnates
//! (deep ITM/OTM, short-dated). The search evaluates a pure residual closure
//! over the candidate volatility; the caller's contract is never mutated.

use crate::core::PricingError;
use crate::instruments::VanillaContract;
use crate::pricing::{bs_price, bs_vega};

/// Default solver seed when no better guess is available.
pub const DEFAULT_VOL_GUESS: f64 = 0.2;

/// Volatility search interval; candidates are clamped into it.
const MIN_VOL: f64 = 1e-6;
const MAX_VOL: f64 = 5.0;

/// Absolute price-residual target.
const PRICE_TOL: f64 = 1e-9;

const NEWTON_MAX_ITER: usize = 100;
const BISECT_MAX_ITER: usize = 200;

/// Newton stagnates below this vega; hand over to bisection.
const VEGA_FLOOR: f64 = 1e-10;

/// Volatility implied by an observed market price.
///
/// Solves `value(contract with sigma = x) = market_price` for `x`, seeded at
/// `initial_guess` (use [`DEFAULT_VOL_GUESS`] when nothing better is known).
/// For quotes within ±20% moneyness, maturities from a week to a year, and a
/// guess within an order of magnitude of the truth, the result reprices the
/// quote to well under 1e-6 absolute.
///
/// # Errors
/// - [`PricingError::DegenerateContract`] when the market price is
///   non-positive or the contract has `T <= 0`.
/// - [`PricingError::RootFindDidNotConverge`] when both the Newton and
///   bisection budgets are exhausted above tolerance (for example a price
///   outside the no-arbitrage band, which no volatility can reproduce).
///
/// # Examples
/// ```
/// use ironvol::core::OptionType;
/// use ironvol::instruments::VanillaContract;
/// use ironvol::vol::implied_vol;
///
/// let call = VanillaContract::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .pricing_date(0.0)
///     .maturity_date(1.0)
///     .rate(0.05)
///     .volatility(0.2)
///     .dividend_yield(0.0)
///     .option_type(OptionType::Call)
///     .build()
///     .unwrap();
/// let price = call.value().unwrap();
/// let iv = implied_vol(&call, price, 0.3).unwrap();
/// assert!((iv - 0.2).abs() < 1.0e-6);
/// ```
pub fn implied_vol(
    contract: &VanillaContract,
    market_price: f64,
    initial_guess: f64,
) -> Result<f64, PricingError> {
    if market_price <= 0.0 {
        return Err(PricingError::DegenerateContract {
            field: "market_price",
            value: market_price,
        });
    }
    let t = contract.time_to_maturity();
    if t <= 0.0 {
        return Err(PricingError::DegenerateContract {
            field: "time_to_maturity",
            value: t,
        });
    }

    // Pure residual over the candidate vol; the contract itself stays fixed.
    let residual = |sigma: f64| {
        bs_price(
            contract.option_type,
            contract.spot,
            contract.strike,
            contract.rate,
            contract.dividend_yield,
            sigma,
            t,
        ) - market_price
    };

    let mut iterations = 0usize;
    let mut sigma = initial_guess.clamp(MIN_VOL, MAX_VOL);
    for _ in 0..NEWTON_MAX_ITER {
        iterations += 1;
        let diff = residual(sigma);
        if diff.abs() < PRICE_TOL {
            return Ok(sigma);
        }

        let vega = bs_vega(
            contract.spot,
            contract.strike,
            contract.rate,
            contract.dividend_yield,
            sigma,
            t,
        );
        if vega.abs() < VEGA_FLOOR {
            break;
        }
        sigma = (sigma - diff / vega).clamp(MIN_VOL, MAX_VOL);
    }

    // Robust fallback: bisection on the volatility interval.
    let mut lo = MIN_VOL;
    let mut hi = MAX_VOL;
    let mut flo = residual(lo);
    let mut last_residual = f64::INFINITY;

    for _ in 0..BISECT_MAX_ITER {
        iterations += 1;
        let mid = 0.5 * (lo + hi);
        let fm = residual(mid);
        last_residual = fm;

        if fm.abs() < PRICE_TOL {
            return Ok(mid);
        }

        if flo * fm <= 0.0 {
            hi = mid;
        } else {
            lo = mid;
            flo = fm;
        }
    }

    Err(PricingError::RootFindDidNotConverge {
        iterations,
        residual: last_residual.abs(),
    })
}
