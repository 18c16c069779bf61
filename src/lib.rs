//! ironvol is a small quantitative-finance library for European vanilla
//! options under the Black-Scholes-Merton model: closed-form prices, the five
//! standard greeks, implied-volatility inversion from a market quote, and
//! present-value payoff curves for a risk-reversal strategy.
//!
//! Contracts are normalized exactly once at construction: date inputs
//! (calendar dates or year fractions) are resolved into a time-to-maturity,
//! the call/put tag is canonicalized, and invalid orderings are rejected with
//! typed errors. Every pricing operation after that is a pure function of the
//! immutable contract.
//!
//! References: Hull, *Options, Futures, and Other Derivatives* (11th ed.),
//! Ch. 13 and 19 for the closed forms and greek sign conventions.
//!
//! # Quick Start
//! Price a Black-Scholes call and read its greeks:
//! ```rust
//! use ironvol::core::OptionType;
//! use ironvol::instruments::VanillaContract;
//!
//! let call = VanillaContract::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .pricing_date(0.0)
//!     .maturity_date(1.0)
//!     .rate(0.05)
//!     .volatility(0.20)
//!     .dividend_yield(0.0)
//!     .option_type(OptionType::Call)
//!     .build()
//!     .unwrap();
//!
//! let px = call.value().unwrap();
//! assert!(px > 10.0 && px < 11.0);
//!
//! let greeks = call.greeks().unwrap();
//! assert!(greeks.delta > 0.0 && greeks.gamma > 0.0 && greeks.vega > 0.0);
//! ```
//!
//! Invert implied volatility:
//! ```rust
//! use ironvol::core::OptionType;
//! use ironvol::instruments::VanillaContract;
//! use ironvol::vol::DEFAULT_VOL_GUESS;
//!
//! let call = VanillaContract::builder()
//!     .spot(100.0)
//!     .strike(105.0)
//!     .pricing_date(0.0)
//!     .maturity_date(1.0)
//!     .rate(0.02)
//!     .volatility(0.25)
//!     .dividend_yield(0.0)
//!     .option_type(OptionType::Call)
//!     .build()
//!     .unwrap();
//!
//! let market = call.value().unwrap();
//! let iv = call.implied_volatility(market, DEFAULT_VOL_GUESS).unwrap();
//! assert!((iv - 0.25).abs() < 1.0e-6);
//! ```
//!
//! Sweep a risk-reversal payoff curve:
//! ```rust
//! use ironvol::instruments::RiskReversal;
//!
//! let rr = RiskReversal::builder()
//!     .spot(100.0)
//!     .strike_put(90.0)
//!     .strike_call(110.0)
//!     .pricing_date(0.0)
//!     .maturity_date(1.0)
//!     .rate(0.05)
//!     .volatility(0.20)
//!     .dividend_yield(0.0)
//!     .build()
//!     .unwrap();
//!
//! let curve: Vec<(f64, f64)> = rr.payoff_curve().unwrap().collect();
//! assert_eq!(curve.len(), 41);
//! ```

pub mod core;
pub mod dates;
pub mod instruments;
pub mod market;
pub mod math;
pub mod pricing;
pub mod vol;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::{Greeks, OptionType, PricingError};
    pub use crate::dates::DateInput;
    pub use crate::instruments::{PayoffCurve, RiskReversal, VanillaContract};
    pub use crate::market::{OptionQuote, QuoteImpliedVol};
    pub use crate::vol::DEFAULT_VOL_GUESS;
}
