//! Black-Scholes-Merton closed forms and analytic greeks.

pub mod european;

pub use european::{
    bs_delta, bs_gamma, bs_price, bs_rho, bs_theta, bs_vega, d1_d2, delta, gamma, greeks, rho,
    theta, value, vega,
};
