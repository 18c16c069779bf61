//! Reference scenarios exercised through the public API.

use approx::assert_relative_eq;

use ironvol::core::{OptionType, PricingError};
use ironvol::instruments::{RiskReversal, VanillaContract};
use ironvol::vol::DEFAULT_VOL_GUESS;

fn atm_contract(option_type: OptionType) -> VanillaContract {
    VanillaContract::builder()
        .spot(100.0)
        .strike(100.0)
        .pricing_date(0.0)
        .maturity_date(1.0)
        .rate(0.05)
        .volatility(0.2)
        .dividend_yield(0.0)
        .option_type(option_type)
        .build()
        .unwrap()
}

#[test]
fn scenario_1_atm_call_value() {
    let call = atm_contract(OptionType::Call);
    assert_relative_eq!(call.value().unwrap(), 10.4506, epsilon = 2e-4);
}

#[test]
fn scenario_2_atm_put_value_and_parity() {
    let call = atm_contract(OptionType::Call);
    let put = atm_contract(OptionType::Put);
    assert_relative_eq!(put.value().unwrap(), 5.5735, epsilon = 2e-4);

    // C - P = S e^{-qT} - K e^{-rT}
    let parity = 100.0 - 100.0 * (-0.05f64).exp();
    assert_relative_eq!(
        call.value().unwrap() - put.value().unwrap(),
        parity,
        max_relative = 1e-8
    );
}

#[test]
fn scenario_3_implied_vol_recovers_pricing_vol() {
    let call = atm_contract(OptionType::Call);
    let market_price = call.value().unwrap();
    let iv = call.implied_volatility(market_price, 0.3).unwrap();
    assert_relative_eq!(iv, 0.2, epsilon = 1e-6);
}

#[test]
fn scenario_4_payoff_curve_has_41_increasing_points() {
    let rr = RiskReversal::builder()
        .spot(100.0)
        .strike_put(90.0)
        .strike_call(110.0)
        .pricing_date(0.0)
        .maturity_date(1.0)
        .rate(0.05)
        .volatility(0.2)
        .dividend_yield(0.0)
        .build()
        .unwrap();

    let curve: Vec<(f64, f64)> = rr.payoff_curve().unwrap().collect();
    assert_eq!(curve.len(), 41);
    assert_eq!(curve.first().unwrap().0, 81.0);
    assert_eq!(curve.last().unwrap().0, 121.0);
    for pair in curve.windows(2) {
        assert!(pair[1].0 > pair[0].0);
    }
}

#[test]
fn calendar_dates_and_year_fractions_price_identically() {
    let from_dates = VanillaContract::builder()
        .spot(100.0)
        .strike(100.0)
        .pricing_date("01/20/2018".parse::<ironvol::dates::DateInput>().unwrap())
        .maturity_date("01/20/2019".parse::<ironvol::dates::DateInput>().unwrap())
        .rate(0.05)
        .volatility(0.2)
        .option_type_tag("c")
        .build()
        .unwrap();
    let from_fractions = atm_contract(OptionType::Call);

    assert_relative_eq!(
        from_dates.value().unwrap(),
        from_fractions.value().unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn error_taxonomy_is_typed() {
    // Unrecognized option tag.
    let err = VanillaContract::builder()
        .spot(100.0)
        .strike(100.0)
        .pricing_date(0.0)
        .maturity_date(1.0)
        .rate(0.05)
        .volatility(0.2)
        .option_type_tag("straddle")
        .build()
        .unwrap_err();
    assert!(matches!(err, PricingError::InvalidOptionType(_)));

    // Pricing date after maturity.
    let err = VanillaContract::builder()
        .spot(100.0)
        .strike(100.0)
        .pricing_date(1.5)
        .maturity_date(1.0)
        .rate(0.05)
        .volatility(0.2)
        .option_type(OptionType::Call)
        .build()
        .unwrap_err();
    assert!(matches!(err, PricingError::InvertedDates { .. }));

    // Zero time-to-maturity fails cleanly, never as NaN.
    let expired = VanillaContract::builder()
        .spot(100.0)
        .strike(100.0)
        .pricing_date(1.0)
        .maturity_date(1.0)
        .rate(0.05)
        .volatility(0.2)
        .option_type(OptionType::Call)
        .build()
        .unwrap();
    assert!(matches!(
        expired.value(),
        Err(PricingError::DegenerateContract { .. })
    ));
    assert!(matches!(
        expired.implied_volatility(10.0, DEFAULT_VOL_GUESS),
        Err(PricingError::DegenerateContract { .. })
    ));

    // Strategy strike ordering.
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
    assert!(matches!(err, PricingError::StrikeOrderingViolation { .. }));
}

#[test]
fn greeks_stay_within_model_bounds_across_surface() {
    let strikes = [80.0, 90.0, 100.0, 110.0, 120.0];
    let maturities = [7.0 / 365.0, 0.25, 0.5, 1.0];
    for &option_type in &[OptionType::Call, OptionType::Put] {
        for &strike in &strikes {
            for &t in &maturities {
                let contract = VanillaContract::builder()
                    .spot(100.0)
                    .strike(strike)
                    .pricing_date(0.0)
                    .maturity_date(t)
                    .rate(0.05)
                    .volatility(0.2)
                    .dividend_yield(0.01)
                    .option_type(option_type)
                    .build()
                    .unwrap();
                let g = contract.greeks().unwrap();
                assert!((-1.0..=1.0).contains(&g.delta));
                assert!(g.gamma >= 0.0);
                assert!(g.vega >= 0.0);
                assert!(g.delta.is_finite() && g.theta.is_finite() && g.rho.is_finite());
            }
        }
    }
}
