use crate::dates::DateInput;

/// Errors surfaced by normalization, pricing, and calibration.
///
/// Every failure is detected eagerly (at contract construction or before a
/// formula is evaluated) and carries the offending field values; no NaN is
/// ever propagated through the closed forms.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Unrecognized call/put tag.
    InvalidOptionType(String),
    /// Date string that matches no supported format, or a contract mixing a
    /// calendar date with a year fraction.
    InvalidDate(String),
    /// Missing or non-positive construction input.
    InvalidInput(String),
    /// Pricing date falls after the maturity date.
    InvertedDates {
        pricing: DateInput,
        maturity: DateInput,
    },
    /// Zero-or-negative time-to-maturity, volatility, or market price at
    /// formula-evaluation time.
    DegenerateContract { field: &'static str, value: f64 },
    /// Empty payoff sweep domain.
    InvalidRange { lower: f64, upper: f64 },
    /// Implied-vol search exhausted its iteration budget above tolerance.
    RootFindDidNotConverge { iterations: usize, residual: f64 },
    /// Risk reversal built with the put strike at or above the call strike.
    StrikeOrderingViolation { strike_put: f64, strike_call: f64 },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOptionType(tag) => {
                write!(f, "invalid option type `{tag}`: call/c or put/p allowed")
            }
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::InvertedDates { pricing, maturity } => write!(
                f,
                "pricing date {pricing} later than maturity {maturity}"
            ),
            Self::DegenerateContract { field, value } => write!(
                f,
                "degenerate contract: {field} = {value} must be strictly positive"
            ),
            Self::InvalidRange { lower, upper } => {
                write!(f, "empty sweep range: lower {lower} exceeds upper {upper}")
            }
            Self::RootFindDidNotConverge {
                iterations,
                residual,
            } => write!(
                f,
                "implied-vol search did not converge after {iterations} iterations (residual {residual:e})"
            ),
            Self::StrikeOrderingViolation {
                strike_put,
                strike_call,
            } => write!(
                f,
                "risk reversal requires put strike < call strike, got {strike_put} >= {strike_call}"
            ),
        }
    }
}

impl std::error::Error for PricingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_offending_values() {
        let err = PricingError::StrikeOrderingViolation {
            strike_put: 110.0,
            strike_call: 90.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("110"));
        assert!(msg.contains("90"));

        let err = PricingError::DegenerateContract {
            field: "volatility",
            value: 0.0,
        };
        assert!(err.to_string().contains("volatility"));
    }
}
