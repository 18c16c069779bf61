//! Contract definitions: the normalized vanilla option and the two-leg
//! risk-reversal strategy built from it.

pub mod risk_reversal;
pub mod vanilla;

pub use risk_reversal::{PayoffCurve, RiskReversal, RiskReversalBuilder};
pub use vanilla::{ContractBuilder, VanillaContract};
