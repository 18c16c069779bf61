//! Core domain types and the library-wide error structure.

pub mod error;
pub mod types;

pub use error::PricingError;
pub use types::{Greeks, OptionType};
