//! Interfaces to the quote-ingestion and plotting collaborators.

pub mod quotes;

pub use quotes::{implied_vol_for_quote, OptionQuote, QuoteImpliedVol};
