//! Utility functions for the snapshot pipeline.
//!
//! - [`conversion`] - Raw U256 share arithmetic and decimal normalization
//! - [`float`] - NaN handling for derived ratios and CSV output

mod conversion;
mod float;

pub use conversion::{normalize, u256_to_bigint, user_share};
pub use float::{finite_or_nan, nan_as_empty, opt_nan_as_empty};
