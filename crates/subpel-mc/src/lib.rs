#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
/// fixed-point constants shared by the filters.
pub mod consts;

/// the one- and two-pass convolution entry points.
pub mod convolve;

/// error types for the convolution module.
pub mod error;

/// sub-pixel kernel tables and per-axis filter positions.
pub mod filter;

/// prediction path selection on top of the convolution entry points.
pub mod predict;

pub use crate::error::ConvolveError;
