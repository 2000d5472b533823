//! Filter tables
//!
//! Kernel tables indexed by sub-pixel phase and the per-axis position a
//! convolution walks through them with.

/// Standard 8-tap kernel tables
pub mod kernels;

/// Kernel table and per-axis filter position
mod subpel;
pub use subpel::*;
