#![deny(missing_docs)]
//! Pixel plane types and strided views for motion-compensated prediction

/// Error types for the plane module.
pub mod error;

/// Sample types that can be stored in a plane.
pub mod pixel;

/// Owned planes and borrowed views over them.
pub mod plane;

pub use crate::error::PlaneError;
pub use crate::pixel::Pixel;
pub use crate::plane::{Plane, PlaneSize, PlaneView, PlaneViewMut, Window};
