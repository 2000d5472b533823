//! Convolution operations
//!
//! Sub-pixel interpolation of a prediction block from a reference plane.
//!
//! Every entry point reads through a [`PlaneView`](subpel_image::PlaneView)
//! whose origin is the nominal top-left sample of the prediction and writes a
//! whole [`PlaneViewMut`](subpel_image::PlaneViewMut) block. The tap footprint
//! is checked against the borrowed data once per call; the sample loops do
//! not check plane edges, so reference planes must carry a border wide
//! enough for the taps.

/// Per-sample filtering loops
mod engine;
pub use engine::{clip_pixel, round_avg};

/// Horizontal-only and vertical-only filters
mod one_pass;
pub use one_pass::*;

/// Two-pass separable filters
mod separable;
pub use separable::*;

/// Unfiltered average and copy
mod copy;
pub use copy::*;

/// Fixed-capacity scratch memory
mod scratch;
pub use scratch::ConvolveScratch;

use subpel_image::PlaneSize;

use crate::{consts::MAX_BLOCK_SIZE, error::ConvolveError};

fn check_block_size(size: PlaneSize) -> Result<(), ConvolveError> {
    if size.width > MAX_BLOCK_SIZE || size.height > MAX_BLOCK_SIZE {
        return Err(ConvolveError::BlockTooLarge(
            size.width,
            size.height,
            MAX_BLOCK_SIZE,
        ));
    }
    Ok(())
}
