use subpel_image::{Pixel, PlaneView, PlaneViewMut};

use crate::{
    convolve::{
        convolve_2d, convolve_avg, convolve_avg_2d, convolve_avg_horiz, convolve_avg_vert,
        convolve_copy, convolve_horiz, convolve_vert, ConvolveScratch,
    },
    error::ConvolveError,
    filter::SubpelFilter,
};

/// How the prediction is combined with the destination block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compose {
    /// Replace the destination samples.
    #[default]
    Overwrite,

    /// Average with the samples already in the destination, as the second
    /// reference of a compound prediction does.
    Average,
}

/// The filtering path taken for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictPath {
    /// Both axes land on whole samples; no filtering.
    Copy,

    /// Only the horizontal axis is filtered.
    Horizontal,

    /// Only the vertical axis is filtered.
    Vertical,

    /// Both axes are filtered through the intermediate buffer.
    TwoDimensional,
}

impl PredictPath {
    /// Pick the cheapest path for a pair of filter positions.
    ///
    /// An axis needs no filtering when it is unscaled and starts on a whole
    /// sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use subpel_mc::filter::{kernels, SubpelFilter};
    /// use subpel_mc::predict::PredictPath;
    ///
    /// let full = SubpelFilter::unscaled(&kernels::REGULAR, 32);
    /// let half = SubpelFilter::unscaled(&kernels::REGULAR, 8);
    ///
    /// assert_eq!(PredictPath::select(&full, &full), PredictPath::Copy);
    /// assert_eq!(PredictPath::select(&half, &full), PredictPath::Horizontal);
    /// assert_eq!(PredictPath::select(&full, &half), PredictPath::Vertical);
    /// assert_eq!(PredictPath::select(&half, &half), PredictPath::TwoDimensional);
    /// ```
    pub fn select(x_filter: &SubpelFilter<'_>, y_filter: &SubpelFilter<'_>) -> Self {
        match (x_filter.is_full_pel(), y_filter.is_full_pel()) {
            (true, true) => Self::Copy,
            (false, true) => Self::Horizontal,
            (true, false) => Self::Vertical,
            (false, false) => Self::TwoDimensional,
        }
    }
}

/// Predict a block from a reference plane.
///
/// Selects a [`PredictPath`] from the two filters and runs the matching
/// convolution. An axis that is not filtered still moves the source by its
/// whole-sample offset.
///
/// # Arguments
///
/// * `src` - The reference plane, with its origin at the block's co-located sample.
/// * `dst` - The destination block.
/// * `x_filter` - The horizontal kernels, start position and step.
/// * `y_filter` - The vertical kernels, start position and step.
/// * `compose` - Whether to overwrite or average into `dst`.
/// * `scratch` - Working memory for the two-dimensional path.
///
/// # Returns
///
/// The path that produced the block.
///
/// # Errors
///
/// If the block is too large or the source does not cover the tap footprint,
/// an error is returned and `dst` is left untouched.
pub fn predict_block<T: Pixel>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    x_filter: &SubpelFilter<'_>,
    y_filter: &SubpelFilter<'_>,
    compose: Compose,
    scratch: &mut ConvolveScratch<T>,
) -> Result<PredictPath, ConvolveError> {
    let path = PredictPath::select(x_filter, y_filter);
    log::trace!(
        "predict {}x{} block: x_q4={} x_step={} y_q4={} y_step={} path={:?} compose={:?}",
        dst.width(),
        dst.height(),
        x_filter.q4(),
        x_filter.step_q4(),
        y_filter.q4(),
        y_filter.step_q4(),
        path,
        compose
    );

    let x_offset = x_filter.integer_offset() as isize;
    let y_offset = y_filter.integer_offset() as isize;
    match (path, compose) {
        (PredictPath::Copy, Compose::Overwrite) => {
            convolve_copy(&src.shifted(x_offset, y_offset)?, dst)?
        }
        (PredictPath::Copy, Compose::Average) => {
            convolve_avg(&src.shifted(x_offset, y_offset)?, dst)?
        }
        (PredictPath::Horizontal, Compose::Overwrite) => {
            convolve_horiz(&src.shifted(0, y_offset)?, dst, x_filter)?
        }
        (PredictPath::Horizontal, Compose::Average) => {
            convolve_avg_horiz(&src.shifted(0, y_offset)?, dst, x_filter)?
        }
        (PredictPath::Vertical, Compose::Overwrite) => {
            convolve_vert(&src.shifted(x_offset, 0)?, dst, y_filter)?
        }
        (PredictPath::Vertical, Compose::Average) => {
            convolve_avg_vert(&src.shifted(x_offset, 0)?, dst, y_filter)?
        }
        (PredictPath::TwoDimensional, Compose::Overwrite) => {
            convolve_2d(src, dst, x_filter, y_filter, scratch)?
        }
        (PredictPath::TwoDimensional, Compose::Average) => {
            convolve_avg_2d(src, dst, x_filter, y_filter, scratch)?
        }
    }
    Ok(path)
}
