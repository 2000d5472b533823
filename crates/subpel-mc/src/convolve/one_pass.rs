use subpel_image::{Pixel, PlaneView, PlaneViewMut};

use super::{
    check_block_size,
    engine::{filter_horiz, filter_vert},
};
use crate::{error::ConvolveError, filter::SubpelFilter};

fn horiz<T: Pixel, const AVG: bool>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    x_filter: &SubpelFilter<'_>,
) -> Result<(), ConvolveError> {
    let size = dst.size();
    check_block_size(size)?;
    if size.is_empty() {
        return Ok(());
    }

    let window = src.window(x_filter.footprint(size.width), 0..size.height as isize)?;
    let (_, x_filter) = x_filter.anchor();
    let (dst_stride, bit_depth) = (dst.stride(), dst.bit_depth());
    filter_horiz::<T, AVG>(
        window.as_slice(),
        window.stride(),
        dst.as_slice_mut(),
        dst_stride,
        &x_filter,
        size,
        bit_depth,
    );
    Ok(())
}

fn vert<T: Pixel, const AVG: bool>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    y_filter: &SubpelFilter<'_>,
) -> Result<(), ConvolveError> {
    let size = dst.size();
    check_block_size(size)?;
    if size.is_empty() {
        return Ok(());
    }

    let window = src.window(0..size.width as isize, y_filter.footprint(size.height))?;
    let (_, y_filter) = y_filter.anchor();
    let (dst_stride, bit_depth) = (dst.stride(), dst.bit_depth());
    filter_vert::<T, AVG>(
        window.as_slice(),
        window.stride(),
        dst.as_slice_mut(),
        dst_stride,
        &y_filter,
        size,
        bit_depth,
    );
    Ok(())
}

/// Interpolate a block with the horizontal filter only.
///
/// # Arguments
///
/// * `src` - The reference plane, with its origin at the nominal top-left sample.
/// * `dst` - The destination block; its size is the size of the prediction.
/// * `x_filter` - The horizontal kernels, start position and step.
///
/// The source must hold `TAP_OFFSET` samples left of every row and the taps
/// right of the last position; otherwise an error is returned and `dst` is
/// left untouched.
///
/// # Examples
///
/// ```
/// use subpel_image::Plane;
/// use subpel_mc::convolve::convolve_horiz;
/// use subpel_mc::filter::{kernels, SubpelFilter};
///
/// let src = Plane::<u8>::from_size_val([16, 2].into(), 90).unwrap();
/// let mut dst = Plane::<u8>::from_size_val([4, 2].into(), 0).unwrap();
///
/// let x_filter = SubpelFilter::unscaled(&kernels::REGULAR, 5);
/// convolve_horiz(&src.view_at(4, 0).unwrap(), &mut dst.view_mut(), &x_filter).unwrap();
///
/// assert!(dst.as_slice().iter().all(|&v| v == 90));
/// ```
pub fn convolve_horiz<T: Pixel>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    x_filter: &SubpelFilter<'_>,
) -> Result<(), ConvolveError> {
    horiz::<T, false>(src, dst, x_filter)
}

/// Interpolate a block horizontally and average it into `dst`.
///
/// Each filtered sample is clamped first and then combined with the sample
/// already in `dst` as `(old + new + 1) >> 1`.
pub fn convolve_avg_horiz<T: Pixel>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    x_filter: &SubpelFilter<'_>,
) -> Result<(), ConvolveError> {
    horiz::<T, true>(src, dst, x_filter)
}

/// Interpolate a block with the vertical filter only.
///
/// # Arguments
///
/// * `src` - The reference plane, with its origin at the nominal top-left sample.
/// * `dst` - The destination block; its size is the size of the prediction.
/// * `y_filter` - The vertical kernels, start position and step.
///
/// The source must hold `TAP_OFFSET` rows above the block and the taps below
/// the last position; otherwise an error is returned and `dst` is left
/// untouched.
pub fn convolve_vert<T: Pixel>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    y_filter: &SubpelFilter<'_>,
) -> Result<(), ConvolveError> {
    vert::<T, false>(src, dst, y_filter)
}

/// Interpolate a block vertically and average it into `dst`.
pub fn convolve_avg_vert<T: Pixel>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    y_filter: &SubpelFilter<'_>,
) -> Result<(), ConvolveError> {
    vert::<T, true>(src, dst, y_filter)
}
