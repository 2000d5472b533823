use subpel_image::{Pixel, PlaneView, PlaneViewMut};

use super::{check_block_size, engine::blend_rows};
use crate::error::ConvolveError;

/// Copy a block from `src` into `dst` without filtering.
///
/// # Arguments
///
/// * `src` - The reference plane, with its origin at the top-left sample to copy.
/// * `dst` - The destination block.
///
/// # Errors
///
/// If the block is larger than `MAX_BLOCK_SIZE` or extends past the end of
/// `src`, an error is returned and `dst` is left untouched.
pub fn convolve_copy<T: Pixel>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
) -> Result<(), ConvolveError> {
    let size = dst.size();
    check_block_size(size)?;
    if size.is_empty() {
        return Ok(());
    }

    let window = src.window(0..size.width as isize, 0..size.height as isize)?;
    let (src_stride, dst_stride) = (window.stride(), dst.stride());
    let (src, dst) = (window.as_slice(), dst.as_slice_mut());
    for y in 0..size.height {
        dst[y * dst_stride..][..size.width].copy_from_slice(&src[y * src_stride..][..size.width]);
    }
    Ok(())
}

/// Average a block from `src` into `dst` without filtering.
///
/// Each destination sample becomes `(dst + src + 1) >> 1`.
pub fn convolve_avg<T: Pixel>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
) -> Result<(), ConvolveError> {
    let size = dst.size();
    check_block_size(size)?;
    if size.is_empty() {
        return Ok(());
    }

    let window = src.window(0..size.width as isize, 0..size.height as isize)?;
    let dst_stride = dst.stride();
    blend_rows(
        window.as_slice(),
        window.stride(),
        dst.as_slice_mut(),
        dst_stride,
        size,
    );
    Ok(())
}
