use subpel_image::{Pixel, PlaneSize, PlaneView, PlaneViewMut};

use super::{
    check_block_size,
    engine::{blend_rows, filter_horiz, filter_vert},
    ConvolveScratch,
};
use crate::{
    consts::{intermediate_height, MAX_BLOCK_SIZE, MAX_INTERMEDIATE_HEIGHT, TAP_OFFSET},
    error::ConvolveError,
    filter::SubpelFilter,
};

/// Run the horizontal pass into `intermediate`, then the vertical pass from
/// it into `dst`.
#[allow(clippy::too_many_arguments)]
fn two_pass<T: Pixel>(
    src: &PlaneView<'_, T>,
    x_filter: &SubpelFilter<'_>,
    y_filter: &SubpelFilter<'_>,
    size: PlaneSize,
    bit_depth: u32,
    intermediate: &mut [T],
    dst: &mut [T],
    dst_stride: usize,
) -> Result<(), ConvolveError> {
    let (_, x_filter_anchored) = x_filter.anchor();
    let (y_offset, y_filter) = y_filter.anchor();

    let rows = intermediate_height(size.height, y_filter.step_q4());
    debug_assert!(rows <= MAX_INTERMEDIATE_HEIGHT);

    // intermediate row 0 sits TAP_OFFSET rows above the first output row
    let top = y_offset - TAP_OFFSET as isize;
    let window = src.window(x_filter.footprint(size.width), top..top + rows as isize)?;

    let intermediate = &mut intermediate[..rows * MAX_BLOCK_SIZE];
    filter_horiz::<T, false>(
        window.as_slice(),
        window.stride(),
        intermediate,
        MAX_BLOCK_SIZE,
        &x_filter_anchored,
        PlaneSize {
            width: size.width,
            height: rows,
        },
        bit_depth,
    );
    filter_vert::<T, false>(
        intermediate,
        MAX_BLOCK_SIZE,
        dst,
        dst_stride,
        &y_filter,
        size,
        bit_depth,
    );
    Ok(())
}

/// Interpolate a block with both filters.
///
/// The horizontal pass filters `intermediate_height(h, y_step)` rows,
/// starting `TAP_OFFSET` rows above the block, into the scratch buffer;
/// the vertical pass then reads them into `dst`. Intermediate samples are
/// clamped to the destination bit depth.
///
/// # Arguments
///
/// * `src` - The reference plane, with its origin at the nominal top-left sample.
/// * `dst` - The destination block; its size is the size of the prediction.
/// * `x_filter` - The horizontal kernels, start position and step.
/// * `y_filter` - The vertical kernels, start position and step.
/// * `scratch` - Working memory reused across calls.
///
/// # Examples
///
/// ```
/// use subpel_image::Plane;
/// use subpel_mc::convolve::{convolve_2d, ConvolveScratch};
/// use subpel_mc::filter::{kernels, SubpelFilter};
///
/// let src = Plane::<u8>::from_size_val([16, 16].into(), 200).unwrap();
/// let mut dst = Plane::<u8>::from_size_val([4, 4].into(), 0).unwrap();
/// let mut scratch = ConvolveScratch::new();
///
/// let x_filter = SubpelFilter::unscaled(&kernels::REGULAR, 8);
/// let y_filter = SubpelFilter::unscaled(&kernels::REGULAR, 8);
/// convolve_2d(
///     &src.view_at(3, 3).unwrap(),
///     &mut dst.view_mut(),
///     &x_filter,
///     &y_filter,
///     &mut scratch,
/// )
/// .unwrap();
///
/// assert_eq!(dst.as_slice(), &[200; 16]);
/// ```
pub fn convolve_2d<T: Pixel>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    x_filter: &SubpelFilter<'_>,
    y_filter: &SubpelFilter<'_>,
    scratch: &mut ConvolveScratch<T>,
) -> Result<(), ConvolveError> {
    let size = dst.size();
    check_block_size(size)?;
    if size.is_empty() {
        return Ok(());
    }

    let rows = intermediate_height(size.height, y_filter.step_q4());
    let (dst_stride, bit_depth) = (dst.stride(), dst.bit_depth());
    two_pass(
        src,
        x_filter,
        y_filter,
        size,
        bit_depth,
        scratch.intermediate_mut(rows),
        dst.as_slice_mut(),
        dst_stride,
    )
}

/// Interpolate a block with both filters and average it into `dst`.
///
/// The prediction is built in the scratch block first, then blended into
/// `dst` as `(old + new + 1) >> 1`.
pub fn convolve_avg_2d<T: Pixel>(
    src: &PlaneView<'_, T>,
    dst: &mut PlaneViewMut<'_, T>,
    x_filter: &SubpelFilter<'_>,
    y_filter: &SubpelFilter<'_>,
    scratch: &mut ConvolveScratch<T>,
) -> Result<(), ConvolveError> {
    let size = dst.size();
    check_block_size(size)?;
    if size.is_empty() {
        return Ok(());
    }

    let rows = intermediate_height(size.height, y_filter.step_q4());
    let (dst_stride, bit_depth) = (dst.stride(), dst.bit_depth());
    let (intermediate, block) = scratch.split_mut(rows);
    two_pass(
        src,
        x_filter,
        y_filter,
        size,
        bit_depth,
        intermediate,
        block,
        MAX_BLOCK_SIZE,
    )?;
    blend_rows(block, MAX_BLOCK_SIZE, dst.as_slice_mut(), dst_stride, size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts::MAX_STEP_Q4,
        convolve::{convolve_horiz, convolve_vert},
        filter::kernels,
    };
    use subpel_image::{Plane, PlaneError};

    fn gradient(size: PlaneSize) -> Result<Plane<u8>, PlaneError> {
        let data: Vec<u8> = (0..size.width * size.height)
            .map(|i| ((i % size.width) * 7 + (i / size.width) * 13) as u8)
            .collect();
        Plane::from_size_slice(size, &data)
    }

    #[test]
    fn test_convolve_2d_flat_4x4() -> Result<(), ConvolveError> {
        // symmetric binomial-like kernel at every phase
        let table = crate::filter::KernelTable::new([[0, 0, 16, 48, 48, 16, 0, 0]; 16]);
        table.check_unity_gain()?;

        let src = Plane::<u8>::from_size_val([12, 12].into(), 200)?;
        let mut dst = Plane::<u8>::from_size_val([4, 4].into(), 0)?;
        let mut scratch = ConvolveScratch::new();
        let filter = SubpelFilter::unscaled(&table, 6);
        convolve_2d(
            &src.view_at(3, 3)?,
            &mut dst.view_mut(),
            &filter,
            &filter,
            &mut scratch,
        )?;
        assert_eq!(dst.as_slice(), &[200; 16]);
        Ok(())
    }

    #[test]
    fn test_convolve_2d_matches_chained_passes() -> Result<(), ConvolveError> {
        let src = gradient([40, 40].into())?;
        let size = PlaneSize {
            width: 8,
            height: 6,
        };
        let x_filter = SubpelFilter::new(&kernels::SHARP, 5, 20)?;
        let y_filter = SubpelFilter::new(&kernels::SMOOTH, 11, 24)?;
        let origin = src.view_at(8, 8)?;

        let mut dst = Plane::<u8>::from_size_val(size, 0)?;
        let mut scratch = ConvolveScratch::new();
        convolve_2d(&origin, &mut dst.view_mut(), &x_filter, &y_filter, &mut scratch)?;

        // horizontal pass over the padded rows, then vertical pass from row TAP_OFFSET
        let rows = intermediate_height(size.height, y_filter.step_q4());
        let mut intermediate = Plane::<u8>::from_size_val([size.width, rows].into(), 0)?;
        convolve_horiz(
            &origin.shifted(0, -(TAP_OFFSET as isize))?,
            &mut intermediate.view_mut(),
            &x_filter,
        )?;
        let mut chained = Plane::<u8>::from_size_val(size, 0)?;
        convolve_vert(
            &intermediate.view_at(0, TAP_OFFSET)?,
            &mut chained.view_mut(),
            &y_filter,
        )?;

        assert_eq!(dst.as_slice(), chained.as_slice());
        Ok(())
    }

    #[test]
    fn test_convolve_2d_integer_rows() -> Result<(), ConvolveError> {
        // whole-sample offsets on both axes are a plain copy
        let src = gradient([32, 32].into())?;
        let mut dst = Plane::<u8>::from_size_val([4, 4].into(), 0)?;
        let mut scratch = ConvolveScratch::new();
        let x_filter = SubpelFilter::unscaled(&kernels::REGULAR, 16);
        let y_filter = SubpelFilter::unscaled(&kernels::REGULAR, 48);
        convolve_2d(
            &src.view_at(8, 8)?,
            &mut dst.view_mut(),
            &x_filter,
            &y_filter,
            &mut scratch,
        )?;
        for (r, row) in dst.rows().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                assert_eq!(Some(&v), src.get(9 + c, 11 + r));
            }
        }
        Ok(())
    }

    #[test]
    fn test_convolve_2d_worst_case_scale() -> Result<(), ConvolveError> {
        // 64x64 at the largest step reads MAX_INTERMEDIATE_HEIGHT rows
        let size = PlaneSize {
            width: MAX_BLOCK_SIZE,
            height: MAX_BLOCK_SIZE,
        };
        let src_size = PlaneSize {
            width: 64 * 5 + 16,
            height: MAX_INTERMEDIATE_HEIGHT + 8,
        };
        let src = Plane::<u8>::from_size_val(src_size, 33)?;
        let mut dst = Plane::<u8>::from_size_val(size, 0)?;
        let mut scratch = ConvolveScratch::new();
        let filter = SubpelFilter::new(&kernels::REGULAR, 15, MAX_STEP_Q4)?;
        convolve_2d(
            &src.view_at(3, 3)?,
            &mut dst.view_mut(),
            &filter,
            &filter,
            &mut scratch,
        )?;
        assert!(dst.as_slice().iter().all(|&v| v == 33));
        Ok(())
    }

    #[test]
    fn test_convolve_avg_2d() -> Result<(), ConvolveError> {
        let src = Plane::<u8>::from_size_val([16, 16].into(), 120)?;
        let mut dst = Plane::<u8>::from_size_val([6, 5].into(), 31)?;
        let mut scratch = ConvolveScratch::new();
        let x_filter = SubpelFilter::unscaled(&kernels::REGULAR, 3);
        let y_filter = SubpelFilter::unscaled(&kernels::SHARP, 13);
        convolve_avg_2d(
            &src.view_at(3, 3)?,
            &mut dst.view_mut(),
            &x_filter,
            &y_filter,
            &mut scratch,
        )?;
        assert_eq!(dst.as_slice(), &[76; 30]);
        Ok(())
    }

    #[test]
    fn test_convolve_2d_strided_destination() -> Result<(), ConvolveError> {
        let src = gradient([24, 24].into())?;
        let mut frame = Plane::<u8>::from_size_val([12, 8].into(), 255)?;
        let mut scratch = ConvolveScratch::new();
        let x_filter = SubpelFilter::unscaled(&kernels::REGULAR, 0);
        let y_filter = SubpelFilter::unscaled(&kernels::REGULAR, 0);
        convolve_2d(
            &src.view_at(4, 4)?,
            &mut frame.block_mut(2, 1, [4, 3].into())?,
            &x_filter,
            &y_filter,
            &mut scratch,
        )?;
        for row in 0..8 {
            for col in 0..12 {
                let inside = (2..6).contains(&col) && (1..4).contains(&row);
                let expected = if inside {
                    src.get(col + 2, row + 3).copied()
                } else {
                    Some(255)
                };
                assert_eq!(frame.get(col, row).copied(), expected);
            }
        }
        Ok(())
    }
}
