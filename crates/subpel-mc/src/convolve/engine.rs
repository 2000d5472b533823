use subpel_image::{Pixel, PlaneSize};

use crate::{
    consts::{FILTER_BITS, SUBPEL_BITS, SUBPEL_TAPS},
    filter::SubpelFilter,
};

/// Round a filter sum back to sample precision.
#[inline(always)]
fn round_filter(sum: i32) -> i32 {
    (sum + (1 << (FILTER_BITS - 1))) >> FILTER_BITS
}

/// Clamp a value into the range of `bit_depth` samples.
#[inline(always)]
pub fn clip_pixel<T: Pixel>(val: i32, bit_depth: u32) -> T {
    T::from_clamped(val.clamp(0, (1 << bit_depth) - 1))
}

/// Average two samples, rounding halves up.
///
/// # Examples
///
/// ```
/// use subpel_mc::convolve::round_avg;
///
/// assert_eq!(round_avg(10u8, 13u8), 12);
/// assert_eq!(round_avg(255u8, 255u8), 255);
/// ```
#[inline(always)]
pub fn round_avg<T: Pixel>(a: T, b: T) -> T {
    T::from_clamped((a.to_i32() + b.to_i32() + 1) >> 1)
}

#[inline(always)]
fn store<T: Pixel, const AVG: bool>(dst: &mut T, val: T) {
    *dst = if AVG { round_avg(*dst, val) } else { val };
}

/// Filter `size.height` rows horizontally.
///
/// `src` starts `TAP_OFFSET` samples left of the first nominal sample of the
/// first row, so output `x` reads `src[(x_q4 >> 4)..][..SUBPEL_TAPS]`. The
/// filter position must already be anchored to its phase.
pub(crate) fn filter_horiz<T: Pixel, const AVG: bool>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    filter: &SubpelFilter<'_>,
    size: PlaneSize,
    bit_depth: u32,
) {
    let kernels = filter.kernels();
    for y in 0..size.height {
        let src_row = &src[y * src_stride..];
        let dst_row = &mut dst[y * dst_stride..y * dst_stride + size.width];

        let mut x_q4 = filter.q4();
        for out in dst_row.iter_mut() {
            let taps = &src_row[(x_q4 >> SUBPEL_BITS) as usize..][..SUBPEL_TAPS];
            let sum = taps
                .iter()
                .zip(kernels.kernel(x_q4))
                .map(|(&s, &k)| s.to_i32() * i32::from(k))
                .sum::<i32>();
            store::<T, AVG>(out, clip_pixel(round_filter(sum), bit_depth));
            x_q4 += filter.step_q4();
        }
    }
}

/// Filter `size.width` columns vertically.
///
/// `src` starts `TAP_OFFSET` rows above the first nominal row, so output `y`
/// of column `x` reads rows `(y_q4 >> 4)..(y_q4 >> 4) + SUBPEL_TAPS`. The
/// filter position must already be anchored to its phase.
pub(crate) fn filter_vert<T: Pixel, const AVG: bool>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    filter: &SubpelFilter<'_>,
    size: PlaneSize,
    bit_depth: u32,
) {
    let kernels = filter.kernels();
    for x in 0..size.width {
        let mut y_q4 = filter.q4();
        for y in 0..size.height {
            let top = (y_q4 >> SUBPEL_BITS) as usize * src_stride + x;
            let sum = kernels
                .kernel(y_q4)
                .iter()
                .enumerate()
                .map(|(k, &tap)| src[top + k * src_stride].to_i32() * i32::from(tap))
                .sum::<i32>();
            store::<T, AVG>(
                &mut dst[y * dst_stride + x],
                clip_pixel(round_filter(sum), bit_depth),
            );
            y_q4 += filter.step_q4();
        }
    }
}

/// Blend a block into `dst` with [`round_avg`].
pub(crate) fn blend_rows<T: Pixel>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    size: PlaneSize,
) {
    for y in 0..size.height {
        let src_row = &src[y * src_stride..y * src_stride + size.width];
        let dst_row = &mut dst[y * dst_stride..y * dst_stride + size.width];
        dst_row
            .iter_mut()
            .zip(src_row)
            .for_each(|(d, &s)| *d = round_avg(*d, s));
    }
}
