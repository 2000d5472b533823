/// Number of fractional bits in a sub-pixel position (Q4).
pub const SUBPEL_BITS: u32 = 4;

/// Number of sub-pixel phases, and so of kernels in a table.
pub const SUBPEL_SHIFTS: usize = 1 << SUBPEL_BITS;

/// Mask selecting the phase of a Q4 position.
pub const SUBPEL_MASK: u32 = (1 << SUBPEL_BITS) - 1;

/// Number of taps of every kernel.
pub const SUBPEL_TAPS: usize = 8;

/// Number of taps read before the nominal sample position.
pub const TAP_OFFSET: usize = SUBPEL_TAPS / 2 - 1;

/// Precision of the kernel coefficients; taps sum to `1 << FILTER_BITS`.
pub const FILTER_BITS: u32 = 7;

/// Step of a 1:1 (unscaled) prediction.
pub const UNIT_STEP_Q4: u32 = 1 << SUBPEL_BITS;

/// Largest block edge, in samples, any entry point accepts.
pub const MAX_BLOCK_SIZE: usize = 64;

/// Largest Q4 step; 80 allows 1/5 scaling, enough for a 5 layer spatial SVC.
pub const MAX_STEP_Q4: u32 = 80;

/// Rows of the two-pass intermediate buffer for the largest block and step.
pub const MAX_INTERMEDIATE_HEIGHT: usize = intermediate_height(MAX_BLOCK_SIZE, MAX_STEP_Q4);

/// Rows the horizontal pass must produce so the vertical pass can emit
/// `height` rows with `y_step_q4`, for any starting phase.
///
/// `ceil((height - 1) * y_step_q4 / 16) + 1 + SUBPEL_TAPS`, never less than
/// `height` itself.
pub const fn intermediate_height(height: usize, y_step_q4: u32) -> usize {
    if height == 0 {
        return 0;
    }
    let span = ((height - 1) * y_step_q4 as usize + SUBPEL_MASK as usize) >> SUBPEL_BITS;
    let rows = span + 1 + SUBPEL_TAPS;
    if rows < height {
        height
    } else {
        rows
    }
}
