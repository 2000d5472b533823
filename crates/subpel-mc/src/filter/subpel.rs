use std::ops::Range;

use crate::{
    consts::{
        FILTER_BITS, MAX_STEP_Q4, SUBPEL_BITS, SUBPEL_MASK, SUBPEL_SHIFTS, SUBPEL_TAPS, TAP_OFFSET,
        UNIT_STEP_Q4,
    },
    error::ConvolveError,
};

/// One set of fixed-point taps.
pub type SubpelKernel = [i16; SUBPEL_TAPS];

/// A read-only table of kernels, one per sub-pixel phase.
///
/// Every kernel is expected to sum to `1 << FILTER_BITS`; see
/// [`KernelTable::check_unity_gain`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelTable([SubpelKernel; SUBPEL_SHIFTS]);

impl KernelTable {
    /// Wrap a set of per-phase kernels.
    pub const fn new(kernels: [SubpelKernel; SUBPEL_SHIFTS]) -> Self {
        Self(kernels)
    }

    /// The kernel for the phase of a Q4 position.
    #[inline(always)]
    pub fn kernel(&self, pos_q4: u32) -> &SubpelKernel {
        &self.0[(pos_q4 & SUBPEL_MASK) as usize]
    }

    /// All kernels, indexed by phase.
    pub fn kernels(&self) -> &[SubpelKernel; SUBPEL_SHIFTS] {
        &self.0
    }

    /// Check that every kernel sums to `1 << FILTER_BITS`.
    ///
    /// A table without unity gain brightens or darkens flat areas.
    pub fn check_unity_gain(&self) -> Result<(), ConvolveError> {
        let unity = 1 << FILTER_BITS;
        for (phase, kernel) in self.0.iter().enumerate() {
            let sum = kernel.iter().map(|&tap| i32::from(tap)).sum::<i32>();
            if sum != unity {
                return Err(ConvolveError::InvalidKernelGain(phase, sum, unity));
            }
        }
        Ok(())
    }
}

/// Where one axis of a prediction starts and how far it moves per sample.
///
/// Bundles the kernel table with a Q4 start position and Q4 step. The integer
/// part of the position anchors the sample window; the phase picks the kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubpelFilter<'a> {
    kernels: &'a KernelTable,
    q4: u32,
    step_q4: u32,
}

impl<'a> SubpelFilter<'a> {
    /// Create a filter position.
    ///
    /// # Arguments
    ///
    /// * `kernels` - The kernel table to select from.
    /// * `q4` - The Q4 position of the first output sample.
    /// * `step_q4` - The Q4 distance between two output samples.
    ///
    /// # Errors
    ///
    /// If `step_q4` is larger than [`MAX_STEP_Q4`], an error is returned.
    pub fn new(kernels: &'a KernelTable, q4: u32, step_q4: u32) -> Result<Self, ConvolveError> {
        if step_q4 > MAX_STEP_Q4 {
            return Err(ConvolveError::StepTooLarge(step_q4, MAX_STEP_Q4));
        }
        Ok(Self {
            kernels,
            q4,
            step_q4,
        })
    }

    /// A 1:1 filter position starting at `q4`.
    pub fn unscaled(kernels: &'a KernelTable, q4: u32) -> Self {
        Self {
            kernels,
            q4,
            step_q4: UNIT_STEP_Q4,
        }
    }

    /// The kernel table.
    pub fn kernels(&self) -> &'a KernelTable {
        self.kernels
    }

    /// The Q4 start position.
    pub fn q4(&self) -> u32 {
        self.q4
    }

    /// The Q4 step.
    pub fn step_q4(&self) -> u32 {
        self.step_q4
    }

    /// The whole-sample part of the start position.
    pub fn integer_offset(&self) -> usize {
        (self.q4 >> SUBPEL_BITS) as usize
    }

    /// The sub-pixel phase of the start position.
    pub fn phase(&self) -> u32 {
        self.q4 & SUBPEL_MASK
    }

    /// Whether the filter moves one whole sample per output sample.
    pub fn is_unscaled(&self) -> bool {
        self.step_q4 == UNIT_STEP_Q4
    }

    /// Whether every output sample lands on a whole source sample, so the
    /// axis needs no filtering at all.
    pub fn is_full_pel(&self) -> bool {
        self.is_unscaled() && self.phase() == 0
    }

    /// Split off the whole-sample part of the position.
    ///
    /// Returns the integer offset and the same filter starting at the phase
    /// alone, so the convolution loops only ever track positions below one
    /// sample plus the block span.
    pub(crate) fn anchor(&self) -> (isize, Self) {
        (
            self.integer_offset() as isize,
            Self {
                q4: self.phase(),
                ..*self
            },
        )
    }

    /// Source samples, relative to the nominal origin, read to produce `len`
    /// outputs along this axis.
    ///
    /// Includes the `TAP_OFFSET` samples read before the first position and
    /// the taps after the last one.
    pub fn footprint(&self, len: usize) -> Range<isize> {
        if len == 0 {
            return 0..0;
        }
        let last = (u64::from(self.q4) + (len as u64 - 1) * u64::from(self.step_q4))
            >> SUBPEL_BITS;
        let start = self.integer_offset() as isize - TAP_OFFSET as isize;
        let end = last as isize + (SUBPEL_TAPS - TAP_OFFSET) as isize;
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::kernels;

    #[test]
    fn test_standard_tables_have_unity_gain() -> Result<(), ConvolveError> {
        kernels::REGULAR.check_unity_gain()?;
        kernels::SHARP.check_unity_gain()?;
        kernels::SMOOTH.check_unity_gain()?;
        kernels::BILINEAR.check_unity_gain()?;
        Ok(())
    }

    #[test]
    fn test_unity_gain_rejects_bad_kernel() {
        let mut taps = *kernels::REGULAR.kernels();
        taps[5][3] += 1;
        let table = KernelTable::new(taps);
        assert_eq!(
            table.check_unity_gain(),
            Err(ConvolveError::InvalidKernelGain(5, 129, 128))
        );
    }

    #[test]
    fn test_kernel_selects_phase() {
        let table = kernels::REGULAR;
        assert_eq!(table.kernel(0), &[0, 0, 0, 128, 0, 0, 0, 0]);
        assert_eq!(table.kernel(8), table.kernel(24));
        assert_eq!(table.kernel(8), &[-1, 6, -19, 78, 78, -19, 6, -1]);
    }

    #[test]
    fn test_filter_step_limit() {
        let table = kernels::REGULAR;
        assert!(SubpelFilter::new(&table, 0, MAX_STEP_Q4).is_ok());
        assert_eq!(
            SubpelFilter::new(&table, 0, MAX_STEP_Q4 + 1).err(),
            Some(ConvolveError::StepTooLarge(MAX_STEP_Q4 + 1, MAX_STEP_Q4))
        );
    }

    #[test]
    fn test_filter_anchor() {
        let table = kernels::REGULAR;
        let filter = SubpelFilter::unscaled(&table, 2 * 16 + 5);
        assert_eq!(filter.integer_offset(), 2);
        assert_eq!(filter.phase(), 5);
        assert!(!filter.is_full_pel());

        let (offset, anchored) = filter.anchor();
        assert_eq!(offset, 2);
        assert_eq!(anchored.q4(), 5);
        assert_eq!(anchored.step_q4(), 16);

        assert!(SubpelFilter::unscaled(&table, 48).is_full_pel());
    }

    #[test]
    fn test_footprint() -> Result<(), ConvolveError> {
        let table = kernels::REGULAR;

        // 4 unscaled outputs at phase 0 read samples -3..=3+3+4
        assert_eq!(SubpelFilter::unscaled(&table, 0).footprint(4), -3..8);
        // the integer part moves the window, not its extent
        assert_eq!(SubpelFilter::unscaled(&table, 32 + 7).footprint(4), -1..10);
        // scaled by 2: last position is 3 * 32 = 96 -> sample 6
        assert_eq!(SubpelFilter::new(&table, 0, 32)?.footprint(4), -3..11);
        assert_eq!(SubpelFilter::unscaled(&table, 0).footprint(0), 0..0);
        Ok(())
    }
}
