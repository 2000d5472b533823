use subpel_image::Pixel;

use crate::consts::{MAX_BLOCK_SIZE, MAX_INTERMEDIATE_HEIGHT};

/// Fixed-capacity working memory for the two-pass filters.
///
/// Holds the intermediate rows of the horizontal pass, sized for the largest
/// block at the largest step, and one block for the averaging variant. Both
/// use a row stride of [`MAX_BLOCK_SIZE`]. Allocate it once per thread and
/// reuse it across calls to keep the prediction loop allocation free.
#[derive(Clone, Debug)]
pub struct ConvolveScratch<T> {
    intermediate: Box<[T]>,
    block: Box<[T]>,
}

impl<T: Pixel> ConvolveScratch<T> {
    /// Samples held by the intermediate buffer.
    pub const INTERMEDIATE_LEN: usize = MAX_BLOCK_SIZE * MAX_INTERMEDIATE_HEIGHT;

    /// Samples held by the averaging block.
    pub const BLOCK_LEN: usize = MAX_BLOCK_SIZE * MAX_BLOCK_SIZE;

    /// Allocate the scratch buffers.
    pub fn new() -> Self {
        Self {
            intermediate: vec![T::zero(); Self::INTERMEDIATE_LEN].into_boxed_slice(),
            block: vec![T::zero(); Self::BLOCK_LEN].into_boxed_slice(),
        }
    }

    /// The first `rows` rows of the intermediate buffer.
    pub(crate) fn intermediate_mut(&mut self, rows: usize) -> &mut [T] {
        debug_assert!(rows <= MAX_INTERMEDIATE_HEIGHT);
        &mut self.intermediate[..rows * MAX_BLOCK_SIZE]
    }

    /// The first `rows` rows of the intermediate buffer and the whole block.
    pub(crate) fn split_mut(&mut self, rows: usize) -> (&mut [T], &mut [T]) {
        debug_assert!(rows <= MAX_INTERMEDIATE_HEIGHT);
        (
            &mut self.intermediate[..rows * MAX_BLOCK_SIZE],
            &mut self.block[..],
        )
    }
}

impl<T: Pixel> Default for ConvolveScratch<T> {
    fn default() -> Self {
        Self::new()
    }
}
