/// Errors that can occur while building a prediction.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConvolveError {
    /// Error related to the source or destination plane.
    #[error(transparent)]
    PlaneError(#[from] subpel_image::PlaneError),

    /// The destination block is larger than the supported maximum.
    #[error("Block size {0}x{1} exceeds the maximum of {2}x{2}")]
    BlockTooLarge(usize, usize, usize),

    /// The step exceeds the largest supported scale ratio.
    #[error("Step {0} exceeds the maximum of {1}")]
    StepTooLarge(u32, u32),

    /// A kernel in the table does not have unity gain.
    #[error("Kernel at phase {0} sums to {1}, expected {2}")]
    InvalidKernelGain(usize, i32, i32),
}
