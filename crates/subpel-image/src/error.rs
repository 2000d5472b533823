/// An error type for the plane module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PlaneError {
    /// Error when the row stride is smaller than the row width.
    #[error("Stride ({0}) must be at least the plane width ({1})")]
    InvalidStride(usize, usize),

    /// Error when the data length does not cover the plane.
    #[error("Data length ({0}) is smaller than the required length ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when an origin falls outside the underlying data.
    #[error("Origin ({0}, {1}) is outside the plane data")]
    OriginOutOfBounds(isize, isize),

    /// Error when a filter footprint reaches outside the underlying data.
    #[error("Window cols {cols:?} rows {rows:?} reaches outside the plane data")]
    WindowOutOfBounds {
        /// Column range relative to the view origin.
        cols: std::ops::Range<isize>,
        /// Row range relative to the view origin.
        rows: std::ops::Range<isize>,
    },

    /// Error when the bit depth is not supported by the sample type.
    #[error("Bit depth {0} is not supported, expected {1}..={2}")]
    UnsupportedBitDepth(u32, u32, u32),
}
