use num_traits::Zero;

/// Trait for the sample types a plane can hold.
///
/// Filtering happens in `i32`, so a sample must widen losslessly and be
/// rebuilt from a value already clamped to its bit depth.
pub trait Pixel: Copy + Default + Zero + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Bit depth assumed when none is given.
    const DEFAULT_BIT_DEPTH: u32;

    /// Smallest bit depth the type can carry.
    const MIN_BIT_DEPTH: u32 = 8;

    /// Largest bit depth the type can carry through the filters.
    const MAX_BIT_DEPTH: u32;

    /// Widen the sample to `i32`.
    fn to_i32(self) -> i32;

    /// Narrow a value that is already inside the valid sample range.
    fn from_clamped(val: i32) -> Self;

    /// Check that `bit_depth` can be stored in this type.
    fn supports_bit_depth(bit_depth: u32) -> bool {
        (Self::MIN_BIT_DEPTH..=Self::MAX_BIT_DEPTH).contains(&bit_depth)
    }
}

impl Pixel for u8 {
    const DEFAULT_BIT_DEPTH: u32 = 8;
    const MAX_BIT_DEPTH: u32 = 8;

    #[inline(always)]
    fn to_i32(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    fn from_clamped(val: i32) -> Self {
        val as u8
    }
}

impl Pixel for u16 {
    const DEFAULT_BIT_DEPTH: u32 = 10;
    const MAX_BIT_DEPTH: u32 = 12;

    #[inline(always)]
    fn to_i32(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    fn from_clamped(val: i32) -> Self {
        val as u16
    }
}
