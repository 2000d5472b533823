use std::ops::Range;

use crate::{error::PlaneError, pixel::Pixel};

/// Plane size in samples
///
/// # Examples
///
/// ```
/// use subpel_image::PlaneSize;
///
/// let size = PlaneSize {
///   width: 16,
///   height: 8,
/// };
///
/// assert_eq!(size.width, 16);
/// assert_eq!(size.height, 8);
/// assert_eq!(size.required_len(32), 7 * 32 + 16);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaneSize {
    /// Width of the plane in samples
    pub width: usize,
    /// Height of the plane in samples
    pub height: usize,
}

impl PlaneSize {
    /// Number of samples a strided buffer must hold to cover this size.
    ///
    /// The last row only needs `width` samples, not a full stride.
    pub fn required_len(&self, stride: usize) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.height - 1) * stride + self.width
        }
    }

    /// Whether the size holds no samples.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for PlaneSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "PlaneSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for PlaneSize {
    fn from(size: [usize; 2]) -> Self {
        PlaneSize {
            width: size[0],
            height: size[1],
        }
    }
}

fn check_bit_depth<T: Pixel>(bit_depth: u32) -> Result<(), PlaneError> {
    if !T::supports_bit_depth(bit_depth) {
        return Err(PlaneError::UnsupportedBitDepth(
            bit_depth,
            T::MIN_BIT_DEPTH,
            T::MAX_BIT_DEPTH,
        ));
    }
    Ok(())
}

fn check_layout(size: PlaneSize, stride: usize, len: usize) -> Result<(), PlaneError> {
    if stride < size.width {
        return Err(PlaneError::InvalidStride(stride, size.width));
    }
    let required = size.required_len(stride);
    if len < required {
        return Err(PlaneError::InvalidDataLength(len, required));
    }
    Ok(())
}

/// An owned plane of samples with a row stride.
///
/// Reference frames are usually allocated with a border around the visible
/// area so that filter taps near the edges stay inside the buffer. The plane
/// itself does not know about borders: callers take views at the visible
/// origin and the views check the tap footprint.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane<T> {
    data: Vec<T>,
    size: PlaneSize,
    stride: usize,
    bit_depth: u32,
}

impl<T: Pixel> Plane<T> {
    /// Create a new plane from sample data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the plane in samples.
    /// * `stride` - The distance between the starts of two rows.
    /// * `data` - The sample data, exactly `stride * height` long.
    ///
    /// # Errors
    ///
    /// If the stride is smaller than the width or the data length does not
    /// match, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use subpel_image::{Plane, PlaneSize};
    ///
    /// let plane = Plane::<u8>::new(
    ///     PlaneSize { width: 4, height: 2 },
    ///     6,
    ///     vec![0u8; 12],
    /// ).unwrap();
    ///
    /// assert_eq!(plane.width(), 4);
    /// assert_eq!(plane.stride(), 6);
    /// assert_eq!(plane.bit_depth(), 8);
    /// ```
    pub fn new(size: PlaneSize, stride: usize, data: Vec<T>) -> Result<Self, PlaneError> {
        if stride < size.width {
            return Err(PlaneError::InvalidStride(stride, size.width));
        }
        if data.len() != stride * size.height {
            return Err(PlaneError::InvalidDataLength(
                data.len(),
                stride * size.height,
            ));
        }
        Ok(Self {
            data,
            size,
            stride,
            bit_depth: T::DEFAULT_BIT_DEPTH,
        })
    }

    /// Create a new plane filled with `val` where the stride equals the width.
    pub fn from_size_val(size: PlaneSize, val: T) -> Result<Self, PlaneError> {
        Self::new(size, size.width, vec![val; size.width * size.height])
    }

    /// Create a new plane by copying tightly packed rows from `data`.
    pub fn from_size_slice(size: PlaneSize, data: &[T]) -> Result<Self, PlaneError> {
        Self::new(size, size.width, data.to_vec())
    }

    /// Set the bit depth used when clamping samples written to this plane.
    ///
    /// # Errors
    ///
    /// If the sample type cannot carry `bit_depth`, an error is returned.
    pub fn with_bit_depth(mut self, bit_depth: u32) -> Result<Self, PlaneError> {
        check_bit_depth::<T>(bit_depth)?;
        self.bit_depth = bit_depth;
        Ok(self)
    }

    /// The size of the plane in samples.
    pub fn size(&self) -> PlaneSize {
        self.size
    }

    /// The width of the plane in samples.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the plane in samples.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The row stride in samples.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The bit depth of the samples.
    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    /// The raw strided sample data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The raw strided sample data, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get the sample at `(col, row)` if it lies inside the plane.
    pub fn get(&self, col: usize, row: usize) -> Option<&T> {
        if col >= self.size.width || row >= self.size.height {
            return None;
        }
        self.data.get(row * self.stride + col)
    }

    /// Iterate over the rows of the plane, without the stride padding.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        let width = self.size.width;
        self.data
            .chunks(self.stride.max(1))
            .take(self.size.height)
            .map(move |row| &row[..width])
    }

    /// A read view with its origin at the top-left sample.
    ///
    /// A zero-width plane may have a zero stride; its views step one sample
    /// per row instead, which is never read since such a plane holds no data.
    pub fn view(&self) -> PlaneView<'_, T> {
        PlaneView {
            data: &self.data,
            stride: self.stride.max(1),
            origin: 0,
        }
    }

    /// A read view with its origin at `(col, row)`.
    ///
    /// The origin may sit inside the plane's border; only the sample data
    /// bounds are checked.
    ///
    /// # Errors
    ///
    /// If the origin is outside the sample data, an error is returned.
    pub fn view_at(&self, col: usize, row: usize) -> Result<PlaneView<'_, T>, PlaneError> {
        self.view().shifted(col as isize, row as isize)
    }

    /// A write view over the whole plane.
    pub fn view_mut(&mut self) -> PlaneViewMut<'_, T> {
        PlaneViewMut {
            data: &mut self.data,
            stride: self.stride,
            size: self.size,
            bit_depth: self.bit_depth,
        }
    }

    /// A write view over the block of `size` samples starting at `(col, row)`.
    ///
    /// # Errors
    ///
    /// If the block does not fit inside the plane, an error is returned.
    pub fn block_mut(
        &mut self,
        col: usize,
        row: usize,
        size: PlaneSize,
    ) -> Result<PlaneViewMut<'_, T>, PlaneError> {
        if col + size.width > self.size.width || row + size.height > self.size.height {
            return Err(PlaneError::WindowOutOfBounds {
                cols: col as isize..(col + size.width) as isize,
                rows: row as isize..(row + size.height) as isize,
            });
        }
        let data: &mut [T] = if size.is_empty() {
            &mut []
        } else {
            &mut self.data[row * self.stride + col..]
        };
        Ok(PlaneViewMut {
            data,
            stride: self.stride,
            size,
            bit_depth: self.bit_depth,
        })
    }
}

/// A borrowed read view over strided samples with a movable origin.
///
/// Sub-pixel filters read a few samples before and after the nominal
/// position. Instead of moving a pointer backwards, callers ask the view for
/// a [`Window`] covering a column and row range relative to the origin; the
/// ranges may be negative as long as they stay inside the borrowed data.
#[derive(Clone, Copy, Debug)]
pub struct PlaneView<'a, T> {
    data: &'a [T],
    stride: usize,
    origin: usize,
}

impl<'a, T> PlaneView<'a, T> {
    /// Create a view with its origin at the first sample of `data`.
    ///
    /// # Errors
    ///
    /// If the stride is zero, an error is returned.
    pub fn new(data: &'a [T], stride: usize) -> Result<Self, PlaneError> {
        if stride == 0 {
            return Err(PlaneError::InvalidStride(stride, 1));
        }
        Ok(Self {
            data,
            stride,
            origin: 0,
        })
    }

    /// Create a view with its origin at `(col, row)` of `data`.
    ///
    /// # Errors
    ///
    /// If the stride is zero or the origin is outside `data`, an error is
    /// returned.
    pub fn with_origin(
        data: &'a [T],
        stride: usize,
        col: usize,
        row: usize,
    ) -> Result<Self, PlaneError> {
        Self::new(data, stride)?.shifted(col as isize, row as isize)
    }

    /// Move the origin by `cols` columns and `rows` rows.
    ///
    /// # Errors
    ///
    /// If the new origin falls outside the data, an error is returned.
    pub fn shifted(&self, cols: isize, rows: isize) -> Result<Self, PlaneError> {
        let origin = self
            .linear_index(cols, rows)
            .ok_or(PlaneError::OriginOutOfBounds(cols, rows))?;
        Ok(Self {
            data: self.data,
            stride: self.stride,
            origin,
        })
    }

    /// The row stride in samples.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The linear index of the origin inside the borrowed data.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// The borrowed data.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    fn linear_index(&self, col: isize, row: isize) -> Option<usize> {
        let offset = row.checked_mul(self.stride as isize)?.checked_add(col)?;
        let index = (self.origin as isize).checked_add(offset)?;
        usize::try_from(index)
            .ok()
            .filter(|&index| index < self.data.len())
    }

    /// Borrow the samples covered by `cols` x `rows` relative to the origin.
    ///
    /// The returned window starts at `(cols.start, rows.start)` and keeps the
    /// view's stride, so sample `(c, r)` of the window is
    /// `window.as_slice()[r * stride + c]`. Columns past the row width read
    /// into the next row's border, exactly as a padded frame buffer would.
    ///
    /// # Errors
    ///
    /// If the first or last sample of the range is outside the data, an error
    /// is returned.
    pub fn window(&self, cols: Range<isize>, rows: Range<isize>) -> Result<Window<'a, T>, PlaneError> {
        if cols.is_empty() || rows.is_empty() {
            return Ok(Window {
                data: &[],
                stride: self.stride,
            });
        }

        let out_of_bounds = || PlaneError::WindowOutOfBounds {
            cols: cols.clone(),
            rows: rows.clone(),
        };
        let first = self
            .linear_index(cols.start, rows.start)
            .ok_or_else(out_of_bounds)?;
        let last = self
            .linear_index(cols.end - 1, rows.end - 1)
            .ok_or_else(out_of_bounds)?;

        Ok(Window {
            data: &self.data[first..=last],
            stride: self.stride,
        })
    }
}

/// A bounds-checked slice of a [`PlaneView`] that a filter pass may read.
#[derive(Clone, Copy, Debug)]
pub struct Window<'a, T> {
    data: &'a [T],
    stride: usize,
}

impl<'a, T> Window<'a, T> {
    /// The samples of the window, starting at its top-left corner.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// The row stride in samples.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether the window covers no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A borrowed write view over a block of strided samples.
///
/// The block size is the size of the prediction the filters produce; the bit
/// depth bounds every sample written into it.
#[derive(Debug)]
pub struct PlaneViewMut<'a, T> {
    data: &'a mut [T],
    stride: usize,
    size: PlaneSize,
    bit_depth: u32,
}

impl<'a, T: Pixel> PlaneViewMut<'a, T> {
    /// Create a write view over `size` samples of `data`.
    ///
    /// # Errors
    ///
    /// If the stride is smaller than the width or `data` does not cover the
    /// block, an error is returned.
    pub fn new(data: &'a mut [T], stride: usize, size: PlaneSize) -> Result<Self, PlaneError> {
        check_layout(size, stride, data.len())?;
        Ok(Self {
            data,
            stride,
            size,
            bit_depth: T::DEFAULT_BIT_DEPTH,
        })
    }

    /// Set the bit depth used to clamp written samples.
    ///
    /// # Errors
    ///
    /// If the sample type cannot carry `bit_depth`, an error is returned.
    pub fn with_bit_depth(mut self, bit_depth: u32) -> Result<Self, PlaneError> {
        check_bit_depth::<T>(bit_depth)?;
        self.bit_depth = bit_depth;
        Ok(self)
    }

    /// The size of the block in samples.
    pub fn size(&self) -> PlaneSize {
        self.size
    }

    /// The width of the block in samples.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the block in samples.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The row stride in samples.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The bit depth of the samples.
    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    /// The raw strided sample data.
    pub fn as_slice(&self) -> &[T] {
        &self.data[..]
    }

    /// The raw strided sample data, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data[..]
    }

    /// Iterate over the rows of the block, without the stride padding.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        let (stride, width) = (self.stride, self.size.width);
        (0..self.size.height).map(move |row| &self.data[row * stride..row * stride + width])
    }

    /// A read view with its origin at the top-left sample of the block.
    pub fn as_view(&self) -> PlaneView<'_, T> {
        PlaneView {
            data: &self.data[..],
            stride: self.stride.max(1),
            origin: 0,
        }
    }
}
