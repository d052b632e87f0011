use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::HimenoError;

/// Extent of a multi-channel 3D field: `channels` stacked `rows x cols x depths` grids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    pub channels: usize,
    pub rows: usize,   // i方向
    pub cols: usize,   // j方向
    pub depths: usize, // k方向（連続）
}

impl Shape {
    pub const fn new(channels: usize, rows: usize, cols: usize, depths: usize) -> Self {
        Shape { channels, rows, cols, depths }
    }

    /// Total element count, or `None` if it does not fit in `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.channels
            .checked_mul(self.rows)?
            .checked_mul(self.cols)?
            .checked_mul(self.depths)
    }

    pub const fn len(&self) -> usize {
        self.channels * self.rows * self.cols * self.depths
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements in one fixed-`i` plane of one channel.
    pub const fn plane(&self) -> usize {
        self.cols * self.depths
    }

    /// Elements in one channel.
    pub const fn channel_len(&self) -> usize {
        self.rows * self.plane()
    }

    pub const fn grid(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.depths)
    }

    /// Same (rows, cols, depths), channel count ignored.
    pub fn same_grid(&self, other: &Shape) -> bool {
        self.grid() == other.grid()
    }

    /// True when every axis has at least one cell inside the boundary shell.
    pub const fn has_interior(&self) -> bool {
        self.rows >= 3 && self.cols >= 3 && self.depths >= 3
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}x{}", self.channels, self.rows, self.cols, self.depths)
    }
}

/// Flat offset of `(n, i, j, k)` in a buffer laid out as `shape`.
///
/// No bounds checking: indices outside the shape give an offset into some
/// other cell or past the end of the buffer.
#[inline(always)]
pub const fn offset(shape: Shape, n: usize, i: usize, j: usize, k: usize) -> usize {
    ((n * shape.rows + i) * shape.cols + j) * shape.depths + k
}

/// Owned `f32` buffer together with its shape.
///
/// The buffer is freed when the field goes out of scope, or earlier with
/// [`Field::release`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Field {
    data: Vec<f32>,
    shape: Shape,
}

impl Field {
    /// Allocates `channels*rows*cols*depths` elements.
    ///
    /// Contents are unspecified until an initializer runs over them. Failing to
    /// obtain the memory is reported as [`HimenoError::Allocation`]; callers are
    /// expected to abort the run on it.
    pub fn allocate(
        channels: usize,
        rows: usize,
        cols: usize,
        depths: usize,
    ) -> Result<Self, HimenoError> {
        let shape = Shape::new(channels, rows, cols, depths);
        let len = shape.checked_len().ok_or_else(|| HimenoError::Allocation {
            shape,
            reason: "element count overflows usize".to_string(),
        })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| HimenoError::Allocation { shape, reason: e.to_string() })?;
        data.resize(len, 0.0);

        Ok(Field { data, shape })
    }

    /// Frees the buffer and leaves an empty, zero-shaped field behind.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.shape = Shape::default();
    }

    /// True when the field holds no elements, either because it was
    /// released or because one of its dimensions is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Contiguous storage of channel `n`.
    pub fn channel(&self, n: usize) -> &[f32] {
        let len = self.shape.channel_len();
        &self.data[n * len..(n + 1) * len]
    }

    pub fn channel_mut(&mut self, n: usize) -> &mut [f32] {
        let len = self.shape.channel_len();
        &mut self.data[n * len..(n + 1) * len]
    }

    #[inline]
    pub fn get(&self, n: usize, i: usize, j: usize, k: usize) -> f32 {
        self.data[offset(self.shape, n, i, j, k)]
    }

    #[inline]
    pub fn set(&mut self, n: usize, i: usize, j: usize, k: usize, value: f32) {
        let idx = offset(self.shape, n, i, j, k);
        self.data[idx] = value;
    }
}

impl Index<(usize, usize, usize, usize)> for Field {
    type Output = f32;

    #[inline]
    fn index(&self, (n, i, j, k): (usize, usize, usize, usize)) -> &f32 {
        &self.data[offset(self.shape, n, i, j, k)]
    }
}

impl IndexMut<(usize, usize, usize, usize)> for Field {
    #[inline]
    fn index_mut(&mut self, (n, i, j, k): (usize, usize, usize, usize)) -> &mut f32 {
        &mut self.data[offset(self.shape, n, i, j, k)]
    }
}
