//! Numa - Numeric arrays
//!
//! Arrays of floating-point numbers, used for per-line statistics
//! (curvatures, line positions, lengths) and fitted values.
//!
//! # See also
//!
//! C Leptonica: `numabasic.c`, `numafunc1.c`, `numafunc2.c`

mod sort;

pub use sort::SortOrder;

use crate::error::{Error, Result};

/// Array of floating-point numbers
///
/// # See also
///
/// C Leptonica: `struct Numa` in `array.h`, `numaCreate()` in `numabasic.c`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Numa {
    data: Vec<f32>,
}

impl Numa {
    /// Create a new empty Numa
    ///
    /// # See also
    ///
    /// C Leptonica: `numaCreate()`
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a Numa with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a Numa from a vector of values
    pub fn from_vec(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Create a Numa from a slice of f32 values
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Get the number of values
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a value by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.data.get(index).copied()
    }

    /// Add a value to the end
    pub fn push(&mut self, val: f32) {
        self.data.push(val);
    }

    /// Set a value at index
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn set(&mut self, index: usize, val: f32) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = val;
        Ok(())
    }

    /// Get all values as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get all values as a mutable slice
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Minimum value and its index (first occurrence).
    ///
    /// C equivalent: `numaGetMin()` in `numafunc1.c`
    pub fn min(&self) -> Option<(f32, usize)> {
        let mut best: Option<(f32, usize)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            if best.is_none_or(|(b, _)| v < b) {
                best = Some((v, i));
            }
        }
        best
    }

    /// Maximum value and its index (first occurrence).
    ///
    /// C equivalent: `numaGetMax()` in `numafunc1.c`
    pub fn max(&self) -> Option<(f32, usize)> {
        let mut best: Option<(f32, usize)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            if best.is_none_or(|(b, _)| v > b) {
                best = Some((v, i));
            }
        }
        best
    }

    /// Iterate over the values
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    /// Get the value at a given rank (fractional position) in the sorted array.
    ///
    /// `fract` ranges from 0.0 (minimum) to 1.0 (maximum).
    /// The index is computed as `(fract * (n-1) + 0.5) as usize`.
    ///
    /// C equivalent: `numaGetRankValue(na, fract, NULL, 0, &pval)`
    pub fn rank_value(&self, fract: f32) -> Result<f32> {
        let n = self.len();
        if n == 0 {
            return Err(Error::NullInput("empty Numa"));
        }
        if !(0.0..=1.0).contains(&fract) {
            return Err(Error::InvalidParameter(format!(
                "fract {fract} not in [0.0, 1.0]"
            )));
        }
        let sorted = self.sorted(SortOrder::Increasing);
        let index = ((fract * (n - 1) as f32 + 0.5) as usize).min(n - 1);
        Ok(sorted.data[index])
    }

    /// Get the median value.
    ///
    /// C equivalent: `numaGetMedian(na, &pval)`
    pub fn median(&self) -> Result<f32> {
        self.rank_value(0.5)
    }

    /// Median and median absolute deviation from the median.
    ///
    /// Returns `(median, median_dev)`.
    ///
    /// C equivalent: `numaGetMedianDevFromMedian()` in `numafunc1.c`
    pub fn median_dev_from_median(&self) -> Result<(f32, f32)> {
        let med = self.median()?;
        let devs: Numa = self.iter().map(|v| (v - med).abs()).collect();
        Ok((med, devs.median()?))
    }
}

impl std::ops::Index<usize> for Numa {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.data[index]
    }
}

impl FromIterator<f32> for Numa {
    fn from_iter<T: IntoIterator<Item = f32>>(iter: T) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}
