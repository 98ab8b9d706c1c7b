//! Pta, Ptaa - Point arrays
//!
//! Arrays of floating-point coordinate pairs, used for line centers,
//! sampled curves and disparity series.
//!
//! # Storage layout
//!
//! Points are stored as separate X and Y vectors (SoA layout),
//! matching C Leptonica's internal representation.
//!
//! # Ownership
//!
//! A `Ptaa` owns its `Pta` values outright. Adding either moves a `Pta`
//! in ([`Ptaa::push`]) or copies it ([`Ptaa::push_copy`]); retrieval
//! borrows, copies, or moves out ([`Ptaa::take`]).
//!
//! # See also
//!
//! - C Leptonica: `pts.h` (struct definitions), `ptabasic.c` (creation/access)
//! - `ptafunc1.c` (range, sorting, least-squares fitting)

mod lsf;
mod sort;

pub use lsf::{apply_linear_fit, apply_quadratic_fit, gauss_jordan};
pub use sort::SortBy;

use crate::error::{Error, Result};

/// Array of points.
///
/// Stores 2D points as parallel x/y coordinate vectors.
///
/// # See also
///
/// C Leptonica: `struct Pta` in `pts.h`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pta {
    x: Vec<f32>,
    y: Vec<f32>,
}

impl Pta {
    /// Create a new empty Pta.
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Create a Pta with pre-allocated capacity.
    ///
    /// C equivalent: `ptaCreate(n)`
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Create a Pta from coordinate vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` and `y` have different lengths.
    ///
    /// C equivalent: `ptaCreateFromNuma()`
    pub fn from_vecs(x: Vec<f32>, y: Vec<f32>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::InvalidParameter(format!(
                "coordinate lengths differ: {} vs {}",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Get a point by index.
    ///
    /// Returns `None` if the index is out of bounds.
    ///
    /// C equivalent: `ptaGetPt()`
    pub fn get(&self, index: usize) -> Option<(f32, f32)> {
        Some((*self.x.get(index)?, *self.y.get(index)?))
    }

    /// Get a point rounded to integers, rounding half up (`floor(v + 0.5)`).
    ///
    /// C equivalent: `ptaGetIPt()`
    pub fn get_int(&self, index: usize) -> Option<(i32, i32)> {
        let (x, y) = self.get(index)?;
        Some(((x + 0.5).floor() as i32, (y + 0.5).floor() as i32))
    }

    /// Get X coordinate by index.
    pub fn get_x(&self, index: usize) -> Option<f32> {
        self.x.get(index).copied()
    }

    /// Get Y coordinate by index.
    pub fn get_y(&self, index: usize) -> Option<f32> {
        self.y.get(index).copied()
    }

    /// Add a point.
    ///
    /// C equivalent: `ptaAddPt()`
    pub fn push(&mut self, x: f32, y: f32) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Set a point at index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the index is out of bounds.
    pub fn set(&mut self, index: usize, x: f32, y: f32) -> Result<()> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        self.x[index] = x;
        self.y[index] = y;
        Ok(())
    }

    /// Clear all points.
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    /// Get X coordinates as a slice.
    pub fn x_coords(&self) -> &[f32] {
        &self.x
    }

    /// Get Y coordinates as a slice.
    pub fn y_coords(&self) -> &[f32] {
        &self.y
    }

    /// Extent of the points.
    ///
    /// Returns `(x_min, x_max, y_min, y_max)`, or `None` if empty.
    ///
    /// # See also
    ///
    /// C Leptonica: `ptaGetRange()` in `ptafunc1.c`
    pub fn range(&self) -> Option<(f32, f32, f32, f32)> {
        if self.is_empty() {
            return None;
        }
        let fold = |v: &[f32]| {
            v.iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &a| {
                    (lo.min(a), hi.max(a))
                })
        };
        let (xmin, xmax) = fold(&self.x);
        let (ymin, ymax) = fold(&self.y);
        Some((xmin, xmax, ymin, ymax))
    }

    /// Create an iterator over points.
    pub fn iter(&self) -> PtaIter<'_> {
        PtaIter {
            pta: self,
            index: 0,
        }
    }
}

/// Iterator over Pta points.
pub struct PtaIter<'a> {
    pta: &'a Pta,
    index: usize,
}

impl Iterator for PtaIter<'_> {
    type Item = (f32, f32);

    fn next(&mut self) -> Option<Self::Item> {
        let pt = self.pta.get(self.index)?;
        self.index += 1;
        Some(pt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pta.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PtaIter<'_> {}

impl<'a> IntoIterator for &'a Pta {
    type Item = (f32, f32);
    type IntoIter = PtaIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(f32, f32)> for Pta {
    fn from_iter<T: IntoIterator<Item = (f32, f32)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut pta = Self::with_capacity(iter.size_hint().0);
        for (x, y) in iter {
            pta.push(x, y);
        }
        pta
    }
}

/// Array of Pta.
///
/// # See also
///
/// C Leptonica: `struct Ptaa` in `pts.h`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ptaa {
    ptas: Vec<Pta>,
}

impl Ptaa {
    /// Create a new empty Ptaa.
    pub fn new() -> Self {
        Self { ptas: Vec::new() }
    }

    /// Create with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ptas: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of Pta.
    #[inline]
    pub fn len(&self) -> usize {
        self.ptas.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ptas.is_empty()
    }

    /// Borrow a Pta by index.
    pub fn get(&self, index: usize) -> Option<&Pta> {
        self.ptas.get(index)
    }

    /// Copy of a Pta by index.
    ///
    /// C equivalent: `ptaaGetPta(ptaa, index, L_COPY)`
    pub fn get_cloned(&self, index: usize) -> Option<Pta> {
        self.ptas.get(index).cloned()
    }

    /// Move a Pta out, leaving an empty Pta in its slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the index is out of bounds.
    pub fn take(&mut self, index: usize) -> Result<Pta> {
        let len = self.ptas.len();
        self.ptas
            .get_mut(index)
            .map(std::mem::take)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Get point `ipt` of Pta `ipta`.
    ///
    /// C equivalent: `ptaaGetPt()`
    pub fn get_pt(&self, ipta: usize, ipt: usize) -> Option<(f32, f32)> {
        self.ptas.get(ipta)?.get(ipt)
    }

    /// Add a Pta, taking ownership.
    ///
    /// C equivalent: `ptaaAddPta(ptaa, pta, L_INSERT)`
    pub fn push(&mut self, pta: Pta) {
        self.ptas.push(pta);
    }

    /// Add a copy of a Pta.
    ///
    /// C equivalent: `ptaaAddPta(ptaa, pta, L_COPY)`
    pub fn push_copy(&mut self, pta: &Pta) {
        self.ptas.push(pta.clone());
    }

    /// Get all Pta as a slice.
    pub fn ptas(&self) -> &[Pta] {
        &self.ptas
    }

    /// Create an iterator over Pta.
    pub fn iter(&self) -> impl Iterator<Item = &Pta> {
        self.ptas.iter()
    }
}

impl FromIterator<Pta> for Ptaa {
    fn from_iter<T: IntoIterator<Item = Pta>>(iter: T) -> Self {
        Self {
            ptas: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_get_int() {
        let mut pta = Pta::with_capacity(2);
        pta.push(1.5, -0.5);
        pta.push(2.49, 7.5);
        assert_eq!(pta.get(0), Some((1.5, -0.5)));
        assert_eq!(pta.get_int(0), Some((2, 0)));
        assert_eq!(pta.get_int(1), Some((2, 8)));
        assert_eq!(pta.get(2), None);
        assert_eq!(pta.get_int(2), None);
    }

    #[test]
    fn test_from_vecs_mismatch() {
        assert!(Pta::from_vecs(vec![1.0], vec![]).is_err());
        assert_eq!(Pta::from_vecs(vec![1.0], vec![2.0]).unwrap().len(), 1);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut pta = Pta::new();
        assert!(pta.set(0, 1.0, 1.0).is_err());
        pta.push(0.0, 0.0);
        pta.set(0, 3.0, 4.0).unwrap();
        assert_eq!(pta.get(0), Some((3.0, 4.0)));
    }

    #[test]
    fn test_range() {
        let pta: Pta = [(3.0, 1.0), (-1.0, 5.0), (2.0, 0.0)].into_iter().collect();
        assert_eq!(pta.range(), Some((-1.0, 3.0, 0.0, 5.0)));
        assert_eq!(Pta::new().range(), None);
    }

    #[test]
    fn test_ptaa_ownership() {
        let mut ptaa = Ptaa::new();
        let pta: Pta = [(1.0, 2.0)].into_iter().collect();
        ptaa.push_copy(&pta);
        ptaa.push(pta);
        assert_eq!(ptaa.len(), 2);
        assert_eq!(ptaa.get_pt(1, 0), Some((1.0, 2.0)));

        let taken = ptaa.take(0).unwrap();
        assert_eq!(taken.len(), 1);
        assert_eq!(ptaa.len(), 2);
        assert!(ptaa.get(0).unwrap().is_empty());
        assert!(ptaa.take(5).is_err());
        assert_eq!(ptaa.get_pt(3, 0), None);
    }

    #[test]
    fn test_ptaa_sort_by_index() {
        let ptaa: Ptaa = (0..3)
            .map(|i| [(i as f32, 0.0)].into_iter().collect())
            .collect();
        let sorted = ptaa.sort_by_index(&[2, 0, 1]);
        assert_eq!(sorted.get_pt(0, 0), Some((2.0, 0.0)));
        assert_eq!(sorted.get_pt(2, 0), Some((1.0, 0.0)));
    }
}
