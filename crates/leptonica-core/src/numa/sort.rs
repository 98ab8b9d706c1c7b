//! Numa sorting: sorted copies, sort index arrays, reordering by index.
//!
//! # See also
//!
//! C Leptonica: `numaSort()`, `numaGetSortIndex()`, `numaSortByIndex()` in `numafunc1.c`

use super::Numa;

/// Sort order for Numa sorting operations.
///
/// C equivalent: `L_SORT_INCREASING` / `L_SORT_DECREASING`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest first).
    Increasing,
    /// Sort in descending order (largest first).
    Decreasing,
}

impl Numa {
    /// Return a new Numa with elements sorted.
    ///
    /// Uses `f32::total_cmp` for NaN-safe ordering.
    ///
    /// C equivalent: `numaSort(NULL, nain, sortorder)`
    pub fn sorted(&self, order: SortOrder) -> Numa {
        let mut result = self.clone();
        result.sort(order);
        result
    }

    /// Sort the elements in place.
    ///
    /// C equivalent: `numaSort(naout, naout, sortorder)`
    pub fn sort(&mut self, order: SortOrder) {
        let slice = self.as_slice_mut();
        match order {
            SortOrder::Increasing => slice.sort_by(f32::total_cmp),
            SortOrder::Decreasing => slice.sort_by(|a, b| f32::total_cmp(b, a)),
        }
    }

    /// Indices that would sort the array.
    ///
    /// The sort is stable: equal values keep their original order.
    ///
    /// C equivalent: `numaGetSortIndex()` in `numafunc1.c`
    pub fn sort_index(&self, order: SortOrder) -> Vec<usize> {
        let vals = self.as_slice();
        let mut index: Vec<usize> = (0..vals.len()).collect();
        match order {
            SortOrder::Increasing => index.sort_by(|&a, &b| vals[a].total_cmp(&vals[b])),
            SortOrder::Decreasing => index.sort_by(|&a, &b| vals[b].total_cmp(&vals[a])),
        }
        index
    }

    /// Reorder the values by an index array.
    ///
    /// Indices out of range are skipped.
    ///
    /// C equivalent: `numaSortByIndex()` in `numafunc1.c`
    pub fn sort_by_index(&self, index: &[usize]) -> Numa {
        index.iter().filter_map(|&i| self.get(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_index_is_stable() {
        let na = Numa::from_slice(&[3.0, 1.0, 3.0, 2.0]);
        assert_eq!(na.sort_index(SortOrder::Increasing), vec![1, 3, 0, 2]);
        assert_eq!(na.sort_index(SortOrder::Decreasing), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_sort_by_index() {
        let na = Numa::from_slice(&[10.0, 20.0, 30.0]);
        let out = na.sort_by_index(&[2, 0, 1]);
        assert_eq!(out.as_slice(), &[30.0, 10.0, 20.0]);
    }

    #[test]
    fn test_sorted() {
        let na = Numa::from_slice(&[2.0, -1.0, 5.0]);
        assert_eq!(na.sorted(SortOrder::Decreasing).as_slice(), &[5.0, 2.0, -1.0]);
    }
}
