//! Pta sorting.
//!
//! Corresponds to functions in C Leptonica's `ptafunc1.c` / `ptafunc2.c`.

use crate::numa::SortOrder;
use crate::pta::{Pta, Ptaa};

/// Which coordinate to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Sort by x coordinate
    X,
    /// Sort by y coordinate
    Y,
}

impl Pta {
    /// Return the index array that would sort `self`.
    ///
    /// Stable: points with equal keys keep their relative order.
    ///
    /// C equivalent: `ptaGetSortIndex()` in `ptafunc2.c`
    pub fn sort_index(&self, by: SortBy, order: SortOrder) -> Vec<usize> {
        let keys = match by {
            SortBy::X => self.x_coords(),
            SortBy::Y => self.y_coords(),
        };
        let mut index: Vec<usize> = (0..keys.len()).collect();
        match order {
            SortOrder::Increasing => index.sort_by(|&a, &b| keys[a].total_cmp(&keys[b])),
            SortOrder::Decreasing => index.sort_by(|&a, &b| keys[b].total_cmp(&keys[a])),
        }
        index
    }

    /// Return a new Pta reordered by an index array.
    ///
    /// Indices out of range are skipped.
    ///
    /// C equivalent: `ptaSortByIndex()` in `ptafunc2.c`
    pub fn sort_by_index(&self, index: &[usize]) -> Pta {
        index.iter().filter_map(|&i| self.get(i)).collect()
    }

    /// Return a sorted copy of `self`.
    ///
    /// C equivalent: `ptaSort()` in `ptafunc2.c`
    pub fn sorted(&self, by: SortBy, order: SortOrder) -> Pta {
        self.sort_by_index(&self.sort_index(by, order))
    }
}

impl Ptaa {
    /// Reorder by an index array, copying the selected Pta.
    ///
    /// Indices out of range are skipped.
    ///
    /// C equivalent: `ptaaSortByIndex()` in `ptafunc2.c`
    pub fn sort_by_index(&self, index: &[usize]) -> Ptaa {
        index.iter().filter_map(|&i| self.get_cloned(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pts() -> Pta {
        [(3.0, 1.0), (1.0, 4.0), (2.0, 2.0)].into_iter().collect()
    }

    #[test]
    fn test_sort_index() {
        let p = make_pts();
        assert_eq!(p.sort_index(SortBy::X, SortOrder::Increasing), vec![1, 2, 0]);
        assert_eq!(p.sort_index(SortBy::Y, SortOrder::Decreasing), vec![1, 2, 0]);
    }

    #[test]
    fn test_sorted() {
        let p = make_pts().sorted(SortBy::X, SortOrder::Increasing);
        assert_eq!(p.x_coords(), &[1.0, 2.0, 3.0]);
        assert_eq!(p.y_coords(), &[4.0, 2.0, 1.0]);
    }
}
