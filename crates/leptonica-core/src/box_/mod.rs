//! Box, Boxa - Rectangle regions
//!
//! These structures represent rectangular regions in an image, such as
//! the bounding boxes of connected components.

use crate::error::{Error, Result};

/// A rectangle region
///
/// Unlike Leptonica's Box which uses reference counting, this is a simple
/// Copy type since it's small and frequently copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Array of boxes
///
/// # See also
///
/// C Leptonica: `struct Boxa` in `pix.h`, `boxbasic.c`
#[derive(Debug, Clone, Default)]
pub struct Boxa {
    boxes: Vec<Box>,
}

impl Boxa {
    /// Create a new empty Boxa
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Create a Boxa with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of boxes
    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Get a box by index
    pub fn get(&self, index: usize) -> Option<&Box> {
        self.boxes.get(index)
    }

    /// Add a box
    pub fn push(&mut self, b: Box) {
        self.boxes.push(b);
    }

    /// Get all boxes as a slice
    pub fn boxes(&self) -> &[Box] {
        &self.boxes
    }

    /// Create an iterator over boxes
    pub fn iter(&self) -> impl Iterator<Item = &Box> {
        self.boxes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_edges() {
        let b = Box::new(10, 20, 30, 40).unwrap();
        assert_eq!(b.right(), 40);
        assert_eq!(b.bottom(), 60);
        assert!(b.contains_point(10, 20));
        assert!(!b.contains_point(40, 20));
        assert!(Box::new(0, 0, -1, 5).is_err());
    }

    #[test]
    fn test_boxa() {
        let mut boxa = Boxa::with_capacity(2);
        boxa.push(Box::new_unchecked(0, 0, 1, 1));
        boxa.push(Box::new_unchecked(5, 5, 2, 2));
        assert_eq!(boxa.len(), 2);
        assert_eq!(boxa.get(1).map(|b| b.x), Some(5));
        assert!(boxa.get(2).is_none());
    }
}
