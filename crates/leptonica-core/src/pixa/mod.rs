//! Pixa - Arrays of Pix images
//!
//! A collection of images, each with an associated bounding box giving
//! its placement in a larger image (e.g. connected components).
//!
//! # See also
//!
//! C Leptonica: `pixabasic.c`, `pixafunc1.c`

use crate::box_::{Box, Boxa};
use crate::pix::Pix;

/// How two size constraints combine in [`Pixa::select_by_size`].
///
/// # See also
///
/// C Leptonica: `L_SELECT_IF_EITHER`, `L_SELECT_IF_BOTH` in `pix.h`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSelectType {
    /// Keep when either dimension satisfies its threshold
    IfEither,
    /// Keep when both dimensions satisfy their thresholds
    IfBoth,
}

/// Comparison applied to each dimension in [`Pixa::select_by_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRelation {
    /// Keep if dimension < threshold
    LessThan,
    /// Keep if dimension > threshold
    GreaterThan,
    /// Keep if dimension <= threshold
    LessThanOrEqual,
    /// Keep if dimension >= threshold
    GreaterThanOrEqual,
}

impl SizeRelation {
    fn holds(self, value: i32, threshold: i32) -> bool {
        match self {
            SizeRelation::LessThan => value < threshold,
            SizeRelation::GreaterThan => value > threshold,
            SizeRelation::LessThanOrEqual => value <= threshold,
            SizeRelation::GreaterThanOrEqual => value >= threshold,
        }
    }
}

/// Array of Pix images with one box per image
///
/// # See also
///
/// C Leptonica: `struct Pixa` in `pix.h`, `pixaCreate()` in `pixabasic.c`
#[derive(Debug, Clone, Default)]
pub struct Pixa {
    pix: Vec<Pix>,
    boxa: Boxa,
}

impl Pixa {
    /// Create a new empty Pixa
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Pixa with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pix: Vec::with_capacity(capacity),
            boxa: Boxa::with_capacity(capacity),
        }
    }

    /// Get the number of Pix images
    #[inline]
    pub fn len(&self) -> usize {
        self.pix.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pix.is_empty()
    }

    /// Get a reference to a Pix by index
    pub fn get(&self, index: usize) -> Option<&Pix> {
        self.pix.get(index)
    }

    /// Get the box associated with a Pix
    pub fn get_box(&self, index: usize) -> Option<&Box> {
        self.boxa.get(index)
    }

    /// Add a Pix with its bounding box
    pub fn push_with_box(&mut self, pix: Pix, b: Box) {
        self.pix.push(pix);
        self.boxa.push(b);
    }

    /// Get the boxes
    pub fn boxa(&self) -> &Boxa {
        &self.boxa
    }

    /// Iterate over `(pix, box)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Pix, &Box)> {
        self.pix.iter().zip(self.boxa.iter())
    }

    /// Keep the images whose dimensions pass the size test.
    ///
    /// Each image's width is tested against `width` and its height
    /// against `height` using `relation`; `select_type` decides whether
    /// one or both tests must hold.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixaSelectBySize()` in `pixafunc1.c`
    pub fn select_by_size(
        &self,
        width: i32,
        height: i32,
        select_type: SizeSelectType,
        relation: SizeRelation,
    ) -> Pixa {
        let mut out = Pixa::new();
        for (pix, b) in self.iter() {
            let w_ok = relation.holds(pix.width() as i32, width);
            let h_ok = relation.holds(pix.height() as i32, height);
            let keep = match select_type {
                SizeSelectType::IfEither => w_ok || h_ok,
                SizeSelectType::IfBoth => w_ok && h_ok,
            };
            if keep {
                out.push_with_box(pix.clone(), *b);
            }
        }
        out
    }
}
