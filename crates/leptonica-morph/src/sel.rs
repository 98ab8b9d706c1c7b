//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Only hit elements matter for erosion and dilation, so a
//! SEL here is a grid of hit/don't-care cells with an origin.

use crate::{MorphError, MorphResult};

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare,
    /// Hit - the position participates in the operation
    Hit,
}

/// Structuring Element (SEL)
///
/// The origin (cx, cy) is the reference point for the operation.
///
/// # See also
///
/// C Leptonica: `struct Sel` in `morph.h`, `selCreateBrick()` in `sel1.c`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
}

impl Sel {
    /// Create an empty (all don't-care) SEL with its origin at the center
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if either dimension is 0.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be > 0, got {width}x{height}"
            )));
        }
        Ok(Sel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; (width * height) as usize],
        })
    }

    /// Create a rectangular "brick" SEL with all hits
    ///
    /// The origin is at `(width / 2, height / 2)`.
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(SelElement::Hit);
        Ok(sel)
    }

    /// Create a horizontal line SEL
    pub fn create_horizontal(length: u32) -> MorphResult<Self> {
        Self::create_brick(length, 1)
    }

    /// Create a vertical line SEL
    pub fn create_vertical(length: u32) -> MorphResult<Self> {
        Self::create_brick(1, length)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if the origin is outside the SEL.
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({cx}, {cy}) outside {}x{}",
                self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set an element at (x, y); out-of-range positions are ignored
    #[inline]
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = elem;
        }
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Largest translations in each direction over the hits.
    ///
    /// Returns `(xp, yp, xn, yn)`: how far a hit lies left of, above,
    /// right of, and below the origin.
    ///
    /// C equivalent: `selFindMaxTranslations()` in `sel1.c`
    pub fn find_max_translations(&self) -> (u32, u32, u32, u32) {
        let (mut xp, mut yp, mut xn, mut yn) = (0u32, 0u32, 0u32, 0u32);
        for (dx, dy) in self.hit_offsets() {
            if dx < 0 {
                xp = xp.max(dx.unsigned_abs());
            } else {
                xn = xn.max(dx as u32);
            }
            if dy < 0 {
                yp = yp.max(dy.unsigned_abs());
            } else {
                yn = yn.max(dy as u32);
            }
        }
        (xp, yp, xn, yn)
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &elem)| elem == SelElement::Hit)
            .map(move |(idx, _)| {
                let x = (idx as u32 % width) as i32;
                let y = (idx as u32 / width) as i32;
                (x - cx, y - cy)
            })
    }
}
