//! Morphological sequence operations
//!
//! Executes a sequence of binary brick operations given as a string.
//!
//! # Sequence String Format
//!
//! Operations are separated by `+` and whitespace is ignored.
//! Each operation begins with a case-insensitive character:
//!
//! - `d<w>.<h>` - Dilation with a w x h brick
//! - `e<w>.<h>` - Erosion with a w x h brick
//! - `o<w>.<h>` - Opening with a w x h brick
//! - `c<w>.<h>` - Closing with a w x h brick (edge-safe)
//!
//! # Examples
//!
//! ```
//! use leptonica_morph::sequence::{MorphSequence, morph_sequence};
//! use leptonica_core::{Pix, PixelDepth};
//!
//! let seq = MorphSequence::parse("o1.3 + c15.1").unwrap();
//! assert_eq!(seq.len(), 2);
//!
//! let pix = Pix::new(100, 100, PixelDepth::Bit1).unwrap();
//! let result = morph_sequence(&pix, "d3.3 + e3.3").unwrap();
//! assert_eq!(result.width(), 100);
//! ```
//!
//! # Reference
//!
//! Based on Leptonica's `morphseq.c` implementation.

use crate::binary::{check_binary, close_safe_brick, dilate_brick, erode_brick, open_brick};
use crate::{MorphError, MorphResult};
use leptonica_core::Pix;

/// A parsed morphological operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    /// Dilation with a brick structuring element
    Dilate { width: u32, height: u32 },
    /// Erosion with a brick structuring element
    Erode { width: u32, height: u32 },
    /// Opening (erosion followed by dilation)
    Open { width: u32, height: u32 },
    /// Closing (dilation followed by erosion)
    Close { width: u32, height: u32 },
}

impl MorphOp {
    /// Get the width and height of the operation's structuring element
    pub fn dimensions(&self) -> (u32, u32) {
        match *self {
            MorphOp::Dilate { width, height }
            | MorphOp::Erode { width, height }
            | MorphOp::Open { width, height }
            | MorphOp::Close { width, height } => (width, height),
        }
    }

    /// Apply the operation to a 1 bpp image.
    ///
    /// Closing pads the image first, as `pixMorphSequence()` does, so
    /// foreground near the edges is not eroded.
    pub fn apply(&self, pix: &Pix) -> MorphResult<Pix> {
        match *self {
            MorphOp::Dilate { width, height } => dilate_brick(pix, width, height),
            MorphOp::Erode { width, height } => erode_brick(pix, width, height),
            MorphOp::Open { width, height } => open_brick(pix, width, height),
            MorphOp::Close { width, height } => close_safe_brick(pix, width, height),
        }
    }
}

/// A parsed morphological sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphSequence {
    ops: Vec<MorphOp>,
}

impl MorphSequence {
    /// Parse a sequence string such as `"o1.3 + c15.1"`
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSequence`] for an empty sequence, an
    /// empty or unknown operation, or malformed dimensions.
    pub fn parse(sequence: &str) -> MorphResult<Self> {
        if sequence.trim().is_empty() {
            return Err(MorphError::InvalidSequence("empty sequence".to_string()));
        }

        let ops = sequence
            .split('+')
            .enumerate()
            .map(|(i, part)| {
                let op_str: String = part.chars().filter(|c| !c.is_whitespace()).collect();
                if op_str.is_empty() {
                    return Err(MorphError::InvalidSequence(format!(
                        "empty operation at position {}",
                        i + 1
                    )));
                }
                Self::parse_operation(&op_str)
            })
            .collect::<MorphResult<Vec<_>>>()?;

        Ok(MorphSequence { ops })
    }

    fn parse_operation(op_str: &str) -> MorphResult<MorphOp> {
        let mut chars = op_str.chars();
        let first = chars
            .next()
            .map(|c| c.to_ascii_lowercase())
            .ok_or_else(|| MorphError::InvalidSequence("empty operation".to_string()))?;
        let rest = chars.as_str();

        match first {
            'd' | 'e' | 'o' | 'c' => {
                let (width, height) = Self::parse_dimensions(rest)?;
                Ok(match first {
                    'd' => MorphOp::Dilate { width, height },
                    'e' => MorphOp::Erode { width, height },
                    'o' => MorphOp::Open { width, height },
                    _ => MorphOp::Close { width, height },
                })
            }
            _ => Err(MorphError::InvalidSequence(format!(
                "unknown operation '{first}' in '{op_str}'"
            ))),
        }
    }

    /// Parse dimensions from a string like "3.5" -> (3, 5)
    fn parse_dimensions(dim_str: &str) -> MorphResult<(u32, u32)> {
        let (w, h) = dim_str.split_once('.').ok_or_else(|| {
            MorphError::InvalidSequence(format!(
                "invalid dimensions format '{dim_str}', expected 'width.height'"
            ))
        })?;

        let width: u32 = w.parse().map_err(|_| {
            MorphError::InvalidSequence(format!("invalid width '{w}' in '{dim_str}'"))
        })?;
        let height: u32 = h.parse().map_err(|_| {
            MorphError::InvalidSequence(format!("invalid height '{h}' in '{dim_str}'"))
        })?;

        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSequence(format!(
                "dimensions must be > 0, got {width}x{height}"
            )));
        }
        Ok((width, height))
    }

    /// Get the operations in this sequence
    pub fn ops(&self) -> &[MorphOp] {
        &self.ops
    }

    /// Get the number of operations in the sequence
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Execute a binary morphological sequence on an image
///
/// # Errors
///
/// Returns [`MorphError::UnsupportedDepth`] unless `pix` is 1 bpp, and
/// the parse errors of [`MorphSequence::parse`].
///
/// C equivalent: `pixMorphSequence()` in `morphseq.c`
pub fn morph_sequence(pix: &Pix, sequence: &str) -> MorphResult<Pix> {
    check_binary(pix)?;
    let seq = MorphSequence::parse(sequence)?;

    let mut result = pix.clone();
    for op in seq.ops() {
        result = op.apply(&result)?;
    }
    Ok(result)
}
