//! Affine coefficients from point correspondences
//!
//! An affine transformation is
//! ```text
//! x' = a*x + b*y + c
//! y' = d*x + e*y + f
//! ```
//! and is fixed by three non-collinear point pairs.
//!
//! # C API correspondence
//!
//! | Rust function | C function |
//! |---|---|
//! | `affine_xform_coeffs` | `getAffineXformCoeffs` |
//! | `AffineMatrix::transform_point` | `affineXformPt` |

use crate::{TransformError, TransformResult};
use leptonica_core::{Pta, gauss_jordan};

/// Affine transformation coefficients `[a, b, c, d, e, f]`
#[derive(Debug, Clone, PartialEq)]
pub struct AffineMatrix {
    coeffs: [f32; 6],
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// The identity transformation
    pub fn identity() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
    }

    /// Create from raw coefficients
    pub fn from_coeffs(coeffs: [f32; 6]) -> Self {
        Self { coeffs }
    }

    /// Solve for the transformation taking each `src` point to its `dst` point
    ///
    /// See [`affine_xform_coeffs`].
    pub fn from_pta(src: &Pta, dst: &Pta) -> TransformResult<Self> {
        affine_xform_coeffs(src, dst).map(Self::from_coeffs)
    }

    /// Get the raw coefficients
    pub fn coeffs(&self) -> &[f32; 6] {
        &self.coeffs
    }

    /// Map a point through this transformation
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.coeffs;
        (a * x + b * y + c, d * x + e * y + f)
    }
}

/// Solve for the affine coefficients mapping three `src` points onto three
/// `dst` points.
///
/// Builds the 6x6 linear system, two rows per point pair, and solves it
/// with Gauss-Jordan elimination.
///
/// # Errors
///
/// - [`TransformError::InvalidParameters`] unless both Pta hold exactly 3 points.
/// - [`TransformError::SingularMatrix`] if the source points are collinear.
///
/// C equivalent: `getAffineXformCoeffs()` in `affine.c`
pub fn affine_xform_coeffs(src: &Pta, dst: &Pta) -> TransformResult<[f32; 6]> {
    if src.len() != 3 || dst.len() != 3 {
        return Err(TransformError::InvalidParameters(format!(
            "need 3 point pairs; got {} src and {} dst",
            src.len(),
            dst.len()
        )));
    }

    let pts: Vec<(f64, f64)> = src.iter().map(|(x, y)| (x as f64, y as f64)).collect();
    let (x0, y0) = pts[0];
    let area = (pts[1].0 - x0) * (pts[2].1 - y0) - (pts[2].0 - x0) * (pts[1].1 - y0);
    if area == 0.0 {
        return Err(TransformError::SingularMatrix);
    }

    let mut a = Vec::with_capacity(6);
    let mut b = Vec::with_capacity(6);
    for (&(x, y), (xd, yd)) in pts.iter().zip(dst.iter()) {
        a.push(vec![x, y, 1.0, 0.0, 0.0, 0.0]);
        b.push(xd as f64);
        a.push(vec![0.0, 0.0, 0.0, x, y, 1.0]);
        b.push(yd as f64);
    }
    gauss_jordan(&mut a, &mut b).map_err(|_| TransformError::SingularMatrix)?;

    let mut coeffs = [0f32; 6];
    for (c, v) in coeffs.iter_mut().zip(&b) {
        if !v.is_finite() {
            return Err(TransformError::SingularMatrix);
        }
        *c = *v as f32;
    }
    Ok(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pta(pts: &[(f32, f32)]) -> Pta {
        pts.iter().copied().collect()
    }

    #[test]
    fn test_identity_mapping() {
        let p = pta(&[(0.0, 0.0), (100.0, 0.0), (0.0, 50.0)]);
        let coeffs = affine_xform_coeffs(&p, &p).unwrap();
        let expected = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        for (c, e) in coeffs.iter().zip(expected) {
            assert!((c - e).abs() < 1e-6, "{coeffs:?}");
        }
    }

    #[test]
    fn test_maps_control_points() {
        let src = pta(&[(10.0, 20.0), (300.0, 40.0), (50.0, 400.0)]);
        // Rotation-ish plus translation
        let dst = pta(&[(15.0, 5.0), (305.0, 35.0), (20.0, 390.0)]);
        let m = AffineMatrix::from_pta(&src, &dst).unwrap();
        for ((xs, ys), (xd, yd)) in src.iter().zip(dst.iter()) {
            let (x, y) = m.transform_point(xs, ys);
            assert!((x - xd).abs() < 1e-3 && (y - yd).abs() < 1e-3);
        }
    }

    #[test]
    fn test_collinear_is_singular() {
        let src = pta(&[(0.0, 0.0), (10.0, 10.0), (25.0, 25.0)]);
        let dst = pta(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert!(matches!(
            affine_xform_coeffs(&src, &dst),
            Err(TransformError::SingularMatrix)
        ));
    }

    #[test]
    fn test_wrong_point_count() {
        let src = pta(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(matches!(
            affine_xform_coeffs(&src, &src),
            Err(TransformError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_identity_default() {
        let m = AffineMatrix::default();
        assert_eq!(m.transform_point(3.0, -4.0), (3.0, -4.0));
        assert_eq!(m.coeffs(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }
}
