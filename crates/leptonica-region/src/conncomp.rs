//! Connected component analysis
//!
//! Components are found by scanning in raster order for the next
//! unlabeled ON pixel and flood-filling from it with a queue. They are
//! therefore returned in the raster order of their first pixel.

use crate::error::{RegionError, RegionResult};
use leptonica_core::{Box, Boxa, Pix, Pixa, PixelDepth};
use std::collections::VecDeque;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// Neighbor offsets for this connectivity
    pub(crate) fn offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(i32, i32); 8] = [
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
            (-1, -1),
            (1, -1),
            (-1, 1),
            (1, 1),
        ];
        match self {
            ConnectivityType::FourWay => &FOUR,
            ConnectivityType::EightWay => &EIGHT,
        }
    }
}

/// A connected component in an image
#[derive(Debug, Clone)]
pub struct ConnectedComponent {
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
}

/// Find all connected components in a binary image
///
/// Returns each component's pixel count and bounding box, in raster
/// order of the components' first pixels.
///
/// C equivalent: `pixConnCompBB()` in `conncomp.c`
pub fn find_connected_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    Ok(scan_components(pix, connectivity)?
        .into_iter()
        .map(|c| ConnectedComponent {
            pixel_count: c.pixels.len() as u32,
            bounds: c.bounds,
        })
        .collect())
}

/// Find connected components, with a mask image for each.
///
/// Each mask is a 1 bpp image the size of the component's bounding box
/// holding only that component's pixels (other components that poke into
/// the box are excluded). The returned Boxa and the boxes stored in the
/// Pixa are the same.
///
/// C equivalent: `pixConnComp(pixs, &pixa, connectivity)` in `conncomp.c`
pub fn conncomp_pixa(pix: &Pix, connectivity: ConnectivityType) -> RegionResult<(Boxa, Pixa)> {
    let comps = scan_components(pix, connectivity)?;
    let mut boxa = Boxa::with_capacity(comps.len());
    let mut pixa = Pixa::with_capacity(comps.len());

    for comp in comps {
        let b = comp.bounds;
        let mut mask = Pix::new(b.w as u32, b.h as u32, PixelDepth::Bit1)?.to_mut();
        for (x, y) in comp.pixels {
            mask.set_pixel_unchecked(x - b.x as u32, y - b.y as u32, 1);
        }
        boxa.push(b);
        pixa.push_with_box(mask.into(), b);
    }
    Ok((boxa, pixa))
}

struct Component {
    pixels: Vec<(u32, u32)>,
    bounds: Box,
}

fn scan_components(pix: &Pix, connectivity: ConnectivityType) -> RegionResult<Vec<Component>> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1-bit",
            actual: pix.depth().bits(),
        });
    }

    let (w, h) = (pix.width(), pix.height());
    let mut visited = vec![false; (w as usize) * (h as usize)];
    let mut comps = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if visited[idx] || pix.get_pixel_unchecked(x, y) == 0 {
                continue;
            }

            visited[idx] = true;
            queue.push_back((x, y));
            let mut pixels = Vec::new();
            let (mut xmin, mut ymin, mut xmax, mut ymax) = (x, y, x, y);

            while let Some((cx, cy)) = queue.pop_front() {
                pixels.push((cx, cy));
                xmin = xmin.min(cx);
                xmax = xmax.max(cx);
                ymin = ymin.min(cy);
                ymax = ymax.max(cy);

                for &(dx, dy) in connectivity.offsets() {
                    let (nx, ny) = (cx as i32 + dx, cy as i32 + dy);
                    if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    let nidx = (ny * w + nx) as usize;
                    if !visited[nidx] && pix.get_pixel_unchecked(nx, ny) != 0 {
                        visited[nidx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }

            let bounds = Box::new_unchecked(
                xmin as i32,
                ymin as i32,
                (xmax - xmin + 1) as i32,
                (ymax - ymin + 1) as i32,
            );
            comps.push(Component { pixels, bounds });
        }
    }
    Ok(comps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pix(w: u32, h: u32, on: &[(u32, u32)]) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().to_mut();
        for &(x, y) in on {
            pm.set_pixel(x, y, 1).unwrap();
        }
        pm.into()
    }

    #[test]
    fn test_diagonal_connectivity() {
        let pix = make_pix(5, 5, &[(0, 0), (1, 1), (2, 2), (4, 0)]);
        let four = find_connected_components(&pix, ConnectivityType::FourWay).unwrap();
        let eight = find_connected_components(&pix, ConnectivityType::EightWay).unwrap();
        assert_eq!(four.len(), 4);
        assert_eq!(eight.len(), 2);
        assert_eq!(eight[0].pixel_count, 3);
        assert_eq!(eight[0].bounds, Box::new_unchecked(0, 0, 3, 3));
    }

    #[test]
    fn test_raster_order() {
        let pix = make_pix(10, 10, &[(8, 1), (1, 5), (5, 0)]);
        let comps = find_connected_components(&pix, ConnectivityType::FourWay).unwrap();
        let xs: Vec<i32> = comps.iter().map(|c| c.bounds.x).collect();
        assert_eq!(xs, vec![5, 8, 1]);
    }

    #[test]
    fn test_masks_hold_only_their_component() {
        // An L shape whose box contains a separate dot
        let pix = make_pix(
            8,
            8,
            &[(1, 1), (1, 2), (1, 3), (1, 4), (2, 4), (3, 4), (4, 4), (3, 2)],
        );
        let (boxa, pixa) = conncomp_pixa(&pix, ConnectivityType::EightWay).unwrap();
        assert_eq!(boxa.len(), 2);
        assert_eq!(pixa.len(), 2);

        let b = boxa.get(0).unwrap();
        assert_eq!(*b, Box::new_unchecked(1, 1, 4, 4));
        assert_eq!(pixa.get_box(0), Some(b));
        let mask = pixa.get(0).unwrap();
        assert_eq!((mask.width(), mask.height()), (4, 4));
        assert_eq!(mask.count_pixels().unwrap(), 7);
        assert_eq!(mask.get_pixel(2, 1), Some(0));

        let dot = pixa.get(1).unwrap();
        assert_eq!(dot.count_pixels().unwrap(), 1);
    }

    #[test]
    fn test_empty_and_depth() {
        let pix = Pix::new(6, 6, PixelDepth::Bit1).unwrap();
        let (boxa, pixa) = conncomp_pixa(&pix, ConnectivityType::EightWay).unwrap();
        assert!(boxa.is_empty() && pixa.is_empty());
        let gray = Pix::new(6, 6, PixelDepth::Bit8).unwrap();
        assert!(conncomp_pixa(&gray, ConnectivityType::FourWay).is_err());
    }
}
