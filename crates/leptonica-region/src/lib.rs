//! leptonica-region - Region processing for Leptonica
//!
//! This crate provides:
//!
//! - **Connected component analysis** - bounding boxes and per-component masks
//! - **Seed fill** - binary reconstruction of a seed inside a mask
//!
//! # Examples
//!
//! ```
//! use leptonica_region::{conncomp_pixa, ConnectivityType};
//! use leptonica_core::{Pix, PixelDepth};
//!
//! let mut pix_mut = Pix::new(100, 100, PixelDepth::Bit1).unwrap().to_mut();
//! pix_mut.set_pixel(10, 10, 1).unwrap();
//! pix_mut.set_pixel(11, 10, 1).unwrap();
//! pix_mut.set_pixel(50, 50, 1).unwrap();
//! let pix: Pix = pix_mut.into();
//!
//! let (boxa, pixa) = conncomp_pixa(&pix, ConnectivityType::FourWay).unwrap();
//! assert_eq!(boxa.len(), 2);
//! assert_eq!(pixa.get(0).unwrap().width(), 2);
//! ```

pub mod conncomp;
pub mod error;
pub mod seedfill;

pub use error::{RegionError, RegionResult};

pub use conncomp::{
    ConnectedComponent, ConnectivityType, conncomp_pixa, find_connected_components,
};
pub use seedfill::seedfill_binary;
