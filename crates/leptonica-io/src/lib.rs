//! leptonica-io - PNG I/O for Leptonica
//!
//! Images are written and read as PNG only. This is enough to persist
//! debug renderings and regression-test output.

mod error;
pub mod png;

pub use error::{IoError, IoResult};
pub use self::png::{read_png, read_png_file, write_png, write_png_file};
