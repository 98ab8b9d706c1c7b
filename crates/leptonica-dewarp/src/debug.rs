//! Diagnostic output for model building
//!
//! Builders report intermediate images, line sets and disparity grids to
//! a [`DewarpDebug`] sink passed in by the caller. [`NoDebug`] discards
//! everything; [`DebugDir`] writes numbered files into a directory.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use leptonica_core::{FPix, Pix, Ptaa};
use leptonica_io::write_png_file;
use log::warn;

use crate::DewarpResult;

/// Receiver for intermediate results of a model build
///
/// Every method defaults to doing nothing. `stage` is a short name for
/// the step that produced the data, such as `"textline_centers"`.
pub trait DewarpDebug {
    /// An intermediate binary image
    fn image(&mut self, _stage: &str, _pix: &Pix) {}

    /// A set of lines
    fn lines(&mut self, _stage: &str, _lines: &Ptaa) {}

    /// A sampled disparity grid
    fn disparity(&mut self, _stage: &str, _grid: &FPix) {}
}

/// Sink that drops all diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDebug;

impl DewarpDebug for NoDebug {}

/// Sink that writes diagnostics into a directory
///
/// Images are written as PNG, lines and grids as plain text. Files are
/// prefixed with a running number so they sort in build order. Write
/// failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct DebugDir {
    dir: PathBuf,
    count: usize,
}

impl DebugDir {
    /// Use `dir`, creating it if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> DewarpResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(leptonica_io::IoError::from)?;
        Ok(Self { dir, count: 0 })
    }

    /// The output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of files written so far
    pub fn count(&self) -> usize {
        self.count
    }

    fn next_path(&mut self, stage: &str, ext: &str) -> PathBuf {
        self.count += 1;
        self.dir.join(format!("{:03}_{}.{}", self.count, stage, ext))
    }

    fn write_text(&mut self, stage: &str, text: String) {
        let path = self.next_path(stage, "txt");
        if let Err(e) = fs::write(&path, text) {
            warn!("failed to write {}: {e}", path.display());
        }
    }
}

impl DewarpDebug for DebugDir {
    fn image(&mut self, stage: &str, pix: &Pix) {
        let path = self.next_path(stage, "png");
        if let Err(e) = write_png_file(pix, &path) {
            warn!("failed to write {}: {e}", path.display());
        }
    }

    fn lines(&mut self, stage: &str, lines: &Ptaa) {
        let mut text = String::new();
        for (i, pta) in lines.iter().enumerate() {
            let _ = writeln!(text, "line {i}: {} points", pta.len());
            for (x, y) in pta.iter() {
                let _ = writeln!(text, "  {x:.2} {y:.2}");
            }
        }
        self.write_text(stage, text);
    }

    fn disparity(&mut self, stage: &str, grid: &FPix) {
        let (nx, ny) = grid.dimensions();
        let mut text = format!("{nx} x {ny}\n");
        for i in 0..ny {
            let row: Vec<String> = grid.row(i).iter().map(|v| format!("{v:.2}")).collect();
            let _ = writeln!(text, "{}", row.join(" "));
        }
        self.write_text(stage, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptonica_core::{PixelDepth, Pta};

    #[test]
    fn test_debug_dir_writes_numbered_files() {
        let dir = std::env::temp_dir().join("leptonica_dewarp_debug_test");
        let _ = fs::remove_dir_all(&dir);
        let mut sink = DebugDir::new(&dir).unwrap();

        let pix = Pix::new(16, 8, PixelDepth::Bit1).unwrap();
        sink.image("page", &pix);
        let lines: Ptaa = [[(0.0, 1.0), (2.0, 3.0)].into_iter().collect::<Pta>()]
            .into_iter()
            .collect();
        sink.lines("centers", &lines);
        sink.disparity("grid", &FPix::new_with_value(2, 2, 0.5).unwrap());

        assert_eq!(sink.count(), 3);
        assert!(dir.join("001_page.png").exists());
        let text = fs::read_to_string(dir.join("002_centers.txt")).unwrap();
        assert!(text.starts_with("line 0: 2 points"));
        let grid = fs::read_to_string(dir.join("003_grid.txt")).unwrap();
        assert_eq!(grid, "2 x 2\n0.50 0.50\n0.50 0.50\n");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_no_debug_accepts_everything() {
        let mut sink = NoDebug;
        let pix = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        sink.image("x", &pix);
        sink.lines("x", &Ptaa::new());
    }
}
