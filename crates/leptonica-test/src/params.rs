//! Regression test parameters and checks

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use leptonica_core::Pix;
use std::fs;
use std::path::{Path, PathBuf};

/// Regression test mode, read from `REGTEST_MODE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Write golden files
    Generate,
    /// Check against golden files
    #[default]
    Compare,
    /// Write outputs only
    Display,
}

impl RegTestMode {
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test
///
/// Every check bumps the index, so failures and output files can be traced
/// back to the check that produced them.
pub struct RegParams {
    pub test_name: String,
    pub mode: RegTestMode,
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a regression test, creating the golden and output directories
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());
        eprintln!("\n---- {test_name}_reg ({mode:?}) ----");

        Self {
            test_name: test_name.to_string(),
            mode,
            index: 0,
            failures: Vec::new(),
        }
    }

    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Check that `actual` is within `delta` of `expected`
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff <= delta {
            return true;
        }
        self.fail(format!(
            "expected {expected}, got {actual}: difference {diff} exceeds {delta}"
        ));
        false
    }

    /// Check that two images have the same size, depth and pixels
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;
        match pix_mismatch(pix1, pix2) {
            None => true,
            Some(what) => {
                self.fail(format!("images differ: {what}"));
                false
            }
        }
    }

    /// Write `pix` to the output directory as PNG and check it against its
    /// golden file according to the mode
    pub fn write_pix_and_check(&mut self, pix: &Pix) -> TestResult<()> {
        self.index += 1;
        let local = PathBuf::from(regout_dir())
            .join(format!("{}.{:02}.png", self.test_name, self.index));
        leptonica_io::write_png_file(pix, &local).map_err(|e| TestError::ImageWrite {
            path: local.display().to_string(),
            message: e.to_string(),
        })?;

        let golden = PathBuf::from(golden_dir())
            .join(format!("{}_golden.{:02}.png", self.test_name, self.index));
        match self.mode {
            RegTestMode::Generate => {
                fs::copy(&local, &golden)?;
                eprintln!("generated {}", golden.display());
            }
            RegTestMode::Compare => self.check_golden(pix, &golden),
            RegTestMode::Display => {}
        }
        Ok(())
    }

    fn check_golden(&mut self, pix: &Pix, golden: &Path) {
        match leptonica_io::read_png_file(golden) {
            Ok(expected) => {
                if let Some(what) = pix_mismatch(&expected, pix) {
                    self.fail(format!("{} differs: {what}", golden.display()));
                }
            }
            Err(e) => self.fail(format!("cannot read {}: {e}", golden.display())),
        }
    }

    fn fail(&mut self, what: String) {
        let msg = format!("{}_reg, index {}: {what}", self.test_name, self.index);
        eprintln!("Failure in {msg}");
        self.failures.push(msg);
    }

    /// Report the result; `true` when every check passed
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg\n", self.test_name);
            return true;
        }
        eprintln!("FAILURE: {}_reg", self.test_name);
        for failure in &self.failures {
            eprintln!("  {failure}");
        }
        eprintln!();
        false
    }
}

/// Description of the first difference between two images, if any
fn pix_mismatch(pix1: &Pix, pix2: &Pix) -> Option<String> {
    let dims = |p: &Pix| (p.width(), p.height(), p.depth().bits());
    if dims(pix1) != dims(pix2) {
        return Some(format!("{:?} vs {:?}", dims(pix1), dims(pix2)));
    }
    (0..pix1.height())
        .flat_map(|y| (0..pix1.width()).map(move |x| (x, y)))
        .find(|&(x, y)| pix1.get_pixel(x, y) != pix2.get_pixel(x, y))
        .map(|(x, y)| format!("pixel ({x}, {y})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptonica_core::PixelDepth;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params_values");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.failures.is_empty());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert_eq!(rp.failures.len(), 1);
        assert!(rp.failures[0].contains("index 3"));
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_pix() {
        let mut rp = RegParams::new("params_pix");
        let pix = Pix::new(20, 10, PixelDepth::Bit1).unwrap();
        let mut pm = pix.to_mut();
        pm.set_pixel(7, 3, 1).unwrap();
        let marked: Pix = pm.into();

        assert!(rp.compare_pix(&pix, &pix.deep_clone()));
        assert!(!rp.compare_pix(&pix, &marked));
        assert!(rp.failures[0].contains("pixel (7, 3)"));
        let other = Pix::new(20, 11, PixelDepth::Bit1).unwrap();
        assert!(!rp.compare_pix(&pix, &other));
    }
}
