//! Base matrix generation.
//!
//! Wraps the `qrcodegen` encoder and copies its modules into an owned grid so the
//! renderers never touch the encoder directly.
use qrcodegen::{QrCode, QrCodeEcc, QrSegment, Version};

use crate::config::ErrorCorrection;
use crate::error::{RenderError, Result};

/// Quiet zone around the symbol, in modules.
pub const MARGIN: u32 = 2;

/// Square grid of dark and light modules produced by the encoder.
///
/// Rows and columns are zero-based and exclude the quiet zone.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModuleMatrix {
    size: usize,
    version: u8,
    ecc: ErrorCorrection,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Builds a matrix from raw rows. Mostly useful for feeding pre-processed
    /// grids to the renderers.
    ///
    /// # Panics
    ///
    /// Panics if `modules` is not `size * size` long.
    pub fn from_modules(size: usize, modules: Vec<bool>) -> Self {
        assert_eq!(modules.len(), size * size, "Module count must be size * size");
        let version = size.saturating_sub(17) / 4;
        ModuleMatrix {
            size,
            version: u8::try_from(version).unwrap_or(u8::MAX),
            ecc: ErrorCorrection::High,
            modules,
        }
    }

    /// Width and height in modules (`version * 4 + 17`).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn error_correction(&self) -> ErrorCorrection {
        self.ecc
    }

    /// Returns the color of the module at `(row, col)`. Out-of-bounds
    /// coordinates are light, like the quiet zone.
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.modules[row * self.size + col]
    }

    /// Iterates over `(row, col)` of every dark module.
    pub fn dark_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(move |(i, _)| (i / self.size, i % self.size))
    }
}

fn version(value: u8) -> Result<Version> {
    if (Version::MIN.value()..=Version::MAX.value()).contains(&value) {
        Ok(Version::new(value))
    } else {
        Err(RenderError::InvalidVersion(value))
    }
}

/// Encodes `payload` with the smallest version in `min_version..=max_version`.
///
/// # Arguments
///
/// * `payload` - The text to encode.
/// * `ecc` - Error correction level. Never boosted.
/// * `min_version`, `max_version` - Inclusive version window, each in 1..=40.
///
/// # Errors
///
/// Returns [`RenderError::DataTooLong`] if the payload does not fit in `max_version`,
/// and [`RenderError::InvalidVersion`] for a malformed window.
///
/// # Example
///
/// ```rust
/// use qrstyle::config::ErrorCorrection;
/// use qrstyle::matrix::generate;
///
/// let matrix = generate("HELLO", ErrorCorrection::High, 2, 2).unwrap();
/// assert_eq!(matrix.size(), 25);
/// ```
pub fn generate(
    payload: &str,
    ecc: ErrorCorrection,
    min_version: u8,
    max_version: u8,
) -> Result<ModuleMatrix> {
    let minversion = version(min_version)?;
    let maxversion = version(max_version)?;
    if min_version > max_version {
        return Err(RenderError::InvalidVersion(min_version));
    }

    let segs = QrSegment::make_segments(payload);
    let qr = QrCode::encode_segments_advanced(
        &segs,
        QrCodeEcc::from(ecc),
        minversion,
        maxversion,
        None,
        false,
    )?;

    Ok(from_qr(&qr, ecc))
}

fn from_qr(qr: &QrCode, ecc: ErrorCorrection) -> ModuleMatrix {
    let size = qr.size();
    let mut modules = Vec::with_capacity((size * size) as usize);
    for y in 0..size {
        for x in 0..size {
            modules.push(qr.get_module(x, y));
        }
    }
    ModuleMatrix {
        size: size as usize,
        version: qr.version().value(),
        ecc,
        modules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_version_is_chosen() {
        let matrix = generate("hi", ErrorCorrection::High, 1, 40).unwrap();
        assert_eq!(matrix.version(), 1);
        assert_eq!(matrix.size(), 21);

        let matrix = generate("hi", ErrorCorrection::High, 2, 40).unwrap();
        assert_eq!(matrix.size(), 25);
    }

    #[test]
    fn test_capacity_boundary_at_target_grid() {
        // Byte mode, version 2, level High holds 14 bytes.
        let fits = "a".repeat(14);
        let matrix = generate(&fits, ErrorCorrection::High, 1, 2).unwrap();
        assert_eq!(matrix.size(), 25);

        let too_long = "a".repeat(15);
        let err = generate(&too_long, ErrorCorrection::High, 1, 2).unwrap_err();
        assert!(matches!(err, RenderError::DataTooLong(_)));
        assert!(err.to_string().starts_with("content too long to encode"));
    }

    #[test]
    fn test_capacity_boundary_at_max_version() {
        let fits = "a".repeat(1273);
        let matrix = generate(&fits, ErrorCorrection::High, 1, 40).unwrap();
        assert_eq!(matrix.version(), 40);
        assert_eq!(matrix.size(), 177);

        let too_long = "a".repeat(1274);
        assert!(matches!(
            generate(&too_long, ErrorCorrection::High, 1, 40),
            Err(RenderError::DataTooLong(_))
        ));
    }

    #[test]
    fn test_invalid_version_window() {
        assert!(matches!(
            generate("x", ErrorCorrection::High, 0, 40),
            Err(RenderError::InvalidVersion(0))
        ));
        assert!(matches!(
            generate("x", ErrorCorrection::High, 1, 41),
            Err(RenderError::InvalidVersion(41))
        ));
        assert!(matches!(
            generate("x", ErrorCorrection::High, 5, 3),
            Err(RenderError::InvalidVersion(5))
        ));
    }

    #[test]
    fn test_finder_pattern_present() {
        let matrix = generate("finder", ErrorCorrection::High, 2, 2).unwrap();
        let n = matrix.size();
        // Outer ring dark, separator ring light, 3x3 core dark.
        for (r, c) in [(0, 0), (0, n - 1), (n - 1, 0)] {
            assert!(matrix.is_dark(r, c));
        }
        assert!(!matrix.is_dark(1, 1));
        assert!(matrix.is_dark(3, 3));
        assert!(!matrix.is_dark(7, 7));
        assert!(!matrix.is_dark(n, 0));
        assert_eq!(matrix.dark_cells().filter(|&(r, c)| r < 7 && c < 7).count(), 33);
    }
}
