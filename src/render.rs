//! The render pipeline.
//!
//! `StyleConfig -> ModuleMatrix -> classify -> shape / corner -> logo -> RgbaImage`.
//! Rendering is pure: the same configuration always produces the same pixels.

use image::RgbaImage;
use tracing::{debug, warn};

use crate::classify::classify;
use crate::config::StyleConfig;
use crate::corner::draw_corner;
use crate::draw::{Layout, MAX_SIZE_PX};
use crate::error::{RenderError, Result};
use crate::logo;
use crate::matrix::{generate, ModuleMatrix};
use crate::shape::draw_module;

/// Renders the full bitmap, logo included.
///
/// An inline logo is decoded synchronously. If it cannot be decoded the failure is
/// logged and the code is returned without it.
///
/// # Errors
///
/// Fails before drawing anything when the size is zero or too small for the grid,
/// or when the payload does not fit the allowed versions.
///
/// # Example
///
/// ```rust
/// use qrstyle::config::{CornerStyle, ModuleShape, StyleConfig};
/// use qrstyle::render::render;
///
/// let mut config = StyleConfig::new("https://example.com", 200);
/// config.module_shape = ModuleShape::Circle;
/// config.corner_style = CornerStyle::Diamond;
///
/// let img = render(&config).unwrap();
/// assert_eq!(img.dimensions(), (200, 200));
/// ```
pub fn render(config: &StyleConfig) -> Result<RgbaImage> {
    let mut img = render_base(config)?;
    if let Some(configured) = &config.logo {
        match logo::decode(configured) {
            Ok(decoded) => apply_logo(&mut img, config, &decoded),
            Err(err) => warn!(%err, "logo could not be decoded, rendering without it"),
        }
    }
    Ok(img)
}

/// Renders modules and finder patterns only.
pub fn render_base(config: &StyleConfig) -> Result<RgbaImage> {
    if config.size_px == 0 || config.size_px > MAX_SIZE_PX {
        return Err(RenderError::InvalidSize(config.size_px));
    }
    let matrix = generate(
        &config.payload,
        config.effective_ecc(),
        config.min_version,
        config.max_version,
    )?;
    render_matrix(&matrix, config)
}

/// Draws an already encoded matrix with the styling of `config`. The payload
/// and version window of `config` are ignored.
pub fn render_matrix(matrix: &ModuleMatrix, config: &StyleConfig) -> Result<RgbaImage> {
    let layout = Layout::new(config.size_px, matrix.size())?;
    debug!(
        version = matrix.version(),
        modules = matrix.size(),
        cell = layout.cell,
        shape = %config.module_shape,
        corner = %config.corner_style,
        "rendering QR code"
    );

    let foreground = config.foreground.to_rgba();
    let background = config.background.to_rgba();
    let mut img = RgbaImage::from_pixel(config.size_px, config.size_px, background);

    for row in 0..matrix.size() {
        for col in 0..matrix.size() {
            let module = classify(matrix, row, col);
            if !module.is_dark {
                continue;
            }
            let rect = layout.cell_rect(row, col);
            if module.zone.is_finder() {
                draw_corner(&mut img, rect, config.corner_style, foreground, background);
            } else {
                draw_module(&mut img, rect, config.module_shape, foreground);
            }
        }
    }
    Ok(img)
}

/// Composites a decoded logo with the colors of `config`.
pub fn apply_logo(img: &mut RgbaImage, config: &StyleConfig, decoded: &logo::LogoImage) {
    logo::composite(
        img,
        decoded,
        config.foreground.to_rgba(),
        config.background.to_rgba(),
    );
}
