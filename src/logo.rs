//! Center logo overlay.
//!
//! A logo is either one of the built-in [`Glyph`]s, painted in the foreground color,
//! or an uploaded raster image carried inline as base64. The overlay clears a
//! centered square to the background color and draws the logo inside it; the hidden
//! modules are recovered by the decoder's error correction.

use base64::Engine as _;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::config::{Glyph, Logo};
use crate::draw::{fill_rect, Rect};
use crate::error::Result;

const GLYPH_SIZE: u32 = 7;

// One row per byte, most significant of the low seven bits on the left.
const HEART: [u8; 7] = [
    0b0110110, 0b1111111, 0b1111111, 0b1111111, 0b0111110, 0b0011100, 0b0001000,
];
const PLUS: [u8; 7] = [
    0b0011100, 0b0011100, 0b1111111, 0b1111111, 0b1111111, 0b0011100, 0b0011100,
];
const PHONE: [u8; 7] = [
    0b1100000, 0b1110000, 0b0110000, 0b0011000, 0b0001100, 0b0000111, 0b0000011,
];
const MAIL: [u8; 7] = [
    0b1111111, 0b1100011, 0b1010101, 0b1001001, 0b1000001, 0b1000001, 0b1111111,
];

impl Glyph {
    fn rows(self) -> &'static [u8; 7] {
        match self {
            Glyph::Heart => &HEART,
            Glyph::Plus => &PLUS,
            Glyph::Phone => &PHONE,
            Glyph::Mail => &MAIL,
        }
    }

    /// Whether glyph cell `(gx, gy)` is inked.
    pub fn is_set(self, gx: u32, gy: u32) -> bool {
        if gx >= GLYPH_SIZE || gy >= GLYPH_SIZE {
            return false;
        }
        (self.rows()[gy as usize] >> (GLYPH_SIZE - 1 - gx)) & 1 == 1
    }
}

/// A logo ready to be composited.
#[derive(Clone, PartialEq, Debug)]
pub enum LogoImage {
    Glyph(Glyph),
    Raster(RgbaImage),
}

/// Regions used by the overlay for a `size_px` bitmap: the cleared square and the
/// logo box inside it. The logo box is 20% of the side; the cleared square adds
/// `max(1, size_px / 50)` pixels of padding on each side.
pub fn overlay_rect(size_px: u32) -> (Rect, Rect) {
    let logo_side = size_px / 5;
    let pad = (size_px / 50).max(1);
    let clear_side = (logo_side + 2 * pad).min(size_px);
    let centered = |side: u32| {
        let at = (size_px - side) / 2;
        Rect::new(at, at, side)
    };
    (centered(clear_side), centered(logo_side))
}

/// Decodes a configured logo. Glyphs never fail; inline rasters fail on bad
/// base64 or an unreadable image.
pub fn decode(logo: &Logo) -> Result<LogoImage> {
    match logo {
        Logo::Glyph(glyph) => Ok(LogoImage::Glyph(*glyph)),
        Logo::Inline(data) => Ok(LogoImage::Raster(decode_inline(data)?)),
    }
}

/// Accepts `data:image/png;base64,....` URIs as well as bare base64.
pub fn decode_inline(data: &str) -> Result<RgbaImage> {
    let data = data.trim();
    let encoded = match data.strip_prefix("data:") {
        Some(uri) => uri.split_once(',').map_or(uri, |(_, payload)| payload),
        None => data,
    };
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD.decode(compact)?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Clears the center of `img` and draws the logo there.
pub fn composite(img: &mut RgbaImage, logo: &LogoImage, foreground: Rgba<u8>, background: Rgba<u8>) {
    let (clear, logo_box) = overlay_rect(img.width().min(img.height()));
    fill_rect(img, clear, background);
    if logo_box.size == 0 {
        return;
    }

    match logo {
        LogoImage::Glyph(glyph) => {
            let side = logo_box.size;
            for dy in 0..side {
                for dx in 0..side {
                    if glyph.is_set(dx * GLYPH_SIZE / side, dy * GLYPH_SIZE / side) {
                        img.put_pixel(logo_box.x + dx, logo_box.y + dy, foreground);
                    }
                }
            }
        }
        LogoImage::Raster(raster) => {
            let (w, h) = raster.dimensions();
            if w == 0 || h == 0 {
                return;
            }
            // Fit inside the logo box, keeping the aspect ratio.
            let side = logo_box.size as u64;
            let (fit_w, fit_h) = if w >= h {
                (side, (side * h as u64 / w as u64).max(1))
            } else {
                ((side * w as u64 / h as u64).max(1), side)
            };
            let scaled = imageops::resize(raster, fit_w as u32, fit_h as u32, FilterType::Triangle);
            let x = logo_box.x as u64 + (side - fit_w) / 2;
            let y = logo_box.y as u64 + (side - fit_h) / 2;
            imageops::overlay(img, &scaled, x as i64, y as i64);
        }
    }
}
