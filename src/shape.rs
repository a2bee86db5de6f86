use image::{Rgba, RgbaImage};

use crate::config::ModuleShape;
use crate::draw::{fill_circle, fill_rect, fill_rounded_rect, Rect};

/// Draws one ordinary dark module.
pub fn draw_module(img: &mut RgbaImage, rect: Rect, shape: ModuleShape, color: Rgba<u8>) {
    let cell = rect.size as f32;
    match shape {
        ModuleShape::Square => fill_rect(img, rect, color),
        ModuleShape::Rounded => fill_rounded_rect(img, rect, 0.2 * cell, color),
        // Organic has no dedicated primitive yet and renders as a circle.
        ModuleShape::Circle | ModuleShape::Organic => fill_circle(img, rect, cell / 2.0, color),
        ModuleShape::Dot => fill_circle(img, rect, 0.3 * cell, color),
        ModuleShape::RoundedSquare => fill_rounded_rect(img, rect, 0.15 * cell, color),
    }
}
