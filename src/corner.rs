use image::{Rgba, RgbaImage};

use crate::config::CornerStyle;
use crate::draw::{fill_circle, fill_rect, fill_rhombus, fill_rounded_rect, Rect};

/// Fraction of the cell removed from the middle of `classy` modules.
const CUTOUT: f32 = 0.6;

/// Draws one dark module of a finder pattern. `background` is needed by the
/// styles that cut a hole into the module.
pub fn draw_corner(
    img: &mut RgbaImage,
    rect: Rect,
    style: CornerStyle,
    foreground: Rgba<u8>,
    background: Rgba<u8>,
) {
    let cell = rect.size as f32;
    match style {
        CornerStyle::Square => fill_rect(img, rect, foreground),
        CornerStyle::Rounded => fill_rounded_rect(img, rect, 0.25 * cell, foreground),
        CornerStyle::Circle => fill_circle(img, rect, cell / 2.0, foreground),
        CornerStyle::ExtraRounded => fill_rounded_rect(img, rect, 0.4 * cell, foreground),
        CornerStyle::Dot => fill_circle(img, rect, 0.4 * cell, foreground),
        CornerStyle::Classy => {
            fill_rect(img, rect, foreground);
            fill_rect(img, rect.inset(CUTOUT), background);
        }
        CornerStyle::ClassyRounded => {
            fill_rounded_rect(img, rect, 0.2 * cell, foreground);
            fill_rounded_rect(img, rect.inset(CUTOUT), 0.15 * cell, background);
        }
        CornerStyle::Smooth => fill_rounded_rect(img, rect, 0.3 * cell, foreground),
        CornerStyle::SmoothRounded => fill_rounded_rect(img, rect, 0.35 * cell, foreground),
        CornerStyle::Cut | CornerStyle::Diamond => fill_rhombus(img, rect, foreground),
        // The pointed family shares a single primitive for now.
        CornerStyle::Pointed
        | CornerStyle::PointedSmooth
        | CornerStyle::PointedEdge
        | CornerStyle::PointedInverted => fill_rounded_rect(img, rect, 0.2 * cell, foreground),
    }
}
