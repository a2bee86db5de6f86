//! Pixel geometry and fill primitives.
//!
//! Every primitive is clipped to its cell rectangle and tests coverage at pixel
//! centers, so output is deterministic and a module never bleeds into its
//! neighbours.

use image::{Rgba, RgbaImage};

use crate::error::{RenderError, Result};
use crate::matrix::MARGIN;

/// A square region of the bitmap, in pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, size: u32) -> Self {
        Rect { x, y, size }
    }

    /// Centered square whose side is `fraction` of this one, rounded down.
    pub fn inset(self, fraction: f32) -> Rect {
        let side = ((self.size as f32) * fraction).floor() as u32;
        let side = side.min(self.size);
        let offset = (self.size - side) / 2;
        Rect::new(self.x + offset, self.y + offset, side)
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.size && py < self.y + self.size
    }

    /// Pixels of the rect inside a `width`×`height` image, each paired with its
    /// center relative to the rect origin.
    fn pixels(&self, width: u32, height: u32) -> impl Iterator<Item = (u32, u32, f32, f32)> {
        let (x0, y0) = (self.x, self.y);
        let x_end = (x0 + self.size).min(width);
        let y_end = (y0 + self.size).min(height);
        (y0..y_end).flat_map(move |py| {
            (x0..x_end).map(move |px| {
                let u = (px - x0) as f32 + 0.5;
                let v = (py - y0) as f32 + 0.5;
                (px, py, u, v)
            })
        })
    }
}

/// Largest accepted bitmap side, in pixels.
pub const MAX_SIZE_PX: u32 = 8192;

/// Maps module coordinates to bitmap pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
    pub size_px: u32,
    pub modules: u32,
    /// Side of one module, in pixels.
    pub cell: u32,
    /// Pixel offset of module `(0, 0)`. The grid is centered, so the quiet zone is
    /// at least `MARGIN` cells wide.
    pub origin: u32,
}

impl Layout {
    pub fn new(size_px: u32, modules: usize) -> Result<Self> {
        if size_px == 0 || size_px > MAX_SIZE_PX {
            return Err(RenderError::InvalidSize(size_px));
        }
        let modules = modules as u32;
        let cell = size_px / (modules + 2 * MARGIN);
        if cell == 0 {
            return Err(RenderError::ModuleTooSmall {
                size: size_px,
                modules,
            });
        }
        let origin = (size_px - cell * modules) / 2;
        Ok(Layout {
            size_px,
            modules,
            cell,
            origin,
        })
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.origin + col as u32 * self.cell,
            self.origin + row as u32 * self.cell,
            self.cell,
        )
    }
}

pub fn fill_rect(img: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    for (px, py, _, _) in rect.pixels(img.width(), img.height()) {
        img.put_pixel(px, py, color);
    }
}

/// Rounded square, `radius` in pixels. Radii beyond half the side are clamped.
pub fn fill_rounded_rect(img: &mut RgbaImage, rect: Rect, radius: f32, color: Rgba<u8>) {
    let side = rect.size as f32;
    let r = radius.clamp(0.0, side / 2.0);
    for (px, py, u, v) in rect.pixels(img.width(), img.height()) {
        // Distance from the pixel center to the inner, unrounded square.
        let dx = u - u.clamp(r, side - r);
        let dy = v - v.clamp(r, side - r);
        if dx * dx + dy * dy <= r * r {
            img.put_pixel(px, py, color);
        }
    }
}

/// Circle of `radius` pixels centered in `rect`.
pub fn fill_circle(img: &mut RgbaImage, rect: Rect, radius: f32, color: Rgba<u8>) {
    let c = rect.size as f32 / 2.0;
    for (px, py, u, v) in rect.pixels(img.width(), img.height()) {
        let (dx, dy) = (u - c, v - c);
        if dx * dx + dy * dy <= radius * radius {
            img.put_pixel(px, py, color);
        }
    }
}

/// Square rotated by 45 degrees, tips touching the middle of each edge.
pub fn fill_rhombus(img: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let c = rect.size as f32 / 2.0;
    for (px, py, u, v) in rect.pixels(img.width(), img.height()) {
        if (u - c).abs() + (v - c).abs() <= c {
            img.put_pixel(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn canvas(side: u32) -> RgbaImage {
        RgbaImage::from_pixel(side, side, PAPER)
    }

    fn inked(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| **p == INK).count()
    }

    #[test]
    fn test_layout_centers_grid() {
        let layout = Layout::new(200, 25).unwrap();
        assert_eq!(layout.cell, 6);
        assert_eq!(layout.origin, 25);
        assert_eq!(layout.cell_rect(0, 0), Rect::new(25, 25, 6));
        assert_eq!(layout.cell_rect(24, 1), Rect::new(31, 169, 6));
        assert!(layout.origin >= MARGIN * layout.cell);
    }

    #[test]
    fn test_layout_rejects_degenerate_sizes() {
        assert!(matches!(Layout::new(0, 25), Err(RenderError::InvalidSize(0))));
        assert!(matches!(
            Layout::new(MAX_SIZE_PX + 1, 25),
            Err(RenderError::InvalidSize(_))
        ));
        assert_eq!(Layout::new(MAX_SIZE_PX, 25).unwrap().size_px, MAX_SIZE_PX);
        assert!(matches!(
            Layout::new(28, 25),
            Err(RenderError::ModuleTooSmall { size: 28, modules: 25 })
        ));
        assert_eq!(Layout::new(29, 25).unwrap().cell, 1);
    }

    #[test]
    fn test_primitives_stay_inside_cell() {
        let rect = Rect::new(3, 3, 10);
        let mut img = canvas(16);
        fill_rect(&mut img, rect, INK);
        assert_eq!(inked(&img), 100);

        let draws: [fn(&mut RgbaImage, Rect); 3] = [
            |img, r| fill_rounded_rect(img, r, 3.0, INK),
            |img, r| fill_circle(img, r, 5.0, INK),
            |img, r| fill_rhombus(img, r, INK),
        ];
        for draw in draws {
            let mut img = canvas(16);
            draw(&mut img, rect);
            let n = inked(&img);
            assert!(n > 0 && n < 100);
            for (x, y, p) in img.enumerate_pixels() {
                if *p == INK {
                    assert!(rect.contains(x, y));
                }
            }
            // The cell center is always covered.
            assert_eq!(*img.get_pixel(8, 8), INK);
        }
    }

    #[test]
    fn test_rounding_removes_corners() {
        let rect = Rect::new(0, 0, 10);
        let mut img = canvas(10);
        fill_rounded_rect(&mut img, rect, 4.0, INK);
        assert_eq!(*img.get_pixel(0, 0), PAPER);
        assert_eq!(*img.get_pixel(9, 9), PAPER);
        assert_eq!(*img.get_pixel(5, 0), INK);

        let mut flat = canvas(10);
        fill_rounded_rect(&mut flat, rect, 0.0, INK);
        assert_eq!(inked(&flat), 100);
    }

    #[test]
    fn test_inset_is_centered() {
        let rect = Rect::new(10, 10, 10);
        assert_eq!(rect.inset(0.6), Rect::new(12, 12, 6));
        assert_eq!(Rect::new(0, 0, 1).inset(0.6).size, 0);
    }

    #[test]
    fn test_clipped_to_image() {
        let mut img = canvas(4);
        fill_circle(&mut img, Rect::new(2, 2, 6), 3.0, INK);
        fill_rect(&mut img, Rect::new(3, 3, 5), INK);
        assert_eq!(*img.get_pixel(3, 3), INK);
    }
}
