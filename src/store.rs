//! Holder of the current style, driving re-renders.
//!
//! The store owns a [`StyleConfig`] and the last rendered preview. Every mutation
//! bumps a generation counter and re-renders from scratch. Modules, corners and
//! glyph logos are drawn synchronously; uploaded logos decode on a blocking task
//! and are composited by [`StyleStore::settle`] only if no newer render happened
//! in between.

use image::RgbaImage;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::{Color, CornerStyle, Frame, Logo, ModuleShape, StyleConfig};
use crate::error::{RenderError, Result};
use crate::logo::{self, LogoImage};
use crate::render::{apply_logo, render_base};

struct PendingLogo {
    generation: u64,
    task: JoinHandle<Result<LogoImage>>,
}

#[derive(Default)]
pub struct StyleStore {
    config: Option<StyleConfig>,
    generation: u64,
    preview: Option<Result<RgbaImage>>,
    pending: Option<PendingLogo>,
}

impl StyleStore {
    /// An unconfigured store with no preview.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&StyleConfig> {
        self.config.as_ref()
    }

    /// Number of renders triggered so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The latest bitmap, the error that prevented it, or `None` before the
    /// store is configured.
    pub fn preview(&self) -> Option<std::result::Result<&RgbaImage, &RenderError>> {
        self.preview.as_ref().map(|p| p.as_ref())
    }

    /// Whether an uploaded logo is still being decoded for the current render.
    pub fn has_pending_logo(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces the whole configuration and renders it.
    ///
    /// Inside a Tokio runtime an inline logo decodes on a blocking task and is
    /// composited by [`StyleStore::settle`]; outside one it is decoded on the spot.
    pub fn configure(&mut self, config: StyleConfig) {
        self.config = Some(config);
        self.rerender();
    }

    /// Applies `f` to the current configuration and re-renders. Does nothing on an
    /// unconfigured store.
    pub fn update(&mut self, f: impl FnOnce(&mut StyleConfig)) {
        let Some(config) = self.config.as_mut() else {
            return;
        };
        f(config);
        self.rerender();
    }

    pub fn set_payload(&mut self, payload: impl Into<String>) {
        let payload = payload.into();
        self.update(|c| c.payload = payload);
    }

    pub fn set_size(&mut self, size_px: u32) {
        self.update(|c| c.size_px = size_px);
    }

    pub fn set_shape(&mut self, shape: ModuleShape) {
        self.update(|c| c.module_shape = shape);
    }

    pub fn set_corner(&mut self, corner: CornerStyle) {
        self.update(|c| c.corner_style = corner);
    }

    pub fn set_colors(&mut self, foreground: Color, background: Color) {
        self.update(|c| {
            c.foreground = foreground;
            c.background = background;
        });
    }

    pub fn set_frame(&mut self, frame: Frame) {
        self.update(|c| c.frame = frame);
    }

    pub fn set_logo(&mut self, logo: Option<Logo>) {
        self.update(|c| c.logo = logo);
    }

    /// Restores the default style, keeping the payload.
    pub fn reset(&mut self) {
        self.update(StyleConfig::reset_style);
    }

    fn rerender(&mut self) {
        self.generation += 1;
        if let Some(stale) = self.pending.take() {
            debug!(generation = stale.generation, "dropping superseded logo decode");
            stale.task.abort();
        }

        let Some(config) = self.config.as_ref() else {
            return;
        };
        let mut preview = render_base(config);

        if let (Ok(img), Some(configured)) = (preview.as_mut(), config.logo.as_ref()) {
            match configured {
                Logo::Glyph(glyph) => apply_logo(img, config, &LogoImage::Glyph(*glyph)),
                Logo::Inline(data) => match tokio::runtime::Handle::try_current() {
                    Ok(handle) => {
                        let data = data.clone();
                        self.pending = Some(PendingLogo {
                            generation: self.generation,
                            task: handle.spawn_blocking(move || {
                                logo::decode_inline(&data).map(LogoImage::Raster)
                            }),
                        });
                    }
                    // Outside a runtime the decode runs inline.
                    Err(_) => match logo::decode_inline(data) {
                        Ok(raster) => apply_logo(img, config, &LogoImage::Raster(raster)),
                        Err(err) => warn!(%err, "logo could not be decoded, keeping code without it"),
                    },
                },
            }
        }
        if let Err(err) = &preview {
            debug!(%err, generation = self.generation, "render failed");
        }
        self.preview = Some(preview);
    }

    /// Waits for the pending logo decode, if any, and composites it onto the
    /// current preview. A decode failure is logged and leaves the preview as is.
    pub async fn settle(&mut self) -> Option<std::result::Result<&RgbaImage, &RenderError>> {
        if let Some(pending) = self.pending.take() {
            let decoded = match pending.task.await {
                Ok(decoded) => decoded,
                Err(join) => Err(RenderError::LogoTask(join.to_string())),
            };
            match decoded {
                Ok(image) if pending.generation == self.generation => {
                    if let (Some(config), Some(Ok(img))) = (&self.config, self.preview.as_mut()) {
                        apply_logo(img, config, &image);
                    }
                }
                Ok(_) => debug!(generation = pending.generation, "discarding stale logo"),
                Err(err) => warn!(%err, "logo could not be decoded, keeping code without it"),
            }
        }
        self.preview()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Glyph;
    use crate::render::render;
    use base64::Engine as _;
    use image::Rgba;
    use std::io::Cursor;

    fn inline_logo() -> Logo {
        let raster = RgbaImage::from_pixel(12, 12, Rgba([0, 120, 200, 255]));
        let mut bytes = Vec::new();
        raster
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        Logo::Inline(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        ))
    }

    fn configured(payload: &str) -> StyleStore {
        let mut store = StyleStore::new();
        store.configure(StyleConfig::new(payload, 240));
        store
    }

    #[test]
    fn test_unconfigured_store_has_no_preview() {
        let mut store = StyleStore::new();
        assert!(store.preview().is_none());
        store.set_shape(ModuleShape::Circle);
        assert!(store.config().is_none());
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_every_mutation_rerenders() {
        let mut store = configured("https://cards.example/u/1");
        assert_eq!(store.generation(), 1);

        store.set_shape(ModuleShape::Dot);
        store.set_corner(CornerStyle::Circle);
        store.set_colors(Color::rgb(0, 0, 90), Color::WHITE);
        assert_eq!(store.generation(), 4);

        let expected = render(store.config().unwrap()).unwrap();
        assert_eq!(store.preview().unwrap().unwrap(), &expected);
    }

    #[test]
    fn test_reset_keeps_payload() {
        let mut store = configured("keep me");
        store.set_shape(ModuleShape::Rounded);
        store.set_corner(CornerStyle::Classy);
        store.set_frame(Frame::ScanMe);
        store.set_logo(Some(Logo::Glyph(Glyph::Phone)));
        store.reset();

        let config = store.config().unwrap();
        assert_eq!(config, &StyleConfig::new("keep me", 240));
        let expected = render(config).unwrap();
        assert_eq!(store.preview().unwrap().unwrap(), &expected);
    }

    #[test]
    fn test_encoding_error_becomes_error_preview() {
        let mut store = configured("short");
        store.update(|c| {
            c.max_version = 1;
            c.payload = "x".repeat(40);
        });
        assert!(matches!(
            store.preview(),
            Some(Err(RenderError::DataTooLong(_)))
        ));

        store.set_payload("short");
        assert!(matches!(store.preview(), Some(Ok(_))));
    }

    #[test]
    fn test_glyph_logo_is_synchronous() {
        let mut store = configured("glyph");
        store.set_logo(Some(Logo::Glyph(Glyph::Heart)));
        assert!(!store.has_pending_logo());
        let expected = render(store.config().unwrap()).unwrap();
        assert_eq!(store.preview().unwrap().unwrap(), &expected);
    }

    #[test]
    fn test_inline_logo_without_runtime_decodes_in_place() {
        let mut store = configured("https://cards.example/u/sync");
        store.set_logo(Some(inline_logo()));
        assert!(!store.has_pending_logo());

        let expected = render(store.config().unwrap()).unwrap();
        let base = render_base(store.config().unwrap()).unwrap();
        assert_eq!(store.preview().unwrap().unwrap(), &expected);
        assert_ne!(&expected, &base);

        store.set_logo(Some(Logo::Inline("data:image/png;base64,AAAA".to_string())));
        let base = render_base(store.config().unwrap()).unwrap();
        assert_eq!(store.preview().unwrap().unwrap(), &base);
    }

    #[tokio::test]
    async fn test_inline_logo_composites_after_settle() {
        let mut store = configured("https://cards.example/u/logo");
        store.set_logo(Some(inline_logo()));
        assert!(store.has_pending_logo());

        let base = render_base(store.config().unwrap()).unwrap();
        assert_eq!(store.preview().unwrap().unwrap(), &base);

        let expected = render(store.config().unwrap()).unwrap();
        let settled = store.settle().await.unwrap().unwrap().clone();
        assert_eq!(settled, expected);
        assert_ne!(settled, base);
        assert!(!store.has_pending_logo());
    }

    #[tokio::test]
    async fn test_superseded_logo_never_paints() {
        let mut store = configured("https://cards.example/u/race");
        store.set_logo(Some(inline_logo()));
        store.set_logo(None);
        assert!(!store.has_pending_logo());

        let expected = render(store.config().unwrap()).unwrap();
        let settled = store.settle().await.unwrap().unwrap().clone();
        assert_eq!(settled, expected);
    }

    #[tokio::test]
    async fn test_bad_inline_logo_keeps_code() {
        let mut store = configured("https://cards.example/u/bad");
        store.set_logo(Some(Logo::Inline("data:image/png;base64,AAAA".to_string())));
        let base = render_base(store.config().unwrap()).unwrap();
        let settled = store.settle().await.unwrap().unwrap().clone();
        assert_eq!(settled, base);
    }
}
