//! Style configuration for a single render.
//!
//! A [`StyleConfig`] is a plain value: the UI layer builds one (or deserializes it from
//! JSON), hands it to [`crate::render::render`] and throws it away afterwards. Shape,
//! corner and frame ids are parsed leniently so that a stale configuration naming a
//! removed style still renders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// An opaque RGB color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([255, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b])
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        let [r, g, b] = self.0;
        image::Rgba([r, g, b, 255])
    }
}

impl FromStr for Color {
    type Err = RenderError;

    /// Parses `#rrggbb` or the short `#rgb` form. The leading `#` is optional.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RenderError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Color([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ])),
            3 => {
                let mut out = [0u8; 3];
                for (slot, digit) in out.iter_mut().zip(hex.chars()) {
                    let v = digit.to_digit(16).ok_or_else(invalid)? as u8;
                    *slot = v * 17;
                }
                Ok(Color(out))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Declares a string-keyed style catalog. Unknown ids map to the given fallback.
macro_rules! style_catalog {
    (@fallback_id Square) => { "square" };
    (@fallback_id None) => { "none" };
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident,
        { $($variant:ident => $id:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            #[default]
            $fallback,
            $($variant),+
        }

        impl $name {
            pub fn id(self) -> &'static str {
                match self {
                    $name::$fallback => style_catalog!(@fallback_id $fallback),
                    $($name::$variant => $id),+
                }
            }

            /// Every selectable style, fallback first.
            pub fn all() -> &'static [$name] {
                &[$name::$fallback, $($name::$variant),+]
            }

            /// Resolves a style id. Unrecognized ids resolve to the fallback.
            pub fn from_id(id: &str) -> Self {
                match id.trim().to_ascii_lowercase().as_str() {
                    $($id => $name::$variant,)+
                    _ => $name::$fallback,
                }
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name::from_id(&id)
            }
        }

        impl From<$name> for String {
            fn from(style: $name) -> Self {
                style.id().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

style_catalog! {
    /// Primitive used for ordinary (non-finder) dark modules.
    ModuleShape, fallback = Square, {
        Rounded => "rounded",
        Circle => "circle",
        Dot => "dot",
        Organic => "organic",
        RoundedSquare => "rounded-square",
    }
}

style_catalog! {
    /// Primitive used for modules inside the three finder patterns.
    CornerStyle, fallback = Square, {
        Rounded => "rounded",
        Circle => "circle",
        ExtraRounded => "extra-rounded",
        Dot => "dot",
        Classy => "classy",
        ClassyRounded => "classy-rounded",
        Smooth => "smooth",
        SmoothRounded => "smooth-rounded",
        Cut => "cut",
        Diamond => "diamond",
        Pointed => "pointed",
        PointedSmooth => "pointed-smooth",
        PointedEdge => "pointed-edge",
        PointedInverted => "pointed-inverted",
    }
}

style_catalog! {
    /// Decorative frame drawn by the UI around the code. It is carried with the
    /// configuration but never painted into the bitmap.
    Frame, fallback = None, {
        Square => "square",
        Rounded => "rounded",
        ScanMe => "scan-me",
        Banner => "banner",
    }
}

/// Small built-in icons that can sit in the middle of a code.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Glyph {
    Heart,
    Plus,
    Phone,
    Mail,
}

/// Center logo.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Logo {
    Glyph(Glyph),
    /// Uploaded raster image, as a `data:image/...;base64,` URI or bare base64.
    Inline(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    #[default]
    High,
}

impl From<ErrorCorrection> for qrcodegen::QrCodeEcc {
    fn from(ecc: ErrorCorrection) -> Self {
        match ecc {
            ErrorCorrection::Low => qrcodegen::QrCodeEcc::Low,
            ErrorCorrection::Medium => qrcodegen::QrCodeEcc::Medium,
            ErrorCorrection::Quartile => qrcodegen::QrCodeEcc::Quartile,
            ErrorCorrection::High => qrcodegen::QrCodeEcc::High,
        }
    }
}

/// Everything needed to render one styled QR code.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    pub payload: String,
    pub size_px: u32,
    pub foreground: Color,
    pub background: Color,
    pub module_shape: ModuleShape,
    pub corner_style: CornerStyle,
    pub frame: Frame,
    pub logo: Option<Logo>,
    pub error_correction: ErrorCorrection,
    pub min_version: u8,
    pub max_version: u8,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            payload: String::new(),
            size_px: 300,
            foreground: Color::BLACK,
            background: Color::WHITE,
            module_shape: ModuleShape::Square,
            corner_style: CornerStyle::Square,
            frame: Frame::None,
            logo: None,
            error_correction: ErrorCorrection::High,
            min_version: 1,
            max_version: 40,
        }
    }
}

impl StyleConfig {
    pub fn new(payload: impl Into<String>, size_px: u32) -> Self {
        StyleConfig {
            payload: payload.into(),
            size_px,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The error correction level actually used. A logo hides part of the
    /// symbol, so it always forces the highest level.
    pub fn effective_ecc(&self) -> ErrorCorrection {
        if self.logo.is_some() {
            ErrorCorrection::High
        } else {
            self.error_correction
        }
    }

    /// Restores every style field to its default, keeping payload, size and
    /// version window.
    pub fn reset_style(&mut self) {
        let defaults = StyleConfig::default();
        self.foreground = defaults.foreground;
        self.background = defaults.background;
        self.module_shape = defaults.module_shape;
        self.corner_style = defaults.corner_style;
        self.frame = defaults.frame;
        self.logo = defaults.logo;
        self.error_correction = defaults.error_correction;
    }
}
