//! # qrstyle
//!
//! A Rust library for rendering styled QR codes for digital business and health cards.
//!
//! `qrstyle` encodes a payload (a profile URL, a vCard, ...) with `qrcodegen` and draws it
//! into an RGBA bitmap with independently selectable module shapes and finder-pattern
//! ("corner") styles, custom colors and an optional center logo.
//!
//! ## Features
//!
//! - Six module shapes: square, rounded, circle, dot, organic, rounded-square.
//! - Fifteen corner styles, styled independently of the modules.
//! - Built-in glyph logos or uploaded images carried as base64 data URIs.
//! - Error correction forced to High whenever a logo covers the center.
//! - A [`store::StyleStore`] that re-renders on every change and composites uploaded
//!   logos asynchronously, never onto a superseded render.
//! - PNG, data-URI and console output.
//!
//! ## Example
//!
//! ```rust
//! use qrstyle::config::{CornerStyle, Glyph, Logo, ModuleShape, StyleConfig};
//! use qrstyle::helper::to_data_uri;
//! use qrstyle::render::render;
//!
//! let mut config = StyleConfig::new("BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nEND:VCARD", 300);
//! config.module_shape = ModuleShape::Dot;
//! config.corner_style = CornerStyle::ExtraRounded;
//! config.foreground = "#1d3557".parse().unwrap();
//! config.logo = Some(Logo::Glyph(Glyph::Heart));
//!
//! let img = render(&config).unwrap();
//! let uri = to_data_uri(&img).unwrap();
//! assert!(uri.starts_with("data:image/png;base64,"));
//! ```
//!
//! ## Modules
//!
//! - [`config`]: The style configuration.
//! - [`matrix`]: QR encoding into a module matrix.
//! - [`classify`]: Finder zone classification.
//! - [`shape`], [`corner`]: Module and finder renderers.
//! - [`logo`]: Center logo overlay.
//! - [`render`]: The render pipeline.
//! - [`store`]: Stateful style holder for interactive editors.
//! - [`helper`]: Output utilities.

#![forbid(unsafe_code)]

pub mod classify;
pub mod config;
pub mod corner;
pub mod draw;
pub mod error;
pub mod helper;
pub mod logo;
pub mod matrix;
pub mod render;
pub mod shape;
pub mod store;

pub use config::StyleConfig;
pub use error::{RenderError, Result};
pub use render::render;
pub use store::StyleStore;
