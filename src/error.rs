use thiserror::Error;

/// Errors produced while building or rendering a styled QR code.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The payload does not fit in any version of the allowed window.
    #[error("content too long to encode: {0}")]
    DataTooLong(qrcodegen::DataTooLong),

    #[error("bitmap size must be between 1 and 8192 pixels, got {0}")]
    InvalidSize(u32),

    /// The bitmap is too small to give every module at least one pixel.
    #[error("{size}px is too small for a {modules}x{modules} module grid")]
    ModuleTooSmall { size: u32, modules: u32 },

    #[error("QR version {0} is outside 1..=40")]
    InvalidVersion(u8),

    #[error("invalid color {0:?}, expected #rrggbb or #rgb")]
    InvalidColor(String),

    #[error("logo data is not valid base64: {0}")]
    LogoData(#[from] base64::DecodeError),

    #[error("logo image could not be decoded: {0}")]
    LogoImage(#[from] image::ImageError),

    #[error("logo decode task failed: {0}")]
    LogoTask(String),

    #[error("invalid style configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<qrcodegen::DataTooLong> for RenderError {
    fn from(err: qrcodegen::DataTooLong) -> Self {
        RenderError::DataTooLong(err)
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
