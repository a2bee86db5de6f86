use base64::Engine as _;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::matrix::{ModuleMatrix, MARGIN};

/*---- Utilities ----*/

/// Encodes a rendered bitmap as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encodes a rendered bitmap as a `data:image/png;base64,` URI, the form the web
/// layer embeds directly in an `<img>` tag or a download link.
pub fn to_data_uri(img: &RgbaImage) -> Result<String> {
    let png = encode_png(img)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    ))
}

/// Saves a rendered bitmap as a PNG file.
///
/// # Arguments
///
/// * `img` - The bitmap to save.
/// * `directory_path` - Optional. The directory the image is written to. Defaults to "generated"
///   and is created if missing.
/// * `filename` - Optional. The file name without extension. Defaults to a timestamp.
///
/// # Returns
///
/// The path of the written file.
///
/// # Example
///
/// ```no_run
/// use qrstyle::config::StyleConfig;
/// use qrstyle::helper::save_png;
/// use qrstyle::render::render;
///
/// let img = render(&StyleConfig::new("Hello, World!", 300)).unwrap();
/// let path = save_png(&img, Some("images"), Some("hello")).unwrap();
/// println!("saved {}", path.display());
/// ```
pub fn save_png(img: &RgbaImage, directory_path: Option<&str>, filename: Option<&str>) -> Result<PathBuf> {
    let directory_path = directory_path.unwrap_or("generated");
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            since_the_epoch.as_millis().to_string()
        }
    };

    fs::create_dir_all(directory_path)?;

    let file_path = Path::new(directory_path).join(format!("{}.png", filename));
    img.save_with_format(&file_path, ImageFormat::Png)?;
    Ok(file_path)
}

/// Returns the matrix as block art, two characters per module, with the quiet zone.
pub fn matrix_to_string(matrix: &ModuleMatrix) -> String {
    let border = MARGIN as i64;
    let size = matrix.size() as i64;
    let mut result = String::new();
    for row in -border..size + border {
        for col in -border..size + border {
            let dark = row >= 0 && col >= 0 && matrix.is_dark(row as usize, col as usize);
            let c: char = if dark { '█' } else { ' ' };
            result.push(c);
            result.push(c);
        }
        result.push('\n');
    }
    result
}

/// Prints the given matrix to the console.
pub fn print_matrix(matrix: &ModuleMatrix) {
    println!("{}", matrix_to_string(matrix));
}
