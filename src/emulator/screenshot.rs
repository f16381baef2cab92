// Screenshot functionality
//
// Dumps the current RGB frame to a timestamped PNG file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::display::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Errors that can occur during screenshot operations
#[derive(Debug, Error)]
pub enum ScreenshotError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),
}

/// Save a screenshot of the given frame
///
/// The file lands in a `screenshots/` directory beside the ROM (or in the
/// working directory when no ROM path is known), named with a timestamp.
pub fn save_screenshot(
    frame: &FrameBuffer,
    rom_path: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    let screenshots_dir = rom_path
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."))
        .join("screenshots");
    fs::create_dir_all(&screenshots_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_path = screenshots_dir.join(format!("screenshot_{}.png", timestamp));

    write_png(&file_path, frame)?;
    Ok(file_path)
}

/// Encode one frame as an RGB PNG
fn write_png(path: &Path, frame: &FrameBuffer) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let writer = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(frame.as_bytes())?;
    Ok(())
}
