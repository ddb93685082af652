// Screenshot functionality
//
// Resolves a frame through the master palette and saves it as a PNG file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::config::ScreenshotConfig;
use crate::display::frame_to_rgb;
use crate::ppu::FrameObj;

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreenshotError::Io(e) => Some(e),
            ScreenshotError::PngEncoding(e) => Some(e),
        }
    }
}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save a frame into the configured screenshot directory
///
/// The directory is created if needed. With `include_timestamp` the file is
/// named `screenshot_YYYYmmdd_HHMMSS.png`, otherwise `screenshot.png`.
///
/// # Returns
///
/// The path of the written file
pub fn save_screenshot(
    frame: &FrameObj,
    config: &ScreenshotConfig,
) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(&config.directory)?;

    let file_path = config.directory.join(screenshot_file_name(config.include_timestamp));
    write_png(frame, &file_path)?;

    log::info!("Screenshot saved to {}", file_path.display());
    Ok(file_path)
}

fn screenshot_file_name(include_timestamp: bool) -> String {
    if include_timestamp {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("screenshot_{}.png", timestamp)
    } else {
        "screenshot.png".to_string()
    }
}

/// Encode a frame as an 8-bit RGB PNG at `path`
pub fn write_png(frame: &FrameObj, path: &Path) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, frame.width() as u32, frame.height() as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame_to_rgb(frame))?;
    writer.finish()?;

    Ok(())
}
