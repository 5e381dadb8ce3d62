/// Picked-photo loading and inline encoding
///
/// Selected files are read off the UI thread, checked to actually be
/// PNG/JPEG, and turned into two things at once: the inline
/// `data:<mime>;base64,` payload the backend stores, and a downscaled
/// JPEG preview for the slot card.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use iced::widget::image::Handle;
use image::ImageFormat;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::task;

/// Longest edge of the in-app preview
const PREVIEW_MAX: u32 = 640;

/// One uploaded image slot value
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Filename only (e.g. "IMG_042.jpg")
    pub filename: String,
    /// Inline payload sent to the backend
    pub data_url: String,
    /// Downscaled preview shown in the slot card
    pub preview: Handle,
}

/// Load a picked file into an [`UploadedImage`]
///
/// Runs in a blocking task because reading and re-encoding a photo is
/// CPU-bound work that would stall the UI thread.
pub async fn load_image(path: PathBuf) -> Result<UploadedImage, String> {
    task::spawn_blocking(move || load_image_blocking(&path))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking implementation of photo loading
fn load_image_blocking(path: &Path) -> Result<UploadedImage, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    // The picker filters by extension; the content check catches renamed files
    let mime = match image::guess_format(&bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        _ => return Err("Only PNG and JPEG photos are supported".to_string()),
    };

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| format!("Could not read the image: {}", e))?;

    let preview = decoded.thumbnail(PREVIEW_MAX, PREVIEW_MAX);
    let mut preview_bytes = Vec::new();
    preview
        .to_rgb8()
        .write_to(&mut Cursor::new(&mut preview_bytes), ImageFormat::Jpeg)
        .map_err(|e| format!("Preview encoding failed: {}", e))?;

    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    println!(
        "🖼️  Loaded {} ({}x{}, {} bytes)",
        filename,
        decoded.width(),
        decoded.height(),
        bytes.len()
    );

    Ok(UploadedImage {
        filename,
        data_url: format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)),
        preview: Handle::from_bytes(preview_bytes),
    })
}

/// Decode downloaded asset bytes into a preview handle.
/// Returns `None` when the bytes are not a displayable image.
pub fn preview_from_bytes(bytes: &[u8]) -> Option<Handle> {
    let decoded = image::load_from_memory(bytes).ok()?;
    let preview = decoded.thumbnail(PREVIEW_MAX, PREVIEW_MAX);

    let mut preview_bytes = Vec::new();
    preview
        .to_rgb8()
        .write_to(&mut Cursor::new(&mut preview_bytes), ImageFormat::Jpeg)
        .ok()?;

    Some(Handle::from_bytes(preview_bytes))
}
