use crate::error::AppMetaError;
use crate::payload::open_image;
use std::path::Path;

/// Longest side of the on-screen preview
pub const PREVIEW_MAX_SIDE: u32 = 200;

/// Display-only thumbnail of a loaded image. Never uploaded.
#[derive(Debug, Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    /// Unmultiplied RGBA8 pixels, row-major
    pub rgba: Vec<u8>,
    pub source_width: u32,
    pub source_height: u32,
}

/// Decode the image at `path` and shrink it to fit a 200x200 box.
///
/// Aspect ratio is kept and small images are not upscaled.
pub fn load_preview(path: &Path) -> Result<Preview, AppMetaError> {
    let img = open_image(path)?;
    let (source_width, source_height) = (img.width(), img.height());

    let fitted = if source_width > PREVIEW_MAX_SIDE || source_height > PREVIEW_MAX_SIDE {
        img.thumbnail(PREVIEW_MAX_SIDE, PREVIEW_MAX_SIDE)
    } else {
        img
    };
    let rgba = fitted.to_rgba8();

    Ok(Preview {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
        source_width,
        source_height,
    })
}
