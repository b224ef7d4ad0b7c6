use crate::error::AppMetaError;
use crate::preset::TargetSpec;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// PNG bytes ready to be stored on the console
#[derive(Debug, Clone)]
pub struct Payload {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Payload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub(crate) fn open_image(path: &Path) -> Result<DynamicImage, AppMetaError> {
    image::open(path).map_err(|source| AppMetaError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Stretch `img` to exactly the target size and encode it as RGBA PNG.
///
/// Aspect ratio is not preserved.
pub fn encode_payload(img: &DynamicImage, target: &TargetSpec) -> Result<Payload, AppMetaError> {
    let resized = img.resize_exact(target.width, target.height, FilterType::Lanczos3);
    let rgba = DynamicImage::ImageRgba8(resized.to_rgba8());

    let mut buffer = Cursor::new(Vec::new());
    rgba.write_to(&mut buffer, ImageFormat::Png)
        .map_err(AppMetaError::Encode)?;

    Ok(Payload {
        bytes: buffer.into_inner(),
        width: rgba.width(),
        height: rgba.height(),
    })
}

/// Decode the image at `path` and turn it into the upload payload
pub fn build_payload(path: &Path, target: &TargetSpec) -> Result<Payload, AppMetaError> {
    let img = open_image(path)?;
    tracing::debug!(
        "Decoded {:?} ({}x{}, {:?}), resizing to {}x{}",
        path,
        img.width(),
        img.height(),
        img.color(),
        target.width,
        target.height
    );

    let payload = encode_payload(&img, target)?;
    tracing::info!(
        "Encoded {}x{} RGBA payload ({} bytes)",
        payload.width,
        payload.height,
        payload.len()
    );
    Ok(payload)
}
