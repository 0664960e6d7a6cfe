//! Image Validation - Container Sniffing and Dimension Probing
//!
//! Only the container signature is checked at add-time. Pixel data is never
//! decoded; dimensions come from the image header at export.

use image::{ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::generator::GeneratorError;

/// Accepted image container types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMime {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/webp")]
    Webp,
}

impl ImageMime {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Webp => "image/webp",
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            ImageMime::Png => ImageFormat::Png,
            ImageMime::Jpeg => ImageFormat::Jpeg,
            ImageMime::Webp => ImageFormat::WebP,
        }
    }
}

/// Detect the container type from the leading bytes
pub fn sniff_mime(bytes: &[u8]) -> Result<ImageMime, GeneratorError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Ok(ImageMime::Png),
        Ok(ImageFormat::Jpeg) => Ok(ImageMime::Jpeg),
        Ok(ImageFormat::WebP) => Ok(ImageMime::Webp),
        Ok(other) => Err(GeneratorError::UnsupportedFormat(
            other.to_mime_type().to_string(),
        )),
        Err(_) => Err(GeneratorError::UnsupportedFormat("unknown".to_string())),
    }
}

/// Read pixel dimensions `(width, height)` from the image header
pub fn probe_dimensions(bytes: &[u8], mime: ImageMime) -> Result<(u32, u32), GeneratorError> {
    let reader = ImageReader::with_format(Cursor::new(bytes), mime.format());
    let (width, height) = reader.into_dimensions()?;
    if width == 0 || height == 0 {
        return Err(GeneratorError::InvalidInput(format!(
            "Image has empty dimensions {}x{}",
            width, height
        )));
    }
    Ok((width, height))
}
