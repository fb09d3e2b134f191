//! Client-side image compression before upload.
//!
//! Oversized screenshots are the main cost in a submission; shrinking them
//! in the client keeps storage flat and page loads fast. Small images pass
//! through untouched so pixel art is never smeared by a re-encode.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;

use crate::error::SubmitError;

/// Compression targets for uploaded images.
#[derive(Debug, Clone, Copy)]
pub struct ImageLimits {
    /// Images at or under this size skip re-encoding entirely.
    pub passthrough_bytes: usize,
    /// Longest-edge cap after resizing.
    pub max_dimension: u32,
    pub jpeg_quality: u8,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            passthrough_bytes: 256 * 1024,
            max_dimension: 1920,
            jpeg_quality: 82,
        }
    }
}

/// A processed image ready for upload.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    /// File extension matching `content_type`.
    pub extension: &'static str,
}

/// Compress an image for upload.
///
/// Small images pass through with their original encoding; anything larger
/// is downscaled to the dimension cap and re-encoded as JPEG.
pub fn compress_image(bytes: &[u8], limits: &ImageLimits) -> Result<CompressedImage, SubmitError> {
    let format = image::guess_format(bytes)?;
    let img = image::load_from_memory(bytes)?;
    let (w, h) = img.dimensions();

    if bytes.len() <= limits.passthrough_bytes && w.max(h) <= limits.max_dimension {
        let (content_type, extension) = match format {
            image::ImageFormat::Png => ("image/png", "png"),
            image::ImageFormat::Jpeg => ("image/jpeg", "jpg"),
            image::ImageFormat::Gif => ("image/gif", "gif"),
            image::ImageFormat::WebP => ("image/webp", "webp"),
            // Unusual container; normalize it below instead.
            _ => return reencode(&img, limits),
        };
        return Ok(CompressedImage {
            bytes: bytes.to_vec(),
            content_type,
            extension,
        });
    }

    let img = if w.max(h) > limits.max_dimension {
        log::debug!("resizing {}x{} to fit {}", w, h, limits.max_dimension);
        img.resize(limits.max_dimension, limits.max_dimension, FilterType::Lanczos3)
    } else {
        img
    };
    reencode(&img, limits)
}

fn reencode(img: &image::DynamicImage, limits: &ImageLimits) -> Result<CompressedImage, SubmitError> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, limits.jpeg_quality);
    // JPEG has no alpha; flatten first.
    img.to_rgb8().write_with_encoder(encoder)?;
    Ok(CompressedImage {
        bytes: out,
        content_type: "image/jpeg",
        extension: "jpg",
    })
}

#[cfg(test)]
#[path = "tests/media_tests.rs"]
mod tests;
