//! Tower photo transcoding.
//!
//! Uploaded photos (PNG, JPEG or WebP) are decoded and re-encoded as WebP so
//! that every stored photo has one format. This module is pure CPU work; the
//! api crate runs it on the blocking pool and owns the file system side.

use std::io::Cursor;

use image::codecs::webp::WebPEncoder;
use image::DynamicImage;

/// File extension of every stored photo.
pub const PHOTO_EXTENSION: &str = "webp";

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Uploaded file is not a supported image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image as WebP: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to store image: {0}")]
    Storage(#[from] std::io::Error),
}

impl MediaError {
    /// Whether the failure is caused by the uploaded bytes rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Encode(_))
    }
}

/// Decode any supported image and re-encode it as lossless WebP.
pub fn transcode_to_webp(bytes: &[u8]) -> Result<Vec<u8>, MediaError> {
    let decoded = image::load_from_memory(bytes).map_err(MediaError::Decode)?;
    let rgba = DynamicImage::ImageRgba8(decoded.to_rgba8());

    let mut out = Cursor::new(Vec::new());
    rgba.write_with_encoder(WebPEncoder::new_lossless(&mut out))
        .map_err(MediaError::Encode)?;
    Ok(out.into_inner())
}
