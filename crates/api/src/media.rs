//! Tower photo storage.
//!
//! [`MediaStore`] owns the upload directory. Incoming photos are transcoded to
//! WebP on the blocking pool, written under a random name, and exposed at
//! `/uploads/<name>.webp`.

use std::path::PathBuf;

use towertrack_core::media::{transcode_to_webp, MediaError, PHOTO_EXTENSION};
use uuid::Uuid;

/// URL prefix under which stored photos are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// A file part received in a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Outcome of handling an optional photo upload.
#[derive(Debug)]
pub enum PhotoUpload {
    /// No photo was sent (or the file part was empty).
    Absent,
    /// The photo was transcoded and written to disk.
    Stored { url: String },
    /// The bytes could not be decoded or re-encoded.
    Rejected(MediaError),
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Transcode and store an upload.
    ///
    /// Bad image bytes yield `Ok(PhotoUpload::Rejected)`; only storage
    /// failures are returned as `Err`.
    pub async fn process(&self, file: Option<UploadedFile>) -> Result<PhotoUpload, MediaError> {
        let Some(file) = file.filter(|f| !f.bytes.is_empty()) else {
            return Ok(PhotoUpload::Absent);
        };

        let original_name = file.file_name.clone().unwrap_or_default();
        let encoded = tokio::task::spawn_blocking(move || transcode_to_webp(&file.bytes))
            .await
            .map_err(|e| MediaError::Storage(std::io::Error::other(e)))?;

        let webp = match encoded {
            Ok(bytes) => bytes,
            Err(err) if err.is_client_error() => {
                tracing::info!(file = %original_name, error = %err, "Rejected photo upload");
                return Ok(PhotoUpload::Rejected(err));
            }
            Err(err) => return Err(err),
        };

        tokio::fs::create_dir_all(&self.root).await?;
        let name = format!("{}.{PHOTO_EXTENSION}", Uuid::new_v4());
        tokio::fs::write(self.root.join(&name), &webp).await?;

        let url = format!("{PUBLIC_PREFIX}/{name}");
        tracing::debug!(file = %original_name, %url, bytes = webp.len(), "Stored photo");
        Ok(PhotoUpload::Stored { url })
    }

    /// Delete a previously stored photo by its public URL.
    ///
    /// Failures are logged, never returned. URLs outside [`PUBLIC_PREFIX`] or
    /// with anything but a plain file name are ignored.
    pub async fn remove(&self, url: &str) {
        let Some(path) = self.resolve(url) else {
            tracing::warn!(%url, "Refusing to remove photo outside the upload directory");
            return;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(%url, "Removed photo"),
            Err(e) => tracing::warn!(%url, error = %e, "Failed to remove photo"),
        }
    }

    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(PUBLIC_PREFIX)?.strip_prefix('/')?;
        let is_plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && !name.contains("..");
        is_plain.then(|| self.root.join(name))
    }
}
