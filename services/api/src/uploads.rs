//! Image upload storage on local disk
//!
//! Files are stored flat under the upload directory as `<uuid>.<ext>` and
//! referenced by their public path (`/uploads/<uuid>.<ext>`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::Multipart;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::settings::UploadConfig;

/// Accepted image MIME types and the extension stored files get
const ALLOWED_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Extension for an accepted MIME type
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    ALLOWED_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == mime)
        .map(|(_, ext)| *ext)
}

/// Image part of a multipart form, type already checked
#[derive(Debug)]
pub struct ImageFile {
    pub extension: &'static str,
    pub bytes: Bytes,
}

/// Parsed multipart form: at most one image plus text fields
#[derive(Debug, Default)]
pub struct UploadForm {
    pub image: Option<ImageFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Read a multipart body, treating the part named `file_field` as the image
    ///
    /// The declared type of the image part is checked before its content is
    /// read; a part of any other type fails with `UnsupportedMedia`.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> ApiResult<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == file_field {
                let extension = field
                    .content_type()
                    .and_then(extension_for)
                    .ok_or(ApiError::UnsupportedMedia)?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(e.body_text()))?;
                if !bytes.is_empty() {
                    form.image = Some(ImageFile { extension, bytes });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(e.body_text()))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Local disk storage for uploaded images
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    url_prefix: String,
}

impl UploadStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            url_prefix: config.url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Public path prefix, without a trailing slash
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Write an image under a fresh name and return its public path
    pub async fn save(&self, image: &ImageFile) -> ApiResult<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), image.extension);
        tokio::fs::write(self.dir.join(&file_name), &image.bytes).await?;

        info!("Stored upload {} ({} bytes)", file_name, image.bytes.len());
        Ok(format!("{}/{}", self.url_prefix, file_name))
    }

    /// Remove a previously stored image, best effort
    ///
    /// Paths outside the upload prefix are ignored.
    pub async fn remove(&self, public_path: &str) {
        let Some(path) = self.local_path(public_path) else {
            warn!("Not removing {}: not a stored upload", public_path);
            return;
        };

        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!("Failed to remove upload {}: {}", path.display(), e);
        }
    }

    fn local_path(&self, public_path: &str) -> Option<PathBuf> {
        let file_name = public_path
            .strip_prefix(&self.url_prefix)?
            .strip_prefix('/')?;

        let is_plain_name = !file_name.is_empty()
            && !file_name.contains(['/', '\\'])
            && file_name != "."
            && file_name != "..";

        is_plain_name.then(|| self.dir.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> UploadStore {
        UploadStore::new(&UploadConfig {
            dir: dir.path().join("uploads").to_string_lossy().into_owned(),
            url_prefix: "/uploads/".to_string(),
            max_bytes: 1024,
        })
    }

    #[test]
    fn test_extension_for_allowed_types() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/PNG"), Some("png"));
        assert_eq!(extension_for("image/webp; charset=binary"), Some("webp"));
        assert_eq!(extension_for("text/plain"), None);
        assert_eq!(extension_for("image/svg+xml"), None);
        assert_eq!(extension_for(""), None);
    }

    #[tokio::test]
    async fn test_save_writes_uuid_named_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let path = store
            .save(&ImageFile {
                extension: "png",
                bytes: Bytes::from_static(b"\x89PNG fake"),
            })
            .await
            .unwrap();

        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with(".png"));
        let file_name = path.trim_start_matches("/uploads/").trim_end_matches(".png");
        assert!(Uuid::parse_str(file_name).is_ok());

        let local = store.local_path(&path).unwrap();
        assert_eq!(tokio::fs::read(&local).await.unwrap(), b"\x89PNG fake");

        store.remove(&path).await;
        assert!(!local.exists());
    }

    #[tokio::test]
    async fn test_remove_ignores_foreign_paths() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let outside = dir.path().join("keep.txt");
        tokio::fs::write(&outside, b"keep").await.unwrap();

        store.remove("/uploads/../keep.txt").await;
        store.remove("/elsewhere/keep.txt").await;
        store.remove("/uploads/missing.png").await;

        assert!(outside.exists());
        assert!(store.local_path("/uploads/..").is_none());
        assert!(store.local_path("/uploads/a/b.png").is_none());
    }
}
