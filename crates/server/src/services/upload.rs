//! Product image upload handling.
//!
//! Materializes multipart file data under the upload directory and hands
//! the resulting relative paths to the store. The handler enforces a hard
//! per-call file cap and all-or-nothing semantics: if any write fails, the
//! files already written by the same call are removed again and the whole
//! operation fails before any store mutation happens.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Hard cap on files accepted per add-product call.
pub const MAX_FILES_PER_PRODUCT: usize = 5;

/// Errors from upload handling.
#[derive(Debug, Error)]
pub enum UploadError {
    /// More files were submitted than the per-call cap allows.
    #[error("too many files: got {count}, at most {MAX_FILES_PER_PRODUCT} allowed")]
    TooManyFiles { count: usize },

    /// A file part arrived without a file name.
    #[error("uploaded file is missing a file name")]
    MissingFileName,

    /// Writing a file to the upload directory failed.
    #[error("failed to write uploaded file: {0}")]
    WriteFailed(#[from] std::io::Error),
}

/// An in-memory file received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Writes uploaded files into the upload directory under unique names.
///
/// The upload directory is exclusively owned by this type; nothing else
/// writes into it.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create an upload store rooted at `dir`.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Create the upload directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::WriteFailed` if the directory cannot be created.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Write all files to disk and return their relative paths, in input order.
    ///
    /// Each file gets a collision-resistant name: a fresh UUID prefix plus
    /// the sanitized original file name. The returned paths are relative
    /// (`uploads/<name>`), matching how they are served back and stored in
    /// `Product.photos`.
    ///
    /// # Errors
    ///
    /// - `UploadError::TooManyFiles` when more than
    ///   [`MAX_FILES_PER_PRODUCT`] files are submitted; nothing is written.
    /// - `UploadError::MissingFileName` when a part has no file name.
    /// - `UploadError::WriteFailed` when a disk write fails; files already
    ///   written by this call are removed again (best effort).
    pub async fn store_files(&self, files: Vec<UploadedFile>) -> Result<Vec<String>, UploadError> {
        if files.len() > MAX_FILES_PER_PRODUCT {
            return Err(UploadError::TooManyFiles { count: files.len() });
        }

        let mut stored: Vec<PathBuf> = Vec::with_capacity(files.len());
        let mut paths: Vec<String> = Vec::with_capacity(files.len());

        for file in &files {
            let name = match self.unique_name(&file.file_name) {
                Ok(name) => name,
                Err(err) => {
                    self.remove_partial(&stored).await;
                    return Err(err);
                }
            };
            let target = self.dir.join(&name);

            if let Err(err) = tokio::fs::write(&target, &file.bytes).await {
                tracing::error!(path = %target.display(), error = %err, "Upload write failed");
                self.remove_partial(&stored).await;
                return Err(UploadError::WriteFailed(err));
            }

            stored.push(target);
            paths.push(format!("uploads/{name}"));
        }

        tracing::info!(count = paths.len(), "Uploaded files stored");
        Ok(paths)
    }

    /// Build a unique storage name for an uploaded file.
    fn unique_name(&self, original: &str) -> Result<String, UploadError> {
        let sanitized = sanitize_file_name(original);
        if sanitized.is_empty() {
            return Err(UploadError::MissingFileName);
        }
        Ok(format!("{}-{sanitized}", Uuid::new_v4()))
    }

    /// Best-effort removal of files written before a failure.
    async fn remove_partial(&self, written: &[PathBuf]) {
        for path in written {
            if let Err(err) = tokio::fs::remove_file(path).await {
                tracing::warn!(path = %path.display(), error = %err,
                    "Failed to remove partially uploaded file");
            }
        }
    }
}

/// Strip path components and replace anything outside a conservative
/// character set. The UUID prefix provides uniqueness; this only keeps the
/// stored name filesystem-safe.
fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn image(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    async fn open_uploads(dir: &TempDir) -> UploadStore {
        let uploads = UploadStore::new(dir.path().join("uploads"));
        uploads.ensure_dir().await.unwrap();
        uploads
    }

    #[tokio::test]
    async fn test_store_files_returns_paths_in_input_order() {
        let dir = TempDir::new().unwrap();
        let uploads = open_uploads(&dir).await;

        let files = vec![image("front.jpg"), image("back.jpg"), image("side.jpg")];
        let paths = uploads.store_files(files).await.unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths[0].contains("front.jpg"));
        assert!(paths[1].contains("back.jpg"));
        assert!(paths[2].contains("side.jpg"));
        for path in &paths {
            assert!(path.starts_with("uploads/"));
            let name = path.strip_prefix("uploads/").unwrap();
            assert!(dir.path().join("uploads").join(name).is_file());
        }
    }

    #[tokio::test]
    async fn test_exactly_five_files_accepted() {
        let dir = TempDir::new().unwrap();
        let uploads = open_uploads(&dir).await;

        let files = (0..MAX_FILES_PER_PRODUCT)
            .map(|i| image(&format!("photo{i}.jpg")))
            .collect();
        let paths = uploads.store_files(files).await.unwrap();
        assert_eq!(paths.len(), MAX_FILES_PER_PRODUCT);
    }

    #[tokio::test]
    async fn test_six_files_rejected_with_nothing_written() {
        let dir = TempDir::new().unwrap();
        let uploads = open_uploads(&dir).await;

        let files = (0..=MAX_FILES_PER_PRODUCT)
            .map(|i| image(&format!("photo{i}.jpg")))
            .collect();
        let result = uploads.store_files(files).await;
        assert!(matches!(result, Err(UploadError::TooManyFiles { count: 6 })));

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("uploads"))
            .unwrap()
            .collect();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_failure_removes_already_written_files() {
        let dir = TempDir::new().unwrap();
        let uploads = open_uploads(&dir).await;

        // Second file has no usable name, so the first must be cleaned up.
        let files = vec![image("ok.jpg"), image("")];
        let result = uploads.store_files(files).await;
        assert!(matches!(result, Err(UploadError::MissingFileName)));

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("uploads"))
            .unwrap()
            .collect();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_same_original_name_gets_distinct_storage_names() {
        let dir = TempDir::new().unwrap();
        let uploads = open_uploads(&dir).await;

        let paths = uploads
            .store_files(vec![image("photo.jpg"), image("photo.jpg")])
            .await
            .unwrap();
        assert_ne!(paths[0], paths[1]);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_file_name("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\pics\\car.png"), "car.png");
        assert_eq!(sanitize_file_name("фото.png"), "____.png");
    }
}
