use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Invalid path component: {0}")]
    InvalidPathComponent(String),
    #[error("Unknown storage error: {0}")]
    Other(String),
}

pub type FileStorageResult<T> = Result<T, FileStorageError>;

/// Service trait for abstracting file storage operations.
///
/// The content domain stores announcement images through this interface;
/// everything behind it (hosted bucket, local disk) is opaque to callers.
#[async_trait]
pub trait FileStorageService: Send + Sync {
    /// Save file data, returning the public URL callers persist alongside
    /// the owning record.
    async fn upload(&self, data: Vec<u8>, original_filename: &str) -> FileStorageResult<String>;

    /// Delete a previously uploaded file by the URL `upload` returned.
    async fn delete(&self, url: &str) -> FileStorageResult<()>;
}

// --- Local file storage implementation ---

pub struct LocalFileStorageService {
    base_path: PathBuf,
    counter: AtomicU64,
}

impl LocalFileStorageService {
    /// Creates a new LocalFileStorageService, ensuring the base directory
    /// exists.
    pub fn new(base_path_str: &str) -> io::Result<Self> {
        let base_path = PathBuf::from(base_path_str);
        std::fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            counter: AtomicU64::new(0),
        })
    }

    /// Rejects path components that could escape the storage root.
    fn sanitize_component(component: &str) -> FileStorageResult<&str> {
        if component.is_empty()
            || component.contains('/')
            || component.contains('\\')
            || component == "."
            || component == ".."
        {
            Err(FileStorageError::InvalidPathComponent(component.to_string()))
        } else {
            Ok(component)
        }
    }

    /// Generates a unique filename, keeping the suggested extension.
    fn generate_unique_filename(&self, suggested_filename: &str) -> String {
        let extension = Path::new(suggested_filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let stamp = chrono::Utc::now().timestamp_micros();
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}{}", stamp, seq, extension)
    }
}

#[async_trait]
impl FileStorageService for LocalFileStorageService {
    async fn upload(&self, data: Vec<u8>, original_filename: &str) -> FileStorageResult<String> {
        Self::sanitize_component(original_filename)?;
        let unique_filename = self.generate_unique_filename(original_filename);
        let absolute_path = self.base_path.join(&unique_filename);

        fs::write(&absolute_path, data).await?;

        Ok(unique_filename)
    }

    async fn delete(&self, url: &str) -> FileStorageResult<()> {
        let filename = Self::sanitize_component(url)?;
        let absolute_path = self.base_path.join(filename);

        match fs::remove_file(&absolute_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileStorageError::NotFound(url.to_string()))
            }
            Err(e) => Err(FileStorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorageService::new(dir.path().to_str().unwrap()).unwrap();

        let url = storage
            .upload(b"image-bytes".to_vec(), "banner.png")
            .await
            .unwrap();
        assert!(url.ends_with(".png"));
        assert!(dir.path().join(&url).exists());

        storage.delete(&url).await.unwrap();
        assert!(!dir.path().join(&url).exists());
        assert!(matches!(
            storage.delete(&url).await,
            Err(FileStorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorageService::new(dir.path().to_str().unwrap()).unwrap();

        assert!(matches!(
            storage.upload(Vec::new(), "../escape.png").await,
            Err(FileStorageError::InvalidPathComponent(_))
        ));
        assert!(matches!(
            storage.delete("..").await,
            Err(FileStorageError::InvalidPathComponent(_))
        ));
    }
}
