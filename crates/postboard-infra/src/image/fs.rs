//! Filesystem image reader - the handle of an [`ImageFile`] is a path.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use postboard_core::domain::ImageFile;
use postboard_core::error::ImageError;
use postboard_core::ports::ImageReader;

/// Reads image files from disk into `data:` URLs.
#[derive(Debug, Clone, Default)]
pub struct FsImageReader {
    root: Option<PathBuf>,
}

impl FsImageReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative handles against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, handle: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(handle),
            None => PathBuf::from(handle),
        }
    }

    /// Describe a file the way a browser file picker would: name, guessed
    /// MIME type and size.
    pub async fn describe(&self, handle: &str) -> Result<ImageFile, ImageError> {
        let path = self.resolve(handle);
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| ImageError::Read(format!("{}: {e}", path.display())))?;

        Ok(ImageFile {
            name: file_name(&path),
            mime_type: mime_guess::from_path(&path)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
            size: metadata.len(),
            handle: handle.to_string(),
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[async_trait]
impl ImageReader for FsImageReader {
    async fn read_data_url(&self, file: &ImageFile) -> Result<String, ImageError> {
        let path = self.resolve(&file.handle);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| ImageError::Read(format!("{}: {e}", path.display())))?;

        tracing::debug!(file = %file.name, bytes = bytes.len(), "Image read");
        Ok(format!(
            "data:{};base64,{}",
            file.mime_type,
            STANDARD.encode(bytes)
        ))
    }
}
