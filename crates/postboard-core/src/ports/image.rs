use async_trait::async_trait;

use crate::domain::ImageFile;
use crate::error::ImageError;

/// Image ingestion - turns a selected file into an embeddable string.
#[async_trait]
pub trait ImageReader: Send + Sync {
    /// Read the file into a `data:` URL.
    async fn read_data_url(&self, file: &ImageFile) -> Result<String, ImageError>;
}
