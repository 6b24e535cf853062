//! Error types for every layer of the core.

use thiserror::Error;

use crate::ports::Region;

/// Key/value storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures at the render boundary.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render target not found: {0}")]
    MissingTarget(Region),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

/// Upload checks and image reading. The first two messages are shown to the
/// user verbatim.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Please select a valid image file")]
    InvalidType { mime_type: String },

    #[error("Image size must be less than {}", describe_limit(.limit))]
    TooLarge { size: u64, limit: u64 },

    #[error("Could not read image file: {0}")]
    Read(String),
}

/// Human-readable upload limit: `5MB` for whole mebibytes, otherwise the
/// largest unit that keeps the value at or above one.
fn describe_limit(bytes: &u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;

    let (value, unit) = match *bytes {
        b if b >= MIB => (b as f64 / MIB as f64, "MB"),
        b if b >= KIB => (b as f64 / KIB as f64, "KB"),
        b => return format!("{b} bytes"),
    };
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}{unit}")
}

/// Errors raised while handling a command.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Invalid view request: {0}")]
    Navigation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn too_large(limit: u64) -> String {
        ImageError::TooLarge {
            size: limit + 1,
            limit,
        }
        .to_string()
    }

    #[test]
    fn test_upload_limit_is_never_shown_as_zero() {
        assert_eq!(too_large(5 * 1024 * 1024), "Image size must be less than 5MB");
        assert_eq!(
            too_large(1024 * 1024 + 512 * 1024),
            "Image size must be less than 1.5MB"
        );
        assert_eq!(too_large(512 * 1024), "Image size must be less than 512KB");
        assert_eq!(too_large(1500), "Image size must be less than 1.46KB");
        assert_eq!(too_large(900), "Image size must be less than 900 bytes");
    }
}
