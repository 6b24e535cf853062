//! Form validation - pure checks on user input.

use std::collections::BTreeMap;

use crate::domain::{Field, ImageFile, PostFields};
use crate::error::ImageError;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Per-field error messages from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    fn add(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field, message);
    }
}

/// Check post fields, collecting every violation. The image is not checked
/// here; uploads are screened by [`check_upload`].
///
/// Lengths count characters, not bytes.
pub fn validate(fields: &PostFields) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if fields.title.is_empty() {
        errors.add(Field::Title, "Title is required");
    } else if fields.title.chars().count() > TITLE_MAX_CHARS {
        errors.add(Field::Title, "Title must be less than 100 characters");
    }

    if fields.description.is_empty() {
        errors.add(Field::Description, "Description is required");
    } else if fields.description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.add(
            Field::Description,
            "Description must be less than 500 characters",
        );
    }

    if fields.date.is_empty() {
        errors.add(Field::Date, "Date is required");
    }

    errors
}

/// Screen a selected file before it is read.
pub fn check_upload(file: &ImageFile, max_bytes: u64) -> Result<(), ImageError> {
    if !file.mime_type.starts_with("image/") {
        return Err(ImageError::InvalidType {
            mime_type: file.mime_type.clone(),
        });
    }

    if file.size > max_bytes {
        return Err(ImageError::TooLarge {
            size: file.size,
            limit: max_bytes,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, description: &str, date: &str) -> PostFields {
        PostFields {
            title: title.to_string(),
            description: description.to_string(),
            image: String::new(),
            date: date.to_string(),
        }
    }

    fn image(mime_type: &str, size: u64) -> ImageFile {
        ImageFile {
            name: "photo".to_string(),
            mime_type: mime_type.to_string(),
            size,
            handle: "photo".to_string(),
        }
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate(&fields("", "", ""));

        assert!(!errors.is_valid());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Title), Some("Title is required"));
        assert_eq!(
            errors.get(Field::Description),
            Some("Description is required")
        );
        assert_eq!(errors.get(Field::Date), Some("Date is required"));
    }

    #[test]
    fn test_long_title_is_the_only_error() {
        let errors = validate(&fields(&"x".repeat(101), "ok", "2025-01-01"));

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::Title),
            Some("Title must be less than 100 characters")
        );
    }

    #[test]
    fn test_limits_are_inclusive_and_count_characters() {
        let title = "é".repeat(TITLE_MAX_CHARS);
        let description = "d".repeat(DESCRIPTION_MAX_CHARS);
        assert!(validate(&fields(&title, &description, "2025-01-01")).is_valid());

        let errors = validate(&fields("ok", &"d".repeat(501), "2025-01-01"));
        assert_eq!(
            errors.get(Field::Description),
            Some("Description must be less than 500 characters")
        );
    }

    #[test]
    fn test_dates_are_not_checked_for_plausibility() {
        assert!(validate(&fields("t", "d", "not a date")).is_valid());
    }

    #[test]
    fn test_upload_checks() {
        assert!(check_upload(&image("image/png", 1024), DEFAULT_MAX_IMAGE_BYTES).is_ok());

        let err = check_upload(&image("text/plain", 10), DEFAULT_MAX_IMAGE_BYTES).unwrap_err();
        assert_eq!(err.to_string(), "Please select a valid image file");

        let err = check_upload(
            &image("image/jpeg", DEFAULT_MAX_IMAGE_BYTES + 1),
            DEFAULT_MAX_IMAGE_BYTES,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Image size must be less than 5MB");

        let err = check_upload(&image("image/png", 300 * 1024), 256 * 1024).unwrap_err();
        assert_eq!(err.to_string(), "Image size must be less than 256KB");
    }
}
