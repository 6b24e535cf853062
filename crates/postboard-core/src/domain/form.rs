use std::fmt;

use serde::{Deserialize, Serialize};

use super::post::PostFields;
use crate::validation::ValidationErrors;

/// The two post forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Add,
    Edit,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::Add, FormKind::Edit];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Add => "add",
            FormKind::Edit => "edit",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form controls. `Image` is the file picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Description,
    Date,
    Image,
}

impl Field {
    /// Fields with an inline error slot next to their control.
    pub const VALIDATED: [Field; 3] = [Field::Title, Field::Description, Field::Date];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Date => "date",
            Field::Image => "image",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text read from a form on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub title: String,
    pub description: String,
    pub date: String,
}

impl FormInput {
    /// Trim the text fields and attach the form's current image.
    pub fn into_fields(self, image: String) -> PostFields {
        PostFields {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image,
            date: self.date,
        }
    }
}

/// A file chosen in an image picker, as described by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    /// Opaque locator the image reader understands (a path, a blob key...).
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub src: String,
    pub caption: String,
}

/// Unsaved state of an open form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub preview: Option<ImagePreview>,
    pub errors: ValidationErrors,
}

impl FormDraft {
    /// The image that a submit would store.
    pub fn image(&self) -> String {
        self.preview
            .as_ref()
            .map(|preview| preview.src.clone())
            .unwrap_or_default()
    }
}
