use std::fmt;

use crate::domain::{Field, FormKind, Toast, ViewKind};
use crate::error::RenderError;

/// Named regions of the display, addressed by logical id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    View(ViewKind),
    PostsGrid,
    EmptyState,
    PostDetail,
    ImagePreview(FormKind),
    DeleteDialog,
    Toast,
}

impl Region {
    /// The element id this region is known by.
    pub fn id(&self) -> &'static str {
        match self {
            Region::View(ViewKind::Home) => "home-view",
            Region::View(ViewKind::Add) => "add-view",
            Region::View(ViewKind::Edit) => "edit-view",
            Region::View(ViewKind::Detail) => "detail-view",
            Region::PostsGrid => "posts-grid",
            Region::EmptyState => "empty-state",
            Region::PostDetail => "post-detail",
            Region::ImagePreview(FormKind::Add) => "image-preview",
            Region::ImagePreview(FormKind::Edit) => "edit-image-preview",
            Region::DeleteDialog => "delete-modal",
            Region::Toast => "toast",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Render target - the display the controller writes into.
///
/// Markup and styling belong to the implementation. Every method fails with
/// [`RenderError::MissingTarget`] when the addressed element does not exist.
pub trait Surface {
    /// Reveal the region of `view` and hide the other three.
    fn show_view(&mut self, view: ViewKind) -> Result<(), RenderError>;

    /// Replace the inner markup of a region.
    fn set_html(&mut self, region: Region, html: &str) -> Result<(), RenderError>;

    fn set_visible(&mut self, region: Region, visible: bool) -> Result<(), RenderError>;

    /// Set the value of a form control. An empty value on `Field::Image`
    /// clears the file picker.
    fn set_field(&mut self, form: FormKind, field: Field, value: &str)
    -> Result<(), RenderError>;

    /// Show or clear (`None`) the inline error next to a control.
    fn set_field_error(
        &mut self,
        form: FormKind,
        field: Field,
        message: Option<&str>,
    ) -> Result<(), RenderError>;

    fn show_toast(&mut self, toast: &Toast) -> Result<(), RenderError>;

    fn hide_toast(&mut self) -> Result<(), RenderError>;
}
