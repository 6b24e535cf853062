//! Headless surface - an in-memory stand-in for the document.
//!
//! Records every region, form control and toast the controller writes, so
//! tests and the command-line app can inspect what a browser would show.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use postboard_core::domain::{Field, FormKind, Toast, ViewKind};
use postboard_core::error::RenderError;
use postboard_core::ports::{Region, Surface};

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    missing: HashSet<Region>,
    active_view: Option<ViewKind>,
    html: HashMap<Region, String>,
    visible: HashMap<Region, bool>,
    fields: HashMap<(FormKind, Field), String>,
    errors: HashMap<(FormKind, Field), String>,
    toast: Option<Toast>,
}

/// What is on screen right now.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceSnapshot {
    pub view: Option<ViewKind>,
    /// Markup of the region that carries the view's content.
    pub content: String,
    pub form: BTreeMap<&'static str, String>,
    pub errors: BTreeMap<&'static str, String>,
    pub dialog_open: bool,
    pub toast: Option<Toast>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a region, so that writes to it fail like a missing element.
    pub fn without(mut self, region: Region) -> Self {
        self.missing.insert(region);
        self
    }

    /// Put a previously dropped region back.
    pub fn restore(&mut self, region: Region) {
        self.missing.remove(&region);
    }

    pub fn active_view(&self) -> Option<ViewKind> {
        self.active_view
    }

    pub fn html(&self, region: Region) -> &str {
        self.html.get(&region).map(String::as_str).unwrap_or_default()
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.get(&region).copied().unwrap_or(false)
    }

    pub fn field(&self, form: FormKind, field: Field) -> &str {
        self.fields
            .get(&(form, field))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn field_error(&self, form: FormKind, field: Field) -> Option<&str> {
        self.errors.get(&(form, field)).map(String::as_str)
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        let form = match self.active_view {
            Some(ViewKind::Add) => Some(FormKind::Add),
            Some(ViewKind::Edit) => Some(FormKind::Edit),
            _ => None,
        };

        let content = match (self.active_view, form) {
            (Some(ViewKind::Home), _) if self.is_visible(Region::EmptyState) => String::new(),
            (Some(ViewKind::Home), _) => self.html(Region::PostsGrid).to_string(),
            (Some(ViewKind::Detail), _) => self.html(Region::PostDetail).to_string(),
            (_, Some(form)) => self.html(Region::ImagePreview(form)).to_string(),
            _ => String::new(),
        };

        let mut values = BTreeMap::new();
        let mut errors = BTreeMap::new();
        if let Some(form) = form {
            for field in [Field::Title, Field::Description, Field::Date, Field::Image] {
                values.insert(field.as_str(), self.field(form, field).to_string());
                if let Some(message) = self.field_error(form, field) {
                    errors.insert(field.as_str(), message.to_string());
                }
            }
        }

        SurfaceSnapshot {
            view: self.active_view,
            content,
            form: values,
            errors,
            dialog_open: self.is_visible(Region::DeleteDialog),
            toast: self.toast.clone(),
        }
    }

    fn target(&self, region: Region) -> Result<(), RenderError> {
        if self.missing.contains(&region) {
            return Err(RenderError::MissingTarget(region));
        }
        Ok(())
    }
}

impl Surface for HeadlessSurface {
    fn show_view(&mut self, view: ViewKind) -> Result<(), RenderError> {
        self.target(Region::View(view))?;
        for other in ViewKind::ALL {
            self.visible.insert(Region::View(other), other == view);
        }
        self.active_view = Some(view);
        Ok(())
    }

    fn set_html(&mut self, region: Region, html: &str) -> Result<(), RenderError> {
        self.target(region)?;
        self.html.insert(region, html.to_string());
        Ok(())
    }

    fn set_visible(&mut self, region: Region, visible: bool) -> Result<(), RenderError> {
        self.target(region)?;
        self.visible.insert(region, visible);
        Ok(())
    }

    fn set_field(
        &mut self,
        form: FormKind,
        field: Field,
        value: &str,
    ) -> Result<(), RenderError> {
        self.fields.insert((form, field), value.to_string());
        Ok(())
    }

    fn set_field_error(
        &mut self,
        form: FormKind,
        field: Field,
        message: Option<&str>,
    ) -> Result<(), RenderError> {
        match message {
            Some(message) => {
                self.errors.insert((form, field), message.to_string());
            }
            None => {
                self.errors.remove(&(form, field));
            }
        }
        Ok(())
    }

    fn show_toast(&mut self, toast: &Toast) -> Result<(), RenderError> {
        self.target(Region::Toast)?;
        self.toast = Some(toast.clone());
        self.visible.insert(Region::Toast, true);
        Ok(())
    }

    fn hide_toast(&mut self) -> Result<(), RenderError> {
        self.target(Region::Toast)?;
        self.toast = None;
        self.visible.insert(Region::Toast, false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_view_hides_the_others() {
        let mut surface = HeadlessSurface::new();
        surface.show_view(ViewKind::Add).unwrap();
        surface.show_view(ViewKind::Detail).unwrap();

        assert_eq!(surface.active_view(), Some(ViewKind::Detail));
        assert!(surface.is_visible(Region::View(ViewKind::Detail)));
        assert!(!surface.is_visible(Region::View(ViewKind::Add)));
    }

    #[test]
    fn test_missing_region_fails() {
        let mut surface = HeadlessSurface::new().without(Region::PostsGrid);

        let err = surface.set_html(Region::PostsGrid, "<p></p>").unwrap_err();
        assert!(matches!(err, RenderError::MissingTarget(Region::PostsGrid)));

        surface.restore(Region::PostsGrid);
        surface.set_html(Region::PostsGrid, "<p></p>").unwrap();
        assert_eq!(surface.html(Region::PostsGrid), "<p></p>");
    }
}
