//! View controller - navigation state, form handling and the command
//! dispatcher.
//!
//! Every command runs to completion on the caller's thread. Handlers return
//! `Result`, and [`ViewController::dispatch`] turns failures into a toast so
//! that one broken handler never stops the next command from running.

use std::time::Duration;

use crate::command::{Command, Effect};
use crate::domain::{
    Field, FormDraft, FormInput, FormKind, ImageFile, ImagePreview, NavigationState, PostFields,
    Toast, ToastKind, ToastState, ViewKind, today,
};
use crate::error::{ControllerError, StorageError};
use crate::ports::{Region, Surface};
use crate::render;
use crate::store::PostStore;
use crate::validation::{self, DEFAULT_MAX_IMAGE_BYTES};

const NAVIGATION_FAILED: &str = "Navigation error occurred";
const SAVE_FAILED: &str = "Error saving data";

/// Controller configuration.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// How long a toast stays visible.
    pub toast_duration: Duration,
    /// Largest accepted image upload.
    pub max_image_bytes: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            toast_duration: Duration::from_millis(3000),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

pub struct ViewController<U: Surface> {
    store: PostStore,
    surface: U,
    config: ControllerConfig,
    nav: NavigationState,
    add_draft: FormDraft,
    edit_draft: FormDraft,
    toasts: ToastState,
    effects: Vec<Effect>,
}

impl<U: Surface> ViewController<U> {
    pub fn new(store: PostStore, surface: U, config: ControllerConfig) -> Self {
        Self {
            store,
            surface,
            config,
            nav: NavigationState::default(),
            add_draft: FormDraft::default(),
            edit_draft: FormDraft::default(),
            toasts: ToastState::default(),
            effects: Vec::new(),
        }
    }

    /// Load (or seed) the posts and show the home view.
    pub fn start(&mut self) -> Vec<Effect> {
        if let Err(err) = self.store.initialize() {
            self.warn_unsaved(&err);
        }
        if let Err(err) = self.surface.set_field(FormKind::Add, Field::Date, &today()) {
            tracing::debug!(error = %err, "Add form has no date control");
        }
        self.go(ViewKind::Home, None);
        tracing::info!(posts = self.store.len(), "Controller started");
        std::mem::take(&mut self.effects)
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut U {
        &mut self.surface
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn draft(&self, form: FormKind) -> &FormDraft {
        match form {
            FormKind::Add => &self.add_draft,
            FormKind::Edit => &self.edit_draft,
        }
    }

    pub fn current_toast(&self) -> Option<&Toast> {
        self.toasts.current()
    }

    /// Handle one command and return the async work it requested.
    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        let name = command.name();
        tracing::debug!(command = name, view = %self.nav.current_view, "Dispatching command");

        let (outcome, failure) = match command {
            Command::Navigate { view, post_id } => {
                self.go(view, post_id.as_deref());
                (Ok(()), None)
            }
            Command::SubmitAdd { input } => (self.submit_add(input), Some("Error creating post")),
            Command::SubmitEdit { input } => (self.submit_edit(input), Some("Error updating post")),
            Command::RequestDelete { post_id } => (self.request_delete(post_id), None),
            Command::ConfirmDelete => (self.confirm_delete(), Some("Error deleting post")),
            Command::CancelDelete => (self.close_delete_dialog(), None),
            Command::SelectImage { form, file } => (self.select_image(form, file), None),
            Command::ImageLoaded {
                form,
                data_url,
                file_name,
            } => (
                self.show_preview(
                    form,
                    ImagePreview {
                        src: data_url,
                        caption: file_name,
                    },
                ),
                None,
            ),
            Command::ImageFailed { form, reason } => {
                tracing::warn!(form = %form, reason = %reason, "Image could not be read");
                self.toast("Could not read image file", ToastKind::Error);
                (Ok(()), None)
            }
            Command::RemoveImage { form } => (self.remove_image(form), None),
            Command::DismissToast { ticket } => (self.dismiss_toast(ticket), None),
            Command::KeyPressed { key, focused_post } => {
                (self.key_pressed(&key, focused_post.as_deref()), None)
            }
            Command::HistoryBack => {
                self.go(ViewKind::Home, None);
                (Ok(()), None)
            }
        };

        if let Err(err) = outcome {
            tracing::error!(command = name, error = %err, "Command failed");
            if let Some(message) = failure {
                self.toast(message, ToastKind::Error);
            }
        }

        std::mem::take(&mut self.effects)
    }

    /// Navigate, reporting any failure as a toast.
    fn go(&mut self, view: ViewKind, post_id: Option<&str>) {
        if let Err(err) = self.navigate(view, post_id) {
            tracing::error!(view = %view, error = %err, "Navigation failed");
            self.toast(NAVIGATION_FAILED, ToastKind::Error);
        }
    }

    /// Content is written before the view is revealed, so a failed write
    /// leaves the previous view showing and `current_view` in step with it.
    fn navigate(&mut self, view: ViewKind, post_id: Option<&str>) -> Result<(), ControllerError> {
        match view {
            ViewKind::Home => {
                self.render_home()?;
                self.surface.show_view(ViewKind::Home)?;
            }
            ViewKind::Add => {
                self.reset_add_form()?;
                self.surface.show_view(ViewKind::Add)?;
            }
            ViewKind::Edit => {
                if let Some(id) = post_id {
                    self.populate_edit_form(id)?;
                }
                self.surface.show_view(ViewKind::Edit)?;
                if let Some(id) = post_id {
                    self.nav.editing_post_id = Some(id.to_string());
                }
            }
            ViewKind::Detail => {
                let Some(id) = post_id else {
                    return Err(ControllerError::Navigation(
                        "detail view requires a post id".to_string(),
                    ));
                };
                let Some(post) = self.store.find_by_id(id) else {
                    tracing::debug!(post_id = %id, "Post not found, redirecting home");
                    return self.navigate(ViewKind::Home, None);
                };
                let html = render::render_post_detail(post)?;
                self.surface.set_html(Region::PostDetail, &html)?;
                self.surface.show_view(ViewKind::Detail)?;
            }
        }

        self.nav.current_view = view;
        Ok(())
    }

    fn render_home(&mut self) -> Result<(), ControllerError> {
        let posts = self.store.list();
        if posts.is_empty() {
            self.surface.set_visible(Region::PostsGrid, false)?;
            self.surface.set_visible(Region::EmptyState, true)?;
            return Ok(());
        }

        let html = render::render_post_list(posts)?;
        self.surface.set_visible(Region::EmptyState, false)?;
        self.surface.set_html(Region::PostsGrid, &html)?;
        self.surface.set_visible(Region::PostsGrid, true)?;
        Ok(())
    }

    fn reset_add_form(&mut self) -> Result<(), ControllerError> {
        for field in [Field::Title, Field::Description, Field::Image] {
            self.surface.set_field(FormKind::Add, field, "")?;
        }
        self.surface.set_field(FormKind::Add, Field::Date, &today())?;
        self.hide_preview(FormKind::Add)?;
        self.clear_errors()
    }

    /// Load a post into the edit form. Unknown ids leave the form as it is.
    fn populate_edit_form(&mut self, id: &str) -> Result<(), ControllerError> {
        let Some(post) = self.store.find_by_id(id).cloned() else {
            tracing::debug!(post_id = %id, "Edit target not found");
            return Ok(());
        };

        self.surface.set_field(FormKind::Edit, Field::Title, &post.title)?;
        self.surface
            .set_field(FormKind::Edit, Field::Description, &post.description)?;
        self.surface.set_field(FormKind::Edit, Field::Date, &post.date)?;
        self.surface.set_field(FormKind::Edit, Field::Image, "")?;

        if post.has_image() {
            self.show_preview(
                FormKind::Edit,
                ImagePreview {
                    src: post.image,
                    caption: "Current image".to_string(),
                },
            )?;
        } else {
            self.hide_preview(FormKind::Edit)?;
        }

        self.clear_errors()
    }

    fn submit_add(&mut self, input: FormInput) -> Result<(), ControllerError> {
        let fields = input.into_fields(self.add_draft.image());
        if !self.check_form(FormKind::Add, &fields)? {
            return Ok(());
        }

        match self.store.create(fields) {
            Ok(post) => {
                tracing::info!(post_id = %post.id, "Post created");
                self.toast("Post created successfully!", ToastKind::Success);
            }
            Err(err) => self.warn_unsaved(&err),
        }

        self.go(ViewKind::Home, None);
        Ok(())
    }

    fn submit_edit(&mut self, input: FormInput) -> Result<(), ControllerError> {
        let fields = input.into_fields(self.edit_draft.image());
        if !self.check_form(FormKind::Edit, &fields)? {
            return Ok(());
        }

        let Some(id) = self.nav.editing_post_id.clone() else {
            tracing::debug!("Edit submitted without a target post");
            return Ok(());
        };

        match self.store.update(&id, fields) {
            Ok(true) => {
                tracing::info!(post_id = %id, "Post updated");
                self.toast("Post updated successfully!", ToastKind::Success);
            }
            Ok(false) => return Ok(()),
            Err(err) => self.warn_unsaved(&err),
        }

        self.go(ViewKind::Home, None);
        Ok(())
    }

    /// Validate and show inline errors. Returns whether the fields passed.
    fn check_form(&mut self, form: FormKind, fields: &PostFields) -> Result<bool, ControllerError> {
        self.clear_errors()?;

        let errors = validation::validate(fields);
        for (field, message) in errors.iter() {
            self.surface.set_field_error(form, field, Some(message))?;
        }

        let valid = errors.is_valid();
        self.draft_mut(form).errors = errors;
        Ok(valid)
    }

    fn clear_errors(&mut self) -> Result<(), ControllerError> {
        for form in FormKind::ALL {
            self.draft_mut(form).errors = Default::default();
            for field in Field::VALIDATED {
                self.surface.set_field_error(form, field, None)?;
            }
        }
        Ok(())
    }

    fn request_delete(&mut self, post_id: String) -> Result<(), ControllerError> {
        tracing::debug!(post_id = %post_id, "Delete requested");
        self.nav.delete_post_id = Some(post_id);
        self.surface.set_visible(Region::DeleteDialog, true)?;
        Ok(())
    }

    fn close_delete_dialog(&mut self) -> Result<(), ControllerError> {
        self.nav.delete_post_id = None;
        self.surface.set_visible(Region::DeleteDialog, false)?;
        Ok(())
    }

    fn confirm_delete(&mut self) -> Result<(), ControllerError> {
        let Some(id) = self.nav.delete_post_id.clone() else {
            return Ok(());
        };

        let deleted = match self.store.delete(&id) {
            Ok(deleted) => {
                if deleted {
                    tracing::info!(post_id = %id, "Post deleted");
                    self.toast("Post deleted successfully!", ToastKind::Success);
                }
                deleted
            }
            Err(err) => {
                self.warn_unsaved(&err);
                true
            }
        };

        self.close_delete_dialog()?;

        if deleted {
            match self.nav.current_view {
                ViewKind::Detail => self.go(ViewKind::Home, None),
                ViewKind::Home => self.render_home()?,
                ViewKind::Add | ViewKind::Edit => {}
            }
        }
        Ok(())
    }

    fn select_image(&mut self, form: FormKind, file: ImageFile) -> Result<(), ControllerError> {
        if let Err(err) = validation::check_upload(&file, self.config.max_image_bytes) {
            tracing::debug!(form = %form, file = %file.name, error = ?err, "Upload rejected");
            self.toast(err.to_string(), ToastKind::Error);
            return Ok(());
        }

        self.effects.push(Effect::ReadImage { form, file });
        Ok(())
    }

    fn show_preview(&mut self, form: FormKind, preview: ImagePreview) -> Result<(), ControllerError> {
        let html = render::render_image_preview(&preview, form)?;
        self.draft_mut(form).preview = Some(preview);
        self.surface.set_html(Region::ImagePreview(form), &html)?;
        self.surface.set_visible(Region::ImagePreview(form), true)?;
        Ok(())
    }

    fn hide_preview(&mut self, form: FormKind) -> Result<(), ControllerError> {
        self.draft_mut(form).preview = None;
        self.surface.set_html(Region::ImagePreview(form), "")?;
        self.surface.set_visible(Region::ImagePreview(form), false)?;
        Ok(())
    }

    fn remove_image(&mut self, form: FormKind) -> Result<(), ControllerError> {
        self.hide_preview(form)?;
        self.surface.set_field(form, Field::Image, "")?;
        Ok(())
    }

    fn key_pressed(&mut self, key: &str, focused_post: Option<&str>) -> Result<(), ControllerError> {
        match (key, focused_post) {
            ("Escape", _) if self.nav.delete_pending() => self.close_delete_dialog(),
            ("Enter", Some(id)) => {
                self.go(ViewKind::Detail, Some(id));
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        let toast = self.toasts.issue(message.into(), kind);
        if let Err(err) = self.surface.show_toast(&toast) {
            tracing::warn!(error = %err, message = %toast.message, "Toast could not be shown");
            return;
        }

        self.effects.push(Effect::DismissToast {
            ticket: toast.ticket,
            after: self.config.toast_duration,
        });
    }

    fn dismiss_toast(&mut self, ticket: u64) -> Result<(), ControllerError> {
        if self.toasts.dismiss(ticket) {
            self.surface.hide_toast()?;
        }
        Ok(())
    }

    fn warn_unsaved(&mut self, err: &StorageError) {
        tracing::warn!(error = %err, "Changes kept in memory only");
        self.toast(SAVE_FAILED, ToastKind::Warning);
    }

    fn draft_mut(&mut self, form: FormKind) -> &mut FormDraft {
        match form {
            FormKind::Add => &mut self.add_draft,
            FormKind::Edit => &mut self.edit_draft,
        }
    }
}
