//! Commands - every user action and async completion, as typed payloads.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{FormInput, FormKind, ImageFile, ViewKind};

/// Input to [`crate::ViewController::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Show a view. `Edit` and `Detail` take the target post.
    Navigate {
        view: ViewKind,
        #[serde(default)]
        post_id: Option<String>,
    },
    SubmitAdd {
        input: FormInput,
    },
    SubmitEdit {
        input: FormInput,
    },
    /// Open the delete confirmation dialog for a post.
    RequestDelete {
        post_id: String,
    },
    ConfirmDelete,
    CancelDelete,
    /// A file was picked in a form's image input.
    SelectImage {
        form: FormKind,
        file: ImageFile,
    },
    ImageLoaded {
        form: FormKind,
        data_url: String,
        file_name: String,
    },
    ImageFailed {
        form: FormKind,
        reason: String,
    },
    RemoveImage {
        form: FormKind,
    },
    DismissToast {
        ticket: u64,
    },
    KeyPressed {
        key: String,
        /// The post card holding focus, if any.
        #[serde(default)]
        focused_post: Option<String>,
    },
    /// Browser history moved (back/forward).
    HistoryBack,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Navigate { .. } => "navigate",
            Command::SubmitAdd { .. } => "submit_add",
            Command::SubmitEdit { .. } => "submit_edit",
            Command::RequestDelete { .. } => "request_delete",
            Command::ConfirmDelete => "confirm_delete",
            Command::CancelDelete => "cancel_delete",
            Command::SelectImage { .. } => "select_image",
            Command::ImageLoaded { .. } => "image_loaded",
            Command::ImageFailed { .. } => "image_failed",
            Command::RemoveImage { .. } => "remove_image",
            Command::DismissToast { .. } => "dismiss_toast",
            Command::KeyPressed { .. } => "key_pressed",
            Command::HistoryBack => "history_back",
        }
    }
}

/// Asynchronous work requested by the controller. The runtime performs it
/// and reports back with a follow-up [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the file and answer with `ImageLoaded` or `ImageFailed`.
    ReadImage { form: FormKind, file: ImageFile },
    /// Answer with `DismissToast { ticket }` once `after` has elapsed.
    DismissToast { ticket: u64, after: Duration },
}

/// Clickable affordances in rendered markup, keyed by `data-action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenDetail,
    Edit,
    RequestDelete,
    Back,
    RemoveImage,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown action: {0}")]
pub struct UnknownAction(String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open-detail" => Ok(Action::OpenDetail),
            "edit" => Ok(Action::Edit),
            "request-delete" => Ok(Action::RequestDelete),
            "back" => Ok(Action::Back),
            "remove-image" => Ok(Action::RemoveImage),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl Action {
    /// The command a click on this action issues, given the element's
    /// `data-post-id` and `data-form` attributes. `None` when a required
    /// attribute is missing.
    pub fn into_command(self, post_id: Option<&str>, form: Option<FormKind>) -> Option<Command> {
        let post = || post_id.map(str::to_string);
        match self {
            Action::OpenDetail => Some(Command::Navigate {
                view: ViewKind::Detail,
                post_id: Some(post()?),
            }),
            Action::Edit => Some(Command::Navigate {
                view: ViewKind::Edit,
                post_id: Some(post()?),
            }),
            Action::RequestDelete => Some(Command::RequestDelete { post_id: post()? }),
            Action::Back => Some(Command::Navigate {
                view: ViewKind::Home,
                post_id: None,
            }),
            Action::RemoveImage => Some(Command::RemoveImage { form: form? }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_use_snake_case_tags() {
        let command: Command = serde_json::from_str(
            r#"{"command":"navigate","view":"detail","post_id":"42"}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            Command::Navigate {
                view: ViewKind::Detail,
                post_id: Some("42".to_string()),
            }
        );

        let command: Command = serde_json::from_str(r#"{"command":"confirm_delete"}"#).unwrap();
        assert_eq!(command, Command::ConfirmDelete);

        let command: Command = serde_json::from_str(
            r#"{"command":"submit_add","input":{"title":"t","date":"2025-01-01"}}"#,
        )
        .unwrap();
        let Command::SubmitAdd { input } = command else {
            panic!("expected submit_add");
        };
        assert_eq!(input.description, "");
    }

    #[test]
    fn test_actions_map_to_commands() {
        let action: Action = "request-delete".parse().unwrap();
        assert_eq!(
            action.into_command(Some("9"), None),
            Some(Command::RequestDelete {
                post_id: "9".to_string()
            })
        );

        assert_eq!(Action::OpenDetail.into_command(None, None), None);
        assert_eq!(
            Action::RemoveImage.into_command(None, Some(FormKind::Add)),
            Some(Command::RemoveImage {
                form: FormKind::Add
            })
        );
        assert!("explode".parse::<Action>().is_err());
    }
}
