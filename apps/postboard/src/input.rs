//! Stdin input - one JSON event per line.
//!
//! A line is either a [`Command`] or one of the platform events below, which
//! stand in for what a browser supplies: a file picker and clicks on
//! rendered `data-action` elements.

use std::str::FromStr;

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use postboard_core::domain::FormKind;
use postboard_core::{Action, Command};
use postboard_infra::FsImageReader;

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
enum PlatformEvent {
    /// Pick a file from disk for a form's image input.
    PickImage { form: FormKind, path: String },
    /// Click on an element carrying `data-action`.
    Click {
        action: String,
        #[serde(default)]
        post_id: Option<String>,
        #[serde(default)]
        form: Option<FormKind>,
    },
}

/// Tags handled here rather than by [`Command`].
const PLATFORM_TAGS: [&str; 2] = ["pick_image", "click"];

#[derive(Debug)]
enum Input {
    Platform(PlatformEvent),
    Command(Command),
}

/// Parse a line with the decoder its `command` tag selects, so a malformed
/// platform event reports its own error.
fn parse_line(line: &str) -> Result<Input, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(line)?;
    let tag = value.get("command").and_then(serde_json::Value::as_str);

    if tag.is_some_and(|tag| PLATFORM_TAGS.contains(&tag)) {
        serde_json::from_value(value).map(Input::Platform)
    } else {
        serde_json::from_value(value).map(Input::Command)
    }
}

async fn translate(line: &str, reader: &FsImageReader) -> Option<Command> {
    let event = match parse_line(line) {
        Ok(Input::Command(command)) => return Some(command),
        Ok(Input::Platform(event)) => event,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed input line");
            return None;
        }
    };

    match event {
        PlatformEvent::PickImage { form, path } => match reader.describe(&path).await {
            Ok(file) => Some(Command::SelectImage { form, file }),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Cannot pick image");
                None
            }
        },
        PlatformEvent::Click {
            action,
            post_id,
            form,
        } => {
            let command = Action::from_str(&action)
                .ok()
                .and_then(|action| action.into_command(post_id.as_deref(), form));
            if command.is_none() {
                tracing::warn!(action = %action, "Click does not map to a command");
            }
            command
        }
    }
}

/// Forward stdin lines to the event loop until EOF.
pub async fn read_commands(sender: mpsc::UnboundedSender<Command>, reader: FsImageReader) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read stdin");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(command) = translate(line, &reader).await {
            if sender.send(command).is_err() {
                break;
            }
        }
    }

    tracing::debug!("Input closed");
}
