use std::fmt;

use serde::{Deserialize, Serialize};

/// The four views of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    #[default]
    Home,
    Add,
    Edit,
    Detail,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Home,
        ViewKind::Add,
        ViewKind::Edit,
        ViewKind::Detail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Home => "home",
            ViewKind::Add => "add",
            ViewKind::Edit => "edit",
            ViewKind::Detail => "detail",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which view is showing and which posts are targeted by pending actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub current_view: ViewKind,
    pub editing_post_id: Option<String>,
    /// Set while the delete confirmation dialog is open.
    pub delete_post_id: Option<String>,
}

impl NavigationState {
    pub fn delete_pending(&self) -> bool {
        self.delete_post_id.is_some()
    }
}
