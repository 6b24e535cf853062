use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        }
    }
}

/// A transient notification. `ticket` identifies its dismissal timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub ticket: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Default)]
pub struct ToastState {
    next_ticket: u64,
    current: Option<Toast>,
}

impl ToastState {
    /// Replace the visible toast with a new one.
    pub fn issue(&mut self, message: String, kind: ToastKind) -> Toast {
        self.next_ticket += 1;
        let toast = Toast {
            ticket: self.next_ticket,
            message,
            kind,
        };
        self.current = Some(toast.clone());
        toast
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Clear the toast if `ticket` is still the visible one.
    /// Returns false for stale or repeated dismissals.
    pub fn dismiss(&mut self, ticket: u64) -> bool {
        match &self.current {
            Some(toast) if toast.ticket == ticket => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_ticket_does_not_dismiss_newer_toast() {
        let mut state = ToastState::default();
        let first = state.issue("first".into(), ToastKind::Success);
        let second = state.issue("second".into(), ToastKind::Error);

        assert!(!state.dismiss(first.ticket));
        assert_eq!(state.current(), Some(&second));
        assert!(state.dismiss(second.ticket));
        assert!(!state.dismiss(second.ticket));
        assert!(state.current().is_none());
    }
}
