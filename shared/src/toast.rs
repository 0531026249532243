use serde::{Deserialize, Serialize};

/// How long a toast stays fully visible
pub const TOAST_VISIBLE_MS: u32 = 5000;
/// Fade-out time between dropping the `show` marker and removal
pub const TOAST_FADE_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }

    /// Classes for a freshly shown toast, e.g. `toast toast-error show`
    pub fn class_name(self) -> String {
        format!("toast toast-{} show", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
    Removed,
}

/// Timeline of a single toast, measured from the moment it is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastLifecycle {
    pub visible_ms: u32,
    pub fade_ms: u32,
}

impl Default for ToastLifecycle {
    fn default() -> Self {
        Self {
            visible_ms: TOAST_VISIBLE_MS,
            fade_ms: TOAST_FADE_MS,
        }
    }
}

impl ToastLifecycle {
    pub fn phase_at(&self, elapsed_ms: u32) -> ToastPhase {
        if elapsed_ms < self.visible_ms {
            ToastPhase::Visible
        } else if elapsed_ms < self.removal_at() {
            ToastPhase::Fading
        } else {
            ToastPhase::Removed
        }
    }

    pub fn removal_at(&self) -> u32 {
        self.visible_ms.saturating_add(self.fade_ms)
    }
}

/// Sink for user-facing notifications.
///
/// Every call produces a new toast; there is no dedup and no cap.
pub trait Notifier {
    fn notify(&self, message: &str, kind: ToastKind);
}
