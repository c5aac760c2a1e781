//! User-facing alert messages and the sink they are pushed into.

use serde::{Deserialize, Serialize};

/// Message kind, shared by action results and alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertKind {
    Success,
    Error,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
}

impl Alert {
    pub fn new(message: impl Into<String>, kind: AlertKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn neutral(message: impl Into<String>) -> Self {
        Self::new(message, AlertKind::Neutral)
    }
}

/// Receives alerts.  Display and timing belong to the implementor; callers
/// only push.
pub trait AlertSink {
    fn show_alert(&mut self, alert: Alert);
}

impl AlertSink for Vec<Alert> {
    fn show_alert(&mut self, alert: Alert) {
        self.push(alert);
    }
}
