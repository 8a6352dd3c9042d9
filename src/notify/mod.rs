//! User notifications.
//!
//! Views report outcomes through [`Notifier`]; rendering is up to the implementor.

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => f.write_str("success"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);

    fn success(&self, message: &str) {
        self.notify(Severity::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }
}

/// Notifier that keeps every message, for inspection in tests and scripted sessions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<(Severity, String)> {
        self.messages().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((severity, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("Saved");
        notifier.error("Failed");
        assert_eq!(
            notifier.messages(),
            vec![
                (Severity::Success, "Saved".to_string()),
                (Severity::Error, "Failed".to_string()),
            ]
        );
        assert_eq!(notifier.last().map(|(s, _)| s), Some(Severity::Error));
    }
}
