//! View-mode controller.
//!
//! Selects which screen is active and which record it targets. Every transition bumps a
//! generation counter so callers can tell whether a response still belongs to the screen
//! that issued the request.

use crate::models::Record;

/// Active screen and the data it needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewMode {
    #[default]
    List,
    Create,
    Edit(Record),
    View(Record),
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Create => "create",
            ViewMode::Edit(_) => "edit",
            ViewMode::View(_) => "view",
        }
    }

    /// Record targeted by the screen, if any.
    pub fn target(&self) -> Option<&Record> {
        match self {
            ViewMode::Edit(record) | ViewMode::View(record) => Some(record),
            ViewMode::List | ViewMode::Create => None,
        }
    }
}

/// Identifies the controller state a remote call was issued from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
}

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Rejected transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: &'static str,
    pub action: &'static str,
}

impl std::fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot {} from the {} screen", self.action, self.from)
    }
}

impl std::error::Error for InvalidTransition {}

#[derive(Debug, Default)]
pub struct ViewController {
    mode: ViewMode,
    generation: u64,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn target(&self) -> Option<&Record> {
        self.mode.target()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Capture the current generation before issuing a remote call.
    pub fn token(&self) -> RequestToken {
        RequestToken {
            generation: self.generation,
        }
    }

    /// Whether no transition has happened since `token` was captured.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.generation == self.generation
    }

    pub fn request_create(&mut self) {
        self.transition(ViewMode::Create);
    }

    pub fn request_edit(&mut self, record: Record) {
        self.transition(ViewMode::Edit(record));
    }

    pub fn request_view(&mut self, record: Record) {
        self.transition(ViewMode::View(record));
    }

    /// A create or update completed.
    pub fn on_success(&mut self) {
        self.transition(ViewMode::List);
    }

    pub fn on_cancel(&mut self) {
        self.transition(ViewMode::List);
    }

    /// Switch the detail screen to editing the same record.
    pub fn edit_viewed(&mut self) -> Result<(), InvalidTransition> {
        match &self.mode {
            ViewMode::View(record) => {
                let record = record.clone();
                self.transition(ViewMode::Edit(record));
                Ok(())
            }
            other => Err(InvalidTransition {
                from: other.name(),
                action: "edit the viewed record",
            }),
        }
    }

    fn transition(&mut self, next: ViewMode) {
        tracing::debug!(from = self.mode.name(), to = next.name(), "view transition");
        self.mode = next;
        self.generation = self.generation.wrapping_add(1);
    }
}
