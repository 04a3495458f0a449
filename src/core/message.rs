//! Single-slot message dialog.
//!
//! At most one message is shown at a time. Showing a new message while one is
//! open replaces it; the replaced text is returned so callers can log it.

use serde::Serialize;

/// The one message the page may be showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageSlot {
    current: Option<String>,
}

impl MessageSlot {
    /// Opens the dialog with `text`, returning whatever it displaced.
    pub fn show(&mut self, text: impl Into<String>) -> Option<String> {
        self.current.replace(text.into())
    }

    /// Closes the dialog.
    pub fn dismiss(&mut self) -> Option<String> {
        self.current.take()
    }

    /// Text currently shown
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether the dialog is open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }
}
