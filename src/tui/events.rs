//! TUI event handling with crossterm.
//!
//! Polls the terminal for input and surfaces key presses to the run loop.
//! Release/repeat events are filtered out so Windows terminals (which
//! report both press and release) do not double-trigger actions.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use thiserror::Error;

/// Errors from reading terminal events.
#[derive(Debug, Error)]
pub enum EventError {
    /// I/O error from the terminal.
    #[error("terminal event error: {0}")]
    Io(#[from] std::io::Error),
}

/// Polls the terminal for key presses.
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    /// Create a new event handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Wait up to `timeout` for an event; return the key press if one
    /// occurred. Resize and mouse events are absorbed here (the next draw
    /// picks up the new size).
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Io`] if the terminal cannot be read.
    pub fn poll(&self, timeout: Duration) -> Result<Option<KeyEvent>, EventError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}
