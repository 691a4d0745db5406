//! Terminal user interface.
//!
//! Interactive table view over a scan result, built on ratatui with the
//! crossterm backend.
//!
//! # Architecture
//!
//! Unidirectional data flow:
//! 1. Key events are captured from the terminal ([`events`])
//! 2. [`App::handle_key`] updates the state, returning a [`Request`] when
//!    filesystem work is needed
//! 3. The run loop ([`run`]) executes requests and feeds results back
//! 4. The UI renders from the current state ([`ui`])

pub mod app;
pub mod events;
pub mod run;
pub mod ui;

pub use app::{App, Column, Mode, Request, SortOrder, Status};
pub use events::{EventError, EventHandler};
pub use run::{run_tui, TuiError, TuiResult};
pub use ui::{format_size, render};
