//! TUI main loop.
//!
//! Handles terminal setup, the event loop, and cleanup on exit.
//!
//! # Terminal Management
//!
//! The TUI takes over the terminal by enabling raw mode and entering the
//! alternate screen buffer. Both are reverted on exit, including on panic.
//!
//! # Event Loop
//!
//! 1. Render the current state
//! 2. Poll for a key event with a timeout
//! 3. Let [`App::handle_key`] update state; execute any returned
//!    [`Request`] (rescan, open folder) synchronously
//! 4. Limit the frame rate to ~60 FPS
//!
//! Refresh work runs on this same thread: the loop draws one frame in
//! Scanning state so the user sees feedback, then blocks until the scan
//! finishes. There is no cancellation of an in-flight scan.

use std::io::{self, Stdout};
use std::panic;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use thiserror::Error;

use super::app::{App, Request};
use super::events::EventHandler;
use super::ui::render;
use crate::{refresh_folder, remember_folder, rescan_folder};

/// Frame rate limit: ~60 FPS.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Event poll timeout, matched to the frame duration.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// I/O error from terminal operations.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(#[from] super::events::EventError),
}

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Type alias for the terminal backend.
type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive TUI until the user quits.
///
/// The terminal is always restored to its original state, even on error
/// or panic.
///
/// # Errors
///
/// Returns [`TuiError`] for terminal I/O or event failures. Scan and cache
/// problems never end the loop; they surface inside the UI.
pub fn run_tui(app: &mut App) -> TuiResult<()> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = run_tui_inner(app);

    let _ = panic::take_hook();
    result
}

fn run_tui_inner(app: &mut App) -> TuiResult<()> {
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(app, &mut terminal);
    let restored = restore_terminal();
    if outcome.is_ok() {
        log::info!("TUI exited normally");
    }
    merge_exit(outcome, restored)
}

fn event_loop(app: &mut App, terminal: &mut Terminal) -> TuiResult<()> {
    let event_handler = EventHandler::new();
    let mut last_render = Instant::now();

    loop {
        if app.should_quit() {
            log::debug!("App requested quit");
            break;
        }

        terminal.draw(|frame| render(frame, app))?;

        if let Some(key) = event_handler.poll(POLL_TIMEOUT)? {
            if let Some(request) = app.handle_key(key) {
                handle_request(app, terminal, request)?;
            }
        }

        let elapsed = last_render.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
        last_render = Instant::now();
    }

    Ok(())
}

/// Combine the loop outcome with the restore outcome. The loop's error
/// wins; a restore failure only surfaces when the loop itself succeeded.
fn merge_exit(outcome: TuiResult<()>, restored: TuiResult<()>) -> TuiResult<()> {
    match outcome {
        Ok(()) => restored,
        Err(e) => Err(e),
    }
}

/// Execute a refresh request from the app: draw one Scanning frame so the
/// user sees feedback, then run the (blocking) load or scan and feed the
/// outcome back into the state.
fn handle_request(app: &mut App, terminal: &mut Terminal, request: Request) -> TuiResult<()> {
    let (folder, bypass_cache) = match request {
        Request::Rescan => match app.folder() {
            Some(folder) => (folder.to_path_buf(), true),
            None => return Ok(()),
        },
        Request::OpenFolder(folder) => (folder, false),
    };

    app.begin_scan(&folder);
    terminal.draw(|frame| render(frame, app))?;

    let outcome = if bypass_cache {
        rescan_folder(&folder)
    } else {
        refresh_folder(&folder)
    };

    match outcome {
        Ok((result, source)) => {
            remember_folder(&folder);
            app.set_result(result, source);
        }
        Err(e) => {
            log::error!("Refresh of {} failed: {}", folder.display(), e);
            app.fail_scan(&e.to_string());
        }
    }
    Ok(())
}

/// Set up the terminal: raw mode plus alternate screen.
fn setup_terminal() -> TuiResult<Terminal> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = ratatui::Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
