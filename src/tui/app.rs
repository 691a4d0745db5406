//! TUI application state management.
//!
//! # Overview
//!
//! The [`App`] struct is the central state container for the table view:
//! - loaded rows and the folder they came from
//! - the visible view (filter + sort applied, as indices into the rows)
//! - navigation state (selected row, scroll offset)
//! - input mode (browsing, typing a search, typing a folder path)
//! - refresh status (Idle → Scanning → Ready)
//!
//! # Architecture
//!
//! Key events are translated to state changes by [`App::handle_key`].
//! Anything that needs filesystem work (a rescan, opening a folder) is not
//! performed here; it is returned as a [`Request`] for the run loop to
//! execute, so the state stays synchronous and unit-testable.
//!
//! # Example
//!
//! ```
//! use pdfshelf::tui::app::{App, Column};
//! use pdfshelf::scanner::{MetadataRecord, ScanResult};
//! use std::path::PathBuf;
//!
//! let result = ScanResult {
//!     folder: PathBuf::from("/books"),
//!     records: vec![MetadataRecord {
//!         path: PathBuf::from("/books/a.pdf"),
//!         title: "Alpha".into(),
//!         author: "Ann".into(),
//!         pages: Some(3),
//!         size: 100,
//!         modified: 0,
//!     }],
//! };
//! let mut app = App::new();
//! app.set_result(result, pdfshelf::LoadSource::Scan);
//! app.sort_by(Column::Title);
//! assert_eq!(app.view().len(), 1);
//! ```

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::scanner::{MetadataRecord, ScanResult};
use crate::LoadSource;

/// Input mode of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigating the table
    #[default]
    Browsing,
    /// Typing into the search box
    Searching,
    /// Typing a folder path into the prompt
    SelectingFolder,
    /// Application is quitting
    Quitting,
}

/// Data refresh status: Idle until a folder is chosen, Scanning while the
/// scanner runs, Ready once rows are loaded. Ready is always reachable
/// because the scanner never fails on individual files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// No folder loaded yet
    #[default]
    Idle,
    /// A scan is in progress
    Scanning,
    /// Rows are loaded and displayed
    Ready,
}

/// Table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// File path
    Path,
    /// Document title
    Title,
    /// Document author
    Author,
    /// Page count
    Pages,
    /// File size
    Size,
    /// Last modified time
    Modified,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 6] = [
        Column::Path,
        Column::Title,
        Column::Author,
        Column::Pages,
        Column::Size,
        Column::Modified,
    ];

    /// Column header label.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Column::Path => "Path",
            Column::Title => "Title",
            Column::Author => "Author",
            Column::Pages => "Pages",
            Column::Size => "Size",
            Column::Modified => "Modified",
        }
    }

    /// Column bound to a number key (1-6).
    #[must_use]
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)? as usize;
        Self::ALL.get(index.checked_sub(1)?).copied()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest key first
    Ascending,
    /// Largest key first
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Work the run loop must perform on the app's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Re-scan the current folder, bypassing the cache
    Rescan,
    /// Load a different folder (cache first, scan on miss)
    OpenFolder(PathBuf),
}

/// TUI application state.
///
/// Not thread-safe by design; all access happens on the main thread, which
/// also owns the terminal.
#[derive(Debug, Clone, Default)]
pub struct App {
    mode: Mode,
    status: Status,
    folder: Option<PathBuf>,
    records: Vec<MetadataRecord>,
    source: Option<LoadSource>,
    /// Indices into `records`, filter and sort applied
    view: Vec<usize>,
    sort: Option<(Column, SortOrder)>,
    search: String,
    folder_input: String,
    selected: usize,
    scroll: usize,
    visible_rows: usize,
    error: Option<String>,
}

impl App {
    /// Create an empty app in Idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Accessors ====================

    /// Current input mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current refresh status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the main loop should exit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.mode == Mode::Quitting
    }

    /// The folder currently loaded (or being loaded).
    #[must_use]
    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// Where the current rows came from.
    #[must_use]
    pub fn source(&self) -> Option<LoadSource> {
        self.source
    }

    /// All loaded records, in scan order.
    #[must_use]
    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    /// The visible view: indices into [`Self::records`] with the current
    /// filter and sort applied.
    #[must_use]
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    /// The record shown at view position `i`.
    #[must_use]
    pub fn record_at(&self, i: usize) -> Option<&MetadataRecord> {
        self.view.get(i).map(|&idx| &self.records[idx])
    }

    /// Current sort column and direction, if any.
    #[must_use]
    pub fn sort(&self) -> Option<(Column, SortOrder)> {
        self.sort
    }

    /// Current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current contents of the folder prompt.
    #[must_use]
    pub fn folder_input(&self) -> &str {
        &self.folder_input
    }

    /// Selected position within the view.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Scroll offset of the table.
    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Error message to display, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ==================== State transitions ====================

    /// Install a freshly loaded result and move to Ready.
    pub fn set_result(&mut self, result: ScanResult, source: LoadSource) {
        self.folder = Some(result.folder.clone());
        self.records = result.records;
        self.source = Some(source);
        self.status = Status::Ready;
        self.error = None;
        self.selected = 0;
        self.scroll = 0;
        self.rebuild_view();
    }

    /// Enter Scanning state for `folder`. The run loop draws one frame in
    /// this state before blocking on the scan.
    pub fn begin_scan(&mut self, folder: &Path) {
        self.folder = Some(folder.to_path_buf());
        self.status = Status::Scanning;
        self.error = None;
    }

    /// A refresh failed. Existing rows (if any) stay on screen.
    pub fn fail_scan(&mut self, message: &str) {
        self.status = if self.records.is_empty() {
            Status::Idle
        } else {
            Status::Ready
        };
        self.error = Some(message.to_string());
    }

    /// Show an error message overlay.
    pub fn set_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    /// Dismiss the error overlay.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Tell the app how many table rows fit on screen, for scroll math.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        self.adjust_scroll();
    }

    // ==================== Sort and search ====================

    /// Sort by `column`, toggling direction when it is already the sort key.
    ///
    /// The sort is stable with respect to equal keys: rows that compare
    /// equal keep their scan order, in both directions.
    pub fn sort_by(&mut self, column: Column) {
        let order = match self.sort {
            Some((current, order)) if current == column => order.toggled(),
            _ => SortOrder::Ascending,
        };
        self.sort = Some((column, order));
        self.rebuild_view();
    }

    /// Replace the search text and refilter.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.rebuild_view();
    }

    /// Append one character to the search text (live filtering).
    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.rebuild_view();
    }

    /// Remove the last character of the search text.
    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.rebuild_view();
    }

    /// Recompute the view: filter on the base scan order, then stable-sort.
    /// Sorting always starts from the base order so equal keys stay in scan
    /// order regardless of how many times the direction toggles.
    fn rebuild_view(&mut self) {
        let needle = self.search.to_lowercase();
        self.view = (0..self.records.len())
            .filter(|&i| row_matches(&self.records[i], &needle))
            .collect();

        if let Some((column, order)) = self.sort {
            let records = &self.records;
            self.view.sort_by(|&a, &b| {
                let ordering = compare_records(&records[a], &records[b], column);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        if self.selected >= self.view.len() {
            self.selected = self.view.len().saturating_sub(1);
        }
        self.adjust_scroll();
    }

    // ==================== Navigation ====================

    /// Move selection down one row.
    pub fn next(&mut self) {
        if self.selected + 1 < self.view.len() {
            self.selected += 1;
            self.adjust_scroll();
        }
    }

    /// Move selection up one row.
    pub fn previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.adjust_scroll();
        }
    }

    /// Move selection down one page.
    pub fn page_down(&mut self) {
        let last = self.view.len().saturating_sub(1);
        self.selected = (self.selected + self.visible_rows.max(1)).min(last);
        self.adjust_scroll();
    }

    /// Move selection up one page.
    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.visible_rows.max(1));
        self.adjust_scroll();
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.selected = 0;
        self.adjust_scroll();
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        self.selected = self.view.len().saturating_sub(1);
        self.adjust_scroll();
    }

    fn adjust_scroll(&mut self) {
        let visible = self.visible_rows.max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
    }

    // ==================== Key handling ====================

    /// Apply one key event to the state.
    ///
    /// Returns a [`Request`] when the event asks for work that touches the
    /// filesystem; the run loop performs it and feeds the outcome back via
    /// [`Self::set_result`] or [`Self::fail_scan`].
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Request> {
        match self.mode {
            Mode::Browsing => self.handle_browsing_key(key),
            Mode::Searching => {
                self.handle_searching_key(key);
                None
            }
            Mode::SelectingFolder => self.handle_folder_key(key),
            Mode::Quitting => None,
        }
    }

    fn handle_browsing_key(&mut self, key: KeyEvent) -> Option<Request> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.mode = Mode::Quitting;
            return None;
        }

        match key.code {
            KeyCode::Char('q') => self.mode = Mode::Quitting,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Char('/') => self.mode = Mode::Searching,
            KeyCode::Char('o') => {
                self.folder_input = self
                    .folder
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.mode = Mode::SelectingFolder;
            }
            KeyCode::Char('r') => {
                if self.folder.is_some() {
                    return Some(Request::Rescan);
                }
            }
            KeyCode::Char(c @ '1'..='6') => {
                if let Some(column) = Column::from_digit(c) {
                    self.sort_by(column);
                }
            }
            KeyCode::Esc => {
                if self.error.is_some() {
                    self.clear_error();
                } else if !self.search.is_empty() {
                    self.set_search("");
                }
            }
            _ => {}
        }
        None
    }

    fn handle_searching_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.set_search("");
                self.mode = Mode::Browsing;
            }
            KeyCode::Enter => self.mode = Mode::Browsing,
            KeyCode::Backspace => self.pop_search_char(),
            KeyCode::Char(c) => self.push_search_char(c),
            _ => {}
        }
    }

    fn handle_folder_key(&mut self, key: KeyEvent) -> Option<Request> {
        match key.code {
            KeyCode::Esc => {
                self.folder_input.clear();
                self.mode = Mode::Browsing;
            }
            KeyCode::Enter => {
                let input = self.folder_input.trim().to_string();
                self.folder_input.clear();
                self.mode = Mode::Browsing;
                if !input.is_empty() {
                    return Some(Request::OpenFolder(PathBuf::from(input)));
                }
            }
            KeyCode::Backspace => {
                self.folder_input.pop();
            }
            KeyCode::Char(c) => self.folder_input.push(c),
            _ => {}
        }
        None
    }
}

/// Case-insensitive substring match across the text fields of a record:
/// path, title, and author. Page count, size, and modification time are
/// never matched. An empty needle matches everything.
fn row_matches(record: &MetadataRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record.path.to_string_lossy().to_lowercase().contains(needle)
        || record.title.to_lowercase().contains(needle)
        || record.author.to_lowercase().contains(needle)
}

/// Compare two records by one column. Text columns compare
/// case-insensitively; numeric columns compare numerically, with absent
/// page counts ordered first.
fn compare_records(a: &MetadataRecord, b: &MetadataRecord, column: Column) -> Ordering {
    match column {
        Column::Path => a
            .path
            .to_string_lossy()
            .to_lowercase()
            .cmp(&b.path.to_string_lossy().to_lowercase()),
        Column::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        Column::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
        Column::Pages => a.pages.cmp(&b.pages),
        Column::Size => a.size.cmp(&b.size),
        Column::Modified => a.modified.cmp(&b.modified),
    }
}
