//! TUI layout and rendering with ratatui.
//!
//! # Overview
//!
//! The screen is three bands plus overlays:
//! - Header: folder path, row counts, load source
//! - Content: search bar and the metadata table
//! - Footer: key hints for the current mode
//! - Overlays: error dialog, folder prompt, scanning notice

use bytesize::ByteSize;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use super::app::{App, Column, Mode, SortOrder, Status};
use crate::LoadSource;

/// Rows consumed by the table's border and header inside the content area.
const TABLE_CHROME_ROWS: u16 = 3;

/// Render the UI based on the current application state.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_search(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    if app.status() == Status::Scanning {
        render_scanning_dialog(frame, area);
    }
    if app.mode() == Mode::SelectingFolder {
        render_folder_dialog(frame, app, area);
    }
    if app.error_message().is_some() {
        render_error_dialog(frame, app, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let folder = app
        .folder()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "no folder - press 'o' to open one".to_string());

    let counts = match app.status() {
        Status::Idle => String::new(),
        Status::Scanning => "scanning...".to_string(),
        Status::Ready => {
            let source = match app.source() {
                Some(LoadSource::Cache) => "cache",
                Some(LoadSource::Scan) => "scanned",
                None => "?",
            };
            if app.view().len() == app.records().len() {
                format!("{} PDF(s) ({})", app.records().len(), source)
            } else {
                format!(
                    "{}/{} PDF(s) ({})",
                    app.view().len(),
                    app.records().len(),
                    source
                )
            }
        }
    };

    let line = Line::from(vec![
        Span::styled("pdfshelf", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::raw(folder),
        Span::raw("  "),
        Span::styled(counts, Style::default().add_modifier(Modifier::DIM)),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let text = if app.mode() == Mode::Searching {
        format!("{}_", app.search())
    } else {
        app.search().to_string()
    };
    let title = if app.mode() == Mode::Searching {
        "Search (Enter to keep, Esc to clear)"
    } else {
        "Search (/)"
    };
    let search =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(search, area);
}

fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    app.set_visible_rows(area.height.saturating_sub(TABLE_CHROME_ROWS) as usize);

    let header_cells: Vec<Cell> = Column::ALL
        .iter()
        .map(|column| {
            Cell::from(column_header(app, *column))
                .style(Style::default().add_modifier(Modifier::BOLD))
        })
        .collect();
    let header = Row::new(header_cells);

    let rows: Vec<Row> = (0..app.view().len())
        .filter_map(|i| app.record_at(i))
        .map(|record| {
            Row::new(vec![
                Cell::from(file_name(record.path.as_path())),
                Cell::from(record.title.clone()),
                Cell::from(record.author.clone()),
                Cell::from(
                    record
                        .pages
                        .map_or_else(|| "-".to_string(), |p| p.to_string()),
                ),
                Cell::from(format_size(record.size)),
                Cell::from(record.modified_rfc3339()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(25),
        Constraint::Percentage(18),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(25),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("PDFs"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default()
        .with_offset(app.scroll())
        .with_selected(if app.view().is_empty() {
            None
        } else {
            Some(app.selected())
        });
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.mode() {
        Mode::Searching => "type to filter | Enter keep | Esc clear",
        Mode::SelectingFolder => "type a folder path | Enter open | Esc cancel",
        _ => "q quit | j/k move | / search | o open folder | r rescan | 1-6 sort",
    };
    let footer = Paragraph::new(hints)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_scanning_dialog(frame: &mut Frame, area: Rect) {
    let dialog = centered_rect(40, 3, area);
    frame.render_widget(Clear, dialog);
    let notice = Paragraph::new("Scanning folder...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Please wait"));
    frame.render_widget(notice, dialog);
}

fn render_folder_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let dialog = centered_rect(60, 3, area);
    frame.render_widget(Clear, dialog);
    let prompt = Paragraph::new(format!("{}_", app.folder_input())).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Open folder"),
    );
    frame.render_widget(prompt, dialog);
}

fn render_error_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let message = app.error_message().unwrap_or_default();
    let dialog = centered_rect(60, 5, area);
    frame.render_widget(Clear, dialog);
    let error = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error (Esc to dismiss)"),
        );
    frame.render_widget(error, dialog);
}

/// Header label for a column: number key, name, and sort indicator.
fn column_header(app: &App, column: Column) -> String {
    let key = Column::ALL.iter().position(|c| *c == column).unwrap_or(0) + 1;
    let indicator = match app.sort() {
        Some((current, SortOrder::Ascending)) if current == column => " ^",
        Some((current, SortOrder::Descending)) if current == column => " v",
        _ => "",
    };
    format!("{key}:{}{indicator}", column.title())
}

/// File name portion of a path, for the Path column. The full path is
/// still what search and sort operate on.
fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Human-readable file size (IEC units).
#[must_use]
pub fn format_size(bytes: u64) -> String {
    ByteSize(bytes).display().iec().to_string()
}

/// A centered rect of fixed height and percentage width.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
