//! Render functions for the catalog window.
//!
//! # Responsibility
//! - Draw the record list, the edit form, and the status line from an
//!   immutable `ViewState` snapshot.
//!
//! # Invariants
//! - Rendering never mutates application state; widget cursors are derived
//!   from the snapshot on every frame.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::ViewState;
use crate::form::{FormField, FormState};
use crate::mode::Mode;

const KEY_HINTS: &str = "a add  u update  d delete  e edit  c clear  r reload  ? help  q quit";

/// Draws the whole window from one view-state snapshot.
pub fn render(frame: &mut Frame, mode: Mode, view: &ViewState) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // edit form
            Constraint::Min(0),    // record list
            Constraint::Length(1), // status line
        ])
        .split(area);

    render_form(frame, chunks[0], mode, &view.form);
    render_list(frame, chunks[1], view);
    render_status(frame, chunks[2], mode, view);

    if view.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_form(frame: &mut Frame, area: Rect, mode: Mode, form: &FormState) {
    let fields = [FormField::Id, FormField::Title, FormField::Author];
    let lines: Vec<Line> = fields
        .iter()
        .map(|&field| {
            let focused = mode == Mode::Edit && form.focus == field;
            let marker = if focused { ">" } else { " " };
            let value_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(
                    format!("{marker} {:<7}", field.label()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(form.field(field).to_string(), value_style),
            ])
        })
        .collect();

    let block = Block::default().title("book").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_list(frame: &mut Frame, area: Rect, view: &ViewState) {
    let items: Vec<ListItem> = view
        .books
        .iter()
        .map(|book| {
            ListItem::new(format!(
                "{:>5}  {:<32}  {}",
                book.id, book.title, book.author
            ))
        })
        .collect();

    let block = Block::default()
        .title(format!("books ({})", view.books.len()))
        .borders(Borders::ALL);
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(view.selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status(frame: &mut Frame, area: Rect, mode: Mode, view: &ViewState) {
    let mode_color = match mode {
        Mode::Browse => Color::Blue,
        Mode::Edit => Color::Green,
    };

    let message = view.status.as_deref().unwrap_or(KEY_HINTS);
    let line = Line::from(vec![
        Span::styled(
            format!("[{}] ", mode.label()),
            Style::default().fg(mode_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(message.to_string()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = "\
Bookshelf - Help

Browse mode:
  j/k or arrows  - move selection (populates the form)
  e or Enter     - edit the form
  a              - add a book from the form (id ignored)
  u              - update the book matching the form id
  d              - delete the book matching the form id
  c              - clear form and selection
  r              - reload the list from the store
  ?              - toggle this help
  q              - quit

Edit mode:
  Tab / Shift-Tab - next / previous field
  Backspace       - erase
  Esc             - back to browse
";

    let block = Block::default()
        .title("help")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black));

    let help_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
