//! Terminal User Interface rendering module
//!
//! Draws the resource form with ratatui. Rendering only reads [`App`];
//! every change goes through the event handlers.
//!
//! # Architecture
//!
//! - `header` - Title bar with server and current path
//! - `help` - Help overlay showing keybindings
//!
//! # Layout
//!
//! Path, content, content type, the two checkboxes, the expiry value (only
//! while its region is shown) and the header rows, top to bottom.

mod header;
mod help;

use crate::app::{App, Focus, Mode};
use cmedit::editor::HeaderRow;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "_";

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Form
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    header::render(f, app, chunks[0]);
    render_form(f, app, chunks[1]);
    render_footer(f, app, chunks[2]);

    if app.mode == Mode::Help {
        help::render(f, app);
    }
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(field_style(focused))
        .title(Span::styled(
            format!(" {} ", title),
            field_style(focused).add_modifier(Modifier::BOLD),
        ))
}

fn render_text_field(f: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let mut spans = vec![Span::styled(value.to_string(), Style::default().fg(Color::White))];
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(field_block(title, focused));
    f.render_widget(paragraph, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let header_rows = form.headers.len().max(1) as u16;

    let mut constraints = vec![
        Constraint::Length(3), // Path
        Constraint::Min(5),    // Content
        Constraint::Length(3), // Content type
        Constraint::Length(1), // Checkboxes
    ];
    if form.expires_visible {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(header_rows + 2));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_text_field(f, "Path", &form.path, app.focus == Focus::Path, rows[0]);
    render_content(f, app, rows[1]);
    render_text_field(
        f,
        "Content-Type",
        &form.ctype,
        app.focus == Focus::ContentType,
        rows[2],
    );
    render_checkboxes(f, app, rows[3]);

    let mut next = 4;
    if form.expires_visible {
        render_text_field(f, "Expires", &form.expires, app.focus == Focus::Expires, rows[next]);
        next += 1;
    }
    render_headers(f, app, rows[next]);
}

fn render_content(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Content;
    let block = field_block("Content", focused);
    let inner_height = block.inner(area).height as usize;

    let mut text = app.form.content.clone();
    if focused {
        text.push_str(CURSOR);
    }

    // Keep the end of the body, where typing happens, in view
    let total_lines = text.split('\n').count();
    let scroll = total_lines.saturating_sub(inner_height) as u16;

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn checkbox<'a>(label: &'a str, checked: bool, focused: bool) -> Vec<Span<'a>> {
    let mark = if checked { "[x] " } else { "[ ] " };
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    vec![Span::styled(mark, style), Span::styled(label, style)]
}

fn render_checkboxes(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(checkbox(
        "Include date",
        app.form.incdate,
        app.focus == Focus::IncludeDate,
    ));
    spans.push(Span::raw("    "));
    spans.extend(checkbox(
        "Expires",
        app.form.expires_checked,
        app.focus == Focus::ExpiresToggle,
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn header_row_line(index: usize, row: &HeaderRow, focus: Focus) -> Line<'_> {
    let name_focused = focus == Focus::HeaderName(index);
    let value_focused = focus == Focus::HeaderValue(index);

    let part = |text: &str, focused: bool| {
        let mut text = text.to_string();
        if focused {
            text.push_str(CURSOR);
        }
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Span::styled(text, style)
    };

    Line::from(vec![
        Span::styled(format!(" {:>2}. ", index + 1), Style::default().fg(Color::DarkGray)),
        part(&row.name, name_focused),
        Span::styled(" : ", Style::default().fg(Color::DarkGray)),
        part(&row.value, value_focused),
    ])
}

fn render_headers(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus.header_index().is_some();
    let block = field_block("Headers", focused);

    let lines: Vec<Line> = if app.form.headers.is_empty() {
        vec![Line::from(Span::styled(
            " No headers (Ctrl+N to add)",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.form
            .headers
            .iter()
            .enumerate()
            .map(|(i, row)| header_row_line(i, row, app.focus))
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let text = |t: &'static str| Span::styled(t, Style::default().fg(Color::DarkGray));

    let mut spans = vec![
        key(" ^L"),
        text(" load  "),
        key("^S"),
        text(" save  "),
        key("^N"),
        text(" add header  "),
        key("^D"),
        text(" remove header  "),
        key("F1"),
        text(" help  "),
        key("^Q"),
        text(" quit"),
    ];

    if app.in_flight > 0 {
        spans.push(Span::styled(
            format!("  [{} pending]", app.in_flight),
            Style::default().fg(Color::Magenta),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
