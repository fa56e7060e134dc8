//! Help Overlay
//!
//! Shows keyboard shortcuts.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Fields",
        &[
            ("Tab/↓", "Next field"),
            ("S-Tab/↑", "Previous field"),
            ("Enter", "Newline in content, toggle checkbox, next field"),
            ("Space", "Toggle checkbox"),
            ("Backspace", "Delete last character"),
        ],
    ),
    (
        "Headers",
        &[
            ("Ctrl+n", "Add header row"),
            ("Ctrl+d", "Remove focused header row"),
        ],
    ),
    (
        "Resource",
        &[
            ("Ctrl+l", "Load path (or location)"),
            ("Ctrl+s", "Save form to path"),
        ],
    ),
    (
        "General",
        &[
            ("F1/Esc", "Close help"),
            ("Ctrl+q", "Quit application"),
        ],
    ),
];

pub fn render(f: &mut Frame, _app: &App) {
    let area = f.area();
    let popup_area = centered_rect(60, 70, area);

    f.render_widget(Clear, popup_area);

    let mut help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (title, bindings) in SECTIONS {
        help_text.push(Line::from(Span::styled(
            *title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (keys, description) in *bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<12}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*description),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .areas(r);

    let [_, center, _] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .areas(middle);

    center
}
