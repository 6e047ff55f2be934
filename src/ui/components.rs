//! Shared UI components (status bar, modal helpers).
//!
//! Contains small building blocks reused by the dashboard screens.
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, InputMode};

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Table => "TABLE",
        InputMode::Form => "FORM",
        InputMode::Help => "HELP",
    };
    let msg = format!(
        "mode: {mode}  users:{}  rows/page:{}",
        app.users.len(),
        app.rows_per_page
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// The key specs currently bound to `action`, sorted for stable display.
fn keys_for(keymap: &Keymap, action: KeyAction) -> String {
    let mut specs: Vec<String> = keymap
        .all_bindings()
        .into_iter()
        .filter(|&(_, a)| a == action)
        .map(|((mods, code), _)| Keymap::format_key(mods, code))
        .collect();
    specs.sort();
    specs.join(" / ")
}

/// Render the help modal with key tips for both input modes. The table
/// section is built from the live keymap, so overrides from
/// `keybinds.conf` show up here.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 70u16.min(area.width.saturating_sub(4)).max(50);
    let height = 20u16.min(area.height.saturating_sub(4)).max(12);
    let rect = centered_rect(width, height, area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Help",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Table",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    let entries = [
        ("Move up", KeyAction::MoveUp),
        ("Move down", KeyAction::MoveDown),
        ("Previous page", KeyAction::PageUp),
        ("Next page", KeyAction::PageDown),
        ("Focus the form", KeyAction::FocusForm),
        ("Edit selected", KeyAction::EditSelection),
        ("Delete selected", KeyAction::DeleteSelection),
        ("Quit", KeyAction::Quit),
    ];
    for (label, action) in entries {
        let mut spans = vec![
            Span::raw(format!("{}: ", label)),
            Span::styled(
                keys_for(&app.keymap, action),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ];
        if action == KeyAction::DeleteSelection {
            spans.push(Span::raw(" (immediate, no confirmation)"));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Form",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::raw("Next / previous field: "),
        Span::styled(
            "Tab, Down / Shift+Tab, Up",
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Submit (Add or Update): "),
        Span::styled("Enter", Style::default().add_modifier(Modifier::ITALIC)),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Back to table, keeping the entry: "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::ITALIC)),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Close help: "),
        Span::styled(
            "Esc / Enter",
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ]));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
