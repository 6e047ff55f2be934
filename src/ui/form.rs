use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, FormField, InputMode};

/// Render the add/edit form. The title and submit hint track the form
/// contents: "Edit User"/"Update" while a record identifier is loaded,
/// "Add User"/"Add" otherwise.
pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let title = if app.form.is_edit() { "Edit User" } else { "Add User" };
    let submit = if app.form.is_edit() { "Update" } else { "Add" };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::with_capacity(FormField::ALL.len() + 1);
    for field in FormField::ALL {
        let focused = app.input_mode == InputMode::Form && app.focused_field == field;
        let marker = if focused { "▶ " } else { "  " };
        let value_style = if focused {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}{:<12}", marker, format!("{}:", field.label())),
                Style::default().fg(app.theme.text),
            ),
            Span::styled(app.form.field(field).to_string(), value_style),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("[ {} ] (Enter)", submit),
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}
