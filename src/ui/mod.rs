pub mod components;
pub mod form;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode};

/// Draw the whole dashboard: header, error line, form, table, status
/// bar, and the help overlay when open.
pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(7),
                Constraint::Min(5),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    let p = Paragraph::new(
        "User Management Dashboard    Tab/n: form  Enter/e: edit  d: delete  ?: help  q: quit",
    )
    .block(
        Block::default()
            .title("userdash")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    // The sticky error slot; blank until a service call fails.
    let error_line = Paragraph::new(app.error.clone().unwrap_or_default())
        .style(Style::default().fg(app.theme.error));
    f.render_widget(error_line, root[1]);

    form::render_form(f, root[2], app);
    table::render_users_table(f, root[3], app);
    components::render_status_bar(f, root[4], app);

    if app.input_mode == InputMode::Help {
        components::render_help_modal(f, f.area(), app);
    }
}
