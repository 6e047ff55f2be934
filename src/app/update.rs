use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::sync::mpsc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{
    ADD_FAILED, ApiCall, ApiEvent, AppState, DELETE_FAILED, FormField, InputMode, LOAD_FAILED,
    Theme, UPDATE_FAILED, UserForm,
};
use crate::config::Cli;
use crate::ui;

/// Drive the dashboard until the user quits.
///
/// The loop itself stays synchronous: it draws, polls the keyboard with a
/// 100ms tick, and drains completed service calls from the channel each
/// pass. Service calls run as independent tasks on the owned runtime and
/// report back with one [`ApiEvent`] apiece.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    cli: &Cli,
) -> Result<()> {
    let runtime = Runtime::new().context("failed to start async runtime")?;
    let client = ApiClient::new(&cli.base_url)?;
    let (tx, rx) = mpsc::channel::<ApiEvent>();

    let mut app = AppState::new(
        Theme::load_or_init(&cli.theme),
        Keymap::load_or_init(&cli.keys),
    );

    info!(base_url = %client.base_url(), "starting dashboard");
    dispatch(ApiCall::FetchAll, &runtime, &client, &tx);

    loop {
        while let Ok(completed) = rx.try_recv() {
            apply_api_event(&mut app, completed);
        }

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let call = match app.input_mode {
                        InputMode::Table => match app.keymap.resolve(&key) {
                            Some(KeyAction::Quit) => break,
                            Some(action) => handle_table_key(&mut app, action),
                            None => None,
                        },
                        InputMode::Form => handle_form_key(&mut app, &key),
                        InputMode::Help => {
                            handle_help_key(&mut app, key.code);
                            None
                        }
                    };
                    if let Some(call) = call {
                        dispatch(call, &runtime, &client, &tx);
                    }
                }
            }
        }
    }

    // Abandon any in-flight service calls; their completions have nowhere
    // to land once the receiver is gone.
    drop(rx);
    runtime.shutdown_background();
    Ok(())
}

/// Apply a resolved table-mode action. Returns the service call the
/// action asks for, if any.
pub fn handle_table_key(app: &mut AppState, action: KeyAction) -> Option<ApiCall> {
    match action {
        KeyAction::MoveUp => {
            if app.selected_index > 0 {
                app.selected_index -= 1;
            }
            None
        }
        KeyAction::MoveDown => {
            if app.selected_index + 1 < app.users.len() {
                app.selected_index += 1;
            }
            None
        }
        KeyAction::PageUp => {
            let rpp = app.rows_per_page.max(1);
            if app.selected_index >= rpp {
                app.selected_index -= rpp;
            } else {
                app.selected_index = 0;
            }
            None
        }
        KeyAction::PageDown => {
            let rpp = app.rows_per_page.max(1);
            let new_idx = app.selected_index.saturating_add(rpp);
            app.selected_index = new_idx.min(app.users.len().saturating_sub(1));
            None
        }
        KeyAction::FocusForm => {
            app.input_mode = InputMode::Form;
            app.focused_field = FormField::FirstName;
            None
        }
        KeyAction::EditSelection => {
            if let Some(user) = app.selected_user() {
                app.form = UserForm::from_user(user);
                app.input_mode = InputMode::Form;
                app.focused_field = FormField::FirstName;
            }
            None
        }
        KeyAction::DeleteSelection => app.selected_user().map(|u| ApiCall::Delete(u.id)),
        KeyAction::OpenHelp => {
            app.input_mode = InputMode::Help;
            None
        }
        KeyAction::Quit | KeyAction::Ignore => None,
    }
}

/// Raw key handling while the form has focus. Printable characters edit
/// the focused field, Enter submits, Esc returns to the table without
/// touching the form contents. Returns the service call to issue.
pub fn handle_form_key(app: &mut AppState, key: &KeyEvent) -> Option<ApiCall> {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Table;
            None
        }
        KeyCode::Tab | KeyCode::Down => {
            app.focused_field = app.focused_field.next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focused_field = app.focused_field.prev();
            None
        }
        KeyCode::Enter => Some(submit_form(app)),
        KeyCode::Backspace => {
            app.form.field_mut(app.focused_field).pop();
            None
        }
        KeyCode::Char(c) => {
            app.form.field_mut(app.focused_field).push(c);
            None
        }
        _ => None,
    }
}

fn handle_help_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.input_mode = InputMode::Table;
        }
        _ => {}
    }
}

/// The submission for the current form contents: an update when a record
/// identifier is loaded, otherwise a create. Fields are submitted as
/// typed, with no validation.
fn submit_form(app: &AppState) -> ApiCall {
    match app.form.submission() {
        Some(user) => ApiCall::Update(user),
        None => ApiCall::Create(app.form.draft()),
    }
}

/// Apply one completed service call to the state.
///
/// Completions land strictly in arrival order with no queueing or
/// deduplication, so overlapping calls resolve last-applied-wins. A
/// failure writes its fixed message into the error slot, replacing
/// whatever was there; successes never clear it.
pub fn apply_api_event(app: &mut AppState, event: ApiEvent) {
    match event {
        ApiEvent::Loaded(users) => {
            app.users = users;
            clamp_selection(app);
        }
        ApiEvent::Created(user) => {
            app.users.push(user);
            app.form.clear();
            app.focused_field = FormField::FirstName;
        }
        ApiEvent::Updated(user) => {
            // The submitted record replaces the row; if the row is gone
            // (deleted underneath the edit), the list stays as it is.
            if let Some(existing) = app.users.iter_mut().find(|u| u.id == user.id) {
                *existing = user;
            }
            app.form.clear();
            app.focused_field = FormField::FirstName;
        }
        ApiEvent::Deleted(id) => {
            app.users.retain(|u| u.id != id);
            clamp_selection(app);
        }
        ApiEvent::LoadFailed(e) => {
            warn!(error = %e, "user list fetch failed");
            app.error = Some(LOAD_FAILED.to_string());
        }
        ApiEvent::CreateFailed(e) => {
            warn!(error = %e, "user create failed");
            app.error = Some(ADD_FAILED.to_string());
        }
        ApiEvent::UpdateFailed(e) => {
            warn!(error = %e, "user update failed");
            app.error = Some(UPDATE_FAILED.to_string());
        }
        ApiEvent::DeleteFailed(e) => {
            warn!(error = %e, "user delete failed");
            app.error = Some(DELETE_FAILED.to_string());
        }
    }
}

fn clamp_selection(app: &mut AppState) {
    if app.selected_index >= app.users.len() {
        app.selected_index = app.users.len().saturating_sub(1);
    }
}

/// Spawn one service call on the runtime. Every call sends exactly one
/// completion; sends after the receiver is dropped are discarded.
pub fn dispatch(
    call: ApiCall,
    runtime: &Runtime,
    client: &ApiClient,
    tx: &mpsc::Sender<ApiEvent>,
) {
    let client = client.clone();
    let tx = tx.clone();
    runtime.spawn(async move {
        let event = match call {
            ApiCall::FetchAll => match client.list_users().await {
                Ok(users) => ApiEvent::Loaded(users),
                Err(e) => ApiEvent::LoadFailed(e),
            },
            ApiCall::Create(draft) => match client.create_user(&draft).await {
                Ok(user) => ApiEvent::Created(user),
                Err(e) => ApiEvent::CreateFailed(e),
            },
            ApiCall::Update(user) => match client.update_user(&user).await {
                // The submitted record, not the service echo, is what the
                // table shows after an update.
                Ok(()) => ApiEvent::Updated(user),
                Err(e) => ApiEvent::UpdateFailed(e),
            },
            ApiCall::Delete(id) => match client.delete_user(id).await {
                Ok(()) => ApiEvent::Deleted(id),
                Err(e) => ApiEvent::DeleteFailed(e),
            },
        };
        let _ = tx.send(event);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::User;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_user(id: u64, first: &str) -> User {
        User {
            id,
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            department: "Sales".to_string(),
        }
    }

    #[test]
    fn typing_edits_the_focused_field() {
        let mut app = AppState::default();
        app.input_mode = InputMode::Form;

        assert!(handle_form_key(&mut app, &key(KeyCode::Char('J'))).is_none());
        assert!(handle_form_key(&mut app, &key(KeyCode::Char('o'))).is_none());
        assert_eq!(app.form.first_name, "Jo");

        handle_form_key(&mut app, &key(KeyCode::Tab));
        handle_form_key(&mut app, &key(KeyCode::Char('x')));
        assert_eq!(app.form.last_name, "x");

        handle_form_key(&mut app, &key(KeyCode::Backspace));
        assert_eq!(app.form.last_name, "");
    }

    #[test]
    fn q_in_form_mode_is_text_not_quit() {
        let mut app = AppState::default();
        app.input_mode = InputMode::Form;
        handle_form_key(&mut app, &key(KeyCode::Char('q')));
        assert_eq!(app.form.first_name, "q");
        assert_eq!(app.input_mode, InputMode::Form);
    }

    #[test]
    fn enter_submits_create_when_no_id_loaded() {
        let mut app = AppState::default();
        app.input_mode = InputMode::Form;
        app.form.first_name = "Ada".to_string();

        let call = handle_form_key(&mut app, &key(KeyCode::Enter));
        match call {
            Some(ApiCall::Create(draft)) => assert_eq!(draft.first_name, "Ada"),
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn enter_submits_update_when_editing() {
        let mut app = AppState::default();
        app.users.push(sample_user(3, "Eve"));
        handle_table_key(&mut app, KeyAction::EditSelection);
        assert_eq!(app.form.id, Some(3));
        assert_eq!(app.input_mode, InputMode::Form);

        let call = handle_form_key(&mut app, &key(KeyCode::Enter));
        match call {
            Some(ApiCall::Update(user)) => {
                assert_eq!(user.id, 3);
                assert_eq!(user.first_name, "Eve");
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn esc_leaves_form_contents_alone() {
        let mut app = AppState::default();
        app.users.push(sample_user(7, "Ada"));
        handle_table_key(&mut app, KeyAction::EditSelection);
        handle_form_key(&mut app, &key(KeyCode::Esc));

        assert_eq!(app.input_mode, InputMode::Table);
        assert_eq!(app.form.id, Some(7));
        assert_eq!(app.form.first_name, "Ada");
    }

    #[test]
    fn delete_targets_the_selected_row() {
        let mut app = AppState::default();
        app.users.push(sample_user(1, "A"));
        app.users.push(sample_user(2, "B"));
        app.selected_index = 1;

        let call = handle_table_key(&mut app, KeyAction::DeleteSelection);
        assert_eq!(call, Some(ApiCall::Delete(2)));
    }

    #[test]
    fn delete_on_empty_table_is_a_no_op() {
        let mut app = AppState::default();
        assert_eq!(handle_table_key(&mut app, KeyAction::DeleteSelection), None);
    }

    #[test]
    fn loaded_replaces_the_list_verbatim() {
        let mut app = AppState::default();
        app.users.push(sample_user(9, "Old"));
        app.selected_index = 0;

        apply_api_event(
            &mut app,
            ApiEvent::Loaded(vec![sample_user(2, "B"), sample_user(1, "A")]),
        );
        assert_eq!(app.users.len(), 2);
        // Response order is kept, not sorted
        assert_eq!(app.users[0].id, 2);
        assert_eq!(app.users[1].id, 1);
    }
}
