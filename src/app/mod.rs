//! Application state types and entry glue.
//!
//! Defines the structs and enums that model the dashboard state, the
//! messages exchanged with the API task layer, and helpers to construct
//! defaults and to run the application loop (re-exported as `run`).
//!
pub mod keymap;
pub mod update;

use ratatui::style::Color;

use crate::api::{User, UserDraft};
use crate::error::ApiError;
use keymap::Keymap;

/// Fixed user-facing failure messages, one per service operation.
pub const LOAD_FAILED: &str = "Failed to load users.";
pub const ADD_FAILED: &str = "Failed to add user.";
pub const UPDATE_FAILED: &str = "Failed to update user.";
pub const DELETE_FAILED: &str = "Failed to delete user.";

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Table,
    Form,
    Help,
}

/// The four editable form fields, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Department,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Department,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Email => "Email",
            FormField::Department => "Department",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::FirstName => FormField::LastName,
            FormField::LastName => FormField::Email,
            FormField::Email => FormField::Department,
            FormField::Department => FormField::FirstName,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::FirstName => FormField::Department,
            FormField::LastName => FormField::FirstName,
            FormField::Email => FormField::LastName,
            FormField::Department => FormField::Email,
        }
    }
}

/// The single add/edit form buffer.
///
/// An identifier is present exactly while editing an existing record;
/// submitting then issues an update instead of a create. The form resets
/// only after a successful create or update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserForm {
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

impl UserForm {
    /// Copy `user` into a form buffer, identifier included.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: Some(user.id),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            department: user.department.clone(),
        }
    }

    /// Reset to the empty add-mode state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// The create payload for the current field values.
    pub fn draft(&self) -> UserDraft {
        UserDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
        }
    }

    /// The full record for an update submission, `None` in add mode.
    pub fn submission(&self) -> Option<User> {
        self.id.map(|id| User {
            id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
        })
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Department => &self.department,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Department => &mut self.department,
        }
    }
}

/// A requested service operation, produced by the key handlers and
/// executed by the event loop.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiCall {
    FetchAll,
    Create(UserDraft),
    Update(User),
    Delete(u64),
}

/// Completion message sent back from a spawned service call.
///
/// Each spawned call produces exactly one event; the loop applies them
/// in arrival order. `Updated` carries the record as it was submitted,
/// not as the service echoed it.
#[derive(Debug)]
pub enum ApiEvent {
    Loaded(Vec<User>),
    LoadFailed(ApiError),
    Created(User),
    CreateFailed(ApiError),
    Updated(User),
    UpdateFailed(ApiError),
    Deleted(u64),
    DeleteFailed(ApiError),
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
}

impl Theme {
    /// Dark default theme.
    #[allow(dead_code)]
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error: Color::Red,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            // text & neutrals
            text: Color::Rgb(0xcd, 0xd6, 0xf4),      // text
            // accents and chrome
            title: Color::Rgb(0xcb, 0xa6, 0xf7),     // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),    // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44), // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe), // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4), // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "error" => theme.error = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or special names: "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = if let Some(h) = lower.strip_prefix('#') { h } else { lower.as_str() };
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        // Minimal header
        buf.push_str("# userdash theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // For named colors, emit a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::LightRed => "#FF6666".to_string(),
                Color::LightGreen => "#66FF66".to_string(),
                Color::LightYellow => "#FFFF66".to_string(),
                Color::LightBlue => "#6666FF".to_string(),
                Color::LightMagenta => "#FF66FF".to_string(),
                Color::LightCyan => "#66FFFF".to_string(),
                Color::White => "#FFFFFF".to_string(),
                Color::Indexed(i) => format!("index:{}", i),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("error", self.error);

        std::fs::write(path, buf)
    }

    /// Ensure a config file exists; if missing, write one with the current default theme and return it.
    /// If present, load from it; on parse errors, return `mocha`.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        if let Some(existing) = config_file_read_path("theme.conf") {
            return Self::from_file(&existing).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        let _ = t.write_file(path);
        t
    }
}

/// Look up an existing config file: the given name as-is (relative to the
/// working directory), then under `~/.config/userdash/`.
pub fn config_file_read_path(name: &str) -> Option<String> {
    if std::path::Path::new(name).exists() {
        return Some(name.to_string());
    }
    let home = std::env::var_os("HOME")?;
    let candidate = std::path::Path::new(&home)
        .join(".config")
        .join("userdash")
        .join(name);
    if candidate.exists() {
        return Some(candidate.to_string_lossy().into_owned());
    }
    None
}

pub struct AppState {
    pub users: Vec<User>,
    pub form: UserForm,
    pub error: Option<String>,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub focused_field: FormField,
    pub theme: Theme,
    pub keymap: Keymap,
}

impl AppState {
    /// Create an empty state; the user list arrives with the first
    /// `Loaded` event.
    pub fn new(theme: Theme, keymap: Keymap) -> Self {
        Self {
            users: Vec::new(),
            form: UserForm::default(),
            error: None,
            selected_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Table,
            focused_field: FormField::FirstName,
            theme,
            keymap,
        }
    }

    /// The record under the table cursor, if any.
    pub fn selected_user(&self) -> Option<&User> {
        self.users.get(self.selected_index)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::mocha(), Keymap::new_defaults())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
