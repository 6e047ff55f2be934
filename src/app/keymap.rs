//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! This module manages keyboard shortcuts for the table side of the TUI.
//! It supports:
//! - Loading custom keybindings from a config file (`keybinds.conf`)
//! - Providing sensible defaults if no config is present
//! - Resolving key presses (with modifiers) to semantic actions
//! - Exporting the current keymap back to a file for reference or customization
//!
//! Form-mode keys are not configurable: while the form has focus, keys are
//! raw text input handled directly by the event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
///
/// Each action represents a distinct table-mode operation. Multiple key
/// combinations can map to the same action, allowing for flexibility
/// (e.g., both 'j' and Down arrow can move down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Display the help/keybindings reference.
    OpenHelp,
    /// Move focus into the form, whatever its current contents.
    FocusForm,
    /// Copy the selected record into the form and start editing it.
    EditSelection,
    /// Delete the currently selected record.
    DeleteSelection,
    /// Move up in the table.
    MoveUp,
    /// Move down in the table.
    MoveDown,
    /// Move to the previous page of results.
    PageUp,
    /// Move to the next page of results.
    PageDown,
    /// Ignore this key (used for keys that shouldn't trigger anything).
    Ignore,
}

/// Manages keybinding configuration and key-to-action resolution.
///
/// The keymap uses a canonical mapping from `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
/// It supports loading from and saving to a configuration file, with sensible defaults if
/// no custom config is present.
#[derive(Clone, Debug)]
pub struct Keymap {
    /// Canonical mapping from (modifiers, code) to action.
    bindings: std::collections::HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings.
    ///
    /// Includes:
    /// - Arrow keys and vim-style keys (hjkl) for table navigation
    /// - q (quit), ? (help), Tab or n (focus the form)
    /// - Enter or e (edit selection), d or Delete (delete selection)
    /// - Page Up/Down for pagination
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = std::collections::HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Tab), KeyAction::FocusForm);
        bindings.insert((M::NONE, Char('n')), KeyAction::FocusForm);
        bindings.insert((M::NONE, Enter), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, KeyCode::Delete), KeyAction::DeleteSelection);
        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PageUp);
        bindings.insert((M::NONE, Right), KeyAction::PageDown);
        // Vim-like keys
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PageUp);
        bindings.insert((M::NONE, Char('l')), KeyAction::PageDown);

        // Page keys
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);

        Self { bindings }
    }

    /// Load a keymap from a file, or create defaults if the file doesn't exist.
    ///
    /// This is the main entry point for loading user configuration. It first checks
    /// if the specified path exists; if not, it looks for the file in standard config
    /// locations. If still not found, it creates a fresh default keymap and writes it
    /// to the specified path for future customization.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the keymap configuration file.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        if let Some(existing) = crate::app::config_file_read_path("keybinds.conf") {
            return Self::from_file(&existing).unwrap_or_default();
        }
        let km = Self::default();
        let _ = km.write_file(path);
        km
    }

    /// Load a keymap from a configuration file.
    ///
    /// The file should use the format: `<Action> = <KeySpec>` or the legacy
    /// `<KeySpec> = <Action>` format. The method starts from defaults and overrides
    /// with user-specified bindings.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the keymap configuration file.
    ///
    /// # Returns
    ///
    /// `Some(keymap)` if the file exists and is readable; `None` otherwise.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        // Start from defaults, then override with user-specified bindings
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            // Preferred format: Action = KeySpec
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            // Backward-compatible format: KeySpec = Action
            if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
        }
        Some(map)
    }

    /// Write the current keymap to a configuration file.
    ///
    /// This method exports the current keymap to a file in a human-readable format.
    /// It includes comments and examples for common key combinations.
    ///
    /// # Arguments
    ///
    /// * `path` - The path where the keymap will be written.
    ///
    /// # Returns
    ///
    /// `std::io::Result<()>` indicating success or failure.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdash keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Enter, Esc, Tab, Up, Down, Left, Right, PageUp, PageDown, Delete, n, e, d, j, k, h, l\n");
        buf.push_str("# Actions: Quit, OpenHelp, FocusForm, EditSelection, DeleteSelection, MoveUp, MoveDown, PageUp, PageDown, Ignore\n\n");

        // Emit a stable, readable subset of current bindings
        let dump = [
            ("q", KeyAction::Quit),
            ("Esc", KeyAction::Ignore),
            ("?", KeyAction::OpenHelp),
            ("Tab", KeyAction::FocusForm),
            ("n", KeyAction::FocusForm),
            ("Enter", KeyAction::EditSelection),
            ("e", KeyAction::EditSelection),
            ("d", KeyAction::DeleteSelection),
            ("Delete", KeyAction::DeleteSelection),
            ("Up", KeyAction::MoveUp),
            ("Down", KeyAction::MoveDown),
            ("k", KeyAction::MoveUp),
            ("j", KeyAction::MoveDown),
            ("Left", KeyAction::PageUp),
            ("Right", KeyAction::PageDown),
            ("h", KeyAction::PageUp),
            ("l", KeyAction::PageDown),
            ("PageUp", KeyAction::PageUp),
            ("PageDown", KeyAction::PageDown),
        ];
        for (k, a) in dump {
            let _ = writeln!(&mut buf, "{} = {}", format_action(a), k);
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its corresponding action.
    ///
    /// This method takes a [`KeyEvent`] and attempts to find the action it maps to.
    /// It considers the modifiers and key code.
    ///
    /// # Arguments
    ///
    /// * `key` - The key event to resolve.
    ///
    /// # Returns
    ///
    /// `Option<KeyAction>` indicating the action if found, or `None` if no action is mapped.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        let mm = key.modifiers;
        let code = key.code;
        self.bindings.get(&(mm, code)).copied()
    }

    /// Return a snapshot of all bindings as ((modifiers, code), action) pairs.
    ///
    /// The help modal uses this to list the bindings actually in effect.
    ///
    /// # Returns
    ///
    /// A vector of tuples containing the key (modifiers + code) and its action.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Format a key (modifiers + code) into a human-readable spec like "Ctrl+q", "Tab".
    ///
    /// This method is used to display key combinations in a user-friendly format.
    ///
    /// # Arguments
    ///
    /// * `mods` - The key modifiers.
    /// * `code` - The key code.
    ///
    /// # Returns
    ///
    /// A string representing the key combination.
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else if mods.is_empty() {
            base
        } else {
            // Future: format other modifiers when supported
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let mut rest = s;
    let mut mods = KeyModifiers::NONE;
    if let Some(after) = s.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        rest = after;
    }
    // Future: Alt+ / Shift+
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let chars: Vec<char> = rest.chars().collect();
            if chars.len() == 1 {
                KeyCode::Char(chars[0])
            } else {
                return None;
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "OpenHelp" => Some(KeyAction::OpenHelp),
        "FocusForm" => Some(KeyAction::FocusForm),
        "EditSelection" => Some(KeyAction::EditSelection),
        "DeleteSelection" => Some(KeyAction::DeleteSelection),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PageUp" => Some(KeyAction::PageUp),
        "PageDown" => Some(KeyAction::PageDown),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::FocusForm => "FocusForm",
        KeyAction::EditSelection => "EditSelection",
        KeyAction::DeleteSelection => "DeleteSelection",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::Ignore => "Ignore",
    }
}
