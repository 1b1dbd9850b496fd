//! User configuration — keybindings, board features and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/term-chess/config.toml` (default
//! `~/.config/term-chess/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::glyph::GlyphStyle;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    ClickCursor,
    Deselect,
    Undo,
    NewGame,
    FlipBoard,
    OpenSettings,
    ShowHelp,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup and the config file).
    pub const ALL: &[Action] = &[
        Action::CursorUp,
        Action::CursorDown,
        Action::CursorLeft,
        Action::CursorRight,
        Action::ClickCursor,
        Action::Deselect,
        Action::Undo,
        Action::NewGame,
        Action::FlipBoard,
        Action::OpenSettings,
        Action::ShowHelp,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::CursorUp => "Cursor Up",
            Action::CursorDown => "Cursor Down",
            Action::CursorLeft => "Cursor Left",
            Action::CursorRight => "Cursor Right",
            Action::ClickCursor => "Select / Move",
            Action::Deselect => "Cancel Selection",
            Action::Undo => "Take Back",
            Action::NewGame => "New Game",
            Action::FlipBoard => "Flip Board",
            Action::OpenSettings => "Settings",
            Action::ShowHelp => "Controls",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::CursorUp => "cursor_up",
            Action::CursorDown => "cursor_down",
            Action::CursorLeft => "cursor_left",
            Action::CursorRight => "cursor_right",
            Action::ClickCursor => "click_cursor",
            Action::Deselect => "deselect",
            Action::Undo => "undo",
            Action::NewGame => "new_game",
            Action::FlipBoard => "flip_board",
            Action::OpenSettings => "open_settings",
            Action::ShowHelp => "show_help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+z"`, `"←"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Ctrl+z"`, `"Left"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+z"`, `"Left"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => {
                let n: u8 = k[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Keep the original case so `N` and `n` stay distinct.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── variants ──────────

/// Feature presets, from the bare board up to the fully notifying one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Click to select, click to move.  Illegal moves are ignored and
    /// check / checkmate pop up as alerts.
    Basic,
    /// Adds legal-move highlights.
    Highlights,
    /// Adds move animation and the side panel.
    Animated,
    /// Adds transient notifications for invalid moves.
    Notifying,
}

impl Variant {
    /// Overwrite the feature toggles of `config` with this preset.
    pub fn apply(self, config: &mut AppConfig) {
        let level = self as u8;
        config.show_legal_moves = level >= Variant::Highlights as u8;
        config.animate_moves = level >= Variant::Animated as u8;
        config.show_side_panel = level >= Variant::Animated as u8;
        config.notify_invalid_moves = level >= Variant::Notifying as u8;
        config.modal_alerts = level < Variant::Animated as u8;
    }
}

// ───────────────────────────────────────── config ────────────

const DEFAULT_NOTIFICATION_MS: u64 = 2000;
const DEFAULT_ANIMATION_MS: u64 = 250;

/// Application configuration — keybindings and board features.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Highlight legal destinations of the selected piece.
    pub show_legal_moves: bool,
    /// Slide pieces instead of teleporting them.
    pub animate_moves: bool,
    /// Turn / move-list panel next to the board.
    pub show_side_panel: bool,
    /// Tell the user when a move attempt is refused.
    pub notify_invalid_moves: bool,
    /// Check and checkmate messages stay up until dismissed.
    pub modal_alerts: bool,
    pub glyph_style: GlyphStyle,
    /// How long a transient notification stays on screen.
    pub notification_ms: u64,
    /// Duration of a move animation.
    pub animation_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut config = Self {
            bindings: Self::default_bindings(),
            show_legal_moves: true,
            animate_moves: true,
            show_side_panel: true,
            notify_invalid_moves: true,
            modal_alerts: false,
            glyph_style: GlyphStyle::Unicode,
            notification_ms: DEFAULT_NOTIFICATION_MS,
            animation_ms: DEFAULT_ANIMATION_MS,
        };
        Variant::Notifying.apply(&mut config);
        config
    }
}

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(CursorUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(CursorDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(CursorLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(CursorRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(ClickCursor, vec![KeyBind::new(Enter, n), KeyBind::new(Char(' '), n)]);
        m.insert(Deselect, vec![KeyBind::new(Esc, n)]);
        m.insert(Undo, vec![KeyBind::new(Char('u'), n), KeyBind::new(Backspace, n)]);
        m.insert(NewGame, vec![KeyBind::new(Char('n'), n)]);
        m.insert(FlipBoard, vec![KeyBind::new(Char('f'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('s'), n)]);
        m.insert(ShowHelp, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "click: select/move | {}: undo | {}: new | {}: flip | {}: settings | {}: keys | {}: quit",
            self.short_binding(Action::Undo),
            self.short_binding(Action::NewGame),
            self.short_binding(Action::FlipBoard),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::ShowHelp),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("could not read {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        tracing::debug!("config saved to {}", path.display());
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Board settings.
            match key {
                "show_legal_moves" => {
                    config.show_legal_moves = value == "true";
                    continue;
                }
                "animate_moves" => {
                    config.animate_moves = value == "true";
                    continue;
                }
                "show_side_panel" => {
                    config.show_side_panel = value == "true";
                    continue;
                }
                "notify_invalid_moves" => {
                    config.notify_invalid_moves = value == "true";
                    continue;
                }
                "modal_alerts" => {
                    config.modal_alerts = value == "true";
                    continue;
                }
                "ascii_pieces" => {
                    config.glyph_style = if value == "true" {
                        GlyphStyle::Ascii
                    } else {
                        GlyphStyle::Unicode
                    };
                    continue;
                }
                "notification_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.notification_ms = clamp_notification_ms(v);
                    }
                    continue;
                }
                "animation_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.animation_ms = clamp_animation_ms(v);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!("ignoring unknown config key {key:?}");
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# term-chess configuration".to_string(),
            String::new(),
            "# Board".to_string(),
            format!("show_legal_moves = {}", self.show_legal_moves),
            format!("animate_moves = {}", self.animate_moves),
            format!("show_side_panel = {}", self.show_side_panel),
            format!("notify_invalid_moves = {}", self.notify_invalid_moves),
            format!("modal_alerts = {}", self.modal_alerts),
            format!("ascii_pieces = {}", self.glyph_style == GlyphStyle::Ascii),
            format!("notification_ms = {}", self.notification_ms),
            format!("animation_ms = {}", self.animation_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Keep notifications readable but never permanent.
pub fn clamp_notification_ms(ms: u64) -> u64 {
    ms.clamp(500, 10_000)
}

/// `0` turns animation off.
pub fn clamp_animation_ms(ms: u64) -> u64 {
    ms.min(1500)
}

/// Return the config file path (`$XDG_CONFIG_HOME/term-chess/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("term-chess").join("config.toml")
}
