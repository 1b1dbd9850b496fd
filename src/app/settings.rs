//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::AppState;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Boolean toggle, read and written via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }
}

/// Step through `options`, starting over after the last one.
fn next_in<T: Copy + PartialEq>(options: &[T], current: T, fallback: usize) -> T {
    let idx = options.iter().position(|o| *o == current).unwrap_or(fallback);
    options[(idx + 1) % options.len()]
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Toggle {
        label: "Legal Move Highlights",
        get: |s| s.config.show_legal_moves,
        set: |s, v| {
            s.config.show_legal_moves = v;
            // Re-select so the highlights match the new setting.
            if let Some(sq) = s.selected {
                s.select(sq);
            }
        },
    },
    SettingsItem::Toggle {
        label: "Animate Moves",
        get: |s| s.config.animate_moves,
        set: |s, v| {
            s.config.animate_moves = v;
            if !v {
                s.animation = None;
            }
        },
    },
    SettingsItem::Toggle {
        label: "Side Panel",
        get: |s| s.config.show_side_panel,
        set: |s, v| s.config.show_side_panel = v,
    },
    SettingsItem::Toggle {
        label: "Invalid Move Notices",
        get: |s| s.config.notify_invalid_moves,
        set: |s, v| s.config.notify_invalid_moves = v,
    },
    SettingsItem::Toggle {
        label: "Check Alerts Wait",
        get: |s| s.config.modal_alerts,
        set: |s, v| s.config.modal_alerts = v,
    },
    SettingsItem::Cycle {
        label: "Piece Style",
        value: |s| s.config.glyph_style.label().to_string(),
        cycle: |s| {
            s.config.glyph_style = s.config.glyph_style.toggled();
            s.status_message = Some(format!("Pieces: {}", s.config.glyph_style.label()));
        },
    },
    SettingsItem::Cycle {
        label: "Notice Duration",
        value: |s| format!("{}ms", s.config.notification_ms),
        cycle: |s| {
            const DURATIONS: &[u64] = &[1000, 1500, 2000, 3000, 5000];
            s.config.notification_ms = next_in(DURATIONS, s.config.notification_ms, 2);
            s.sync_notification_duration();
            s.status_message = Some(format!("Notices last {}ms", s.config.notification_ms));
        },
    },
    SettingsItem::Cycle {
        label: "Animation Time",
        value: |s| match s.config.animation_ms {
            0 => "off".to_string(),
            ms => format!("{ms}ms"),
        },
        cycle: |s| {
            const SPEEDS: &[u64] = &[0, 120, 250, 400, 700];
            s.config.animation_ms = next_in(SPEEDS, s.config.animation_ms, 2);
            s.status_message = Some(format!("Animation: {}ms", s.config.animation_ms));
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::game::Game;
    use shakmaty::Square;

    fn find(label: &str) -> &'static SettingsItem {
        SETTINGS_ITEMS
            .iter()
            .find(|i| i.label() == label)
            .expect("settings item exists")
    }

    #[test]
    fn toggling_highlights_refreshes_the_current_selection() {
        let mut state = AppState::new(Game::new(), AppConfig::default());
        state.select(Square::E2);
        assert_eq!(state.highlights.len(), 2);

        let SettingsItem::Toggle { set, .. } = find("Legal Move Highlights") else {
            panic!("expected a toggle");
        };
        set(&mut state, false);
        assert!(state.highlights.is_empty());
        assert_eq!(state.selected, Some(Square::E2));
    }

    #[test]
    fn cycles_wrap_around() {
        let mut state = AppState::new(Game::new(), AppConfig::default());
        let SettingsItem::Cycle { cycle, value, .. } = find("Animation Time") else {
            panic!("expected a cycle");
        };
        state.config.animation_ms = 700;
        cycle(&mut state);
        assert_eq!(state.config.animation_ms, 0);
        assert_eq!(value(&state), "off");
        cycle(&mut state);
        assert_eq!(value(&state), "120ms");
    }

    #[test]
    fn unknown_values_restart_from_the_default() {
        assert_eq!(next_in(&[1, 2, 3], 9, 1), 3);
        assert_eq!(next_in(&[1, 2, 3], 3, 0), 1);
    }
}
