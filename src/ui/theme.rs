//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};
use shakmaty::Color as Side;

use crate::app::notification::NotificationKind;

/// Central theme: every colour and style lives here.
pub struct Theme;

impl Theme {
    // ── board ──────────────────────────────────────────────────
    pub fn square_bg(light: bool) -> Color {
        if light {
            Color::Rgb(240, 217, 181)
        } else {
            Color::Rgb(181, 136, 99)
        }
    }

    pub fn selected_bg(light: bool) -> Color {
        if light {
            Color::Rgb(246, 246, 105)
        } else {
            Color::Rgb(186, 202, 68)
        }
    }

    pub fn last_move_bg(light: bool) -> Color {
        if light {
            Color::Rgb(205, 210, 106)
        } else {
            Color::Rgb(170, 162, 58)
        }
    }

    /// Background of a legal target that captures something.
    pub fn capture_bg(light: bool) -> Color {
        if light {
            Color::Rgb(232, 150, 120)
        } else {
            Color::Rgb(196, 104, 80)
        }
    }

    pub fn check_bg() -> Color {
        Color::Rgb(235, 97, 80)
    }

    /// Dot drawn on empty legal targets.
    pub fn target_marker_style() -> Style {
        Style::default().fg(Color::Rgb(90, 90, 90))
    }

    pub fn cursor_style() -> Style {
        Style::default()
            .fg(Color::Rgb(30, 90, 200))
            .add_modifier(Modifier::BOLD)
    }

    pub fn piece_fg(side: Side) -> Color {
        match side {
            Side::White => Color::Rgb(255, 255, 255),
            Side::Black => Color::Rgb(0, 0, 0),
        }
    }

    pub fn label_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── side panel ─────────────────────────────────────────────
    pub fn turn_style(side: Side) -> Style {
        let base = Style::default().add_modifier(Modifier::BOLD);
        match side {
            Side::White => base.fg(Color::White),
            Side::Black => base.fg(Color::Gray),
        }
    }

    pub fn move_number_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn move_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn latest_move_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    // ── notifications ──────────────────────────────────────────
    pub fn notification_color(kind: NotificationKind) -> Color {
        match kind {
            NotificationKind::Info => Color::Cyan,
            NotificationKind::Check => Color::Yellow,
            NotificationKind::Checkmate => Color::Magenta,
            NotificationKind::Invalid => Color::Red,
            NotificationKind::GameOver => Color::Blue,
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
