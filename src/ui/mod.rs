//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the game and app state and turns them into cells on the
//! terminal.  Nothing here mutates state.

pub mod board_widget;
pub mod layout;
pub mod notification;
pub mod popup;
pub mod side_panel;
pub mod theme;

use std::time::Instant;

use ratatui::{widgets::Paragraph, Frame};

use crate::app::state::{ActiveView, AppState};

use self::board_widget::BoardWidget;
use self::layout::AppLayout;
use self::notification::NotificationPopup;
use self::side_panel::SidePanel;
use self::theme::Theme;

/// Draw one frame: board, side panel, status bar, then overlays.
pub fn draw(frame: &mut Frame, state: &AppState, now: Instant) {
    let layout = AppLayout::from_area(frame.area(), state.config.show_side_panel);

    let board_block = AppLayout::board_block()
        .title(" term-chess ")
        .title_style(Theme::title_style())
        .border_style(Theme::border_style());
    frame.render_widget(
        BoardWidget::new(state, layout.board_geometry(state.flipped), now).block(board_block),
        layout.board_area,
    );

    if let Some(panel) = layout.panel_area {
        frame.render_widget(SidePanel { game: &state.game }, panel);
    }

    let hint = state.config.status_bar_hint();
    let status_text = match state.active_view {
        ActiveView::Board => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::SettingsMenu | ActiveView::Help => "",
    };
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );

    if let Some(notification) = state.notifier.current() {
        frame.render_widget(NotificationPopup { notification }, layout.board_area);
    }

    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(popup::SettingsPopup { state }, frame.area());
        }
        ActiveView::Help => {
            frame.render_widget(
                popup::HelpPopup {
                    config: &state.config,
                },
                frame.area(),
            );
        }
        ActiveView::Board => {}
    }
}
