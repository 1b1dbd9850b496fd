//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::collections::HashMap;
use std::time::Duration;

use ratatui::layout::Rect;
use shakmaty::{Piece, Square};

use crate::config::AppConfig;
use crate::core::board_geometry::BoardGeometry;
use crate::core::game::Game;
use crate::ui::layout::AppLayout;

use super::animation::MoveAnimation;
use super::notification::Notifier;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Board,
    SettingsMenu,
    Help,
}

/// Top-level application state.
pub struct AppState {
    /// The rules engine's game.  Owns every piece of chess state.
    pub game: Game,
    /// Pieces as currently displayed, rebuilt after every change to `game`.
    pub pieces: HashMap<Square, Piece>,
    /// Origin square of a move in progress.
    pub selected: Option<Square>,
    /// Legal destinations of the selected piece.
    pub highlights: Vec<Square>,
    /// Keyboard cursor.
    pub cursor: Square,
    /// Black at the bottom.
    pub flipped: bool,
    pub animation: Option<MoveAnimation>,
    pub notifier: Notifier,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    pub config: AppConfig,
    /// Last known terminal size, for mapping mouse clicks.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(game: Game, config: AppConfig) -> Self {
        let notifier = Notifier::new(Duration::from_millis(config.notification_ms));
        let mut state = Self {
            game,
            pieces: HashMap::new(),
            selected: None,
            highlights: Vec::new(),
            cursor: Square::E2,
            flipped: false,
            animation: None,
            notifier,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
            config,
            terminal_area: Rect::default(),
            should_quit: false,
        };
        state.refresh_pieces();
        state
    }

    /// Throw away every displayed piece and recreate them from the game.
    pub fn refresh_pieces(&mut self) {
        self.pieces.clear();
        self.pieces.extend(self.game.pieces());
    }

    /// Select `sq` and, when enabled, highlight where it can go.
    pub fn select(&mut self, sq: Square) {
        self.selected = Some(sq);
        self.clear_highlights();
        if self.config.show_legal_moves {
            self.highlights = self.game.legal_targets(sq);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.clear_highlights();
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    pub fn is_highlighted(&self, sq: Square) -> bool {
        self.highlights.contains(&sq)
    }

    /// Where the board sits on screen right now; `None` while the terminal
    /// is too small to draw it.
    pub fn board_geometry(&self) -> Option<BoardGeometry> {
        AppLayout::from_area(self.terminal_area, self.config.show_side_panel)
            .visible_board(self.flipped)
    }

    /// Notification delay follows the config.
    pub fn sync_notification_duration(&mut self) {
        self.notifier
            .set_duration(Duration::from_millis(self.config.notification_ms));
    }
}
