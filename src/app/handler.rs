//! Input handling — maps key/mouse events to state mutations.
//!
//! A move is a two-click gesture: the first click picks up a piece of the
//! side to move, the second names the destination.  Everything about the
//! move itself is answered by [`Game`](crate::core::game::Game).

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use shakmaty::{Color, File, Piece, Rank, Role, Square};

use crate::config::Action;
use crate::core::game::{GameStatus, PlayedMove};

use super::animation::{MoveAnimation, Slide};
use super::notification::NotificationKind;
use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Board => handle_board_key(state, key, now),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                state.active_view = ActiveView::Board;
            }
        }
    }
}

// ── Board view (configurable bindings) ──────────────────────────

fn handle_board_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    let action = state.config.match_key(key);

    // An alert swallows the next key, like a modal dialog.
    if state.notifier.has_alert() && action != Some(Action::Quit) {
        state.notifier.dismiss();
        return;
    }

    let Some(action) = action else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::CursorUp => move_cursor(state, 0, 1),
        Action::CursorDown => move_cursor(state, 0, -1),
        Action::CursorLeft => move_cursor(state, -1, 0),
        Action::CursorRight => move_cursor(state, 1, 0),
        Action::ClickCursor => {
            let sq = state.cursor;
            click_square(state, sq, now);
        }
        Action::Deselect => state.clear_selection(),
        Action::Undo => undo(state, now),
        Action::NewGame => new_game(state),
        Action::FlipBoard => {
            state.flipped = !state.flipped;
            state.animation = None;
        }
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::ShowHelp => state.active_view = ActiveView::Help,
    }
}

/// Move the cursor in *screen* directions, so flipping the board keeps
/// "up" pointing up.
fn move_cursor(state: &mut AppState, dx: i32, dy: i32) {
    let (dx, dy) = if state.flipped { (-dx, -dy) } else { (dx, dy) };
    let file = (state.cursor.file() as i32 + dx).clamp(0, 7);
    let rank = (state.cursor.rank() as i32 + dy).clamp(0, 7);
    state.cursor = Square::from_coords(File::new(file as u32), Rank::new(rank as u32));
}

fn undo(state: &mut AppState, now: Instant) {
    state.animation = None;
    state.clear_selection();
    state.notifier.dismiss();
    match state.game.undo() {
        Some(played) => {
            state.refresh_pieces();
            state.cursor = played.from;
            state.status_message = Some(format!("Took back {}", played.san));
        }
        None => {
            state
                .notifier
                .show("Nothing to take back", NotificationKind::Info, now);
        }
    }
}

fn new_game(state: &mut AppState) {
    state.game.reset();
    state.animation = None;
    state.clear_selection();
    state.notifier.dismiss();
    state.refresh_pieces();
    state.status_message = Some("New game".into());
    tracing::info!(fen = %state.game.fen(), "new game");
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('s') => {
            state.active_view = ActiveView::Board;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => cycle(state),
                }
                persist_config(state);
            }
        }
        _ => {}
    }
}

/// Save the config; a failure is reported but never fatal.
fn persist_config(state: &mut AppState) {
    if let Err(e) = state.config.save() {
        tracing::warn!("failed to save config: {e:#}");
        state.status_message = Some(format!("Could not save settings: {e}"));
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.active_view != ActiveView::Board {
        return;
    }
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return;
    };

    if state.notifier.has_alert() {
        state.notifier.dismiss();
        return;
    }

    let Some(sq) = state
        .board_geometry()
        .and_then(|g| g.cell_to_square(mouse.column, mouse.row))
    else {
        return;
    };
    state.cursor = sq;
    click_square(state, sq, now);
}

// ── Tick ────────────────────────────────────────────────────────

/// Advance time-based state: finish animations, expire notifications.
pub fn handle_tick(state: &mut AppState, now: Instant) {
    if state
        .animation
        .as_ref()
        .is_some_and(|anim| anim.is_finished(now))
    {
        state.animation = None;
    }
    state.notifier.tick(now);
}

// ── The click gesture ───────────────────────────────────────────

/// One click on a board square.
pub fn click_square(state: &mut AppState, sq: Square, now: Instant) {
    // A click lands the piece that is still sliding.
    state.animation = None;

    if state.game.status().is_over() {
        if state.config.notify_invalid_moves {
            state.notifier.show(
                "The game is over — start a new one",
                NotificationKind::GameOver,
                now,
            );
        }
        return;
    }

    let selected = state.selected;
    match selected {
        None => {
            if state.game.is_own_piece(sq) {
                state.select(sq);
                tracing::debug!(%sq, targets = state.highlights.len(), "selected");
            }
        }
        Some(from) if from == sq => state.clear_selection(),
        Some(_) if state.game.is_own_piece(sq) => {
            state.select(sq);
            tracing::debug!(%sq, targets = state.highlights.len(), "selection switched");
        }
        Some(from) => {
            state.clear_selection();
            match state.game.try_move(from, sq) {
                Ok(played) => after_move(state, &played, now),
                Err(err) => {
                    tracing::debug!("move refused: {err}");
                    if state.config.notify_invalid_moves {
                        state
                            .notifier
                            .show(capitalise(&err.to_string()), NotificationKind::Invalid, now);
                    }
                }
            }
        }
    }
}

fn after_move(state: &mut AppState, played: &PlayedMove, now: Instant) {
    state.refresh_pieces();
    state.cursor = played.to;
    state.status_message = None;

    if state.config.animate_moves && state.config.animation_ms > 0 {
        let primary = Slide {
            piece: played.piece,
            from: played.from,
            to: played.to,
        };
        let secondary = played.rook.map(|(from, to)| Slide {
            piece: Piece {
                color: played.piece.color,
                role: Role::Rook,
            },
            from,
            to,
        });
        state.animation = Some(MoveAnimation::new(
            primary,
            secondary,
            now,
            Duration::from_millis(state.config.animation_ms),
        ));
    }

    announce(state, now);
}

/// Tell the players about check, mate and draws.
fn announce(state: &mut AppState, now: Instant) {
    match state.game.status() {
        GameStatus::Ongoing => {}
        GameStatus::Check => {
            if state.config.modal_alerts {
                state.notifier.alert("⚠ Check", NotificationKind::Check);
            } else {
                state.notifier.show("Check!", NotificationKind::Check, now);
            }
        }
        GameStatus::Checkmate { winner } => {
            tracing::info!(winner = color_name(winner), "checkmate");
            state.notifier.alert(
                format!("♚ Checkmate — {} wins ♚", color_name(winner)),
                NotificationKind::Checkmate,
            );
        }
        GameStatus::Stalemate => {
            tracing::info!("stalemate");
            state.notifier.alert("Stalemate — draw", NotificationKind::GameOver);
        }
        GameStatus::Draw => {
            tracing::info!("draw by insufficient material");
            state
                .notifier
                .alert("Draw — insufficient material", NotificationKind::GameOver);
        }
    }
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
