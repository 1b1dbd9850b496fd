//! Custom Ratatui widget that draws the chessboard: tiles, highlights,
//! pieces, the sliding piece of an in-flight move, and coordinate labels.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Widget},
};
use shakmaty::Square;

use crate::app::state::AppState;
use crate::core::board_geometry::{BoardGeometry, FILE_LABEL_H, RANK_LABEL_W};
use crate::core::glyph::glyph;

use super::theme::Theme;

/// The board widget, created fresh each frame.
pub struct BoardWidget<'a> {
    state: &'a AppState,
    geometry: BoardGeometry,
    now: Instant,
    block: Option<Block<'a>>,
}

impl<'a> BoardWidget<'a> {
    pub fn new(state: &'a AppState, geometry: BoardGeometry, now: Instant) -> Self {
        Self {
            state,
            geometry,
            now,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn tile_bg(&self, sq: Square) -> ratatui::style::Color {
        let light = sq.is_light();
        let state = self.state;
        if state.game.checked_king() == Some(sq) {
            return Theme::check_bg();
        }
        if state.selected == Some(sq) {
            return Theme::selected_bg(light);
        }
        if state.is_highlighted(sq) && state.pieces.contains_key(&sq) {
            return Theme::capture_bg(light);
        }
        if state
            .game
            .last_move()
            .is_some_and(|m| m.from == sq || m.to == sq)
        {
            return Theme::last_move_bg(light);
        }
        Theme::square_bg(light)
    }

    fn render_tile(&self, sq: Square, buf: &mut Buffer) {
        let g = &self.geometry;
        let (x, y) = g.square_to_cell(sq);
        let bg = self.tile_bg(sq);
        buf.set_style(Rect::new(x, y, g.tile_w, g.tile_h), Style::default().bg(bg));

        let (cx, cy) = g.square_center(sq);
        let hidden = self
            .state
            .animation
            .as_ref()
            .is_some_and(|anim| anim.hides(sq));

        match self.state.pieces.get(&sq) {
            Some(&piece) if !hidden => {
                let style = Style::default()
                    .fg(Theme::piece_fg(piece.color))
                    .add_modifier(Modifier::BOLD);
                put(buf, cx, cy, glyph(piece, self.state.config.glyph_style), style);
            }
            None if self.state.is_highlighted(sq) => {
                put(buf, cx, cy, "•", Theme::target_marker_style());
            }
            _ => {}
        }

        if self.state.cursor == sq && g.tile_w >= 3 {
            put(buf, x, cy, "[", Theme::cursor_style());
            put(buf, x + g.tile_w - 1, cy, "]", Theme::cursor_style());
        }
    }

    fn render_labels(&self, buf: &mut Buffer) {
        let g = &self.geometry;
        for (row, rank) in g.ranks().into_iter().enumerate() {
            let y = g.origin_y + row as u16 * g.tile_h + g.tile_h / 2;
            let label = rank.char().to_string();
            put(buf, g.origin_x.saturating_sub(RANK_LABEL_W), y, &label, Theme::label_style());
        }
        let y = g.origin_y + g.board_height() + FILE_LABEL_H - 1;
        for (col, file) in g.files().into_iter().enumerate() {
            let x = g.origin_x + col as u16 * g.tile_w + g.tile_w / 2;
            let label = file.char().to_string();
            put(buf, x, y, &label, Theme::label_style());
        }
    }

    fn render_animation(&self, buf: &mut Buffer) {
        let Some(anim) = self.state.animation.as_ref() else {
            return;
        };
        let t = anim.progress(self.now);
        for slide in anim.slides() {
            let (x, y) = slide.position(&self.geometry, t);
            // Keep whatever tile colour is underneath; only the glyph moves.
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(glyph(slide.piece, self.state.config.glyph_style));
                cell.set_fg(Theme::piece_fg(slide.piece.color));
                cell.modifier.insert(Modifier::BOLD);
            }
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        let g = &self.geometry;
        if !g.fits_within(inner.x, inner.y, inner.width, inner.height) {
            put(buf, inner.x, inner.y, "Terminal too small for the board", Theme::label_style());
            return;
        }

        for sq in (0..64u32).map(Square::new) {
            self.render_tile(sq, buf);
        }
        self.render_labels(buf);
        self.render_animation(buf);
    }
}

/// Write `s` at `(x, y)` when the cell is inside the buffer.
fn put(buf: &mut Buffer, x: u16, y: u16, s: &str, style: Style) {
    if buf.area.contains(Position { x, y }) {
        buf.set_string(x, y, s, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::animation::{MoveAnimation, Slide};
    use crate::config::AppConfig;
    use crate::core::game::Game;
    use crate::core::glyph::GlyphStyle;
    use shakmaty::{Color, Piece, Role};
    use std::time::Duration;

    fn ascii_state() -> AppState {
        let mut config = AppConfig::default();
        config.glyph_style = GlyphStyle::Ascii;
        AppState::new(Game::new(), config)
    }

    fn render(state: &AppState, now: Instant) -> (Buffer, BoardGeometry) {
        let area = Rect::new(0, 0, 40, 20);
        let geometry = BoardGeometry::fit(area.x, area.y, area.width, area.height, state.flipped);
        let mut buf = Buffer::empty(area);
        BoardWidget::new(state, geometry, now).render(area, &mut buf);
        (buf, geometry)
    }

    fn symbol_at(buf: &Buffer, (x, y): (u16, u16)) -> String {
        buf[(x, y)].symbol().to_string()
    }

    #[test]
    fn starting_position_is_drawn_at_tile_centres() {
        let state = ascii_state();
        let (buf, g) = render(&state, Instant::now());
        assert_eq!(symbol_at(&buf, g.square_center(Square::E1)), "K");
        assert_eq!(symbol_at(&buf, g.square_center(Square::D8)), "q");
        assert_eq!(symbol_at(&buf, g.square_center(Square::E4)), " ");
        assert_eq!(buf[g.square_to_cell(Square::A1)].bg, Theme::square_bg(false));
        assert_eq!(buf[g.square_to_cell(Square::H1)].bg, Theme::square_bg(true));
    }

    #[test]
    fn selection_and_targets_are_marked() {
        let mut state = ascii_state();
        state.select(Square::E2);
        let (buf, g) = render(&state, Instant::now());
        assert_eq!(buf[g.square_to_cell(Square::E2)].bg, Theme::selected_bg(true));
        assert_eq!(symbol_at(&buf, g.square_center(Square::E3)), "•");
        assert_eq!(symbol_at(&buf, g.square_center(Square::E4)), "•");
        assert_eq!(symbol_at(&buf, g.square_center(Square::E5)), " ");
    }

    #[test]
    fn flipped_board_swaps_labels() {
        let mut state = ascii_state();
        state.flipped = true;
        let (buf, g) = render(&state, Instant::now());
        let first_file_x = g.origin_x + g.tile_w / 2;
        let label_y = g.origin_y + g.board_height();
        assert_eq!(symbol_at(&buf, (first_file_x, label_y)), "h");
        assert_eq!(symbol_at(&buf, g.square_center(Square::E1)), "K");
    }

    #[test]
    fn sliding_piece_is_drawn_between_squares() {
        let mut state = ascii_state();
        state.game.try_move(Square::E2, Square::E4).unwrap();
        state.refresh_pieces();
        let t0 = Instant::now();
        state.animation = Some(MoveAnimation::new(
            Slide {
                piece: Piece {
                    color: Color::White,
                    role: Role::Pawn,
                },
                from: Square::E2,
                to: Square::E4,
            },
            None,
            t0,
            Duration::from_millis(250),
        ));

        let (buf, g) = render(&state, t0);
        // At t = 0 the pawn is still on e2 and e4 looks empty.
        assert_eq!(symbol_at(&buf, g.square_center(Square::E2)), "P");
        assert_eq!(symbol_at(&buf, g.square_center(Square::E4)), " ");

        let (buf, g) = render(&state, t0 + Duration::from_secs(1));
        assert_eq!(symbol_at(&buf, g.square_center(Square::E4)), "P");
    }

    #[test]
    fn tiny_areas_show_a_hint_instead_of_panicking() {
        let state = ascii_state();
        let area = Rect::new(0, 0, 10, 4);
        let geometry = BoardGeometry::fit(area.x, area.y, area.width, area.height, false);
        let mut buf = Buffer::empty(area);
        BoardWidget::new(&state, geometry, Instant::now()).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "T");
    }
}
