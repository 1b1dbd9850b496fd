//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::core::board_geometry::BoardGeometry;

/// Width of the turn / move-list panel.
pub const SIDE_PANEL_W: u16 = 28;
/// Below this board-pane width the side panel is dropped.
const MIN_BOARD_PANE_W: u16 = 30;

/// Primary screen layout: board pane, optional side panel, status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub board_area: Rect,
    pub panel_area: Option<Rect>,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, show_side_panel: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // board + panel
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let with_panel = show_side_panel && rows[0].width >= SIDE_PANEL_W + MIN_BOARD_PANE_W;
        let (board_area, panel_area) = if with_panel {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(MIN_BOARD_PANE_W), Constraint::Length(SIDE_PANEL_W)])
                .split(rows[0]);
            (cols[0], Some(cols[1]))
        } else {
            (rows[0], None)
        };

        Self {
            board_area,
            panel_area,
            status_area: rows[1],
        }
    }

    /// The bordered block drawn around the board.
    pub fn board_block<'a>() -> Block<'a> {
        Block::default().borders(Borders::ALL)
    }

    /// The board pane minus its border.
    pub fn board_inner(&self) -> Rect {
        Self::board_block().inner(self.board_area)
    }

    /// Board placement inside the board pane's border.
    pub fn board_geometry(&self, flipped: bool) -> BoardGeometry {
        let inner = self.board_inner();
        BoardGeometry::fit(inner.x, inner.y, inner.width, inner.height, flipped)
    }

    /// Placement of a board that is actually drawn, or `None` when the pane
    /// is too small for it.
    pub fn visible_board(&self, flipped: bool) -> Option<BoardGeometry> {
        let inner = self.board_inner();
        let geometry = self.board_geometry(flipped);
        geometry
            .fits_within(inner.x, inner.y, inner.width, inner.height)
            .then_some(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_panel_sits_right_of_the_board() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 100, 30), true);
        let panel = layout.panel_area.expect("wide terminal shows the panel");
        assert_eq!(panel.width, SIDE_PANEL_W);
        assert_eq!(panel.x, 100 - SIDE_PANEL_W);
        assert_eq!(layout.board_area.width, 100 - SIDE_PANEL_W);
        assert_eq!(layout.status_area, Rect::new(0, 29, 100, 1));
    }

    #[test]
    fn cramped_terminals_have_no_visible_board() {
        assert!(AppLayout::from_area(Rect::new(0, 0, 20, 8), false)
            .visible_board(false)
            .is_none());
        assert!(AppLayout::from_area(Rect::new(0, 0, 100, 30), true)
            .visible_board(false)
            .is_some());
    }

    #[test]
    fn panel_is_dropped_when_disabled_or_narrow() {
        assert!(AppLayout::from_area(Rect::new(0, 0, 100, 30), false).panel_area.is_none());
        assert!(AppLayout::from_area(Rect::new(0, 0, 50, 30), true).panel_area.is_none());
    }

    #[test]
    fn board_fits_inside_the_border() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 100, 30), true);
        let g = layout.board_geometry(false);
        let inner = AppLayout::board_block().inner(layout.board_area);
        assert!(g.origin_x >= inner.x && g.origin_y >= inner.y);
        assert!(g.origin_x + g.board_width() <= inner.x + inner.width);
        assert!(g.origin_y + g.board_height() <= inner.y + inner.height);
    }
}
