//! Square ↔ terminal-cell mapping.
//!
//! The board is drawn as an 8×8 grid of tiles, each `tile_w × tile_h` cells.
//! Everything that needs to know "where is e4 on screen" or "which square is
//! under the mouse" goes through [`BoardGeometry`].

use shakmaty::{File, Rank, Square};

/// Smallest / largest tile height we are willing to draw.
const MIN_TILE_H: u16 = 1;
const MAX_TILE_H: u16 = 5;

/// Columns reserved left of the board for rank labels.
pub const RANK_LABEL_W: u16 = 2;
/// Rows reserved below the board for file labels.
pub const FILE_LABEL_H: u16 = 1;

/// Placement of the board inside the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    /// Top-left cell of the a8 tile (h1 when flipped).
    pub origin_x: u16,
    pub origin_y: u16,
    pub tile_w: u16,
    pub tile_h: u16,
    /// `true` when black is drawn at the bottom.
    pub flipped: bool,
}

impl BoardGeometry {
    pub fn new(origin_x: u16, origin_y: u16, tile_w: u16, tile_h: u16, flipped: bool) -> Self {
        Self {
            origin_x,
            origin_y,
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            flipped,
        }
    }

    /// Largest board that fits in the given area, centred, with room for the
    /// rank/file labels.  Tiles are `2h + 1` wide so a terminal cell's 2:1
    /// aspect ratio still gives roughly square tiles with a true centre column.
    pub fn fit(x: u16, y: u16, width: u16, height: u16, flipped: bool) -> Self {
        let avail_w = width.saturating_sub(RANK_LABEL_W);
        let avail_h = height.saturating_sub(FILE_LABEL_H);

        let mut tile_h = MAX_TILE_H;
        while tile_h > MIN_TILE_H && (tile_h * 8 > avail_h || tile_w_for(tile_h) * 8 > avail_w) {
            tile_h -= 1;
        }
        let tile_w = tile_w_for(tile_h);

        let board_w = tile_w * 8 + RANK_LABEL_W;
        let board_h = tile_h * 8 + FILE_LABEL_H;
        let origin_x = x + width.saturating_sub(board_w) / 2 + RANK_LABEL_W;
        let origin_y = y + height.saturating_sub(board_h) / 2;

        Self::new(origin_x, origin_y, tile_w, tile_h, flipped)
    }

    /// Whether the tiles and their labels lie entirely inside the given area.
    /// A board that does not fit is not drawn, so it takes no clicks either.
    pub fn fits_within(&self, x: u16, y: u16, width: u16, height: u16) -> bool {
        let (x, y) = (u32::from(x), u32::from(y));
        let (ox, oy) = (u32::from(self.origin_x), u32::from(self.origin_y));
        ox >= x + u32::from(RANK_LABEL_W)
            && oy >= y
            && ox + u32::from(self.board_width()) <= x + u32::from(width)
            && oy + u32::from(self.board_height() + FILE_LABEL_H) <= y + u32::from(height)
    }

    pub fn board_width(&self) -> u16 {
        self.tile_w * 8
    }

    pub fn board_height(&self) -> u16 {
        self.tile_h * 8
    }

    /// Column / row (0..8, from the top-left tile) where `sq` is drawn.
    pub fn grid_pos(&self, sq: Square) -> (u16, u16) {
        let file = sq.file() as u16;
        let rank = sq.rank() as u16;
        if self.flipped {
            (7 - file, rank)
        } else {
            (file, 7 - rank)
        }
    }

    /// Top-left cell of the tile for `sq`.
    pub fn square_to_cell(&self, sq: Square) -> (u16, u16) {
        let (col, row) = self.grid_pos(sq);
        (
            self.origin_x + col * self.tile_w,
            self.origin_y + row * self.tile_h,
        )
    }

    /// Centre cell of the tile for `sq`, where the piece glyph is anchored.
    pub fn square_center(&self, sq: Square) -> (u16, u16) {
        let (x, y) = self.square_to_cell(sq);
        (x + self.tile_w / 2, y + self.tile_h / 2)
    }

    /// Square under a terminal cell, or `None` when the cell is off the board.
    pub fn cell_to_square(&self, x: u16, y: u16) -> Option<Square> {
        if x < self.origin_x || y < self.origin_y {
            return None;
        }
        let col = (x - self.origin_x) / self.tile_w;
        let row = (y - self.origin_y) / self.tile_h;
        if col > 7 || row > 7 {
            return None;
        }
        let (file, rank) = if self.flipped {
            (7 - col, row)
        } else {
            (col, 7 - row)
        };
        Some(Square::from_coords(
            File::new(u32::from(file)),
            Rank::new(u32::from(rank)),
        ))
    }

    /// Files in left-to-right drawing order.
    pub fn files(&self) -> [File; 8] {
        let mut files = File::ALL;
        if self.flipped {
            files.reverse();
        }
        files
    }

    /// Ranks in top-to-bottom drawing order.
    pub fn ranks(&self) -> [Rank; 8] {
        let mut ranks = Rank::ALL;
        if !self.flipped {
            ranks.reverse();
        }
        ranks
    }
}

fn tile_w_for(tile_h: u16) -> u16 {
    tile_h * 2 + 1
}
