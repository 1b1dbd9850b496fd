//! Piece glyphs.

use shakmaty::{Color, Piece, Role};

/// How pieces are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphStyle {
    /// Unicode chess figurines (needs a font that has them).
    #[default]
    Unicode,
    /// Plain FEN letters: uppercase white, lowercase black.
    Ascii,
}

impl GlyphStyle {
    pub fn label(self) -> &'static str {
        match self {
            GlyphStyle::Unicode => "Unicode",
            GlyphStyle::Ascii => "ASCII",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GlyphStyle::Unicode => GlyphStyle::Ascii,
            GlyphStyle::Ascii => GlyphStyle::Unicode,
        }
    }
}

/// Glyph for a piece in the given style.
pub fn glyph(piece: Piece, style: GlyphStyle) -> &'static str {
    match style {
        GlyphStyle::Unicode => match (piece.color, piece.role) {
            (Color::White, Role::King) => "♔",
            (Color::White, Role::Queen) => "♕",
            (Color::White, Role::Rook) => "♖",
            (Color::White, Role::Bishop) => "♗",
            (Color::White, Role::Knight) => "♘",
            (Color::White, Role::Pawn) => "♙",
            (Color::Black, Role::King) => "♚",
            (Color::Black, Role::Queen) => "♛",
            (Color::Black, Role::Rook) => "♜",
            (Color::Black, Role::Bishop) => "♝",
            (Color::Black, Role::Knight) => "♞",
            (Color::Black, Role::Pawn) => "♟",
        },
        GlyphStyle::Ascii => match (piece.color, piece.role) {
            (Color::White, Role::King) => "K",
            (Color::White, Role::Queen) => "Q",
            (Color::White, Role::Rook) => "R",
            (Color::White, Role::Bishop) => "B",
            (Color::White, Role::Knight) => "N",
            (Color::White, Role::Pawn) => "P",
            (Color::Black, Role::King) => "k",
            (Color::Black, Role::Queen) => "q",
            (Color::Black, Role::Rook) => "r",
            (Color::Black, Role::Bishop) => "b",
            (Color::Black, Role::Knight) => "n",
            (Color::Black, Role::Pawn) => "p",
        },
    }
}
