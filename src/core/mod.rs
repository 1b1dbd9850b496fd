//! Core logic: the rules-engine facade, board geometry and piece glyphs.
//!
//! Nothing in this module depends on any TUI or rendering crate.  All chess
//! knowledge is borrowed from `shakmaty`; this layer only adapts it to the
//! questions a clickable board needs answered.

pub mod board_geometry;
pub mod error;
pub mod game;
pub mod glyph;
