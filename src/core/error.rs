//! Domain errors surfaced by the rules-engine facade.

use shakmaty::Square;
use thiserror::Error;

/// Why a move attempt was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on {0}")]
    NoPiece(Square),

    #[error("not your turn — the piece on {0} belongs to the other side")]
    NotYourTurn(Square),

    #[error("invalid move: {from} → {to}")]
    Illegal { from: Square, to: Square },

    #[error("the game is over")]
    GameOver,
}

/// Problems building a starting position.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("could not parse FEN: {0}")]
    Parse(String),

    #[error("illegal position: {0}")]
    Position(String),
}
