//! Rules-engine facade.
//!
//! [`Game`] owns the `shakmaty` position and answers every question the board
//! asks: whose turn it is, what stands on a square, where a piece may go,
//! whether the king is in check.  It never decides legality itself; moves
//! are always looked up in the engine's legal move list.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, CastlingSide, Chess, Color, File, Move, Piece, Position, Role, Square};

use super::error::{MoveError, SetupError};

// ───────────────────────────────────────── played moves ──────

/// What a successful move did, enough for the UI to animate and log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub from: Square,
    /// Destination as the user clicked it (the king's square for castling).
    pub to: Square,
    /// Piece that moved, before any promotion.
    pub piece: Piece,
    pub captured: Option<Role>,
    pub promotion: Option<Role>,
    /// Rook hop for castling, `(from, to)`.
    pub rook: Option<(Square, Square)>,
    /// Standard algebraic notation including `+` / `#`.
    pub san: String,
}

/// Overall state of the game after the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
    /// Insufficient material.
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate { .. } | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}

/// One numbered line of the move list: `12. Nf3 Nc6`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePair<'a> {
    pub number: u32,
    pub white: Option<&'a str>,
    pub black: Option<&'a str>,
}

// ───────────────────────────────────────── game ──────────────

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    position: Chess,
    start: Chess,
    /// Position before each played move (for undo).
    previous: Vec<Chess>,
    moves: Vec<PlayedMove>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position.
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    /// Start from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let fen: Fen = fen
            .trim()
            .parse()
            .map_err(|e| SetupError::Parse(format!("{e}")))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| SetupError::Position(format!("{e}")))?;
        Ok(Self::from_position(position))
    }

    fn from_position(position: Chess) -> Self {
        Self {
            start: position.clone(),
            position,
            previous: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// Back to the starting position this game was created with.
    pub fn reset(&mut self) {
        self.position = self.start.clone();
        self.previous.clear();
        self.moves.clear();
    }

    // ── queries ─────────────────────────────────────────────────

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.position.board().piece_at(sq)
    }

    /// Every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.position
            .board()
            .occupied()
            .into_iter()
            .filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Is there a piece of the side to move on `sq`?
    pub fn is_own_piece(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some_and(|p| p.color == self.turn())
    }

    /// Destination squares of all legal moves starting on `from`.
    /// Castling is reported as the king's destination; promotions collapse
    /// into a single target.
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = self
            .position
            .legal_moves()
            .iter()
            .filter_map(|m| match user_squares(m) {
                Some((f, t)) if f == from => Some(t),
                _ => None,
            })
            .collect();
        targets.sort_unstable();
        targets.dedup();
        targets
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    /// Drawn by stalemate or insufficient material.
    pub fn is_draw(&self) -> bool {
        self.position.is_stalemate() || self.position.is_insufficient_material()
    }

    pub fn status(&self) -> GameStatus {
        if self.is_checkmate() {
            GameStatus::Checkmate {
                winner: !self.position.turn(),
            }
        } else if self.is_stalemate() {
            GameStatus::Stalemate
        } else if self.is_draw() {
            GameStatus::Draw
        } else if self.is_check() {
            GameStatus::Check
        } else {
            GameStatus::Ongoing
        }
    }

    /// Square of the side-to-move's king when it is in check.
    pub fn checked_king(&self) -> Option<Square> {
        if !self.is_check() {
            return None;
        }
        self.position.board().king_of(self.position.turn())
    }

    /// SAN of every move played so far.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(|m| m.san.as_str())
    }

    pub fn moves(&self) -> &[PlayedMove] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.moves.last()
    }

    /// Move history grouped into numbered full moves.  A game started from a
    /// position with black to move opens with a white-less pair.
    pub fn move_pairs(&self) -> Vec<MovePair<'_>> {
        let mut pairs = Vec::new();
        let mut number = self.start.fullmoves().get();
        let mut sans = self.history();

        if self.start.turn() == Color::Black {
            if let Some(black) = sans.next() {
                pairs.push(MovePair {
                    number,
                    white: None,
                    black: Some(black),
                });
                number += 1;
            }
        }
        while let Some(white) = sans.next() {
            pairs.push(MovePair {
                number,
                white: Some(white),
                black: sans.next(),
            });
            number += 1;
        }
        pairs
    }

    /// Current position as FEN.
    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, shakmaty::EnPassantMode::Legal).to_string()
    }

    // ── mutation ────────────────────────────────────────────────

    /// Play `from → to`, promoting to a queen when a pawn reaches the last rank.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<PlayedMove, MoveError> {
        if self.status().is_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color != self.turn() {
            return Err(MoveError::NotYourTurn(from));
        }

        let legal = self.position.legal_moves();
        let mut candidates = legal
            .iter()
            .filter(|m| user_squares(m) == Some((from, to)));
        // Promotions come in four flavours; take the queen.
        let chosen = candidates
            .clone()
            .find(|m| m.promotion() == Some(Role::Queen))
            .or_else(|| candidates.next())
            .cloned()
            .ok_or(MoveError::Illegal { from, to })?;

        let captured = chosen.capture();
        let promotion = chosen.promotion();
        let rook = rook_hop(&chosen);

        let before = self.position.clone();
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, chosen);
        self.previous.push(before);

        let played = PlayedMove {
            from,
            to,
            piece,
            captured,
            promotion,
            rook,
            san: san.to_string(),
        };
        tracing::debug!(san = %played.san, %from, %to, "move played");
        self.moves.push(played.clone());
        Ok(played)
    }

    /// Take back the last half-move.  Returns it, or `None` at the start.
    pub fn undo(&mut self) -> Option<PlayedMove> {
        let previous = self.previous.pop()?;
        self.position = previous;
        self.moves.pop()
    }
}

// ───────────────────────────────────────── helpers ───────────

/// The `(from, to)` pair a user clicks for this move.  Standard UCI already
/// encodes castling as the king's two-square hop.
fn user_squares(m: &Move) -> Option<(Square, Square)> {
    match m.to_uci(CastlingMode::Standard) {
        UciMove::Normal { from, to, .. } => Some((from, to)),
        _ => None,
    }
}

fn rook_hop(m: &Move) -> Option<(Square, Square)> {
    let &Move::Castle { king, rook } = m else {
        return None;
    };
    let side = if rook.file() > king.file() {
        CastlingSide::KingSide
    } else {
        CastlingSide::QueenSide
    };
    let rook_to_file = match side {
        CastlingSide::KingSide => File::F,
        CastlingSide::QueenSide => File::D,
    };
    Some((rook, Square::from_coords(rook_to_file, rook.rank())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, moves: &[(Square, Square)]) {
        for &(from, to) in moves {
            game.try_move(from, to).expect("legal move");
        }
    }

    #[test]
    fn opening_pawn_has_two_targets() {
        let game = Game::new();
        assert_eq!(game.legal_targets(Square::E2), vec![Square::E3, Square::E4]);
        assert_eq!(game.legal_targets(Square::G1), vec![Square::F3, Square::H3]);
        assert!(game.legal_targets(Square::E1).is_empty());
        assert!(game.legal_targets(Square::E4).is_empty());
    }

    #[test]
    fn moves_alternate_turns_and_record_san() {
        let mut game = Game::new();
        assert_eq!(game.turn(), Color::White);
        let played = game.try_move(Square::E2, Square::E4).unwrap();
        assert_eq!(played.san, "e4");
        assert_eq!(game.turn(), Color::Black);
        game.try_move(Square::E7, Square::E5).unwrap();
        game.try_move(Square::G1, Square::F3).unwrap();
        assert_eq!(game.history().collect::<Vec<_>>(), vec!["e4", "e5", "Nf3"]);
    }

    #[test]
    fn refuses_illegal_and_out_of_turn_moves() {
        let mut game = Game::new();
        assert_eq!(
            game.try_move(Square::E2, Square::E5),
            Err(MoveError::Illegal {
                from: Square::E2,
                to: Square::E5
            })
        );
        assert_eq!(
            game.try_move(Square::E7, Square::E5),
            Err(MoveError::NotYourTurn(Square::E7))
        );
        assert_eq!(
            game.try_move(Square::E4, Square::E5),
            Err(MoveError::NoPiece(Square::E4))
        );
        assert_eq!(game.moves().len(), 0);
    }

    #[test]
    fn scholars_mate_is_checkmate() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                (Square::E2, Square::E4),
                (Square::E7, Square::E5),
                (Square::F1, Square::C4),
                (Square::B8, Square::C6),
                (Square::D1, Square::H5),
                (Square::G8, Square::F6),
            ],
        );
        let mate = game.try_move(Square::H5, Square::F7).unwrap();
        assert_eq!(mate.san, "Qxf7#");
        assert_eq!(mate.captured, Some(Role::Pawn));
        assert!(game.is_checkmate());
        assert!(game.is_check());
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
        assert_eq!(game.checked_king(), Some(Square::E8));
        assert_eq!(
            game.try_move(Square::E8, Square::F7),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn check_is_reported_without_mate() {
        let mut game = Game::new();
        play(&mut game, &[(Square::E2, Square::E4), (Square::F7, Square::F5)]);
        let played = game.try_move(Square::D1, Square::H5).unwrap();
        assert_eq!(played.san, "Qh5+");
        assert!(game.is_check());
        assert!(!game.is_checkmate());
        assert_eq!(game.status(), GameStatus::Check);
        assert_eq!(game.checked_king(), Some(Square::E8));
        // g6 blocks; a pawn that cannot block has no moves.
        assert!(game.legal_targets(Square::G7).contains(&Square::G6));
        assert!(game.legal_targets(Square::A7).is_empty());
    }

    #[test]
    fn castling_targets_the_king_square_and_moves_the_rook() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let targets = game.legal_targets(Square::E1);
        assert!(targets.contains(&Square::G1));
        assert!(targets.contains(&Square::C1));

        let played = game.try_move(Square::E1, Square::G1).unwrap();
        assert_eq!(played.san, "O-O");
        assert_eq!(played.rook, Some((Square::H1, Square::F1)));
        assert_eq!(game.piece_at(Square::G1).map(|p| p.role), Some(Role::King));
        assert_eq!(game.piece_at(Square::F1).map(|p| p.role), Some(Role::Rook));

        let played = game.try_move(Square::E8, Square::C8).unwrap();
        assert_eq!(played.rook, Some((Square::A8, Square::D8)));
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mut game = Game::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(game.legal_targets(Square::A7), vec![Square::A8]);
        let played = game.try_move(Square::A7, Square::A8).unwrap();
        assert_eq!(played.promotion, Some(Role::Queen));
        assert_eq!(
            game.piece_at(Square::A8),
            Some(Piece {
                color: Color::White,
                role: Role::Queen
            })
        );
        assert!(played.san.starts_with("a8=Q"));
    }

    #[test]
    fn en_passant_captures_beside_the_destination() {
        let mut game = Game::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(game.legal_targets(Square::E5), vec![Square::D6, Square::E6]);
        let played = game.try_move(Square::E5, Square::D6).unwrap();
        assert_eq!(played.captured, Some(Role::Pawn));
        assert_eq!(played.san, "exd6");
        assert!(game.piece_at(Square::D5).is_none());
        assert_eq!(game.piece_at(Square::D6).map(|p| p.role), Some(Role::Pawn));
    }

    #[test]
    fn undo_restores_the_previous_position() {
        let mut game = Game::new();
        game.try_move(Square::E2, Square::E4).unwrap();
        let undone = game.undo().unwrap();
        assert_eq!(undone.san, "e4");
        assert_eq!(game.turn(), Color::White);
        assert!(game.piece_at(Square::E4).is_none());
        assert!(game.piece_at(Square::E2).is_some());
        assert!(game.undo().is_none());
    }

    #[test]
    fn stalemate_and_bare_kings_are_draws() {
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.is_stalemate());
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert!(game.status().is_over());

        let game = Game::from_fen("7k/8/6K1/8/8/8/8/8 w - - 0 1").unwrap();
        assert!(game.is_draw());
        assert_eq!(game.status(), GameStatus::Draw);
    }

    #[test]
    fn move_pairs_number_full_moves() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                (Square::E2, Square::E4),
                (Square::E7, Square::E5),
                (Square::G1, Square::F3),
            ],
        );
        let pairs = game.move_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], MovePair { number: 1, white: Some("e4"), black: Some("e5") });
        assert_eq!(pairs[1], MovePair { number: 2, white: Some("Nf3"), black: None });
    }

    #[test]
    fn move_pairs_start_with_black_from_fen() {
        let mut game =
            Game::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
        game.try_move(Square::E7, Square::E5).unwrap();
        game.try_move(Square::G1, Square::F3).unwrap();
        let pairs = game.move_pairs();
        assert_eq!(pairs[0], MovePair { number: 1, white: None, black: Some("e5") });
        assert_eq!(pairs[1], MovePair { number: 2, white: Some("Nf3"), black: None });
    }

    #[test]
    fn bad_fen_is_rejected() {
        assert!(matches!(Game::from_fen("not a fen"), Err(SetupError::Parse(_))));
        // Two white kings.
        assert!(matches!(
            Game::from_fen("K6K/8/8/8/8/8/8/7k w - - 0 1"),
            Err(SetupError::Position(_))
        ));
    }

    #[test]
    fn reset_returns_to_the_start() {
        let mut game = Game::new();
        game.try_move(Square::D2, Square::D4).unwrap();
        game.reset();
        assert_eq!(game.moves().len(), 0);
        assert_eq!(game.fen(), Game::new().fen());
    }
}
