//! Single-ply move value.
//!
//! A `Move` captures the moved and captured pieces from the board at
//! construction time, so it can later be undone without consulting any other
//! history. Identity is the `(start, end)` square pair only: a move built by a
//! UI from two clicked squares equals the generator's move for the same squares.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_rules::promotion_row;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, Copy)]
pub struct Move {
    start: Square,
    end: Square,
    piece_moved: Piece,
    piece_captured: Option<Piece>,
    is_en_passant: bool,
    is_promotion: bool,
    // Filled in when the move is applied; not part of identity.
    promoted_to: Option<PieceKind>,
}

impl Move {
    /// Candidate move between two squares of the current position. `None` if
    /// `start` is empty.
    ///
    /// A pawn moving diagonally onto the en-passant target is built as an
    /// en-passant capture, and a pawn reaching its last rank is flagged as a
    /// promotion, so the candidate applies the same way as the generated move.
    pub fn new(start: Square, end: Square, game_state: &GameState) -> Option<Self> {
        let piece_moved = game_state.piece_at(start)?;
        let is_pawn = piece_moved.kind == PieceKind::Pawn;

        let is_en_passant = is_pawn
            && start.col != end.col
            && game_state.piece_at(end).is_none()
            && game_state.en_passant_target() == Some(end);
        if is_en_passant {
            return Some(Self::en_passant(start, end, piece_moved));
        }

        let is_promotion = is_pawn && end.row == promotion_row(piece_moved.color);
        Some(Self::on_board(start, end, piece_moved, game_state.board(), is_promotion))
    }

    pub(crate) fn on_board(
        start: Square,
        end: Square,
        piece_moved: Piece,
        board: &Board,
        is_promotion: bool,
    ) -> Self {
        Self {
            start,
            end,
            piece_moved,
            piece_captured: board[end.row as usize][end.col as usize],
            is_en_passant: false,
            is_promotion,
            promoted_to: None,
        }
    }

    /// The destination is empty; the captured pawn sits beside the start square.
    pub(crate) fn en_passant(start: Square, end: Square, piece_moved: Piece) -> Self {
        Self {
            start,
            end,
            piece_moved,
            piece_captured: Some(Piece::new(piece_moved.color.opposite(), PieceKind::Pawn)),
            is_en_passant: true,
            is_promotion: false,
            promoted_to: None,
        }
    }

    #[inline]
    pub(crate) fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promoted_to = Some(kind);
        self
    }

    #[inline]
    pub fn start(&self) -> Square {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Square {
        self.end
    }

    #[inline]
    pub fn piece_moved(&self) -> Piece {
        self.piece_moved
    }

    #[inline]
    pub fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.is_en_passant
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.is_promotion
    }

    /// Piece chosen for a promotion once the move has been applied.
    #[inline]
    pub fn promoted_to(&self) -> Option<PieceKind> {
        self.promoted_to
    }

    #[inline]
    pub fn is_two_square_pawn_advance(&self) -> bool {
        self.piece_moved.kind == PieceKind::Pawn && (self.start.row - self.end.row).abs() == 2
    }

    /// Square of the pawn removed by an en-passant capture.
    #[inline]
    pub fn en_passant_capture_square(&self) -> Square {
        Square::new(self.start.row, self.end.col)
    }

    /// Canonical identity: `start_row*1000 + start_col*100 + end_row*10 + end_col`.
    #[inline]
    pub fn move_id(&self) -> u16 {
        self.start.row as u16 * 1000
            + self.start.col as u16 * 100
            + self.end.row as u16 * 10
            + self.end.col as u16
    }

    /// Long algebraic notation, e.g. `e2e4` or `e7e8q` after promotion.
    pub fn chess_notation(&self) -> String {
        let mut out = square_to_algebraic(self.start);
        out.push_str(&square_to_algebraic(self.end));
        if let Some(kind) = self.promoted_to {
            out.push(kind.code().to_ascii_lowercase());
        }
        out
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.move_id() == other.move_id()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.move_id().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chess_notation())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn move_captures_pieces_from_board() {
        let game = GameState::new_game();
        let mv = Move::new(Square::new(6, 4), Square::new(4, 4), &game).expect("e2 has a pawn");

        assert_eq!(mv.piece_moved(), Piece::new(Color::White, PieceKind::Pawn));
        assert_eq!(mv.piece_captured(), None);
        assert!(mv.is_two_square_pawn_advance());
        assert_eq!(mv.chess_notation(), "e2e4");
        assert_eq!(mv.move_id(), 6444);
    }

    #[test]
    fn move_from_empty_square_is_none() {
        let game = GameState::new_game();
        assert!(Move::new(Square::new(4, 4), Square::new(3, 4), &game).is_none());
    }

    #[test]
    fn square_pair_picks_up_en_passant_and_promotion_flags() {
        let ep_game = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let ep = Move::new(Square::new(3, 4), Square::new(2, 3), &ep_game).expect("e5 has a pawn");
        assert!(ep.is_en_passant());
        assert_eq!(ep.piece_captured(), Some(Piece::new(Color::Black, PieceKind::Pawn)));

        let promo_game = parse_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let promo = Move::new(Square::new(1, 0), Square::new(0, 0), &promo_game).expect("a7 has a pawn");
        assert!(promo.is_promotion());
        assert!(!promo.is_en_passant());
    }

    #[test]
    fn equality_ignores_flags_and_pieces() {
        let game = GameState::new_game();
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let ep = Move::en_passant(Square::new(3, 4), Square::new(2, 3), pawn);
        let quiet = Move::on_board(Square::new(3, 4), Square::new(2, 3), pawn, game.board(), false);
        assert_eq!(ep, quiet);
        assert_eq!(ep.piece_captured(), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(ep.en_passant_capture_square(), Square::new(3, 3));

        let set: HashSet<Move> = [ep, quiet].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn notation_includes_applied_promotion() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let board: Board = [[None; 8]; 8];
        let mv = Move::on_board(Square::new(1, 0), Square::new(0, 0), pawn, &board, true)
            .with_promotion(PieceKind::Knight);
        assert_eq!(mv.to_string(), "a7a8n");
    }
}
