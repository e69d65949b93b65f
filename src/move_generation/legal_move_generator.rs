//! Full legal move generation pipeline.
//!
//! Refreshes the check/pin scratch data for the side to move, runs the
//! per-piece generators (already pin-constrained), then narrows the result
//! while in check: single check keeps king moves plus moves that block or
//! capture the checker, double check keeps king moves only.

use tracing::{debug, info};

use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{check_for_pins_and_checks, Check};
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::chess_move::Move;

type PieceMoveFn = fn(&GameState, Square, &mut Vec<Move>);

#[inline]
fn generator_for(kind: PieceKind) -> PieceMoveFn {
    match kind {
        PieceKind::Pawn => generate_pawn_moves,
        PieceKind::Knight => generate_knight_moves,
        PieceKind::Bishop => generate_bishop_moves,
        PieceKind::Rook => generate_rook_moves,
        PieceKind::Queen => generate_queen_moves,
        PieceKind::King => generate_king_moves,
    }
}

impl GameState {
    /// Every legal move for the side to move.
    ///
    /// Also refreshes `in_check`, `pins` and `checks`, and sets exactly one of
    /// `checkmate` / `stalemate` when no move exists (both cleared otherwise).
    /// Callers must match candidates by equality, not by position in the list.
    pub fn get_legal_moves(&mut self) -> Vec<Move> {
        let color = self.side_to_move;
        let info = check_for_pins_and_checks(self, color);
        let double_check = info.is_double_check();
        self.in_check = info.in_check;
        self.pins = info.pins;
        self.checks = info.checks;

        let king_square = self.king_location(color);
        let moves = if double_check {
            let mut moves = Vec::with_capacity(8);
            generate_king_moves(self, king_square, &mut moves);
            moves
        } else if let Some(&check) = self.checks.first() {
            let corridor = blocking_corridor(self, king_square, check);
            let mut moves = self.pseudo_legal_moves();
            moves.retain(|mv| {
                mv.piece_moved().kind == PieceKind::King
                    || corridor.contains(&mv.end())
                    || (mv.is_en_passant() && mv.en_passant_capture_square() == check.attacker)
            });
            moves
        } else {
            self.pseudo_legal_moves()
        };

        if moves.is_empty() {
            self.checkmate = self.in_check;
            self.stalemate = !self.in_check;
            if self.checkmate {
                info!(side = %color, ply = self.ply_count(), "checkmate");
            } else {
                info!(side = %color, ply = self.ply_count(), "stalemate");
            }
        } else {
            self.checkmate = false;
            self.stalemate = false;
        }

        debug!(
            side = %color,
            legal = moves.len(),
            checks = self.checks.len(),
            pins = self.pins.len(),
            "generated legal moves"
        );

        moves
    }

    /// Pin-constrained moves of every piece of the side to move.
    fn pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let square = Square::new(row, col);
                match self.piece_at(square) {
                    Some(piece) if piece.color == self.side_to_move => {
                        generator_for(piece.kind)(self, square, &mut moves);
                    }
                    _ => {}
                }
            }
        }
        moves
    }
}

/// Squares a non-king move may land on to answer a single check: those
/// strictly between king and checker plus the checker's own square. A knight
/// check cannot be blocked, so only its square counts.
fn blocking_corridor(game_state: &GameState, king_square: Square, check: Check) -> Vec<Square> {
    let is_knight = matches!(
        game_state.piece_at(check.attacker),
        Some(Piece {
            kind: PieceKind::Knight,
            ..
        })
    );
    if is_knight {
        return vec![check.attacker];
    }

    let mut corridor = Vec::with_capacity(7);
    for distance in 1..BOARD_SIZE {
        let Some(square) = king_square.step(check.direction, distance) else {
            break;
        };
        corridor.push(square);
        if square == check.attacker {
            break;
        }
    }
    corridor
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::moves::chess_move::Move;
    use crate::utils::fen_parser::parse_fen;

    fn notations(moves: &[Move]) -> Vec<String> {
        let mut out: Vec<String> = moves.iter().map(|m| m.chess_notation()).collect();
        out.sort();
        out
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let mut game = GameState::new_game();
        let moves = game.get_legal_moves();
        assert_eq!(moves.len(), 20);
        assert_eq!(
            moves
                .iter()
                .filter(|m| m.piece_moved().kind == PieceKind::Knight)
                .count(),
            4
        );
        assert!(!game.in_check());
        assert!(!game.is_checkmate());
        assert!(!game.is_stalemate());
    }

    #[test]
    fn pinned_rook_moves_only_along_the_pin() {
        // White king e1, white rook e2, black rook e8.
        let mut game = parse_fen("4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1").expect("FEN should parse");
        let moves = game.get_legal_moves();
        let rook_moves: Vec<Move> = moves
            .into_iter()
            .filter(|m| m.piece_moved().kind == PieceKind::Rook)
            .collect();

        assert_eq!(
            notations(&rook_moves),
            vec!["e2e3", "e2e4", "e2e5", "e2e6", "e2e7", "e2e8"]
        );
        assert_eq!(game.pins().len(), 1);
    }

    #[test]
    fn single_check_moves_block_capture_or_move_king() {
        // Black rook e8 checks e1: the queen blocks on e4 or takes on e8, the
        // bishop blocks on e3 and the knight on e2.
        let mut game =
            parse_fen("4r2k/8/8/8/Q7/8/8/2B1K1N1 w - - 0 1").expect("FEN should parse");
        let moves = game.get_legal_moves();
        assert!(game.in_check());
        assert_eq!(game.checks().len(), 1);

        let corridor: Vec<Square> = (0..7).map(|row| Square::new(row, 4)).collect();
        for mv in moves.iter().filter(|m| m.piece_moved().kind != PieceKind::King) {
            assert!(corridor.contains(&mv.end()), "{mv} does not answer the check");
        }
        assert_eq!(
            notations(&moves),
            vec!["a4e4", "a4e8", "c1e3", "e1d1", "e1d2", "e1f1", "e1f2", "g1e2"]
        );
    }

    #[test]
    fn knight_check_can_only_be_captured() {
        // Black knight f3 checks e1; the rook on f7 can take it, the bishop
        // on b5 could land on e2 but that does not block a knight.
        let mut game =
            parse_fen("7k/5R2/8/1B6/8/5n2/8/4K3 w - - 0 1").expect("FEN should parse");
        let moves = game.get_legal_moves();
        let others: Vec<Move> = moves
            .into_iter()
            .filter(|m| m.piece_moved().kind != PieceKind::King)
            .collect();
        assert_eq!(notations(&others), vec!["f7f3"]);
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let mut game =
            parse_fen("4r2k/8/8/8/8/5n2/8/R3K3 w - - 0 1").expect("FEN should parse");
        let moves = game.get_legal_moves();
        assert_eq!(game.checks().len(), 2);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.piece_moved().kind == PieceKind::King));
    }

    #[test]
    fn back_rank_mate_sets_checkmate() {
        let mut game = parse_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        let moves = game.get_legal_moves();
        assert!(moves.is_empty());
        assert!(game.in_check());
        assert!(game.is_checkmate());
        assert!(!game.is_stalemate());
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        let mut game = parse_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let moves = game.get_legal_moves();
        assert!(moves.is_empty());
        assert!(!game.in_check());
        assert!(game.is_stalemate());
        assert!(!game.is_checkmate());
    }

    #[test]
    fn en_passant_may_capture_a_checking_pawn() {
        // Black pawn d5 just double-stepped and checks the king on e4.
        let mut game = parse_fen("7k/8/8/3pP3/4K3/8/8/8 w - d6 0 1").expect("FEN should parse");
        let moves = game.get_legal_moves();
        assert!(game.in_check());
        assert!(moves
            .iter()
            .any(|m| m.is_en_passant() && m.chess_notation() == "e5d6"));
    }

    #[test]
    fn terminal_flags_clear_once_moves_exist_again() {
        let mut game = parse_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        game.get_legal_moves();
        assert!(game.is_stalemate());

        game.side_to_move = Color::White;
        assert!(!game.get_legal_moves().is_empty());
        assert!(!game.is_stalemate());
        assert!(!game.is_checkmate());
    }
}
