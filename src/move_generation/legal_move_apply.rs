//! In-place move application and reversal.
//!
//! `make_move` mutates the board and pushes onto the move log; `undo_move`
//! pops and restores the exact previous position, including en-passant
//! captured-pawn placement, the en-passant target, and the cached king square.

use tracing::{debug, trace, warn};

use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

impl GameState {
    /// Applies `mv` for the side to move.
    ///
    /// `mv` is expected to come from `get_legal_moves`, or from `Move::new` on
    /// the current position and equal to a member of it; nothing is validated
    /// here. `promotion` is only read for promotion
    /// moves; when it is missing there, a queen is used.
    pub fn make_move(&mut self, mv: &Move, promotion: Option<PromotionPiece>) {
        let mover = mv.piece_moved();

        self.undo_stack.push(UndoState {
            prev_en_passant_target: self.en_passant_target,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
        });

        let mut logged = *mv;
        let placed = if mv.is_promotion() {
            let kind = match promotion {
                Some(piece) => piece.kind(),
                None => {
                    warn!(mv = %mv, "promotion applied without a choice, using queen");
                    PieceKind::Queen
                }
            };
            logged = logged.with_promotion(kind);
            Piece::new(mover.color, kind)
        } else {
            mover
        };

        self.set_piece(mv.start(), None);
        self.set_piece(mv.end(), Some(placed));
        if mv.is_en_passant() {
            self.set_piece(mv.en_passant_capture_square(), None);
        }

        if mover.kind == PieceKind::King {
            self.king_locations[mover.color.index()] = mv.end();
        }

        self.en_passant_target = if mv.is_two_square_pawn_advance() {
            Some(Square::new((mv.start().row + mv.end().row) / 2, mv.start().col))
        } else {
            None
        };

        if mover.kind == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if mover.color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.move_log.push(logged);
        self.side_to_move = self.side_to_move.opposite();

        trace!(mv = %logged, ply = self.move_log.len(), "made move");
    }

    /// Reverts the last move. Does nothing when no move has been made.
    pub fn undo_move(&mut self) {
        let Some(mv) = self.move_log.pop() else {
            debug!("undo requested with an empty move log");
            return;
        };
        let mover = mv.piece_moved();

        self.set_piece(mv.start(), Some(mover));
        if mv.is_en_passant() {
            self.set_piece(mv.end(), None);
            self.set_piece(mv.en_passant_capture_square(), mv.piece_captured());
        } else {
            self.set_piece(mv.end(), mv.piece_captured());
        }

        if mover.kind == PieceKind::King {
            self.king_locations[mover.color.index()] = mv.start();
        }

        if let Some(undo) = self.undo_stack.pop() {
            self.en_passant_target = undo.prev_en_passant_target;
            self.halfmove_clock = undo.prev_halfmove_clock;
            self.fullmove_number = undo.prev_fullmove_number;
        }

        self.side_to_move = self.side_to_move.opposite();
        // The restored position had at least the undone move available.
        self.checkmate = false;
        self.stalemate = false;

        trace!(mv = %mv, ply = self.move_log.len(), "undid move");
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::moves::chess_move::Move;
    use crate::utils::fen_parser::parse_fen;

    fn find(game: &mut GameState, notation: &str) -> Move {
        game.get_legal_moves()
            .into_iter()
            .find(|m| m.chess_notation() == notation)
            .unwrap_or_else(|| panic!("{notation} should be legal"))
    }

    #[test]
    fn make_move_updates_board_turn_and_log() {
        let mut game = GameState::new_game();
        let mv = find(&mut game, "e2e4");
        game.make_move(&mv, None);

        assert_eq!(game.piece_at(Square::new(6, 4)), None);
        assert_eq!(
            game.piece_at(Square::new(4, 4)),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.en_passant_target(), Some(Square::new(5, 4)));
        assert_eq!(game.move_log().len(), 1);
        assert_eq!(game.get_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - e3 0 1");
    }

    #[test]
    fn en_passant_target_lasts_one_ply() {
        let mut game = GameState::new_game();
        for notation in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            let mv = find(&mut game, notation);
            game.make_move(&mv, None);
        }
        assert!(game.get_legal_moves().iter().any(|m| m.is_en_passant()));

        let quiet = find(&mut game, "h2h3");
        game.make_move(&quiet, None);
        let reply = find(&mut game, "h7h6");
        game.make_move(&reply, None);

        assert_eq!(game.en_passant_target(), None);
        assert!(game.get_legal_moves().iter().all(|m| !m.is_en_passant()));
    }

    #[test]
    fn en_passant_capture_and_undo_restore_the_passed_pawn() {
        let mut game = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let before = *game.board();

        let mv = find(&mut game, "e5d6");
        assert!(mv.is_en_passant());
        game.make_move(&mv, None);
        assert_eq!(game.piece_at(Square::new(3, 3)), None);
        assert_eq!(
            game.piece_at(Square::new(2, 3)),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );

        game.undo_move();
        assert_eq!(*game.board(), before);
        assert_eq!(game.en_passant_target(), Some(Square::new(2, 3)));
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn promotion_uses_the_callers_choice_and_undo_restores_the_pawn() {
        let mut game = parse_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = find(&mut game, "a7a8");
        assert!(mv.is_promotion());

        game.make_move(&mv, Some(PromotionPiece::Knight));
        assert_eq!(
            game.piece_at(Square::new(0, 0)),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        assert_eq!(game.move_log()[0].chess_notation(), "a7a8n");

        game.undo_move();
        assert_eq!(
            game.piece_at(Square::new(1, 0)),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(game.piece_at(Square::new(0, 0)), None);
    }

    #[test]
    fn promotion_without_choice_becomes_queen() {
        let mut game = parse_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = find(&mut game, "a7a8");
        game.make_move(&mv, None);
        assert_eq!(
            game.piece_at(Square::new(0, 0)),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
    }

    #[test]
    fn king_moves_keep_the_cached_square_in_sync() {
        let mut game = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = find(&mut game, "e1d2");
        game.make_move(&mv, None);
        assert_eq!(game.king_location(Color::White), Square::new(6, 3));

        game.undo_move();
        assert_eq!(game.king_location(Color::White), Square::new(7, 4));
    }

    #[test]
    fn undo_with_empty_log_is_a_no_op() {
        let mut game = GameState::new_game();
        game.undo_move();
        assert_eq!(game.board(), GameState::new_game().board());
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.move_log().is_empty());
    }

    #[test]
    fn undo_after_capture_restores_the_victim() {
        let mut game = parse_fen("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = find(&mut game, "e4d5");
        assert_eq!(
            mv.piece_captured(),
            Some(Piece::new(Color::Black, PieceKind::Knight))
        );
        game.make_move(&mv, None);
        game.undo_move();
        assert_eq!(
            game.piece_at(Square::new(3, 3)),
            Some(Piece::new(Color::Black, PieceKind::Knight))
        );
        assert_eq!(game.get_fen(), "4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1");
    }
}
