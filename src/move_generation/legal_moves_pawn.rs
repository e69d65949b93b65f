use crate::game_state::chess_rules::{pawn_start_row, promotion_row};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::en_passant_exposes_king;
use crate::move_generation::legal_move_shared::{allowed_by_pin, pin_direction};
use crate::moves::chess_move::Move;

/// Pushes, captures and en passant for the pawn on `from`.
///
/// The advance direction is chosen once from the pawn's color. Moves landing
/// on the last rank are flagged as promotions; the piece is picked when the
/// move is applied.
pub fn generate_pawn_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let Some(pawn) = game_state.piece_at(from) else {
        return;
    };
    let color = pawn.color;
    let board = game_state.board();
    let pin = pin_direction(game_state.pins(), from);
    let last_row = promotion_row(color);

    let advance = Direction::new(color.forward(), 0);
    if allowed_by_pin(pin, advance) {
        if let Some(one) = from.step(advance, 1) {
            if game_state.piece_at(one).is_none() {
                out.push(Move::on_board(from, one, pawn, board, one.row == last_row));

                if from.row == pawn_start_row(color) {
                    if let Some(two) = from.step(advance, 2) {
                        if game_state.piece_at(two).is_none() {
                            out.push(Move::on_board(from, two, pawn, board, false));
                        }
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let capture = Direction::new(color.forward(), d_col);
        if !allowed_by_pin(pin, capture) {
            continue;
        }
        let Some(to) = from.step(capture, 1) else {
            continue;
        };

        match game_state.piece_at(to) {
            Some(target) if target.color != color => {
                out.push(Move::on_board(from, to, pawn, board, to.row == last_row));
            }
            None if game_state.en_passant_target() == Some(to) => {
                let mv = Move::en_passant(from, to, pawn);
                let victim = Piece::new(color.opposite(), PieceKind::Pawn);
                if game_state.piece_at(mv.en_passant_capture_square()) == Some(victim)
                    && !en_passant_exposes_king(game_state, &mv)
                {
                    out.push(mv);
                }
            }
            _ => {}
        }
    }
}
