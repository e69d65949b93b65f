use crate::game_state::chess_rules::KNIGHT_OFFSETS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::pin_direction;
use crate::moves::chess_move::Move;

/// A knight move always leaves its pin line, so a pinned knight has no moves.
pub fn generate_knight_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let Some(piece) = game_state.piece_at(from) else {
        return;
    };
    if pin_direction(game_state.pins(), from).is_some() {
        return;
    }

    for offset in KNIGHT_OFFSETS {
        let Some(to) = from.step(offset, 1) else {
            continue;
        };
        match game_state.piece_at(to) {
            Some(target) if target.color == piece.color => {}
            _ => out.push(Move::on_board(from, to, piece, game_state.board(), false)),
        }
    }
}
