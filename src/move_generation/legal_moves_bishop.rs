use crate::game_state::chess_rules::DIAGONAL_DIRECTIONS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::generate_sliding_moves;
use crate::moves::chess_move::Move;

pub fn generate_bishop_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let Some(piece) = game_state.piece_at(from) else {
        return;
    };
    generate_sliding_moves(game_state, from, piece, &DIAGONAL_DIRECTIONS, out);
}
