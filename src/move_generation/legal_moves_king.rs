use crate::game_state::chess_rules::KING_OFFSETS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::check_for_pins_and_checks_from;
use crate::moves::chess_move::Move;

/// King steps to the 8 neighbours, each re-checked for safety.
///
/// Every destination is evaluated on a scratch board with the king lifted off
/// its origin, so stepping back along a checking ray is seen as unsafe. The
/// cached king square on `game_state` is never touched.
pub fn generate_king_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let Some(king) = game_state.piece_at(from) else {
        return;
    };

    for offset in KING_OFFSETS {
        let Some(to) = from.step(offset, 1) else {
            continue;
        };
        if matches!(game_state.piece_at(to), Some(target) if target.color == king.color) {
            continue;
        }

        let mut board = *game_state.board();
        board[from.row as usize][from.col as usize] = None;
        board[to.row as usize][to.col as usize] = Some(king);

        if !check_for_pins_and_checks_from(&board, to, king.color).in_check {
            out.push(Move::on_board(from, to, king, game_state.board(), false));
        }
    }
}
