use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::Pin;
use crate::moves::chess_move::Move;

/// Pin direction of the piece on `square`, if it is pinned.
///
/// Pins are keyed by the pinned piece's square, so a lookup is enough and the
/// shared pin list is never consumed during generation.
#[inline]
pub fn pin_direction(pins: &[Pin], square: Square) -> Option<Direction> {
    pins.iter()
        .find(|pin| pin.square == square)
        .map(|pin| pin.direction)
}

/// A pinned piece may move only along its pin line, in either direction.
#[inline]
pub fn allowed_by_pin(pin: Option<Direction>, direction: Direction) -> bool {
    pin.map_or(true, |pin| pin.is_parallel(direction))
}

/// Slides from `from` along each direction until the edge, a friendly piece
/// (excluded), or an enemy piece (included).
pub fn generate_sliding_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    directions: &[Direction],
    out: &mut Vec<Move>,
) {
    let pin = pin_direction(game_state.pins(), from);

    for &direction in directions {
        if !allowed_by_pin(pin, direction) {
            continue;
        }

        for distance in 1..BOARD_SIZE {
            let Some(to) = from.step(direction, distance) else {
                break;
            };
            match game_state.piece_at(to) {
                None => out.push(Move::on_board(from, to, piece, game_state.board(), false)),
                Some(target) if target.color != piece.color => {
                    out.push(Move::on_board(from, to, piece, game_state.board(), false));
                    break;
                }
                Some(_) => break,
            }
        }
    }
}
