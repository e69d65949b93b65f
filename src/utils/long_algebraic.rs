use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

/// Candidate move for text such as `e2e4` or `a7a8n`.
///
/// Only the shape of the text and the moving piece are checked; legality is
/// decided by comparing the result against `get_legal_moves`. The trailing
/// promotion letter, if any, is returned separately for `make_move`.
pub fn parse_long_algebraic(
    long_algebraic: &str,
    game_state: &GameState,
) -> ChessResult<(Move, Option<PromotionPiece>)> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::move_text(text, "expected 4 or 5 characters"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    let mv = Move::new(from, to, game_state)
        .ok_or_else(|| ChessError::move_text(text, "no piece on the start square"))?;
    if mv.piece_moved().color != game_state.side_to_move() {
        return Err(ChessError::move_text(text, "piece does not belong to the side to move"));
    }

    let promotion = match text.chars().nth(4) {
        Some(ch) => {
            if !mv.is_promotion() {
                return Err(ChessError::move_text(
                    text,
                    "only a pawn reaching the last rank may promote",
                ));
            }
            Some(PromotionPiece::from_char(ch).ok_or(ChessError::InvalidPromotionPiece { ch })?)
        }
        None => None,
    };

    Ok((mv, promotion))
}

/// Long algebraic text of a move, including the chosen promotion piece once
/// the move has been applied.
pub fn move_to_long_algebraic(mv: &Move) -> String {
    mv.chess_notation()
}
