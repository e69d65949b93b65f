use crate::game_state::chess_types::*;

/// Per-ply record for `undo_move` covering what the logged `Move` cannot restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub prev_en_passant_target: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}
