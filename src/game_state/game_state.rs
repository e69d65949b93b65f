//! Core mailbox game state.
//!
//! `GameState` owns the 8x8 board, turn order, move history, en-passant
//! state, cached king squares, and the per-ply check/pin scratch data that
//! legal move generation fills in. Presentation code reads it through the
//! accessors below and mutates it only through `make_move` / `undo_move`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{Check, Pin};
use crate::moves::chess_move::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    // [color]
    pub(crate) king_locations: [Square; 2],

    pub(crate) move_log: Vec<Move>,
    pub(crate) undo_stack: Vec<UndoState>,
    pub(crate) en_passant_target: Option<Square>,

    // Only carried so FEN output is complete.
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,

    // --- Current-ply scratch, refreshed by `get_legal_moves` ---
    pub(crate) in_check: bool,
    pub(crate) pins: Vec<Pin>,
    pub(crate) checks: Vec<Check>,

    pub(crate) checkmate: bool,
    pub(crate) stalemate: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard starting position, white to move.
    pub fn new_game() -> Self {
        let mut board: Board = [[None; 8]; 8];
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board[0][col] = Some(Piece::new(Color::Black, *kind));
            board[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board[7][col] = Some(Piece::new(Color::White, *kind));
        }

        Self::with_kings(board, Color::White, [Square::new(7, 4), Square::new(0, 4)])
    }

    /// Builds a state from an arbitrary board, enforcing the one-king-per-side invariant.
    pub fn from_board(
        board: Board,
        side_to_move: Color,
        en_passant_target: Option<Square>,
    ) -> ChessResult<Self> {
        let white_king = find_single_king(&board, Color::White)?;
        let black_king = find_single_king(&board, Color::Black)?;

        let mut game_state = Self::with_kings(board, side_to_move, [white_king, black_king]);
        game_state.en_passant_target = en_passant_target;
        Ok(game_state)
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    fn with_kings(board: Board, side_to_move: Color, king_locations: [Square; 2]) -> Self {
        Self {
            board,
            side_to_move,
            king_locations,
            move_log: Vec::new(),
            undo_stack: Vec::new(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            in_check: false,
            pins: Vec::new(),
            checks: Vec::new(),
            checkmate: false,
            stalemate: false,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.row as usize][square.col as usize]
    }

    #[inline]
    pub(crate) fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.row as usize][square.col as usize] = piece;
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn king_location(&self, color: Color) -> Square {
        self.king_locations[color.index()]
    }

    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Number of plies played since this state was set up.
    #[inline]
    pub fn ply_count(&self) -> usize {
        self.move_log.len()
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Whether the side to move was in check at the last legal-move query.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    #[inline]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }
}

fn find_single_king(board: &Board, color: Color) -> ChessResult<Square> {
    let king = Piece::new(color, PieceKind::King);
    let squares: Vec<Square> = board
        .iter()
        .enumerate()
        .flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(move |(_, cell)| **cell == Some(king))
                .map(move |(col, _)| Square::new(row as i8, col as i8))
        })
        .collect();

    match squares.as_slice() {
        [square] => Ok(*square),
        _ => Err(ChessError::KingCount {
            color,
            count: squares.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn new_game_caches_king_squares() {
        let game = GameState::new_game();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.king_location(Color::White), Square::new(7, 4));
        assert_eq!(game.king_location(Color::Black), Square::new(0, 4));
        assert_eq!(
            game.piece_at(Square::new(0, 3)),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(game.piece_at(Square::new(4, 4)), None);
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn new_game_matches_starting_fen() {
        let from_fen = GameState::from_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(from_fen.board(), GameState::new_game().board());
    }

    #[test]
    fn from_board_rejects_missing_king() {
        let mut board: Board = [[None; 8]; 8];
        board[7][4] = Some(Piece::new(Color::White, PieceKind::King));

        let err = GameState::from_board(board, Color::White, None).expect_err("black king is missing");
        assert!(matches!(
            err,
            ChessError::KingCount {
                color: Color::Black,
                count: 0
            }
        ));
    }

    #[test]
    fn from_board_rejects_second_king() {
        let mut board: Board = [[None; 8]; 8];
        board[7][4] = Some(Piece::new(Color::White, PieceKind::King));
        board[7][0] = Some(Piece::new(Color::White, PieceKind::King));
        board[0][4] = Some(Piece::new(Color::Black, PieceKind::King));

        assert!(GameState::from_board(board, Color::White, None).is_err());
    }

    #[test]
    fn king_count_error_reports_every_extra_king() {
        let mut board: Board = [[None; 8]; 8];
        board[7][4] = Some(Piece::new(Color::White, PieceKind::King));
        board[0][0] = Some(Piece::new(Color::Black, PieceKind::King));
        board[0][4] = Some(Piece::new(Color::Black, PieceKind::King));
        board[0][7] = Some(Piece::new(Color::Black, PieceKind::King));

        let err = GameState::from_board(board, Color::White, None).expect_err("three black kings");
        assert_eq!(
            err,
            ChessError::KingCount {
                color: Color::Black,
                count: 3
            }
        );
    }
}
