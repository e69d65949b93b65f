//! Check and pin detection by ray casting from the king.
//!
//! From the king's square, each of the 8 compass rays is walked outward. The
//! first friendly piece on a ray becomes a pin candidate; if the next piece is
//! an enemy that attacks along that ray's geometry, the candidate is pinned.
//! An attacking enemy reached with no friendly piece in between is a check.
//! Knight checks are found separately from the 8 knight offsets; they can be
//! neither blocked nor produce pins.

use crate::game_state::chess_rules::{BOARD_SIZE, KNIGHT_OFFSETS, RAY_DIRECTIONS};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

/// A friendly piece that may only move along `direction` (or its opposite).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    /// Ray from the king towards the pinned piece.
    pub direction: Direction,
}

/// An enemy piece attacking the king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub attacker: Square,
    /// Ray (or knight offset) from the king towards the attacker.
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckInfo {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl CheckInfo {
    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }
}

/// Pins and checks against `color`'s king on its cached square.
#[inline]
pub fn check_for_pins_and_checks(game_state: &GameState, color: Color) -> CheckInfo {
    check_for_pins_and_checks_from(game_state.board(), game_state.king_location(color), color)
}

/// Pins and checks against a `color` king standing on `king_square` of `board`.
///
/// `king_square` need not hold the king; the king generator uses this to
/// evaluate hypothetical destinations. Any friendly king met on a ray blocks it.
pub fn check_for_pins_and_checks_from(board: &Board, king_square: Square, color: Color) -> CheckInfo {
    let mut info = CheckInfo::default();

    for direction in RAY_DIRECTIONS {
        let mut possible_pin: Option<Pin> = None;

        for distance in 1..BOARD_SIZE {
            let Some(square) = king_square.step(direction, distance) else {
                break;
            };
            let Some(piece) = board[square.row as usize][square.col as usize] else {
                continue;
            };

            if piece.color == color {
                if piece.kind == PieceKind::King || possible_pin.is_some() {
                    break;
                }
                possible_pin = Some(Pin { square, direction });
                continue;
            }

            if attacks_along_ray(piece, direction, distance) {
                match possible_pin {
                    None => {
                        info.in_check = true;
                        info.checks.push(Check {
                            attacker: square,
                            direction,
                        });
                    }
                    Some(pin) => info.pins.push(pin),
                }
            }
            break;
        }
    }

    for offset in KNIGHT_OFFSETS {
        let Some(square) = king_square.step(offset, 1) else {
            continue;
        };
        if board[square.row as usize][square.col as usize]
            == Some(Piece::new(color.opposite(), PieceKind::Knight))
        {
            info.in_check = true;
            info.checks.push(Check {
                attacker: square,
                direction: offset,
            });
        }
    }

    info
}

/// Whether `by_color` attacks `square` on `board`.
#[inline]
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    check_for_pins_and_checks_from(board, square, by_color.opposite()).in_check
}

/// Whether `color`'s king is attacked in the current position.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    is_square_attacked(game_state.board(), game_state.king_location(color), color.opposite())
}

/// Whether an en-passant capture would leave the mover's king attacked.
///
/// Two pawns leave the board line at once, so the single-blocker pin scan
/// cannot see this; the capture is played out on a scratch board instead.
pub fn en_passant_exposes_king(game_state: &GameState, mv: &Move) -> bool {
    let color = mv.piece_moved().color;
    let captured = mv.en_passant_capture_square();

    let mut board = *game_state.board();
    board[mv.start().row as usize][mv.start().col as usize] = None;
    board[captured.row as usize][captured.col as usize] = None;
    board[mv.end().row as usize][mv.end().col as usize] = Some(mv.piece_moved());

    is_square_attacked(&board, game_state.king_location(color), color.opposite())
}

/// `piece` sits `distance` squares from the king along `direction` (king -> piece).
fn attacks_along_ray(piece: Piece, direction: Direction, distance: i8) -> bool {
    match piece.kind {
        PieceKind::Rook => direction.is_orthogonal(),
        PieceKind::Bishop => !direction.is_orthogonal(),
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        // An enemy pawn attacks the squares one step ahead of it, so from the
        // king it is one step in the king's own forward direction.
        PieceKind::Pawn => {
            distance == 1
                && !direction.is_orthogonal()
                && direction.d_row == piece.color.opposite().forward()
        }
        PieceKind::Knight => false,
    }
}
