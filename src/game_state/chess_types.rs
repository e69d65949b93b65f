//! Core value types for the mailbox board representation.
//!
//! Squares are `(row, col)` pairs with row 0 being black's back rank and
//! row 7 white's. Pieces are small `Copy` values so equality and color/kind
//! extraction are plain field reads.

use std::fmt;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn advance.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kind letter of the two-character piece code (`p` stays lowercase).
    #[inline]
    pub const fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub const fn from_code(ch: char) -> Option<Self> {
        match ch {
            'p' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece. Empty squares are `None` on the [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Two-character code such as `wK` or `bp`.
    pub fn code(self) -> String {
        let mut out = String::with_capacity(2);
        out.push(self.color.code());
        out.push(self.kind.code());
        out
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let color = match chars.next()? {
            'w' => Color::White,
            'b' => Color::Black,
            _ => return None,
        };
        let kind = PieceKind::from_code(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { color, kind })
    }
}

/// Board coordinate. Both components are in `0..8` for any square handed
/// out by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Checked constructor; `None` when off the board.
    #[inline]
    pub const fn try_new(row: i8, col: i8) -> Option<Self> {
        if row < 0 || row > 7 || col < 0 || col > 7 {
            None
        } else {
            Some(Self { row, col })
        }
    }

    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::try_new(self.row + d_row, self.col + d_col)
    }

    #[inline]
    pub const fn step(self, direction: Direction, distance: i8) -> Option<Self> {
        self.offset(direction.d_row * distance, direction.d_col * distance)
    }
}

/// A unit step (or knight offset) between squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub d_row: i8,
    pub d_col: i8,
}

impl Direction {
    #[inline]
    pub const fn new(d_row: i8, d_col: i8) -> Self {
        Self { d_row, d_col }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        Self {
            d_row: -self.d_row,
            d_col: -self.d_col,
        }
    }

    /// True when `other` runs along the same line, either way.
    #[inline]
    pub fn is_parallel(self, other: Direction) -> bool {
        self == other || self == other.opposite()
    }

    #[inline]
    pub const fn is_orthogonal(self) -> bool {
        self.d_row == 0 || self.d_col == 0
    }
}

pub type Board = [[Option<Piece>; 8]; 8];

/// Piece a pawn may become on the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionPiece {
    Rook,
    Knight,
    Bishop,
    Queen,
}

impl PromotionPiece {
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Queen => PieceKind::Queen,
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'r' => Some(PromotionPiece::Rook),
            'n' => Some(PromotionPiece::Knight),
            'b' => Some(PromotionPiece::Bishop),
            'q' => Some(PromotionPiece::Queen),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_codes_match_two_character_encoding() {
        let king = Piece::new(Color::White, PieceKind::King);
        assert_eq!(king.code(), "wK");
        assert_eq!(Piece::from_code("bp"), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(Piece::from_code("bP"), None);
        assert_eq!(Piece::from_code("--"), None);
        assert_eq!(Piece::from_code("wKx"), None);
    }

    #[test]
    fn square_offsets_stay_on_board() {
        let a8 = Square::new(0, 0);
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(a8.offset(1, 1), Some(Square::new(1, 1)));
        assert_eq!(a8.step(Direction::new(1, 0), 7), Some(Square::new(7, 0)));
        assert_eq!(a8.step(Direction::new(1, 0), 8), None);
    }

    #[test]
    fn directions_are_parallel_to_their_opposite() {
        let up = Direction::new(-1, 0);
        assert!(up.is_parallel(Direction::new(1, 0)));
        assert!(!up.is_parallel(Direction::new(-1, 1)));
        assert!(up.is_orthogonal());
    }
}
