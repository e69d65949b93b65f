//! Error types for position setup and move-text parsing.
//!
//! Move generation and move application never fail: an illegal candidate is
//! simply absent from the legal set, and undoing an empty history is a no-op.
//! Only text input (FEN, squares, move strings) and board setup return errors.

use thiserror::Error;

use crate::game_state::chess_types::Color;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// FEN string could not be parsed
    #[error("Invalid FEN: {message}")]
    InvalidFen { message: String },

    /// Square name outside `a1`..`h8`
    #[error("Invalid algebraic square: {text:?}")]
    InvalidAlgebraic { text: String },

    /// Long algebraic move text malformed or inconsistent with the board
    #[error("Invalid move text {text:?}: {message}")]
    InvalidMoveText { text: String, message: String },

    #[error("Invalid promotion piece character: {ch:?}")]
    InvalidPromotionPiece { ch: char },

    /// Board does not hold exactly one king of the given color
    #[error("Expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },
}

impl ChessError {
    pub(crate) fn fen(message: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            message: message.into(),
        }
    }

    pub(crate) fn move_text(text: &str, message: impl Into<String>) -> Self {
        ChessError::InvalidMoveText {
            text: text.to_owned(),
            message: message.into(),
        }
    }
}

pub type ChessResult<T> = Result<T, ChessError>;
