//! FEN-to-GameState parser.
//!
//! Builds a mailbox board from a Forsyth-Edwards Notation string. The
//! castling field is validated and then ignored, since castling is not part of
//! this rule set. Clocks are optional so bare four-field FENs are accepted.

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessError::fen("missing board layout"))?;
    let side_part = parts
        .next()
        .ok_or_else(|| ChessError::fen("missing side to move"))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| ChessError::fen("missing castling rights"))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| ChessError::fen("missing en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(ChessError::fen("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    validate_castling_rights(castling_part)?;
    let en_passant_target = parse_en_passant_target(en_passant_part, side_to_move)?;

    let mut game_state = GameState::from_board(board, side_to_move, en_passant_target)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::fen(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::fen(format!("invalid fullmove number: {fullmove_part}")))?;

    debug!(fen, "parsed FEN position");
    Ok(game_state)
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::fen("board layout must contain 8 ranks"));
    }

    let mut board: Board = [[None; 8]; 8];

    // FEN lists rank 8 first, which is row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::fen(format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| ChessError::fen(format!("invalid piece character '{ch}'")))?;

            if col >= 8 {
                return Err(ChessError::fen("board rank has too many files"));
            }

            board[row][col] = Some(piece);
            col += 1;
        }

        if col != 8 {
            return Err(ChessError::fen("board rank does not sum to 8 files"));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::fen(format!("invalid side to move: {side_part}"))),
    }
}

fn validate_castling_rights(castling_part: &str) -> ChessResult<()> {
    if castling_part == "-" {
        return Ok(());
    }
    match castling_part.chars().find(|ch| !matches!(ch, 'K' | 'Q' | 'k' | 'q')) {
        Some(ch) => Err(ChessError::fen(format!("invalid castling rights character: {ch}"))),
        None => Ok(()),
    }
}

fn parse_en_passant_target(en_passant_part: &str, side_to_move: Color) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    // The skipped square sits behind a pawn of the side that just moved.
    let expected_row = match side_to_move {
        Color::White => 2,
        Color::Black => 5,
    };
    if square.row != expected_row {
        return Err(ChessError::fen(format!(
            "en-passant square {en_passant_part} is not on the expected rank"
        )));
    }
    Ok(Some(square))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
