use tracing::debug;

use crate::game_state::game_state::GameState;
use crate::game_state::chess_types::PromotionPiece;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::chess_move::Move;

const PROMOTION_CHOICES: [PromotionPiece; 4] = [
    PromotionPiece::Queen,
    PromotionPiece::Rook,
    PromotionPiece::Bishop,
    PromotionPiece::Knight,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf statistics `depth` plies below `game_state`.
///
/// Walks the tree with make/undo, so the position is restored on return.
/// Each promotion counts once per piece choice.
pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let total = perft_recurse(game_state, depth);
    debug!(depth, nodes = total.nodes, "perft finished");
    total
}

/// Node count per root move, keyed by its long algebraic text.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(String, usize)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut out = Vec::new();
    for mv in game_state.get_legal_moves() {
        for promotion in promotion_choices(&mv) {
            let counts = perft_move(game_state, &mv, promotion, depth);
            let mut text = mv.chess_notation();
            if let Some(piece) = promotion {
                text.push(piece.kind().code().to_ascii_lowercase());
            }
            out.push((text, counts.nodes));
        }
    }
    out.sort();
    out
}

fn promotion_choices(mv: &Move) -> Vec<Option<PromotionPiece>> {
    if mv.is_promotion() {
        PROMOTION_CHOICES.iter().copied().map(Some).collect()
    } else {
        vec![None]
    }
}

fn perft_move(
    game_state: &mut GameState,
    mv: &Move,
    promotion: Option<PromotionPiece>,
    depth: u8,
) -> PerftCounts {
    game_state.make_move(mv, promotion);

    let counts = if depth == 1 {
        leaf_counts(game_state, mv)
    } else {
        perft_recurse(game_state, depth - 1)
    };

    game_state.undo_move();
    counts
}

fn perft_recurse(game_state: &mut GameState, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    for mv in game_state.get_legal_moves() {
        for promotion in promotion_choices(&mv) {
            total.merge(perft_move(game_state, &mv, promotion, depth));
        }
    }
    total
}

fn leaf_counts(game_state: &mut GameState, mv: &Move) -> PerftCounts {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant() {
        counts.en_passant += 1;
    }
    if mv.is_promotion() {
        counts.promotions += 1;
    }

    if is_king_in_check(game_state, game_state.side_to_move()) {
        counts.checks += 1;
        // Only positions in check can be mate, so the full generation is rare.
        if game_state.get_legal_moves().is_empty() {
            counts.checkmates += 1;
        }
    }

    counts
}
