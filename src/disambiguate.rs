use crate::{
    board::Board,
    color::Color,
    coord::{Coord, Vector, pawn_home_rank},
    piece::{Piece, PieceKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub source: Coord,
    pub piece: Piece,
}

/// Own pieces of `kind` whose movement shape alone could bring them to
/// `target`, in board scan order (rank 8 to rank 1, file a to h).
///
/// Obstruction, check safety, castling and en passant are ignored, so the
/// list may contain moves the validator will refuse but never misses one it
/// would accept (castling aside, which is requested by coordinates).
pub fn find_possible_moves(
    board: &Board,
    color: Color,
    kind: PieceKind,
    target: Coord,
) -> Vec<Candidate> {
    if !target.is_valid() {
        return Vec::new();
    }
    board
        .pieces_of(color)
        .filter(|(_, piece)| piece.kind == kind)
        .filter(|(source, piece)| shape_reaches(*source, target, *piece))
        .map(|(source, piece)| Candidate { source, piece })
        .collect()
}
fn shape_reaches(source: Coord, target: Coord, piece: Piece) -> bool {
    let difference = target - source;
    match piece.kind {
        PieceKind::Pawn => {
            difference == Vector::pawn_single_move(piece.color)
                || (difference == Vector::pawn_double_move(piece.color)
                    && source.row == pawn_home_rank(piece.color))
                || difference.is_pawn_attack(piece.color)
        }
        PieceKind::Knight => difference.is_knight_move(),
        PieceKind::Bishop => difference.is_diagonal(),
        PieceKind::Rook => difference.is_straight(),
        PieceKind::Queen => difference.is_straight() || difference.is_diagonal(),
        PieceKind::King => difference.is_king_move(),
    }
}
