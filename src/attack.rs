use crate::{board::Board, color::Color, coord::Coord, piece::PieceKind};

/// Whether the ray from `origin` to `target` is a clear rank, file
/// (`straight`) or diagonal. The occupant of `target` itself never blocks.
pub(crate) fn is_clear_line(board: &Board, origin: Coord, target: Coord, straight: bool) -> bool {
    let difference = target - origin;
    let shape_matches = if straight {
        difference.is_straight()
    } else {
        difference.is_diagonal()
    };
    shape_matches
        && origin
            .between(target)
            .is_some_and(|mut inside| inside.all(|position| board.is_empty_at(position)))
}
/// Pieces of `color` whose movement pattern reaches `target` on this board.
/// Nothing attacks a square off the board.
pub fn attackers(board: &Board, target: Coord, color: Color) -> impl Iterator<Item = Coord> + '_ {
    let on_board = target.is_valid();
    board
        .pieces_of(color)
        .filter(move |_| on_board)
        .filter(move |(position, piece)| {
            let difference = target - *position;
            match piece.kind {
                PieceKind::Pawn => difference.is_pawn_attack(color),
                PieceKind::Knight => difference.is_knight_move(),
                PieceKind::Bishop => is_clear_line(board, *position, target, false),
                PieceKind::Rook => is_clear_line(board, *position, target, true),
                PieceKind::Queen => {
                    is_clear_line(board, *position, target, true)
                        || is_clear_line(board, *position, target, false)
                }
                PieceKind::King => difference.is_king_move(),
            }
        })
        .map(|(position, _)| position)
}
pub fn is_square_under_attack(board: &Board, target: Coord, attacker: Color) -> bool {
    attackers(board, target, attacker).next().is_some()
}
