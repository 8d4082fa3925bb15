use std::iter::once;

use crate::{
    attack::is_square_under_attack,
    board::Board,
    castling_right::{CastlingRights, CastlingSide},
    color::Color,
    coord::{Coord, home_rank},
    execute::ExecuteError,
    piece::{Piece, PieceKind},
};

pub const KING_HOME_COL: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleMove {
    pub king_origin: Coord,
    pub king_destination: Coord,
    pub rook_origin: Coord,
    pub rook_destination: Coord,
}
impl CastleMove {
    pub fn new(color: Color, side: CastlingSide) -> Self {
        let rank = home_rank(color);
        CastleMove {
            king_origin: Coord::new(rank, KING_HOME_COL),
            king_destination: Coord::new(rank, side.king_destination_col()),
            rook_origin: Coord::new(rank, side.rook_origin_col()),
            rook_destination: Coord::new(rank, side.rook_destination_col()),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Castled {
    pub board: Board,
    pub movement: CastleMove,
}

pub fn can_castle(board: &Board, color: Color, side: CastlingSide, rights: CastlingRights) -> bool {
    if !rights.get(color, side) {
        return false;
    }
    let movement = CastleMove::new(color, side);
    if !board.square_contains(movement.king_origin, color, PieceKind::King)
        || !board.square_contains(movement.rook_origin, color, PieceKind::Rook)
    {
        return false;
    }
    let path_is_clear = movement
        .king_origin
        .between(movement.rook_origin)
        .is_some_and(|mut inside| inside.all(|position| board.is_empty_at(position)));
    if !path_is_clear {
        return false;
    }
    // the king's own square, every square it crosses, and where it lands
    let mut king_path = once(movement.king_origin)
        .chain(
            movement
                .king_origin
                .between(movement.king_destination)
                .into_iter()
                .flatten(),
        )
        .chain(once(movement.king_destination));
    king_path.all(|position| !is_square_under_attack(board, position, !color))
}
/// Relocates king and rook together on a copy of `board`. Eligibility is
/// the caller's business; see [`can_castle`].
pub fn execute_castling(
    board: &Board,
    color: Color,
    side: CastlingSide,
) -> Result<Castled, ExecuteError> {
    let movement = CastleMove::new(color, side);
    for origin in [movement.king_origin, movement.rook_origin] {
        if board.is_empty_at(origin) {
            return Err(ExecuteError::EmptySource(origin));
        }
    }
    Ok(castle(board, movement))
}
/// [`execute_castling`] without the occupancy checks.
pub(crate) fn castle(board: &Board, movement: CastleMove) -> Castled {
    let mut board = *board;
    let king = board.take(movement.king_origin);
    let rook = board.take(movement.rook_origin);
    board.put(movement.king_destination, king);
    board.put(movement.rook_destination, rook);
    Castled { board, movement }
}
/// Rights after `color` moves from `source` to `target`, judged on the
/// board as it was before the move.
pub fn update_castling_rights(
    board: &Board,
    source: Coord,
    target: Coord,
    color: Color,
    rights: CastlingRights,
) -> CastlingRights {
    let mut rights = rights;
    match board.get(source) {
        Some(Piece {
            kind: PieceKind::King,
            ..
        }) => rights.clear(color),
        Some(Piece {
            kind: PieceKind::Rook,
            ..
        }) => {
            if let Some(side) = home_rook_side(source, color) {
                rights.remove(color, side);
            }
        }
        _ => (),
    }
    if board.square_contains(target, !color, PieceKind::Rook) {
        if let Some(side) = home_rook_side(target, !color) {
            rights.remove(!color, side);
        }
    }
    rights
}
/// Castling side whose rook starts on `position`, if any.
fn home_rook_side(position: Coord, color: Color) -> Option<CastlingSide> {
    CastlingSide::ALL
        .into_iter()
        .find(|side| position == Coord::new(home_rank(color), side.rook_origin_col()))
}
