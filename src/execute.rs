use thiserror::Error;

use crate::{
    board::Board,
    coord::{Coord, pawn_promotion_rank},
    piece::{Piece, PieceKind},
};

/// Broken caller contract on the raw relocation functions. Never a
/// user-facing validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ExecuteError {
    #[error("no piece at {0} to relocate")]
    EmptySource(Coord),
    #[error("{0} is off the board")]
    OffBoard(Coord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Executed {
    pub board: Board,
    pub captured: Option<Piece>,
    pub promoted: bool,
}

/// Moves whatever stands on `source` to `target` on a copy of `board`.
///
/// No legality is checked. A pawn landing on the far rank always becomes a
/// queen. Castling rooks and en passant victims are not touched.
pub fn execute_move(board: &Board, source: Coord, target: Coord) -> Result<Executed, ExecuteError> {
    for position in [source, target] {
        if !position.is_valid() {
            return Err(ExecuteError::OffBoard(position));
        }
    }
    if board.is_empty_at(source) {
        return Err(ExecuteError::EmptySource(source));
    }
    Ok(relocate(board, source, target))
}
/// [`execute_move`] without the contract checks. Both positions must be on
/// the board.
pub(crate) fn relocate(board: &Board, source: Coord, target: Coord) -> Executed {
    let mut board = *board;
    let mut promoted = false;
    let piece = board.take(source).map(|mut piece| {
        if piece.kind == PieceKind::Pawn && target.row == pawn_promotion_rank(piece.color) {
            piece.kind = PieceKind::Queen;
            promoted = true;
        }
        piece
    });
    let captured = board.take(target);
    board.put(target, piece);
    Executed {
        board,
        captured,
        promoted,
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord,
        execute::{ExecuteError, execute_move},
        fen::Fen,
        piece::{Piece, PieceKind},
    };

    #[test]
    fn relocates_and_reports_capture() {
        let board: Fen = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let executed = execute_move(&board.board, coord!("e4"), coord!("d5")).unwrap();
        assert!(executed.board.is_empty_at(coord!("e4")));
        assert_eq!(
            executed.board.get(coord!("d5")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            executed.captured,
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert!(!executed.promoted);
        // the original stays as it was
        assert!(board.board.is_own_piece(coord!("e4"), Color::White));
    }
    #[test]
    fn pawn_on_last_rank_becomes_queen() {
        let board: Fen = "4k3/8/8/8/8/8/p7/4K3 b - - 0 1".parse().unwrap();
        let executed = execute_move(&board.board, coord!("a2"), coord!("a1")).unwrap();
        assert!(executed.promoted);
        assert_eq!(
            executed.board.get(coord!("a1")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
    }
    #[test]
    fn empty_source_is_a_contract_violation() {
        assert_eq!(
            execute_move(&Board::starting_position(), coord!("e4"), coord!("e5")),
            Err(ExecuteError::EmptySource(coord!("e4")))
        );
    }
}
