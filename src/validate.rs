use crate::{
    attack::{is_clear_line, is_square_under_attack},
    board::Board,
    castling::{CastleMove, can_castle, castle},
    castling_right::{CastlingRights, CastlingSide},
    color::Color,
    coord::{Coord, Vector, pawn_home_rank},
    error::MoveError,
    execute::relocate,
    piece::{Piece, PieceKind},
};

/// A move that passed every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Validated {
    /// Whether the opponent's king is attacked once the move is played.
    pub delivers_check: bool,
    /// Set when the move is a two-file king step, which must be carried out
    /// with [`execute_castling`](crate::castling::execute_castling).
    pub castling: Option<CastlingSide>,
}

/// Checks a single move for `color`, in order: coordinates, distinct
/// squares, ownership of the source, the target not holding an own piece,
/// the piece's movement pattern, and finally that the mover's king is not
/// left attacked. The first failing check is reported.
pub fn validate_move(
    board: &Board,
    source: Coord,
    target: Coord,
    color: Color,
    rights: CastlingRights,
) -> Result<Validated, MoveError> {
    if !source.is_valid() || !target.is_valid() {
        return Err(MoveError::InvalidCoordinates);
    }
    if source == target {
        return Err(MoveError::SameSquare);
    }
    let piece = board.get(source).ok_or(MoveError::NoPieceAtSource)?;
    if piece.color != color {
        return Err(MoveError::WrongOwner);
    }
    if board.is_own_piece(target, color) {
        return Err(MoveError::OwnPieceAtTarget);
    }
    let castling = match_pattern(board, source, target, piece, rights)?;

    // both squares are on the board and the source is occupied by now
    let after = match castling {
        Some(side) => castle(board, CastleMove::new(color, side)).board,
        None => relocate(board, source, target).board,
    };

    if after
        .king_of(color)
        .is_some_and(|king| is_square_under_attack(&after, king, !color))
    {
        return Err(MoveError::SelfCheck);
    }
    let delivers_check = after
        .king_of(!color)
        .is_some_and(|king| is_square_under_attack(&after, king, color));
    Ok(Validated {
        delivers_check,
        castling,
    })
}
/// Movement-pattern check. `Ok(Some(side))` marks an eligible castle.
fn match_pattern(
    board: &Board,
    source: Coord,
    target: Coord,
    piece: Piece,
    rights: CastlingRights,
) -> Result<Option<CastlingSide>, MoveError> {
    let difference = target - source;
    let legal = match piece.kind {
        PieceKind::Pawn => is_pawn_move(board, source, target, piece.color),
        PieceKind::Knight => difference.is_knight_move(),
        PieceKind::Bishop => is_clear_line(board, source, target, false),
        PieceKind::Rook => is_clear_line(board, source, target, true),
        PieceKind::Queen => {
            is_clear_line(board, source, target, true) || is_clear_line(board, source, target, false)
        }
        PieceKind::King => {
            if difference.row == 0 && difference.col.unsigned_abs() == 2 {
                let side = CastlingSide::from_king_step(source.col, target.col);
                return if can_castle(board, piece.color, side, rights) {
                    Ok(Some(side))
                } else {
                    Err(MoveError::IllegalPattern)
                };
            }
            difference.is_king_move()
        }
    };
    if legal {
        Ok(None)
    } else {
        Err(MoveError::IllegalPattern)
    }
}
fn is_pawn_move(board: &Board, source: Coord, target: Coord, color: Color) -> bool {
    let difference = target - source;
    if difference == Vector::pawn_single_move(color) {
        board.is_empty_at(target)
    } else if difference == Vector::pawn_double_move(color) {
        source.row == pawn_home_rank(color)
            && source
                .move_by(Vector::pawn_single_move(color))
                .is_some_and(|middle| board.is_empty_at(middle))
            && board.is_empty_at(target)
    } else {
        difference.is_pawn_attack(color) && !board.is_empty_at(target)
    }
}
#[cfg(test)]
mod test {
    use rstest::rstest;

    use crate::{
        castling_right::{CastlingRights, CastlingSide},
        color::Color,
        coord,
        coord::Coord,
        error::MoveError,
        fen::Fen,
        validate::validate_move,
    };

    fn check(fen: &str, source: &str, target: &str) -> Result<bool, MoveError> {
        let fen: Fen = fen.parse().unwrap();
        validate_move(
            &fen.board,
            source.parse().unwrap(),
            target.parse().unwrap(),
            fen.current_player,
            fen.castling_rights,
        )
        .map(|validated| validated.delivers_check)
    }
    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[rstest]
    #[case("e2", "e3")]
    #[case("e2", "e4")]
    #[case("g1", "f3")]
    #[case("b1", "a3")]
    fn opening_moves(#[case] source: &str, #[case] target: &str) {
        assert_eq!(check(START, source, target), Ok(false));
    }
    #[rstest]
    #[case("e2", "e2", MoveError::SameSquare)]
    #[case("e4", "e5", MoveError::NoPieceAtSource)]
    #[case("e7", "e5", MoveError::WrongOwner)]
    #[case("a1", "a2", MoveError::OwnPieceAtTarget)]
    #[case("e2", "e5", MoveError::IllegalPattern)]
    #[case("f1", "c4", MoveError::IllegalPattern)]
    #[case("a1", "a3", MoveError::IllegalPattern)]
    #[case("g1", "g3", MoveError::IllegalPattern)]
    #[case("e1", "g1", MoveError::OwnPieceAtTarget)]
    fn refusals_from_start(#[case] source: &str, #[case] target: &str, #[case] error: MoveError) {
        assert_eq!(check(START, source, target), Err(error));
    }
    #[test]
    fn off_board_coordinates() {
        let board = crate::board::Board::starting_position();
        assert_eq!(
            validate_move(
                &board,
                Coord::new(8, 1),
                coord!("a3"),
                Color::White,
                CastlingRights::all()
            ),
            Err(MoveError::InvalidCoordinates)
        );
        // coordinates are checked before anything else
        assert_eq!(
            validate_move(
                &board,
                Coord::new(9, 9),
                Coord::new(9, 9),
                Color::White,
                CastlingRights::all()
            ),
            Err(MoveError::InvalidCoordinates)
        );
    }
    #[rstest]
    // blocked single step
    #[case("4k3/8/8/8/8/4p3/4P3/4K3 w - - 0 1", "e2", "e3")]
    // double step through a piece
    #[case("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2", "e4")]
    // double step onto a piece
    #[case("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2", "e4")]
    // double step away from home rank
    #[case("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1", "e3", "e5")]
    // diagonal onto empty square
    #[case("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", "e2", "d3")]
    // backwards
    #[case("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1", "e3", "e2")]
    fn pawn_refusals(#[case] fen: &str, #[case] source: &str, #[case] target: &str) {
        assert_eq!(check(fen, source, target), Err(MoveError::IllegalPattern));
    }
    #[test]
    fn black_pawn_moves_down_the_board() {
        let fen = "4k3/3p4/4P3/8/8/8/8/4K3 b - - 0 1";
        assert_eq!(check(fen, "d7", "d5"), Ok(false));
        assert_eq!(check(fen, "d7", "e6"), Ok(false));
        assert_eq!(check(fen, "d7", "d8"), Err(MoveError::IllegalPattern));
    }
    #[test]
    fn sliders_stop_at_blockers() {
        let fen = "4k3/8/8/8/8/2P5/8/Q3K3 w - - 0 1";
        assert_eq!(check(fen, "a1", "b2"), Ok(false));
        assert_eq!(check(fen, "a1", "d4"), Err(MoveError::IllegalPattern));
        assert_eq!(check(fen, "a1", "a8"), Ok(true));
        assert_eq!(check(fen, "a1", "b3"), Err(MoveError::IllegalPattern));
    }
    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let fen = "4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1";
        assert_eq!(check(fen, "e2", "c3"), Err(MoveError::SelfCheck));
        assert_eq!(check(fen, "e2", "g1"), Err(MoveError::SelfCheck));
    }
    #[test]
    fn king_may_not_step_into_attack() {
        let fen = "4k3/8/8/8/8/8/3r4/4K3 w - - 0 1";
        assert_eq!(check(fen, "e1", "f1"), Ok(false));
        assert_eq!(check(fen, "e1", "d2"), Ok(false));
        assert_eq!(check(fen, "e1", "e2"), Err(MoveError::SelfCheck));
        let fen = "4k3/8/8/8/8/8/8/r3K3 w - - 0 1";
        assert_eq!(check(fen, "e1", "e2"), Ok(false));
        assert_eq!(check(fen, "e1", "d1"), Err(MoveError::SelfCheck));
    }
    #[test]
    fn must_answer_check() {
        let fen = "4k3/8/8/8/7b/8/3P4/4K2N w - - 0 1";
        assert_eq!(check(fen, "d2", "d3"), Err(MoveError::SelfCheck));
        assert_eq!(check(fen, "h1", "g3"), Ok(false));
        assert_eq!(check(fen, "h1", "f2"), Ok(false));
        assert_eq!(check(fen, "e1", "f2"), Err(MoveError::SelfCheck));
        assert_eq!(check(fen, "e1", "f1"), Ok(false));
    }
    #[test]
    fn reports_check_on_opponent() {
        let fen = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1";
        assert_eq!(check(fen, "a1", "a8"), Ok(true));
        assert_eq!(check(fen, "a1", "a7"), Ok(false));
    }
    #[test]
    fn castling_is_a_two_file_king_step() {
        let fen: Fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let kingside = validate_move(
            &fen.board,
            coord!("e1"),
            coord!("g1"),
            Color::White,
            fen.castling_rights,
        )
        .unwrap();
        assert_eq!(kingside.castling, Some(CastlingSide::Kingside));
        let queenside = validate_move(
            &fen.board,
            coord!("e1"),
            coord!("c1"),
            Color::White,
            fen.castling_rights,
        )
        .unwrap();
        assert_eq!(queenside.castling, Some(CastlingSide::Queenside));
        assert_eq!(
            validate_move(
                &fen.board,
                coord!("e1"),
                coord!("g1"),
                Color::White,
                CastlingRights::none()
            ),
            Err(MoveError::IllegalPattern)
        );
    }
    #[test]
    fn clear_kingside_without_right_is_refused() {
        let fen = "rnbqk2r/pppppppp/8/8/8/8/PPPPPPPP/RNBQK2R w Qkq - 0 1";
        assert_eq!(check(fen, "e1", "g1"), Err(MoveError::IllegalPattern));
        let fen = "rnbqk2r/pppppppp/8/8/8/8/PPPPPPPP/RNBQK2R w KQkq - 0 1";
        assert_eq!(check(fen, "e1", "g1"), Ok(false));
    }
    #[test]
    fn castling_rook_can_give_check() {
        let fen = "5k2/8/8/8/8/8/8/4K2R w K - 0 1";
        assert_eq!(check(fen, "e1", "g1"), Ok(true));
    }
}
