use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    board::Board,
    castling::{execute_castling, update_castling_rights},
    castling_right::CastlingRights,
    color::Color,
    coord::{Coord, Vector},
    disambiguate::{Candidate, find_possible_moves},
    end_state::{GameEnd, check_game_end, is_in_check, legal_moves},
    error::MoveError,
    execute::{ExecuteError, execute_move},
    fen::{Fen, ParseFenError},
    notation::Notation,
    piece::{Piece, PieceKind},
    validate::validate_move,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("executing a validated move failed: {0}")]
    Execute(#[from] ExecuteError),
    #[error("the game is over: {0}")]
    GameOver(GameEnd),
    #[error("no {kind} can reach {target}")]
    NoCandidate { kind: PieceKind, target: Coord },
    #[error("{} pieces can reach {target}, pick one", .candidates.len())]
    Ambiguous {
        target: Coord,
        candidates: Vec<Candidate>,
    },
    #[error("choice {choice} is out of range, there are {count} candidates")]
    InvalidChoice { choice: usize, count: usize },
}

/// One accepted ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub color: Color,
    pub source: Coord,
    pub target: Coord,
    pub piece: Piece,
    pub notation: Notation,
    pub captured: Option<Piece>,
    pub check: bool,
}

/// A game in progress: the position plus everything the rule functions
/// need between plies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Coord>,
    half_move: u32,
    full_move: u32,
    history: Vec<MoveRecord>,
    captured_by_white: Vec<Piece>,
    captured_by_black: Vec<Piece>,
    outcome: Option<GameEnd>,
}
impl Game {
    pub fn new() -> Self {
        Game::from_fen(Fen::starting_position())
    }
    /// Starts from an arbitrary position. A position that is already
    /// checkmate or stalemate yields a finished game.
    pub fn from_fen(fen: Fen) -> Self {
        let outcome = check_game_end(&fen.board, fen.current_player, fen.castling_rights);
        Game {
            board: fen.board,
            current_player: fen.current_player,
            castling_rights: fen.castling_rights,
            en_passant_target: fen.en_passant_target,
            half_move: fen.half_move,
            full_move: fen.full_move.max(1),
            history: Vec::new(),
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
            outcome,
        }
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn current_player(&self) -> Color {
        self.current_player
    }
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }
    /// Square skipped by the last double pawn push. Recorded for FEN output
    /// only, en passant captures are not playable.
    pub fn en_passant_target(&self) -> Option<Coord> {
        self.en_passant_target
    }
    pub fn half_move(&self) -> u32 {
        self.half_move
    }
    pub fn full_move(&self) -> u32 {
        self.full_move
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
    /// Pieces taken by `color`, in the order they were captured.
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.captured_by_white,
            Color::Black => &self.captured_by_black,
        }
    }
    pub fn outcome(&self) -> Option<GameEnd> {
        self.outcome
    }
    pub fn is_in_check(&self) -> bool {
        is_in_check(&self.board, self.current_player)
    }
    pub fn fen(&self) -> Fen {
        Fen {
            board: self.board,
            current_player: self.current_player,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            half_move: self.half_move,
            full_move: self.full_move,
        }
    }
    pub fn legal_moves(&self) -> Vec<(Coord, Coord)> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        legal_moves(&self.board, self.current_player, self.castling_rights).collect()
    }
    /// Legal targets of the piece on `source`.
    pub fn destinations(&self, source: Coord) -> Vec<Coord> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        Coord::all()
            .filter(|target| {
                validate_move(
                    &self.board,
                    source,
                    *target,
                    self.current_player,
                    self.castling_rights,
                )
                .is_ok()
            })
            .collect()
    }
    /// Pieces of the side to move that might reach `target`, see
    /// [`find_possible_moves`].
    pub fn candidates(&self, kind: PieceKind, target: Coord) -> Vec<Candidate> {
        find_possible_moves(&self.board, self.current_player, kind, target)
    }
    /// Validates and plays a move for the side to move. On error the game
    /// is left untouched.
    pub fn play(&mut self, source: Coord, target: Coord) -> Result<MoveRecord, PlayError> {
        if let Some(end) = self.outcome {
            warn!(%source, %target, "move attempted after the game ended");
            return Err(PlayError::GameOver(end));
        }
        let color = self.current_player;
        let validated = validate_move(&self.board, source, target, color, self.castling_rights)
            .inspect_err(|err| debug!(%source, %target, %color, reason = %err, "move rejected"))?;
        let piece = self.board.get(source).ok_or(MoveError::NoPieceAtSource)?;
        let mut notation = Notation::new(
            &self.board,
            source,
            target,
            self.castling_rights,
            validated,
        )
        .ok_or(MoveError::NoPieceAtSource)?;

        let (board, captured) = match validated.castling {
            Some(side) => (execute_castling(&self.board, color, side)?.board, None),
            None => {
                let executed = execute_move(&self.board, source, target)?;
                (executed.board, executed.captured)
            }
        };

        self.castling_rights =
            update_castling_rights(&self.board, source, target, color, self.castling_rights);
        self.board = board;
        if piece.kind == PieceKind::Pawn || captured.is_some() {
            self.half_move = 0;
        } else {
            self.half_move = self.half_move.saturating_add(1);
        }
        self.en_passant_target = (piece.kind == PieceKind::Pawn
            && target - source == Vector::pawn_double_move(color))
        .then(|| source.move_by(Vector::pawn_single_move(color)))
        .flatten();
        if color == Color::Black {
            self.full_move = self.full_move.saturating_add(1);
        }
        if let Some(captured) = captured {
            match color {
                Color::White => self.captured_by_white.push(captured),
                Color::Black => self.captured_by_black.push(captured),
            }
        }
        self.current_player = !color;
        self.outcome = check_game_end(&self.board, self.current_player, self.castling_rights);
        if let Some(GameEnd::Checkmate { .. }) = self.outcome {
            notation = notation.into_checkmate();
        }
        let record = MoveRecord {
            color,
            source,
            target,
            piece,
            notation,
            captured,
            check: validated.delivers_check,
        };
        self.history.push(record);
        debug!(%notation, fen = %self.fen(), "move played");
        if let Some(end) = self.outcome {
            info!(result = end.result().code(), reason = end.reason(), "game over");
        }
        Ok(record)
    }
    /// Plays the piece of `kind` that goes to `target`. With more than one
    /// candidate, `choice` indexes into [`Game::candidates`].
    pub fn play_piece(
        &mut self,
        kind: PieceKind,
        target: Coord,
        choice: Option<usize>,
    ) -> Result<MoveRecord, PlayError> {
        if let Some(end) = self.outcome {
            return Err(PlayError::GameOver(end));
        }
        let candidates = self.candidates(kind, target);
        let source = match (candidates.as_slice(), choice) {
            ([], _) => return Err(PlayError::NoCandidate { kind, target }),
            (candidates, Some(choice)) => {
                candidates
                    .get(choice)
                    .ok_or(PlayError::InvalidChoice {
                        choice,
                        count: candidates.len(),
                    })?
                    .source
            }
            ([candidate], None) => candidate.source,
            (_, None) => {
                debug!(%kind, %target, count = candidates.len(), "ambiguous move");
                return Err(PlayError::Ambiguous { target, candidates });
            }
        };
        self.play(source, target)
    }
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
impl From<Fen> for Game {
    fn from(value: Fen) -> Self {
        Game::from_fen(value)
    }
}
impl FromStr for Game {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Game::from_fen(s.parse()?))
    }
}
#[cfg(test)]
mod test {
    use crate::{
        castling_right::CastlingSide,
        color::Color,
        coord,
        end_state::{EndState, GameEnd},
        error::MoveError,
        execute::ExecuteError,
        game::{Game, PlayError},
        piece::{Piece, PieceKind},
    };

    #[test]
    fn opening_updates_counters() {
        let mut game = Game::new();
        let record = game.play(coord!("e2"), coord!("e4")).unwrap();
        assert_eq!(record.notation.to_string(), "e4");
        assert_eq!(
            game.fen().to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        game.play(coord!("g8"), coord!("f6")).unwrap();
        assert_eq!(
            game.fen().to_string(),
            "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2"
        );
    }
    #[test]
    fn rejected_move_leaves_game_untouched() {
        let mut game = Game::new();
        let before = game.clone();
        assert_eq!(
            game.play(coord!("e7"), coord!("e5")),
            Err(PlayError::Move(MoveError::WrongOwner))
        );
        assert_eq!(
            game.play(coord!("e2"), coord!("e5")),
            Err(PlayError::Move(MoveError::IllegalPattern))
        );
        assert_eq!(game, before);
    }
    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = Game::new();
        for (source, target) in [
            (coord!("f2"), coord!("f3")),
            (coord!("e7"), coord!("e5")),
            (coord!("g2"), coord!("g4")),
            (coord!("d8"), coord!("h4")),
        ] {
            game.play(source, target).unwrap();
        }
        let end = GameEnd::Checkmate {
            winner: Color::Black,
        };
        assert_eq!(game.outcome(), Some(end));
        assert_eq!(end.result(), EndState::Win(Color::Black));
        assert!(game.is_in_check());
        assert_eq!(game.history().last().unwrap().notation.to_string(), "Qh4#");
        assert!(game.legal_moves().is_empty());
        assert_eq!(
            game.play(coord!("a2"), coord!("a3")),
            Err(PlayError::GameOver(end))
        );
    }
    #[test]
    fn captures_are_tracked() {
        let mut game: Game = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 5 10".parse().unwrap();
        let record = game.play(coord!("e4"), coord!("d5")).unwrap();
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        assert_eq!(record.captured, Some(pawn));
        assert_eq!(game.captured_by(Color::White), [pawn]);
        assert!(game.captured_by(Color::Black).is_empty());
        assert_eq!(game.half_move(), 0);
        assert_eq!(game.full_move(), 10);
    }
    #[test]
    fn castling_moves_both_pieces_and_revokes_rights() {
        let mut game: Game = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let record = game.play(coord!("e1"), coord!("g1")).unwrap();
        assert_eq!(record.notation.to_string(), "O-O");
        assert_eq!(
            game.board().get(coord!("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert!(game.board().is_empty_at(coord!("h1")));
        assert_eq!(game.castling_rights().to_string(), "kq");
        assert_eq!(game.half_move(), 1);
        game.play(coord!("a8"), coord!("a1")).unwrap();
        assert_eq!(game.castling_rights().to_string(), "k");
        assert!(!game.castling_rights().get(Color::Black, CastlingSide::Queenside));
    }
    #[test]
    fn promotion_becomes_queen() {
        let mut game: Game = "8/P3k3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let record = game.play(coord!("a7"), coord!("a8")).unwrap();
        assert_eq!(record.notation.to_string(), "a8=Q");
        assert_eq!(
            game.board().get(coord!("a8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
    }
    #[test]
    fn disambiguated_play() {
        let mut game: Game = "4k3/8/8/8/8/8/8/R2PK2R w - - 0 1".parse().unwrap();
        let PlayError::Ambiguous { candidates, .. } = game
            .play_piece(PieceKind::Rook, coord!("f1"), None)
            .unwrap_err()
        else {
            panic!("expected an ambiguity");
        };
        assert_eq!(candidates.len(), 2);
        // the a1 rook is listed but blocked by the pawn
        assert_eq!(
            game.play_piece(PieceKind::Rook, coord!("f1"), Some(0)),
            Err(PlayError::Move(MoveError::IllegalPattern))
        );
        assert_eq!(
            game.play_piece(PieceKind::Rook, coord!("f1"), Some(2)),
            Err(PlayError::InvalidChoice {
                choice: 2,
                count: 2
            })
        );
        let record = game
            .play_piece(PieceKind::Rook, coord!("f1"), Some(1))
            .unwrap();
        assert_eq!(record.source, coord!("h1"));
        assert_eq!(record.notation.to_string(), "Rf1");
    }
    #[test]
    fn lone_candidate_plays_directly() {
        let mut game = Game::new();
        let record = game
            .play_piece(PieceKind::Knight, coord!("f3"), None)
            .unwrap();
        assert_eq!(record.source, coord!("g1"));
        assert_eq!(
            game.play_piece(PieceKind::Queen, coord!("a3"), None),
            Err(PlayError::NoCandidate {
                kind: PieceKind::Queen,
                target: coord!("a3")
            })
        );
    }
    #[test]
    fn finished_position_is_detected_on_load() {
        let game: Game = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert_eq!(game.outcome(), Some(GameEnd::Stalemate));
        assert!(game.destinations(coord!("h8")).is_empty());
    }
    #[test]
    fn executor_failures_stay_apart_from_refusals() {
        let error = PlayError::from(ExecuteError::EmptySource(coord!("e1")));
        assert!(matches!(error, PlayError::Execute(_)));
        assert_ne!(error, PlayError::Move(MoveError::NoPieceAtSource));
        assert_eq!(
            error.to_string(),
            "executing a validated move failed: no piece at e1 to relocate"
        );
    }
    #[test]
    fn counters_stop_at_their_maximum() {
        let mut game: Game = "4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1".parse().unwrap();
        game.play(coord!("e1"), coord!("d1")).unwrap();
        assert_eq!(game.half_move(), u32::MAX);
        let mut game: Game = "4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295".parse().unwrap();
        game.play(coord!("e8"), coord!("d8")).unwrap();
        assert_eq!(game.full_move(), u32::MAX);
        assert!(game.fen().to_string().ends_with(" 1 4294967295"));
    }
    #[test]
    fn destinations_of_a_knight() {
        let game = Game::new();
        assert_eq!(game.destinations(coord!("b1")), [coord!("a3"), coord!("c3")]);
        assert_eq!(game.legal_moves().len(), 20);
    }
}
