use std::{
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    num::ParseIntError,
    str::FromStr,
};

use thiserror::Error;

use crate::{
    coord::{Coord, ParseCoordError},
    fen::{Fen, ParseFenError},
    fuzz::fuzz,
    game::{Game, PlayError},
    misc::strip_prefix_token,
    piece::{ParsePieceError, PieceKind},
};

const DEFAULT_FUZZ_PLIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Reset,
    Quit,
    Import(Fen),
    ExportFen,
    History,
    Moves,
    Coord(Coord),
    Move(Coord, Coord),
    Piece {
        kind: PieceKind,
        target: Coord,
        choice: Option<usize>,
    },
    Fuzz(usize),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Reset => write!(f, "reset")?,
            Input::Quit => write!(f, "exit")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::History => write!(f, "history")?,
            Input::Moves => write!(f, "moves")?,
            Input::Coord(position) => write!(f, "{position}")?,
            Input::Move(source, target) => write!(f, "{source}{target}")?,
            Input::Piece {
                kind,
                target,
                choice,
            } => {
                write!(f, "{} {target}", kind.uppercase())?;
                if let Some(choice) = choice {
                    write!(f, " {choice}")?;
                }
            }
            Input::Fuzz(plies) => write!(f, "fuzz {plies}")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "reset" => Ok(Input::Reset),
            "exit" | "quit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            "history" => Ok(Input::History),
            "moves" => Ok(Input::Moves),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "fuzz") {
                    if s.is_empty() {
                        Ok(Input::Fuzz(DEFAULT_FUZZ_PLIES))
                    } else {
                        Ok(Input::Fuzz(s.parse()?))
                    }
                } else if let Ok(position) = s.parse() {
                    Ok(Input::Coord(position))
                } else if s.len() == 4 && s.is_ascii() && !s.contains(char::is_whitespace) {
                    Ok(Input::Move(s[..2].parse()?, s[2..].parse()?))
                } else {
                    parse_piece_input(s)
                }
            }
        }
    }
}
fn parse_piece_input(s: &str) -> Result<Input, ParseInputError> {
    let mut tokens = s.split_whitespace();
    let kind = tokens.next().unwrap_or_default().parse()?;
    let target = tokens
        .next()
        .ok_or_else(|| ParseInputError::Unknown(s.to_owned()))?
        .parse()?;
    let choice = tokens.next().map(str::parse).transpose()?;
    if tokens.next().is_some() {
        return Err(ParseInputError::Unknown(s.to_owned()));
    }
    Ok(Input::Piece {
        kind,
        target,
        choice,
    })
}
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum ParseInputError {
    #[error(transparent)]
    Fen(#[from] ParseFenError),
    #[error(transparent)]
    Coord(#[from] ParseCoordError),
    #[error(transparent)]
    Piece(#[from] ParsePieceError),
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error("unrecognized input `{0}`")]
    Unknown(String),
}
fn status(game: &Game) -> String {
    match game.outcome() {
        Some(end) => format!("{end} ({})", end.result().code()),
        None if game.is_in_check() => format!("{} plays, in check", game.current_player()),
        None => format!("{} plays", game.current_player()),
    }
}
#[allow(
    clippy::too_many_lines,
    reason = "further decomposition could potentially hurt readability"
)]
pub fn repl(mut game: Game) -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();
    let mut update = true;
    let mut first_time = true;
    loop {
        if update {
            writeln!(output, "{}", game.fen())?;
            writeln!(output, "{}", status(&game))?;
            update = false;
        }
        if first_time {
            writeln!(output, "type `help` for instructions")?;
            first_time = false;
        }
        write!(output, "> ")?;
        output.flush()?;
        let Some(text) = lines.next() else {
            return Ok(());
        };
        let input = match text?.trim().parse() {
            Ok(input) => input,
            Err(err) => {
                writeln!(error, "Error: {err}")?;
                writeln!(error, "for available command, enter `help`")?;
                continue;
            }
        };
        match input {
            Input::Help => {
                writeln!(output, "reset          - reset to starting position")?;
                writeln!(output, "exit           - exit the game")?;
                writeln!(output, "import <fen>   - import a position")?;
                writeln!(output, "fen            - export the position as fen")?;
                writeln!(output, "history        - list the moves played")?;
                writeln!(output, "moves          - list every legal move")?;
                writeln!(output, "e2             - view valid moves")?;
                writeln!(output, "e2e4           - play the move")?;
                writeln!(output, "e1g1           - perform castling")?;
                writeln!(output, "N f3 [choice]  - play the knight that reaches f3")?;
                writeln!(output, "fuzz [plies]   - compare random games with the chess crate")?;
            }
            Input::Reset => {
                game = Game::new();
                update = true;
            }
            Input::Quit => return Ok(()),
            Input::Import(fen) => {
                game = Game::from_fen(fen);
                update = true;
            }
            Input::ExportFen => writeln!(output, "{}", game.fen())?,
            Input::History => {
                for (i, pair) in game.history().chunks(2).enumerate() {
                    write!(output, "{}.", i + 1)?;
                    for record in pair {
                        write!(output, " {}", record.notation)?;
                    }
                    writeln!(output)?;
                }
            }
            Input::Moves => {
                for (source, target) in game.legal_moves() {
                    write!(output, "{source}{target} ")?;
                }
                writeln!(output)?;
            }
            Input::Coord(position) => match game.board().get(position) {
                Some(piece) if piece.color != game.current_player() => {
                    writeln!(error, "Error: It is {}'s turn", game.current_player())?;
                }
                Some(_) => {
                    for target in game.destinations(position) {
                        write!(output, "{target} ")?;
                    }
                    writeln!(output)?;
                }
                None => writeln!(error, "Error: No piece found on {position}")?,
            },
            Input::Move(source, target) => match game.play(source, target) {
                Ok(record) => {
                    writeln!(output, "{}", record.notation)?;
                    update = true;
                }
                Err(err) => writeln!(error, "Error: {err}")?,
            },
            Input::Piece {
                kind,
                target,
                choice,
            } => match game.play_piece(kind, target, choice) {
                Ok(record) => {
                    writeln!(output, "{}", record.notation)?;
                    update = true;
                }
                Err(PlayError::Ambiguous { target, candidates }) => {
                    writeln!(error, "Error: several pieces can reach {target}")?;
                    for (i, candidate) in candidates.iter().enumerate() {
                        writeln!(error, "  {i}: {} on {}", candidate.piece, candidate.source)?;
                    }
                    writeln!(
                        error,
                        "repeat the move followed by a choice, e.g. `{}`",
                        Input::Piece {
                            kind,
                            target,
                            choice: Some(0)
                        }
                    )?;
                }
                Err(err) => writeln!(error, "Error: {err}")?,
            },
            Input::Fuzz(plies) => match fuzz(plies, None) {
                Ok(()) => writeln!(output, "no mismatch in {plies} plies")?,
                Err(mismatch) => writeln!(error, "Error: {mismatch}")?,
            },
        }
    }
}
