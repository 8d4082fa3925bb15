use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    coord::Coord,
    fen::Fen,
    game::{Game, PlayError},
};

/// Disagreement between this engine and the `chess` crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
    #[error("{origin}{destination} is accepted but not legal\n{fen}")]
    Extra {
        origin: Coord,
        destination: Coord,
        fen: Fen,
    },
    #[error("{origin}{destination} is legal but not accepted\n{fen}")]
    Missing {
        origin: Coord,
        destination: Coord,
        fen: Fen,
    },
    #[error("the reference engine cannot read\n{fen}")]
    Unreadable { fen: Fen },
    #[error("playing {origin}{destination} failed: {reason}\n{fen}")]
    Play {
        origin: Coord,
        destination: Coord,
        fen: Fen,
        reason: PlayError,
    },
}
impl From<chess::Square> for Coord {
    fn from(value: chess::Square) -> Self {
        let index = value.to_int();
        Coord::new(7 - index / 8, index % 8)
    }
}
/// Moves the reference engine allows, with promotions folded into their
/// source and target and en passant left out.
fn reference_moves(fen: Fen) -> Result<FxHashSet<(Coord, Coord)>, Mismatch> {
    let fen = Fen {
        en_passant_target: None,
        ..fen
    };
    let board: chess::Board = fen
        .to_string()
        .parse()
        .map_err(|_| Mismatch::Unreadable { fen })?;
    Ok(chess::MoveGen::new_legal(&board)
        .map(|movement| (movement.get_source().into(), movement.get_dest().into()))
        .collect())
}
/// Plays `plies` random moves, comparing the legal move set of every
/// position along the way. A finished game starts over.
pub fn fuzz(plies: usize, seed: Option<u64>) -> Result<(), Mismatch> {
    let mut rng = seed.map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);
    let mut game = Game::new();
    for _ in 0..plies {
        let fen = game.fen();
        let moves: FxHashSet<_> = game.legal_moves().into_iter().collect();
        let reference = reference_moves(fen)?;
        if let Some((origin, destination)) = moves.difference(&reference).next().copied() {
            return Err(Mismatch::Extra {
                origin,
                destination,
                fen,
            });
        }
        if let Some((origin, destination)) = reference.difference(&moves).next().copied() {
            return Err(Mismatch::Missing {
                origin,
                destination,
                fen,
            });
        }
        if moves.is_empty() || game.half_move() >= 100 {
            debug!(%fen, "starting over");
            game = Game::new();
            continue;
        }
        let moves: Box<[_]> = moves.into_iter().collect();
        let (origin, destination) = moves[rng.random_range(0..moves.len())];
        game.play(origin, destination)
            .map_err(|reason| Mismatch::Play {
                origin,
                destination,
                fen,
                reason,
            })?;
    }
    info!(plies, "fuzzing found no mismatch");
    Ok(())
}
