//! BlackBox is a deduction puzzle played on a hexagonal grid. Six atoms are
//! hidden somewhere on the board, and the player locates them by firing rays
//! in from the edges and watching what comes out. Rays are absorbed by atoms
//! they run into, deflected by atoms they pass close to, and sent straight
//! back when they try to squeeze between two atoms.
//!
//! This crate contains the game engine. Drawing the board is left to the
//! embedding application, via the [BoardView] trait.
//!
//! ```
//! use blackbox::{Game, GameConfig, TextBoard};
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! let mut board = TextBoard::new(game.grid());
//! let entry = game.entry_points().all().next().unwrap();
//! let encounter = game.fire(entry, &mut board).unwrap();
//! println!("{:?}", encounter.kind());
//! println!("{}", board);
//! ```
//!
//! See [GameConfig] for the options a game can be started with.

mod atom;
mod config;
mod entry;
mod error;
mod game;
mod grid;
pub mod hex;
mod ray;
mod render;
mod score;
mod util;

pub use crate::{
    atom::{AtomLayout, ATOM_COUNT},
    config::{GameConfig, Seed},
    entry::{EntryPoint, EntryPointTable},
    error::BlackBoxError,
    game::Game,
    grid::{HexGrid, MAX_RADIUS},
    hex::{Direction, HexPoint},
    ray::{
        classify, Collision, Encounter, EncounterKind, RayTracer,
        RelativeOffset, Side, Termination,
    },
    render::{BoardView, CellColor, TextBoard},
    score::{Score, ScoreKeeper, MISSED_ATOM_PENALTY},
    util::grid_len,
};
