use crate::{EntryPoint, HexPoint};
use derive_more::Display;

/// Everything that can go wrong while setting up or playing a game. Public
/// operations return [anyhow::Result], with one of these as the underlying
/// error, so callers that care about the failure type can
/// [downcast](anyhow::Error::downcast_ref) to it.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum BlackBoxError {
    #[display(
        fmt = "invalid grid radius {}; must be between 1 and {}",
        _0,
        "crate::grid::MAX_RADIUS"
    )]
    InvalidRadius(u16),

    #[display(
        fmt = "grid has {} cells, but at least {} are needed to place atoms",
        cells,
        required
    )]
    GridTooSmall { cells: usize, required: usize },

    #[display(fmt = "expected exactly {} atoms, got {}", expected, actual)]
    WrongAtomCount { expected: usize, actual: usize },

    #[display(fmt = "atom {} is listed more than once", _0)]
    DuplicateAtom(HexPoint),

    #[display(
        fmt = "invalid coordinate ({}, {}, {}); x+y+z must be 0",
        _0,
        _1,
        _2
    )]
    InvalidCoordinate(i16, i16, i16),

    #[display(fmt = "unknown direction {}°", _0)]
    UnknownDirection(u16),

    #[display(fmt = "{} is not an entry point", _0)]
    NotAnEntryPoint(EntryPoint),

    #[display(fmt = "entry point {} has already been used", _0)]
    EntryPointUsed(EntryPoint),

    #[display(fmt = "cell {} is not on the grid", _0)]
    OffGrid(HexPoint),

    #[display(fmt = "can't guess more than {} atoms", _0)]
    TooManyGuesses(usize),

    #[display(
        fmt = "need exactly {} atom guesses to finish, have {}",
        expected,
        actual
    )]
    WrongGuessCount { expected: usize, actual: usize },

    #[display(fmt = "game is already over")]
    GameOver,
}

impl std::error::Error for BlackBoxError {}
