//! Presentation of a game board. The core never draws anything itself; it
//! reports what should be painted through a [BoardView], and the embedding
//! application decides what that looks like. [TextBoard] is a simple view
//! that renders the board as text.

mod text;

pub use text::TextBoard;

use crate::{EntryPoint, HexPoint};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Semantic color of a board cell. Each ray outcome gets its own color, and
/// atoms get one more color when they're revealed.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CellColor {
    /// Ray passed through without meeting an atom
    Miss,
    /// Ray was absorbed
    Hit,
    /// Ray came out after a single deflection
    Deflected,
    /// Ray came out after several deflections, the last one single
    MultiDeflected,
    /// Ray came out after a double deflection
    DoubleDeflected,
    /// Ray came straight back out
    Reversal,
    /// Ray's entry cell was an atom or next to one
    OriginCollision,
    /// A revealed atom
    Atom,
}

impl CellColor {
    /// Name of the display color
    pub fn color_name(self) -> &'static str {
        match self {
            Self::Miss => "purple",
            Self::Hit => "green",
            Self::Deflected => "blue",
            Self::MultiDeflected => "deep pink",
            Self::DoubleDeflected => "brown",
            Self::Reversal => "yellow",
            Self::OriginCollision => "white",
            Self::Atom => "red",
        }
    }

    /// RGB hex code of the display color, e.g. `#800080`
    pub fn hex_code(self) -> &'static str {
        match self {
            Self::Miss => "#800080",
            Self::Hit => "#008000",
            Self::Deflected => "#0000ff",
            Self::MultiDeflected => "#ff1493",
            Self::DoubleDeflected => "#a52a2a",
            Self::Reversal => "#ffff00",
            Self::OriginCollision => "#ffffff",
            Self::Atom => "#ff0000",
        }
    }

    /// One-character symbol used in text renderings
    pub fn symbol(self) -> char {
        match self {
            Self::Miss => 'P',
            Self::Hit => 'G',
            Self::Deflected => 'B',
            Self::MultiDeflected => 'K',
            Self::DoubleDeflected => 'N',
            Self::Reversal => 'Y',
            Self::OriginCollision => 'W',
            Self::Atom => 'X',
        }
    }

    /// Player-facing explanation of what the color means
    pub fn description(self) -> &'static str {
        match self {
            Self::Miss => "the ray passed through without touching an atom",
            Self::Hit => "the ray hit an atom head-on and was absorbed",
            Self::Deflected => "the ray was deflected once by a single atom",
            Self::MultiDeflected => {
                "the ray was deflected more than once before exiting"
            }
            Self::DoubleDeflected => {
                "the ray passed between two atoms and turned 120°"
            }
            Self::Reversal => {
                "the ray met two atoms at once and came back where it entered"
            }
            Self::OriginCollision => {
                "an atom is on or right next to the entry cell"
            }
            Self::Atom => "a hidden atom",
        }
    }
}

/// Something that can display a board. A game calls into its view whenever a
/// cell changes color or an exit marker gets used up.
pub trait BoardView {
    /// Paint a cell. Later paints on the same cell replace earlier ones.
    fn color_cell(&mut self, hex: HexPoint, color: CellColor);

    /// A ray came out at this marker, so it can't be fired anymore. Views
    /// with no markers can ignore this.
    fn mark_exit_used(&mut self, _exit: EntryPoint) {}
}
