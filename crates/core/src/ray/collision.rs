//! Classifies how the atoms around a cell affect a ray passing through it.

use crate::{
    hex::{Direction, HexPoint},
    AtomLayout,
};
use log::warn;

/// Where an atom sits relative to a travelling ray, named from the ray's
/// point of view. "Right" is one forward step through the direction cycle
/// from the travel direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RelativeOffset {
    Ahead,
    FrontRight,
    RearRight,
    Behind,
    RearLeft,
    FrontLeft,
}

use RelativeOffset::*;

/// `RELATIVE_OFFSETS[travel][offset]` is where an atom in direction `offset`
/// from the ray's cell sits, for a ray travelling in direction `travel`. Both
/// indexes are [Direction::index].
#[rustfmt::skip]
const RELATIVE_OFFSETS: [[RelativeOffset; 6]; 6] = [
    [Ahead, FrontRight, RearRight, Behind, RearLeft, FrontLeft],
    [FrontLeft, Ahead, FrontRight, RearRight, Behind, RearLeft],
    [RearLeft, FrontLeft, Ahead, FrontRight, RearRight, Behind],
    [Behind, RearLeft, FrontLeft, Ahead, FrontRight, RearRight],
    [RearRight, Behind, RearLeft, FrontLeft, Ahead, FrontRight],
    [FrontRight, RearRight, Behind, RearLeft, FrontLeft, Ahead],
];

impl RelativeOffset {
    /// Look up where an atom in direction `offset` sits for a ray travelling
    /// in direction `travel`
    pub fn of(travel: Direction, offset: Direction) -> Self {
        RELATIVE_OFFSETS[travel.index()][offset.index()]
    }

    pub fn side(self) -> Option<Side> {
        match self {
            FrontRight | RearRight => Some(Side::Right),
            FrontLeft | RearLeft => Some(Side::Left),
            Ahead | Behind => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Rotation steps that turn a ray away from this side
    fn away(self) -> i8 {
        match self {
            Self::Right => -1,
            Self::Left => 1,
        }
    }
}

/// What happens to a ray at a single cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    /// No atom nearby, or none that changes anything. Keep going.
    None,
    /// The next cell is an atom. The ray is absorbed.
    DirectHit,
    /// Atoms on both front flanks. The ray goes back the way it came.
    Reversal,
    /// The ray turns by some number of 60° steps. `double` is set when more
    /// than one atom caused the turn.
    Turn { steps: i8, double: bool },
}

/// Decide what happens to a ray standing on `hex` and travelling in
/// `travel`. This only looks at the atoms whose range contains `hex`.
pub fn classify(
    atoms: &AtomLayout,
    hex: HexPoint,
    travel: Direction,
) -> Collision {
    let neighbors = atoms.neighboring_atoms_of(hex);
    let offsets: Vec<RelativeOffset> = neighbors
        .iter()
        .filter_map(|&atom| Direction::from_vector(atom - hex))
        .map(|offset| RelativeOffset::of(travel, offset))
        .collect();

    match offsets.as_slice() {
        [] => Collision::None,
        [Ahead] => Collision::DirectHit,
        [single] => match single.side() {
            Some(side) => Collision::Turn {
                steps: side.away(),
                double: false,
            },
            None => {
                // Only reachable if the ray is standing on an atom
                debug_assert!(false, "lone atom behind ray at {}", hex);
                unmatched(atoms, hex, travel, &offsets)
            }
        },
        _ => {
            if offsets.contains(&FrontLeft) && offsets.contains(&FrontRight) {
                return Collision::Reversal;
            }
            match double_side(&offsets) {
                Some(side) => Collision::Turn {
                    steps: 2 * side.away(),
                    double: true,
                },
                None => unmatched(atoms, hex, travel, &offsets),
            }
        }
    }
}

/// The side a group of atoms turns a ray away from, if they're all on one
/// side. An atom straight ahead joins the side of the front flank atom next
/// to it; with no front flank atom beside it, there's no side.
fn double_side(offsets: &[RelativeOffset]) -> Option<Side> {
    let on = |side| offsets.iter().any(|offset| offset.side() == Some(side));
    let side = match (on(Side::Left), on(Side::Right)) {
        (true, false) => Side::Left,
        (false, true) => Side::Right,
        _ => return None,
    };
    let beside_ahead = match side {
        Side::Left => FrontLeft,
        Side::Right => FrontRight,
    };
    if offsets.contains(&Ahead) && !offsets.contains(&beside_ahead) {
        return None;
    }
    Some(side)
}

/// Fallback for atom arrangements that don't match any deflection rule. The
/// ray is absorbed if it's about to run into an atom, otherwise it carries on
/// unaffected.
fn unmatched(
    atoms: &AtomLayout,
    hex: HexPoint,
    travel: Direction,
    offsets: &[RelativeOffset],
) -> Collision {
    if atoms.is_atom(hex.adjacent(travel)) {
        Collision::DirectHit
    } else {
        warn!(
            "No deflection rule for atoms at {:?} around {} (travelling {})",
            offsets, hex, travel
        );
        Collision::None
    }
}
