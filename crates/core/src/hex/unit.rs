//! Basic units of the hex coordinate system: points, vectors between points,
//! and the six directions that connect neighboring cells.

use crate::BlackBoxError;
use anyhow::Context;
use derive_more::{Add, Display, Neg, Sub};
use serde::{Deserialize, Serialize};
use std::{
    convert::TryFrom,
    fmt::{self, Display},
    ops,
    str::FromStr,
};
use strum::{EnumIter, IntoEnumIterator};

/// A single cell in a hex grid. Each point has an x, y, and z component, and
/// every valid point satisfies `x + y + z = 0`.
///
/// Since z can always be derived from x and y, we only store those two. The
/// components are `i16`s; a grid with a radius beyond 32k would have ~3
/// billion cells, which is well past anything playable.
///
/// Points serialize as a `[x, y, z]` array, and parse from text in the form
/// `x,y,z` (surrounding parens and whitespace are allowed).
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.x()", "self.y()", "self.z()")]
#[serde(try_from = "[i16; 3]", into = "[i16; 3]")]
pub struct HexPoint {
    x: i16,
    y: i16,
}

impl HexPoint {
    pub const ORIGIN: Self = Self::new_xy(0, 0);

    /// Construct a new point from all three components. Returns an error if
    /// the point doesn't fall on the plane `x + y + z = 0`.
    pub fn new(x: i16, y: i16, z: i16) -> anyhow::Result<Self> {
        // Widened so huge components can't overflow their way onto the plane
        if i32::from(x) + i32::from(y) + i32::from(z) != 0 {
            Err(BlackBoxError::InvalidCoordinate(x, y, z).into())
        } else {
            Ok(Self::new_xy(x, y))
        }
    }

    /// Construct a new point with the given x and y. Since x+y+z=0 for all
    /// points, we can derive z from x & y.
    pub const fn new_xy(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> i16 {
        self.x
    }

    pub fn y(self) -> i16 {
        self.y
    }

    pub fn z(self) -> i16 {
        -(self.x + self.y)
    }

    /// Get the cell one step away from this one in the given direction. The
    /// returned point isn't necessarily on any particular grid.
    pub fn adjacent(self, direction: Direction) -> Self {
        self + direction.delta()
    }

    /// Get an iterator of all the points directly adjacent to this one, in
    /// direction order. The iterator will always contain exactly 6 values.
    pub fn adjacents(self) -> impl Iterator<Item = HexPoint> {
        Direction::iter().map(move |dir| self.adjacent(dir))
    }

    /// Calculate the path distance between two cells, meaning the number of
    /// hops it takes to get from one to the other. 0 if the points are equal,
    /// 1 if the cells are adjacent, etc.
    pub fn distance_to(self, other: HexPoint) -> usize {
        // https://www.redblobgames.com/grids/hexagons/#distances
        let diff = other - self;
        ((diff.x.abs() + diff.y.abs() + diff.z.abs()) / 2) as usize
    }

    /// The largest absolute component of this point, which is also its
    /// distance from the origin.
    pub fn ring(self) -> u16 {
        self.x()
            .unsigned_abs()
            .max(self.y().unsigned_abs())
            .max(self.z().unsigned_abs())
    }
}

impl TryFrom<[i16; 3]> for HexPoint {
    type Error = anyhow::Error;

    fn try_from([x, y, z]: [i16; 3]) -> Result<Self, Self::Error> {
        Self::new(x, y, z)
    }
}

impl From<HexPoint> for [i16; 3] {
    fn from(point: HexPoint) -> Self {
        [point.x(), point.y(), point.z()]
    }
}

impl FromStr for HexPoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let components = trimmed
            .split(',')
            .map(|component| {
                component.trim().parse::<i16>().with_context(|| {
                    format!("invalid coordinate component {:?}", component)
                })
            })
            .collect::<anyhow::Result<Vec<i16>>>()?;
        match components.as_slice() {
            &[x, y, z] => Self::new(x, y, z),
            _ => Err(anyhow::anyhow!(
                "expected 3 components in coordinate {:?}, got {}",
                s,
                components.len()
            )),
        }
    }
}

impl ops::Add<HexVector> for HexPoint {
    type Output = HexPoint;

    fn add(self, rhs: HexVector) -> Self::Output {
        // Vectors always sum to zero, so the result is still on the plane
        Self::new_xy(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::Sub<HexPoint> for HexPoint {
    type Output = HexVector;

    fn sub(self, rhs: HexPoint) -> Self::Output {
        HexVector {
            x: self.x() - rhs.x(),
            y: self.y() - rhs.y(),
            z: self.z() - rhs.z(),
        }
    }
}

/// A translation between two points. Vectors can only be created by
/// subtracting two points or from a [Direction], so their components always
/// sum to zero too, meaning any point plus any vector is still a valid point.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Add, Sub, Neg,
)]
#[display(fmt = "({}, {}, {})", x, y, z)]
pub struct HexVector {
    x: i16,
    y: i16,
    z: i16,
}

impl HexVector {
    const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    pub fn x(self) -> i16 {
        self.x
    }

    pub fn y(self) -> i16 {
        self.y
    }

    pub fn z(self) -> i16 {
        self.z
    }
}

/// The 6 directions in which a ray can travel from one cell to a neighbor.
/// Each direction is named by its angle. The variants are listed in cycle
/// order, and every direction's neighbors in the cycle are 60° away from it.
///
/// Directions serialize as their angle in degrees.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub enum Direction {
    Deg0,
    Deg60,
    Deg120,
    Deg180,
    Deg240,
    Deg300,
}

impl Direction {
    /// Number of directions in the cycle
    pub const COUNT: usize = 6;

    /// All directions in cycle order, starting at 0°
    pub const ALL: [Self; Self::COUNT] = [
        Self::Deg0,
        Self::Deg60,
        Self::Deg120,
        Self::Deg180,
        Self::Deg240,
        Self::Deg300,
    ];

    /// Position of this direction within [Self::ALL]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn degrees(self) -> u16 {
        self.index() as u16 * 60
    }

    /// The single-step translation that moves a point one cell in this
    /// direction.
    pub fn delta(self) -> HexVector {
        match self {
            Self::Deg0 => HexVector::new(-1, 0, 1),
            Self::Deg60 => HexVector::new(0, -1, 1),
            Self::Deg120 => HexVector::new(1, -1, 0),
            Self::Deg180 => HexVector::new(1, 0, -1),
            Self::Deg240 => HexVector::new(0, 1, -1),
            Self::Deg300 => HexVector::new(-1, 1, 0),
        }
    }

    /// Find the direction whose delta is exactly the given vector, if any.
    /// Only vectors between adjacent cells have a direction.
    pub fn from_vector(vector: HexVector) -> Option<Self> {
        Self::iter().find(|dir| dir.delta() == vector)
    }

    /// Rotate this direction by some number of 60° steps. Positive steps move
    /// forward through the cycle (0° -> 60°), negative steps move backward.
    /// Any number of steps is allowed; they wrap around.
    pub fn rotate(self, steps: i8) -> Self {
        let index =
            (self.index() as i16 + steps as i16).rem_euclid(Self::COUNT as i16);
        Self::ALL[index as usize]
    }

    /// Get the direction that is directly opposite this one
    pub fn opposite(self) -> Self {
        self.rotate(3)
    }

    /// Number of forward steps needed to rotate this direction onto `other`,
    /// in the range `0..6`.
    pub fn steps_to(self, other: Self) -> usize {
        (other.index() + Self::COUNT - self.index()) % Self::COUNT
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl TryFrom<u16> for Direction {
    type Error = BlackBoxError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        if degrees % 60 == 0 {
            Self::ALL
                .get(degrees as usize / 60)
                .copied()
                .ok_or(BlackBoxError::UnknownDirection(degrees))
        } else {
            Err(BlackBoxError::UnknownDirection(degrees))
        }
    }
}

impl From<Direction> for u16 {
    fn from(direction: Direction) -> Self {
        direction.degrees()
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees = s
            .trim()
            .trim_end_matches('°')
            .parse::<u16>()
            .with_context(|| format!("invalid direction {:?}", s))?;
        Ok(Self::try_from(degrees)?)
    }
}
