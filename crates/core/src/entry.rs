use crate::{
    hex::{Direction, DirectionSet, HexPoint, HexPointIndexMap},
    HexGrid,
};
use anyhow::{anyhow, Context};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A place on the edge of the grid where a ray can be fired in, or where one
/// can come back out. The direction always points into the grid, so an exit
/// marker is the same entry point that would fire a ray back along the path
/// it came from.
///
/// Parses from text in the form `x,y,z@degrees`, e.g. `4,-4,0@300`.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{} @ {}", hex, direction)]
pub struct EntryPoint {
    pub hex: HexPoint,
    pub direction: Direction,
}

impl EntryPoint {
    pub fn new(hex: HexPoint, direction: Direction) -> Self {
        Self { hex, direction }
    }
}

impl FromStr for EntryPoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hex, direction) = s.split_once('@').ok_or_else(|| {
            anyhow!("expected entry point like x,y,z@degrees, got {:?}", s)
        })?;
        let context = || format!("invalid entry point {:?}", s);
        Ok(Self {
            hex: hex.parse().with_context(context)?,
            direction: direction.parse().with_context(context)?,
        })
    }
}

/// Every legal entry point on a grid, grouped by boundary cell. This is a pure
/// function of the grid, computed once.
#[derive(Clone, Debug)]
pub struct EntryPointTable {
    entries: HexPointIndexMap<DirectionSet>,
}

impl EntryPointTable {
    pub fn new(grid: &HexGrid) -> Self {
        let entries = grid
            .boundary_cells()
            .map(|cell| (cell, grid.boundary_directions(cell)))
            .collect();
        Self { entries }
    }

    /// All entry points, boundary cell by boundary cell in grid order
    pub fn all(&self) -> impl Iterator<Item = EntryPoint> + '_ {
        self.entries.iter().flat_map(|(&hex, directions)| {
            directions
                .iter()
                .map(move |&direction| EntryPoint::new(hex, direction))
        })
    }

    /// Total number of entry points. Every edge cell has two and every
    /// corner has three, which works out to `12r+6`.
    pub fn len(&self) -> usize {
        self.entries.values().map(DirectionSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_entry_point(&self, hex: HexPoint, direction: Direction) -> bool {
        self.directions_at(hex)
            .map_or(false, |directions| directions.contains(&direction))
    }

    pub fn contains(&self, entry_point: EntryPoint) -> bool {
        self.is_entry_point(entry_point.hex, entry_point.direction)
    }

    /// The directions that can be fired from a cell. `None` if the cell isn't
    /// on the boundary.
    pub fn directions_at(&self, hex: HexPoint) -> Option<&DirectionSet> {
        self.entries.get(&hex)
    }

    /// Get the marker for a ray that leaves the grid from `hex` while
    /// travelling in direction `travel`. The marker faces back into the grid.
    pub fn exit_for(&self, hex: HexPoint, travel: Direction) -> EntryPoint {
        let exit = EntryPoint::new(hex, travel.opposite());
        debug_assert!(
            self.contains(exit),
            "exit {} is not in the entry point table",
            exit
        );
        exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_point_count() {
        let table = EntryPointTable::new(&HexGrid::new(4).unwrap());
        assert_eq!(table.len(), 54);
        assert_eq!(table.all().count(), 54);
        assert_eq!(table.entries.len(), 24);

        for radius in 1..=10 {
            let table = EntryPointTable::new(&HexGrid::new(radius).unwrap());
            assert_eq!(table.len(), 12 * radius as usize + 6);
        }
    }

    #[test]
    fn test_no_duplicates() {
        let table = EntryPointTable::new(&HexGrid::new(4).unwrap());
        let mut all: Vec<EntryPoint> = table.all().collect();
        let len = all.len();
        all.sort_by_key(|entry| {
            (entry.hex.x(), entry.hex.y(), entry.direction)
        });
        all.dedup();
        assert_eq!(all.len(), len);
    }

    #[test]
    fn test_is_entry_point() {
        let table = EntryPointTable::new(&HexGrid::new(4).unwrap());
        let corner = HexPoint::new_xy(4, -4);
        assert!(table.is_entry_point(corner, Direction::Deg0));
        assert!(table.is_entry_point(corner, Direction::Deg240));
        assert!(table.is_entry_point(corner, Direction::Deg300));
        assert!(!table.is_entry_point(corner, Direction::Deg180));
        assert!(!table.is_entry_point(HexPoint::ORIGIN, Direction::Deg0));
        assert_eq!(table.directions_at(HexPoint::ORIGIN), None);
    }

    #[test]
    fn test_exit_for() {
        let table = EntryPointTable::new(&HexGrid::new(4).unwrap());
        // Leaving the top-right corner travelling at 0° leaves a 180° marker
        assert_eq!(
            table.exit_for(HexPoint::new_xy(0, -4), Direction::Deg0),
            EntryPoint::new(HexPoint::new_xy(0, -4), Direction::Deg180)
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "4,-4,0@300".parse::<EntryPoint>().unwrap(),
            EntryPoint::new(HexPoint::new_xy(4, -4), Direction::Deg300)
        );
        assert_eq!(
            "(-4, 0, 4) @ 180".parse::<EntryPoint>().unwrap(),
            EntryPoint::new(HexPoint::new_xy(-4, 0), Direction::Deg180)
        );
        assert!("4,-4,0".parse::<EntryPoint>().is_err());
        assert!("4,-4,0@90".parse::<EntryPoint>().is_err());
        assert!("4,-4,1@0".parse::<EntryPoint>().is_err());
        assert!("32767,32767,2@0".parse::<EntryPoint>().is_err());
        assert_eq!(
            EntryPoint::new(HexPoint::new_xy(4, -4), Direction::Deg300)
                .to_string(),
            "(4, -4, 0) @ 300°"
        );
    }
}
