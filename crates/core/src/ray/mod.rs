//! Ray propagation. A ray is fired from an [EntryPoint] and walks the grid
//! one cell at a time, turning, reversing, or getting absorbed according to
//! the atoms it passes. The result of a single ray is an [Encounter].

mod collision;

pub use collision::{classify, Collision, RelativeOffset, Side};

use crate::{
    hex::{Direction, HexPoint, HexPointSet},
    AtomLayout, BlackBoxError, CellColor, EntryPoint, EntryPointTable, HexGrid,
};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

/// The overall category of what happened to a ray. Every finished ray has
/// exactly one of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EncounterKind {
    /// Passed straight through without meeting any atom
    NoEncounter,
    /// Absorbed by an atom (or collided with one at the entry cell)
    DirectHit,
    /// Came out after being turned, most recently by a single atom
    Deflection,
    /// Most recently turned by two atoms at once. If the two atoms sat on
    /// both front flanks, the ray was sent straight back (`reversed`).
    DoubleHit { reversed: bool },
}

/// How a ray's travel ended
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Termination {
    /// Left the grid. Holds the exit marker, which faces back into the grid.
    Exited { exit: EntryPoint },
    /// Ran into an atom
    Absorbed { atom: HexPoint },
    /// Sent back out the way it came
    Reversed,
    /// The entry cell itself is an atom or borders one
    OriginCollision,
    /// Never resolved within the step budget. Shouldn't happen for any real
    /// layout, but it's better than looping forever.
    Trapped,
}

/// The full record of one fired ray
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    entry: EntryPoint,
    kind: EncounterKind,
    termination: Termination,
    final_hex: HexPoint,
    deflections: usize,
    path: Vec<HexPoint>,
    directions: Vec<Direction>,
}

impl Encounter {
    /// Where the ray was fired from
    pub fn entry(&self) -> EntryPoint {
        self.entry
    }

    pub fn kind(&self) -> EncounterKind {
        self.kind
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// The cell the ray finished on: the exit cell, the atom that absorbed
    /// it, or the entry cell for reversals and origin collisions
    pub fn final_hex(&self) -> HexPoint {
        self.final_hex
    }

    /// Number of turns the ray took, counting 60° and 120° turns as one each
    pub fn deflections(&self) -> usize {
        self.deflections
    }

    /// Every cell the ray visited, in order, starting at the entry cell.
    /// Cells where the ray turned only appear once.
    pub fn path(&self) -> &[HexPoint] {
        &self.path
    }

    /// Every direction the ray travelled in, in order, starting with the
    /// entry direction
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// The exit marker, if the ray came out somewhere other than where it
    /// went in
    pub fn exit(&self) -> Option<EntryPoint> {
        match self.termination {
            Termination::Exited { exit } => Some(exit),
            _ => None,
        }
    }

    /// The color this encounter paints on the board
    pub fn color(&self) -> CellColor {
        match (self.termination, self.kind) {
            (Termination::OriginCollision, _) => CellColor::OriginCollision,
            (_, EncounterKind::NoEncounter) => CellColor::Miss,
            (_, EncounterKind::DirectHit) => CellColor::Hit,
            (_, EncounterKind::Deflection) if self.deflections > 1 => {
                CellColor::MultiDeflected
            }
            (_, EncounterKind::Deflection) => CellColor::Deflected,
            (_, EncounterKind::DoubleHit { reversed: true }) => {
                CellColor::Reversal
            }
            (_, EncounterKind::DoubleHit { reversed: false }) => {
                CellColor::DoubleDeflected
            }
        }
    }

    /// The cells this encounter paints. Rays that exit paint both ends, all
    /// others only paint the entry cell.
    pub fn painted_cells(&self) -> Vec<(HexPoint, CellColor)> {
        let color = self.color();
        let mut cells = vec![(self.entry.hex, color)];
        if let Some(exit) = self.exit() {
            if exit.hex != self.entry.hex {
                cells.push((exit.hex, color));
            }
        }
        cells
    }
}

/// Transient state of a ray in flight
struct RayState {
    entry: EntryPoint,
    position: HexPoint,
    direction: Direction,
    deflections: usize,
    /// Whether the most recent turn was caused by two atoms
    last_turn_double: Option<bool>,
    /// Cells where the ray just turned. The ray skips collision checks the
    /// next time it stands on one of these, so it can leave the cell in its
    /// new direction.
    ignored: HexPointSet,
    path: Vec<HexPoint>,
    directions: Vec<Direction>,
}

impl RayState {
    fn new(entry: EntryPoint) -> Self {
        Self {
            entry,
            position: entry.hex,
            direction: entry.direction,
            deflections: 0,
            last_turn_double: None,
            ignored: HexPointSet::default(),
            path: vec![entry.hex],
            directions: vec![entry.direction],
        }
    }

    fn turn(&mut self, steps: i8, double: bool) {
        let old = self.direction;
        self.direction = self.direction.rotate(steps);
        self.deflections += 1;
        self.last_turn_double = Some(double);
        self.ignored.insert(self.position);
        self.directions.push(self.direction);
        debug!(
            "Ray from {} deflected at {} from {} to {}",
            self.entry, self.position, old, self.direction
        );
    }

    fn advance(&mut self, next: HexPoint) {
        trace!("Ray from {} moved to {}", self.entry, next);
        self.position = next;
        self.path.push(next);
    }

    fn finish(self, termination: Termination) -> Encounter {
        let (kind, final_hex) = match termination {
            Termination::Exited { exit } => {
                let kind = match self.last_turn_double {
                    None => EncounterKind::NoEncounter,
                    Some(false) => EncounterKind::Deflection,
                    Some(true) => EncounterKind::DoubleHit { reversed: false },
                };
                (kind, exit.hex)
            }
            Termination::Absorbed { atom } => (EncounterKind::DirectHit, atom),
            Termination::Reversed => {
                (EncounterKind::DoubleHit { reversed: true }, self.entry.hex)
            }
            Termination::OriginCollision => {
                (EncounterKind::DirectHit, self.entry.hex)
            }
            Termination::Trapped => (EncounterKind::DirectHit, self.position),
        };
        debug!("Ray from {} resolved as {:?}", self.entry, termination);
        Encounter {
            entry: self.entry,
            kind,
            termination,
            final_hex,
            deflections: self.deflections,
            path: self.path,
            directions: self.directions,
        }
    }
}

/// Traces rays through a fixed board. The tracer only borrows the board, so
/// any number of rays can be traced from it, including from multiple threads
/// at once.
#[derive(Copy, Clone, Debug)]
pub struct RayTracer<'a> {
    grid: &'a HexGrid,
    atoms: &'a AtomLayout,
    entry_points: &'a EntryPointTable,
}

impl<'a> RayTracer<'a> {
    pub fn new(
        grid: &'a HexGrid,
        atoms: &'a AtomLayout,
        entry_points: &'a EntryPointTable,
    ) -> Self {
        Self {
            grid,
            atoms,
            entry_points,
        }
    }

    /// Fire a ray and follow it until it resolves. Fails only if the given
    /// entry point isn't in the entry point table.
    pub fn fire(&self, entry: EntryPoint) -> anyhow::Result<Encounter> {
        if !self.entry_points.contains(entry) {
            return Err(BlackBoxError::NotAnEntryPoint(entry).into());
        }

        let mut state = RayState::new(entry);
        if self.atoms.is_atom(entry.hex) || self.atoms.is_in_range(entry.hex) {
            return Ok(state.finish(Termination::OriginCollision));
        }

        // A ray can't visit the same cell in the same direction twice without
        // looping forever, so this is a hard upper bound
        let budget = self.grid.len() * Direction::COUNT;
        for _ in 0..budget {
            let hex = state.position;
            if !state.ignored.remove(&hex) {
                match classify(self.atoms, hex, state.direction) {
                    Collision::None => {}
                    Collision::DirectHit => {
                        let atom = hex.adjacent(state.direction);
                        return Ok(state.finish(Termination::Absorbed { atom }));
                    }
                    Collision::Reversal => {
                        return Ok(state.finish(Termination::Reversed));
                    }
                    Collision::Turn { steps, double } => {
                        // The cell is now ignored, so the next step leaves
                        // it in the new direction without classifying again
                        state.turn(steps, double);
                        continue;
                    }
                }
            }

            let next = hex.adjacent(state.direction);
            if !self.grid.contains(next) {
                let exit = self.entry_points.exit_for(hex, state.direction);
                return Ok(state.finish(Termination::Exited { exit }));
            }
            debug_assert!(
                !self.atoms.is_atom(next),
                "ray from {} walked into atom {}",
                entry,
                next
            );
            state.advance(next);
        }

        warn!(
            "Ray from {} didn't resolve after {} steps, treating it as \
            absorbed",
            entry,
            budget
        );
        Ok(state.finish(Termination::Trapped))
    }

    /// Fire every entry point on the board, in table order. Results line up
    /// with [EntryPointTable::all].
    pub fn fire_all(&self) -> Vec<Encounter> {
        self.entry_points
            .all()
            .filter_map(|entry| self.fire(entry).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(atoms: &[(i16, i16)]) -> (HexGrid, AtomLayout, EntryPointTable) {
        let grid = HexGrid::new(4).unwrap();
        let layout = AtomLayout::new(
            &grid,
            atoms.iter().map(|&(x, y)| HexPoint::new_xy(x, y)),
        )
        .unwrap();
        let entry_points = EntryPointTable::new(&grid);
        (grid, layout, entry_points)
    }

    fn entry(x: i16, y: i16, degrees: u16) -> EntryPoint {
        EntryPoint::new(
            HexPoint::new_xy(x, y),
            Direction::try_from(degrees).unwrap(),
        )
    }

    #[test]
    fn test_not_an_entry_point() {
        let (grid, atoms, entry_points) =
            board(&[(0, 0), (1, -1), (1, 0), (0, 1), (-1, 1), (-1, 0)]);
        let tracer = RayTracer::new(&grid, &atoms, &entry_points);
        let bad = entry(4, -4, 180);
        let err = tracer.fire(bad).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BlackBoxError>(),
            Some(&BlackBoxError::NotAnEntryPoint(bad))
        );
        // Interior cells are never entry points
        assert!(tracer.fire(entry(0, 0, 0)).is_err());
    }

    #[test]
    fn test_origin_collision() {
        // (4, -3, -1) borders the atom at (3, -2, -1)
        let (grid, atoms, entry_points) =
            board(&[(3, -2), (0, 0), (-4, 4), (-3, 4), (-2, 4), (-1, 4)]);
        let tracer = RayTracer::new(&grid, &atoms, &entry_points);
        let encounter = tracer.fire(entry(4, -3, 300)).unwrap();
        assert_eq!(encounter.termination(), Termination::OriginCollision);
        assert_eq!(encounter.kind(), EncounterKind::DirectHit);
        assert_eq!(encounter.final_hex(), HexPoint::new_xy(4, -3));
        assert_eq!(encounter.color(), CellColor::OriginCollision);
        assert_eq!(encounter.path(), &[HexPoint::new_xy(4, -3)]);
        assert_eq!(encounter.exit(), None);
    }

    #[test]
    fn test_multi_deflection_color() {
        let encounter = Encounter {
            entry: entry(-4, 0, 180),
            kind: EncounterKind::Deflection,
            termination: Termination::Exited {
                exit: entry(4, -4, 300),
            },
            final_hex: HexPoint::new_xy(4, -4),
            deflections: 2,
            path: vec![],
            directions: vec![],
        };
        assert_eq!(encounter.color(), CellColor::MultiDeflected);
        assert_eq!(
            encounter.painted_cells(),
            vec![
                (HexPoint::new_xy(-4, 0), CellColor::MultiDeflected),
                (HexPoint::new_xy(4, -4), CellColor::MultiDeflected),
            ]
        );
    }

    #[test]
    fn test_fire_all() {
        let (grid, atoms, entry_points) =
            board(&[(0, 0), (1, -1), (1, 0), (0, 1), (-1, 1), (-1, 0)]);
        let tracer = RayTracer::new(&grid, &atoms, &entry_points);
        let encounters = tracer.fire_all();
        assert_eq!(encounters.len(), entry_points.len());
        for encounter in &encounters {
            if let Some(exit) = encounter.exit() {
                assert!(entry_points.contains(exit), "{}", exit);
            }
        }
    }
}
