use crate::{
    hex::{Direction, DirectionSet, HexPoint, HexPointIndexSet},
    util, BlackBoxError,
};
use fnv::FnvBuildHasher;
use log::debug;
use std::cmp;

/// Largest supported radius. Coordinates of cells just off the grid, and the
/// differences between any two cells, need to stay within an `i16`.
pub const MAX_RADIUS: u16 = i16::MAX as u16 / 4;

/// The board: every cell within a fixed radius of the origin. The grid has no
/// knowledge of atoms or rays, it only answers geometric questions.
#[derive(Clone, Debug)]
pub struct HexGrid {
    radius: u16,
    cells: HexPointIndexSet,
}

impl HexGrid {
    /// Build the grid for a radius. Fails if the radius is 0, since a single
    /// cell has no room for a game, or above [MAX_RADIUS].
    pub fn new(radius: u16) -> anyhow::Result<Self> {
        if !(1..=MAX_RADIUS).contains(&radius) {
            return Err(BlackBoxError::InvalidRadius(radius).into());
        }

        let capacity = util::grid_len(radius);
        let mut cells = HexPointIndexSet::with_capacity_and_hasher(
            capacity,
            FnvBuildHasher::default(),
        );
        let r = i16::try_from(radius)?;
        for y in -r..=r {
            // If we just do [-r,r] for x as well, then we end up with a
            // diamond pattern instead of a super hexagon
            // https://www.redblobgames.com/grids/hexagons/#range
            let x_min = cmp::max(-r, -y - r);
            let x_max = cmp::min(r, -y + r);
            for x in x_min..=x_max {
                cells.insert(HexPoint::new_xy(x, y));
            }
        }
        debug_assert_eq!(cells.len(), capacity);
        debug!("Initialized grid with {} cells", cells.len());

        Ok(Self { radius, cells })
    }

    pub fn radius(&self) -> u16 {
        self.radius
    }

    /// All cells in the grid, row by row from the top (lowest y) down
    pub fn cells(&self) -> &HexPointIndexSet {
        &self.cells
    }

    /// Total number of cells, which is always `3r^2+3r+1`
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, point: HexPoint) -> bool {
        point.ring() <= self.radius
    }

    /// Get all cells adjacent to the given one that are on the grid. Returns
    /// between 0 and 6 cells (0 only if the given point is far off-grid).
    pub fn neighbors(
        &self,
        point: HexPoint,
    ) -> impl Iterator<Item = HexPoint> + '_ {
        point.adjacents().filter(move |adj| self.contains(*adj))
    }

    /// Is the cell on the outer ring of the grid?
    pub fn is_boundary(&self, point: HexPoint) -> bool {
        point.ring() == self.radius
    }

    /// All boundary cells, in grid order
    pub fn boundary_cells(&self) -> impl Iterator<Item = HexPoint> + '_ {
        self.cells
            .iter()
            .copied()
            .filter(move |cell| self.is_boundary(*cell))
    }

    /// Get the directions in which a ray can enter the grid at the given
    /// cell. Edge cells get two directions, corner cells get three. Interior
    /// cells and cells that aren't on the grid get none.
    pub fn boundary_directions(&self, point: HexPoint) -> DirectionSet {
        let mut directions = DirectionSet::default();
        if !self.contains(point) {
            return directions;
        }

        // Each edge, and the directions that lead from it back into the grid.
        // Corner cells collect directions from two edges, in this order.
        let r = self.radius as i16;
        let edges = [
            (point.x() == -r, [Direction::Deg120, Direction::Deg180]),
            (point.z() == r, [Direction::Deg180, Direction::Deg240]),
            (point.y() == -r, [Direction::Deg240, Direction::Deg300]),
            (point.x() == r, [Direction::Deg300, Direction::Deg0]),
            (point.z() == -r, [Direction::Deg0, Direction::Deg60]),
            (point.y() == r, [Direction::Deg60, Direction::Deg120]),
        ];
        for (on_edge, edge_directions) in edges.iter() {
            if *on_edge {
                directions.extend(edge_directions.iter().copied());
            }
        }
        directions
    }
}
