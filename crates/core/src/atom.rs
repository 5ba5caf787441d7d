use crate::{
    hex::{HexPoint, HexPointIndexMap, HexPointIndexSet, HexPointMap},
    BlackBoxError, HexGrid,
};
use log::debug;
use rand::{seq::SliceRandom, Rng};

/// Number of atoms hidden in every game
pub const ATOM_COUNT: usize = 6;

/// The hidden atoms for one game, plus each atom's effective range: the cells
/// around it where a passing ray will feel its pull. Both are computed once
/// and never change.
#[derive(Clone, Debug)]
pub struct AtomLayout {
    atoms: HexPointIndexSet,
    /// Each atom mapped to the on-grid cells that border it
    ranges: HexPointIndexMap<Vec<HexPoint>>,
    /// Reverse of `ranges`: each cell mapped to every atom it borders
    bordering: HexPointMap<Vec<HexPoint>>,
}

impl AtomLayout {
    /// Pick [ATOM_COUNT] distinct cells from the grid uniformly at random.
    pub fn select(grid: &HexGrid, rng: &mut impl Rng) -> anyhow::Result<Self> {
        let cells: Vec<HexPoint> = grid.cells().iter().copied().collect();
        let atoms = sample_atoms(&cells, rng)?;
        Self::new(grid, atoms)
    }

    /// Build a layout from a fixed list of atoms. There must be exactly
    /// [ATOM_COUNT] of them, all distinct and all on the grid.
    pub fn new(
        grid: &HexGrid,
        atoms: impl IntoIterator<Item = HexPoint>,
    ) -> anyhow::Result<Self> {
        let mut atom_set = HexPointIndexSet::default();
        let mut count = 0;
        for atom in atoms {
            count += 1;
            if !grid.contains(atom) {
                return Err(BlackBoxError::OffGrid(atom).into());
            }
            if !atom_set.insert(atom) {
                return Err(BlackBoxError::DuplicateAtom(atom).into());
            }
        }
        if count != ATOM_COUNT {
            return Err(BlackBoxError::WrongAtomCount {
                expected: ATOM_COUNT,
                actual: count,
            }
            .into());
        }

        let mut ranges = HexPointIndexMap::default();
        let mut bordering = HexPointMap::default();
        for &atom in &atom_set {
            let range: Vec<HexPoint> = grid.neighbors(atom).collect();
            for &cell in &range {
                bordering.entry(cell).or_insert_with(Vec::new).push(atom);
            }
            ranges.insert(atom, range);
        }
        debug!("Placed atoms at {:?}", atom_set);

        Ok(Self {
            atoms: atom_set,
            ranges,
            bordering,
        })
    }

    /// The atoms, in the order they were placed
    pub fn atoms(&self) -> &HexPointIndexSet {
        &self.atoms
    }

    pub fn is_atom(&self, point: HexPoint) -> bool {
        self.atoms.contains(&point)
    }

    /// Every atom mapped to its effective range
    pub fn effective_ranges(&self) -> &HexPointIndexMap<Vec<HexPoint>> {
        &self.ranges
    }

    /// Get the effective range of a single atom. `None` if the given point
    /// isn't an atom.
    pub fn effective_range(&self, atom: HexPoint) -> Option<&[HexPoint]> {
        self.ranges.get(&atom).map(Vec::as_slice)
    }

    /// Get every atom whose effective range contains the given cell. There
    /// can be anywhere from 0 to 6 of them.
    pub fn neighboring_atoms_of(&self, point: HexPoint) -> &[HexPoint] {
        self.bordering.get(&point).map_or(&[][..], Vec::as_slice)
    }

    /// Is the cell within range of at least one atom?
    pub fn is_in_range(&self, point: HexPoint) -> bool {
        self.bordering.contains_key(&point)
    }
}

/// Sample [ATOM_COUNT] distinct cells, without replacement
fn sample_atoms(
    cells: &[HexPoint],
    rng: &mut impl Rng,
) -> anyhow::Result<Vec<HexPoint>> {
    if cells.len() < ATOM_COUNT {
        return Err(BlackBoxError::GridTooSmall {
            cells: cells.len(),
            required: ATOM_COUNT,
        }
        .into());
    }
    Ok(cells.choose_multiple(rng, ATOM_COUNT).copied().collect())
}
