use crate::hex::{Direction, HexPoint};
use fnv::FnvBuildHasher;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

/// A set of hex points
pub type HexPointSet = HashSet<HexPoint, FnvBuildHasher>;
/// A map of hex points to some `T`
pub type HexPointMap<T> = HashMap<HexPoint, T, FnvBuildHasher>;
/// An ORDERED set of hex points. This has some extra memory overhead, so we
/// should only use it when we actually need the ordering.
pub type HexPointIndexSet = IndexSet<HexPoint, FnvBuildHasher>;
/// An ORDERED map of hex points to some `T`. This has some extra memory
/// overhead, so we should only use it when we actually need the ordering.
pub type HexPointIndexMap<T> = IndexMap<HexPoint, T, FnvBuildHasher>;
/// An ordered set of directions. Insertion order is kept, which matters for
/// corner cells that get directions from two different edges.
pub type DirectionSet = IndexSet<Direction, FnvBuildHasher>;
