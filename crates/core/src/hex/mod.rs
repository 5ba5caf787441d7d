//! This module holds basic types and data structures related to hexagon grids.
//!
//! We use the cube coordinate system, with "pointy topped" cells:
//! https://www.redblobgames.com/grids/hexagons/#coordinates-cube
//!
//! Every cell is addressed by an `(x, y, z)` triple where `x + y + z = 0`. The
//! six neighbors of a cell are reached by adding one of the six
//! [Direction] vectors. Directions are named by their angle in degrees, and
//! they progress in a fixed cycle (0°, 60°, ..., 300°), so rotating a
//! direction is just modular arithmetic on its index.

mod data_structure;
mod unit;

pub use data_structure::*;
pub use unit::*;
