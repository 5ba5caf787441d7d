use crate::{
    hex::{HexPoint, HexPointMap},
    render::{BoardView, CellColor},
    EntryPoint, HexGrid,
};
use std::{cmp, fmt};
use strum::IntoEnumIterator;

/// A [BoardView] that remembers the latest color of every cell and renders
/// the board as rows of text, one character per cell. Rows are indented so
/// the cells line up the way pointy-topped hexes do.
///
/// ```text
///  . .
/// . G .
///  . X
/// ```
#[derive(Clone, Debug)]
pub struct TextBoard {
    radius: u16,
    cells: HexPointMap<CellColor>,
    used_exits: Vec<EntryPoint>,
}

impl TextBoard {
    /// Symbol for a cell that hasn't been painted
    pub const EMPTY: char = '.';

    pub fn new(grid: &HexGrid) -> Self {
        Self {
            radius: grid.radius(),
            cells: HexPointMap::default(),
            used_exits: Vec::new(),
        }
    }

    /// The current color of a cell, if it's been painted
    pub fn color_at(&self, hex: HexPoint) -> Option<CellColor> {
        self.cells.get(&hex).copied()
    }

    /// Exit markers that have been used up, in the order they were reported
    pub fn used_exits(&self) -> &[EntryPoint] {
        &self.used_exits
    }

    /// Render the whole board. Each row is one `y` value, top to bottom.
    pub fn render(&self) -> String {
        let r = self.radius as i16;
        let mut rows = Vec::with_capacity(2 * self.radius as usize + 1);
        for y in -r..=r {
            let x_min = cmp::max(-r, -y - r);
            let x_max = cmp::min(r, -y + r);
            let symbols: Vec<String> = (x_min..=x_max)
                .map(|x| {
                    self.color_at(HexPoint::new_xy(x, y))
                        .map_or(Self::EMPTY, CellColor::symbol)
                        .to_string()
                })
                .collect();
            let indent = " ".repeat(y.unsigned_abs() as usize);
            rows.push(format!("{}{}", indent, symbols.join(" ")));
        }
        rows.join("\n")
    }

    /// A key explaining every symbol the board can show
    pub fn legend() -> String {
        CellColor::iter()
            .map(|color| {
                format!(
                    "{}  {:<9} {}",
                    color.symbol(),
                    color.color_name(),
                    color.description()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl BoardView for TextBoard {
    fn color_cell(&mut self, hex: HexPoint, color: CellColor) {
        self.cells.insert(hex, color);
    }

    fn mark_exit_used(&mut self, exit: EntryPoint) {
        self.used_exits.push(exit);
    }
}

impl fmt::Display for TextBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::Direction;

    #[test]
    fn test_render_empty() {
        let board = TextBoard::new(&HexGrid::new(1).unwrap());
        assert_eq!(board.render(), " . .\n. . .\n . .");
    }

    #[test]
    fn test_render_painted() {
        let mut board = TextBoard::new(&HexGrid::new(1).unwrap());
        board.color_cell(HexPoint::new_xy(0, -1), CellColor::Hit);
        board.color_cell(HexPoint::ORIGIN, CellColor::Miss);
        board.color_cell(HexPoint::new_xy(0, 1), CellColor::Miss);
        // Repainting replaces the old color
        board.color_cell(HexPoint::new_xy(0, 1), CellColor::Atom);
        assert_eq!(board.render(), " G .\n. P .\n . X");
        assert_eq!(board.to_string(), board.render());
    }

    #[test]
    fn test_render_row_widths() {
        let board = TextBoard::new(&HexGrid::new(4).unwrap());
        let rendered = board.render();
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 9);
        // Every row is centered on the same column
        assert_eq!(rows[0], "    . . . . .");
        assert_eq!(rows[4], ". . . . . . . . .");
        assert_eq!(rows[8], "    . . . . .");
    }

    #[test]
    fn test_mark_exit_used() {
        let mut board = TextBoard::new(&HexGrid::new(4).unwrap());
        let exit = EntryPoint::new(HexPoint::new_xy(4, -4), Direction::Deg0);
        board.mark_exit_used(exit);
        assert_eq!(board.used_exits(), &[exit]);
    }

    #[test]
    fn test_legend() {
        let legend = TextBoard::legend();
        assert_eq!(legend.lines().count(), 8);
        assert!(legend.contains("X  red"));
    }
}
