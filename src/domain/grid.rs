/// Grid: the rectangular cell array the whole game lives in.
///
/// Row-major, `cells[y][x]`, y = 0 at the top. Dimensions are fixed once
/// built. Reads are bounds-checked and return `None` off the map, so rule
/// code never indexes out of range even on a level without a full border.

use super::tile::Tile;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Tile>>,
}

impl Grid {
    /// Build from rows. Callers (the level loader) guarantee the rows are
    /// non-empty and rectangular.
    pub fn from_rows(cells: Vec<Vec<Tile>>) -> Self {
        let height = cells.len();
        let width = cells.first().map_or(0, |r| r.len());
        Grid { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y][x])
    }

    /// Is `(x, y)` on the map and holding `tile`?
    #[inline]
    pub fn is(&self, x: usize, y: usize, tile: Tile) -> bool {
        self.get(x, y) == Some(tile)
    }

    /// Write a cell. Off-map writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if self.in_bounds(x, y) {
            self.cells[y][x] = tile;
        }
    }

    /// Replace every `from` cell with `to`. Returns how many changed.
    pub fn replace_all(&mut self, from: Tile, to: Tile) -> usize {
        let mut changed = 0;
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut().filter(|c| **c == from) {
                *cell = to;
                changed += 1;
            }
        }
        changed
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().flatten().filter(|c| **c == tile).count()
    }

    /// Coordinates of every `tile` cell, in row-major order.
    pub fn positions_of(&self, tile: Tile) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == tile {
                    out.push((x, y));
                }
            }
        }
        out
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.cells
    }

    /// Iterate `(x, y, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, &t)| (x, y, t))
        })
    }

    /// Is every cell on the outer ring `tile`?
    /// Returns the first offending cell otherwise.
    pub fn border_violation(&self, tile: Tile) -> Option<(usize, usize, Tile)> {
        self.iter().find(|&(x, y, t)| {
            let on_border = x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height;
            on_border && t != tile
        })
    }
}
