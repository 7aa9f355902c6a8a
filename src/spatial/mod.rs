//! Spatial model - fixed-size tile grid

use serde::{Deserialize, Serialize};

use crate::tile::Tile;

/// Tile position in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: u32,
    pub y: u32,
}

impl TilePos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Cardinal step directions (4-connectivity)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];
}

/// Row-major grid where every cell always holds a tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Tile>,
}

impl Grid {
    /// Builds a grid with every cell set to `tile`.
    ///
    /// Panics if either dimension is zero; scenario validation rejects
    /// such sizes before a grid is ever built.
    pub fn filled(width: u32, height: u32, tile: Tile) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![tile; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_count(&self) -> usize {
        self.cells.len()
    }

    pub fn center(&self) -> TilePos {
        TilePos::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: TilePos) -> Option<Tile> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrites one cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: TilePos, tile: Tile) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = tile;
        }
    }

    /// Reassigns every cell, visiting positions in row-major order.
    pub fn fill_with(&mut self, mut pick: impl FnMut(TilePos) -> Tile) {
        let width = self.width;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let pos = TilePos::new(i as u32 % width, i as u32 / width);
            *cell = pick(pos);
        }
    }

    /// The neighbour one step in `dir`, or `None` at the edge.
    pub fn step(&self, pos: TilePos, dir: Direction) -> Option<TilePos> {
        let next = match dir {
            Direction::West => TilePos::new(pos.x.checked_sub(1)?, pos.y),
            Direction::East => TilePos::new(pos.x + 1, pos.y),
            Direction::North => TilePos::new(pos.x, pos.y.checked_sub(1)?),
            Direction::South => TilePos::new(pos.x, pos.y + 1),
        };
        self.contains(next).then_some(next)
    }

    /// Iterator over all cells with positions, row by row
    pub fn iter(&self) -> impl Iterator<Item = (TilePos, Tile)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, tile)| (TilePos::new(i as u32 % width, i as u32 / width), *tile))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.cells
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let grid = Grid::filled(10, 5, Tile::Sand);

        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.tile_count(), 50);
        assert_eq!(grid.center(), TilePos::new(5, 2));
        assert!(grid.iter().all(|(_, tile)| tile == Tile::Sand));
    }

    #[test]
    fn test_get_and_set() {
        let mut grid = Grid::filled(10, 5, Tile::Sand);

        grid.set(TilePos::new(3, 2), Tile::Water);
        assert_eq!(grid.get(TilePos::new(3, 2)), Some(Tile::Water));
        assert_eq!(grid.tiles()[23], Tile::Water); // 2 * 10 + 3

        grid.set(TilePos::new(10, 0), Tile::Water);
        assert_eq!(grid.get(TilePos::new(10, 0)), None);
    }

    #[test]
    fn test_step_clamps_at_edges() {
        let grid = Grid::filled(10, 5, Tile::Grass);

        let corner = TilePos::new(0, 0);
        assert_eq!(grid.step(corner, Direction::West), None);
        assert_eq!(grid.step(corner, Direction::North), None);
        assert_eq!(grid.step(corner, Direction::East), Some(TilePos::new(1, 0)));
        assert_eq!(grid.step(corner, Direction::South), Some(TilePos::new(0, 1)));

        let far = TilePos::new(9, 4);
        assert_eq!(grid.step(far, Direction::East), None);
        assert_eq!(grid.step(far, Direction::South), None);
    }

    #[test]
    fn test_fill_with_visits_row_major() {
        let mut grid = Grid::filled(3, 2, Tile::Grass);
        let mut seen = Vec::new();
        grid.fill_with(|pos| {
            seen.push(pos);
            if pos.y == 0 {
                Tile::Water
            } else {
                Tile::Sand
            }
        });

        assert_eq!(seen.first(), Some(&TilePos::new(0, 0)));
        assert_eq!(seen.last(), Some(&TilePos::new(2, 1)));
        assert_eq!(seen.len(), 6);
        assert_eq!(grid.get(TilePos::new(2, 0)), Some(Tile::Water));
        assert_eq!(grid.get(TilePos::new(0, 1)), Some(Tile::Sand));
    }
}
