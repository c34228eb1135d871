//! Maze layouts and cell queries

use glam::IVec2;

use crate::consts::GRID_SIZE;

/// One grid cell, either walkable or solid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
}

/// A complete 5x5 cell layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Maze {
    /// Row-major: `cells[y][x]`
    cells: [[Cell; GRID_SIZE as usize]; GRID_SIZE as usize],
}

impl Maze {
    pub const fn new(cells: [[Cell; GRID_SIZE as usize]; GRID_SIZE as usize]) -> Self {
        Self { cells }
    }

    /// Is the position inside the board?
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < GRID_SIZE && pos.y >= 0 && pos.y < GRID_SIZE
    }

    /// Cell at a position; out-of-bounds positions read as walls so that
    /// leaving the board and hitting a wall reject moves identically.
    pub fn cell(&self, pos: IVec2) -> Cell {
        if self.in_bounds(pos) {
            self.cells[pos.y as usize][pos.x as usize]
        } else {
            Cell::Wall
        }
    }

    /// True if the position is inside the board and walkable
    pub fn is_open(&self, pos: IVec2) -> bool {
        self.cell(pos) == Cell::Open
    }

    /// Iterate all cells as (x, y, cell), row by row
    pub fn iter_cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &cell)| (x as i32, y as i32, cell))
        })
    }
}

// Shorthand for the layout tables below
const O: Cell = Cell::Open;
const W: Cell = Cell::Wall;

/// The fixed level sequence. Start (0,0) and goal (4,4) are open in every
/// layout, and each has at least one open path between them.
pub const MAZES: [Maze; 5] = [
    Maze::new([
        [O, W, O, O, O],
        [O, W, O, W, O],
        [O, O, O, W, O],
        [W, W, O, W, O],
        [O, O, O, O, O],
    ]),
    Maze::new([
        [O, O, O, W, O],
        [W, W, O, O, O],
        [O, W, O, W, O],
        [O, O, O, O, W],
        [O, W, W, O, O],
    ]),
    Maze::new([
        [O, W, O, O, O],
        [O, O, O, W, O],
        [W, W, W, O, O],
        [O, O, W, O, W],
        [O, W, W, O, O],
    ]),
    Maze::new([
        [O, W, O, O, O],
        [O, W, O, W, O],
        [O, W, O, W, O],
        [O, O, O, W, O],
        [W, W, W, W, O],
    ]),
    Maze::new([
        [O, W, O, O, O],
        [O, O, O, W, O],
        [W, O, O, W, O],
        [W, W, W, O, O],
        [O, O, O, O, O],
    ]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{END_POS, START_POS};

    #[test]
    fn test_cell_queries() {
        let maze = &MAZES[0];
        assert_eq!(maze.cell(IVec2::new(0, 0)), Cell::Open);
        assert_eq!(maze.cell(IVec2::new(1, 0)), Cell::Wall);
        assert!(maze.is_open(IVec2::new(0, 1)));
        assert!(!maze.is_open(IVec2::new(1, 1)));
    }

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let maze = &MAZES[0];
        assert!(!maze.in_bounds(IVec2::new(-1, 0)));
        assert!(!maze.in_bounds(IVec2::new(0, 5)));
        assert_eq!(maze.cell(IVec2::new(-1, 0)), Cell::Wall);
        assert_eq!(maze.cell(IVec2::new(5, 4)), Cell::Wall);
    }

    #[test]
    fn test_endpoints_open_in_every_maze() {
        for maze in &MAZES {
            assert!(maze.is_open(START_POS));
            assert!(maze.is_open(END_POS));
        }
    }

    #[test]
    fn test_every_maze_is_solvable() {
        // Flood fill from the start; the goal must be reachable.
        for (i, maze) in MAZES.iter().enumerate() {
            let mut seen = [[false; GRID_SIZE as usize]; GRID_SIZE as usize];
            let mut stack = vec![START_POS];
            seen[START_POS.y as usize][START_POS.x as usize] = true;
            while let Some(pos) = stack.pop() {
                for delta in [
                    IVec2::new(1, 0),
                    IVec2::new(-1, 0),
                    IVec2::new(0, 1),
                    IVec2::new(0, -1),
                ] {
                    let next = pos + delta;
                    if maze.is_open(next) && !seen[next.y as usize][next.x as usize] {
                        seen[next.y as usize][next.x as usize] = true;
                        stack.push(next);
                    }
                }
            }
            assert!(
                seen[END_POS.y as usize][END_POS.x as usize],
                "maze {i} has no path from start to goal"
            );
        }
    }

    #[test]
    fn test_iter_cells_covers_board() {
        let count = MAZES[0].iter_cells().count();
        assert_eq!(count, (GRID_SIZE * GRID_SIZE) as usize);
        let (x, y, _) = MAZES[0].iter_cells().last().unwrap();
        assert_eq!((x, y), (4, 4));
    }
}
