//! Grid coordinates and cardinal directions
//!
//! The tile window addresses its cells with `[0, size-1]` coordinates,
//! column-major in x and row-major in storage. All shifting arithmetic is
//! modular so a recycle is a pure wraparound of the coordinate space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A cell address inside the matrix window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub col: usize,
    pub row: usize,
}

impl GridCoord {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Row-major storage index
    pub fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Offset with modular wraparound in both axes
    pub fn offset_wrapped(self, delta: (isize, isize), size: usize) -> Self {
        let size = size as isize;
        let col = (self.col as isize + delta.0).rem_euclid(size) as usize;
        let row = (self.row as isize + delta.1).rem_euclid(size) as usize;
        Self { col, row }
    }

    /// Every coordinate of a size x size window, storage order
    pub fn all(size: usize) -> impl Iterator<Item = GridCoord> {
        (0..size).flat_map(move |row| (0..size).map(move |col| GridCoord { col, row }))
    }
}

/// The four movement directions; diagonal input is not modeled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// One-cell grid step in the direction the player walks.
    /// Screen space has y growing downward, so Up is a negative row step.
    pub fn grid_step(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The player's screen-space motion for one tick at `speed` px/tick.
    /// The world scrolls by the negation of this.
    pub fn motion(self, speed: f32) -> Vec2 {
        let (dc, dr) = self.grid_step();
        Vec2::new(dc as f32, dr as f32) * speed
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True when `coord` sits on the window edge the player is walking
    /// toward - the edge new terrain enters from
    pub fn is_leading_edge(self, coord: GridCoord, size: usize) -> bool {
        match self {
            Direction::Up => coord.row == 0,
            Direction::Down => coord.row == size - 1,
            Direction::Left => coord.col == 0,
            Direction::Right => coord.col == size - 1,
        }
    }
}
