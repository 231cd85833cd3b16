//! Cell coordinates and ship directions.

use core::fmt;

use super::config::BOARD_SIZE;

/// A cell on the board: `x` is the column, `y` the row, both `0..BOARD_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

/// Orthogonal unit steps: right, left, down, up.
pub const ORTHOGONAL_STEPS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Neighbour scan order: left, right, up, down. Sunk-ship reconstruction
/// breaks ties by this order.
const NEIGHBOR_STEPS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const ALL_STEPS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Both axes lie on the board.
    pub fn is_valid(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// The cell `(dx, dy)` away, if it lies on the board.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let c = Self::new(x, y);
        c.is_valid().then_some(c)
    }

    /// In-bounds 4-connected neighbours, left, right, up, down.
    pub fn orthogonal_neighbors(self) -> impl Iterator<Item = Coordinate> {
        NEIGHBOR_STEPS
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// In-bounds 8-connected neighbours.
    pub fn all_neighbors(self) -> impl Iterator<Item = Coordinate> {
        ALL_STEPS
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coordinate::new(x, y)))
    }

    pub fn manhattan(&self, other: &Coordinate) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Direction a ship extends from its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    /// Unit step along the direction.
    pub fn step(&self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
        }
    }

    pub fn as_log_str(&self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }
}
