//! Common types: shot results, knowledge-grid cells and board errors.

use core::fmt;

use super::bitboard::BitBoardError;
use super::config::BOARD_SIZE;
use super::coord::Coordinate;

/// Outcome reported for a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    Miss,
    /// Hit a ship that is still afloat.
    Hit,
    /// Hit the last intact cell of a ship, carrying that ship's size.
    Sunk(usize),
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotResult::Miss => write!(f, "result=miss"),
            ShotResult::Hit => write!(f, "result=hit"),
            ShotResult::Sunk(size) => write!(f, "result=sunk ship-size={}", size),
        }
    }
}

/// What is known about one cell of the opponent's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// Never shot.
    #[default]
    Unknown,
    /// Hit, not yet attributed to a sunk ship.
    Hit,
    Miss,
    /// Part of a ship confirmed sunk.
    Sunk,
    /// Inferred empty: borders a sunk ship.
    Blocked,
}

impl CellState {
    /// A hypothetical ship may not cover this cell.
    pub fn excludes_ship(&self) -> bool {
        matches!(self, CellState::Miss | CellState::Sunk | CellState::Blocked)
    }

    /// The cell may still hold part of an unresolved ship.
    pub fn is_open(&self) -> bool {
        matches!(self, CellState::Unknown | CellState::Hit)
    }
}

/// Per-cell knowledge about the opponent's board, indexed `[y][x]`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeGrid {
    cells: [[CellState; BOARD_SIZE]; BOARD_SIZE],
}

impl KnowledgeGrid {
    /// A grid where every cell is unknown.
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Unknown; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// State of `coord`. Panics if `coord` is off the board.
    #[inline]
    pub fn get(&self, coord: Coordinate) -> CellState {
        self.cells[coord.y][coord.x]
    }

    /// State of `coord`, or `None` when it is off the board.
    #[inline]
    pub fn state(&self, coord: Coordinate) -> Option<CellState> {
        coord.is_valid().then(|| self.get(coord))
    }

    #[inline]
    pub fn set(&mut self, coord: Coordinate, state: CellState) {
        self.cells[coord.y][coord.x] = state;
    }

    /// In bounds and never shot.
    pub fn is_unknown(&self, coord: Coordinate) -> bool {
        self.state(coord) == Some(CellState::Unknown)
    }

    /// Any orthogonal neighbour is part of a sunk ship.
    pub fn touches_sunk(&self, coord: Coordinate) -> bool {
        coord
            .orthogonal_neighbors()
            .any(|n| self.get(n) == CellState::Sunk)
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().flatten().filter(|&&s| s == state).count()
    }

    /// Cells in `state`, row-major.
    pub fn cells_in(&self, state: CellState) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::all().filter(move |&c| self.get(c) == state)
    }

    /// Length of the run of open cells starting one step from `from` in
    /// direction `(dx, dy)`, not counting `from` itself.
    pub fn open_run(&self, from: Coordinate, dx: isize, dy: isize) -> usize {
        let mut count = 0;
        let mut cur = from;
        while let Some(next) = cur.offset(dx, dy) {
            if !self.get(next).is_open() {
                break;
            }
            count += 1;
            cur = next;
        }
        count
    }

    /// Total open line length through `at` along `(dx, dy)`, counting `at`.
    pub fn open_line(&self, at: Coordinate, dx: isize, dy: isize) -> usize {
        self.open_run(at, dx, dy) + self.open_run(at, -dx, -dy) + 1
    }
}

impl Default for KnowledgeGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KnowledgeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "KnowledgeGrid:")?;
        for row in self.cells.iter() {
            for cell in row.iter() {
                let ch = match cell {
                    CellState::Unknown => '·',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                    CellState::Sunk => '#',
                    CellState::Blocked => '-',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors returned by board, tracking and game operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error.
    BitBoardError(BitBoardError),
    /// Coordinate lies off the board.
    OutOfBounds { x: usize, y: usize },
    /// The cell was already shot.
    AlreadyShot { x: usize, y: usize },
    /// A sunk report named a size that is not among the ships still afloat.
    UnknownShipSize(usize),
    /// A fleet layout breaks the size, bounds, overlap or no-touch rules.
    InvalidFleet,
    /// No legal layout could be generated.
    UnableToPlaceShip,
    /// A player had no cell left to shoot at.
    NoShotAvailable,
    /// A hit landed on the ship map but no ship claimed it.
    ShipCellMissing,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::OutOfBounds { x, y } => write!(f, "Coordinate ({},{}) is off the board", x, y),
            BoardError::AlreadyShot { x, y } => write!(f, "Cell ({},{}) was already shot", x, y),
            BoardError::UnknownShipSize(size) => {
                write!(f, "No ship of size {} is still afloat", size)
            }
            BoardError::InvalidFleet => write!(f, "Fleet layout violates placement rules"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            BoardError::NoShotAvailable => write!(f, "No unknown cell left to shoot"),
            BoardError::ShipCellMissing => write!(f, "Hit cell does not belong to any ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
