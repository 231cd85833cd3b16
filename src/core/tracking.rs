//! What we know about the opponent's board.
//!
//! The tracking board owns the knowledge grid, the list of unresolved hits
//! and the multiset of opponent ship sizes still afloat. Hunt versus target
//! mode is never stored: it is simply whether `active_hits` is empty.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::bitboard::FleetMask;
use super::common::{BoardError, CellState, KnowledgeGrid, ShotResult};
use super::config::{BOARD_SIZE, FLEET};
use super::coord::Coordinate;

/// Per-game opponent model, mutated only through [`TrackingBoard::record_shot`].
#[derive(Clone, Debug)]
pub struct TrackingBoard {
    grid: KnowledgeGrid,
    active_hits: Vec<Coordinate>,
    remaining_ships: Vec<usize>,
}

impl TrackingBoard {
    pub fn new() -> Self {
        Self {
            grid: KnowledgeGrid::new(),
            active_hits: Vec::new(),
            remaining_ships: FLEET.to_vec(),
        }
    }

    pub fn grid(&self) -> &KnowledgeGrid {
        &self.grid
    }

    /// Hits not yet attributed to a sunk ship, in the order they were made.
    pub fn active_hits(&self) -> &[Coordinate] {
        &self.active_hits
    }

    /// Sizes of opponent ships not yet confirmed sunk.
    pub fn remaining_ships(&self) -> &[usize] {
        &self.remaining_ships
    }

    /// No unresolved hits: the next shot is a blind search.
    pub fn is_hunting(&self) -> bool {
        self.active_hits.is_empty()
    }

    /// In bounds and never shot.
    pub fn can_shoot(&self, coord: Coordinate) -> bool {
        self.grid.is_unknown(coord)
    }

    /// Fold the outcome of our shot at `coord` into the model.
    ///
    /// Rejects shots off the board, cells that were already resolved by a
    /// shot, and sunk reports for a size that is not still afloat. Nothing is
    /// modified when an error is returned.
    pub fn record_shot(&mut self, coord: Coordinate, result: ShotResult) -> Result<(), BoardError> {
        let state = self.grid.state(coord).ok_or(BoardError::OutOfBounds {
            x: coord.x,
            y: coord.y,
        })?;
        if matches!(state, CellState::Hit | CellState::Miss | CellState::Sunk) {
            return Err(BoardError::AlreadyShot {
                x: coord.x,
                y: coord.y,
            });
        }
        if let ShotResult::Sunk(size) = result {
            if !self.remaining_ships.contains(&size) {
                return Err(BoardError::UnknownShipSize(size));
            }
        }

        match result {
            ShotResult::Miss => self.grid.set(coord, CellState::Miss),
            ShotResult::Hit => {
                self.grid.set(coord, CellState::Hit);
                self.active_hits.push(coord);
            }
            ShotResult::Sunk(size) => {
                self.grid.set(coord, CellState::Hit);
                self.active_hits.push(coord);
                self.handle_sunk(coord, size);
            }
        }
        Ok(())
    }

    fn handle_sunk(&mut self, last_hit: Coordinate, size: usize) {
        if let Some(pos) = self.remaining_ships.iter().position(|&s| s == size) {
            self.remaining_ships.remove(pos);
        }

        let sunk_cells = self.reconstruct_sunk_ship(last_hit, size);
        log::debug!("sunk size {} at {:?}", size, sunk_cells);

        for &cell in &sunk_cells {
            self.grid.set(cell, CellState::Sunk);
            self.active_hits.retain(|&h| h != cell);
        }
        for &cell in &sunk_cells {
            for n in cell.orthogonal_neighbors() {
                if self.grid.get(n) == CellState::Unknown {
                    self.grid.set(n, CellState::Blocked);
                }
            }
        }
    }

    /// Cells of the ship that just sank at `last_hit`.
    ///
    /// Collects the 4-connected region of hit cells around `last_hit` in
    /// breadth-first order. If the region is larger than `size`, look for a
    /// run of `size` consecutive cells in the row of `last_hit`, then in its
    /// column; failing both, keep the first `size` cells in discovery order.
    fn reconstruct_sunk_ship(&self, last_hit: Coordinate, size: usize) -> Vec<Coordinate> {
        let mut candidates = Vec::new();
        let mut visited = FleetMask::new();
        let mut queue = VecDeque::new();

        let _ = visited.set(last_hit.x, last_hit.y);
        queue.push_back(last_hit);
        while let Some(current) = queue.pop_front() {
            if self.grid.get(current) == CellState::Hit {
                candidates.push(current);
            }
            for n in current.orthogonal_neighbors() {
                if !visited.get(n.x, n.y).unwrap_or(true) && self.grid.get(n) == CellState::Hit {
                    let _ = visited.set(n.x, n.y);
                    queue.push_back(n);
                }
            }
        }

        if candidates.len() == size {
            return candidates;
        }

        let mut row: Vec<usize> = candidates
            .iter()
            .filter(|c| c.y == last_hit.y)
            .map(|c| c.x)
            .collect();
        row.sort_unstable();
        if let Some(start) = consecutive_window(&row, size) {
            return (start..start + size)
                .map(|x| Coordinate::new(x, last_hit.y))
                .collect();
        }

        let mut column: Vec<usize> = candidates
            .iter()
            .filter(|c| c.x == last_hit.x)
            .map(|c| c.y)
            .collect();
        column.sort_unstable();
        if let Some(start) = consecutive_window(&column, size) {
            return (start..start + size)
                .map(|y| Coordinate::new(last_hit.x, y))
                .collect();
        }

        log::warn!(
            "ambiguous sunk ship at {}: {} connected hits for size {}",
            last_hit,
            candidates.len(),
            size
        );
        candidates.truncate(size);
        candidates
    }

    /// Smallest size the ship behind the active hits can have.
    ///
    /// A line of N unresolved hits cannot belong to a ship of size N or less,
    /// since that ship would already have been reported sunk.
    pub fn infer_minimum_ship_size(&self) -> usize {
        if self.active_hits.is_empty() {
            return 1;
        }
        self.longest_hit_line() + 1
    }

    fn longest_hit_line(&self) -> usize {
        if self.active_hits.len() == 1 {
            return 1;
        }
        let mut longest = 1;
        for line in 0..BOARD_SIZE {
            let mut xs: Vec<usize> = self
                .active_hits
                .iter()
                .filter(|h| h.y == line)
                .map(|h| h.x)
                .collect();
            xs.sort_unstable();
            longest = longest.max(longest_run(&xs));

            let mut ys: Vec<usize> = self
                .active_hits
                .iter()
                .filter(|h| h.x == line)
                .map(|h| h.y)
                .collect();
            ys.sort_unstable();
            longest = longest.max(longest_run(&ys));
        }
        longest
    }

    /// Remaining ship sizes that could own the active hits.
    pub fn filtered_remaining_ships(&self) -> Vec<usize> {
        let min = self.infer_minimum_ship_size();
        self.remaining_ships
            .iter()
            .copied()
            .filter(|&s| s >= min)
            .collect()
    }

    /// Forget everything: all cells unknown, full fleet afloat.
    pub fn reset(&mut self) {
        self.grid = KnowledgeGrid::new();
        self.active_hits.clear();
        self.remaining_ships.clear();
        self.remaining_ships.extend_from_slice(&FLEET);
    }
}

impl Default for TrackingBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Start of the first window of `len` strictly consecutive values in the
/// sorted slice.
fn consecutive_window(sorted: &[usize], len: usize) -> Option<usize> {
    if len == 0 || sorted.len() < len {
        return None;
    }
    sorted
        .windows(len)
        .find(|w| w.windows(2).all(|p| p[1] == p[0] + 1))
        .map(|w| w[0])
}

/// Length of the longest strictly consecutive run in a sorted slice.
fn longest_run(sorted: &[usize]) -> usize {
    let mut best = usize::from(!sorted.is_empty());
    let mut current = 1;
    for pair in sorted.windows(2) {
        if pair[1] == pair[0] + 1 {
            current += 1;
            best = best.max(current);
        } else {
            current = 1;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_window_finds_first_run() {
        assert_eq!(consecutive_window(&[1, 2, 4, 5, 6], 3), Some(4));
        assert_eq!(consecutive_window(&[1, 2, 3], 3), Some(1));
        assert_eq!(consecutive_window(&[1, 3, 5], 2), None);
        assert_eq!(consecutive_window(&[1], 2), None);
    }

    #[test]
    fn longest_run_counts_steps_of_one() {
        assert_eq!(longest_run(&[]), 0);
        assert_eq!(longest_run(&[7]), 1);
        assert_eq!(longest_run(&[1, 2, 3, 5, 6]), 3);
    }
}
