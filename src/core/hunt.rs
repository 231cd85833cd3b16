//! Shot selection while no hit is unresolved.
//!
//! The heatmap is combined with a coverage pattern chosen from the largest
//! ship still afloat: a diagonal stripe (`x % 3 == y % 3`) while any ship of
//! size three or more remains, otherwise the checkerboard colour with more
//! unknown cells left. Cells no remaining ship could pass through are pruned.

use super::common::{CellState, KnowledgeGrid};
use super::config::PATTERN_BONUS;
use super::coord::Coordinate;
use super::probability::{self, is_stripe_cell, Heatmap};

/// Coverage pattern that earns the bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntPattern {
    /// `x % 3 == y % 3`, about a third of the board.
    DiagonalStripe,
    /// `(x + y) % 2 == parity`, half of the board.
    Checkerboard { parity: usize },
}

impl HuntPattern {
    pub fn contains(&self, c: Coordinate) -> bool {
        match self {
            HuntPattern::DiagonalStripe => is_stripe_cell(c),
            HuntPattern::Checkerboard { parity } => (c.x + c.y) % 2 == *parity,
        }
    }
}

/// Hunt-mode shot selector over a borrowed knowledge grid.
pub struct HuntMode<'a> {
    grid: &'a KnowledgeGrid,
    remaining: &'a [usize],
    pattern: HuntPattern,
}

impl<'a> HuntMode<'a> {
    pub fn new(grid: &'a KnowledgeGrid, remaining: &'a [usize]) -> Self {
        let largest = remaining.iter().copied().max().unwrap_or(2);
        let pattern = if largest >= 3 {
            HuntPattern::DiagonalStripe
        } else {
            HuntPattern::Checkerboard {
                parity: preferred_parity(grid),
            }
        };
        Self {
            grid,
            remaining,
            pattern,
        }
    }

    pub fn pattern(&self) -> HuntPattern {
        self.pattern
    }

    /// Highest-scoring unknown cell: heatmap value, multiplied by the pattern
    /// bonus on pattern cells. Ties go to the first cell in row-major order.
    /// Falls back to the first unknown cell when pruning removes every
    /// candidate; `None` only when no unknown cell is left.
    pub fn find_best_shot(&self) -> Option<Coordinate> {
        let map = probability::calculate_standard(self.grid, self.remaining);
        self.best_scored(&map).or_else(|| first_unknown(self.grid))
    }

    fn best_scored(&self, map: &Heatmap) -> Option<Coordinate> {
        let mut best: Option<(u32, Coordinate)> = None;
        for c in Coordinate::all() {
            if self.grid.get(c) != CellState::Unknown || !self.can_any_ship_fit_through(c) {
                continue;
            }
            let mut score = probability::weight(map, c);
            if self.pattern.contains(c) {
                score *= PATTERN_BONUS;
            }
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, c));
            }
        }
        best.map(|(_, c)| c)
    }

    /// Some remaining ship fits along the row or the column through `c`.
    pub fn can_any_ship_fit_through(&self, c: Coordinate) -> bool {
        let Some(smallest) = self.remaining.iter().copied().min() else {
            return false;
        };
        self.grid.open_line(c, 1, 0) >= smallest || self.grid.open_line(c, 0, 1) >= smallest
    }

    /// Unknown cell with the most placements through at least one of `hits`,
    /// ignoring the pattern. Used when target mode proposes nothing.
    pub fn find_best_shot_with_hits(&self, hits: &[Coordinate]) -> Option<Coordinate> {
        let map = probability::calculate_hit_aware(self.grid, self.remaining, hits);
        let mut best: Option<(u32, Coordinate)> = None;
        for c in self.grid.cells_in(CellState::Unknown) {
            let p = probability::weight(&map, c);
            if best.map_or(true, |(b, _)| p > b) {
                best = Some((p, c));
            }
        }
        best.map(|(_, c)| c)
    }
}

/// Checkerboard colour with more unknown cells; even wins ties.
fn preferred_parity(grid: &KnowledgeGrid) -> usize {
    let (even, odd) = grid
        .cells_in(CellState::Unknown)
        .fold((0usize, 0usize), |(e, o), c| {
            if (c.x + c.y) % 2 == 0 {
                (e + 1, o)
            } else {
                (e, o + 1)
            }
        });
    if even >= odd {
        0
    } else {
        1
    }
}

fn first_unknown(grid: &KnowledgeGrid) -> Option<Coordinate> {
    grid.cells_in(CellState::Unknown).next()
}
