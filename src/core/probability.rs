//! Placement-counting heatmaps over the opponent board.
//!
//! Every legal placement of every remaining size is enumerated; the map is
//! rebuilt from scratch for each shot decision.

use super::common::{CellState, KnowledgeGrid};
use super::config::{BOARD_SIZE, PATTERN_THINNING_DIVISOR};
use super::coord::{Coordinate, Direction};
use super::rules::can_place_on_knowledge_grid;
use super::ship::ShipPlacement;

/// Per-cell count of legal hypothetical placements, indexed `[y][x]`.
pub type Heatmap = [[u32; BOARD_SIZE]; BOARD_SIZE];

/// Count, for every cell, how many legal placements of the ships in `sizes`
/// cover it. With a non-empty `required_hits` only placements covering at
/// least one of those cells are counted. Cells that are not unknown end up
/// at zero.
pub fn calculate(grid: &KnowledgeGrid, sizes: &[usize], required_hits: &[Coordinate]) -> Heatmap {
    let mut map = [[0u32; BOARD_SIZE]; BOARD_SIZE];

    for &size in sizes {
        if size == 0 || size > BOARD_SIZE {
            continue;
        }
        for placement in placements_of(size) {
            if !can_place_on_knowledge_grid(&placement, grid) {
                continue;
            }
            if !required_hits.is_empty()
                && !placement.cells().any(|c| required_hits.contains(&c))
            {
                continue;
            }
            for c in placement.cells() {
                map[c.y][c.x] += 1;
            }
        }
    }

    zero_resolved(&mut map, grid);
    map
}

/// Heatmap over every legal placement, used while hunting.
pub fn calculate_standard(grid: &KnowledgeGrid, sizes: &[usize]) -> Heatmap {
    calculate(grid, sizes, &[])
}

/// Heatmap restricted to placements through at least one of `hits`.
pub fn calculate_hit_aware(grid: &KnowledgeGrid, sizes: &[usize], hits: &[Coordinate]) -> Heatmap {
    calculate(grid, sizes, hits)
}

/// Every in-bounds anchor and direction for a ship of `size`: horizontal
/// anchors first, then vertical, each row-major.
pub(crate) fn placements_of(size: usize) -> impl Iterator<Item = ShipPlacement> {
    Direction::ALL.into_iter().flat_map(move |direction| {
        let (max_x, max_y) = match direction {
            Direction::Horizontal => (BOARD_SIZE - size, BOARD_SIZE - 1),
            Direction::Vertical => (BOARD_SIZE - 1, BOARD_SIZE - size),
        };
        (0..=max_y).flat_map(move |y| {
            (0..=max_x).map(move |x| ShipPlacement::new(size, Coordinate::new(x, y), direction))
        })
    })
}

fn zero_resolved(map: &mut Heatmap, grid: &KnowledgeGrid) {
    for c in Coordinate::all() {
        if grid.get(c) != CellState::Unknown {
            map[c.y][c.x] = 0;
        }
    }
}

/// Diagonal stripe pattern: one cell in three, tiling size-3 ships.
#[inline]
pub fn is_stripe_cell(c: Coordinate) -> bool {
    c.x % 3 == c.y % 3
}

/// Divide down every cell off the diagonal stripe pattern.
pub fn apply_pattern_thinning(map: &Heatmap) -> Heatmap {
    let mut thinned = *map;
    for c in Coordinate::all() {
        if !is_stripe_cell(c) {
            thinned[c.y][c.x] /= PATTERN_THINNING_DIVISOR;
        }
    }
    thinned
}

/// Value of the heatmap at `c`.
#[inline]
pub fn weight(map: &Heatmap, c: Coordinate) -> u32 {
    map[c.y][c.x]
}

/// Scale a heatmap into a distribution summing to one. An all-zero map
/// becomes uniform.
pub fn normalize(map: &Heatmap) -> [[f64; BOARD_SIZE]; BOARD_SIZE] {
    let total: u64 = map.iter().flatten().map(|&v| u64::from(v)).sum();
    let mut out = [[0.0f64; BOARD_SIZE]; BOARD_SIZE];
    if total == 0 {
        let uniform = 1.0 / (BOARD_SIZE * BOARD_SIZE) as f64;
        for row in out.iter_mut() {
            row.fill(uniform);
        }
        return out;
    }
    for (dst, src) in out.iter_mut().zip(map.iter()) {
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d = f64::from(s) / total as f64;
        }
    }
    out
}
