//! Own-fleet layout generation.
//!
//! Many random legal layouts are drawn and scored for unpredictability; the
//! final layout is picked at random among the best few so that the choice
//! itself is not deterministic. Layouts are drawn greedily, largest ship
//! first, and a draw that dead-ends is discarded rather than backtracked.

use alloc::vec::Vec;
use rand::Rng;

use super::bitboard::FleetMask;
use super::common::BoardError;
use super::config::{
    BOARD_SIZE, FLEET, PLACEMENT_CANDIDATES, PLACEMENT_FALLBACK_ATTEMPTS, PLACEMENT_TOP_N,
    PREFERRED_SHIP_GAP,
};
use super::coord::{Coordinate, Direction};
use super::probability::placements_of;
use super::rules::{exclusion_zone, fits_outside};
use super::ship::{Ship, ShipPlacement};

const BASE_SCORE: f64 = 100.0;
const SYMMETRY_WEIGHT: f64 = 20.0;
const PROXIMITY_WEIGHT: f64 = 15.0;
const ENTROPY_WEIGHT: f64 = 10.0;
const EDGE_WEIGHT: f64 = 5.0;
const ORIENTATION_WEIGHT: f64 = 15.0;
const JITTER: f64 = 5.0;

/// Fleet layout generator.
#[derive(Debug, Clone, Copy)]
pub struct PlacementStrategy {
    candidates: usize,
    top_n: usize,
}

impl PlacementStrategy {
    pub fn new() -> Self {
        Self {
            candidates: PLACEMENT_CANDIDATES,
            top_n: PLACEMENT_TOP_N,
        }
    }

    /// Use a different number of candidate draws and selection pool size.
    pub fn with_limits(candidates: usize, top_n: usize) -> Self {
        Self {
            candidates,
            top_n: top_n.max(1),
        }
    }

    /// A legal layout of the full fleet, drawn from the best-scoring
    /// candidates.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<ShipPlacement>, BoardError> {
        let mut scored: Vec<(Vec<ShipPlacement>, f64)> = Vec::new();
        for _ in 0..self.candidates {
            if let Some(layout) = random_layout(rng) {
                let score = evaluate(&layout, rng);
                if score > 0.0 {
                    scored.push((layout, score));
                }
            }
        }

        if scored.is_empty() {
            log::debug!("no positively scored layout, drawing unscored");
            return (0..PLACEMENT_FALLBACK_ATTEMPTS)
                .find_map(|_| random_layout(&mut *rng))
                .ok_or(BoardError::UnableToPlaceShip);
        }

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(self.top_n);
        let pick = rng.random_range(0..scored.len());
        log::debug!(
            "picked layout {} of {} (score {:.2})",
            pick + 1,
            scored.len(),
            scored[pick].1
        );
        Ok(scored.swap_remove(pick).0)
    }
}

impl Default for PlacementStrategy {
    fn default() -> Self {
        Self::new()
    }
}

/// One greedy draw: each ship, largest first, takes a uniformly random legal
/// spot given the ships already drawn. `None` if some ship has no spot left.
pub fn random_layout<R: Rng + ?Sized>(rng: &mut R) -> Option<Vec<ShipPlacement>> {
    let mut layout = Vec::with_capacity(FLEET.len());
    let mut occupied = FleetMask::new();

    for size in FLEET {
        let zone = exclusion_zone(occupied);
        let options: Vec<Ship> = placements_of(size)
            .map(|p| p.to_ship())
            .filter(|ship| fits_outside(ship, &zone))
            .collect();
        if options.is_empty() {
            return None;
        }
        let ship = options[rng.random_range(0..options.len())];
        occupied |= ship.mask();
        layout.push(ship.placement());
    }
    Some(layout)
}

/// Unpredictability score of a layout; higher is better. Includes a small
/// random jitter.
pub fn evaluate<R: Rng + ?Sized>(layout: &[ShipPlacement], rng: &mut R) -> f64 {
    let ships: Vec<Ship> = layout.iter().map(ShipPlacement::to_ship).collect();
    BASE_SCORE - symmetry_penalty(&ships) * SYMMETRY_WEIGHT - proximity_penalty(&ships) * PROXIMITY_WEIGHT
        + entropy_bonus(&ships) * ENTROPY_WEIGHT
        - edge_penalty(&ships) * EDGE_WEIGHT
        + orientation_mix(layout) * ORIENTATION_WEIGHT
        + rng.random::<f64>() * JITTER
}

/// Half a point per occupied cell whose mirror across the vertical centre
/// line is occupied, and half per cell whose mirror across the horizontal
/// centre line is.
pub fn symmetry_penalty(ships: &[Ship]) -> f64 {
    let occupied = ships.iter().fold(FleetMask::new(), |acc, s| acc | s.mask());
    let mut penalty = 0.0;
    for (x, y) in occupied.iter_set_bits() {
        if occupied.get(BOARD_SIZE - x, y).unwrap_or(false) {
            penalty += 0.5;
        }
        if occupied.get(x, BOARD_SIZE - y).unwrap_or(false) {
            penalty += 0.5;
        }
    }
    penalty
}

/// For each pair of ships closer than the preferred gap, the shortfall.
pub fn proximity_penalty(ships: &[Ship]) -> f64 {
    let mut penalty = 0usize;
    for (i, a) in ships.iter().enumerate() {
        for b in &ships[i + 1..] {
            let d = min_manhattan(a, b);
            if d < PREFERRED_SHIP_GAP {
                penalty += PREFERRED_SHIP_GAP - d;
            }
        }
    }
    penalty as f64
}

fn min_manhattan(a: &Ship, b: &Ship) -> usize {
    a.cells()
        .flat_map(|ca| b.cells().map(move |cb| ca.manhattan(&cb)))
        .min()
        .unwrap_or(usize::MAX)
}

/// Spread of the occupied cells: variance of x plus variance of y, over ten.
pub fn entropy_bonus(ships: &[Ship]) -> f64 {
    let cells: Vec<Coordinate> = ships.iter().flat_map(Ship::cells).collect();
    if cells.is_empty() {
        return 0.0;
    }
    let n = cells.len() as f64;
    let mean_x = cells.iter().map(|c| c.x as f64).sum::<f64>() / n;
    let mean_y = cells.iter().map(|c| c.y as f64).sum::<f64>() / n;
    let var_x = cells.iter().map(|c| (c.x as f64 - mean_x) * (c.x as f64 - mean_x)).sum::<f64>() / n;
    let var_y = cells.iter().map(|c| (c.y as f64 - mean_y) * (c.y as f64 - mean_y)).sum::<f64>() / n;
    (var_x + var_y) / 10.0
}

/// One point per cell on the outer ring, 0.3 per cell one ring in.
pub fn edge_penalty(ships: &[Ship]) -> f64 {
    ships
        .iter()
        .flat_map(Ship::cells)
        .map(|c| {
            let edge = c.x.min(c.y).min(BOARD_SIZE - 1 - c.x).min(BOARD_SIZE - 1 - c.y);
            match edge {
                0 => 1.0,
                1 => 0.3,
                _ => 0.0,
            }
        })
        .sum()
}

/// Best at an even split between horizontal and vertical ships, with a half
/// point extra when the horizontal share lies in `[0.35, 0.65]`.
pub fn orientation_mix(layout: &[ShipPlacement]) -> f64 {
    if layout.is_empty() {
        return 0.0;
    }
    let horizontal = layout
        .iter()
        .filter(|p| p.direction == Direction::Horizontal)
        .count();
    let ratio = horizontal as f64 / layout.len() as f64;
    let mix = 1.0 - libm::fabs(ratio - 0.5) * 2.0;
    let bonus = if (0.35..=0.65).contains(&ratio) { 0.5 } else { 0.0 };
    mix + bonus
}
