use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::core::{
    placement::random_layout, BoardError, Coordinate, FleetMask, ShipPlacement, ShotResult,
    PLACEMENT_FALLBACK_ATTEMPTS,
};

use super::Player;

/// Baseline player: random legal fleet, uniformly random unshot cells.
pub struct RandomPlayer {
    shots: FleetMask,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            shots: FleetMask::new(),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng) -> Result<Vec<ShipPlacement>, BoardError> {
        (0..PLACEMENT_FALLBACK_ATTEMPTS)
            .find_map(|_| random_layout(&mut *rng))
            .ok_or(BoardError::UnableToPlaceShip)
    }

    fn next_shot(&mut self, rng: &mut SmallRng) -> Option<Coordinate> {
        let available: Vec<Coordinate> = Coordinate::all()
            .filter(|c| !self.shots.get(c.x, c.y).unwrap_or(true))
            .collect();
        if available.is_empty() {
            return None;
        }
        Some(available[rng.random_range(0..available.len())])
    }

    fn on_shot_result(&mut self, coord: Coordinate, _result: ShotResult) -> Result<(), BoardError> {
        self.shots.set(coord.x, coord.y)?;
        Ok(())
    }

    fn reset(&mut self) {
        self.shots = FleetMask::new();
    }
}
