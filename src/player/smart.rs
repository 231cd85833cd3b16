use alloc::vec::Vec;
use rand::rngs::SmallRng;

use crate::core::{
    BoardError, Coordinate, HuntMode, PlacementStrategy, ShipPlacement, ShotResult, TargetMode,
    TrackingBoard,
};

use super::Player;

/// Decision engine: places an unpredictable fleet and hunts with
/// probability heatmaps, switching to line targeting after a hit.
pub struct SmartPlayer {
    tracking: TrackingBoard,
    placement: PlacementStrategy,
}

impl SmartPlayer {
    pub fn new() -> Self {
        Self::with_placement(PlacementStrategy::new())
    }

    /// Use a custom placement generator, e.g. with fewer candidates.
    pub fn with_placement(placement: PlacementStrategy) -> Self {
        Self {
            tracking: TrackingBoard::new(),
            placement,
        }
    }

    /// The opponent model built from our shots so far.
    pub fn tracking(&self) -> &TrackingBoard {
        &self.tracking
    }

    /// Pick the next shot from the tracking board alone.
    ///
    /// Hunting uses every ship still afloat. Targeting only considers ships
    /// large enough to own the current hit line, and falls back to the
    /// hit-aware heatmap when no line cell is open.
    pub fn choose_shot(&self) -> Option<Coordinate> {
        let grid = self.tracking.grid();
        let active = self.tracking.active_hits();

        if self.tracking.is_hunting() {
            return HuntMode::new(grid, self.tracking.remaining_ships()).find_best_shot();
        }

        let candidates = self.tracking.filtered_remaining_ships();
        TargetMode::new(grid, &candidates)
            .find_best_target(active)
            .or_else(|| {
                log::debug!("no line target around {:?}, using hit-aware heatmap", active);
                HuntMode::new(grid, &candidates).find_best_shot_with_hits(active)
            })
    }
}

impl Default for SmartPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for SmartPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng) -> Result<Vec<ShipPlacement>, BoardError> {
        self.placement.generate(rng)
    }

    fn next_shot(&mut self, _rng: &mut SmallRng) -> Option<Coordinate> {
        self.choose_shot()
    }

    fn on_shot_result(&mut self, coord: Coordinate, result: ShotResult) -> Result<(), BoardError> {
        self.tracking.record_shot(coord, result)
    }

    fn reset(&mut self) {
        self.tracking.reset();
    }
}
