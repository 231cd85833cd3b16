//! Player trait and implementations
//!
//! This module defines the Player trait, the contract every orchestrator
//! drives, and provides concrete implementations:
//! - SmartPlayer: heatmap-driven hunt/target decision engine
//! - RandomPlayer: uniform random shooter used as a baseline

use alloc::vec::Vec;
use rand::rngs::SmallRng;

use crate::core::{BoardError, Coordinate, ShipPlacement, ShotResult};

/// Interface implemented by different player types.
///
/// A Player is responsible for:
/// - Laying out its own fleet
/// - Choosing the next cell to shoot
/// - Absorbing the results of its own shots
pub trait Player: Send {
    /// Produce a legal layout of the full fleet.
    fn place_ships(&mut self, rng: &mut SmallRng) -> Result<Vec<ShipPlacement>, BoardError>;

    /// Choose the next cell to shoot. `None` once every cell has been shot.
    fn next_shot(&mut self, rng: &mut SmallRng) -> Option<Coordinate>;

    /// Inform the player of the result of its last shot. Must be called once
    /// per shot, before the next call to `next_shot`.
    fn on_shot_result(&mut self, coord: Coordinate, result: ShotResult) -> Result<(), BoardError>;

    /// Inform the player of an opponent shot against its board.
    fn on_opponent_shot(&mut self, _coord: Coordinate, _result: ShotResult) {}

    /// Forget all per-game state so the instance can play another game.
    fn reset(&mut self);
}

pub mod random;
pub mod smart;

pub use random::RandomPlayer;
pub use smart::SmartPlayer;
