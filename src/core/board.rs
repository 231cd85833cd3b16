//! A player's own board: the fleet it placed and the shots it received.

use alloc::vec::Vec;
use core::fmt;

use super::bitboard::FleetMask;
use super::common::{BoardError, ShotResult};
use super::coord::Coordinate;
use super::rules;
use super::ship::{Ship, ShipPlacement};

/// Adjudicates shots against a placed fleet.
pub struct Board {
    ships: Vec<Ship>,
    ship_map: FleetMask,
    shots: FleetMask,
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new() -> Self {
        Board {
            ships: Vec::new(),
            ship_map: FleetMask::new(),
            shots: FleetMask::new(),
        }
    }

    /// Replace the fleet with `placements` after validating the whole layout.
    /// On error the board is left unchanged.
    pub fn place_fleet(&mut self, placements: &[ShipPlacement]) -> Result<(), BoardError> {
        let ships: Vec<Ship> = placements.iter().map(ShipPlacement::to_ship).collect();
        if !rules::validate_fleet(&ships) {
            return Err(BoardError::InvalidFleet);
        }
        self.ship_map = ships.iter().fold(FleetMask::new(), |acc, s| acc | s.mask());
        self.ships = ships;
        self.shots = FleetMask::new();
        Ok(())
    }

    /// Placed ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Board occupancy mask of all ships.
    pub fn ship_map(&self) -> FleetMask {
        self.ship_map
    }

    /// Returns `true` once a fleet is placed and every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Number of shots received so far.
    pub fn shots_received(&self) -> usize {
        self.shots.count_ones()
    }

    /// Process a shot at `coord`, reporting miss, hit or the size of the ship
    /// it sank.
    pub fn receive_shot(&mut self, coord: Coordinate) -> Result<ShotResult, BoardError> {
        if !coord.is_valid() {
            return Err(BoardError::OutOfBounds {
                x: coord.x,
                y: coord.y,
            });
        }
        if self.shots.get(coord.x, coord.y)? {
            return Err(BoardError::AlreadyShot {
                x: coord.x,
                y: coord.y,
            });
        }
        self.shots.set(coord.x, coord.y)?;

        if !self.ship_map.get(coord.x, coord.y)? {
            return Ok(ShotResult::Miss);
        }
        let ship = self
            .ships
            .iter_mut()
            .find(|s| s.contains(coord))
            .ok_or(BoardError::ShipCellMissing)?;
        ship.record_hit(coord);
        if ship.is_sunk() {
            Ok(ShotResult::Sunk(ship.size()))
        } else {
            Ok(ShotResult::Hit)
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  shots: {:?},\n  ships: {:?}\n}}",
            self.ship_map, self.shots, self.ships
        )
    }
}
