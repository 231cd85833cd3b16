//! Placement rules: bounds, overlap and the no-touch rule.
//!
//! Ships may share a diagonal corner but never an edge. The same rules are
//! checked two ways: against concrete ships (fleet layouts) and against a
//! knowledge grid (hypothetical placements over partial information).

use alloc::vec::Vec;

use super::bitboard::FleetMask;
use super::common::KnowledgeGrid;
use super::config::FLEET;
use super::ship::{Ship, ShipPlacement};

/// Cells a new ship may not cover given the ships in `occupied`: the ships
/// themselves plus their orthogonal halo.
pub fn exclusion_zone(occupied: FleetMask) -> FleetMask {
    occupied | occupied.orthogonal_halo()
}

/// `ship` is on the board and stays clear of `zone` (see [`exclusion_zone`]).
pub fn fits_outside(ship: &Ship, zone: &FleetMask) -> bool {
    ship.is_in_bounds() && !ship.mask().intersects(zone)
}

/// `ship` is in bounds, overlaps no existing ship and touches none of them
/// orthogonally.
pub fn can_place(ship: &Ship, existing: &[Ship]) -> bool {
    if !ship.is_in_bounds() {
        return false;
    }
    let mask = ship.mask();
    existing
        .iter()
        .all(|other| !mask.intersects(&other.mask()) && !mask.intersects(&other.orthogonal_halo()))
}

/// `placement` could hold an unseen ship given what is known: it is in
/// bounds, covers no miss, sunk or blocked cell, and none of its cells
/// borders a sunk cell.
pub fn can_place_on_knowledge_grid(placement: &ShipPlacement, grid: &KnowledgeGrid) -> bool {
    if !placement.is_in_bounds() {
        return false;
    }
    placement
        .cells()
        .all(|c| !grid.get(c).excludes_ship() && !grid.touches_sunk(c))
}

/// The fleet has exactly the standard size multiset and no two ships
/// overlap or touch orthogonally.
pub fn validate_fleet(ships: &[Ship]) -> bool {
    let mut sizes: Vec<usize> = ships.iter().map(|s| s.size()).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    if sizes.as_slice() != FLEET.as_slice() {
        return false;
    }
    ships
        .iter()
        .enumerate()
        .all(|(i, ship)| can_place(ship, &ships[..i]))
}

/// [`validate_fleet`] for placement intents.
pub fn validate_placements(placements: &[ShipPlacement]) -> bool {
    let ships: Vec<Ship> = placements.iter().map(ShipPlacement::to_ship).collect();
    validate_fleet(&ships)
}
