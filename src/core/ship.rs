//! Ships and ship placements.

use core::fmt;

use super::bitboard::FleetMask;
use super::coord::{Coordinate, Direction};

/// The intent to put a ship of `size` at `anchor`, extending along
/// `direction`. Carries no hit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    pub size: usize,
    pub anchor: Coordinate,
    pub direction: Direction,
}

impl ShipPlacement {
    pub const fn new(size: usize, anchor: Coordinate, direction: Direction) -> Self {
        Self {
            size,
            anchor,
            direction,
        }
    }

    /// A live ship with no hits recorded.
    pub fn to_ship(&self) -> Ship {
        Ship::new(self.size, self.anchor, self.direction)
    }

    /// The cells this placement would cover. Cells that would fall off the
    /// board are omitted, so an out-of-bounds placement yields fewer than
    /// `size` cells.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let (dx, dy) = self.direction.step();
        let anchor = self.anchor;
        (0..self.size).filter_map(move |i| {
            let c = Coordinate::new(
                anchor.x.wrapping_add_signed(dx * i as isize),
                anchor.y.wrapping_add_signed(dy * i as isize),
            );
            c.is_valid().then_some(c)
        })
    }

    /// Every cell lies on the board.
    pub fn is_in_bounds(&self) -> bool {
        self.size > 0 && self.anchor.is_valid() && self.cells().count() == self.size
    }
}

impl fmt::Display for ShipPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size={} pos={} dir={}",
            self.size,
            self.anchor,
            self.direction.as_log_str()
        )
    }
}

/// A ship on a board, tracking which of its own cells have been hit.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    placement: ShipPlacement,
    mask: FleetMask,
    hits: FleetMask,
}

impl Ship {
    /// Build a ship from its anchor and direction. Cells that fall off the
    /// board are left out of the mask; check `is_in_bounds` before use.
    pub fn new(size: usize, anchor: Coordinate, direction: Direction) -> Self {
        let placement = ShipPlacement::new(size, anchor, direction);
        let mut mask = FleetMask::new();
        for c in placement.cells() {
            // cells() only yields in-bounds coordinates
            let _ = mask.set(c.x, c.y);
        }
        Ship {
            placement,
            mask,
            hits: FleetMask::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.placement.size
    }

    pub fn anchor(&self) -> Coordinate {
        self.placement.anchor
    }

    pub fn direction(&self) -> Direction {
        self.placement.direction
    }

    pub fn placement(&self) -> ShipPlacement {
        self.placement
    }

    /// Occupied cells, from the anchor outward.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        self.placement.cells()
    }

    pub fn is_in_bounds(&self) -> bool {
        self.placement.is_in_bounds()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.mask.get(coord.x, coord.y).unwrap_or(false)
    }

    /// Register a shot at `coord`. Returns `true` if it belongs to this ship.
    pub fn record_hit(&mut self, coord: Coordinate) -> bool {
        if self.contains(coord) {
            let _ = self.hits.set(coord.x, coord.y);
            true
        } else {
            false
        }
    }

    pub fn hit_count(&self) -> usize {
        self.hits.count_ones()
    }

    pub fn is_sunk(&self) -> bool {
        self.hits.count_ones() == self.placement.size
    }

    /// Occupancy mask of the ship.
    pub fn mask(&self) -> FleetMask {
        self.mask
    }

    /// Cells orthogonally adjacent to the ship, excluding its own cells.
    pub fn orthogonal_halo(&self) -> FleetMask {
        self.mask.orthogonal_halo()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ size: {}, anchor: {}, direction: {:?}, hits: {} }}",
            self.placement.size,
            self.placement.anchor,
            self.placement.direction,
            self.hits.count_ones(),
        )
    }
}
