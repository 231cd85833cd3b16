//! Fixed game parameters and strategy tuning constants.

/// Side length of the square board.
pub const BOARD_SIZE: usize = 10;

/// Number of ships in every fleet.
pub const NUM_SHIPS: usize = 10;

/// Ship sizes of the standard fleet, largest first.
pub const FLEET: [usize; NUM_SHIPS] = [5, 4, 4, 3, 3, 3, 2, 2, 2, 2];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 4 + 3 + 3 + 3 + 2 + 2 + 2 + 2;

/// Multiplier applied to heatmap values of cells on the active hunt pattern.
pub const PATTERN_BONUS: u32 = 10;

/// Divisor applied to off-pattern cells by the pattern thinning transform.
pub const PATTERN_THINNING_DIVISOR: u32 = 10;

/// Random fleets drawn per placement decision.
pub const PLACEMENT_CANDIDATES: usize = 1000;

/// Size of the best-scoring pool the final layout is drawn from.
pub const PLACEMENT_TOP_N: usize = 10;

/// Upper bound on unscored draws when no candidate scored positive.
pub const PLACEMENT_FALLBACK_ATTEMPTS: usize = 10_000;

/// Manhattan distance below which two ships are considered crowded.
pub const PREFERRED_SHIP_GAP: usize = 3;

