//! Core decision engine and rules (no_std compatible)
//!
//! This module holds the pure game logic: grid primitives, placement rules,
//! the opponent tracking board, the probability engine and the hunt, target
//! and placement strategies. It needs only `alloc` and can be built without
//! the `std` feature.

pub mod bitboard;
pub mod board;
pub mod common;
pub mod config;
pub mod coord;
pub mod hunt;
pub mod placement;
pub mod probability;
pub mod rules;
pub mod ship;
pub mod target;
pub mod tracking;

// Re-export commonly used types
pub use bitboard::{BitBoard, BitBoardError, FleetMask};
pub use board::Board;
pub use common::{BoardError, CellState, KnowledgeGrid, ShotResult};
pub use config::*;
pub use coord::{Coordinate, Direction};
pub use hunt::{HuntMode, HuntPattern};
pub use placement::PlacementStrategy;
pub use probability::Heatmap;
pub use rules::{can_place, can_place_on_knowledge_grid, validate_fleet, validate_placements};
pub use ship::{Ship, ShipPlacement};
pub use target::TargetMode;
pub use tracking::TrackingBoard;
