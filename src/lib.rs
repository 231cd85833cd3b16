#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;
mod game;
#[cfg(feature = "std")]
pub mod game_log;
#[cfg(feature = "std")]
mod logging;
pub mod player;
#[cfg(feature = "std")]
pub mod player_node;
pub mod protocol;
#[cfg(feature = "std")]
pub mod tournament;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;
pub use game::*;
#[cfg(feature = "std")]
pub use game_log::GameLog;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::*;
#[cfg(feature = "std")]
pub use player_node::*;
pub use protocol::*;
#[cfg(feature = "std")]
pub use tournament::{Standing, TournamentClient, TournamentSession};
#[cfg(feature = "std")]
pub use transport::{InMemoryTransport, TcpTransport, Transport};
