use crate::core::ShotResult;

/// Version carried by every versioned message; peers must agree on it.
pub const PROTOCOL_VERSION: u32 = 1;

/// Messages exchanged between two player nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    /// Opens the session; sent by the node that moves first.
    Handshake { version: u32 },
    /// Accepts the session.
    HandshakeAck { version: u32 },
    /// A shot at `(x, y)`; `seq` counts the sender's shots from zero.
    Shot { version: u32, seq: u64, x: u8, y: u8 },
    /// Adjudication of the shot with the same `seq`.
    ShotResp {
        version: u32,
        seq: u64,
        result: ShotResult,
    },
    /// The sender gives up the game.
    Resign,
}
