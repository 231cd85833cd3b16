//! Message transports between two player nodes.

use crate::protocol::Message;

/// Ordered, reliable delivery of [`Message`]s to a single peer.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    /// Next message from the peer. Fails once the peer is gone.
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;
pub mod tcp;

pub use in_memory::InMemoryTransport;
pub use tcp::TcpTransport;
