use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::Transport;

/// Default timeout for a single send or receive.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest accepted frame payload. Every message is a few dozen bytes.
pub const MAX_MESSAGE_SIZE: u32 = 64 * 1024;

/// Frames are a 4-byte big-endian length followed by a bincode payload.
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self::with_config(stream, timeout_duration, MAX_MESSAGE_SIZE)
    }

    pub fn with_config(stream: TcpStream, timeout_duration: Duration, max_message_size: u32) -> Self {
        // Shots are tiny and latency bound.
        let _ = stream.set_nodelay(true);
        Self {
            stream,
            timeout_duration,
            max_message_size,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

fn io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe => anyhow::anyhow!("Connection closed by peer"),
        ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        _ => anyhow::anyhow!("I/O error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let data = bincode::serialize(&msg)
            .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
        if data.len() > self.max_message_size as usize {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                data.len(),
                self.max_message_size
            ));
        }

        let duration = self.timeout_duration;
        let stream = &mut self.stream;
        let send_op = async {
            let len = (data.len() as u32).to_be_bytes();
            stream.write_all(&len).await.map_err(io_error)?;
            stream.write_all(&data).await.map_err(io_error)?;
            stream.flush().await.map_err(io_error)
        };
        timeout(duration, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", duration))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let max = self.max_message_size;
        let duration = self.timeout_duration;
        let stream = &mut self.stream;
        let recv_op = async {
            let mut len_buf = [0u8; 4];
            stream.read_exact(&mut len_buf).await.map_err(io_error)?;
            let len = u32::from_be_bytes(len_buf);
            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }
            if len > max {
                return Err(anyhow::anyhow!("Message too large: {} bytes (max: {})", len, max));
            }

            let mut buf = vec![0u8; len as usize];
            stream.read_exact(&mut buf).await.map_err(io_error)?;
            bincode::deserialize::<Message>(&buf).map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
        };
        timeout(duration, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", duration))?
    }
}
