#![cfg(feature = "std")]

use salvo::transport::{TcpTransport, Transport};
use salvo::{Message, ShotResult, PROTOCOL_VERSION};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::time::Duration;

/// Accept one connection and write `bytes` to it raw.
async fn serve_raw(bytes: Vec<u8>) -> anyhow::Result<(tokio::task::JoinHandle<()>, TcpTransport)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server_task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        socket.write_all(&bytes).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    });

    let transport = TcpTransport::connect(addr).await?;
    Ok((server_task, transport))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_round_trip_over_tcp() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server_task = tokio::spawn(async move {
        let (socket, _) = listener.accept().await?;
        let mut server = TcpTransport::new(socket);
        let msg = server.recv().await?;
        server.send(msg).await?;
        anyhow::Ok(())
    });

    let mut client = TcpTransport::connect(addr).await?;
    let shot = Message::ShotResp {
        version: PROTOCOL_VERSION,
        seq: 17,
        result: ShotResult::Sunk(4),
    };
    client.send(shot.clone()).await?;
    assert_eq!(client.recv().await?, shot);

    server_task.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_length_prefix() -> anyhow::Result<()> {
    // all 0xFF bytes, far above the frame size cap
    let (server_task, mut transport) = serve_raw(vec![0xFF, 0xFF, 0xFF, 0xFF]).await?;

    let result = transport.recv().await;
    let err_msg = result.unwrap_err().to_string();
    assert!(err_msg.contains("too large"));

    server_task.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_zero_length_frame() -> anyhow::Result<()> {
    let (server_task, mut transport) = serve_raw(vec![0, 0, 0, 0]).await?;

    let result = transport.recv().await;
    assert!(result.is_err());

    server_task.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_truncated_frame() -> anyhow::Result<()> {
    // length prefix says 100 bytes, only 10 follow before close
    let mut bytes = 100u32.to_be_bytes().to_vec();
    bytes.extend_from_slice(&[0u8; 10]);
    let (server_task, mut transport) = serve_raw(bytes).await?;

    let result = tokio::time::timeout(Duration::from_secs(2), transport.recv()).await;
    assert!(result.is_err() || result.unwrap().is_err());

    server_task.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_bincode_payload() -> anyhow::Result<()> {
    let garbage = vec![0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF];
    let mut bytes = (garbage.len() as u32).to_be_bytes().to_vec();
    bytes.extend_from_slice(&garbage);
    let (server_task, mut transport) = serve_raw(bytes).await?;

    let result = transport.recv().await;
    assert!(result.unwrap_err().to_string().contains("Deserialization"));

    server_task.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_closed_connection() -> anyhow::Result<()> {
    let (server_task, mut transport) = serve_raw(Vec::new()).await?;
    server_task.await?;

    let result = transport.recv().await;
    assert!(result.unwrap_err().to_string().contains("closed"));
    Ok(())
}
