#![cfg(feature = "std")]

use rand::{rngs::SmallRng, SeedableRng};
use salvo::{NodeStatus, PlacementStrategy, PlayerNode, SmartPlayer, TcpTransport};
use tokio::net::TcpListener;

fn player() -> Box<SmartPlayer> {
    Box::new(SmartPlayer::with_placement(PlacementStrategy::with_limits(30, 3)))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_smart_vs_smart_tcp_game() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    // Server Task
    let server_future = tokio::spawn(async move {
        let (socket, _) = listener.accept().await?;
        let mut rng = SmallRng::seed_from_u64(10);
        let mut node = PlayerNode::new(player(), Box::new(TcpTransport::new(socket)));
        node.run(&mut rng, true).await?;
        Ok::<_, anyhow::Error>((node.status(), node.shot_count()))
    });

    // Client Task
    let client_future = tokio::spawn(async move {
        let transport = TcpTransport::connect(addr).await?;
        let mut rng = SmallRng::seed_from_u64(11);
        let mut node = PlayerNode::new(player(), Box::new(transport));
        node.run(&mut rng, false).await?;
        Ok::<_, anyhow::Error>((node.status(), node.shot_count()))
    });

    let (server, client) = tokio::try_join!(server_future, client_future)?;
    let (server_status, server_shots) = server?;
    let (client_status, client_shots) = client?;

    assert_ne!(server_status, client_status);
    assert!(matches!(server_status, NodeStatus::Won | NodeStatus::Lost));
    assert!(matches!(client_status, NodeStatus::Won | NodeStatus::Lost));
    assert!(server_shots > 0 && client_shots > 0);
    Ok(())
}
