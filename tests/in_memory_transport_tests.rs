#![cfg(feature = "std")]

use rand::{rngs::SmallRng, SeedableRng};
use salvo::transport::{InMemoryTransport, Transport};
use salvo::{
    Message, NodeStatus, PlacementStrategy, PlayerNode, ShotResult, SmartPlayer, PROTOCOL_VERSION,
};

fn node(transport: InMemoryTransport) -> PlayerNode {
    let player = SmartPlayer::with_placement(PlacementStrategy::with_limits(30, 3));
    PlayerNode::new(Box::new(player), Box::new(transport))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_messages_cross_in_order() -> anyhow::Result<()> {
    let (mut a, mut b) = InMemoryTransport::pair();
    a.send(Message::Handshake { version: PROTOCOL_VERSION }).await?;
    a.send(Message::ShotResp {
        version: PROTOCOL_VERSION,
        seq: 4,
        result: ShotResult::Sunk(3),
    })
    .await?;

    assert_eq!(b.recv().await?, Message::Handshake { version: PROTOCOL_VERSION });
    assert_eq!(
        b.recv().await?,
        Message::ShotResp {
            version: PROTOCOL_VERSION,
            seq: 4,
            result: ShotResult::Sunk(3),
        }
    );

    b.send(Message::Resign).await?;
    assert_eq!(a.recv().await?, Message::Resign);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dropped_peer_is_reported() {
    let (mut a, b) = InMemoryTransport::pair();
    drop(b);
    assert!(a.recv().await.is_err());
    assert!(a.send(Message::Resign).await.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_in_memory_game_has_one_winner() -> anyhow::Result<()> {
    let (t1, t2) = InMemoryTransport::pair();
    let mut node1 = node(t1);
    let mut node2 = node(t2);
    let mut rng1 = SmallRng::seed_from_u64(1);
    let mut rng2 = SmallRng::seed_from_u64(2);

    let (r1, r2) = tokio::join!(node1.run(&mut rng1, true), node2.run(&mut rng2, false));
    r1?;
    r2?;

    let statuses = (node1.status(), node2.status());
    assert!(
        statuses == (NodeStatus::Won, NodeStatus::Lost)
            || statuses == (NodeStatus::Lost, NodeStatus::Won)
    );
    assert!(node1.shot_count() > 0 && node2.shot_count() > 0);
    assert!(node1.shot_count() >= node2.shot_count());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_version_mismatch_aborts_handshake() -> anyhow::Result<()> {
    let (t1, mut peer) = InMemoryTransport::pair();
    let mut node1 = node(t1);
    let mut rng = SmallRng::seed_from_u64(3);

    let responder = async {
        let hello = peer.recv().await?;
        assert_eq!(hello, Message::Handshake { version: PROTOCOL_VERSION });
        peer.send(Message::HandshakeAck { version: PROTOCOL_VERSION + 1 }).await
    };
    let (run, sent) = tokio::join!(node1.run(&mut rng, true), responder);
    sent?;
    let err = run.unwrap_err();
    assert!(err.to_string().contains("version mismatch"));
    assert_eq!(node1.status(), NodeStatus::InProgress);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_out_of_order_shot_is_rejected() -> anyhow::Result<()> {
    let (t2, mut peer) = InMemoryTransport::pair();
    let mut node2 = node(t2);
    let mut rng = SmallRng::seed_from_u64(4);

    let driver = async {
        peer.send(Message::Handshake { version: PROTOCOL_VERSION }).await?;
        let ack = peer.recv().await?;
        assert_eq!(ack, Message::HandshakeAck { version: PROTOCOL_VERSION });
        peer.send(Message::Shot { version: PROTOCOL_VERSION, seq: 5, x: 0, y: 0 }).await
    };
    let (run, sent) = tokio::join!(node2.run(&mut rng, false), driver);
    sent?;
    let err = run.unwrap_err();
    assert!(err.to_string().contains("Out-of-order"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_resignation_wins_the_game() -> anyhow::Result<()> {
    let (t2, mut peer) = InMemoryTransport::pair();
    let mut node2 = node(t2);
    let mut rng = SmallRng::seed_from_u64(5);

    let driver = async {
        peer.send(Message::Handshake { version: PROTOCOL_VERSION }).await?;
        peer.recv().await?;
        peer.send(Message::Resign).await
    };
    let (run, sent) = tokio::join!(node2.run(&mut rng, false), driver);
    sent?;
    run?;
    assert_eq!(node2.status(), NodeStatus::Won);
    assert_eq!(node2.shot_count(), 0);
    Ok(())
}
