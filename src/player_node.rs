#![cfg(feature = "std")]

//! One side of a networked game.
//!
//! A node owns a player, the board holding that player's fleet, and a
//! transport to the peer node. The peer adjudicates our shots on its board
//! and we adjudicate its shots on ours.

use alloc::boxed::Box;
use rand::rngs::SmallRng;

use crate::core::{Board, Coordinate, ShotResult, NUM_SHIPS};
use crate::player::Player;
use crate::protocol::{Message, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Where a node's game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    InProgress,
    Won,
    Lost,
}

pub struct PlayerNode {
    player: Box<dyn Player>,
    board: Board,
    transport: Box<dyn Transport>,
    shots: usize,
    ships_sunk: usize,
    status: NodeStatus,
}

impl PlayerNode {
    pub fn new(player: Box<dyn Player>, transport: Box<dyn Transport>) -> Self {
        Self {
            player,
            board: Board::new(),
            transport,
            shots: 0,
            ships_sunk: 0,
            status: NodeStatus::InProgress,
        }
    }

    /// Perform handshake to establish protocol version.
    async fn handshake(&mut self, initiator: bool) -> anyhow::Result<()> {
        if initiator {
            self.transport
                .send(Message::Handshake {
                    version: PROTOCOL_VERSION,
                })
                .await?;
            match self.transport.recv().await? {
                Message::HandshakeAck { version } if version == PROTOCOL_VERSION => Ok(()),
                Message::HandshakeAck { version } => Err(anyhow::anyhow!(
                    "Protocol version mismatch in HandshakeAck: expected {}, got {}",
                    PROTOCOL_VERSION,
                    version
                )),
                other => Err(anyhow::anyhow!("Expected HandshakeAck, got {:?}", other)),
            }
        } else {
            match self.transport.recv().await? {
                Message::Handshake { version } if version == PROTOCOL_VERSION => {
                    self.transport
                        .send(Message::HandshakeAck {
                            version: PROTOCOL_VERSION,
                        })
                        .await
                }
                Message::Handshake { version } => Err(anyhow::anyhow!(
                    "Protocol version mismatch in Handshake: expected {}, got {}",
                    PROTOCOL_VERSION,
                    version
                )),
                other => Err(anyhow::anyhow!("Expected Handshake, got {:?}", other)),
            }
        }
    }

    /// Place the fleet, handshake, then play until one side has lost.
    /// The node with `first_move` opens the session and shoots first.
    pub async fn run(&mut self, rng: &mut SmallRng, first_move: bool) -> anyhow::Result<()> {
        let layout = self.player.place_ships(rng).map_err(|e| anyhow::anyhow!(e))?;
        self.board.place_fleet(&layout).map_err(|e| anyhow::anyhow!(e))?;

        self.handshake(first_move).await?;
        log::debug!("handshake complete (first_move={})", first_move);

        let mut my_turn = first_move;
        let mut my_seq: u64 = 0;
        let mut expected_recv_seq: u64 = 0;
        while self.status == NodeStatus::InProgress {
            if my_turn {
                self.take_shot(rng, my_seq).await?;
                my_seq += 1;
            } else {
                self.answer_shot(expected_recv_seq).await?;
                expected_recv_seq += 1;
            }
            my_turn = !my_turn;
        }
        log::info!("game finished: {:?} after {} shots", self.status, self.shots);
        Ok(())
    }

    async fn take_shot(&mut self, rng: &mut SmallRng, seq: u64) -> anyhow::Result<()> {
        let Some(shot) = self.player.next_shot(rng) else {
            self.transport.send(Message::Resign).await?;
            self.status = NodeStatus::Lost;
            return Ok(());
        };
        self.transport
            .send(Message::Shot {
                version: PROTOCOL_VERSION,
                seq,
                x: shot.x as u8,
                y: shot.y as u8,
            })
            .await?;

        let result = match self.transport.recv().await? {
            Message::ShotResp {
                version,
                seq: resp_seq,
                result,
            } if version == PROTOCOL_VERSION && resp_seq == seq => result,
            Message::ShotResp {
                version,
                seq: resp_seq,
                ..
            } => {
                return Err(anyhow::anyhow!(
                    "Mismatched ShotResp: expected version {} seq {}, got version {} seq {}",
                    PROTOCOL_VERSION,
                    seq,
                    version,
                    resp_seq
                ))
            }
            Message::Resign => {
                self.status = NodeStatus::Won;
                return Ok(());
            }
            other => return Err(anyhow::anyhow!("Expected ShotResp, got {:?}", other)),
        };

        self.shots += 1;
        self.player
            .on_shot_result(shot, result)
            .map_err(|e| anyhow::anyhow!(e))?;
        if matches!(result, ShotResult::Sunk(_)) {
            self.ships_sunk += 1;
            if self.ships_sunk == NUM_SHIPS {
                self.status = NodeStatus::Won;
            }
        }
        Ok(())
    }

    async fn answer_shot(&mut self, expected_seq: u64) -> anyhow::Result<()> {
        let (x, y) = match self.transport.recv().await? {
            Message::Shot { version, seq, x, y } => {
                if version != PROTOCOL_VERSION {
                    return Err(anyhow::anyhow!(
                        "Protocol version mismatch in Shot: expected {}, got {}",
                        PROTOCOL_VERSION,
                        version
                    ));
                }
                if seq != expected_seq {
                    return Err(anyhow::anyhow!(
                        "Out-of-order Shot: expected seq {}, got {}",
                        expected_seq,
                        seq
                    ));
                }
                (x, y)
            }
            Message::Resign => {
                self.status = NodeStatus::Won;
                return Ok(());
            }
            other => return Err(anyhow::anyhow!("Expected Shot, got {:?}", other)),
        };

        let coord = Coordinate::new(x as usize, y as usize);
        let result = self
            .board
            .receive_shot(coord)
            .map_err(|e| anyhow::anyhow!(e))?;
        self.player.on_opponent_shot(coord, result);
        self.transport
            .send(Message::ShotResp {
                version: PROTOCOL_VERSION,
                seq: expected_seq,
                result,
            })
            .await?;
        if self.board.all_sunk() {
            self.status = NodeStatus::Lost;
        }
        Ok(())
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Shots this node has fired and had adjudicated.
    pub fn shot_count(&self) -> usize {
        self.shots
    }
}
