#![cfg(feature = "std")]

//! Client for a tournament server.
//!
//! The client registers over HTTP (`POST /api/register`), then plays every
//! game the server schedules over a WebSocket carrying JSON messages. The
//! message handling lives in [`TournamentSession`], which turns one incoming
//! text frame into the frames to send back and never touches the network.

use alloc::boxed::Box;

use futures::{SinkExt, StreamExt};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use crate::core::{can_place, Coordinate, Direction, Ship, ShipPlacement, ShotResult};
use crate::player::{Player, SmartPlayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl From<Position> for Coordinate {
    fn from(p: Position) -> Self {
        Coordinate::new(p.x, p.y)
    }
}

/// One row of the final tournament table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    #[serde(default)]
    pub rank: u32,
    pub client_id: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub disqualifications: u32,
    #[serde(default)]
    pub win_rate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Connected {
        client_id: Option<String>,
    },
    Event {
        event: Event,
    },
    Error {
        error: Option<String>,
        message: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Event {
    event_type: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WaitingData {
    #[serde(default)]
    connected_players: u32,
    #[serde(default)]
    total_players: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartData {
    #[serde(default)]
    total_players: u32,
    #[serde(default)]
    total_games: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetupData {
    game_id: String,
    opponent_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementData {
    game_id: String,
    status: String,
    #[serde(default)]
    ships_remaining: usize,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TurnData {
    game_id: String,
    #[serde(default)]
    your_turn: bool,
}

#[derive(Debug, Deserialize)]
struct SunkShip {
    size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShotData {
    game_id: String,
    position: Position,
    result: String,
    #[serde(default)]
    your_turn: bool,
    sunk_ship: Option<SunkShip>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameEndData {
    game_id: String,
    result: String,
    #[serde(default)]
    your_total_shots: usize,
    #[serde(default)]
    enemy_total_shots: usize,
}

#[derive(Debug, Deserialize)]
struct TournamentEndData {
    #[serde(default)]
    standings: Vec<Standing>,
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Horizontal => "HORIZONTAL",
        Direction::Vertical => "VERTICAL",
    }
}

fn placement_frame(game_id: &str, p: &ShipPlacement) -> String {
    json!({
        "type": "move",
        "move": {
            "gameId": game_id,
            "type": "SHIP_PLACEMENT",
            "data": {
                "size": p.size,
                "position": {"x": p.anchor.x, "y": p.anchor.y},
                "direction": direction_name(p.direction),
            },
        },
    })
    .to_string()
}

fn shot_frame(game_id: &str, c: Coordinate) -> String {
    json!({
        "type": "move",
        "move": {
            "gameId": game_id,
            "type": "SHOT",
            "data": {"position": {"x": c.x, "y": c.y}},
        },
    })
    .to_string()
}

/// Tournament protocol state for one connection.
///
/// The server confirms placements one ship at a time; a rejected ship is
/// replaced by the first legal spot for its size, scanning rows then
/// columns, that clears every ship already accepted.
pub struct TournamentSession {
    player: Box<dyn Player>,
    rng: SmallRng,
    game_id: Option<String>,
    placements: Vec<ShipPlacement>,
    placement_index: usize,
    standings: Vec<Standing>,
    finished: bool,
}

impl TournamentSession {
    pub fn new(player: Box<dyn Player>, rng: SmallRng) -> Self {
        Self {
            player,
            rng,
            game_id: None,
            placements: Vec::new(),
            placement_index: 0,
            standings: Vec::new(),
            finished: false,
        }
    }

    /// The server announced the end of the tournament.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Final table, filled in once the tournament ends.
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// Game currently being played, if any.
    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    /// Handle one text frame from the server and return the frames to send.
    ///
    /// Frames that are not valid JSON, or events missing required fields,
    /// are logged and skipped.
    pub fn handle_text(&mut self, text: &str) -> Vec<String> {
        log::debug!("<< {}", text);
        let message: ServerMessage = match serde_json::from_str(text) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("unparseable server message ({}): {}", e, text);
                return Vec::new();
            }
        };
        match message {
            ServerMessage::Connected { client_id } => {
                log::info!("connected to server (id={})", client_id.unwrap_or_default());
                Vec::new()
            }
            ServerMessage::Event { event } => self
                .handle_event(&event.event_type, event.data)
                .unwrap_or_else(|e| {
                    log::warn!("skipping {} event: {}", event.event_type, e);
                    Vec::new()
                }),
            ServerMessage::Error { error, message } => {
                log::warn!(
                    "server error {}: {}",
                    error.unwrap_or_default(),
                    message.unwrap_or_default()
                );
                Vec::new()
            }
            ServerMessage::Unknown => Vec::new(),
        }
    }

    fn handle_event(&mut self, event_type: &str, data: serde_json::Value) -> anyhow::Result<Vec<String>> {
        let out = match event_type {
            "CONNECTED_WAIT_FOR_START" => {
                let d: WaitingData = parse(data)?;
                log::info!("waiting for players: {}/{}", d.connected_players, d.total_players);
                Vec::new()
            }
            "TOURNAMENT_START" => {
                let d: StartData = parse(data)?;
                log::info!("tournament started: {} players, {} games", d.total_players, d.total_games);
                Vec::new()
            }
            "GAME_SETUP" => self.on_game_setup(parse(data)?)?,
            "SHIP_PLACEMENT_RESPONSE" => self.on_placement_response(parse(data)?),
            "GAME_START" => {
                let d: TurnData = parse(data)?;
                log::info!("game {} started, our turn: {}", d.game_id, d.your_turn);
                self.shot_if(d.your_turn, &d.game_id)
            }
            "SHOT_ACK" => self.on_shot_ack(parse(data)?),
            "ENEMY_SHOT" => {
                let d: ShotData = parse(data)?;
                log::debug!("enemy shot {} {}", Coordinate::from(d.position), d.result);
                self.shot_if(d.your_turn, &d.game_id)
            }
            "GAME_END" => {
                let d: GameEndData = parse(data)?;
                log::info!(
                    "game {} over: {} (shots: {}, enemy shots: {})",
                    d.game_id,
                    d.result,
                    d.your_total_shots,
                    d.enemy_total_shots
                );
                self.game_id = None;
                Vec::new()
            }
            "TOURNAMENT_END" => {
                let d: TournamentEndData = parse(data)?;
                self.standings = d.standings;
                self.finished = true;
                Vec::new()
            }
            other => {
                log::debug!("ignoring event {}", other);
                Vec::new()
            }
        };
        Ok(out)
    }

    fn on_game_setup(&mut self, d: SetupData) -> anyhow::Result<Vec<String>> {
        log::info!(
            "new game {} against {}",
            d.game_id,
            d.opponent_id.as_deref().unwrap_or("?")
        );
        self.player.reset();
        self.placements = self
            .player
            .place_ships(&mut self.rng)
            .map_err(|e| anyhow::anyhow!(e))?;
        self.placement_index = 0;
        let out = self
            .placements
            .first()
            .map(|p| placement_frame(&d.game_id, p))
            .into_iter()
            .collect();
        self.game_id = Some(d.game_id);
        Ok(out)
    }

    fn on_placement_response(&mut self, d: PlacementData) -> Vec<String> {
        match d.status.as_str() {
            "ACCEPTED" => {
                log::debug!("placement accepted, {} ships left", d.ships_remaining);
                if d.ships_remaining == 0 {
                    return Vec::new();
                }
                self.placement_index += 1;
                self.placements
                    .get(self.placement_index)
                    .map(|p| placement_frame(&d.game_id, p))
                    .into_iter()
                    .collect()
            }
            "REJECTED" => {
                let Some(failed) = self.placements.get(self.placement_index) else {
                    return Vec::new();
                };
                let size = failed.size;
                log::warn!(
                    "placement of size {} rejected ({}), choosing another spot",
                    size,
                    d.error.as_deref().unwrap_or("UNKNOWN")
                );
                match self.regenerate_placement(size) {
                    Some(alt) => {
                        self.placements[self.placement_index] = alt;
                        vec![placement_frame(&d.game_id, &alt)]
                    }
                    None => {
                        log::warn!("no room left for a ship of size {}", size);
                        Vec::new()
                    }
                }
            }
            other => {
                log::debug!("unknown placement status {}", other);
                Vec::new()
            }
        }
    }

    /// First legal placement of `size` next to the ships already accepted.
    fn regenerate_placement(&self, size: usize) -> Option<ShipPlacement> {
        let placed: Vec<Ship> = self.placements[..self.placement_index]
            .iter()
            .map(ShipPlacement::to_ship)
            .collect();
        Coordinate::all()
            .flat_map(|c| Direction::ALL.into_iter().map(move |d| ShipPlacement::new(size, c, d)))
            .find(|p| can_place(&p.to_ship(), &placed))
    }

    fn on_shot_ack(&mut self, d: ShotData) -> Vec<String> {
        let coord = Coordinate::from(d.position);
        let result = match d.result.as_str() {
            "MISS" => Some(ShotResult::Miss),
            "HIT" => Some(ShotResult::Hit),
            "SUNK" => match d.sunk_ship {
                Some(ship) => Some(ShotResult::Sunk(ship.size)),
                None => {
                    log::warn!("sunk report at {} without a ship size, treating as hit", coord);
                    Some(ShotResult::Hit)
                }
            },
            _ => {
                log::warn!(
                    "shot at {} not accepted: {}",
                    coord,
                    d.error.as_deref().unwrap_or(&d.result)
                );
                None
            }
        };
        if let Some(result) = result {
            log::debug!("shot {} {}", coord, result);
            if let Err(e) = self.player.on_shot_result(coord, result) {
                log::warn!("could not record shot {}: {}", coord, e);
            }
        }
        self.shot_if(d.your_turn, &d.game_id)
    }

    fn shot_if(&mut self, our_turn: bool, game_id: &str) -> Vec<String> {
        if !our_turn {
            return Vec::new();
        }
        match self.player.next_shot(&mut self.rng) {
            Some(c) => vec![shot_frame(game_id, c)],
            None => {
                log::warn!("no cell left to shoot in game {}", game_id);
                Vec::new()
            }
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(data: serde_json::Value) -> anyhow::Result<T> {
    serde_json::from_value(data).map_err(|e| anyhow::anyhow!("malformed event data: {}", e))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Registration {
    client_id: String,
}

/// Network side of the tournament: registration and the WebSocket loop.
pub struct TournamentClient {
    server: String,
    name: String,
    http: reqwest::Client,
}

impl TournamentClient {
    /// `server` is the base URL, e.g. `http://localhost:8080`.
    pub fn new(server: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            server: server.into().trim_end_matches('/').to_string(),
            name: name.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Register our name and return the client id to connect with. A name
    /// that is already taken (409) rejoins under that name.
    pub async fn register(&self) -> anyhow::Result<String> {
        let resp = self
            .http
            .post(format!("{}/api/register", self.server))
            .json(&json!({ "name": self.name }))
            .send()
            .await?;
        match resp.status() {
            StatusCode::OK => {
                let reg: Registration = resp.json().await?;
                Ok(reg.client_id)
            }
            StatusCode::CONFLICT => {
                log::info!("name '{}' already registered, rejoining", self.name);
                Ok(self.name.clone())
            }
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(anyhow::anyhow!("Registration failed: {} {}", status, body))
            }
        }
    }

    /// WebSocket endpoint for `client_id`.
    pub fn websocket_url(&self, client_id: &str) -> String {
        let base = if let Some(rest) = self.server.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.server.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.server.clone()
        };
        format!("{}/api/client/ws?clientId={}", base, client_id)
    }

    /// Register, connect and play with a [`SmartPlayer`] until the server
    /// ends the tournament or closes the socket. Returns the final table.
    pub async fn run(&self) -> anyhow::Result<Vec<Standing>> {
        let client_id = self.register().await?;
        log::info!("registered as {}", client_id);

        let url = self.websocket_url(&client_id);
        log::info!("connecting to {}", url);
        let (ws, _) = tokio_tungstenite::connect_async(url.as_str()).await?;
        let (mut sink, mut stream) = ws.split();

        let rng = SmallRng::from_rng(&mut rand::rng());
        let mut session = TournamentSession::new(Box::new(SmartPlayer::new()), rng);

        while let Some(frame) = stream.next().await {
            match frame? {
                WsMessage::Text(text) => {
                    for out in session.handle_text(&text) {
                        log::debug!(">> {}", out);
                        sink.send(WsMessage::Text(out.into())).await?;
                    }
                    if session.is_finished() {
                        break;
                    }
                }
                WsMessage::Close(reason) => {
                    log::info!("server closed the connection: {:?}", reason);
                    break;
                }
                _ => {}
            }
        }
        Ok(session.standings().to_vec())
    }
}
