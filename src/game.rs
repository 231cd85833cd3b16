//! Turn sequencing between two players and multi-game statistics.

use alloc::boxed::Box;
use core::fmt;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::core::{Board, BoardError, Coordinate, ShipPlacement, ShotResult, BOARD_SIZE};
use crate::player::Player;

/// Outcome of one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// `1` or `2`.
    pub winner: u8,
    pub player1_shots: usize,
    pub player2_shots: usize,
}

/// Hooks fired while a game is played, seen from player 1's side.
pub trait GameObserver {
    /// One of player 1's ships was placed.
    fn on_placement(&mut self, _placement: &ShipPlacement) {}
    /// Player 1 fired.
    fn on_shot(&mut self, _coord: Coordinate, _result: ShotResult) {}
    /// Player 2 fired.
    fn on_enemy_shot(&mut self, _coord: Coordinate, _result: ShotResult) {}
    fn on_game_over(&mut self, _won: bool, _shots: usize, _enemy_shots: usize) {}
    /// Revealed after the game: one of player 2's ships.
    fn on_enemy_ship(&mut self, _placement: &ShipPlacement) {}
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

/// Plays one game between two players, each adjudicated on its own board.
pub struct GameEngine {
    players: [Box<dyn Player>; 2],
    boards: [Board; 2],
    shots: [usize; 2],
}

impl GameEngine {
    pub fn new(player1: Box<dyn Player>, player2: Box<dyn Player>) -> Self {
        Self {
            players: [player1, player2],
            boards: [Board::new(), Board::new()],
            shots: [0, 0],
        }
    }

    /// Board holding the fleet of player `1` or `2`.
    pub fn board(&self, player: u8) -> Option<&Board> {
        match player {
            1 => Some(&self.boards[0]),
            2 => Some(&self.boards[1]),
            _ => None,
        }
    }

    /// Place both fleets, then alternate shots starting with player 1 until
    /// one fleet is sunk.
    pub fn play(
        &mut self,
        rng1: &mut SmallRng,
        rng2: &mut SmallRng,
        observer: &mut dyn GameObserver,
    ) -> Result<GameResult, BoardError> {
        let layout1 = self.players[0].place_ships(rng1)?;
        self.boards[0].place_fleet(&layout1)?;
        for placement in &layout1 {
            observer.on_placement(placement);
        }
        let layout2 = self.players[1].place_ships(rng2)?;
        self.boards[1].place_fleet(&layout2)?;

        let mut current = 0;
        while !self.is_over() {
            let rng = if current == 0 { &mut *rng1 } else { &mut *rng2 };
            self.play_turn(current, rng, observer)?;
            current = 1 - current;
        }
        Ok(self.finish(observer))
    }

    fn play_turn(
        &mut self,
        shooter: usize,
        rng: &mut SmallRng,
        observer: &mut dyn GameObserver,
    ) -> Result<(), BoardError> {
        let target = 1 - shooter;
        if self.shots[shooter] >= BOARD_SIZE * BOARD_SIZE {
            return Err(BoardError::NoShotAvailable);
        }
        let shot = self.players[shooter]
            .next_shot(rng)
            .ok_or(BoardError::NoShotAvailable)?;
        let result = self.boards[target].receive_shot(shot)?;
        self.shots[shooter] += 1;

        self.players[shooter].on_shot_result(shot, result)?;
        self.players[target].on_opponent_shot(shot, result);

        if shooter == 0 {
            observer.on_shot(shot, result);
        } else {
            observer.on_enemy_shot(shot, result);
        }
        log::trace!("player {} shot {} {}", shooter + 1, shot, result);
        Ok(())
    }

    fn is_over(&self) -> bool {
        self.boards.iter().any(Board::all_sunk)
    }

    fn finish(&mut self, observer: &mut dyn GameObserver) -> GameResult {
        let winner = if self.boards[1].all_sunk() { 1 } else { 2 };
        observer.on_game_over(winner == 1, self.shots[0], self.shots[1]);
        for ship in self.boards[1].ships() {
            observer.on_enemy_ship(&ship.placement());
        }
        GameResult {
            winner,
            player1_shots: self.shots[0],
            player2_shots: self.shots[1],
        }
    }
}

/// Aggregate over a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    pub total_games: usize,
    pub player1_wins: usize,
    pub player2_wins: usize,
    pub avg_player1_shots: f64,
    pub avg_player2_shots: f64,
}

impl Statistics {
    /// Share of games won by player 1, in percent.
    pub fn player1_win_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.player1_wins as f64 / self.total_games as f64 * 100.0
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rate = self.player1_win_rate();
        writeln!(f, "=== Game Statistics ===")?;
        writeln!(f, "Total Games: {}", self.total_games)?;
        writeln!(f, "Player 1 Wins: {} ({:.1}%)", self.player1_wins, rate)?;
        writeln!(f, "Player 2 Wins: {} ({:.1}%)", self.player2_wins, 100.0 - rate)?;
        writeln!(f, "Avg Player 1 Shots: {:.1}", self.avg_player1_shots)?;
        write!(f, "Avg Player 2 Shots: {:.1}", self.avg_player2_shots)
    }
}

/// Runs batches of games with fresh players.
pub struct GameRunner;

impl GameRunner {
    /// Play `games` games. Game `i` seeds player 1 with `seed + 2i` and
    /// player 2 with `seed + 2i + 1`, so a batch is reproducible.
    pub fn run_games<F1, F2>(
        games: usize,
        seed: u64,
        factory1: F1,
        factory2: F2,
    ) -> Result<Statistics, BoardError>
    where
        F1: FnMut() -> Box<dyn Player>,
        F2: FnMut() -> Box<dyn Player>,
    {
        Self::run_games_with(games, seed, factory1, factory2, |_, engine, rng1, rng2| {
            engine.play(rng1, rng2, &mut NoopObserver)
        })
    }

    /// Batch loop behind [`GameRunner::run_games`]. `play` receives the
    /// zero-based game index, a fresh engine and the two seeded generators,
    /// and decides how the game is observed.
    pub fn run_games_with<F1, F2, P, E>(
        games: usize,
        seed: u64,
        mut factory1: F1,
        mut factory2: F2,
        mut play: P,
    ) -> Result<Statistics, E>
    where
        F1: FnMut() -> Box<dyn Player>,
        F2: FnMut() -> Box<dyn Player>,
        P: FnMut(usize, &mut GameEngine, &mut SmallRng, &mut SmallRng) -> Result<GameResult, E>,
    {
        let mut player1_wins = 0;
        let mut total1 = 0;
        let mut total2 = 0;

        for i in 0..games {
            let base = seed.wrapping_add(2 * i as u64);
            let mut rng1 = SmallRng::seed_from_u64(base);
            let mut rng2 = SmallRng::seed_from_u64(base.wrapping_add(1));

            let mut engine = GameEngine::new(factory1(), factory2());
            let result = play(i, &mut engine, &mut rng1, &mut rng2)?;
            if result.winner == 1 {
                player1_wins += 1;
            }
            total1 += result.player1_shots;
            total2 += result.player2_shots;

            if (i + 1) % 100 == 0 {
                log::info!("completed {} games", i + 1);
            }
        }

        let divisor = games.max(1) as f64;
        Ok(Statistics {
            total_games: games,
            player1_wins,
            player2_wins: games - player1_wins,
            avg_player1_shots: total1 as f64 / divisor,
            avg_player2_shots: total2 as f64 / divisor,
        })
    }
}
