#![cfg(feature = "std")]

//! Plain-text move log of a single game.
//!
//! Lines are buffered in memory while the game runs and written out in one go
//! by [`GameLog::flush`]. Each line starts with the local wall-clock time
//! as `HH:MM:SS.mmm`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::core::{Coordinate, ShipPlacement, ShotResult};
use crate::game::{GameObserver, GameRunner, NoopObserver, Statistics};
use crate::player::Player;

/// Games logged by `benchmark --log` and `stats --log`.
pub const LOGGED_GAMES: usize = 5;

const FILE_STAMP: &str = "%Y%m%d-%H%M%S";
const LINE_STAMP: &str = "%H:%M:%S%.3f";

pub struct GameLog {
    lines: Vec<String>,
    path: PathBuf,
}

impl GameLog {
    /// Log that will be written to `ships-game-<yyyymmdd-hhmmss>.log` in the
    /// current directory.
    pub fn new() -> Self {
        Self::with_path(format!("ships-game-{}.log", Local::now().format(FILE_STAMP)))
    }

    /// Log for game `number` of a batch, written to
    /// `<dir>/ships-game-<yyyymmdd-hhmmss>-<number>.log`.
    pub fn numbered<P: AsRef<Path>>(dir: P, number: usize) -> Self {
        let name = format!(
            "ships-game-{}-{}.log",
            Local::now().format(FILE_STAMP),
            number
        );
        Self::with_path(dir.as_ref().join(name))
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            lines: Vec::new(),
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push(&mut self, entry: String) {
        let stamp = Local::now().format(LINE_STAMP);
        self.lines.push(format!("{} {}", stamp, entry));
    }

    /// Write every buffered line to the log file and return its path.
    pub fn flush(&self) -> anyhow::Result<PathBuf> {
        fs::write(&self.path, self.lines.join("\n"))
            .map_err(|e| anyhow::anyhow!("failed to write {}: {}", self.path.display(), e))?;
        log::info!("game log written to {}", self.path.display());
        Ok(self.path.clone())
    }
}

impl Default for GameLog {
    fn default() -> Self {
        Self::new()
    }
}

impl GameObserver for GameLog {
    fn on_placement(&mut self, placement: &ShipPlacement) {
        self.push(format!("place-ship: {}", placement));
    }

    fn on_shot(&mut self, coord: Coordinate, result: ShotResult) {
        self.push(format!("shot: pos={} {}", coord, result));
    }

    fn on_enemy_shot(&mut self, coord: Coordinate, result: ShotResult) {
        self.push(format!("enemy-shot: pos={} {}", coord, result));
    }

    fn on_game_over(&mut self, won: bool, shots: usize, enemy_shots: usize) {
        let result = if won { "win" } else { "loss" };
        self.push(format!(
            "game-over: result={} total-shots={} enemy-total-shots={}",
            result, shots, enemy_shots
        ));
    }

    fn on_enemy_ship(&mut self, placement: &ShipPlacement) {
        self.push(format!("enemy-ship: {}", placement));
    }
}

impl GameRunner {
    /// [`GameRunner::run_games`], writing a move log into `dir` for each of
    /// the first `logged` games. Returns the statistics and the log files.
    pub fn run_games_logged<F1, F2>(
        games: usize,
        seed: u64,
        logged: usize,
        dir: &Path,
        factory1: F1,
        factory2: F2,
    ) -> anyhow::Result<(Statistics, Vec<PathBuf>)>
    where
        F1: FnMut() -> Box<dyn Player>,
        F2: FnMut() -> Box<dyn Player>,
    {
        let mut written = Vec::new();
        let stats = GameRunner::run_games_with(games, seed, factory1, factory2, |i, engine, rng1, rng2| {
            if i >= logged {
                return engine
                    .play(rng1, rng2, &mut NoopObserver)
                    .map_err(|e| anyhow::anyhow!(e));
            }
            let mut log = GameLog::numbered(dir, i + 1);
            let result = engine
                .play(rng1, rng2, &mut log)
                .map_err(|e| anyhow::anyhow!(e))?;
            written.push(log.flush()?);
            Ok(result)
        })?;
        Ok((stats, written))
    }
}
