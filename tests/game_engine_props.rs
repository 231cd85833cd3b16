use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use salvo::{
    BoardError, Coordinate, Direction, GameEngine, GameObserver, GameRunner, NoopObserver,
    PlacementStrategy, Player, RandomPlayer, ShipPlacement, ShotResult, SmartPlayer,
};

fn smart() -> Box<dyn Player> {
    Box::new(SmartPlayer::with_placement(PlacementStrategy::with_limits(50, 5)))
}

fn random() -> Box<dyn Player> {
    Box::new(RandomPlayer::new())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Every game ends with exactly one fleet sunk and both sides having fired.
    #[test]
    fn game_terminates_with_one_winner(seed in any::<u64>()) {
        let mut rng1 = SmallRng::seed_from_u64(seed);
        let mut rng2 = SmallRng::seed_from_u64(seed.wrapping_add(1));
        let mut engine = GameEngine::new(smart(), smart());
        let result = engine.play(&mut rng1, &mut rng2, &mut NoopObserver).unwrap();

        prop_assert!(result.winner == 1 || result.winner == 2);
        prop_assert!(result.player1_shots > 0 && result.player2_shots > 0);
        prop_assert!(result.player1_shots <= 100 && result.player2_shots <= 100);
        // player 1 moves first, so it is never behind and at most one ahead
        prop_assert!(result.player1_shots - result.player2_shots <= 1);

        let loser = 3 - result.winner;
        prop_assert!(engine.board(loser).unwrap().all_sunk());
        prop_assert!(!engine.board(result.winner).unwrap().all_sunk());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    /// Heatmap hunting with line targeting beats uniform random shooting in
    /// well over 70% of games, and needs far fewer shots to finish than two
    /// random players do.
    #[test]
    fn smart_beats_random(seed in any::<u64>()) {
        let stats = GameRunner::run_games(20, seed, smart, random).unwrap();
        prop_assert_eq!(stats.total_games, 20);
        prop_assert!(stats.player1_win_rate() > 70.0, "{}", stats);

        let baseline = GameRunner::run_games(20, seed, random, random).unwrap();
        prop_assert!(
            stats.avg_player1_shots < baseline.avg_player1_shots,
            "smart {:.1} vs random {:.1}",
            stats.avg_player1_shots,
            baseline.avg_player1_shots
        );
    }
}

#[test]
fn test_runner_is_reproducible() {
    let a = GameRunner::run_games(3, 42, smart, smart).unwrap();
    let b = GameRunner::run_games(3, 42, smart, smart).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.player1_wins + a.player2_wins, 3);
}

#[test]
fn test_statistics_report() {
    let stats = GameRunner::run_games(2, 1, smart, random).unwrap();
    let report = stats.to_string();
    assert!(report.starts_with("=== Game Statistics ==="));
    assert!(report.contains("Total Games: 2"));
}

/// Lays out an illegal fleet: every ship stacked on the same row.
struct CheatingPlayer;

impl Player for CheatingPlayer {
    fn place_ships(&mut self, _rng: &mut SmallRng) -> Result<Vec<ShipPlacement>, BoardError> {
        Ok(salvo::FLEET
            .iter()
            .map(|&size| ShipPlacement::new(size, Coordinate::new(0, 0), Direction::Horizontal))
            .collect())
    }

    fn next_shot(&mut self, _rng: &mut SmallRng) -> Option<Coordinate> {
        None
    }

    fn on_shot_result(&mut self, _coord: Coordinate, _result: ShotResult) -> Result<(), BoardError> {
        Ok(())
    }

    fn reset(&mut self) {}
}

#[test]
fn test_invalid_fleet_aborts_game() {
    let mut rng1 = SmallRng::seed_from_u64(1);
    let mut rng2 = SmallRng::seed_from_u64(2);
    let mut engine = GameEngine::new(Box::new(CheatingPlayer), smart());
    let err = engine.play(&mut rng1, &mut rng2, &mut NoopObserver).unwrap_err();
    assert_eq!(err, BoardError::InvalidFleet);
}

/// Places a legal fleet but never finds a shot.
struct SilentPlayer;

impl Player for SilentPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng) -> Result<Vec<ShipPlacement>, BoardError> {
        RandomPlayer::new().place_ships(rng)
    }

    fn next_shot(&mut self, _rng: &mut SmallRng) -> Option<Coordinate> {
        None
    }

    fn on_shot_result(&mut self, _coord: Coordinate, _result: ShotResult) -> Result<(), BoardError> {
        Ok(())
    }

    fn reset(&mut self) {}
}

#[test]
fn test_player_without_shot_aborts_game() {
    let mut rng1 = SmallRng::seed_from_u64(1);
    let mut rng2 = SmallRng::seed_from_u64(2);
    let mut engine = GameEngine::new(Box::new(SilentPlayer), smart());
    let err = engine.play(&mut rng1, &mut rng2, &mut NoopObserver).unwrap_err();
    assert_eq!(err, BoardError::NoShotAvailable);
}

#[derive(Default)]
struct CountingObserver {
    placements: usize,
    shots: usize,
    enemy_shots: usize,
    enemy_ships: usize,
    outcome: Option<(bool, usize, usize)>,
}

impl GameObserver for CountingObserver {
    fn on_placement(&mut self, _placement: &ShipPlacement) {
        self.placements += 1;
    }
    fn on_shot(&mut self, _coord: Coordinate, _result: ShotResult) {
        self.shots += 1;
    }
    fn on_enemy_shot(&mut self, _coord: Coordinate, _result: ShotResult) {
        self.enemy_shots += 1;
    }
    fn on_game_over(&mut self, won: bool, shots: usize, enemy_shots: usize) {
        self.outcome = Some((won, shots, enemy_shots));
    }
    fn on_enemy_ship(&mut self, _placement: &ShipPlacement) {
        self.enemy_ships += 1;
    }
}

#[test]
fn test_observer_sees_whole_game() {
    let mut rng1 = SmallRng::seed_from_u64(8);
    let mut rng2 = SmallRng::seed_from_u64(9);
    let mut observer = CountingObserver::default();
    let mut engine = GameEngine::new(smart(), random());
    let result = engine.play(&mut rng1, &mut rng2, &mut observer).unwrap();

    assert_eq!(observer.placements, 10);
    assert_eq!(observer.enemy_ships, 10);
    assert_eq!(observer.shots, result.player1_shots);
    assert_eq!(observer.enemy_shots, result.player2_shots);
    assert_eq!(
        observer.outcome,
        Some((result.winner == 1, result.player1_shots, result.player2_shots))
    );
}
