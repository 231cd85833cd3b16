#![cfg(feature = "std")]

use rand::{rngs::SmallRng, SeedableRng};
use salvo::{GameEngine, GameLog, GameRunner, PlacementStrategy, Player, RandomPlayer, SmartPlayer};

/// `HH:MM:SS.mmm ` at the start of a log line.
fn has_clock_prefix(line: &str) -> bool {
    let b = line.as_bytes();
    b.len() > 13
        && b[2] == b':'
        && b[5] == b':'
        && b[8] == b'.'
        && b[12] == b' '
        && [0, 1, 3, 4, 6, 7, 9, 10, 11].iter().all(|&i| b[i].is_ascii_digit())
}

fn smart() -> Box<dyn Player> {
    Box::new(SmartPlayer::with_placement(PlacementStrategy::with_limits(20, 3)))
}

fn random() -> Box<dyn Player> {
    Box::new(RandomPlayer::new())
}

#[test]
fn test_game_log_records_and_flushes() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("salvo-log-test-{}.log", std::process::id()));
    let mut log = GameLog::with_path(&path);

    let mut rng1 = SmallRng::seed_from_u64(12);
    let mut rng2 = SmallRng::seed_from_u64(13);
    let mut engine = GameEngine::new(
        Box::new(SmartPlayer::with_placement(PlacementStrategy::with_limits(20, 3))),
        Box::new(RandomPlayer::new()),
    );
    let result = engine
        .play(&mut rng1, &mut rng2, &mut log)
        .map_err(|e| anyhow::anyhow!(e))?;

    let lines = log.lines();
    assert_eq!(
        lines.len(),
        10 + result.player1_shots + result.player2_shots + 1 + 10
    );
    assert!(lines.iter().all(|l| has_clock_prefix(l)), "{:?}", lines[0]);
    assert!(lines[0].contains(" place-ship: size="));
    assert!(lines.iter().any(|l| l.contains(" shot: pos=(")));
    assert!(lines.iter().any(|l| l.contains(" enemy-shot: pos=(")));
    assert!(lines.iter().any(|l| l.contains("result=sunk ship-size=")));
    let over = lines
        .iter()
        .find(|l| l.contains(" game-over: "))
        .expect("missing game-over line");
    assert!(over.contains(&format!(
        "total-shots={} enemy-total-shots={}",
        result.player1_shots, result.player2_shots
    )));
    assert!(lines.last().unwrap().contains(" enemy-ship: size="));

    let written = log.flush()?;
    assert_eq!(written, path);
    let contents = std::fs::read_to_string(&path)?;
    assert_eq!(contents.lines().count(), lines.len());
    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_default_log_file_name() {
    let log = GameLog::new();
    let name = log.path().to_string_lossy().into_owned();
    assert!(name.starts_with("ships-game-"));
    assert!(name.ends_with(".log"));
    // ships-game-yyyymmdd-hhmmss.log
    let stamp = &name["ships-game-".len()..name.len() - ".log".len()];
    assert_eq!(stamp.len(), 15);
    assert_eq!(&stamp[8..9], "-");
    assert!(stamp.chars().filter(|c| *c != '-').all(|c| c.is_ascii_digit()));
}

#[test]
fn test_batch_logs_only_first_games() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("salvo-batch-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;

    let (stats, paths) = GameRunner::run_games_logged(3, 7, 2, &dir, smart, random)?;
    assert_eq!(stats.total_games, 3);
    assert_eq!(paths.len(), 2);
    for (i, path) in paths.iter().enumerate() {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("ships-game-"));
        assert!(name.ends_with(&format!("-{}.log", i + 1)));
        let contents = std::fs::read_to_string(path)?;
        assert!(contents.lines().next().is_some_and(has_clock_prefix));
        assert!(contents.contains(" game-over: result="));
    }

    // logging does not change how the games play out
    let plain = GameRunner::run_games(3, 7, smart, random).map_err(|e| anyhow::anyhow!(e))?;
    assert_eq!(stats, plain);

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
