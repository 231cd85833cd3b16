use rand::{rngs::SmallRng, SeedableRng};
use salvo::{GameEngine, NoopObserver, SmartPlayer};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let mut engine = GameEngine::new(Box::new(SmartPlayer::new()), Box::new(SmartPlayer::new()));
    let result = engine
        .play(&mut rng1, &mut rng2, &mut NoopObserver)
        .map_err(|e| anyhow::anyhow!(e))?;

    let winner = if result.winner == 1 { "player1" } else { "player2" };
    let output = json!({
        "player1": {"shots": result.player1_shots},
        "player2": {"shots": result.player2_shots},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
