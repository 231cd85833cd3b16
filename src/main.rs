#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::path::Path;

#[cfg(feature = "std")]
use salvo::game_log::LOGGED_GAMES;
#[cfg(feature = "std")]
use salvo::{
    init_logging, GameEngine, GameLog, GameRunner, InMemoryTransport, NodeStatus, NoopObserver,
    Player, PlayerNode, RandomPlayer, SmartPlayer, Statistics, TcpTransport, TournamentClient,
    Transport,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play one smart-vs-smart game and print the result.
    Single {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Write the move log to ships-game-<time>.log")]
        log: bool,
    },
    /// Smart player against the random baseline.
    Benchmark {
        #[arg(long, default_value_t = 1000)]
        games: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, help = "Write move logs for the first 5 games")]
        log: bool,
    },
    /// Smart player against itself.
    Stats {
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, help = "Write move logs for the first 5 games")]
        log: bool,
    },
    /// Two smart players talking over an in-memory transport.
    Local {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Host a networked game and wait for a client to connect.
    TcpServer {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Connect to a networked game hosted by a server.
    TcpClient {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Register with a tournament server and play every game it schedules.
    Tournament {
        #[arg(long, default_value = "http://localhost:8080")]
        server: String,
        #[arg(long, help = "Player name (default: SmartAI-<random>)")]
        name: Option<String>,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn base_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::random())
}

/// Smart player 1 against `opponent`, optionally logging the first games.
#[cfg(feature = "std")]
fn run_batch<F>(games: usize, seed: Option<u64>, log: bool, opponent: F) -> anyhow::Result<Statistics>
where
    F: FnMut() -> Box<dyn Player>,
{
    let smart = || Box::new(SmartPlayer::new()) as Box<dyn Player>;
    if !log {
        return GameRunner::run_games(games, base_seed(seed), smart, opponent)
            .map_err(|e| anyhow::anyhow!(e));
    }
    let (stats, paths) =
        GameRunner::run_games_logged(games, base_seed(seed), LOGGED_GAMES, Path::new("."), smart, opponent)?;
    for path in paths {
        println!("Log file: {}", path.display());
    }
    Ok(stats)
}

#[cfg(feature = "std")]
async fn run_node(transport: Box<dyn Transport>, seed: Option<u64>, first_move: bool) -> anyhow::Result<()> {
    let mut rng = make_rng(seed);
    let mut node = PlayerNode::new(Box::new(SmartPlayer::new()), transport);
    node.run(&mut rng, first_move).await?;
    match node.status() {
        NodeStatus::Won => println!("Victory after {} shots.", node.shot_count()),
        NodeStatus::Lost => println!("Defeat after {} shots.", node.shot_count()),
        NodeStatus::InProgress => println!("Game interrupted."),
    }
    Ok(())
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Single { seed, log } => {
            let mut rng1 = make_rng(seed);
            let mut rng2 = make_rng(seed.map(|s| s.wrapping_add(1)));
            let mut engine = GameEngine::new(Box::new(SmartPlayer::new()), Box::new(SmartPlayer::new()));

            let result = if log {
                let mut game_log = GameLog::new();
                let result = engine
                    .play(&mut rng1, &mut rng2, &mut game_log)
                    .map_err(|e| anyhow::anyhow!(e))?;
                let path = game_log.flush()?;
                println!("Log file: {}", path.display());
                result
            } else {
                engine
                    .play(&mut rng1, &mut rng2, &mut NoopObserver)
                    .map_err(|e| anyhow::anyhow!(e))?
            };

            println!("=== Game Result ===");
            println!("Winner: Player {}", result.winner);
            println!("Player 1 shots: {}", result.player1_shots);
            println!("Player 2 shots: {}", result.player2_shots);
        }
        Commands::Benchmark { games, seed, log } => {
            println!("Running benchmark: smart vs random ({} games)", games);
            let stats = run_batch(games, seed, log, || Box::new(RandomPlayer::new()) as Box<dyn Player>)?;
            println!("{}", stats);
        }
        Commands::Stats { games, seed, log } => {
            println!("Running statistics: smart vs smart ({} games)", games);
            let stats = run_batch(games, seed, log, || Box::new(SmartPlayer::new()) as Box<dyn Player>)?;
            println!("{}", stats);
        }
        Commands::Tournament { server, name } => {
            let name = name.unwrap_or_else(|| format!("SmartAI-{}", rand::random_range(1000..10000)));
            println!("=== Tournament Client ===");
            println!("Server: {}", server);
            println!("Name:   {}", name);
            let standings = TournamentClient::new(server, name).run().await?;
            println!("=== Tournament Standings ===");
            for s in standings {
                println!(
                    "{:>3}. {:<22} W:{} L:{} DQ:{} ({:.0}%)",
                    s.rank,
                    s.client_id,
                    s.wins,
                    s.losses,
                    s.disqualifications,
                    s.win_rate * 100.0
                );
            }
        }
        Commands::Local { seed } => {
            let (t1, t2) = InMemoryTransport::pair();
            let seed2 = seed.map(|s| s.wrapping_add(1));
            tokio::try_join!(
                run_node(Box::new(t1), seed, true),
                run_node(Box::new(t2), seed2, false)
            )?;
        }
        Commands::TcpServer { bind, seed } => {
            let listener = TcpListener::bind(&bind).await?;
            println!("Waiting for a player on {}...", bind);
            let (stream, addr) = listener.accept().await?;
            println!("Player connected from {}", addr);
            run_node(Box::new(TcpTransport::new(stream)), seed, true).await?;
        }
        Commands::TcpClient { connect, seed } => {
            println!("Connecting to {}...", connect);
            let transport = TcpTransport::connect(&connect).await?;
            run_node(Box::new(transport), seed, false).await?;
        }
    }
    Ok(())
}
