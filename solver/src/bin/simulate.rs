//! Monte Carlo run estimate, printed alongside the analytic value for comparison.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use run_expectancy::env_config;
use run_expectancy::simulation::simulate_batch;
use run_expectancy::{Estimator, EstimatorConfig, Outcome, RateStats};

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(version, about = "Simulate games for a lineup's plate-appearance outcome counts", long_about = None)]
struct Cli {
    /// Plate appearances
    #[arg(long = "pa")]
    plate_appearances: u32,
    /// Walks
    #[arg(long = "bb", default_value_t = 0)]
    walks: u32,
    /// Strikeouts
    #[arg(long = "k", default_value_t = 0)]
    strikeouts: u32,
    /// Fielder's choices
    #[arg(long = "fc", default_value_t = 0)]
    fielders_choices: u32,
    /// Reached on error
    #[arg(long = "roe", default_value_t = 0)]
    reached_on_error: u32,
    /// Singles
    #[arg(long = "h1", default_value_t = 0)]
    singles: u32,
    /// Doubles
    #[arg(long = "h2", default_value_t = 0)]
    doubles: u32,
    /// Triples
    #[arg(long = "h3", default_value_t = 0)]
    triples: u32,
    /// Home runs
    #[arg(long = "hr", default_value_t = 0)]
    home_runs: u32,

    /// Number of games to simulate
    #[arg(long, default_value_t = 100_000)]
    games: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Innings per game (default: RUNS_INNINGS_PER_GAME or 7)
    #[arg(long)]
    innings: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    env_config::init_rayon_threads_lenient();

    let stats = RateStats {
        plate_appearances: cli.plate_appearances,
        walks: cli.walks,
        strikeouts: cli.strikeouts,
        fielders_choices: cli.fielders_choices,
        reached_on_error: cli.reached_on_error,
        singles: cli.singles,
        doubles: cli.doubles,
        triples: cli.triples,
        home_runs: cli.home_runs,
    };
    let config = EstimatorConfig {
        innings_per_game: cli.innings.unwrap_or_else(env_config::innings_per_game),
        ..EstimatorConfig::from_env()
    };

    let result = simulate_batch(&stats, config.innings_per_game, cli.games, cli.seed)?;
    let analytic = Estimator::new(config).estimate(&stats)?;

    println!("Simulated {} games in {:.2?}", cli.games, result.elapsed);
    println!(
        "Runs per game: mean {:.4}, std dev {:.4}, min {}, median {}, max {}",
        result.mean, result.std_dev, result.min, result.median, result.max
    );
    println!("Analytic estimate: {:.4}", analytic.expected_runs);
    println!();
    for outcome in Outcome::ALL {
        println!("{:<17} {}", outcome.name(), result.tally.get(outcome));
    }

    Ok(())
}
