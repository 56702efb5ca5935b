//! Estimate expected runs per game for a lineup's plate-appearance counts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use run_expectancy::{Estimator, EstimatorConfig, RateStats};

#[derive(Args, Debug)]
struct Counts {
    /// Plate appearances
    #[arg(long = "pa")]
    plate_appearances: Option<u32>,
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
}

#[derive(Parser, Debug)]
#[command(name = "estimate")]
#[command(version, about = "Expected runs per game from plate-appearance outcome counts", long_about = None)]
struct Cli {
    #[command(flatten)]
    counts: Counts,

    /// Read counts from a JSON file instead of flags
    #[arg(long, conflicts_with = "plate_appearances")]
    stats: Option<PathBuf>,

    /// Innings per game (default: RUNS_INNINGS_PER_GAME or 7)
    #[arg(long)]
    innings: Option<u32>,

    /// Solver refinement passes (default: RUNS_REFINEMENT_PASSES or 50)
    #[arg(long)]
    passes: Option<usize>,

    /// Print the base/out run-expectancy matrix
    #[arg(long)]
    table: bool,

    /// Print the estimate as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_stats(cli: &Cli) -> Result<RateStats> {
    if let Some(path) = &cli.stats {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse rate statistics in {}", path.display()));
    }
    let c = &cli.counts;
    let plate_appearances = c
        .plate_appearances
        .context("either --pa or --stats is required")?;
    Ok(RateStats {
        plate_appearances,
        walks: c.walks,
        strikeouts: c.strikeouts,
        fielders_choices: c.fielders_choices,
        reached_on_error: c.reached_on_error,
        singles: c.singles,
        doubles: c.doubles,
        triples: c.triples,
        home_runs: c.home_runs,
    })
}

fn print_matrix(matrix: &[[Option<f64>; 3]; 8]) {
    println!();
    println!("Bases      0 outs   1 out    2 outs");
    for (bases, row) in matrix.iter().enumerate() {
        let label = format!(
            "{}{}{}",
            if bases & 1 != 0 { '1' } else { '-' },
            if bases & 2 != 0 { '2' } else { '-' },
            if bases & 4 != 0 { '3' } else { '-' },
        );
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(e) => format!("{:>7.3}", e),
                None => format!("{:>7}", "n/a"),
            })
            .collect();
        println!("{:<9}{}", label, cells.join("  "));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let stats = load_stats(&cli)?;
    let env = EstimatorConfig::from_env();
    let config = EstimatorConfig {
        innings_per_game: cli.innings.unwrap_or(env.innings_per_game),
        refinement_passes: cli.passes.unwrap_or(env.refinement_passes),
    };
    let estimator = Estimator::new(config);

    let estimate = estimator.estimate(&stats)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!(
            "Expected runs per inning: {:.4}",
            estimate.runs_per_inning
        );
        println!(
            "Expected runs per {}-inning game: {:.4}",
            estimate.innings_per_game, estimate.expected_runs
        );
        if !estimate.converged {
            println!("(not converged after {} passes)", estimate.passes);
        }
    }

    if cli.table {
        let solution = estimator.solve(&stats)?;
        print_matrix(&solution.table.run_expectancy_matrix());
    }

    Ok(())
}
