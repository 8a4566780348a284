//! Play CPU-vs-CPU Pig matches and record them on a leaderboard.
//!
//! ```text
//! pig-sim --matches 20 --first Ada --first-level hard --second Bo --second-level easy
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use pig_dice::simulation::ensure_distinct_ids;
use pig_dice::{Difficulty, Leaderboard, MatchRunner, SelfPlayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Leaderboard document to update.
    #[arg(long, default_value = "pig_highscores.json")]
    leaderboard: PathBuf,

    /// Number of matches to play.
    #[arg(short, long, default_value_t = 10)]
    matches: usize,

    /// Points needed to win.
    #[arg(short, long, default_value_t = 100)]
    goal: u32,

    /// Seed of the first match; later matches use consecutive seeds.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// First seat's name.
    #[arg(long, default_value = "CPU 1")]
    first: String,

    /// First seat's difficulty (easy, normal/medium, hard/smart).
    #[arg(long, default_value = "normal")]
    first_level: Difficulty,

    /// Second seat's name.
    #[arg(long, default_value = "CPU 2")]
    second: String,

    /// Second seat's difficulty.
    #[arg(long, default_value = "normal")]
    second_level: Difficulty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.goal == 0 {
        bail!("--goal must be positive");
    }
    ensure_distinct_ids([args.first.as_str(), args.second.as_str()])
        .context("--first and --second must name different players")?;

    let mut board = Leaderboard::open(&args.leaderboard)
        .with_context(|| format!("open leaderboard {}", args.leaderboard.display()))?;

    let config = SelfPlayConfig::new()
        .with_goal(args.goal)
        .with_seed_offset(args.seed)
        .with_difficulties(args.first_level, args.second_level);
    let runner = MatchRunner::new(config);

    let summaries = runner
        .play_matches([args.first.as_str(), args.second.as_str()], args.matches)
        .context("play matches")?;

    for summary in &summaries {
        summary.record(&mut board).context("record match")?;
    }
    info!(matches = summaries.len(), path = %board.path().display(), "matches recorded");

    println!("{:<4} {:<20} {:>5} {:>6}", "#", "Player", "Wins", "Losses");
    for (rank, entry) in board.table().iter().enumerate() {
        println!(
            "{:<4} {:<20} {:>5} {:>6}",
            rank + 1,
            entry.display_name,
            entry.wins,
            entry.losses
        );
    }

    Ok(())
}
