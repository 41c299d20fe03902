use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::Parser;
use snake_sim::config::{ConfigError, GameConfig, Level};
use snake_sim::game::{Game, GameStatus};
use snake_sim::input::{parse_script, ParseMoveError};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Headless driver: runs one game and prints the final frame as JSON.
#[derive(Debug, Parser)]
#[command(name = "snake-sim", version, about)]
struct Cli {
    /// Seed for food and obstacle placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding grid size, counts, points or cadence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Difficulty level; only changes the pause between ticks.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    level: u8,

    /// Maximum number of ticks to run.
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// One move per tick: U/D/L/R or ^ v < >, `.` keeps course.
    #[arg(long, default_value = "")]
    moves: String,

    /// Sleep the level's tick interval between ticks.
    #[arg(long)]
    realtime: bool,

    /// Print a compact JSON snapshot after every tick.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid move script: {0}")]
    Script(#[from] ParseMoveError),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    let config = match &cli.config {
        Some(path) => GameConfig::load_from_path(path)?,
        None => GameConfig::default(),
    };
    let moves = parse_script(&cli.moves)?;

    let mut game = match cli.seed {
        Some(seed) => Game::new_with_seed(config, seed)?,
        None => Game::from_entropy(config)?,
    };
    game.set_level(Level::try_from(cli.level)?);

    let mut stdout = io::stdout().lock();
    for tick in 0..cli.ticks {
        if game.status() != GameStatus::Playing {
            break;
        }

        let scripted = usize::try_from(tick)
            .ok()
            .and_then(|index| moves.get(index))
            .copied()
            .flatten();
        if let Some(direction) = scripted {
            game.change_direction(direction);
        }

        let outcome = game.tick();
        if let Some(eaten) = outcome.fruit_eaten {
            info!(
                x = eaten.position.x,
                y = eaten.position.y,
                kind = ?eaten.kind,
                points = eaten.points,
                score = game.score(),
                "+{}",
                eaten.points
            );
        }

        if cli.trace {
            serde_json::to_writer(&mut stdout, &game.snapshot())?;
            writeln!(stdout)?;
        }

        if cli.realtime {
            thread::sleep(game.tick_interval());
        }
    }

    info!(
        status = ?game.status(),
        score = game.score(),
        length = game.len(),
        ticks = game.ticks(),
        "simulation finished"
    );

    serde_json::to_writer_pretty(&mut stdout, &game.snapshot())?;
    writeln!(stdout)?;
    Ok(())
}
