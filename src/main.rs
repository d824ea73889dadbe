use std::{error::Error, io, process::ExitCode};

use clap::Parser;
use minesweeper_engine::{
    Board,
    config::{OutputFormat, Settings},
    session::{Outcome, Session},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Play minesweeper on the terminal. Moves are read from stdin, one per line:
/// `reveal <row> <col>`, `flag <row> <col>`, `unflag <row> <col>`, `show`, `quit`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of rows [env: MINESWEEPER_ROWS, default: 9]
    #[arg(long)]
    rows: Option<usize>,
    /// Number of columns [env: MINESWEEPER_COLS, default: 9]
    #[arg(long)]
    cols: Option<usize>,
    /// Number of mines [env: MINESWEEPER_MINES, default: 10]
    #[arg(long)]
    mines: Option<usize>,
    #[arg(long, help = "Fix RNG seed for reproducible boards (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Print one JSON object per line instead of text boards
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(rows) = self.rows {
            settings.rows = rows;
        }
        if let Some(cols) = self.cols {
            settings.cols = cols;
        }
        if let Some(mines) = self.mines {
            settings.mines = mines;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.json {
            settings.output = OutputFormat::Json;
        }
        settings
    }
}

fn run(settings: Settings) -> Result<Outcome, Box<dyn Error>> {
    let board = match settings.seed {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            Board::with_rng(settings.params(), &mut StdRng::seed_from_u64(seed))?
        }
        None => Board::new(settings.params())?,
    };

    let stdout = io::stdout();
    let mut session = Session::new(board, stdout.lock(), settings.output);
    Ok(session.run(io::stdin().lock())?)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = Cli::parse().apply(Settings::from_env());
    info!("Starting with {:?}", settings);

    match run(settings) {
        Ok(outcome) => {
            info!("Game ended: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
