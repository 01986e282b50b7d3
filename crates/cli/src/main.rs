mod selfplay;
mod solve;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use num_format::{Locale, ToFormattedString};
use othello_core::board::Board;
use othello_core::board_state::BoardState;
use othello_core::disc::Side;
use othello_core::eval::EvalWeights;
use othello_core::level::{NUM_LEVELS, get_level};
use othello_core::perft::{perft_divide, perft_root};
use othello_core::search::{SearchEngine, SearchOptions, SearchRunOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
struct EngineParams {
    /// Transposition table size in megabytes
    #[arg(long, global = true, default_value = "16")]
    hash_size: usize,

    /// Time per move in milliseconds
    #[arg(long, global = true, default_value = "1000")]
    time_ms: u64,

    /// Strength preset; without it only the clock limits the search
    #[arg(short, long, global = true, value_parser = clap::value_parser!(u8).range(0..NUM_LEVELS as i64))]
    level: Option<u8>,

    /// Evaluation weights (TOML)
    #[arg(long, global = true, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    weights: Option<PathBuf>,

    /// Log search progress
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl EngineParams {
    fn search_options(&self) -> SearchOptions {
        let options = SearchOptions::new(self.hash_size).with_move_time(Some(self.time_ms));
        match self.level {
            Some(lv) => options.with_level(get_level(lv as usize)),
            None => options,
        }
    }

    fn build_engine(&self) -> Result<SearchEngine> {
        let weights = match &self.weights {
            Some(path) => load_weights(path)?,
            None => EvalWeights::default(),
        };
        Ok(SearchEngine::with_weights(self.search_options(), Arc::new(weights)))
    }
}

#[derive(Parser, Debug)]
#[command(name = "othello", version, about = "Reversi engine")]
struct Cli {
    #[command(subcommand)]
    command: SubCommands,

    #[command(flatten)]
    engine_params: EngineParams,
}

#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Search one position and print the chosen move
    Bestmove {
        /// 64 characters, A1..H8: X dark, O light, - empty
        #[arg(long)]
        board: String,

        #[arg(long)]
        side: Side,
    },
    /// Solve every position of a file exactly
    Solve {
        /// One `<64 chars> <X|O>` position per line, `%` starts a comment
        file: PathBuf,
    },
    /// Count move generator nodes from the initial position
    Perft {
        depth: u32,

        /// Also print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Play one engine-vs-engine game
    Selfplay {
        /// Random opening moves before the engines take over
        #[arg(long, default_value = "0")]
        random_plies: u32,

        /// Seed of the random opening moves
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    let args = Cli::parse();
    init_tracing(args.engine_params.verbose);

    if let Err(err) = run(args) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Cli) -> Result<()> {
    let params = args.engine_params;
    match args.command {
        SubCommands::Bestmove { board, side } => bestmove(&params, &board, side),
        SubCommands::Solve { file } => {
            let mut engine = params.build_engine()?;
            solve::solve(&file, &mut engine)
        }
        SubCommands::Perft { depth, divide } => {
            perft(depth, divide);
            Ok(())
        }
        SubCommands::Selfplay { random_plies, seed } => {
            let mut engine = params.build_engine()?;
            selfplay::selfplay(&mut engine, random_plies, seed)
        }
    }
}

fn load_weights(path: &Path) -> Result<EvalWeights> {
    let text = fs::read_to_string(path).with_context(|| format!("cannot read weights file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid weights file {}", path.display()))
}

fn bestmove(params: &EngineParams, board: &str, side: Side) -> Result<()> {
    let state: BoardState = board.parse().context("invalid --board")?;
    let mut engine = params.build_engine()?;
    let run_options = SearchRunOptions::from(engine.options());
    let result = engine.run(side, &state, &run_options);

    let (column, row) = result.best_move.coords();
    println!("move:   {} ({column},{row})", result.best_move);
    if result.is_endgame {
        println!("score:  {:+} (exact)", result.score);
    } else {
        println!("score:  {:+}", result.score);
    }
    println!("depth:  {}", result.depth);
    println!("nodes:  {}", result.n_nodes.to_formatted_string(&Locale::en));
    println!("time:   {:.3}s", result.elapsed.as_secs_f64());
    Ok(())
}

fn perft(depth: u32, divide: bool) {
    if divide {
        for (sq, nodes) in perft_divide(&Board::new(), depth) {
            println!("{sq}: {}", nodes.to_formatted_string(&Locale::en));
        }
    }

    let start = Instant::now();
    let nodes = perft_root(depth);
    let elapsed = start.elapsed();
    let nps = if elapsed.as_secs_f64() > 0.0 {
        (nodes as f64 / elapsed.as_secs_f64()) as u64
    } else {
        0
    };
    println!(
        "perft({depth}) = {} in {:.3}s ({} N/s)",
        nodes.to_formatted_string(&Locale::en),
        elapsed.as_secs_f64(),
        nps.to_formatted_string(&Locale::en)
    );
}
