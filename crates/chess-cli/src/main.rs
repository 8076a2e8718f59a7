//! Chess CLI - inspect boards, list legal moves, play moves and run perft.
//!
//! Boards are read from a FEN string or from a JSON file in the move
//! authority's format; without either the standard starting position is used.

mod commands;
mod config;

use clap::{Parser, Subcommand, ValueEnum};
use commands::Source;
use config::CliConfig;
use std::path::PathBuf;

/// Relaxed chess rules engine on the command line.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Inspect chess boards, list legal moves and play them")]
struct Cli {
    /// Board JSON file to start from
    #[arg(long, global = true, conflicts_with = "fen")]
    board: Option<PathBuf>,

    /// FEN string to start from
    #[arg(long, global = true)]
    fen: Option<String>,

    /// Side to move, overriding the FEN or defaulting to white for JSON boards
    #[arg(long, global = true, value_enum)]
    turn: Option<ColorArg>,

    /// Configuration file (defaults to chess.toml in this or a parent directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board and the side to move
    Show,
    /// List legal moves
    Moves {
        /// Only list moves of the items on this square
        square: Option<String>,
    },
    /// Report check, checkmate and stalemate for both sides
    Status,
    /// Play moves given as origin and destination squares, e.g. e2e4 or a7a8q
    Play {
        moves: Vec<String>,
        /// Print the resulting board as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Search depth (defaults to the configured perft_depth)
        depth: Option<u32>,
        /// Show the count below each root move
        #[arg(long)]
        divide: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    White,
    Black,
}

impl From<ColorArg> for chess_core::Color {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::White => chess_core::Color::White,
            ColorArg::Black => chess_core::Color::Black,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CliConfig::load_from(path)?,
        None => CliConfig::load()?,
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_writer(std::io::stderr)
        .init();

    let source = match (cli.fen, cli.board.or(config.board.clone())) {
        (Some(fen), _) => Source::Fen(fen),
        (None, Some(path)) => Source::Json(path),
        (None, None) => Source::Startpos,
    };
    tracing::debug!(?source, "loading game");
    let mut game = commands::load_game(&source, cli.turn.map(Into::into))?;

    let output = match cli.command {
        Commands::Show => commands::show(&game),
        Commands::Moves { square } => commands::moves(&game, square.as_deref())?,
        Commands::Status => commands::status(&game),
        Commands::Play { moves, json } => commands::play(&mut game, &moves, json)?,
        Commands::Perft { depth, divide } => {
            let depth = depth.unwrap_or(config.perft_depth);
            tracing::info!(depth, "running perft");
            commands::run_perft(&game, depth, divide)
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
