//! Dungeon Board Designer
//!
//! Generates grid-based dungeon boards (uniform scatter or maze-grown
//! with distance-banded features) and simulates the card-draw game
//! loop: draw a card, find a legal spot for its action shape through
//! rotations and flips, commit it, repeat until the deck runs dry.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::ThreadRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use delver::deck::{CardValue, Deck};
use delver::generator::{self, GeneratorOptions};
use delver::grid::{format_board, Board};
use delver::maze;
use delver::persistence;
use delver::placement::{self, PlacedShape};
use delver::shapes::{self, ActionShape};

/// Designs dungeon boards and simulates card-draw shape placement.
#[derive(Parser)]
#[command(name = "delver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a board by uniform random scatter.
    Generate {
        /// Board side length.
        #[arg(long, default_value_t = 16)]
        size: usize,
        /// Wall percentage 0-100; omit for the default preset.
        #[arg(long)]
        walls: Option<u32>,
        /// RNG seed for reproducible boards.
        #[arg(long)]
        seed: Option<u64>,
        /// Write the board as JSON to this path.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate a maze-structured board with distance-banded features.
    Maze {
        #[arg(long, default_value_t = 16)]
        size: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Draw cards and auto-place action shapes onto a board.
    Simulate {
        /// Board file to play on; a fresh maze is generated if omitted.
        #[arg(long)]
        board: Option<PathBuf>,
        /// Board side length when generating.
        #[arg(long, default_value_t = 16)]
        size: usize,
        /// Number of combined 52-card decks (1-3).
        #[arg(long, default_value_t = 1)]
        decks: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a saved board.
    Show { board: PathBuf },
}

/// Either a seeded ChaCha8 stream or the thread RNG.
enum CliRng {
    Seeded(ChaCha8Rng),
    Thread(ThreadRng),
}

impl RngCore for CliRng {
    fn next_u32(&mut self) -> u32 {
        match self {
            CliRng::Seeded(rng) => rng.next_u32(),
            CliRng::Thread(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            CliRng::Seeded(rng) => rng.next_u64(),
            CliRng::Thread(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match self {
            CliRng::Seeded(rng) => rng.fill_bytes(dest),
            CliRng::Thread(rng) => rng.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        match self {
            CliRng::Seeded(rng) => rng.try_fill_bytes(dest),
            CliRng::Thread(rng) => rng.try_fill_bytes(dest),
        }
    }
}

fn make_rng(seed: Option<u64>) -> CliRng {
    match seed {
        Some(seed) => CliRng::Seeded(ChaCha8Rng::seed_from_u64(seed)),
        None => CliRng::Thread(rand::thread_rng()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate {
            size,
            walls,
            seed,
            output,
        } => run_generate(size, walls, seed, output),
        Command::Maze { size, seed, output } => run_maze(size, seed, output),
        Command::Simulate {
            board,
            size,
            decks,
            seed,
        } => run_simulate(board, size, decks, seed),
        Command::Show { board } => run_show(board),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(
    size: usize,
    walls: Option<u32>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let mut rng = make_rng(seed);
    let options = walls.map(|pct| GeneratorOptions {
        wall_percentage: pct.min(100),
        ..GeneratorOptions::standard()
    });
    let board =
        generator::generate(size, options.as_ref(), &mut rng).map_err(|e| e.to_string())?;
    finish_board(board, output, "random board")
}

fn run_maze(size: usize, seed: Option<u64>, output: Option<PathBuf>) -> Result<(), String> {
    let mut rng = make_rng(seed);
    let board = maze::generate_advanced(size, None, &mut rng).map_err(|e| e.to_string())?;
    finish_board(board, output, "maze board")
}

fn finish_board(board: Board, output: Option<PathBuf>, name: &str) -> Result<(), String> {
    print!("{}", format_board(&board));
    if let Some(path) = output {
        persistence::save(&path, name, &board, &shapes::standard_catalog())
            .map_err(|e| e.to_string())?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn run_show(path: PathBuf) -> Result<(), String> {
    let file = persistence::load(&path).map_err(|e| e.to_string())?;
    println!("{} ({}x{})", file.name, file.board.rows(), file.board.cols());
    print!("{}", format_board(&file.board));
    Ok(())
}

fn run_simulate(
    board_path: Option<PathBuf>,
    size: usize,
    decks: usize,
    seed: Option<u64>,
) -> Result<(), String> {
    let mut rng = make_rng(seed);

    let (mut board, catalog) = match board_path {
        Some(path) => {
            let file = persistence::load(&path).map_err(|e| e.to_string())?;
            let catalog = if file.action_shapes.is_empty() {
                shapes::standard_catalog()
            } else {
                file.action_shapes
            };
            (file.board, catalog)
        }
        None => {
            let board = maze::generate_advanced(size, None, &mut rng).map_err(|e| e.to_string())?;
            (board, shapes::standard_catalog())
        }
    };

    if board.entrance().is_none() {
        return Err("board has no entrance; nothing can be placed".to_owned());
    }

    let mut deck = Deck::new(decks);
    let mut placed: Vec<PlacedShape> = Vec::new();
    let mut encounters = 0usize;
    let mut misses = 0usize;

    while let Some(card) = deck.draw(&mut rng) {
        if card.value.is_face() {
            encounters += 1;
            println!("Drew {card} - automatic encounter");
            continue;
        }

        match try_place_card(&mut board, &catalog, &placed, card.value) {
            Some((entry_id, placement)) => {
                println!(
                    "Drew {card} - placed shape {entry_id} at [{}, {}]",
                    placement.row, placement.col
                );
                placed.push(PlacedShape {
                    shape: placement.shape,
                    start_row: placement.row,
                    start_col: placement.col,
                    card_value: card.value,
                    card_suit: card.suit,
                });
            }
            None => {
                misses += 1;
                let reason = matching_failure(&board, &catalog, &placed, card.value);
                println!("Drew {card} - no valid placement ({reason})");
            }
        }
    }

    println!();
    print!("{}", format_board(&board));
    println!(
        "{} shapes placed, {} encounters, {} unplaceable draws",
        placed.len(),
        encounters,
        misses
    );
    println!("{} open cells uncovered", board.uncovered_open_cells());
    Ok(())
}

/// Tries every catalog shape matching the card rank, committing and
/// returning the first success.
fn try_place_card(
    board: &mut Board,
    catalog: &[ActionShape],
    placed: &[PlacedShape],
    value: CardValue,
) -> Option<(u32, placement::Placement)> {
    for entry in shapes::shapes_for_card(catalog, value) {
        if let Some(result) = placement::find_oriented_placement(board, &entry.shape, placed) {
            placement::place_shape(board, &result.shape, result.row, result.col);
            return Some((entry.id, result));
        }
    }
    None
}

/// Best-effort reason for a miss: the diagnosis of the first matching
/// shape, or a generic note when the rank has no shapes at all.
fn matching_failure(
    board: &Board,
    catalog: &[ActionShape],
    placed: &[PlacedShape],
    value: CardValue,
) -> &'static str {
    let matches = shapes::shapes_for_card(catalog, value);
    match matches.first() {
        Some(entry) => placement::diagnose_failure(board, &entry.shape, placed)
            .map_or("placement exists but was not committed", |f| f.describe()),
        None => "no shapes match this card value",
    }
}
