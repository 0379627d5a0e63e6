//! Gomoku server core CLI
//!
//! ## Usage
//!
//! - `gomoku-server` - Run the AI-vs-AI demo
//! - `gomoku-server demo --size 19 --json` - Demo on another board, JSON snapshot at the end
//! - `gomoku-server bench` - Time every difficulty on a midgame position

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use gomoku::board::{Board, Pos, Stone};
use gomoku::engine::{AiEngine, Difficulty};
use gomoku::registry::RoomRegistry;
use gomoku::room::{ClientId, GameMode, RoomEvent};
use gomoku::Settings;

/// Gomoku game-server core: rooms, rules, timers and AI opponents
#[derive(Parser)]
#[command(name = "gomoku-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch two AI seats play a full game through the room registry
    Demo {
        /// Board size (9, 13, 15 or 19; anything else falls back to 15)
        #[arg(long, default_value_t = 15)]
        size: usize,
        /// Print the final room snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Time every difficulty on a fixed midgame position
    Bench,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Demo { size, json }) => run_demo(size, json),
        Some(Commands::Bench) => run_bench(),
        None => run_demo(15, false),
    }
}

/// Drives an AI-vs-AI room the way a host would: wait for the next
/// deadline, tick, broadcast. Deadlines are jumped to rather than
/// slept through, so the game runs at full speed.
fn run_demo(size: usize, json: bool) -> Result<()> {
    let now = Instant::now();
    let mut registry = RoomRegistry::new(Settings::default());
    let created = registry.create_room(ClientId(0), "host", size, GameMode::AiVsAi, now)?;
    let room_id = created.room.clone();
    let size = created.snapshot.board_size;
    println!("AI-vs-AI demo in room {room_id} ({size}x{size})\n");

    let mut last = created;
    while let Some(due) = registry.next_deadline() {
        for update in registry.tick(due) {
            for event in &update.events {
                match event {
                    RoomEvent::MoveApplied { seat, pos } => {
                        println!("seat {seat} plays ({}, {})", pos.row, pos.col);
                    }
                    RoomEvent::GameWon { seat, moves, .. } => {
                        println!("\nseat {seat} wins after {moves} moves");
                    }
                    RoomEvent::GameDrawn { moves } => {
                        println!("\ndraw after {moves} moves");
                    }
                    _ => {}
                }
            }
            last = update;
        }
    }

    if !last.snapshot.game_over {
        return Err(anyhow!("demo ended without a result"));
    }
    println!();
    print_board(&last.snapshot.board);
    if json {
        println!("{}", serde_json::to_string_pretty(&last.snapshot)?);
    }
    Ok(())
}

fn print_board(rows: &[Vec<Stone>]) {
    for row in rows {
        let line: String = row
            .iter()
            .map(|stone| match stone {
                Stone::Black => 'X',
                Stone::White => 'O',
                Stone::Empty => '.',
            })
            .collect();
        println!("{line}");
    }
}

fn run_bench() -> Result<()> {
    let board = bench_position();
    println!("Benchmarking every difficulty on a midgame position\n");

    let levels = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
        Difficulty::Extreme,
    ];
    for difficulty in levels {
        let mut engine = AiEngine::with_budget(difficulty, Duration::from_millis(500));
        let choice = engine.choose_move(&board, Stone::White, Stone::Black);
        match choice.best_move {
            Some(pos) => println!(
                "{:>9}: ({:>2}, {:>2})  score {:>7}  nodes {:>8}  {:>5} ms",
                difficulty.name(),
                pos.row,
                pos.col,
                choice.score,
                choice.nodes,
                choice.time_ms
            ),
            None => println!("{:>9}: no move", difficulty.name()),
        }
    }
    Ok(())
}

/// A quiet midgame position: no forced win or block on the board, so
/// every difficulty exercises its real search.
fn bench_position() -> Board {
    let mut board = Board::new(15);
    for (row, col) in [(7, 7), (8, 8), (6, 6), (7, 9)] {
        board.place_stone(Pos::new(row, col), Stone::Black);
    }
    for (row, col) in [(7, 8), (8, 7), (6, 8)] {
        board.place_stone(Pos::new(row, col), Stone::White);
    }
    board
}
