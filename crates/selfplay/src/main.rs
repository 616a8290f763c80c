//! Bot-versus-bot matches for ultimate tic-tac-toe.
//!
//! Plays series of games between the available bots, prints the score and
//! optionally saves every game as JSON. Also analyzes a single position
//! with MCTS and reports the root statistics.

mod players;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use players::{build_bot, BotKind, BotSettings};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use uttt_core::{Bot, GameState, GameStatus, Move, Player, Simulator};
use uttt_mcts::{Decision, Mcts};

/// Ultimate tic-tac-toe match runner.
#[derive(Parser)]
#[command(name = "uttt-selfplay")]
#[command(about = "Play bot-versus-bot matches and analyze positions")]
struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a series of games between two bots.
    Play {
        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Bot moving first (player 0).
        #[arg(long, value_enum, default_value = "mcts")]
        zero: BotKind,

        /// Bot moving second (player 1).
        #[arg(long, value_enum, default_value = "random")]
        one: BotKind,

        /// Per-move time budget in milliseconds.
        #[arg(short, long, default_value = "100")]
        time_ms: u64,

        /// Cap on MCTS iterations / playout rollouts per move. Makes runs
        /// reproducible; overrides --time-ms.
        #[arg(short, long)]
        iterations: Option<usize>,

        /// JSON file with `mcts` and `playout` settings. Overrides
        /// --time-ms and --iterations.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Alternate which bot moves first every other game.
        #[arg(long)]
        swap_sides: bool,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Write every game record to this JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search a single position with MCTS and print the root statistics.
    Analyze {
        /// Moves leading to the position, as `x,y` pairs.
        #[arg(value_parser = parse_move)]
        moves: Vec<Move>,

        /// Time budget in milliseconds.
        #[arg(short, long, default_value = "1000")]
        time_ms: u64,

        /// Cap on MCTS iterations.
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

/// A finished game.
#[derive(Serialize, Deserialize, Debug)]
struct GameRecord {
    seed: u64,

    /// Bot names, indexed by player.
    players: [String; 2],

    moves: Vec<Move>,

    /// `"0"` or `"1"` for a win, `"tie"` otherwise.
    outcome: String,
}

impl GameRecord {
    fn winner(&self) -> Option<&str> {
        match self.outcome.as_str() {
            "0" => Some(self.players[0].as_str()),
            "1" => Some(self.players[1].as_str()),
            _ => None,
        }
    }
}

/// Match score, from the point of view of the bot given as `--zero`.
#[derive(Debug, Default)]
struct MatchScore {
    first_wins: usize,
    second_wins: usize,
    ties: usize,
}

impl MatchScore {
    fn total(&self) -> usize {
        self.first_wins + self.second_wins + self.ties
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Parse a move written as `x,y`.
fn parse_move(s: &str) -> std::result::Result<Move, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse::<u8>().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y = y.trim().parse::<u8>().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok(Move::new(x, y))
}

fn outcome_label(status: GameStatus) -> String {
    match status {
        GameStatus::Win(player) => player.to_string(),
        _ => "tie".to_string(),
    }
}

/// Play one game to the end. `bots` is indexed by player.
fn play_game(bots: &mut [Box<dyn Bot>; 2], seed: u64) -> Result<GameRecord> {
    let mut sim = Simulator::new(&GameState::new());
    let mut moves = Vec::new();

    while sim.status().is_active() {
        let player = sim.current_player();
        let bot = &mut bots[player.index()];
        let mv = bot
            .choose_move(sim.state())
            .with_context(|| format!("{} failed to move in game {seed}", bot.name()))?;
        debug!(seed, %player, %mv, "move");

        sim.apply_move(mv)
            .with_context(|| format!("{} played illegal move {mv} in game {seed}", bot.name()))?;
        moves.push(mv);
    }

    Ok(GameRecord {
        seed,
        players: [bots[0].name().to_string(), bots[1].name().to_string()],
        moves,
        outcome: outcome_label(sim.status()),
    })
}

fn load_settings(
    config: Option<&Path>,
    time_ms: u64,
    iterations: Option<usize>,
) -> Result<BotSettings> {
    match (config, iterations) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {:?}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config: {:?}", path))
        }
        (None, Some(iterations)) => Ok(BotSettings::with_iterations(iterations)),
        (None, None) => Ok(BotSettings::with_time_budget(time_ms)),
    }
}

/// Run the play command.
#[allow(clippy::too_many_arguments)]
fn cmd_play(
    games: usize,
    zero: BotKind,
    one: BotKind,
    time_ms: u64,
    iterations: Option<usize>,
    config: Option<PathBuf>,
    swap_sides: bool,
    seed: u64,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(config.as_deref(), time_ms, iterations)?;
    info!(
        games,
        zero = zero.label(),
        one = one.label(),
        seed,
        ?settings,
        "starting match"
    );

    let start = Instant::now();

    let records: Vec<GameRecord> = (0..games)
        .into_par_iter()
        .map(|i| {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            let (first, second) = if swap_sides && i % 2 == 1 {
                (one, zero)
            } else {
                (zero, one)
            };
            let mut bots = [
                build_bot(first, &settings, game_seed),
                build_bot(second, &settings, game_seed.wrapping_add(1)),
            ];
            let record = play_game(&mut bots, game_seed)?;
            info!(
                game = i,
                moves = record.moves.len(),
                winner = record.winner().unwrap_or("tie"),
                "game finished"
            );
            Ok(record)
        })
        .collect::<Result<_>>()?;

    let mut score = MatchScore::default();
    for (i, record) in records.iter().enumerate() {
        let swapped = swap_sides && i % 2 == 1;
        match (record.outcome.as_str(), swapped) {
            ("0", false) | ("1", true) => score.first_wins += 1,
            ("0", true) | ("1", false) => score.second_wins += 1,
            _ => score.ties += 1,
        }
    }

    if let Some(path) = &output {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
        }
        let file =
            File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &records)
            .context("Failed to serialize game records")?;
        info!(path = ?path, "saved game records");
    }

    let elapsed = start.elapsed();
    let total_moves: usize = records.iter().map(|r| r.moves.len()).sum();
    let percent = |n: usize| n as f64 / score.total().max(1) as f64 * 100.0;

    println!("\nCompleted in {:.2}s", elapsed.as_secs_f64());
    println!("Games played: {}", score.total());
    println!(
        "Average game length: {:.1} moves",
        total_moves as f64 / games.max(1) as f64
    );
    println!("------------------------------------------------");
    println!(
        "{:<16} wins: {} ({:.1}%)",
        zero.label(),
        score.first_wins,
        percent(score.first_wins)
    );
    println!(
        "{:<16} wins: {} ({:.1}%)",
        one.label(),
        score.second_wins,
        percent(score.second_wins)
    );
    println!(
        "{:<16}       {} ({:.1}%)",
        "ties",
        score.ties,
        percent(score.ties)
    );

    Ok(())
}

/// Run the analyze command.
fn cmd_analyze(
    moves: Vec<Move>,
    time_ms: u64,
    iterations: Option<usize>,
    seed: u64,
) -> Result<()> {
    let mut sim = Simulator::new(&GameState::new());
    for (i, &mv) in moves.iter().enumerate() {
        sim.apply_move(mv)
            .with_context(|| format!("Move {} ({mv}) is illegal", i + 1))?;
    }
    let state = sim.into_state();
    println!("{state}");

    let settings = match iterations {
        Some(n) => BotSettings::with_iterations(n),
        None => BotSettings::with_time_budget(time_ms),
    };
    let mut mcts = Mcts::tactical(settings.mcts, ChaCha8Rng::seed_from_u64(seed));
    let result = mcts.search(&state).context("Search failed")?;

    let to_move: Player = state.current_player();
    println!(
        "\nBest move for {to_move}: {} ({:?})",
        result.best_move, result.decision
    );
    if result.decision == Decision::Search || result.decision == Decision::Fallback {
        println!(
            "{} iterations, {} nodes, {:.2}s",
            result.iterations,
            result.tree_size,
            result.elapsed.as_secs_f64()
        );

        let mut children = result.children.clone();
        children.sort_by(|a, b| b.visits.cmp(&a.visits));
        println!("------------------------------------------------");
        for child in children.iter().take(10) {
            println!(
                "{:<8} visits: {:>7}  mean: {:.3}",
                child.mv.to_string(),
                child.visits,
                child.mean_reward
            );
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play {
            games,
            zero,
            one,
            time_ms,
            iterations,
            config,
            swap_sides,
            seed,
            output,
        } => cmd_play(
            games, zero, one, time_ms, iterations, config, swap_sides, seed, output,
        ),

        Commands::Analyze {
            moves,
            time_ms,
            iterations,
            seed,
        } => cmd_analyze(moves, time_ms, iterations, seed),
    }
}
