use std::path::PathBuf;

use anyhow::Context as _;
use rand::{Rng, SeedableRng as _};
use serde::Serialize;
use tetro_engine::{GameConfig, GameMode, GameRng, GameSeed, GameSession};

use crate::{
    command::ModeArg,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[clap(long, default_value_t = 10)]
    games: u64,
    /// Seed of the first game; game `i` uses `first_seed + i`. Random if omitted
    #[clap(long)]
    first_seed: Option<u64>,
    /// Game mode, overriding the configuration file
    #[clap(long, value_enum)]
    mode: Option<ModeArg>,
    /// Game configuration file (JSON); its seed is ignored
    #[clap(long)]
    config: Option<PathBuf>,
    /// Stop a game after this many locked pieces
    #[clap(long, default_value_t = 1000)]
    max_pieces: usize,
    /// Include the final state of every game in the summary
    #[clap(long)]
    snapshots: bool,
    /// Output file (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct GameReport {
    seed: GameSeed,
    mode: GameMode,
    pieces: usize,
    points: u64,
    level: u32,
    cleared_rows: usize,
    line_cleared_counter: [usize; 5],
    game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct SimulationSummary {
    games: Vec<GameReport>,
    mean_points: f64,
    best_points: u64,
    game_over_count: usize,
}

impl SimulationSummary {
    #[expect(clippy::cast_precision_loss)]
    fn new(games: Vec<GameReport>) -> Self {
        let total: u64 = games.iter().map(|game| game.points).sum();
        let mean_points = if games.is_empty() {
            0.0
        } else {
            total as f64 / games.len() as f64
        };
        Self {
            best_points: games.iter().map(|game| game.points).max().unwrap_or(0),
            game_over_count: games.iter().filter(|game| game.game_over).count(),
            mean_points,
            games,
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        first_seed,
        mode,
        config,
        max_pieces,
        snapshots,
        output,
    } = arg;

    let mut config = match config {
        Some(path) => util::read_json_file::<GameConfig, _>("game config", path)?,
        None => GameConfig::default(),
    };
    if let Some(mode) = mode {
        config.mode = (*mode).into();
    }
    config.validate().context("Invalid game configuration")?;
    let first_seed = first_seed.unwrap_or_else(rand::random);

    eprintln!(
        "Simulating {games} {} games from seed {first_seed}...",
        config.mode.name()
    );
    let mut reports = vec![];
    for i in 0..*games {
        let seed = first_seed.wrapping_add(i);
        let report = simulate_game(&config, seed, *max_pieces, *snapshots)?;
        eprintln!(
            "Game {}: {} points, {} pieces, level {}",
            i + 1,
            report.points,
            report.pieces,
            report.level
        );
        reports.push(report);
    }

    let summary = SimulationSummary::new(reports);
    eprintln!(
        "Mean {:.1} points, best {} points",
        summary.mean_points, summary.best_points
    );
    Output::save_json(&summary, output.clone())?;
    Ok(())
}

/// Plays one game with random moves until it ends or `max_pieces` locked.
///
/// Both the game and the move choices derive from `seed`, so a report is
/// reproducible from its inputs.
fn simulate_game(
    config: &GameConfig,
    seed: u64,
    max_pieces: usize,
    snapshot: bool,
) -> anyhow::Result<GameReport> {
    let config = GameConfig {
        seed: Some(GameSeed::from(seed)),
        ..config.clone()
    };
    let mut session = GameSession::new(config)?;
    let mut moves = GameRng::seed_from_u64(seed);

    while session.session_state().is_playing() && session.completed_pieces() < max_pieces {
        play_random_turn(&mut session, &mut moves);
    }

    let snapshot = snapshot
        .then(|| serde_json::to_value(session.snapshot()))
        .transpose()
        .context("Failed to serialize game snapshot")?;
    let score = session.score();
    Ok(GameReport {
        seed: session.seed(),
        mode: session.config().mode,
        pieces: session.completed_pieces(),
        points: score.points(),
        level: score.level(),
        cleared_rows: score.cleared_rows(),
        line_cleared_counter: *session.line_cleared_counter(),
        game_over: session.session_state().is_game_over(),
        snapshot,
    })
}

/// Sometimes holds, rotates and shifts at random, then hard drops.
fn play_random_turn<R>(session: &mut GameSession, rng: &mut R)
where
    R: Rng + ?Sized,
{
    if rng.random_ratio(1, 8) {
        _ = session.hold();
    }
    for _ in 0..rng.random_range(0..4) {
        _ = session.rotate_cw();
    }
    let shift: i32 = rng.random_range(-5..=5);
    for _ in 0..shift.unsigned_abs() {
        _ = if shift < 0 {
            session.move_left()
        } else {
            session.move_right()
        };
    }
    session.hard_drop();
}
