//! Pyramid Hop headless runner
//!
//! Plays a session with a simple autopilot and prints a JSON summary.
//!
//! Usage: pyramid-hop [--seed N] [--ticks N] [--difficulty easy|normal|hard] [--settings FILE]

use std::process::ExitCode;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use pyramid_hop::renderer::{IsometricProjection, Projection, SpriteAtlas, SpriteRect, sort_back_to_front};
use pyramid_hop::sim::{Coord, Direction, Drawable, GameEvent, GamePhase, GameState};
use pyramid_hop::{Difficulty, Settings};

const DEFAULT_TICKS: u64 = 20_000;

struct Args {
    seed: u64,
    ticks: u64,
    difficulty: Option<Difficulty>,
    settings_path: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        seed: 0x5eed,
        ticks: DEFAULT_TICKS,
        difficulty: None,
        settings_path: None,
    };

    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().ok_or(format!("{flag} needs a value"));
        match flag.as_str() {
            "--seed" => args.seed = value()?.parse().map_err(|e| format!("bad seed: {e}"))?,
            "--ticks" => args.ticks = value()?.parse().map_err(|e| format!("bad tick count: {e}"))?,
            "--difficulty" => {
                let v = value()?;
                args.difficulty = Some(Difficulty::from_str(&v).ok_or(format!("unknown difficulty {v}"))?);
            }
            "--settings" => args.settings_path = Some(value()?),
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(args)
}

/// Picks hops toward unpainted, enemy-free neighbours
struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        }
    }

    fn choose(&mut self, state: &GameState, from: Coord) -> Option<Direction> {
        let safe: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| {
                let to = from.step(d);
                state.board.contains(to) && !state.registry.at(to).iter().any(|e| e.is_enemy())
            })
            .collect();
        let fresh: Vec<Direction> = safe
            .iter()
            .copied()
            .filter(|&d| !state.board.is_painted(from.step(d)))
            .collect();

        let pool = if fresh.is_empty() { &safe } else { &fresh };
        if pool.is_empty() {
            return None;
        }
        Some(pool[self.rng.random_range(0..pool.len())])
    }
}

#[derive(Serialize)]
struct SceneItem {
    screen: Vec2,
    drawable: Drawable,
    sprite: Option<SpriteRect>,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    difficulty: &'static str,
    ticks: u64,
    phase: GamePhase,
    score: i64,
    lives: u8,
    painted: usize,
    tiles: usize,
    enemies_dodged: usize,
    deaths: usize,
    scene: Vec<SceneItem>,
}

fn run(args: Args) -> Result<Summary, Box<dyn std::error::Error>> {
    let mut settings = match &args.settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(difficulty) = args.difficulty {
        settings.apply_difficulty(difficulty);
    }

    let mut state = GameState::with_settings(settings, args.seed)?;
    let mut pilot = Autopilot::new(args.seed);
    let mut dodged = 0;
    let mut deaths = 0;

    while state.time_ticks < args.ticks && state.phase() == GamePhase::Playing {
        if state.pending_movement().is_none() {
            let choice = state
                .player()
                .filter(|(_, player)| player.is_idle())
                .and_then(|(coord, _)| pilot.choose(&state, coord));
            if let Some(dir) = choice {
                state.report_movement(dir);
            }
        }

        for event in state.update()? {
            match event {
                GameEvent::EnemyDodged { .. } => dodged += 1,
                GameEvent::PlayerFell { .. } | GameEvent::PlayerCaught { .. } => deaths += 1,
                _ => {}
            }
            log::debug!("t={} {:?}", state.time_ticks, event);
        }
    }

    log::info!(
        "Finished after {} ticks: {:?}, score {}",
        state.time_ticks,
        state.phase(),
        state.score()
    );

    let projection = IsometricProjection::with_origin(Vec2::new(160.0, 48.0));
    let atlas = SpriteAtlas::new();
    let mut renderables = state.renderables();
    sort_back_to_front(&mut renderables);
    let scene = renderables
        .into_iter()
        .map(|r| SceneItem {
            screen: projection.project(r.position),
            drawable: r.drawable,
            sprite: atlas.get(&r.drawable),
        })
        .collect();

    Ok(Summary {
        seed: args.seed,
        difficulty: state.settings.difficulty.as_str(),
        ticks: state.time_ticks,
        phase: state.phase(),
        score: state.score(),
        lives: state.lives(),
        painted: state.board.painted_count(),
        tiles: state.board.tile_count(),
        enemies_dodged: dodged,
        deaths,
        scene,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Pyramid Hop (headless) starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };

    match run(args).and_then(|summary| Ok(serde_json::to_string_pretty(&summary)?)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the host page on the web
}
