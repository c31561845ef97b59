//! Fixed tick simulation
//!
//! Processing order:
//!   1. Maybe spawn a rescue disk
//!   2. Maybe spawn an enemy
//!   3. Advance every entity's state machine
//!   4. Movement resolution per entity kind (commit moves, paint, fall, remove)
//!   5. Collision validation (skipped while the player is already down), victory check
//!   6. Tick counter
//!
//! Resolution works on a snapshot of (coord, id) taken during step 3, so an
//! entity that moves this tick is resolved exactly once.

use rand::Rng;

use super::coord::{Coord, Direction};
use super::entity::{Actor, ActorState, DiskState, Entity, EntityId, EntityKind, Outcome};
use super::registry::RegistryError;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::DISK_PALETTES;

/// Off-board cells enemies enter from, next to the second row
pub const SPAWN_LANES: [Coord; 2] = [Coord::new(1, -1), Coord::new(-1, 1)];

/// Entity advanced this tick, pending resolution
struct Advanced {
    coord: Coord,
    id: EntityId,
    kind: EntityKind,
    outcome: Option<Outcome>,
}

/// Advance the session by one tick.
///
/// Does nothing once the session has ended. An error means the registry no
/// longer matches the simulation's bookkeeping; the session should be reset.
pub fn tick(state: &mut GameState) -> Result<Vec<GameEvent>, RegistryError> {
    if state.phase != GamePhase::Playing {
        return Ok(Vec::new());
    }

    let mut events = Vec::new();

    maybe_spawn_disk(state, &mut events)?;
    maybe_spawn_enemy(state, &mut events)?;

    let advanced = advance_entities(state);
    for entry in advanced {
        match entry.kind {
            EntityKind::Player => resolve_player(state, entry.coord, entry.outcome, &mut events)?,
            EntityKind::GroundChaser | EntityKind::JumpChaser => resolve_chaser(state, &entry, &mut events)?,
            EntityKind::RescueDisk => resolve_disk(state, &entry)?,
        }
    }

    if !state.player_dead {
        validate(state, &mut events)?;
    }
    check_victory(state, &mut events);

    state.time_ticks += 1;
    log::trace!(
        "tick {} score={} lives={} enemies={} disks={}",
        state.time_ticks,
        state.score,
        state.lives,
        state.enemy_count(),
        state.disk_count()
    );

    Ok(events)
}

impl GameState {
    /// Advance one tick; see [`tick`]
    pub fn update(&mut self) -> Result<Vec<GameEvent>, RegistryError> {
        tick(self)
    }
}

// ══════════════════════════════════════════════════════════════
// Spawning
// ══════════════════════════════════════════════════════════════

fn maybe_spawn_disk(state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), RegistryError> {
    if state.disk_count() >= state.settings.max_disks {
        return Ok(());
    }
    if !state.rng.random_bool(state.settings.disk_spawn_chance) {
        return Ok(());
    }

    let size = state.board.size();
    let k = state.rng.random_range(0..size);
    let picked_x_edge = state.rng.random_bool(0.5);

    // Keep disks on opposite sides of the pyramid
    let side_taken = |x_edge: bool| {
        state.registry.entities().any(|(c, e)| {
            matches!(e, Entity::RescueDisk(_)) && if x_edge { c.x == -1 } else { c.y == -1 }
        })
    };
    let (x_taken, y_taken) = (side_taken(true), side_taken(false));
    if x_taken && y_taken {
        return Ok(());
    }
    let picked_taken = if picked_x_edge { x_taken } else { y_taken };
    let x_edge = picked_x_edge != picked_taken;

    let coord = if x_edge {
        Coord::new(-1, k)
    } else {
        Coord::new(k, -1)
    };
    if !state.registry.is_empty_at(coord) {
        return Ok(());
    }

    let palette = state.rng.random_range(0..DISK_PALETTES);
    state.spawn_disk(coord, palette)?;
    log::debug!("Disk spawned at {coord} (palette {palette})");
    events.push(GameEvent::DiskSpawned { coord });
    Ok(())
}

fn maybe_spawn_enemy(state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), RegistryError> {
    if state.time_ticks < state.settings.enemy_grace_ticks {
        return Ok(());
    }
    if !state.rng.random_bool(state.settings.enemy_spawn_chance) {
        return Ok(());
    }

    let kind = if state.rng.random_bool(0.5) {
        EntityKind::GroundChaser
    } else {
        EntityKind::JumpChaser
    };

    // Try a random lane first, fall back to the other one
    let mut lanes = SPAWN_LANES;
    if state.rng.random_bool(0.5) {
        lanes.swap(0, 1);
    }
    let Some(coord) = lanes.into_iter().find(|c| state.registry.is_empty_at(*c)) else {
        return Ok(());
    };

    state.spawn_enemy(coord, kind)?;
    log::debug!("{kind:?} spawned at {coord}");
    events.push(GameEvent::EnemySpawned { coord, kind });
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// State machines
// ══════════════════════════════════════════════════════════════

fn advance_entities(state: &mut GameState) -> Vec<Advanced> {
    let settings = &state.settings;
    let mut advanced = Vec::new();
    state.registry.for_each_entity_mut(|coord, entity| {
        let outcome = entity.advance(settings);
        advanced.push(Advanced {
            coord,
            id: entity.id(),
            kind: entity.kind(),
            outcome,
        });
    });
    advanced
}

// ══════════════════════════════════════════════════════════════
// Movement resolution
// ══════════════════════════════════════════════════════════════

fn paint(state: &mut GameState, coord: Coord, events: &mut Vec<GameEvent>) {
    if state.board.paint(coord) {
        state.score += state.settings.paint_score;
        events.push(GameEvent::TilePainted { coord });
    }
}

fn resolve_player(
    state: &mut GameState,
    coord: Coord,
    outcome: Option<Outcome>,
    events: &mut Vec<GameEvent>,
) -> Result<(), RegistryError> {
    let id = state.player_id;
    let here = match outcome {
        Some(Outcome::Landed) => land_player(state, coord, events)?,
        Some(Outcome::RideFinished) => {
            state.registry.relocate(coord, Coord::APEX, id)?;
            log::debug!("Disk ride finished at apex");
            paint(state, Coord::APEX, events);
            Coord::APEX
        }
        Some(Outcome::Recovered) => respawn_player(state, coord, events)?,
        _ => coord,
    };

    // Idle (including the instant a landing settles) accepts the queued hop
    if state.registry.actor(here, id)?.is_idle() {
        if let Some(dir) = state.take_movement() {
            state.registry.actor_mut(here, id)?.start_jump(dir);
        }
    }
    Ok(())
}

/// Commit a finished hop. Returns the player's new coordinate.
fn land_player(state: &mut GameState, coord: Coord, events: &mut Vec<GameEvent>) -> Result<Coord, RegistryError> {
    let id = state.player_id;
    let dest = coord.step(state.registry.actor(coord, id)?.direction);

    if state.board.contains(dest) {
        state.registry.relocate(coord, dest, id)?;
        paint(state, dest, events);
        return Ok(dest);
    }

    let disk_id = state
        .registry
        .at(dest)
        .iter()
        .filter_map(Entity::disk)
        .find(|d| d.state == DiskState::Idle)
        .map(|d| d.id);

    state.registry.relocate(coord, dest, id)?;
    match disk_id {
        Some(disk_id) => {
            if let Some(disk) = state.registry.get_mut(dest, disk_id).and_then(Entity::disk_mut) {
                disk.start_carrying();
            }
            state.registry.actor_mut(dest, id)?.start_ride();
            state.score += state.settings.disk_score;
            log::debug!("Player boarded disk at {dest}");
            events.push(GameEvent::DiskBoarded { coord: dest });
        }
        None => {
            state.registry.actor_mut(dest, id)?.start_fall();
            log::debug!("Player fell off at {dest}");
            events.push(GameEvent::PlayerFell { coord: dest });
        }
    }
    Ok(dest)
}

fn respawn_player(state: &mut GameState, coord: Coord, events: &mut Vec<GameEvent>) -> Result<Coord, RegistryError> {
    let target = state.first_empty_tile().unwrap_or(Coord::APEX);
    state.registry.relocate(coord, target, state.player_id)?;
    state.player_dead = false;
    log::debug!("Player respawned at {target}");
    events.push(GameEvent::PlayerRespawned { coord: target });
    Ok(target)
}

fn resolve_chaser(state: &mut GameState, entry: &Advanced, events: &mut Vec<GameEvent>) -> Result<(), RegistryError> {
    let id = entry.id;
    let mut here = entry.coord;

    match entry.outcome {
        Some(Outcome::Landed) => {
            let dest = here.step(state.registry.actor(here, id)?.direction);
            state.registry.relocate(here, dest, id)?;
            if !state.board.contains(dest) {
                state.registry.actor_mut(dest, id)?.start_fall();
            }
            here = dest;
        }
        Some(Outcome::Expired) => {
            state.registry.remove(here, id)?;
            let points = match entry.kind {
                EntityKind::JumpChaser => state.settings.jumper_dodge_score,
                _ => state.settings.ground_dodge_score,
            };
            state.score += points;
            log::debug!("{:?} dodged (+{points})", entry.kind);
            events.push(GameEvent::EnemyDodged { kind: entry.kind });
            return Ok(());
        }
        _ => {}
    }

    let actor = state.registry.actor(here, id)?;
    if actor.is_idle() && actor.frame_count > state.settings.enemy_idle_dwell {
        let dir = choose_direction(state, here, entry.kind);
        state.registry.actor_mut(here, id)?.start_jump(dir);
    }
    Ok(())
}

/// Next hop for an idle chaser at `coord`
fn choose_direction(state: &mut GameState, coord: Coord, kind: EntityKind) -> Direction {
    // Entry hop from a spawn edge always goes onto the pyramid
    if coord.on_spawn_edge() {
        return if coord.y == -1 {
            Direction::PosY
        } else {
            Direction::PosX
        };
    }

    match kind {
        EntityKind::JumpChaser => {
            let target = state.player().map_or(Coord::APEX, |(c, _)| c);
            toward(coord, target)
        }
        _ => {
            if coord.x >= state.board.size() - 1 || state.rng.random_bool(0.5) {
                Direction::PosY
            } else {
                Direction::PosX
            }
        }
    }
}

/// Greedy step toward `target`, closing the y gap before the x gap
pub fn toward(from: Coord, target: Coord) -> Direction {
    if target.y > from.y {
        Direction::PosY
    } else if target.y < from.y {
        Direction::NegY
    } else if target.x > from.x {
        Direction::PosX
    } else if target.x < from.x {
        Direction::NegX
    } else {
        Direction::PosY
    }
}

fn resolve_disk(state: &mut GameState, entry: &Advanced) -> Result<(), RegistryError> {
    if entry.outcome == Some(Outcome::DiskSpent) {
        state.registry.remove(entry.coord, entry.id)?;
        log::debug!("Disk at {} gone", entry.coord);
    }
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Validation
// ══════════════════════════════════════════════════════════════

/// Mark the player dead if an idle enemy shares its tile while it is idle, or if it is falling
fn validate(state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), RegistryError> {
    let player_id = state.player_id;
    let mut found = None;
    state.registry.for_each(|coord, entities| {
        let Some(player) = entities
            .iter()
            .find(|e| e.id() == player_id)
            .and_then(Entity::actor)
        else {
            return;
        };
        let caught = player.is_idle()
            && entities
                .iter()
                .any(|e| e.is_enemy() && e.actor().is_some_and(Actor::is_idle));
        found = Some((coord, caught, player.state == ActorState::Falling));
    });

    let Some((coord, caught, falling)) = found else {
        return Ok(());
    };
    if !caught && !falling {
        return Ok(());
    }

    state.player_dead = true;
    state.lives = state.lives.saturating_sub(1);
    state.score -= state.settings.death_penalty;

    if caught {
        state.registry.actor_mut(coord, state.player_id)?.start_dying();
        log::debug!("Player caught at {coord}");
        events.push(GameEvent::PlayerCaught { coord });
    }

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over at tick {} with score {}", state.time_ticks, state.score);
        events.push(GameEvent::GameOver);
    }
    Ok(())
}

fn check_victory(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase == GamePhase::Playing && state.board.all_painted() {
        state.phase = GamePhase::Victory;
        log::info!("Pyramid painted at tick {} with score {}", state.time_ticks, state.score);
        events.push(GameEvent::Victory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Difficulty, Settings};
    use proptest::prelude::*;

    fn quiet_settings() -> Settings {
        Settings {
            disk_spawn_chance: 0.0,
            enemy_spawn_chance: 0.0,
            ..Settings::default()
        }
    }

    fn quiet_state() -> GameState {
        GameState::with_settings(quiet_settings(), 12345).unwrap()
    }

    fn run(state: &mut GameState, ticks: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(tick(state).unwrap());
        }
        events
    }

    fn player_at(state: &GameState) -> (Coord, ActorState) {
        let (c, a) = state.player().unwrap();
        (c, a.state)
    }

    #[test]
    fn test_jump_paints_after_thirteen_ticks() {
        let mut state = quiet_state();
        state.report_movement(Direction::PosX);

        run(&mut state, 12);
        assert_eq!(player_at(&state), (Coord::APEX, ActorState::Jumping));
        assert_eq!(state.score(), 0);

        let events = run(&mut state, 1);
        assert_eq!(player_at(&state), (Coord::new(1, 0), ActorState::Idle));
        assert!(state.board.is_painted(Coord::new(1, 0)));
        assert_eq!(state.score(), 25);
        assert!(events.contains(&GameEvent::TilePainted { coord: Coord::new(1, 0) }));
    }

    #[test]
    fn test_mailbox_buffers_latest_until_landing() {
        let mut state = quiet_state();
        state.report_movement(Direction::PosX);
        run(&mut state, 1);
        assert_eq!(state.pending_movement(), None);

        state.report_movement(Direction::PosY);
        state.report_movement(Direction::NegX);
        run(&mut state, 11);
        assert_eq!(state.pending_movement(), Some(Direction::NegX));

        // Landing tick commits the hop and immediately takes the queued one
        run(&mut state, 1);
        assert_eq!(state.pending_movement(), None);
        let (coord, actor) = state.player().unwrap();
        assert_eq!(coord, Coord::new(1, 0));
        assert_eq!(actor.state, ActorState::Jumping);
        assert_eq!(actor.direction, Direction::NegX);

        run(&mut state, 12);
        assert_eq!(player_at(&state), (Coord::APEX, ActorState::Idle));
        assert_eq!(state.score(), 50);
    }

    #[test]
    fn test_fall_off_edge_then_respawn() {
        let mut state = quiet_state();
        state.report_movement(Direction::NegX);

        let events = run(&mut state, 13);
        assert_eq!(player_at(&state), (Coord::new(-1, 0), ActorState::Falling));
        assert!(events.contains(&GameEvent::PlayerFell { coord: Coord::new(-1, 0) }));
        assert!(state.is_player_dead());
        assert_eq!(state.lives(), 2);
        assert_eq!(state.score(), -50);

        // Only one life lost for the whole fall
        run(&mut state, 28);
        assert_eq!(player_at(&state).1, ActorState::Falling);
        assert_eq!(state.lives(), 2);

        let events = run(&mut state, 1);
        assert_eq!(player_at(&state), (Coord::APEX, ActorState::Idle));
        assert!(events.contains(&GameEvent::PlayerRespawned { coord: Coord::APEX }));
        assert!(!state.is_player_dead());
        assert_eq!(state.score(), -50);
    }

    #[test]
    fn test_idle_enemy_on_player_tile_kills() {
        let mut state = quiet_state();
        state.spawn_enemy(Coord::APEX, EntityKind::GroundChaser).unwrap();

        let events = run(&mut state, 1);
        assert!(events.contains(&GameEvent::PlayerCaught { coord: Coord::APEX }));
        assert_eq!(state.lives(), 2);
        assert_eq!(state.score(), -50);
        assert_eq!(player_at(&state).1, ActorState::Dying);

        // The chaser is still registered on the apex mid-hop, so respawn skips it
        run(&mut state, 9);
        assert_eq!(player_at(&state), (Coord::new(0, 1), ActorState::Idle));
        assert!(!state.is_player_dead());
        assert_eq!(state.lives(), 2);
    }

    #[test]
    fn test_jumping_player_is_not_caught() {
        let mut state = quiet_state();
        state.report_movement(Direction::PosY);
        run(&mut state, 1);
        state.spawn_enemy(Coord::APEX, EntityKind::GroundChaser).unwrap();
        run(&mut state, 2);
        assert_eq!(state.lives(), 3);
        assert!(!state.is_player_dead());
    }

    #[test]
    fn test_game_over_freezes_session() {
        let settings = Settings {
            starting_lives: 1,
            ..quiet_settings()
        };
        let mut state = GameState::with_settings(settings, 7).unwrap();
        state.spawn_enemy(Coord::APEX, EntityKind::JumpChaser).unwrap();

        let events = run(&mut state, 1);
        assert!(events.contains(&GameEvent::GameOver));
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.lives(), 0);

        let ticks = state.time_ticks;
        let score = state.score();
        let frame = state.player().unwrap().1.frame_count;
        state.report_movement(Direction::PosX);
        assert!(run(&mut state, 5).is_empty());
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.score(), score);
        assert_eq!(state.player().unwrap().1.frame_count, frame);
        assert_eq!(state.pending_movement(), Some(Direction::PosX));

        state.reset().unwrap();
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.lives(), 1);
    }

    #[test]
    fn test_disk_rescue_rides_to_apex() {
        let mut state = quiet_state();
        let disk_coord = Coord::new(-1, 0);
        let disk_id = state.spawn_disk(disk_coord, 3).unwrap();
        state.report_movement(Direction::NegX);

        let events = run(&mut state, 13);
        assert!(events.contains(&GameEvent::DiskBoarded { coord: disk_coord }));
        assert_eq!(player_at(&state), (disk_coord, ActorState::OnDisk));
        assert_eq!(state.score(), 20);
        assert_eq!(state.lives(), 3);
        assert!(!state.is_player_dead());
        let disk = state.registry.get(disk_coord, disk_id).and_then(Entity::disk).unwrap();
        assert_eq!(disk.state, DiskState::WithPlayer);

        run(&mut state, 17);
        assert_eq!(state.disk_count(), 0);
        assert_eq!(player_at(&state), (disk_coord, ActorState::OnDisk));

        run(&mut state, 1);
        assert_eq!(player_at(&state), (Coord::APEX, ActorState::Idle));
        assert!(state.board.is_painted(Coord::APEX));
        assert_eq!(state.score(), 45);
        assert_eq!(state.lives(), 3);
    }

    #[test]
    fn test_disks_spawn_on_opposite_edges() {
        let settings = Settings {
            disk_spawn_chance: 1.0,
            ..quiet_settings()
        };
        let mut state = GameState::with_settings(settings, 99).unwrap();
        let events = run(&mut state, 5);

        let spawned: Vec<Coord> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::DiskSpawned { coord } => Some(*coord),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 2);
        assert_eq!(state.disk_count(), 2);
        assert_eq!(spawned.iter().filter(|c| c.x == -1).count(), 1);
        assert_eq!(spawned.iter().filter(|c| c.y == -1).count(), 1);
        assert!(spawned.iter().all(|c| !state.board.contains(*c)));
    }

    #[test]
    fn test_enemy_spawn_waits_for_grace_and_fills_lanes() {
        let settings = Settings {
            enemy_spawn_chance: 1.0,
            enemy_grace_ticks: 5,
            ..quiet_settings()
        };
        let mut state = GameState::with_settings(settings, 5).unwrap();

        run(&mut state, 5);
        assert_eq!(state.enemy_count(), 0);

        run(&mut state, 1);
        assert_eq!(state.enemy_count(), 1);
        run(&mut state, 1);
        assert_eq!(state.enemy_count(), 2);
        for lane in SPAWN_LANES {
            assert_eq!(state.registry.at(lane).len(), 1);
        }

        // Both lanes occupied: no spawn
        run(&mut state, 1);
        assert_eq!(state.enemy_count(), 2);
    }

    #[test]
    fn test_ground_chaser_falls_off_and_awards_dodge() {
        let mut state = quiet_state();
        let start = Coord::new(6, 0);
        let id = state.spawn_enemy(start, EntityKind::GroundChaser).unwrap();

        run(&mut state, 4);
        let actor = state.registry.actor(start, id).unwrap();
        assert_eq!(actor.state, ActorState::Jumping);
        // Last row always heads PosY
        assert_eq!(actor.direction, Direction::PosY);

        run(&mut state, 27);
        let (coord, entity) = state.registry.find(id).unwrap();
        assert_eq!(coord, Coord::new(6, 1));
        assert_eq!(entity.actor().unwrap().state, ActorState::Falling);

        let events = run(&mut state, 1);
        assert!(state.registry.find(id).is_none());
        assert_eq!(state.score(), 10);
        assert!(events.contains(&GameEvent::EnemyDodged { kind: EntityKind::GroundChaser }));
    }

    #[test]
    fn test_jump_chaser_homes_in_on_player() {
        let mut state = quiet_state();
        let start = Coord::new(2, 2);
        let id = state.spawn_enemy(start, EntityKind::JumpChaser).unwrap();

        run(&mut state, 4);
        let actor = state.registry.actor(start, id).unwrap();
        assert_eq!(actor.state, ActorState::Jumping);
        assert_eq!(actor.direction, Direction::NegY);

        run(&mut state, 19);
        assert_eq!(state.registry.find(id).map(|(c, _)| c), Some(Coord::new(2, 1)));
    }

    #[test]
    fn test_entry_hop_from_spawn_lanes() {
        let mut state = quiet_state();
        let a = state.spawn_enemy(Coord::new(1, -1), EntityKind::JumpChaser).unwrap();
        let b = state.spawn_enemy(Coord::new(-1, 1), EntityKind::GroundChaser).unwrap();
        run(&mut state, 4);
        assert_eq!(state.registry.actor(Coord::new(1, -1), a).unwrap().direction, Direction::PosY);
        assert_eq!(state.registry.actor(Coord::new(-1, 1), b).unwrap().direction, Direction::PosX);
    }

    #[test]
    fn test_toward_prefers_y() {
        assert_eq!(toward(Coord::new(2, 2), Coord::new(0, 0)), Direction::NegY);
        assert_eq!(toward(Coord::new(2, 0), Coord::new(0, 0)), Direction::NegX);
        assert_eq!(toward(Coord::new(0, 0), Coord::new(3, 1)), Direction::PosY);
        assert_eq!(toward(Coord::new(0, 1), Coord::new(3, 1)), Direction::PosX);
    }

    #[test]
    fn test_victory_when_every_tile_painted() {
        let settings = Settings {
            board_size: 2,
            ..quiet_settings()
        };
        let mut state = GameState::with_settings(settings, 3).unwrap();
        assert_eq!(state.board.tile_count(), 3);

        let mut events = Vec::new();
        for dir in [Direction::PosX, Direction::NegX, Direction::PosY] {
            assert_eq!(state.phase(), GamePhase::Playing);
            state.report_movement(dir);
            events.extend(run(&mut state, 13));
        }

        assert_eq!(state.board.painted_count(), 3);
        assert_eq!(state.phase(), GamePhase::Victory);
        assert!(events.contains(&GameEvent::Victory));
        assert_eq!(state.score(), 75);

        let ticks = state.time_ticks;
        run(&mut state, 3);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings {
            enemy_grace_ticks: 0,
            disk_spawn_chance: 0.05,
            enemy_spawn_chance: 0.05,
            ..Settings::default()
        };
        let mut a = GameState::with_settings(settings.clone(), 99999).unwrap();
        let mut b = GameState::with_settings(settings, 99999).unwrap();

        for i in 0..600u32 {
            if i % 20 == 0 {
                let dir = Direction::ALL[(i / 20) as usize % 4];
                a.report_movement(dir);
                b.report_movement(dir);
            }
            assert_eq!(tick(&mut a).unwrap(), tick(&mut b).unwrap());
        }
        assert_eq!(a.score(), b.score());
        assert_eq!(a.lives(), b.lives());
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player().map(|(c, _)| c), b.player().map(|(c, _)| c));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_one_player_and_paint_only_grows(
            seed in any::<u64>(),
            moves in prop::collection::vec(0usize..4, 1..40),
        ) {
            let mut settings = Settings::from_difficulty(Difficulty::Hard);
            settings.enemy_grace_ticks = 0;
            settings.enemy_spawn_chance = 0.05;
            let mut state = GameState::with_settings(settings, seed).unwrap();
            let mut painted: Vec<bool> = state.board.tiles().iter().map(|t| t.painted).collect();

            for i in 0..400usize {
                if i % 9 == 0 {
                    state.report_movement(Direction::ALL[moves[(i / 9) % moves.len()]]);
                }
                prop_assert!(tick(&mut state).is_ok());
                prop_assert_eq!(state.registry.count(|e| e.kind() == EntityKind::Player), 1);

                for (was, tile) in painted.iter_mut().zip(state.board.tiles()) {
                    prop_assert!(!*was || tile.painted);
                    *was = tile.painted;
                }
            }
        }
    }

    #[test]
    fn test_jump_chaser_falls_off_and_awards_bigger_dodge() {
        let mut state = quiet_state();
        let start = Coord::new(6, 0);
        let id = state.spawn_enemy(start, EntityKind::JumpChaser).unwrap();
        state.registry.actor_mut(start, id).unwrap().start_jump(Direction::PosX);

        run(&mut state, 18);
        assert_eq!(state.registry.actor(start, id).unwrap().state, ActorState::Jumping);

        run(&mut state, 1);
        let (coord, entity) = state.registry.find(id).unwrap();
        assert_eq!(coord, Coord::new(7, 0));
        assert_eq!(entity.actor().unwrap().state, ActorState::Falling);

        run(&mut state, 8);
        assert!(state.registry.find(id).is_some());

        let events = run(&mut state, 1);
        assert!(state.registry.find(id).is_none());
        assert_eq!(state.score(), 20);
        assert!(events.contains(&GameEvent::EnemyDodged { kind: EntityKind::JumpChaser }));
    }

    #[test]
    fn test_second_disk_mirrors_first() {
        for seed in 0..16 {
            let settings = Settings {
                disk_spawn_chance: 1.0,
                ..quiet_settings()
            };

            let mut state = GameState::with_settings(settings.clone(), seed).unwrap();
            state.spawn_disk(Coord::new(-1, 3), 0).unwrap();
            let events = run(&mut state, 1);
            assert!(
                events
                    .iter()
                    .any(|e| matches!(e, GameEvent::DiskSpawned { coord } if coord.y == -1 && coord.x >= 0)),
                "seed {seed}: {events:?}"
            );

            let mut state = GameState::with_settings(settings, seed).unwrap();
            state.spawn_disk(Coord::new(3, -1), 0).unwrap();
            let events = run(&mut state, 1);
            assert!(
                events
                    .iter()
                    .any(|e| matches!(e, GameEvent::DiskSpawned { coord } if coord.x == -1 && coord.y >= 0)),
                "seed {seed}: {events:?}"
            );
        }
    }

    #[test]
    fn test_no_third_disk_when_both_sides_taken() {
        let settings = Settings {
            disk_spawn_chance: 1.0,
            max_disks: 4,
            ..quiet_settings()
        };
        let mut state = GameState::with_settings(settings, 7).unwrap();
        state.spawn_disk(Coord::new(-1, 2), 0).unwrap();
        state.spawn_disk(Coord::new(4, -1), 1).unwrap();

        let events = run(&mut state, 20);
        assert_eq!(state.disk_count(), 2);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::DiskSpawned { .. })));
    }
}
