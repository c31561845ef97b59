//! Game session state and core simulation types
//!
//! A `GameState` owns everything that changes during play: the board, the
//! registry, counters and the seeded RNG. Only the tick mutates it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::Board;
use super::coord::{Coord, Direction};
use super::entity::{Actor, Disk, Entity, EntityId, EntityKind};
use super::registry::{Registry, RegistryError};
use crate::settings::{Settings, SettingsError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Out of lives
    GameOver,
    /// Every cube painted
    Victory,
}

/// Something that happened during a tick, for sound/animation hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TilePainted { coord: Coord },
    DiskSpawned { coord: Coord },
    EnemySpawned { coord: Coord, kind: EntityKind },
    DiskBoarded { coord: Coord },
    PlayerFell { coord: Coord },
    PlayerCaught { coord: Coord },
    PlayerRespawned { coord: Coord },
    EnemyDodged { kind: EntityKind },
    GameOver,
    Victory,
}

/// Why a session could not be built
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Seed this session was started from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub board: Board,
    pub registry: Registry,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub lives: u8,
    pub score: i64,
    pub phase: GamePhase,
    /// Single-slot movement mailbox; the latest report wins
    pub(crate) pending_move: Option<Direction>,
    pub(crate) player_id: EntityId,
    /// Set when the player loses a life, cleared on respawn
    pub(crate) player_dead: bool,
    next_id: EntityId,
}

impl GameState {
    /// New session with default settings
    pub fn new(seed: u64) -> Result<Self, SessionError> {
        Self::with_settings(Settings::default(), seed)
    }

    /// New session; the player starts idle on the apex.
    /// Settings are validated first.
    pub fn with_settings(settings: Settings, seed: u64) -> Result<Self, SessionError> {
        settings.validate()?;
        let size = settings.board_size;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            board: Board::new(size),
            registry: Registry::new(size),
            time_ticks: 0,
            lives: settings.starting_lives,
            score: 0,
            phase: GamePhase::Playing,
            pending_move: None,
            player_id: 0,
            player_dead: false,
            next_id: 1,
            settings,
        };

        state.player_id = state.next_entity_id();
        let player = Entity::Player(Actor::new(state.player_id));
        state.registry.add(Coord::APEX, player)?;
        log::info!(
            "Session started: seed={} board={} lives={}",
            seed,
            size,
            state.lives
        );
        Ok(state)
    }

    /// Discard the session and start a fresh one with the same settings.
    /// The new seed is drawn from the current RNG stream. On error the
    /// current session is kept.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let seed = self.rng.random::<u64>();
        *self = Self::with_settings(self.settings.clone(), seed)?;
        Ok(())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue a hop for the player; replaces any unconsumed report
    pub fn report_movement(&mut self, dir: Direction) {
        self.pending_move = Some(dir);
    }

    pub fn pending_movement(&self) -> Option<Direction> {
        self.pending_move
    }

    pub(crate) fn take_movement(&mut self) -> Option<Direction> {
        self.pending_move.take()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_player_dead(&self) -> bool {
        self.player_dead
    }

    /// Player's registry coordinate and actor
    pub fn player(&self) -> Option<(Coord, &Actor)> {
        self.registry
            .find(self.player_id)
            .and_then(|(c, e)| e.actor().map(|a| (c, a)))
    }

    /// Place a new chaser at `coord`; returns its ID
    pub fn spawn_enemy(&mut self, coord: Coord, kind: EntityKind) -> Result<EntityId, RegistryError> {
        let id = self.next_entity_id();
        let actor = Actor::new(id);
        let entity = match kind {
            EntityKind::JumpChaser => Entity::JumpChaser(actor),
            _ => Entity::GroundChaser(actor),
        };
        self.registry.add(coord, entity)?;
        Ok(id)
    }

    /// Place a new idle rescue disk at `coord`; returns its ID
    pub fn spawn_disk(&mut self, coord: Coord, palette: u8) -> Result<EntityId, RegistryError> {
        let id = self.next_entity_id();
        self.registry.add(coord, Entity::RescueDisk(Disk::new(id, palette)))?;
        Ok(id)
    }

    pub fn disk_count(&self) -> usize {
        self.registry.count(|e| matches!(e, Entity::RescueDisk(_)))
    }

    pub fn enemy_count(&self) -> usize {
        self.registry.count(Entity::is_enemy)
    }

    /// First in-bounds cell with nothing on it, in scan order
    pub fn first_empty_tile(&self) -> Option<Coord> {
        self.board
            .tiles()
            .iter()
            .map(|t| t.coord())
            .find(|c| self.registry.is_empty_at(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(12345).unwrap();
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.lives(), 3);
        assert_eq!(state.score(), 0);
        let (coord, player) = state.player().unwrap();
        assert_eq!(coord, Coord::APEX);
        assert!(player.is_idle());
        assert_eq!(state.board.painted_count(), 0);
    }

    #[test]
    fn test_mailbox_keeps_latest() {
        let mut state = GameState::new(1).unwrap();
        state.report_movement(Direction::PosX);
        state.report_movement(Direction::PosY);
        assert_eq!(state.pending_movement(), Some(Direction::PosY));
        assert_eq!(state.take_movement(), Some(Direction::PosY));
        assert_eq!(state.pending_movement(), None);
    }

    #[test]
    fn test_first_empty_tile_skips_occupied() {
        let mut state = GameState::new(1).unwrap();
        assert_eq!(state.first_empty_tile(), Some(Coord::new(0, 1)));
        state.spawn_enemy(Coord::new(0, 1), EntityKind::GroundChaser).unwrap();
        assert_eq!(state.first_empty_tile(), Some(Coord::new(0, 2)));
    }

    #[test]
    fn test_reset_rebuilds_session() {
        let mut state = GameState::new(42).unwrap();
        state.score = 300;
        state.lives = 1;
        state.board.paint(Coord::new(1, 0));
        state.spawn_disk(Coord::new(-1, 0), 2).unwrap();
        state.reset().unwrap();
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), 3);
        assert_eq!(state.board.painted_count(), 0);
        assert_eq!(state.disk_count(), 0);
        assert_eq!(state.player().map(|(c, _)| c), Some(Coord::APEX));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            board_size: -4,
            ..Settings::default()
        };
        assert!(matches!(
            GameState::with_settings(settings, 1),
            Err(SessionError::Settings(SettingsError::Invalid(_)))
        ));
    }

    #[test]
    fn test_reset_keeps_session_on_bad_settings() {
        let mut state = GameState::new(9).unwrap();
        state.score = 75;
        state.settings.starting_lives = 0;
        assert!(state.reset().is_err());
        assert_eq!(state.score(), 75);
    }
}
