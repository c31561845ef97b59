//! Entity variants and their per-tick state machines
//!
//! Entities never store their own coordinate; the registry owns placement.
//! `advance` only moves the private state + frame counter forward and reports
//! when an action finishes, so the tick can commit the board-level effect.

use serde::{Deserialize, Serialize};

use super::coord::Direction;
use crate::settings::Settings;

pub type EntityId = u32;

/// Shared state families for the player and both chasers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorState {
    /// At rest on a tile or spawn edge
    Idle,
    /// Mid-hop toward the neighbour in `direction`
    Jumping,
    /// Off the pyramid, dropping
    Falling,
    /// Player only: caught by an enemy
    Dying,
    /// Player only: riding a rescue disk back to the apex
    OnDisk,
}

/// Rescue disk lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiskState {
    Idle,
    WithPlayer,
    Dead,
}

/// Discriminant used for dispatch and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    GroundChaser,
    JumpChaser,
    RescueDisk,
}

/// A finished action the tick must act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Hop complete; the move toward `direction` should be committed
    Landed,
    /// Player's disk ride arrived at the apex
    RideFinished,
    /// Player's fall or death animation ran out; respawn
    Recovered,
    /// Chaser fell long enough to be removed
    Expired,
    /// Disk finished carrying and should be removed
    DiskSpent,
}

/// Player or chaser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub state: ActorState,
    pub direction: Direction,
    /// Ticks elapsed in the current state (the starting tick of an action is frame 1)
    pub frame_count: u32,
}

impl Actor {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            state: ActorState::Idle,
            direction: Direction::NegX,
            frame_count: 0,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == ActorState::Idle
    }

    fn enter(&mut self, state: ActorState) {
        self.state = state;
        self.frame_count = if state == ActorState::Idle { 0 } else { 1 };
    }

    pub fn start_jump(&mut self, direction: Direction) {
        self.direction = direction;
        self.enter(ActorState::Jumping);
    }

    pub fn start_fall(&mut self) {
        self.enter(ActorState::Falling);
    }

    pub fn start_dying(&mut self) {
        self.enter(ActorState::Dying);
    }

    pub fn start_ride(&mut self) {
        self.enter(ActorState::OnDisk);
    }

    pub fn start_idle(&mut self) {
        self.enter(ActorState::Idle);
    }

    /// Count one tick; returns an outcome when the current action hits `duration`
    fn count_down(&mut self, duration: u32, outcome: Outcome) -> Option<Outcome> {
        self.frame_count += 1;
        if self.frame_count >= duration {
            self.start_idle();
            Some(outcome)
        } else {
            None
        }
    }

    fn advance_player(&mut self, settings: &Settings) -> Option<Outcome> {
        match self.state {
            ActorState::Idle => {
                self.frame_count += 1;
                None
            }
            ActorState::Jumping => self.count_down(settings.player_jump_ticks, Outcome::Landed),
            ActorState::Falling => self.count_down(settings.player_fall_ticks, Outcome::Recovered),
            ActorState::Dying => self.count_down(settings.player_dying_ticks, Outcome::Recovered),
            ActorState::OnDisk => self.count_down(settings.disk_ride_ticks, Outcome::RideFinished),
        }
    }

    fn advance_chaser(&mut self, settings: &Settings) -> Option<Outcome> {
        match self.state {
            ActorState::Jumping => self.count_down(settings.enemy_jump_ticks, Outcome::Landed),
            ActorState::Falling => {
                self.frame_count += 1;
                (self.frame_count >= settings.enemy_fall_ticks).then_some(Outcome::Expired)
            }
            // Chasers never die or ride; just keep counting
            ActorState::Idle | ActorState::Dying | ActorState::OnDisk => {
                self.frame_count += 1;
                None
            }
        }
    }
}

/// Rescue disk floating beside the pyramid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub id: EntityId,
    pub state: DiskState,
    pub frame_count: u32,
    /// Never reset; drives the spin animation
    pub spin_count: u32,
    /// Cosmetic colour set
    pub palette: u8,
}

impl Disk {
    pub fn new(id: EntityId, palette: u8) -> Self {
        Self {
            id,
            state: DiskState::Idle,
            frame_count: 0,
            spin_count: 0,
            palette,
        }
    }

    pub fn start_carrying(&mut self) {
        self.state = DiskState::WithPlayer;
        self.frame_count = 1;
    }

    fn advance(&mut self, settings: &Settings) -> Option<Outcome> {
        self.spin_count += 1;
        match self.state {
            DiskState::Idle => {
                self.frame_count += 1;
                None
            }
            DiskState::WithPlayer => {
                self.frame_count += 1;
                if self.frame_count >= settings.disk_carry_ticks {
                    self.state = DiskState::Dead;
                    self.frame_count = 0;
                    Some(Outcome::DiskSpent)
                } else {
                    None
                }
            }
            DiskState::Dead => Some(Outcome::DiskSpent),
        }
    }
}

/// Closed set of things that can occupy a board cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Player(Actor),
    /// Rolling ball; wanders down the pyramid
    GroundChaser(Actor),
    /// Snake; homes in on the player
    JumpChaser(Actor),
    RescueDisk(Disk),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Player(a) | Entity::GroundChaser(a) | Entity::JumpChaser(a) => a.id,
            Entity::RescueDisk(d) => d.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::GroundChaser(_) => EntityKind::GroundChaser,
            Entity::JumpChaser(_) => EntityKind::JumpChaser,
            Entity::RescueDisk(_) => EntityKind::RescueDisk,
        }
    }

    pub fn actor(&self) -> Option<&Actor> {
        match self {
            Entity::Player(a) | Entity::GroundChaser(a) | Entity::JumpChaser(a) => Some(a),
            Entity::RescueDisk(_) => None,
        }
    }

    pub fn actor_mut(&mut self) -> Option<&mut Actor> {
        match self {
            Entity::Player(a) | Entity::GroundChaser(a) | Entity::JumpChaser(a) => Some(a),
            Entity::RescueDisk(_) => None,
        }
    }

    pub fn disk(&self) -> Option<&Disk> {
        match self {
            Entity::RescueDisk(d) => Some(d),
            _ => None,
        }
    }

    pub fn disk_mut(&mut self) -> Option<&mut Disk> {
        match self {
            Entity::RescueDisk(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self, Entity::GroundChaser(_) | Entity::JumpChaser(_))
    }

    /// Advance the private state machine by one tick
    pub fn advance(&mut self, settings: &Settings) -> Option<Outcome> {
        match self {
            Entity::Player(a) => a.advance_player(settings),
            Entity::GroundChaser(a) | Entity::JumpChaser(a) => a.advance_chaser(settings),
            Entity::RescueDisk(d) => d.advance(settings),
        }
    }
}
