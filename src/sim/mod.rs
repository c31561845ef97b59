//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (registry scan order)
//! - No rendering or platform dependencies

pub mod board;
pub mod coord;
pub mod entity;
pub mod motion;
pub mod registry;
pub mod state;
pub mod tick;
pub mod view;

pub use board::{Board, Tile};
pub use coord::{Coord, Direction};
pub use entity::{Actor, ActorState, Disk, DiskState, Entity, EntityId, EntityKind, Outcome};
pub use registry::{Registry, RegistryError};
pub use state::{GameEvent, GamePhase, GameState, SessionError};
pub use tick::{SPAWN_LANES, tick};
pub use view::{Drawable, Pose, Renderable};
