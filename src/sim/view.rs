//! Read-only scene extraction for a frontend
//!
//! Turns the current state into a flat list of world-space renderables. Tiles
//! come first in board scan order, then entities in registry scan order. A
//! frontend projects and sorts them (see `renderer`).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::coord::{Coord, Direction};
use super::entity::{Actor, ActorState, DiskState, Entity};
use super::motion::{anchor, fall_position, jump_offset, ride_position};
use super::state::GameState;

/// Crouched or stretched frame of a two-frame sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pose {
    Down,
    Up,
}

/// What to draw; the sprite key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drawable {
    Tile { painted: bool },
    Player { direction: Direction, pose: Pose },
    /// Curse bubble shown while the player is dying
    SpeechBubble,
    GroundChaser { pose: Pose },
    JumpChaser { direction: Direction, pose: Pose },
    Disk { palette: u8, spin: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    /// World position: tiles at their cube origin, entities at their feet
    pub position: Vec3,
    pub drawable: Drawable,
}

/// Ground chaser stays crouched for this many frames of a hop
const GROUND_CHASER_CROUCH: u32 = 7;
const JUMP_CHASER_CROUCH: u32 = 5;
/// Disk spin frames
const DISK_SPIN_FRAMES: u32 = 4;

impl GameState {
    /// Everything visible this tick
    pub fn renderables(&self) -> Vec<Renderable> {
        let mut out = Vec::with_capacity(self.board.tile_count() + 8);

        for tile in self.board.tiles() {
            out.push(Renderable {
                position: Vec3::new(tile.x as f32, tile.y as f32, tile.z as f32),
                drawable: Drawable::Tile { painted: tile.painted },
            });
        }

        for (coord, entity) in self.registry.entities() {
            match entity {
                Entity::Player(actor) => {
                    let position = self.actor_position(coord, actor, self.settings.player_jump_ticks);
                    out.push(Renderable {
                        position,
                        drawable: Drawable::Player {
                            direction: actor.direction,
                            pose: player_pose(actor),
                        },
                    });
                    if actor.state == ActorState::Dying {
                        out.push(Renderable {
                            position: position + Vec3::Z,
                            drawable: Drawable::SpeechBubble,
                        });
                    }
                }
                Entity::GroundChaser(actor) => out.push(Renderable {
                    position: self.actor_position(coord, actor, self.settings.enemy_jump_ticks),
                    drawable: Drawable::GroundChaser {
                        pose: chaser_pose(actor, GROUND_CHASER_CROUCH),
                    },
                }),
                Entity::JumpChaser(actor) => out.push(Renderable {
                    position: self.actor_position(coord, actor, self.settings.enemy_jump_ticks),
                    drawable: Drawable::JumpChaser {
                        direction: actor.direction,
                        pose: chaser_pose(actor, JUMP_CHASER_CROUCH),
                    },
                }),
                Entity::RescueDisk(disk) => {
                    let position = match disk.state {
                        DiskState::Idle => anchor(&self.board, coord),
                        // Same arc as the rider so the two stay together
                        DiskState::WithPlayer => ride_position(
                            &self.board,
                            coord,
                            disk.frame_count,
                            self.settings.disk_ride_ticks,
                        ),
                        DiskState::Dead => continue,
                    };
                    out.push(Renderable {
                        position,
                        drawable: Drawable::Disk {
                            palette: disk.palette,
                            spin: disk_spin(disk.spin_count),
                        },
                    });
                }
            }
        }

        out
    }

    /// Interpolated feet position of an actor registered at `coord`
    fn actor_position(&self, coord: Coord, actor: &Actor, jump_ticks: u32) -> Vec3 {
        let board = &self.board;
        match actor.state {
            ActorState::Idle | ActorState::Dying => anchor(board, coord),
            ActorState::Jumping => {
                let start = board.surface_height(coord) as f32;
                let dest = coord.step(actor.direction);
                // Hops off the pyramid stay level so the fall picks up from the takeoff height
                let target = if board.contains(dest) {
                    board.surface_height(dest) as f32
                } else {
                    start
                };
                anchor(board, coord)
                    + jump_offset(start, target, actor.direction, actor.frame_count, jump_ticks)
            }
            ActorState::Falling => fall_position(
                board,
                coord,
                actor.direction,
                actor.frame_count,
                self.settings.gravity,
            ),
            ActorState::OnDisk => {
                ride_position(board, coord, actor.frame_count, self.settings.disk_ride_ticks)
            }
        }
    }
}

fn player_pose(actor: &Actor) -> Pose {
    match actor.state {
        ActorState::Jumping if actor.frame_count > 1 => Pose::Up,
        ActorState::Falling => Pose::Up,
        _ => Pose::Down,
    }
}

fn chaser_pose(actor: &Actor, crouch: u32) -> Pose {
    match actor.state {
        ActorState::Jumping if actor.frame_count >= crouch => Pose::Up,
        ActorState::Falling => Pose::Up,
        _ => Pose::Down,
    }
}

fn disk_spin(spin_count: u32) -> u8 {
    ((spin_count as f32 / DISK_SPIN_FRAMES as f32).round() as u32 % DISK_SPIN_FRAMES) as u8
}
