//! Animation curves between discrete tiles
//!
//! Pure functions of (positions, frame counter, duration). Nothing here reads
//! engine state, so any in-progress action can be placed in 3D from its
//! counters alone.
//!
//! World positions are tile-top anchors: a cube at (x, y, z) has its top face at
//! z + 1, and entities standing on it are drawn at (x, y, z + 1).

use glam::{Vec2, Vec3};

use super::board::Board;
use super::coord::{Coord, Direction};
use crate::consts::JUMP_APEX_LIFT;

#[inline]
pub fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn ease_in(t: f32) -> f32 {
    t * t
}

/// Anchor for an entity standing at `coord`
pub fn anchor(board: &Board, coord: Coord) -> Vec3 {
    Vec3::new(
        coord.x as f32,
        coord.y as f32,
        board.surface_height(coord) as f32 + 1.0,
    )
}

/// Position along a hop from `start` to `end` at `frame` of `end_time`.
///
/// Horizontal motion is linear. Height rises with ease-out to an apex half a
/// unit above the higher endpoint during the first half, then drops with
/// ease-in onto `end`.
pub fn hop(start: Vec3, end: Vec3, frame: u32, end_time: u32) -> Vec3 {
    if end_time == 0 {
        return end;
    }
    let end_t = end_time as f32;
    let t = (frame as f32).clamp(0.0, end_t);
    let middle = end_t * 0.5;

    let apex = if end.z > start.z {
        end.z + JUMP_APEX_LIFT
    } else {
        start.z + JUMP_APEX_LIFT
    };

    let z = if t <= middle {
        start.z + (apex - start.z) * ease_out(t / middle)
    } else {
        apex + (end.z - apex) * ease_in((t - middle) / (end_t - middle))
    };

    let plane = start.truncate().lerp(end.truncate(), t / end_t);
    plane.extend(z)
}

/// Offset from the start anchor for a hop toward `dir`
pub fn jump_offset(
    start_height: f32,
    target_height: f32,
    dir: Direction,
    frame: u32,
    end_time: u32,
) -> Vec3 {
    let start = Vec3::new(0.0, 0.0, start_height);
    let end = dir.offset().as_vec2().extend(target_height);
    hop(start, end, frame, end_time) - start
}

/// Height of the tile a faller left from.
///
/// The faller stands at `coord` after hopping toward `dir`, so it left from
/// `coord - dir`. If that cell is itself off the pyramid (an enemy stepping off
/// a spawn edge) its height is mirrored across the missing edge.
pub fn takeoff_height(board: &Board, coord: Coord, dir: Direction) -> i32 {
    board.surface_height(coord.step(dir.opposite()))
}

/// Freefall: `takeoff - gravity * t²`
pub fn fall_height(takeoff_height: f32, frame: u32, gravity: f32) -> f32 {
    let t = frame as f32;
    takeoff_height - gravity * t * t
}

/// Position of a falling entity at `coord`, anchored on its tile top
pub fn fall_position(board: &Board, coord: Coord, dir: Direction, frame: u32, gravity: f32) -> Vec3 {
    let base = takeoff_height(board, coord, dir) as f32;
    Vec2::new(coord.x as f32, coord.y as f32).extend(fall_height(base, frame, gravity) + 1.0)
}

/// Disk ride: a hop from the disk anchor to the apex anchor
pub fn ride_position(board: &Board, disk_coord: Coord, frame: u32, end_time: u32) -> Vec3 {
    hop(
        anchor(board, disk_coord),
        anchor(board, Coord::APEX),
        frame,
        end_time,
    )
}
