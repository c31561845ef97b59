//! Pyramid Hop - an isometric cube-pyramid hopping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board, entities, per-tick update, animation curves)
//! - `renderer`: Projection and sprite lookup helpers for an external frontend
//! - `settings`: Data-driven tuning and difficulty presets

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings, SettingsError};

/// Default tuning constants
pub mod consts {
    /// Pyramid edge length (number of cubes along the bottom edges)
    pub const BOARD_SIZE: i32 = 7;
    pub const STARTING_LIVES: u8 = 3;

    /// Action durations, in ticks
    pub const PLAYER_JUMP_TICKS: u32 = 13;
    pub const ENEMY_JUMP_TICKS: u32 = 20;
    pub const PLAYER_FALL_TICKS: u32 = 30;
    pub const ENEMY_FALL_TICKS: u32 = 10;
    pub const PLAYER_DYING_TICKS: u32 = 10;
    /// Player ride from a rescue disk back to the apex
    pub const DISK_RIDE_TICKS: u32 = 19;
    /// Ticks a disk spends carrying the player before it disappears
    pub const DISK_CARRY_TICKS: u32 = 18;
    /// Enemies wait strictly longer than this many idle ticks before jumping
    pub const ENEMY_IDLE_DWELL: u32 = 3;
    /// Ticks after session start before enemies may spawn
    pub const ENEMY_GRACE_TICKS: u64 = 70;

    /// Spawn rules
    pub const DISK_SPAWN_CHANCE: f64 = 0.01;
    pub const MAX_DISKS: usize = 2;
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.007;
    pub const DISK_PALETTES: u8 = 8;

    /// Freefall acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.025;
    /// Extra height above the higher end of a hop
    pub const JUMP_APEX_LIFT: f32 = 0.5;

    /// Scoring
    pub const PAINT_SCORE: i64 = 25;
    pub const DISK_SCORE: i64 = 20;
    pub const GROUND_DODGE_SCORE: i64 = 10;
    pub const JUMPER_DODGE_SCORE: i64 = 20;
    pub const DEATH_PENALTY: i64 = 50;
}
