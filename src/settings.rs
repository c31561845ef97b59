//! Game tuning and difficulty presets
//!
//! Every timing threshold, spawn rate and score value lives here so a session
//! can be configured from a JSON file instead of hard-coded constants.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Ticks before the first enemy may appear
    pub fn enemy_grace_ticks(&self) -> u64 {
        match self {
            Difficulty::Easy => 200,
            Difficulty::Normal => ENEMY_GRACE_TICKS,
            Difficulty::Hard => 30,
        }
    }

    /// Per-tick enemy spawn probability
    pub fn enemy_spawn_chance(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.005,
            Difficulty::Normal => ENEMY_SPAWN_CHANCE,
            Difficulty::Hard => 0.01,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(&'static str),
}

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Board ===
    pub board_size: i32,
    pub starting_lives: u8,

    // === Durations (ticks) ===
    pub player_jump_ticks: u32,
    pub enemy_jump_ticks: u32,
    pub player_fall_ticks: u32,
    pub enemy_fall_ticks: u32,
    pub player_dying_ticks: u32,
    pub disk_ride_ticks: u32,
    pub disk_carry_ticks: u32,
    /// Enemies jump once their idle counter exceeds this
    pub enemy_idle_dwell: u32,
    pub enemy_grace_ticks: u64,

    // === Spawning ===
    pub disk_spawn_chance: f64,
    pub max_disks: usize,
    pub enemy_spawn_chance: f64,

    // === Motion ===
    pub gravity: f32,

    // === Scoring ===
    pub paint_score: i64,
    pub disk_score: i64,
    pub ground_dodge_score: i64,
    pub jumper_dodge_score: i64,
    pub death_penalty: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            board_size: BOARD_SIZE,
            starting_lives: STARTING_LIVES,

            player_jump_ticks: PLAYER_JUMP_TICKS,
            enemy_jump_ticks: ENEMY_JUMP_TICKS,
            player_fall_ticks: PLAYER_FALL_TICKS,
            enemy_fall_ticks: ENEMY_FALL_TICKS,
            player_dying_ticks: PLAYER_DYING_TICKS,
            disk_ride_ticks: DISK_RIDE_TICKS,
            disk_carry_ticks: DISK_CARRY_TICKS,
            enemy_idle_dwell: ENEMY_IDLE_DWELL,
            enemy_grace_ticks: ENEMY_GRACE_TICKS,

            disk_spawn_chance: DISK_SPAWN_CHANCE,
            max_disks: MAX_DISKS,
            enemy_spawn_chance: ENEMY_SPAWN_CHANCE,

            gravity: GRAVITY,

            paint_score: PAINT_SCORE,
            disk_score: DISK_SCORE,
            ground_dodge_score: GROUND_DODGE_SCORE,
            jumper_dodge_score: JUMPER_DODGE_SCORE,
            death_penalty: DEATH_PENALTY,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_difficulty(difficulty);
        settings
    }

    /// Apply a difficulty preset (updates the enemy pressure settings)
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.enemy_grace_ticks = difficulty.enemy_grace_ticks();
        self.enemy_spawn_chance = difficulty.enemy_spawn_chance();
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.board_size < 2 {
            return Err(SettingsError::Invalid("board_size must be at least 2"));
        }
        if self.starting_lives == 0 {
            return Err(SettingsError::Invalid("starting_lives must be positive"));
        }
        let durations = [
            self.player_jump_ticks,
            self.enemy_jump_ticks,
            self.player_fall_ticks,
            self.enemy_fall_ticks,
            self.player_dying_ticks,
            self.disk_ride_ticks,
            self.disk_carry_ticks,
        ];
        if durations.contains(&0) {
            return Err(SettingsError::Invalid("durations must be positive"));
        }
        let chance_ok = |p: f64| (0.0..=1.0).contains(&p);
        if !chance_ok(self.disk_spawn_chance) || !chance_ok(self.enemy_spawn_chance) {
            return Err(SettingsError::Invalid("spawn chances must lie in [0, 1]"));
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(SettingsError::Invalid("gravity must be finite and non-negative"));
        }
        Ok(())
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
