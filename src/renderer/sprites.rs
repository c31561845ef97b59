//! Sprite sheet lookup
//!
//! The atlas is a plain map from [`Drawable`] to a rectangle on the sheet,
//! built once and passed by reference to whatever draws.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, Drawable, Pose};

/// Pixel rectangle on the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl SpriteRect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Resolves a drawable to something a backend can blit
pub trait SpriteProvider {
    type Handle;

    /// `None` for drawables without a sprite (tiles are drawn as cubes)
    fn resolve(&self, drawable: &Drawable) -> Option<Self::Handle>;
}

const CELL: u32 = 16;
const BUBBLE: SpriteRect = SpriteRect::new(128, 80, 48, 32);
const DISK_ROW: u32 = 352;
/// Spin frames per palette row, including one spare column
const DISK_STRIDE: u32 = 5;
const DISK_SPIN_FRAMES: u8 = 4;
const DISK_PALETTES: u8 = crate::consts::DISK_PALETTES;

/// Column of the crouched frame for a facing; the stretched frame follows it
fn facing_column(direction: Direction) -> u32 {
    match direction {
        Direction::NegY => 0,
        Direction::NegX => 2,
        Direction::PosX => 4,
        Direction::PosY => 6,
    }
}

fn pose_offset(pose: Pose) -> u32 {
    match pose {
        Pose::Down => 0,
        Pose::Up => 1,
    }
}

#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    rects: HashMap<Drawable, SpriteRect>,
}

impl SpriteAtlas {
    /// Layout of the stock arcade sheet
    pub fn new() -> Self {
        let mut rects = HashMap::new();

        for direction in Direction::ALL {
            for pose in [Pose::Down, Pose::Up] {
                let x = (facing_column(direction) + pose_offset(pose)) * CELL;
                rects.insert(
                    Drawable::Player { direction, pose },
                    SpriteRect::new(x, 0, CELL, CELL),
                );
                // Stretched snake frames are two cells tall
                let snake = match pose {
                    Pose::Down => SpriteRect::new(x, 3 * CELL, CELL, CELL),
                    Pose::Up => SpriteRect::new(x, 2 * CELL, CELL, 2 * CELL),
                };
                rects.insert(Drawable::JumpChaser { direction, pose }, snake);
            }
        }

        rects.insert(Drawable::SpeechBubble, BUBBLE);
        rects.insert(
            Drawable::GroundChaser { pose: Pose::Down },
            SpriteRect::new(0, CELL, CELL, CELL),
        );
        rects.insert(
            Drawable::GroundChaser { pose: Pose::Up },
            SpriteRect::new(CELL, CELL, CELL, CELL),
        );

        for palette in 0..DISK_PALETTES {
            for spin in 0..DISK_SPIN_FRAMES {
                let column = spin as u32 + palette as u32 * DISK_STRIDE;
                rects.insert(
                    Drawable::Disk { palette, spin },
                    SpriteRect::new(column * CELL, DISK_ROW, CELL, CELL),
                );
            }
        }

        log::debug!("Sprite atlas built with {} entries", rects.len());
        Self { rects }
    }

    pub fn get(&self, drawable: &Drawable) -> Option<SpriteRect> {
        self.rects.get(drawable).copied()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl Default for SpriteAtlas {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteProvider for SpriteAtlas {
    type Handle = SpriteRect;

    fn resolve(&self, drawable: &Drawable) -> Option<SpriteRect> {
        self.get(drawable)
    }
}
