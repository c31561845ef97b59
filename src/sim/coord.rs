//! Board coordinates and movement directions
//!
//! The pyramid is addressed by (x, y). Height is derived from the board, never
//! stored here, so a `Coord` can also name the off-board cells around the
//! pyramid (x = -1 or y = -1 spawn edges, x + y = N far edges).

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A registry-addressable board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// The pyramid's top cube
    pub const APEX: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `dir`
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let v = IVec2::new(self.x, self.y) + dir.offset();
        Self::new(v.x, v.y)
    }

    /// True for cells on either spawn edge (x = -1 or y = -1)
    pub fn on_spawn_edge(self) -> bool {
        self.x == -1 || self.y == -1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four axis directions an entity can face or hop toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    #[default]
    NegX,
    PosY,
    NegY,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
    ];

    /// Unit step on the board plane
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::PosX => IVec2::new(1, 0),
            Direction::NegX => IVec2::new(-1, 0),
            Direction::PosY => IVec2::new(0, 1),
            Direction::NegY => IVec2::new(0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::PosX => "pos_x",
            Direction::NegX => "neg_x",
            Direction::PosY => "pos_y",
            Direction::NegY => "neg_y",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pos_x" | "+x" => Some(Direction::PosX),
            "neg_x" | "-x" => Some(Direction::NegX),
            "pos_y" | "+y" => Some(Direction::PosY),
            "neg_y" | "-y" => Some(Direction::NegY),
            _ => None,
        }
    }
}
