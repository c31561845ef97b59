//! Triangular height-map and painted flags
//!
//! The whole topology is one formula: the cube at (x, y) stands at height
//! N - x - y, for 0 <= x < N and 0 <= y < N - x. The pyramid slopes down from
//! the apex (0, 0, N) toward the two far edges.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// One cube of the pyramid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Set the first time the player lands here; never cleared
    pub painted: bool,
}

impl Tile {
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    size: i32,
    /// In scan order: x ascending, then y ascending
    tiles: Vec<Tile>,
}

impl Board {
    pub fn new(size: i32) -> Self {
        let mut tiles = Vec::with_capacity(Self::tile_count_for(size));
        for x in 0..size {
            for y in 0..size - x {
                tiles.push(Tile {
                    x,
                    y,
                    z: size - x - y,
                    painted: false,
                });
            }
        }
        Self { size, tiles }
    }

    /// Number of cubes on a pyramid of edge `size`: N(N+1)/2
    pub fn tile_count_for(size: i32) -> usize {
        let n = size.max(0) as usize;
        n * (n + 1) / 2
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Height of the cube at (x, y), or `None` off the pyramid
    pub fn height_at(&self, x: i32, y: i32) -> Option<i32> {
        if x >= 0 && x < self.size && y >= 0 && y < self.size - x {
            Some(self.size - x - y)
        } else {
            None
        }
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.height_at(coord.x, coord.y).is_some()
    }

    /// Every in-bounds cube must be painted to win
    pub fn is_paint_target(&self, x: i32, y: i32) -> bool {
        self.height_at(x, y).is_some()
    }

    /// Height used to anchor anything standing at `coord`.
    ///
    /// Equals `height_at` on the pyramid. Spawn-edge cells mirror onto their
    /// in-bounds neighbour across the missing edge; far-edge cells sit at 0.
    pub fn surface_height(&self, coord: Coord) -> i32 {
        self.size - coord.x.max(0) - coord.y.max(0)
    }

    fn index_of(&self, coord: Coord) -> Option<usize> {
        self.height_at(coord.x, coord.y)?;
        let x = coord.x as usize;
        let n = self.size as usize;
        // Rows before x hold n, n-1, ... cubes
        let row_start = x * n - x * x.saturating_sub(1) / 2;
        Some(row_start + coord.y as usize)
    }

    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        self.index_of(coord).map(|i| &self.tiles[i])
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn is_painted(&self, coord: Coord) -> bool {
        self.tile(coord).is_some_and(|t| t.painted)
    }

    /// Paint the cube at `coord`. Returns true only if it was not painted before.
    pub fn paint(&mut self, coord: Coord) -> bool {
        match self.index_of(coord) {
            Some(i) if !self.tiles[i].painted => {
                self.tiles[i].painted = true;
                true
            }
            _ => false,
        }
    }

    pub fn painted_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.painted).count()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn all_painted(&self) -> bool {
        self.tiles.iter().all(|t| t.painted)
    }
}
