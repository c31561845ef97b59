//! World to screen projection and painter's ordering

use std::cmp::Ordering;

use glam::{Vec2, Vec3};

use crate::sim::Renderable;

/// Maps a world point to whole-pixel screen coordinates
pub trait Projection {
    fn project(&self, world: Vec3) -> Vec2;
}

/// Linear projection with per-axis screen vectors, rounded to whole pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsometricProjection {
    /// Screen position of the world origin
    pub origin: Vec2,
    pub x_unit: Vec2,
    pub y_unit: Vec2,
    pub z_unit: Vec2,
}

impl IsometricProjection {
    pub const DEFAULT_ANGLE_DEG: f32 = 25.0;
    pub const DEFAULT_UNIT_PX: f32 = 16.0;

    /// Skew the ground plane by `angle_deg` from the screen horizon.
    /// Unit vectors are rounded so every cube edge spans whole pixels.
    pub fn new(origin: Vec2, angle_deg: f32, unit_px: f32) -> Self {
        let angle = angle_deg.to_radians();
        let across = (angle.cos() * unit_px).round();
        let down = (angle.sin() * unit_px).round();
        Self {
            origin,
            x_unit: Vec2::new(across, down),
            y_unit: Vec2::new(-across, down),
            z_unit: Vec2::new(0.0, -unit_px),
        }
    }

    pub fn with_origin(origin: Vec2) -> Self {
        Self::new(origin, Self::DEFAULT_ANGLE_DEG, Self::DEFAULT_UNIT_PX)
    }
}

impl Default for IsometricProjection {
    fn default() -> Self {
        Self::with_origin(Vec2::ZERO)
    }
}

impl Projection for IsometricProjection {
    fn project(&self, world: Vec3) -> Vec2 {
        let p = self.origin + self.x_unit * world.x + self.y_unit * world.y + self.z_unit * world.z;
        p.round()
    }
}

/// Back-to-front comparator: smaller x + y first (farther from the viewer),
/// then lower z, then x, then y.
pub fn draw_order(a: Vec3, b: Vec3) -> Ordering {
    (a.x + a.y)
        .total_cmp(&(b.x + b.y))
        .then(a.z.total_cmp(&b.z))
        .then(a.x.total_cmp(&b.x))
        .then(a.y.total_cmp(&b.y))
}

/// Stable sort into painter's order
pub fn sort_back_to_front(items: &mut [Renderable]) {
    items.sort_by(|a, b| draw_order(a.position, b.position));
}
