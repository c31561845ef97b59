//! Flat-shaded cube geometry for board tiles

use glam::{Vec2, Vec3};

use super::projection::Projection;

/// Colors for game elements
pub mod colors {
    pub const TOP_UNPAINTED: [f32; 4] = [0.1, 0.6, 0.2, 1.0];
    pub const TOP_PAINTED: [f32; 4] = [0.9, 0.15, 0.15, 1.0];
    /// Face toward +y
    pub const SIDE_Y: [f32; 4] = [0.45, 0.2, 0.6, 1.0];
    /// Face toward +x
    pub const SIDE_X: [f32; 4] = [0.15, 0.25, 0.75, 1.0];
}

/// Projected quad, corners listed from the uppermost one on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [Vec2; 4],
    pub color: [f32; 4],
}

/// The three visible faces of the cube whose low corner is `origin`.
/// Order is top, +y side, +x side; drawing them in order is correct.
pub fn cube_faces(proj: &impl Projection, origin: Vec3, painted: bool) -> [Quad; 3] {
    let quad = |offsets: [[f32; 3]; 4], color| Quad {
        corners: offsets.map(|o| proj.project(origin + Vec3::from(o))),
        color,
    };

    let top = if painted {
        colors::TOP_PAINTED
    } else {
        colors::TOP_UNPAINTED
    };

    [
        quad(
            [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
            top,
        ),
        quad(
            [[0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
            colors::SIDE_Y,
        ),
        quad(
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
            colors::SIDE_X,
        ),
    ]
}
