//! Frontend helpers
//!
//! Nothing here draws. These turn simulation renderables into screen
//! positions, draw order, cube quads and sprite-sheet rectangles for an
//! external canvas or GPU backend.

pub mod cube;
pub mod projection;
pub mod sprites;

pub use cube::{Quad, cube_faces};
pub use projection::{IsometricProjection, Projection, draw_order, sort_back_to_front};
pub use sprites::{SpriteAtlas, SpriteProvider, SpriteRect};
