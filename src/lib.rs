//! Arena Walls - beveled side walls for a Pong-style arena
//!
//! Core modules:
//! - `renderer`: WebGPU pipeline, wall quads, tiled texture
//! - `physics`: shared rapier2d world and wall edge colliders
//! - `geometry`: pure corner math for the beveled faces
//! - `level`: contract the walls consume from the hosting level
//! - `style`: serialized wall appearance tuning
//!
//! The host owns the game loop, the swapchain, and the physics timestep;
//! this crate owns everything about the two side walls: their lit textured
//! quads and their edge colliders, rebuilt together on every arena resize.

pub mod error;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod renderer;
pub mod style;

pub use error::WallError;
pub use geometry::{WallSide, wall_corners};
pub use level::{Camera, Level};
pub use physics::PhysicsWorld;
pub use renderer::WallRenderer;
pub use style::WallStyle;

/// Wall configuration constants
pub mod consts {
    /// Half the wall height; quad faces sit at z = ±this.
    pub const HALF_WALL_HEIGHT: f32 = 1.0;
    /// Horizontal bevel offset between the front and back faces.
    pub const WALL_INCLINATION: f32 = 0.2;
    /// World-space length of one texture repeat along a wall.
    pub const WALL_TILE_SIZE: f32 = 2.0;
}
