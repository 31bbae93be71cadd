//! WebGPU rendering module
//!
//! Lit, textured quad geometry for the arena walls.

pub mod quad;
pub mod texture;
pub mod vertex;
pub mod walls;

pub use quad::Quad;
pub use texture::TiledTexture;
pub use vertex::WallVertex;
pub use walls::WallRenderer;
