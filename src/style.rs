//! Wall appearance tuning
//!
//! Serialized alongside the rest of the game's settings so level themes can
//! restyle the walls without code changes.

use serde::{Deserialize, Serialize};

use crate::consts::{HALF_WALL_HEIGHT, WALL_INCLINATION, WALL_TILE_SIZE};

/// Shape and texturing parameters for both walls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallStyle {
    /// Horizontal offset beveling the front/back faces (pseudo-3D lean).
    pub inclination: f32,
    /// Half the wall height; faces sit at z = ±half_height.
    pub half_height: f32,
    /// World-space length of one texture repeat along the wall.
    pub tile_size: f32,
}

impl Default for WallStyle {
    fn default() -> Self {
        Self {
            inclination: WALL_INCLINATION,
            half_height: HALF_WALL_HEIGHT,
            tile_size: WALL_TILE_SIZE,
        }
    }
}
