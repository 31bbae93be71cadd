//! Beveled wall quad geometry
//!
//! Pure corner math, no GPU types. Each wall face is leaned around its 2D
//! boundary line: the front face (toward the camera, negative z) is pushed
//! into the arena by the inclination, the back face is pushed out by the
//! same amount, so the wall reads as a slanted prism instead of a flat card.

use glam::{Vec2, Vec3};

/// Which side of the arena a wall sits on. The bevel lean mirrors per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

/// Corner positions of one wall quad, derived from its 2D boundary segment.
///
/// Returns `[front_top, front_bottom, back_top, back_bottom]` where front is
/// at `z = -half_height` and back is at `z = +half_height`. Only x is offset
/// by the inclination; left and right walls lean toward the arena center.
pub fn wall_corners(
    top: Vec2,
    bottom: Vec2,
    side: WallSide,
    inclination: f32,
    half_height: f32,
) -> [Vec3; 4] {
    let lean = match side {
        WallSide::Left => inclination,
        WallSide::Right => -inclination,
    };
    [
        Vec3::new(top.x + lean, top.y, -half_height),
        Vec3::new(bottom.x + lean, bottom.y, -half_height),
        Vec3::new(top.x - lean, top.y, half_height),
        Vec3::new(bottom.x - lean, bottom.y, half_height),
    ]
}

/// Outward face normal of a corner set as produced by [`wall_corners`].
pub fn face_normal(corners: &[Vec3; 4]) -> Vec3 {
    let along = corners[1] - corners[0];
    let across = corners[2] - corners[0];
    along.cross(across).normalize_or_zero()
}
