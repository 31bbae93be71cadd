//! Wall quad: four corners plus the GPU vertex buffer that draws them

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::geometry::face_normal;
use super::vertex::WallVertex;

/// One textured wall face. Owns its vertex buffer; dropped and recreated on
/// every arena resize.
pub struct Quad {
    corners: [Vec3; 4],
    vertex_buffer: wgpu::Buffer,
}

impl Quad {
    /// Builds a quad from `[front_top, front_bottom, back_top, back_bottom]`
    /// corners. `tile_size` is the world-space length of one texture repeat
    /// along the wall.
    pub fn new(device: &wgpu::Device, corners: [Vec3; 4], tile_size: f32) -> Self {
        let vertices = build_vertices(&corners, tile_size);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wall_quad"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            corners,
            vertex_buffer,
        }
    }

    pub fn corners(&self) -> &[Vec3; 4] {
        &self.corners
    }

    /// Issues the draw call. The pipeline and bind group are expected to be
    /// set already; the quad is a 4-vertex triangle strip.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..4, 0..1);
    }
}

/// Vertex data for a corner set. Strip order matches the corner order:
/// front-top, front-bottom, back-top, back-bottom.
pub(crate) fn build_vertices(corners: &[Vec3; 4], tile_size: f32) -> [WallVertex; 4] {
    let normal = face_normal(corners).to_array();
    // v runs along the wall and repeats every tile_size units; u spans the
    // bevel from front face to back face.
    let length = (corners[1] - corners[0]).length();
    let v_max = length / tile_size.max(1e-6);
    [
        WallVertex::new(corners[0].to_array(), normal, [0.0, 0.0]),
        WallVertex::new(corners[1].to_array(), normal, [0.0, v_max]),
        WallVertex::new(corners[2].to_array(), normal, [1.0, 0.0]),
        WallVertex::new(corners[3].to_array(), normal, [1.0, v_max]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{wall_corners, WallSide};
    use glam::Vec2;

    #[test]
    fn test_vertices_carry_corner_positions() {
        let corners = wall_corners(
            Vec2::new(-1.0, 5.0),
            Vec2::new(-1.0, -5.0),
            WallSide::Left,
            0.2,
            1.0,
        );
        let vertices = build_vertices(&corners, 2.0);
        for (vertex, corner) in vertices.iter().zip(corners.iter()) {
            assert_eq!(vertex.position, corner.to_array());
        }
    }

    #[test]
    fn test_uv_tiles_along_wall() {
        let corners = wall_corners(
            Vec2::new(-1.0, 5.0),
            Vec2::new(-1.0, -5.0),
            WallSide::Left,
            0.2,
            1.0,
        );
        let vertices = build_vertices(&corners, 2.0);
        // 10 units of wall at 2 units per repeat = v spans 0..5.
        assert_eq!(vertices[0].uv, [0.0, 0.0]);
        assert_eq!(vertices[1].uv, [0.0, 5.0]);
        assert_eq!(vertices[2].uv, [1.0, 0.0]);
        assert_eq!(vertices[3].uv, [1.0, 5.0]);
    }

    #[test]
    fn test_shared_face_normal() {
        let corners = wall_corners(
            Vec2::new(-1.0, 5.0),
            Vec2::new(-1.0, -5.0),
            WallSide::Left,
            0.2,
            1.0,
        );
        let vertices = build_vertices(&corners, 2.0);
        let normal = vertices[0].normal;
        assert!(vertices.iter().all(|v| v.normal == normal));
    }
}
