//! The two arena side walls: lit textured quads plus their edge colliders
//!
//! Owns the render pipeline, the wall texture, one quad per side, and one
//! physics-body handle per side. The host calls `resize` whenever the arena
//! boundary moves and `render` once per frame inside its render pass.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};
use rapier2d::prelude::RigidBodyHandle;

use crate::error::WallError;
use crate::geometry::{WallSide, wall_corners};
use crate::level::Level;
use crate::physics::{PhysicsWorld, rebuild_wall_bodies};
use crate::style::WallStyle;

use super::quad::Quad;
use super::texture::TiledTexture;
use super::vertex::WallVertex;

const WALL_SHADER: &str = include_str!("wall_shader.wgsl");

/// Uniform block shared by both wall draws (must match the shader).
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct WallUniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    normal_mat: [[f32; 4]; 4],
    light_dir: [f32; 3],
    half_wall_height: f32,
    point_light_pos: [f32; 3],
    _pad: f32,
}

impl WallUniforms {
    fn from_level(level: &dyn Level, half_wall_height: f32) -> Self {
        let camera = level.camera();
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view: camera.view.to_cols_array_2d(),
            proj: camera.projection.to_cols_array_2d(),
            normal_mat: level.normal_matrix(Mat4::IDENTITY).to_cols_array_2d(),
            light_dir: level.light_dir().to_array(),
            half_wall_height,
            point_light_pos: level.ball_position().to_array(),
            _pad: 0.0,
        }
    }
}

/// Validates WGSL source, rendering any diagnostic against the source text.
fn validate_wgsl(source: &str) -> Result<(), WallError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|err| WallError::ShaderCompile {
        log: err.emit_to_string(source),
    })?;
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|err| WallError::ShaderCompile {
        log: err.emit_to_string(source),
    })?;
    Ok(())
}

/// Renders and physically models the two side walls of the arena.
pub struct WallRenderer {
    pipeline: wgpu::RenderPipeline,
    uniforms_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    // Kept alive for the bind group's texture view and sampler.
    _texture: TiledTexture,
    style: WallStyle,
    left_quad: Option<Quad>,
    right_quad: Option<Quad>,
    left_body: Option<RigidBodyHandle>,
    right_body: Option<RigidBodyHandle>,
    warned_no_geometry: bool,
}

impl WallRenderer {
    /// Builds the wall pipeline and loads the wall texture.
    ///
    /// Shader validation failure is fatal: the error carries the full
    /// compiler log. A missing or undecodable texture file is surfaced as an
    /// explicit error rather than a crash later.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        texture_path: &Path,
        style: WallStyle,
    ) -> Result<Self, WallError> {
        validate_wgsl(WALL_SHADER)?;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wall_shader"),
            source: wgpu::ShaderSource::Wgsl(WALL_SHADER.into()),
        });

        let texture = TiledTexture::load(device, queue, texture_path)?;

        let uniforms_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("wall_uniforms"),
            size: std::mem::size_of::<WallUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("wall_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wall_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("wall_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("wall_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[WallVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    // Blending is baked into the pipeline, so drawing the
                    // walls never mutates global GPU state.
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                // Both faces of the bevel are visible.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!("wall renderer ready (format {:?})", surface_format);

        Ok(Self {
            pipeline,
            uniforms_buffer,
            bind_group,
            _texture: texture,
            style,
            left_quad: None,
            right_quad: None,
            left_body: None,
            right_body: None,
            warned_no_geometry: false,
        })
    }

    /// Draws both walls. Uniforms are refreshed from the level each frame:
    /// identity model, the level's camera matrices, its light direction, and
    /// the ball position as the point light.
    pub fn render(
        &mut self,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'_>,
        level: &dyn Level,
    ) {
        if self.left_quad.is_none() || self.right_quad.is_none() {
            if !self.warned_no_geometry {
                log::warn!("wall render skipped: resize has not been called yet");
                self.warned_no_geometry = true;
            }
            return;
        }

        let uniforms = WallUniforms::from_level(level, self.style.half_height);
        queue.write_buffer(&self.uniforms_buffer, 0, bytemuck::bytes_of(&uniforms));

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        for quad in [&self.left_quad, &self.right_quad].into_iter().flatten() {
            quad.draw(render_pass);
        }
    }

    /// Rebuilds both walls from the new arena corners: the previous physics
    /// bodies and quads are destroyed, then one edge collider and one
    /// beveled quad are created per side. After this call exactly one body
    /// and one quad exist per side, whatever existed before.
    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        world: &mut PhysicsWorld,
        top_left: Vec2,
        top_right: Vec2,
        bottom_left: Vec2,
        bottom_right: Vec2,
    ) {
        rebuild_wall_bodies(
            world,
            &mut self.left_body,
            &mut self.right_body,
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        );

        let left_corners = wall_corners(
            top_left,
            bottom_left,
            WallSide::Left,
            self.style.inclination,
            self.style.half_height,
        );
        let right_corners = wall_corners(
            top_right,
            bottom_right,
            WallSide::Right,
            self.style.inclination,
            self.style.half_height,
        );
        // Reassigning the options drops the previous vertex buffers.
        self.left_quad = Some(Quad::new(device, left_corners, self.style.tile_size));
        self.right_quad = Some(Quad::new(device, right_corners, self.style.tile_size));

        log::debug!(
            "walls rebuilt: left {top_left}..{bottom_left}, right {top_right}..{bottom_right}"
        );
    }

    /// Tears the walls down: both physics bodies are removed from the world;
    /// quads, texture, and pipeline drop with `self`.
    pub fn dispose(mut self, world: &mut PhysicsWorld) {
        if let Some(handle) = self.left_body.take() {
            world.destroy_body(handle);
        }
        if let Some(handle) = self.right_body.take() {
            world.destroy_body(handle);
        }
    }

    pub fn left_quad(&self) -> Option<&Quad> {
        self.left_quad.as_ref()
    }

    pub fn right_quad(&self) -> Option<&Quad> {
        self.right_quad.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Camera;
    use glam::Vec3;

    #[test]
    fn test_embedded_shader_compiles() {
        validate_wgsl(WALL_SHADER).unwrap();
    }

    #[test]
    fn test_bad_shader_surfaces_log() {
        let err = validate_wgsl("@fragment fn fs_main() -> f32 { return 1 }").unwrap_err();
        match err {
            WallError::ShaderCompile { log } => assert!(!log.is_empty()),
            other => panic!("expected ShaderCompile, got {other:?}"),
        }
    }

    #[test]
    fn test_uniforms_layout() {
        // Four mat4s plus two vec3+f32 pairs, all 16-byte aligned.
        assert_eq!(std::mem::size_of::<WallUniforms>(), 288);
        assert_eq!(std::mem::size_of::<WallUniforms>() % 16, 0);
    }

    struct StubLevel {
        camera: Camera,
        ball: Vec3,
    }

    impl Level for StubLevel {
        fn camera(&self) -> &Camera {
            &self.camera
        }
        fn light_dir(&self) -> Vec3 {
            Vec3::new(0.3, -1.0, 0.2)
        }
        fn ball_position(&self) -> Vec3 {
            self.ball
        }
    }

    #[test]
    fn test_uniforms_from_level() {
        let level = StubLevel {
            camera: Camera::look_at(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO, 1.5),
            ball: Vec3::new(0.5, -2.0, 0.0),
        };
        let uniforms = WallUniforms::from_level(&level, 1.0);
        assert_eq!(uniforms.model, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(uniforms.view, level.camera.view.to_cols_array_2d());
        assert_eq!(uniforms.proj, level.camera.projection.to_cols_array_2d());
        assert_eq!(uniforms.point_light_pos, [0.5, -2.0, 0.0]);
        assert_eq!(uniforms.half_wall_height, 1.0);
    }
}
