//! Tiled wall texture with a CPU-generated mip chain
//!
//! The wall texture repeats many times along the arena boundary, so it is
//! uploaded with a full mip chain and sampled with repeat wrapping. Mips are
//! box-filtered on the CPU at load time; the chain is tiny next to level 0.

use std::path::Path;

use crate::error::WallError;

/// GPU texture plus the view/sampler the wall bind group needs.
pub struct TiledTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl TiledTexture {
    /// Loads and decodes an image file, then uploads it mip-mapped.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Result<Self, WallError> {
        let bytes = std::fs::read(path).map_err(|source| WallError::MissingAsset {
            path: path.to_path_buf(),
            source,
        })?;
        let img = image::load_from_memory(&bytes).map_err(|source| WallError::Texture {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("wall texture {}: {}x{}", path.display(), width, height);
        Ok(Self::from_rgba8(device, queue, &rgba, width, height))
    }

    /// Uploads raw RGBA8 pixels. `data` must be `width * height * 4` bytes.
    /// Used for procedurally generated wall surfaces.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Self {
        let levels = mip_chain(width, height, data);
        debug_assert_eq!(levels.len() as u32, mip_level_count(width, height));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("wall_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, (w, h, pixels)) in levels.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * w),
                    rows_per_image: Some(*h),
                },
                wgpu::Extent3d {
                    width: *w,
                    height: *h,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("wall_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// Number of mip levels for a texture of the given size.
pub(crate) fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Full mip chain starting at level 0, box-filtering each level down from
/// the previous one. Every level halves (flooring at 1) until 1x1.
pub(crate) fn mip_chain(width: u32, height: u32, data: &[u8]) -> Vec<(u32, u32, Vec<u8>)> {
    debug_assert_eq!(data.len(), (width * height * 4) as usize);
    let mut levels = vec![(width, height, data.to_vec())];
    loop {
        let (prev_w, prev_h, ref prev) = levels[levels.len() - 1];
        if prev_w == 1 && prev_h == 1 {
            break;
        }
        let w = (prev_w / 2).max(1);
        let h = (prev_h / 2).max(1);
        let mut pixels = vec![0u8; (w * h * 4) as usize];
        for y in 0..h {
            for x in 0..w {
                // Average the 2x2 source block, clamping at odd edges.
                let x0 = (x * 2).min(prev_w - 1);
                let x1 = (x * 2 + 1).min(prev_w - 1);
                let y0 = (y * 2).min(prev_h - 1);
                let y1 = (y * 2 + 1).min(prev_h - 1);
                for c in 0..4 {
                    let sum = sample(prev, prev_w, x0, y0, c)
                        + sample(prev, prev_w, x1, y0, c)
                        + sample(prev, prev_w, x0, y1, c)
                        + sample(prev, prev_w, x1, y1, c);
                    pixels[((y * w + x) * 4 + c) as usize] = ((sum + 2) / 4) as u8;
                }
            }
        }
        levels.push((w, h, pixels));
    }
    levels
}

fn sample(data: &[u8], width: u32, x: u32, y: u32, channel: u32) -> u32 {
    data[((y * width + x) * 4 + channel) as usize] as u32
}
