//! Error types for wall resource construction

use std::path::PathBuf;

/// Failure while building the wall renderer's GPU resources.
///
/// Construction is the only fallible operation; everything after it either
/// succeeds or is guarded.
#[derive(Debug, thiserror::Error)]
pub enum WallError {
    /// The wall shader failed WGSL validation. Fatal: the renderer refuses
    /// to proceed and the full compiler diagnostic is surfaced to the caller.
    #[error("wall shader failed to compile:\n{log}")]
    ShaderCompile { log: String },

    /// An asset file could not be read from disk.
    #[error("missing wall asset {}", path.display())]
    MissingAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An asset file was read but could not be decoded as an image.
    #[error("failed to decode wall texture {}", path.display())]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
