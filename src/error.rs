//! Error types for skyburst.
//!
//! Setup failures (no drawing surface, bad config) are fatal and surface to
//! the caller. Nothing in the per-frame path can fail.

use thiserror::Error;

/// Errors creating or acquiring a drawing surface.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// A surface with a zero dimension was requested at setup.
    #[error("drawing surface has zero size ({width}x{height})")]
    ZeroSized {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    /// Failed to create a surface for the window.
    #[error("failed to create GPU surface: {0}")]
    Creation(#[from] wgpu::CreateSurfaceError),
    /// Failed to create the GPU device.
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Errors loading or validating a [`SkyburstConfig`](crate::SkyburstConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON for the config schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The values parsed but violate a constraint.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors writing rendered frames to disk.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Failed to create the output directory.
    #[error("failed to create output directory: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to encode or write a frame.
    #[error("failed to write frame: {0}")]
    Image(#[from] image::ImageError),
    /// The raster surface could not be created.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Errors that can stop the interactive runner.
#[derive(Error, Debug)]
pub enum RunError {
    /// Bad command line.
    #[error("{0}")]
    Args(String),
    /// Failed to create the event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// Drawing surface setup failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    /// Config failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Headless export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors building share actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// The platform name is not one of the supported targets.
    #[error("unknown share platform: {0}")]
    UnknownPlatform(String),
}
