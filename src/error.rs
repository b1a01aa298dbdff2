//! Error types for the flock simulation.
//!
//! Configuration problems are reported before any step runs. GPU and window
//! errors only concern the interactive viewer; the stepping core itself never
//! fails once a [`Flock`](crate::Flock) has been built.

use thiserror::Error;

/// Errors raised while validating or loading a [`FlockConfig`](crate::FlockConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The population must contain at least one boid.
    #[error("population size must be positive, got {0}")]
    InvalidPopulation(usize),
    /// Domain extents must be positive and finite.
    #[error("bounds must be positive and finite, got {width} x {height}")]
    InvalidBounds { width: f32, height: f32 },
    /// A rule or shell parameter is negative or not finite.
    #[error("parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    /// Failed to read a configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration file is not valid JSON for a flock.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a Vulkan/Metal/DX12/GL capable device is required")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    #[error("surface supports no texture formats")]
    NoSurfaceFormat,
}

/// Errors that can occur when running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The flock configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
