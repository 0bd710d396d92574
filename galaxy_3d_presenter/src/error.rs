//! Error types for the Galaxy3D presenter
//!
//! This module defines the error types returned by the collaborators
//! (rendering backend, GPU device, windowing, GUI toolkit) and passed
//! through the presenter unchanged.

use std::fmt;

/// Result type for Galaxy3D presenter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D presenter errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Vulkan, mock, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (swapchain, fence, surface, etc.)
    InvalidResource(String),

    /// Initialization failed (presenter, config, subsystems)
    InitializationFailed(String),

    /// The drawable surface is gone (window destroyed under us)
    SurfaceLost(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::SurfaceLost(msg) => write!(f, "Surface lost: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
