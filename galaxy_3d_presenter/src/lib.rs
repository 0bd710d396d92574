/*!
# Galaxy 3D Presenter

Frame presentation coordinator for the Galaxy 3D rendering engine.

This crate owns the per-window surface lifecycle (creation, resize, teardown) and drives
the steady-state render loop: acquire a swapchain image, refill or reuse its command
buffer, submit it with the right fence/semaphore synchronization, composite the GUI
overlays and present the result.

Everything that talks to the platform or the GPU is a collaborator trait, so backends
(Vulkan, mocks, ...) plug in at runtime.

## Architecture

- **FrameSync**: per-surface fences and semaphores, sized to the in-flight frame count
- **Recorder**: cached drawing commands plus per-image dirty bits
- **Surface**: swapchain status, framebuffer size, frame slot and teardown state machine
- **OverlayRegistry**: ordered GUI overlay callbacks, bound to surfaces by id
- **Presenter**: lifecycle manager, frame driver and request router
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod backend;
pub mod request;
pub mod sync;
pub mod recorder;
pub mod surface;
pub mod overlay;
pub mod presenter;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Coordinator
    pub use crate::presenter::{Presenter, Collaborators, ClientEvent, ResizeEvent};
    pub use crate::config::PresenterConfig;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Collaborator interfaces
    pub mod backend {
        pub use crate::backend::*;
    }

    // Requests and batches
    pub mod request {
        pub use crate::request::*;
    }

    // Synchronization, recording and surfaces
    pub mod render {
        pub use crate::sync::*;
        pub use crate::recorder::*;
        pub use crate::surface::*;
    }

    // GUI overlays
    pub mod overlay {
        pub use crate::overlay::*;
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;

#[cfg(test)]
#[path = "log_tests.rs"]
mod log_tests;
