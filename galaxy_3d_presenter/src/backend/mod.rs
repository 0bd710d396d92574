//! Collaborator interfaces
//!
//! The presenter never talks to the GPU, the window system or the GUI
//! toolkit directly: each of them is a trait implemented by a backend crate.

mod gpu_device;
mod render_backend;
mod windowing;
mod gui_toolkit;
pub(crate) mod mock_backend;

pub use gpu_device::{GpuDevice, Fence, Semaphore, CommandBuffer, PipelineStage, Submission};
pub use render_backend::{
    RenderBackend, SurfaceHandle, SwapchainInfo, SwapchainStatus, AcquireOutcome, ResourceUsage,
};
pub use windowing::{Windowing, WindowSize};
pub use gui_toolkit::{GuiToolkit, GuiWindow, GuiWindowHandle, OverlayUi};

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
