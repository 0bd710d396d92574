/// RenderBackend trait - the GPU rendering backend seen by the presenter
///
/// The backend owns every GPU object created by requests (canvases, dats,
/// pipelines, ...), the swapchains and the per-image command buffers.

use crate::error::Result;
use crate::recorder::RecordCommand;
use crate::request::{Request, SurfaceId};
use super::gpu_device::{CommandBuffer, Semaphore};

/// Platform drawable surface (VkSurfaceKHR for the Vulkan backend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Swapchain properties after creation or recreation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapchainInfo {
    pub image_count: u32,
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
}

/// Swapchain health reported by acquire and present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapchainStatus {
    /// Usable
    Valid,
    /// Out of date or suboptimal: must be recreated before the next frame
    NeedsRecreate,
    /// Unusable for now (e.g. minimized window): frames are skipped
    Invalid,
}

impl SwapchainStatus {
    /// Merge the status stored on a surface with the outcome of an acquire
    ///
    /// A pending recreation is never lost, even when the acquire itself succeeded,
    /// and a surface coming back from `Invalid` is rebuilt before it renders again.
    pub fn after_acquire(self, acquired: SwapchainStatus) -> SwapchainStatus {
        match (self, acquired) {
            (_, SwapchainStatus::Invalid) => SwapchainStatus::Invalid,
            (_, SwapchainStatus::NeedsRecreate) => SwapchainStatus::NeedsRecreate,
            (SwapchainStatus::Valid, SwapchainStatus::Valid) => SwapchainStatus::Valid,
            (_, SwapchainStatus::Valid) => SwapchainStatus::NeedsRecreate,
        }
    }
}

/// Result of acquiring the next swapchain image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquireOutcome {
    pub status: SwapchainStatus,
    /// Only meaningful when `status` is `Valid`
    pub image_index: u32,
}

impl AcquireOutcome {
    pub fn valid(image_index: u32) -> Self {
        Self { status: SwapchainStatus::Valid, image_index }
    }

    pub fn with_status(status: SwapchainStatus) -> Self {
        Self { status, image_index: 0 }
    }
}

/// GPU resource usage, shown by the monitor overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceUsage {
    pub allocated_bytes: u64,
    pub buffer_count: u32,
    pub texture_count: u32,
}

/// Rendering backend
pub trait RenderBackend: Send {
    /// Apply one request (every request of a batch goes through here, in order)
    fn apply(&mut self, request: &Request) -> Result<()>;

    /// Whether a canvas object with this id exists
    fn has_canvas(&self, id: SurfaceId) -> bool;

    /// Create the swapchain of a canvas on `surface` (framebuffer size in pixels)
    fn create_swapchain(
        &mut self,
        id: SurfaceId,
        surface: SurfaceHandle,
        width: u32,
        height: u32,
    ) -> Result<SwapchainInfo>;

    /// Recreate the swapchain after a resize or an out-of-date report
    fn recreate_swapchain(&mut self, id: SurfaceId, width: u32, height: u32) -> Result<SwapchainInfo>;

    fn destroy_swapchain(&mut self, id: SurfaceId);

    /// Acquire the next image; `signal` is signaled once the image is available
    fn acquire(&mut self, id: SurfaceId, signal: Semaphore) -> Result<AcquireOutcome>;

    /// Queue `image_index` for presentation once `wait` is signaled
    fn present(&mut self, id: SurfaceId, image_index: u32, wait: Semaphore) -> Result<SwapchainStatus>;

    /// Command buffer bound to a swapchain image of a canvas
    fn command_buffer(&self, id: SurfaceId, image_index: u32) -> CommandBuffer;

    /// Reset the command buffer of a swapchain image
    fn reset_commands(&mut self, id: SurfaceId, image_index: u32) -> Result<()>;

    /// Record a blank render pass (clear only)
    fn record_blank(&mut self, id: SurfaceId, image_index: u32) -> Result<()>;

    /// Record the given drawing commands
    fn record_commands(&mut self, id: SurfaceId, image_index: u32, commands: &[RecordCommand]) -> Result<()>;

    /// Largest image count among the swapchains known to the backend
    fn max_image_count(&self) -> u32;

    /// Size per-image transfer resources for `image_count` images
    fn set_image_count(&mut self, image_count: u32);

    /// Run pending per-frame transfers targeting `image_index`
    fn transfers_frame(&mut self, image_index: u32) -> Result<()>;

    fn resource_usage(&self) -> ResourceUsage;
}
