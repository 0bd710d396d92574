/// GuiToolkit trait - immediate-mode GUI windows composited over canvases

use crate::error::Result;
use crate::request::SurfaceId;
use super::gpu_device::CommandBuffer;
use super::render_backend::SwapchainInfo;

/// Toolkit-side handle of a GUI window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuiWindowHandle(pub u64);

/// GUI window bound to the swapchain images of a canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuiWindow {
    pub id: SurfaceId,
    pub handle: GuiWindowHandle,
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
}

/// Widget calls available to overlays while a GUI frame is recording
pub trait OverlayUi {
    fn begin_panel(&mut self, title: &str);

    fn text(&mut self, text: &str);

    fn end_panel(&mut self);
}

/// GUI toolkit collaborator
pub trait GuiToolkit: Send {
    /// Create a GUI window rendering into the images of a swapchain
    fn create_window(&mut self, id: SurfaceId, swapchain: &SwapchainInfo) -> Result<GuiWindow>;

    /// Release the toolkit-side state of a GUI window
    fn destroy_window(&mut self, window: &GuiWindow);

    /// Resize the overlay backing to a new framebuffer size
    fn resize_window(&mut self, window: &mut GuiWindow, width: u32, height: u32) -> Result<()>;

    /// Start recording the overlay for a swapchain image
    fn begin_frame(&mut self, window: &GuiWindow, image_index: u32) -> Result<()>;

    /// Widget interface of the frame being recorded
    fn ui(&mut self) -> &mut dyn OverlayUi;

    /// Finish recording and return the overlay command buffer
    fn end_frame(&mut self, window: &GuiWindow, image_index: u32) -> Result<CommandBuffer>;

    /// Release every toolkit resource
    fn destroy(&mut self);
}
