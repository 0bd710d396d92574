/// Windowing trait - native windows and drawable surfaces

use winit::dpi::{LogicalSize, PhysicalSize};
use crate::error::Result;
use crate::request::SurfaceId;
use super::render_backend::SurfaceHandle;

/// Window size in both coordinate spaces
///
/// `screen` is the logical size requested by the client, `framebuffer` the
/// pixel size of the drawable; they differ by the window scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub screen: LogicalSize<u32>,
    pub framebuffer: PhysicalSize<u32>,
}

impl WindowSize {
    pub fn new(screen_width: u32, screen_height: u32, framebuffer_width: u32, framebuffer_height: u32) -> Self {
        Self {
            screen: LogicalSize::new(screen_width, screen_height),
            framebuffer: PhysicalSize::new(framebuffer_width, framebuffer_height),
        }
    }

    /// Whether the drawable has no pixels (minimized window)
    pub fn is_empty(&self) -> bool {
        self.framebuffer.width == 0 || self.framebuffer.height == 0
    }
}

/// Windowing collaborator
///
/// Windows share their id with the canvas they display. Closing a window is
/// reported by the windowing layer as a `ClientEvent::WindowDelete`.
pub trait Windowing: Send {
    /// Create a native window of the given screen size
    fn create_window(&mut self, id: SurfaceId, screen_width: u32, screen_height: u32) -> Result<()>;

    /// Route keyboard and mouse input of the window to the client
    fn attach_input(&mut self, id: SurfaceId) -> Result<()>;

    /// Current framebuffer size in pixels
    fn framebuffer_size(&self, id: SurfaceId) -> PhysicalSize<u32>;

    /// Poll platform events and return the authoritative size after a resize
    fn poll_size(&mut self, id: SurfaceId) -> WindowSize;

    fn set_fullscreen(&mut self, id: SurfaceId, fullscreen: bool) -> Result<()>;

    /// Create the drawable surface of the window
    fn create_surface(&mut self, id: SurfaceId) -> Result<SurfaceHandle>;

    fn destroy_surface(&mut self, id: SurfaceId, surface: SurfaceHandle);
}
