/// Events exchanged between the presenter and its client

use winit::dpi::{LogicalSize, PhysicalSize};
use crate::request::{Batch, SurfaceId};

/// A canvas was (re)created at a new size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    pub window_id: SurfaceId,
    /// New drawable size in pixels
    pub framebuffer: PhysicalSize<u32>,
    /// New logical size (framebuffer size divided by the scale factor)
    pub screen: LogicalSize<u32>,
}

/// Event queued on the presenter
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Batch of requests to apply and route
    Requests(Batch),
    /// Tick: render one frame of a canvas
    Frame { window_id: SurfaceId, frame_index: u64 },
    /// Resize notification for the upstream client
    WindowResize(ResizeEvent),
    /// The user closed a window
    WindowDelete { window_id: SurfaceId },
}
