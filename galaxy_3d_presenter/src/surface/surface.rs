/// Surface - a canvas bound to a native window, a drawable surface and a swapchain
///
/// Owned by the presenter's lifecycle manager. The frame driver and the
/// overlay registry only refer to it by id.

use winit::dpi::{LogicalSize, PhysicalSize};
use crate::backend::{SurfaceHandle, SwapchainInfo, SwapchainStatus, Submission};
use crate::recorder::Recorder;
use crate::request::{CanvasFlags, SurfaceId};
use crate::sync::FrameSync;
use super::frame_times::FrameTimes;

pub struct Surface {
    pub(crate) id: SurfaceId,
    pub(crate) flags: CanvasFlags,
    pub(crate) screen: LogicalSize<u32>,
    pub(crate) framebuffer: PhysicalSize<u32>,
    pub(crate) scale: f32,
    pub(crate) handle: SurfaceHandle,
    pub(crate) swapchain: SwapchainInfo,
    pub(crate) status: SwapchainStatus,
    pub(crate) sync: FrameSync,
    pub(crate) recorder: Recorder,
    pub(crate) submission: Submission,
    /// Frame slot (indexes fences and semaphores)
    pub(crate) current_frame: usize,
    /// Swapchain image acquired by the last successful acquire
    pub(crate) image_index: u32,
    pub(crate) frame_times: FrameTimes,
}

impl Surface {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn flags(&self) -> CanvasFlags {
        self.flags
    }

    /// Logical size requested by the client
    pub fn screen_size(&self) -> LogicalSize<u32> {
        self.screen
    }

    /// Drawable size in pixels
    pub fn framebuffer_size(&self) -> PhysicalSize<u32> {
        self.framebuffer
    }

    /// `framebuffer_width / screen_width`
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn handle(&self) -> SurfaceHandle {
        self.handle
    }

    pub fn swapchain(&self) -> &SwapchainInfo {
        &self.swapchain
    }

    pub fn status(&self) -> SwapchainStatus {
        self.status
    }

    pub fn sync(&self) -> &FrameSync {
        &self.sync
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn image_index(&self) -> u32 {
        self.image_index
    }

    pub fn frame_times(&self) -> &FrameTimes {
        &self.frame_times
    }

    pub(crate) fn set_sizes(&mut self, screen: LogicalSize<u32>, framebuffer: PhysicalSize<u32>) {
        self.screen = screen;
        self.framebuffer = framebuffer;
    }
}

/// Compute `framebuffer_width / screen_width`
pub fn scale_factor(framebuffer_width: u32, screen_width: u32) -> f32 {
    framebuffer_width as f32 / screen_width as f32
}
