/// GUI overlays drawn into the GUI window of a canvas
///
/// Built-in overlays (frame rate, resource usage) are enum variants;
/// anything else is a `Custom` closure capturing its own state.

use crate::backend::{GuiWindow, OverlayUi, ResourceUsage};
use crate::surface::FrameTimes;

/// Everything an overlay can look at while it draws
pub struct OverlayContext<'a> {
    /// GUI window of the canvas being rendered
    pub window: &'a GuiWindow,
    /// Widget interface of the GUI frame being recorded
    pub ui: &'a mut dyn OverlayUi,
    /// Global frame counter
    pub frame_index: u64,
    pub frame_times: &'a FrameTimes,
    pub resources: ResourceUsage,
}

/// Frame-rate readout
#[derive(Debug, Clone, Default)]
pub struct FpsOverlay;

impl FpsOverlay {
    pub fn render(&mut self, ctx: &mut OverlayContext<'_>) {
        ctx.ui.begin_panel("FPS");
        ctx.ui.text(&format!("{:.1} FPS", ctx.frame_times.fps()));
        ctx.ui.text(&format!("frame {}", ctx.frame_index));
        ctx.ui.end_panel();
    }
}

/// GPU resource-usage readout
#[derive(Debug, Clone, Default)]
pub struct MonitorOverlay;

impl MonitorOverlay {
    pub fn render(&mut self, ctx: &mut OverlayContext<'_>) {
        let usage = ctx.resources;
        ctx.ui.begin_panel("GPU");
        ctx.ui.text(&format!("memory: {} KiB", usage.allocated_bytes / 1024));
        ctx.ui.text(&format!("buffers: {}", usage.buffer_count));
        ctx.ui.text(&format!("textures: {}", usage.texture_count));
        ctx.ui.end_panel();
    }
}

pub type OverlayFn = Box<dyn FnMut(&mut OverlayContext<'_>)>;

pub enum Overlay {
    Fps(FpsOverlay),
    Monitor(MonitorOverlay),
    /// Caller-supplied overlay; captured state lives as long as the registration
    Custom(OverlayFn),
}

impl Overlay {
    /// Wrap a closure as a custom overlay
    pub fn custom<F>(f: F) -> Self
    where
        F: FnMut(&mut OverlayContext<'_>) + 'static,
    {
        Overlay::Custom(Box::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Overlay::Fps(_) => "fps",
            Overlay::Monitor(_) => "monitor",
            Overlay::Custom(_) => "custom",
        }
    }

    pub fn render(&mut self, ctx: &mut OverlayContext<'_>) {
        match self {
            Overlay::Fps(overlay) => overlay.render(ctx),
            Overlay::Monitor(overlay) => overlay.render(ctx),
            Overlay::Custom(f) => f(ctx),
        }
    }
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Overlay::{}", self.name())
    }
}
