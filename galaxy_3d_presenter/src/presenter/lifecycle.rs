/// Surface lifecycle: canvas creation and ordered teardown
///
/// Creation cannot be rolled back halfway (a half-bound GPU surface has no
/// safe undo), so any collaborator failure during `create_surface` is fatal.

use crate::error::Result;
use crate::backend::{Submission, SwapchainStatus};
use crate::overlay::{FpsOverlay, MonitorOverlay, Overlay};
use crate::recorder::Recorder;
use crate::request::{CanvasFlags, SurfaceId};
use crate::surface::{FrameTimes, Surface, SurfaceTeardown, scale_factor};
use crate::sync::FrameSync;
use super::presenter::Presenter;

/// Unwrap a collaborator result during surface creation, or abort
fn created<T>(id: SurfaceId, what: &str, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => crate::engine_fatal!("galaxy3d::Presenter",
            "surface {}: {} failed: {}", id, what, e),
    }
}

impl Presenter {
    /// Bind a window, a drawable surface and a swapchain to an existing canvas
    ///
    /// The backend canvas object must already exist. The surface starts in
    /// `NeedsRecreate` so that its first frame emits a resize notification.
    pub(crate) fn create_surface(&mut self, id: SurfaceId, screen_width: u32, screen_height: u32, flags: CanvasFlags) {
        if !self.backend.has_canvas(id) {
            crate::engine_fatal!("galaxy3d::Presenter", "no backend canvas for surface {}", id);
        }
        if screen_width == 0 || screen_height == 0 {
            crate::engine_fatal!("galaxy3d::Presenter",
                "surface {}: zero screen size {}x{}", id, screen_width, screen_height);
        }
        if self.surfaces.contains(id) {
            crate::engine_fatal!("galaxy3d::Presenter", "surface {} already exists", id);
        }

        created(id, "window creation", self.windowing.create_window(id, screen_width, screen_height));
        created(id, "input setup", self.windowing.attach_input(id));

        let framebuffer = self.windowing.framebuffer_size(id);
        if framebuffer.width == 0 || framebuffer.height == 0 {
            crate::engine_fatal!("galaxy3d::Presenter",
                "surface {}: zero framebuffer size {}x{}", id, framebuffer.width, framebuffer.height);
        }
        let scale = scale_factor(framebuffer.width, screen_width);
        crate::engine_debug!("galaxy3d::Presenter",
            "surface {}: screen {}x{}, framebuffer {}x{}, scale {}",
            id, screen_width, screen_height, framebuffer.width, framebuffer.height, scale);

        let handle = created(id, "surface creation", self.windowing.create_surface(id));
        let swapchain = created(id, "swapchain creation",
            self.backend.create_swapchain(id, handle, framebuffer.width, framebuffer.height));
        let sync = created(id, "synchronization set creation",
            FrameSync::new(self.device.as_mut(), self.config.frames_in_flight, swapchain.image_count));

        self.surfaces.insert(id, Surface {
            id,
            flags,
            screen: winit::dpi::LogicalSize::new(screen_width, screen_height),
            framebuffer,
            scale,
            handle,
            swapchain,
            status: SwapchainStatus::NeedsRecreate,
            sync,
            recorder: Recorder::new(swapchain.image_count),
            submission: Submission::new(),
            current_frame: 0,
            image_index: 0,
            frame_times: FrameTimes::new(self.config.frame_timestamps),
        });

        self.update_image_count(swapchain.image_count);

        if flags.is_fullscreen() {
            created(id, "fullscreen toggle", self.windowing.set_fullscreen(id, true));
        }

        if flags.has_gui() {
            let Some(gui) = self.gui.as_mut() else {
                crate::engine_fatal!("galaxy3d::Presenter",
                    "surface {} requests a GUI window but no GUI toolkit was provided", id);
            };
            let window = created(id, "GUI window creation", gui.create_window(id, &swapchain));
            self.gui_windows.insert(id, window);

            if flags.has_fps() {
                self.overlays.register(id, Overlay::Fps(FpsOverlay));
            }
            if flags.has_monitor() {
                self.overlays.register(id, Overlay::Monitor(MonitorOverlay));
            }
        }

        crate::engine_info!("galaxy3d::Presenter",
            "surface {} created ({} images, flags 0x{:x})", id, swapchain.image_count, flags.bits());
    }

    /// Raise the image-count watermark and resize the backend transfer resources
    pub(crate) fn update_image_count(&mut self, image_count: u32) {
        let watermark = self.max_image_count
            .max(image_count)
            .max(self.backend.max_image_count());
        if watermark != self.max_image_count {
            self.max_image_count = watermark;
            self.backend.set_image_count(watermark);
        }
    }

    /// Tear down every surface-owned object of a canvas, in order
    ///
    /// The native window itself is left to the windowing layer.
    pub(crate) fn delete_surface(&mut self, id: SurfaceId) -> Result<()> {
        if !self.surfaces.contains(id) {
            crate::engine_fatal!("galaxy3d::Presenter", "unknown surface {}", id);
        }
        self.device.wait_idle()?;

        let Some(surface) = self.surfaces.remove(id) else {
            crate::engine_fatal!("galaxy3d::Presenter", "unknown surface {}", id);
        };
        let Surface { sync, recorder, handle, .. } = surface;
        let mut teardown = SurfaceTeardown::begin(id);

        self.backend.destroy_swapchain(id);
        sync.destroy(self.device.as_mut());
        drop(recorder);
        teardown.tear_swapchain();

        if let Some(window) = self.gui_windows.remove(id) {
            let Some(gui) = self.gui.as_mut() else {
                crate::engine_fatal!("galaxy3d::Presenter",
                    "surface {} has a GUI window but no GUI toolkit", id);
            };
            gui.destroy_window(&window);
        }
        teardown.tear_overlay();

        self.windowing.destroy_surface(id, handle);
        teardown.tear_surface();

        teardown.finish();
        crate::engine_info!("galaxy3d::Presenter", "surface {} deleted", id);
        Ok(())
    }
}
