/// Frame driver - one tick of one surface
///
/// Per tick: wait for the next frame slot, acquire an image, then either
/// skip (invalid swapchain), rebuild (out-of-date swapchain) or record,
/// submit and present. The per-image transfer hook runs on every branch.

use std::time::Instant;
use crate::error::Result;
use crate::backend::{PipelineStage, SwapchainStatus};
use crate::overlay::OverlayContext;
use crate::request::SurfaceId;
use crate::surface::{IdRegistry, Surface, scale_factor};
use super::event::{ClientEvent, ResizeEvent};
use super::presenter::Presenter;

fn lookup(surfaces: &mut IdRegistry<Surface>, id: SurfaceId) -> &mut Surface {
    match surfaces.get_mut(id) {
        Some(surface) => surface,
        None => crate::engine_fatal!("galaxy3d::FrameDriver", "frame for unknown surface {}", id),
    }
}

impl Presenter {
    /// Render one frame of a surface
    ///
    /// Blocks on the fence of the next frame slot, and on a full GPU idle
    /// when the swapchain is invalid or being rebuilt.
    pub fn frame(&mut self, id: SurfaceId) -> Result<()> {
        let status = self.acquire(id)?;

        match status {
            SwapchainStatus::Invalid => {
                crate::engine_trace!("galaxy3d::FrameDriver", "surface {} not presentable, skip", id);
                self.device.wait_idle()?;
            }
            SwapchainStatus::NeedsRecreate => self.recreate(id)?,
            SwapchainStatus::Valid => self.render(id)?,
        }

        let image_index = lookup(&mut self.surfaces, id).image_index;
        self.backend.transfers_frame(image_index)
    }

    /// Wait for the next slot, acquire an image and merge the swapchain status
    fn acquire(&mut self, id: SurfaceId) -> Result<SwapchainStatus> {
        let surface = lookup(&mut self.surfaces, id);
        let device = self.device.as_mut();
        let slot = surface.current_frame;

        // An armed slot means the last acquire on it was never consumed by a submission
        if surface.sync.is_armed(slot) {
            crate::engine_warn!("galaxy3d::FrameDriver",
                "surface {}: slot {} still holds an unconsumed acquire, resetting synchronization", id, slot);
            device.wait_idle()?;
            surface.sync.recreate_semaphores(device)?;
            surface.sync.replace_fence(device, slot)?;
        }

        surface.sync.wait_next(device, slot)?;

        let outcome = self.backend.acquire(id, surface.sync.image_available(slot))?;
        if outcome.status == SwapchainStatus::Valid {
            surface.sync.arm(slot);
            surface.image_index = outcome.image_index;
        }

        surface.status = surface.status.after_acquire(outcome.status);
        Ok(surface.status)
    }

    /// Rebuild the swapchain at the size reported by the window, then re-record every image
    fn recreate(&mut self, id: SurfaceId) -> Result<()> {
        self.device.wait_idle()?;
        let size = self.windowing.poll_size(id);

        let surface = lookup(&mut self.surfaces, id);
        if size.is_empty() {
            crate::engine_debug!("galaxy3d::FrameDriver",
                "surface {}: empty framebuffer, recreation deferred", id);
            surface.status = SwapchainStatus::Invalid;
            // Drop any acquire signal left on the current slot
            return surface.sync.recreate_semaphores(self.device.as_mut());
        }

        let framebuffer = size.framebuffer;
        let swapchain = self.backend.recreate_swapchain(id, framebuffer.width, framebuffer.height)?;
        surface.swapchain = swapchain;
        surface.set_sizes(size.screen, framebuffer);
        surface.scale = scale_factor(framebuffer.width, size.screen.width);

        surface.sync.recreate_semaphores(self.device.as_mut())?;
        surface.sync.resize_images(swapchain.image_count);

        if let Some(window) = self.gui_windows.get_mut(id) {
            let Some(gui) = self.gui.as_mut() else {
                crate::engine_fatal!("galaxy3d::FrameDriver",
                    "surface {} has a GUI window but no GUI toolkit", id);
            };
            gui.resize_window(window, framebuffer.width, framebuffer.height)?;
        }

        self.events.push_back(ClientEvent::WindowResize(ResizeEvent {
            window_id: id,
            framebuffer,
            screen: size.screen,
        }));

        // Every framebuffer changed: re-record all images now, not lazily
        surface.recorder.resize(swapchain.image_count);
        for image_index in 0..swapchain.image_count {
            surface.recorder.refill(self.backend.as_mut(), id, image_index)?;
        }
        surface.status = SwapchainStatus::Valid;

        crate::engine_info!("galaxy3d::FrameDriver",
            "surface {} recreated: framebuffer {}x{}, screen {}x{}, {} images",
            id, framebuffer.width, framebuffer.height, size.screen.width, size.screen.height,
            swapchain.image_count);

        self.update_image_count(swapchain.image_count);
        Ok(())
    }

    /// Record if stale, composite overlays, submit and present the acquired image
    fn render(&mut self, id: SurfaceId) -> Result<()> {
        let surface = lookup(&mut self.surfaces, id);
        let device = self.device.as_mut();
        let backend = self.backend.as_mut();
        let slot = surface.current_frame;
        let image_index = surface.image_index;

        surface.frame_times.record(Instant::now());
        surface.sync.track_image(device, slot, image_index)?;

        if surface.recorder.is_dirty(image_index) {
            surface.recorder.refill(backend, id, image_index)?;
        }

        surface.submission.reset();
        surface.submission.add_commands(backend.command_buffer(id, image_index));

        if let Some(window) = self.gui_windows.get(id) {
            if self.overlays.count_for(id) > 0 {
                let Some(gui) = self.gui.as_mut() else {
                    crate::engine_fatal!("galaxy3d::FrameDriver",
                        "surface {} has a GUI window but no GUI toolkit", id);
                };
                gui.begin_frame(window, image_index)?;
                let mut ctx = OverlayContext {
                    window,
                    ui: gui.ui(),
                    frame_index: self.frame_index,
                    frame_times: &surface.frame_times,
                    resources: backend.resource_usage(),
                };
                self.overlays.invoke_for(id, &mut ctx);
                let overlay_commands = gui.end_frame(window, image_index)?;
                surface.submission.add_commands(overlay_commands);
            }
        }

        surface.submission
            .wait_semaphore(surface.sync.image_available(slot), PipelineStage::ColorAttachmentOutput)
            .signal_semaphore(surface.sync.render_finished(slot));

        let fence = surface.sync.fence(slot);
        device.reset_fence(fence)?;
        device.submit(&surface.submission, fence)?;
        surface.sync.disarm(slot);

        let presented = backend.present(id, image_index, surface.sync.render_finished(slot))?;
        if presented != SwapchainStatus::Valid {
            crate::engine_debug!("galaxy3d::FrameDriver",
                "surface {}: present reported {:?}", id, presented);
            surface.status = presented;
        }

        surface.current_frame = surface.sync.next_slot(slot);
        Ok(())
    }
}
