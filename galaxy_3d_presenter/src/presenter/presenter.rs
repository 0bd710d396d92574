/// Presenter - owns every surface and drives their frames
///
/// Single-threaded: requests, frames and teardown are all driven from the
/// thread that owns the presenter. The only concurrency is with the GPU,
/// through fences and semaphores.

use std::collections::VecDeque;
use crate::error::Result;
use crate::backend::{GpuDevice, GuiToolkit, GuiWindow, RenderBackend, Windowing};
use crate::config::PresenterConfig;
use crate::overlay::{Overlay, OverlayKey, OverlayRegistry};
use crate::request::{Batch, SurfaceId, print_batch, export_batch_to_file};
use crate::surface::{IdRegistry, Surface};
use super::event::{ClientEvent, ResizeEvent};

/// Collaborators handed to the presenter at creation
pub struct Collaborators {
    pub backend: Box<dyn RenderBackend>,
    pub device: Box<dyn GpuDevice>,
    pub windowing: Box<dyn Windowing>,
    /// Required only for canvases created with a GUI flag
    pub gui: Option<Box<dyn GuiToolkit>>,
}

pub struct Presenter {
    pub(crate) config: PresenterConfig,
    pub(crate) backend: Box<dyn RenderBackend>,
    pub(crate) device: Box<dyn GpuDevice>,
    pub(crate) windowing: Box<dyn Windowing>,
    pub(crate) gui: Option<Box<dyn GuiToolkit>>,
    pub(crate) surfaces: IdRegistry<Surface>,
    pub(crate) gui_windows: IdRegistry<GuiWindow>,
    pub(crate) overlays: OverlayRegistry,
    pub(crate) events: VecDeque<ClientEvent>,
    /// Global frame counter, published by the client with every frame event
    pub(crate) frame_index: u64,
    /// Largest swapchain image count seen so far
    pub(crate) max_image_count: u32,
    destroyed: bool,
}

impl Presenter {
    /// Create a presenter
    ///
    /// # Errors
    ///
    /// Returns `Error::InitializationFailed` if the configuration is out of range.
    pub fn new(config: PresenterConfig, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;

        crate::engine_info!("galaxy3d::Presenter",
            "presenter created ({} frames in flight, GUI toolkit: {})",
            config.frames_in_flight,
            if collaborators.gui.is_some() { "yes" } else { "no" });

        Ok(Self {
            config,
            backend: collaborators.backend,
            device: collaborators.device,
            windowing: collaborators.windowing,
            gui: collaborators.gui,
            surfaces: IdRegistry::new(),
            gui_windows: IdRegistry::new(),
            overlays: OverlayRegistry::new(),
            events: VecDeque::new(),
            frame_index: 0,
            max_image_count: 0,
            destroyed: false,
        })
    }

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    /// Surface bound to a canvas, if any
    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id)
    }

    /// Ids of every live surface, ascending
    pub fn surface_ids(&self) -> Vec<SurfaceId> {
        self.surfaces.ids()
    }

    /// GUI window bound to a canvas, if any
    pub fn gui_window(&self, id: SurfaceId) -> Option<&GuiWindow> {
        self.gui_windows.get(id)
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Largest swapchain image count seen so far
    pub fn max_image_count(&self) -> u32 {
        self.max_image_count
    }

    /// Number of queued events
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Queue a batch of requests
    ///
    /// Batch diagnostics run here when enabled; an empty batch is dropped.
    pub fn submit(&mut self, batch: Batch) {
        if batch.is_empty() {
            crate::engine_trace!("galaxy3d::Presenter", "skip empty batch");
            return;
        }
        if self.config.verbose_batches {
            print_batch(&batch);
        }
        if let Some(path) = &self.config.batch_dump_path {
            if let Err(e) = export_batch_to_file(&batch, path) {
                crate::engine_warn!("galaxy3d::Presenter",
                    "batch export to {} failed: {}", path.display(), e);
            }
        }
        self.events.push_back(ClientEvent::Requests(batch));
    }

    /// Queue an event from the client or the windowing layer
    pub fn emit(&mut self, event: ClientEvent) {
        self.events.push_back(event);
    }

    /// Dispatch every queued event in FIFO order, including events queued while dispatching
    ///
    /// Returns the resize notifications for the upstream client, in emission order.
    pub fn process_events(&mut self) -> Result<Vec<ResizeEvent>> {
        let mut resized = Vec::new();
        while let Some(event) = self.events.pop_front() {
            match event {
                ClientEvent::Requests(batch) => self.process_requests(batch)?,
                ClientEvent::Frame { window_id, frame_index } => {
                    self.frame_index = frame_index;
                    if self.surfaces.contains(window_id) {
                        self.frame(window_id)?;
                    } else {
                        crate::engine_trace!("galaxy3d::Presenter",
                            "frame event for unknown surface {}", window_id);
                    }
                }
                ClientEvent::WindowResize(resize) => resized.push(resize),
                ClientEvent::WindowDelete { window_id } => {
                    if self.surfaces.contains(window_id) {
                        self.delete_surface(window_id)?;
                    } else {
                        crate::engine_warn!("galaxy3d::Presenter",
                            "delete event for unknown surface {}", window_id);
                    }
                }
            }
        }
        Ok(resized)
    }

    /// Register an overlay drawn into the GUI window of `target`
    ///
    /// Overlays stay registered until `unregister_overlay` or `destroy`.
    pub fn register_overlay(&mut self, target: SurfaceId, overlay: Overlay) -> OverlayKey {
        self.overlays.register(target, overlay)
    }

    pub fn unregister_overlay(&mut self, key: OverlayKey) -> bool {
        self.overlays.unregister(key)
    }

    /// Tear down every surface, the GUI toolkit and every overlay
    pub fn destroy(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        for id in self.surfaces.ids() {
            self.delete_surface(id)?;
        }
        if let Some(gui) = self.gui.as_mut() {
            gui.destroy();
        }
        self.gui_windows.clear();
        self.overlays.clear();
        self.events.clear();
        self.destroyed = true;

        crate::engine_info!("galaxy3d::Presenter", "presenter destroyed");
        Ok(())
    }
}

impl Drop for Presenter {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        if let Err(e) = self.destroy() {
            crate::engine_error!("galaxy3d::Presenter", "teardown failed: {}", e);
        }
    }
}
