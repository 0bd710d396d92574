/// VulkanSurfaceFactory - drawable surfaces from raw window handles

use std::ffi::c_char;
use ash::vk;
use ash::vk::Handle;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use galaxy_3d_presenter::galaxy3d::{Error, Result};
use galaxy_3d_presenter::galaxy3d::backend::SurfaceHandle;
use galaxy_3d_presenter::{engine_debug, engine_error};

use crate::vk_error;

/// Presenter handle for a Vulkan surface
pub fn surface_handle(surface: vk::SurfaceKHR) -> SurfaceHandle {
    SurfaceHandle(surface.as_raw())
}

/// Vulkan surface behind a presenter handle
pub fn vk_surface(handle: SurfaceHandle) -> vk::SurfaceKHR {
    vk::SurfaceKHR::from_raw(handle.0)
}

/// Creates and destroys `VkSurfaceKHR` objects for native windows
///
/// Used by the windowing collaborator: one surface per canvas window,
/// destroyed after the swapchain built on it.
pub struct VulkanSurfaceFactory {
    entry: ash::Entry,
    instance: ash::Instance,
    surface_loader: ash::khr::surface::Instance,
}

impl VulkanSurfaceFactory {
    pub fn new(entry: &ash::Entry, instance: &ash::Instance) -> Self {
        Self {
            entry: entry.clone(),
            instance: instance.clone(),
            surface_loader: ash::khr::surface::Instance::new(entry, instance),
        }
    }

    /// Instance extensions needed to present on this display
    pub fn required_extensions(display: &impl HasDisplayHandle) -> Result<&'static [*const c_char]> {
        let display_handle = display.display_handle()
            .map_err(|e| {
                engine_error!("galaxy3d::vulkan", "Failed to get display handle: {}", e);
                Error::InitializationFailed(format!("Failed to get display handle: {}", e))
            })?;
        ash_window::enumerate_required_extensions(display_handle.as_raw())
            .map_err(|e| vk_error("enumerate_required_extensions", e))
    }

    pub fn surface_loader(&self) -> &ash::khr::surface::Instance {
        &self.surface_loader
    }

    /// Create the drawable surface of a window
    pub fn create_surface<W>(&self, window: &W) -> Result<SurfaceHandle>
    where
        W: HasDisplayHandle + HasWindowHandle,
    {
        let display_handle = window.display_handle()
            .map_err(|e| {
                engine_error!("galaxy3d::vulkan", "Failed to get display handle for surface: {}", e);
                Error::InitializationFailed(format!("Failed to get display handle: {}", e))
            })?;
        let window_handle = window.window_handle()
            .map_err(|e| {
                engine_error!("galaxy3d::vulkan", "Failed to get window handle for surface: {}", e);
                Error::InitializationFailed(format!("Failed to get window handle: {}", e))
            })?;

        let surface = unsafe {
            ash_window::create_surface(
                &self.entry,
                &self.instance,
                display_handle.as_raw(),
                window_handle.as_raw(),
                None,
            )
            .map_err(|e| vk_error("create_surface", e))?
        };

        engine_debug!("galaxy3d::vulkan", "surface 0x{:x} created", surface.as_raw());
        Ok(surface_handle(surface))
    }

    /// Destroy a surface; its swapchain must already be gone
    pub fn destroy_surface(&self, handle: SurfaceHandle) {
        unsafe {
            self.surface_loader.destroy_surface(vk_surface(handle), None);
        }
        engine_debug!("galaxy3d::vulkan", "surface 0x{:x} destroyed", handle.0);
    }
}
