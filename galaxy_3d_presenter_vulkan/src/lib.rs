/*!
# Galaxy 3D Presenter - Vulkan Backend

Vulkan implementation of the presenter collaborators, built on Ash.

- **VulkanDevice**: fences, semaphores, queue submission and idle wait (`GpuDevice`)
- **VulkanSwapchain**: per-surface swapchain with acquire/present status mapping
- **VulkanSurfaceFactory**: drawable surfaces from raw window handles (ash-window)
*/

mod vulkan_device;
mod vulkan_swapchain;
mod vulkan_surface;

pub use vulkan_device::{VulkanDevice, stage_flags};
pub use vulkan_swapchain::{
    VulkanSwapchain, acquire_outcome, present_status, choose_extent, choose_image_count,
};
pub use vulkan_surface::{VulkanSurfaceFactory, surface_handle, vk_surface};

use ash::vk;
use galaxy_3d_presenter::galaxy3d::Error;
use galaxy_3d_presenter::engine_error;

/// Log a failed Vulkan call and convert it into a presenter error
pub(crate) fn vk_error(what: &str, result: vk::Result) -> Error {
    engine_error!("galaxy3d::vulkan", "{} failed: {:?}", what, result);
    match result {
        vk::Result::ERROR_OUT_OF_HOST_MEMORY | vk::Result::ERROR_OUT_OF_DEVICE_MEMORY => Error::OutOfMemory,
        vk::Result::ERROR_SURFACE_LOST_KHR => Error::SurfaceLost(format!("{}: {:?}", what, result)),
        _ => Error::BackendError(format!("{}: {:?}", what, result)),
    }
}

#[cfg(test)]
#[path = "vulkan_tests.rs"]
mod tests;
