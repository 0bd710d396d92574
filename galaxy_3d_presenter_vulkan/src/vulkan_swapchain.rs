/// VulkanSwapchain - per-surface swapchain with acquire/present status mapping

use std::sync::Arc;
use ash::vk;
use ash::vk::Handle;
use galaxy_3d_presenter::galaxy3d::Result;
use galaxy_3d_presenter::galaxy3d::backend::{
    AcquireOutcome, Semaphore, SurfaceHandle, SwapchainInfo, SwapchainStatus,
};
use galaxy_3d_presenter::{engine_debug, engine_info};

use crate::vk_error;
use crate::vulkan_surface::vk_surface;

/// Map the result of `vkAcquireNextImageKHR`
///
/// Out-of-date and suboptimal swapchains must be recreated; any other
/// failure is an error.
pub fn acquire_outcome(result: std::result::Result<(u32, bool), vk::Result>) -> Result<AcquireOutcome> {
    match result {
        Ok((image_index, false)) => Ok(AcquireOutcome::valid(image_index)),
        Ok((_, true)) | Err(vk::Result::SUBOPTIMAL_KHR) | Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
            Ok(AcquireOutcome::with_status(SwapchainStatus::NeedsRecreate))
        }
        Err(e) => Err(vk_error("acquire_next_image", e)),
    }
}

/// Map the result of `vkQueuePresentKHR`
pub fn present_status(result: std::result::Result<bool, vk::Result>) -> Result<SwapchainStatus> {
    match result {
        Ok(false) => Ok(SwapchainStatus::Valid),
        Ok(true) | Err(vk::Result::SUBOPTIMAL_KHR) | Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
            Ok(SwapchainStatus::NeedsRecreate)
        }
        Err(e) => Err(vk_error("queue_present", e)),
    }
}

/// Swapchain extent for a requested framebuffer size
///
/// A `current_extent` of `u32::MAX` means the surface lets the swapchain
/// decide: the requested size is clamped to the supported range.
pub fn choose_extent(capabilities: &vk::SurfaceCapabilitiesKHR, width: u32, height: u32) -> vk::Extent2D {
    if capabilities.current_extent.width != u32::MAX {
        return capabilities.current_extent;
    }
    vk::Extent2D {
        width: width.clamp(capabilities.min_image_extent.width, capabilities.max_image_extent.width),
        height: height.clamp(capabilities.min_image_extent.height, capabilities.max_image_extent.height),
    }
}

/// One image more than the minimum, bounded by the maximum (0 = unbounded)
pub fn choose_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let wanted = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 {
        wanted.min(capabilities.max_image_count)
    } else {
        wanted
    }
}

/// Vulkan swapchain bound to one drawable surface
///
/// The surface is owned by the windowing layer and outlives the swapchain.
pub struct VulkanSwapchain {
    device: Arc<ash::Device>,
    physical_device: vk::PhysicalDevice,
    present_queue: vk::Queue,

    surface: vk::SurfaceKHR,
    surface_loader: ash::khr::surface::Instance,

    swapchain: vk::SwapchainKHR,
    swapchain_loader: ash::khr::swapchain::Device,
    images: Vec<vk::Image>,
    image_views: Vec<vk::ImageView>,
    format: vk::SurfaceFormatKHR,
    extent: vk::Extent2D,
}

impl VulkanSwapchain {
    /// Create a swapchain on `surface` at the requested framebuffer size
    pub fn new(
        device: Arc<ash::Device>,
        physical_device: vk::PhysicalDevice,
        instance: &ash::Instance,
        surface_loader: ash::khr::surface::Instance,
        surface: SurfaceHandle,
        present_queue: vk::Queue,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let swapchain_loader = ash::khr::swapchain::Device::new(instance, &device);
        let mut swapchain = Self {
            device,
            physical_device,
            present_queue,
            surface: vk_surface(surface),
            surface_loader,
            swapchain: vk::SwapchainKHR::null(),
            swapchain_loader,
            images: Vec::new(),
            image_views: Vec::new(),
            format: vk::SurfaceFormatKHR::default(),
            extent: vk::Extent2D::default(),
        };
        swapchain.build(width, height)?;

        engine_info!("galaxy3d::vulkan", "swapchain created: {}x{}, {} images",
            swapchain.extent.width, swapchain.extent.height, swapchain.images.len());
        Ok(swapchain)
    }

    pub fn info(&self) -> SwapchainInfo {
        SwapchainInfo {
            image_count: self.images.len() as u32,
            width: self.extent.width,
            height: self.extent.height,
        }
    }

    pub fn format(&self) -> vk::Format {
        self.format.format
    }

    pub fn image_views(&self) -> &[vk::ImageView] {
        &self.image_views
    }

    /// Whether the current extent can be presented (a minimized window has none)
    pub fn is_presentable(&self) -> bool {
        self.extent.width > 0 && self.extent.height > 0
    }

    /// Rebuild the swapchain at a new framebuffer size
    pub fn recreate(&mut self, width: u32, height: u32) -> Result<SwapchainInfo> {
        unsafe {
            self.device.device_wait_idle()
                .map_err(|e| vk_error("device_wait_idle before swapchain recreate", e))?;
        }
        self.build(width, height)?;

        engine_debug!("galaxy3d::vulkan", "swapchain recreated: {}x{}, {} images",
            self.extent.width, self.extent.height, self.images.len());
        Ok(self.info())
    }

    /// Acquire the next image, signaling `signal` when it is ready
    pub fn acquire(&mut self, signal: Semaphore) -> Result<AcquireOutcome> {
        if !self.is_presentable() {
            return Ok(AcquireOutcome::with_status(SwapchainStatus::Invalid));
        }
        let result = unsafe {
            self.swapchain_loader.acquire_next_image(
                self.swapchain,
                u64::MAX,
                vk::Semaphore::from_raw(signal.as_raw()),
                vk::Fence::null(),
            )
        };
        acquire_outcome(result)
    }

    /// Present `image_index` once `wait` is signaled
    pub fn present(&mut self, image_index: u32, wait: Semaphore) -> Result<SwapchainStatus> {
        let swapchains = [self.swapchain];
        let image_indices = [image_index];
        let wait_semaphores = [vk::Semaphore::from_raw(wait.as_raw())];

        let present_info = vk::PresentInfoKHR::default()
            .wait_semaphores(&wait_semaphores)
            .swapchains(&swapchains)
            .image_indices(&image_indices);

        let result = unsafe {
            self.swapchain_loader.queue_present(self.present_queue, &present_info)
        };
        present_status(result)
    }

    /// (Re)create the swapchain and its image views, retiring the previous one
    fn build(&mut self, width: u32, height: u32) -> Result<()> {
        let capabilities = unsafe {
            self.surface_loader
                .get_physical_device_surface_capabilities(self.physical_device, self.surface)
                .map_err(|e| vk_error("get_physical_device_surface_capabilities", e))?
        };
        let formats = unsafe {
            self.surface_loader
                .get_physical_device_surface_formats(self.physical_device, self.surface)
                .map_err(|e| vk_error("get_physical_device_surface_formats", e))?
        };
        let Some(format) = formats
            .iter()
            .find(|f| f.format == vk::Format::B8G8R8A8_SRGB || f.format == vk::Format::R8G8B8A8_SRGB)
            .or_else(|| formats.first())
            .copied()
        else {
            return Err(vk_error("surface format query", vk::Result::ERROR_FORMAT_NOT_SUPPORTED));
        };

        let extent = choose_extent(&capabilities, width, height);
        self.destroy_image_views();
        self.format = format;
        self.extent = extent;

        if extent.width == 0 || extent.height == 0 {
            // Minimized: keep the old swapchain retired until the window comes back
            self.images.clear();
            return Ok(());
        }

        let old_swapchain = self.swapchain;
        let create_info = vk::SwapchainCreateInfoKHR::default()
            .surface(self.surface)
            .min_image_count(choose_image_count(&capabilities))
            .image_format(format.format)
            .image_color_space(format.color_space)
            .image_extent(extent)
            .image_array_layers(1)
            .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT | vk::ImageUsageFlags::TRANSFER_DST)
            .image_sharing_mode(vk::SharingMode::EXCLUSIVE)
            .pre_transform(capabilities.current_transform)
            .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
            .present_mode(vk::PresentModeKHR::FIFO)
            .clipped(true)
            .old_swapchain(old_swapchain);

        unsafe {
            self.swapchain = self.swapchain_loader
                .create_swapchain(&create_info, None)
                .map_err(|e| vk_error("create_swapchain", e))?;
            if old_swapchain != vk::SwapchainKHR::null() {
                self.swapchain_loader.destroy_swapchain(old_swapchain, None);
            }

            self.images = self.swapchain_loader
                .get_swapchain_images(self.swapchain)
                .map_err(|e| vk_error("get_swapchain_images", e))?;

            for &image in &self.images {
                let create_info = vk::ImageViewCreateInfo::default()
                    .image(image)
                    .view_type(vk::ImageViewType::TYPE_2D)
                    .format(format.format)
                    .components(vk::ComponentMapping {
                        r: vk::ComponentSwizzle::IDENTITY,
                        g: vk::ComponentSwizzle::IDENTITY,
                        b: vk::ComponentSwizzle::IDENTITY,
                        a: vk::ComponentSwizzle::IDENTITY,
                    })
                    .subresource_range(vk::ImageSubresourceRange {
                        aspect_mask: vk::ImageAspectFlags::COLOR,
                        base_mip_level: 0,
                        level_count: 1,
                        base_array_layer: 0,
                        layer_count: 1,
                    });
                let view = self.device.create_image_view(&create_info, None)
                    .map_err(|e| vk_error("create_image_view", e))?;
                self.image_views.push(view);
            }
        }
        Ok(())
    }

    fn destroy_image_views(&mut self) {
        for view in self.image_views.drain(..) {
            unsafe {
                self.device.destroy_image_view(view, None);
            }
        }
    }
}

impl Drop for VulkanSwapchain {
    fn drop(&mut self) {
        self.destroy_image_views();
        if self.swapchain != vk::SwapchainKHR::null() {
            unsafe {
                self.swapchain_loader.destroy_swapchain(self.swapchain, None);
            }
        }
    }
}
