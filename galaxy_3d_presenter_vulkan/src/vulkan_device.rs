/// VulkanDevice - Vulkan implementation of the GpuDevice trait

use std::sync::Arc;
use ash::vk;
use ash::vk::Handle;
use galaxy_3d_presenter::galaxy3d::Result;
use galaxy_3d_presenter::galaxy3d::backend::{
    GpuDevice, Fence, Semaphore, PipelineStage, Submission,
};
use galaxy_3d_presenter::engine_trace;

use crate::vk_error;

/// Vulkan pipeline stage for a semaphore wait
pub fn stage_flags(stage: PipelineStage) -> vk::PipelineStageFlags {
    match stage {
        PipelineStage::TopOfPipe => vk::PipelineStageFlags::TOP_OF_PIPE,
        PipelineStage::ColorAttachmentOutput => vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
        PipelineStage::Transfer => vk::PipelineStageFlags::TRANSFER,
        PipelineStage::BottomOfPipe => vk::PipelineStageFlags::BOTTOM_OF_PIPE,
    }
}

fn vk_fence(fence: Fence) -> vk::Fence {
    vk::Fence::from_raw(fence.as_raw())
}

fn vk_semaphore(semaphore: Semaphore) -> vk::Semaphore {
    vk::Semaphore::from_raw(semaphore.as_raw())
}

/// Logical device plus the graphics queue used for every presenter submission
///
/// The device itself is shared with the rest of the renderer and is not
/// destroyed here.
pub struct VulkanDevice {
    device: Arc<ash::Device>,
    graphics_queue: vk::Queue,
}

impl VulkanDevice {
    pub fn new(device: Arc<ash::Device>, graphics_queue: vk::Queue) -> Self {
        Self { device, graphics_queue }
    }

    pub fn device(&self) -> &Arc<ash::Device> {
        &self.device
    }

    pub fn graphics_queue(&self) -> vk::Queue {
        self.graphics_queue
    }
}

impl GpuDevice for VulkanDevice {
    fn wait_idle(&mut self) -> Result<()> {
        unsafe {
            self.device.device_wait_idle()
                .map_err(|e| vk_error("device_wait_idle", e))
        }
    }

    fn create_fence(&mut self, signaled: bool) -> Result<Fence> {
        let flags = if signaled { vk::FenceCreateFlags::SIGNALED } else { vk::FenceCreateFlags::empty() };
        let create_info = vk::FenceCreateInfo::default().flags(flags);

        let fence = unsafe {
            self.device.create_fence(&create_info, None)
                .map_err(|e| vk_error("create_fence", e))?
        };
        Ok(Fence::from_raw(fence.as_raw()))
    }

    fn wait_fence(&mut self, fence: Fence) -> Result<()> {
        unsafe {
            self.device.wait_for_fences(&[vk_fence(fence)], true, u64::MAX)
                .map_err(|e| vk_error("wait_for_fences", e))
        }
    }

    fn reset_fence(&mut self, fence: Fence) -> Result<()> {
        unsafe {
            self.device.reset_fences(&[vk_fence(fence)])
                .map_err(|e| vk_error("reset_fences", e))
        }
    }

    fn destroy_fence(&mut self, fence: Fence) {
        unsafe {
            self.device.destroy_fence(vk_fence(fence), None);
        }
    }

    fn create_semaphore(&mut self) -> Result<Semaphore> {
        let create_info = vk::SemaphoreCreateInfo::default();
        let semaphore = unsafe {
            self.device.create_semaphore(&create_info, None)
                .map_err(|e| vk_error("create_semaphore", e))?
        };
        Ok(Semaphore::from_raw(semaphore.as_raw()))
    }

    fn destroy_semaphore(&mut self, semaphore: Semaphore) {
        unsafe {
            self.device.destroy_semaphore(vk_semaphore(semaphore), None);
        }
    }

    fn submit(&mut self, submission: &Submission, fence: Fence) -> Result<()> {
        let command_buffers: Vec<vk::CommandBuffer> = submission.command_buffers()
            .iter()
            .map(|cmd| vk::CommandBuffer::from_raw(cmd.as_raw()))
            .collect();
        let (wait_semaphores, wait_stages): (Vec<vk::Semaphore>, Vec<vk::PipelineStageFlags>) = submission.waits()
            .iter()
            .map(|&(semaphore, stage)| (vk_semaphore(semaphore), stage_flags(stage)))
            .unzip();
        let signal_semaphores: Vec<vk::Semaphore> = submission.signals()
            .iter()
            .map(|&semaphore| vk_semaphore(semaphore))
            .collect();

        engine_trace!("galaxy3d::vulkan", "queue_submit: {} command buffers, {} waits, {} signals",
            command_buffers.len(), wait_semaphores.len(), signal_semaphores.len());

        let submit_info = vk::SubmitInfo::default()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&signal_semaphores);

        unsafe {
            self.device.queue_submit(self.graphics_queue, &[submit_info], vk_fence(fence))
                .map_err(|e| vk_error("queue_submit", e))
        }
    }
}
