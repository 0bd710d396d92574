/// Frame synchronization set - per-surface fences and semaphores
///
/// Frame slots and swapchain images are two separate index spaces:
/// fences and semaphores are indexed by frame slot (`0..frames_in_flight`),
/// while the image-in-flight table is indexed by swapchain image index.

use crate::error::Result;
use crate::backend::{GpuDevice, Fence, Semaphore};

pub struct FrameSync {
    /// Signaled when the frame submitted from a slot has finished (one per slot)
    frame_fences: Vec<Fence>,
    /// Fence of the last frame that rendered into each swapchain image
    images_in_flight: Vec<Option<Fence>>,
    /// Signaled by acquire, waited by the submission (one per slot)
    image_available: Vec<Semaphore>,
    /// Signaled by the submission, waited by present (one per slot)
    render_finished: Vec<Semaphore>,
    /// Image-available semaphore signaled by an acquire and not yet consumed
    armed: Vec<bool>,
}

impl FrameSync {
    /// Create the set for `frames_in_flight` slots and `image_count` swapchain images
    ///
    /// Fences start signaled so that the first wait on every slot returns immediately.
    pub fn new(device: &mut dyn GpuDevice, frames_in_flight: usize, image_count: u32) -> Result<Self> {
        let mut frame_fences = Vec::with_capacity(frames_in_flight);
        for _ in 0..frames_in_flight {
            frame_fences.push(device.create_fence(true)?);
        }

        let mut sync = Self {
            frame_fences,
            images_in_flight: vec![None; image_count as usize],
            image_available: Vec::with_capacity(frames_in_flight),
            render_finished: Vec::with_capacity(frames_in_flight),
            armed: vec![false; frames_in_flight],
        };
        sync.create_semaphores(device)?;

        crate::engine_trace!("galaxy3d::FrameSync",
            "created {} frame slots for {} images", frames_in_flight, image_count);
        Ok(sync)
    }

    fn create_semaphores(&mut self, device: &mut dyn GpuDevice) -> Result<()> {
        for _ in 0..self.frame_fences.len() {
            self.image_available.push(device.create_semaphore()?);
            self.render_finished.push(device.create_semaphore()?);
        }
        Ok(())
    }

    fn destroy_semaphores(&mut self, device: &mut dyn GpuDevice) {
        for semaphore in self.image_available.drain(..).chain(self.render_finished.drain(..)) {
            device.destroy_semaphore(semaphore);
        }
    }

    /// Number of frame slots
    pub fn frames_in_flight(&self) -> usize {
        self.frame_fences.len()
    }

    /// Slot following `slot`
    pub fn next_slot(&self, slot: usize) -> usize {
        (slot + 1) % self.frame_fences.len()
    }

    pub fn fence(&self, slot: usize) -> Fence {
        self.frame_fences[slot]
    }

    pub fn image_available(&self, slot: usize) -> Semaphore {
        self.image_available[slot]
    }

    pub fn render_finished(&self, slot: usize) -> Semaphore {
        self.render_finished[slot]
    }

    /// Number of tracked swapchain images
    pub fn image_count(&self) -> u32 {
        self.images_in_flight.len() as u32
    }

    /// Fence last associated with a swapchain image
    pub fn image_fence(&self, image_index: u32) -> Option<Fence> {
        self.images_in_flight.get(image_index as usize).copied().flatten()
    }

    /// Block until the slot after `current_slot` (the next one to be reused) is free
    pub fn wait_next(&self, device: &mut dyn GpuDevice, current_slot: usize) -> Result<()> {
        device.wait_fence(self.frame_fences[self.next_slot(current_slot)])
    }

    /// Wait for the last frame using `image_index` if it came from another slot,
    /// then associate the image with the fence of `slot`
    pub fn track_image(&mut self, device: &mut dyn GpuDevice, slot: usize, image_index: u32) -> Result<()> {
        let current = self.frame_fences[slot];
        let image_count = self.images_in_flight.len();
        let Some(entry) = self.images_in_flight.get_mut(image_index as usize) else {
            crate::engine_fatal!("galaxy3d::FrameSync",
                "image index {} out of range (count: {})", image_index, image_count);
        };
        if let Some(previous) = *entry {
            if previous != current {
                device.wait_fence(previous)?;
            }
        }
        *entry = Some(current);
        Ok(())
    }

    /// Forget every image association after a swapchain recreation
    pub fn resize_images(&mut self, image_count: u32) {
        self.images_in_flight = vec![None; image_count as usize];
    }

    /// Replace both semaphore sets; every slot is disarmed
    ///
    /// The GPU must be idle.
    pub fn recreate_semaphores(&mut self, device: &mut dyn GpuDevice) -> Result<()> {
        self.destroy_semaphores(device);
        self.create_semaphores(device)?;
        self.armed.iter_mut().for_each(|armed| *armed = false);
        Ok(())
    }

    /// Replace the fence of `slot` with a fresh signaled one
    ///
    /// Used after a failed submission, which may leave the fence reset with
    /// nothing queued to signal it. The GPU must be idle.
    pub fn replace_fence(&mut self, device: &mut dyn GpuDevice, slot: usize) -> Result<()> {
        let old = self.frame_fences[slot];
        let fresh = device.create_fence(true)?;
        device.destroy_fence(old);
        self.frame_fences[slot] = fresh;
        for entry in self.images_in_flight.iter_mut() {
            if *entry == Some(old) {
                *entry = None;
            }
        }
        Ok(())
    }

    /// The image-available semaphore of `slot` was signaled by an acquire
    pub fn arm(&mut self, slot: usize) {
        self.armed[slot] = true;
    }

    /// The image-available semaphore of `slot` was consumed by a submission
    pub fn disarm(&mut self, slot: usize) {
        self.armed[slot] = false;
    }

    pub fn is_armed(&self, slot: usize) -> bool {
        self.armed[slot]
    }

    /// Release every fence and semaphore (the GPU must be idle)
    pub fn destroy(mut self, device: &mut dyn GpuDevice) {
        self.destroy_semaphores(device);
        for fence in self.frame_fences.drain(..) {
            device.destroy_fence(fence);
        }
    }
}
