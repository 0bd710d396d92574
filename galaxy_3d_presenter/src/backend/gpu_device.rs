/// GpuDevice trait - GPU synchronization primitives and queue submission
///
/// Handles are opaque 64-bit values owned by the device implementation
/// (Vulkan handles for the ash backend, counters for the mocks).

use crate::error::Result;

macro_rules! gpu_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw device handle
            pub fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw device handle
            pub fn as_raw(self) -> u64 {
                self.0
            }
        }
    };
}

gpu_handle! {
    /// CPU-visible fence signaled when a submission completes
    Fence
}

gpu_handle! {
    /// GPU-side semaphore ordering acquire, render and present
    Semaphore
}

gpu_handle! {
    /// Recorded command buffer ready for submission
    CommandBuffer
}

/// Pipeline stage at which a submission waits on a semaphore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    TopOfPipe,
    ColorAttachmentOutput,
    Transfer,
    BottomOfPipe,
}

/// One queue submission: command buffers plus the semaphores it waits on and signals
///
/// Reused across frames: `reset()` clears it without releasing its storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    command_buffers: Vec<CommandBuffer>,
    waits: Vec<(Semaphore, PipelineStage)>,
    signals: Vec<Semaphore>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear command buffers, waits and signals
    pub fn reset(&mut self) {
        self.command_buffers.clear();
        self.waits.clear();
        self.signals.clear();
    }

    /// Append a command buffer (submitted in insertion order)
    pub fn add_commands(&mut self, command_buffer: CommandBuffer) -> &mut Self {
        self.command_buffers.push(command_buffer);
        self
    }

    /// Wait on `semaphore` before `stage`
    pub fn wait_semaphore(&mut self, semaphore: Semaphore, stage: PipelineStage) -> &mut Self {
        self.waits.push((semaphore, stage));
        self
    }

    /// Signal `semaphore` when the submission completes
    pub fn signal_semaphore(&mut self, semaphore: Semaphore) -> &mut Self {
        self.signals.push(semaphore);
        self
    }

    pub fn command_buffers(&self) -> &[CommandBuffer] {
        &self.command_buffers
    }

    pub fn waits(&self) -> &[(Semaphore, PipelineStage)] {
        &self.waits
    }

    pub fn signals(&self) -> &[Semaphore] {
        &self.signals
    }

    /// Whether no command buffer has been added
    pub fn is_empty(&self) -> bool {
        self.command_buffers.is_empty()
    }
}

/// GPU device: fences, semaphores and the graphics queue
pub trait GpuDevice: Send {
    /// Block until the GPU has finished all submitted work
    fn wait_idle(&mut self) -> Result<()>;

    /// Create a fence, optionally in the signaled state
    fn create_fence(&mut self, signaled: bool) -> Result<Fence>;

    /// Block until `fence` is signaled
    fn wait_fence(&mut self, fence: Fence) -> Result<()>;

    /// Return `fence` to the unsignaled state
    fn reset_fence(&mut self, fence: Fence) -> Result<()>;

    fn destroy_fence(&mut self, fence: Fence);

    /// Create a binary semaphore
    fn create_semaphore(&mut self) -> Result<Semaphore>;

    fn destroy_semaphore(&mut self, semaphore: Semaphore);

    /// Submit to the graphics queue; `fence` is signaled on completion
    fn submit(&mut self, submission: &Submission, fence: Fence) -> Result<()>;
}
