/// Mock collaborators for unit tests (no GPU or window system required)
///
/// All mocks share one `MockState` which journals every collaborator call,
/// so tests can assert on call ordering across collaborators. Fences are
/// simulated: a submission leaves its fence pending and the next wait on it
/// completes it; waiting on a fence that was reset but never submitted panics.

#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::{Arc, Mutex, MutexGuard};
#[cfg(test)]
use rustc_hash::{FxHashMap, FxHashSet};
#[cfg(test)]
use winit::dpi::PhysicalSize;

#[cfg(test)]
use crate::backend::{
    GpuDevice, Fence, Semaphore, CommandBuffer, Submission,
    RenderBackend, SurfaceHandle, SwapchainInfo, SwapchainStatus, AcquireOutcome, ResourceUsage,
    Windowing, WindowSize, GuiToolkit, GuiWindow, GuiWindowHandle, OverlayUi,
};
#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::engine_bail;
#[cfg(test)]
use crate::presenter::Collaborators;
#[cfg(test)]
use crate::recorder::RecordCommand;
#[cfg(test)]
use crate::request::{Request, RequestAction, RequestObject, SurfaceId};

// ============================================================================
// Shared state
// ============================================================================

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFenceState {
    Signaled,
    Reset,
    Pending,
}

#[cfg(test)]
#[derive(Debug)]
pub struct MockState {
    /// Every collaborator call, in order
    pub journal: Vec<String>,
    pub fences: FxHashMap<u64, MockFenceState>,
    pub semaphores: FxHashSet<u64>,
    pub canvases: FxHashSet<SurfaceId>,
    pub swapchains: FxHashMap<SurfaceId, SwapchainInfo>,
    pub windows: FxHashMap<SurfaceId, WindowSize>,
    pub surfaces: FxHashMap<SurfaceId, SurfaceHandle>,
    pub gui_windows: FxHashSet<SurfaceId>,
    next_image: FxHashMap<SurfaceId, u32>,
    /// Statuses returned by the next acquires (Valid once exhausted)
    pub acquire_script: VecDeque<SwapchainStatus>,
    /// Statuses returned by the next presents (Valid once exhausted)
    pub present_script: VecDeque<SwapchainStatus>,
    /// Image count of swapchains created or recreated from now on
    pub image_count: u32,
    /// Framebuffer pixels per screen unit
    pub scale: u32,
    pub submissions: Vec<Submission>,
    pub fail_submit: bool,
    pub fail_create_window: bool,
    pub transfer_image_count: u32,
    pub ui_text: Vec<String>,
    pub usage: ResourceUsage,
    next_handle: u64,
}

#[cfg(test)]
impl MockState {
    fn new() -> Self {
        Self {
            journal: Vec::new(),
            fences: FxHashMap::default(),
            semaphores: FxHashSet::default(),
            canvases: FxHashSet::default(),
            swapchains: FxHashMap::default(),
            windows: FxHashMap::default(),
            surfaces: FxHashMap::default(),
            gui_windows: FxHashSet::default(),
            next_image: FxHashMap::default(),
            acquire_script: VecDeque::new(),
            present_script: VecDeque::new(),
            image_count: 3,
            scale: 2,
            submissions: Vec::new(),
            fail_submit: false,
            fail_create_window: false,
            transfer_image_count: 0,
            ui_text: Vec::new(),
            usage: ResourceUsage { allocated_bytes: 4096, buffer_count: 2, texture_count: 1 },
            next_handle: 1,
        }
    }

    fn handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn log(&mut self, entry: String) {
        self.journal.push(entry);
    }

    /// Index of the first journal entry equal to `entry`
    pub fn position(&self, entry: &str) -> Option<usize> {
        self.journal.iter().position(|e| e == entry)
    }

    /// Number of journal entries starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.journal.iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Resize the native window (screen units); the framebuffer follows the scale
    pub fn resize_window(&mut self, id: SurfaceId, screen_width: u32, screen_height: u32) {
        let size = WindowSize::new(
            screen_width,
            screen_height,
            screen_width * self.scale,
            screen_height * self.scale,
        );
        self.windows.insert(id, size);
    }
}

/// Shared handle on the mock state
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct MockProbe(Arc<Mutex<MockState>>);

#[cfg(test)]
impl MockProbe {
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Build a full mock collaborator set plus a probe on their shared state
#[cfg(test)]
pub fn mock_collaborators() -> (Collaborators, MockProbe) {
    let state = Arc::new(Mutex::new(MockState::new()));
    let collaborators = Collaborators {
        backend: Box::new(MockRenderBackend { state: state.clone() }),
        device: Box::new(MockGpuDevice { state: state.clone() }),
        windowing: Box::new(MockWindowing { state: state.clone() }),
        gui: Some(Box::new(MockGuiToolkit::new(state.clone()))),
    };
    (collaborators, MockProbe(state))
}

#[cfg(test)]
fn lock(state: &Arc<Mutex<MockState>>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// Mock GpuDevice
// ============================================================================

#[cfg(test)]
pub struct MockGpuDevice {
    state: Arc<Mutex<MockState>>,
}

#[cfg(test)]
impl GpuDevice for MockGpuDevice {
    fn wait_idle(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        for fence in state.fences.values_mut() {
            if *fence == MockFenceState::Pending {
                *fence = MockFenceState::Signaled;
            }
        }
        state.log("wait_idle".to_string());
        Ok(())
    }

    fn create_fence(&mut self, signaled: bool) -> Result<Fence> {
        let mut state = lock(&self.state);
        let handle = state.handle();
        let fence_state = if signaled { MockFenceState::Signaled } else { MockFenceState::Reset };
        state.fences.insert(handle, fence_state);
        Ok(Fence::from_raw(handle))
    }

    fn wait_fence(&mut self, fence: Fence) -> Result<()> {
        let mut state = lock(&self.state);
        match state.fences.get(&fence.as_raw()).copied() {
            Some(MockFenceState::Signaled) => {}
            Some(MockFenceState::Pending) => {
                state.fences.insert(fence.as_raw(), MockFenceState::Signaled);
            }
            Some(MockFenceState::Reset) => panic!("wait on fence {} that was never submitted", fence.as_raw()),
            None => panic!("wait on unknown fence {}", fence.as_raw()),
        }
        state.log(format!("wait_fence {}", fence.as_raw()));
        Ok(())
    }

    fn reset_fence(&mut self, fence: Fence) -> Result<()> {
        let mut state = lock(&self.state);
        state.fences.insert(fence.as_raw(), MockFenceState::Reset);
        Ok(())
    }

    fn destroy_fence(&mut self, fence: Fence) {
        lock(&self.state).fences.remove(&fence.as_raw());
    }

    fn create_semaphore(&mut self) -> Result<Semaphore> {
        let mut state = lock(&self.state);
        let handle = state.handle();
        state.semaphores.insert(handle);
        Ok(Semaphore::from_raw(handle))
    }

    fn destroy_semaphore(&mut self, semaphore: Semaphore) {
        lock(&self.state).semaphores.remove(&semaphore.as_raw());
    }

    fn submit(&mut self, submission: &Submission, fence: Fence) -> Result<()> {
        let mut state = lock(&self.state);
        if state.fail_submit {
            engine_bail!("galaxy3d::MockGpuDevice", "submit failed");
        }
        assert_eq!(
            state.fences.get(&fence.as_raw()).copied(),
            Some(MockFenceState::Reset),
            "submit with a fence that was not reset"
        );
        state.fences.insert(fence.as_raw(), MockFenceState::Pending);
        state.log(format!("submit cmds={}", submission.command_buffers().len()));
        state.submissions.push(submission.clone());
        Ok(())
    }
}

// ============================================================================
// Mock RenderBackend
// ============================================================================

#[cfg(test)]
pub struct MockRenderBackend {
    state: Arc<Mutex<MockState>>,
}

#[cfg(test)]
impl RenderBackend for MockRenderBackend {
    fn apply(&mut self, request: &Request) -> Result<()> {
        let mut state = lock(&self.state);
        if request.object == RequestObject::Canvas {
            match request.action {
                RequestAction::Create => {
                    state.canvases.insert(request.id);
                }
                RequestAction::Delete => {
                    state.canvases.remove(&request.id);
                }
                _ => {}
            }
        }
        state.log(format!("apply {:?} {:?} {}", request.action, request.object, request.id));
        Ok(())
    }

    fn has_canvas(&self, id: SurfaceId) -> bool {
        lock(&self.state).canvases.contains(&id)
    }

    fn create_swapchain(&mut self, id: SurfaceId, _surface: SurfaceHandle, width: u32, height: u32) -> Result<SwapchainInfo> {
        let mut state = lock(&self.state);
        let info = SwapchainInfo { image_count: state.image_count, width, height };
        state.swapchains.insert(id, info);
        state.next_image.insert(id, 0);
        state.log(format!("create_swapchain {} {}x{}", id, width, height));
        Ok(info)
    }

    fn recreate_swapchain(&mut self, id: SurfaceId, width: u32, height: u32) -> Result<SwapchainInfo> {
        let mut state = lock(&self.state);
        let info = SwapchainInfo { image_count: state.image_count, width, height };
        state.swapchains.insert(id, info);
        state.next_image.insert(id, 0);
        state.log(format!("recreate_swapchain {} {}x{}", id, width, height));
        Ok(info)
    }

    fn destroy_swapchain(&mut self, id: SurfaceId) {
        let mut state = lock(&self.state);
        state.swapchains.remove(&id);
        state.log(format!("destroy_swapchain {}", id));
    }

    fn acquire(&mut self, id: SurfaceId, _signal: Semaphore) -> Result<AcquireOutcome> {
        let mut state = lock(&self.state);
        let status = state.acquire_script.pop_front().unwrap_or(SwapchainStatus::Valid);
        state.log(format!("acquire {}", id));
        if status != SwapchainStatus::Valid {
            return Ok(AcquireOutcome::with_status(status));
        }
        let image_count = state.swapchains.get(&id).map_or(1, |info| info.image_count);
        let image_index = state.next_image.get(&id).copied().unwrap_or(0);
        state.next_image.insert(id, (image_index + 1) % image_count);
        Ok(AcquireOutcome::valid(image_index))
    }

    fn present(&mut self, id: SurfaceId, image_index: u32, _wait: Semaphore) -> Result<SwapchainStatus> {
        let mut state = lock(&self.state);
        state.log(format!("present {} img={}", id, image_index));
        Ok(state.present_script.pop_front().unwrap_or(SwapchainStatus::Valid))
    }

    fn command_buffer(&self, id: SurfaceId, image_index: u32) -> CommandBuffer {
        CommandBuffer::from_raw((id.raw() << 8) | image_index as u64)
    }

    fn reset_commands(&mut self, id: SurfaceId, image_index: u32) -> Result<()> {
        lock(&self.state).log(format!("reset_commands {} img={}", id, image_index));
        Ok(())
    }

    fn record_blank(&mut self, id: SurfaceId, image_index: u32) -> Result<()> {
        lock(&self.state).log(format!("record_blank {} img={}", id, image_index));
        Ok(())
    }

    fn record_commands(&mut self, id: SurfaceId, image_index: u32, commands: &[RecordCommand]) -> Result<()> {
        lock(&self.state).log(format!("record {} img={} n={}", id, image_index, commands.len()));
        Ok(())
    }

    fn max_image_count(&self) -> u32 {
        lock(&self.state).swapchains.values().map(|info| info.image_count).max().unwrap_or(0)
    }

    fn set_image_count(&mut self, image_count: u32) {
        lock(&self.state).transfer_image_count = image_count;
    }

    fn transfers_frame(&mut self, image_index: u32) -> Result<()> {
        lock(&self.state).log(format!("transfers_frame {}", image_index));
        Ok(())
    }

    fn resource_usage(&self) -> ResourceUsage {
        lock(&self.state).usage
    }
}

// ============================================================================
// Mock Windowing
// ============================================================================

#[cfg(test)]
pub struct MockWindowing {
    state: Arc<Mutex<MockState>>,
}

#[cfg(test)]
impl Windowing for MockWindowing {
    fn create_window(&mut self, id: SurfaceId, screen_width: u32, screen_height: u32) -> Result<()> {
        let mut state = lock(&self.state);
        if state.fail_create_window {
            engine_bail!("galaxy3d::MockWindowing", "window creation failed");
        }
        state.resize_window(id, screen_width, screen_height);
        state.log(format!("create_window {}", id));
        Ok(())
    }

    fn attach_input(&mut self, id: SurfaceId) -> Result<()> {
        lock(&self.state).log(format!("attach_input {}", id));
        Ok(())
    }

    fn framebuffer_size(&self, id: SurfaceId) -> PhysicalSize<u32> {
        lock(&self.state).windows.get(&id).map_or(PhysicalSize::new(0, 0), |size| size.framebuffer)
    }

    fn poll_size(&mut self, id: SurfaceId) -> WindowSize {
        let mut state = lock(&self.state);
        state.log(format!("poll_size {}", id));
        state.windows.get(&id).copied().unwrap_or_else(|| WindowSize::new(0, 0, 0, 0))
    }

    fn set_fullscreen(&mut self, id: SurfaceId, fullscreen: bool) -> Result<()> {
        lock(&self.state).log(format!("set_fullscreen {} {}", id, fullscreen));
        Ok(())
    }

    fn create_surface(&mut self, id: SurfaceId) -> Result<SurfaceHandle> {
        let mut state = lock(&self.state);
        let handle = SurfaceHandle(state.handle());
        state.surfaces.insert(id, handle);
        state.log(format!("create_surface {}", id));
        Ok(handle)
    }

    fn destroy_surface(&mut self, id: SurfaceId, _surface: SurfaceHandle) {
        let mut state = lock(&self.state);
        state.surfaces.remove(&id);
        state.log(format!("destroy_surface {}", id));
    }
}

// ============================================================================
// Mock GuiToolkit
// ============================================================================

#[cfg(test)]
pub struct MockUi {
    state: Arc<Mutex<MockState>>,
}

#[cfg(test)]
impl OverlayUi for MockUi {
    fn begin_panel(&mut self, title: &str) {
        lock(&self.state).ui_text.push(format!("[{}]", title));
    }

    fn text(&mut self, text: &str) {
        lock(&self.state).ui_text.push(text.to_string());
    }

    fn end_panel(&mut self) {}
}

#[cfg(test)]
pub struct MockGuiToolkit {
    state: Arc<Mutex<MockState>>,
    ui: MockUi,
}

#[cfg(test)]
impl MockGuiToolkit {
    fn new(state: Arc<Mutex<MockState>>) -> Self {
        Self { ui: MockUi { state: state.clone() }, state }
    }
}

#[cfg(test)]
impl GuiToolkit for MockGuiToolkit {
    fn create_window(&mut self, id: SurfaceId, swapchain: &SwapchainInfo) -> Result<GuiWindow> {
        let mut state = lock(&self.state);
        let handle = GuiWindowHandle(state.handle());
        state.gui_windows.insert(id);
        state.log(format!("gui.create_window {}", id));
        Ok(GuiWindow { id, handle, width: swapchain.width, height: swapchain.height })
    }

    fn destroy_window(&mut self, window: &GuiWindow) {
        let mut state = lock(&self.state);
        state.gui_windows.remove(&window.id);
        state.log(format!("gui.destroy_window {}", window.id));
    }

    fn resize_window(&mut self, window: &mut GuiWindow, width: u32, height: u32) -> Result<()> {
        window.width = width;
        window.height = height;
        lock(&self.state).log(format!("gui.resize_window {} {}x{}", window.id, width, height));
        Ok(())
    }

    fn begin_frame(&mut self, window: &GuiWindow, image_index: u32) -> Result<()> {
        lock(&self.state).log(format!("gui.begin_frame {} img={}", window.id, image_index));
        Ok(())
    }

    fn ui(&mut self) -> &mut dyn OverlayUi {
        &mut self.ui
    }

    fn end_frame(&mut self, window: &GuiWindow, image_index: u32) -> Result<CommandBuffer> {
        lock(&self.state).log(format!("gui.end_frame {} img={}", window.id, image_index));
        Ok(CommandBuffer::from_raw(0xF000_0000 | (window.id.raw() << 8) | image_index as u64))
    }

    fn destroy(&mut self) {
        lock(&self.state).log("gui.destroy".to_string());
    }
}
