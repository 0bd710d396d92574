use super::*;
use super::mock_backend::mock_collaborators;
use crate::request::ObjectId;

// ============================================================================
// Swapchain status merge
// ============================================================================

#[test]
fn test_after_acquire_valid_stays_valid() {
    assert_eq!(SwapchainStatus::Valid.after_acquire(SwapchainStatus::Valid), SwapchainStatus::Valid);
}

#[test]
fn test_after_acquire_keeps_pending_recreate() {
    assert_eq!(
        SwapchainStatus::NeedsRecreate.after_acquire(SwapchainStatus::Valid),
        SwapchainStatus::NeedsRecreate
    );
}

#[test]
fn test_after_acquire_invalid_wins() {
    for stored in [SwapchainStatus::Valid, SwapchainStatus::NeedsRecreate, SwapchainStatus::Invalid] {
        assert_eq!(stored.after_acquire(SwapchainStatus::Invalid), SwapchainStatus::Invalid);
    }
}

#[test]
fn test_after_acquire_recovering_from_invalid_recreates() {
    assert_eq!(
        SwapchainStatus::Invalid.after_acquire(SwapchainStatus::Valid),
        SwapchainStatus::NeedsRecreate
    );
    assert_eq!(
        SwapchainStatus::Valid.after_acquire(SwapchainStatus::NeedsRecreate),
        SwapchainStatus::NeedsRecreate
    );
}

#[test]
fn test_acquire_outcome_constructors() {
    let outcome = AcquireOutcome::valid(2);
    assert_eq!(outcome.status, SwapchainStatus::Valid);
    assert_eq!(outcome.image_index, 2);

    let outcome = AcquireOutcome::with_status(SwapchainStatus::Invalid);
    assert_eq!(outcome.status, SwapchainStatus::Invalid);
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submission_builder_and_reset() {
    let mut submission = Submission::new();
    assert!(submission.is_empty());

    submission
        .add_commands(CommandBuffer::from_raw(1))
        .add_commands(CommandBuffer::from_raw(2))
        .wait_semaphore(Semaphore::from_raw(10), PipelineStage::ColorAttachmentOutput)
        .signal_semaphore(Semaphore::from_raw(11));

    assert_eq!(submission.command_buffers(), &[CommandBuffer::from_raw(1), CommandBuffer::from_raw(2)]);
    assert_eq!(submission.waits(), &[(Semaphore::from_raw(10), PipelineStage::ColorAttachmentOutput)]);
    assert_eq!(submission.signals(), &[Semaphore::from_raw(11)]);

    submission.reset();
    assert!(submission.is_empty());
    assert!(submission.waits().is_empty());
    assert!(submission.signals().is_empty());
}

#[test]
fn test_handle_raw_round_trip() {
    assert_eq!(Fence::from_raw(42).as_raw(), 42);
    assert_eq!(Semaphore::from_raw(7).as_raw(), 7);
    assert_eq!(CommandBuffer::from_raw(0).as_raw(), 0);
}

#[test]
fn test_window_size_empty() {
    assert!(WindowSize::new(800, 600, 0, 1200).is_empty());
    assert!(!WindowSize::new(800, 600, 1600, 1200).is_empty());
}

// ============================================================================
// Mock device fence simulation
// ============================================================================

#[test]
fn test_mock_fence_signaled_then_pending() {
    let (mut collaborators, probe) = mock_collaborators();
    let device = collaborators.device.as_mut();

    let fence = device.create_fence(true).unwrap();
    device.wait_fence(fence).unwrap();
    device.reset_fence(fence).unwrap();
    device.submit(&Submission::new(), fence).unwrap();
    device.wait_fence(fence).unwrap();

    assert_eq!(probe.state().count("wait_fence"), 2);
    assert_eq!(probe.state().count("submit"), 1);
}

#[test]
#[should_panic(expected = "never submitted")]
fn test_mock_fence_wait_before_submit_panics() {
    let (mut collaborators, _probe) = mock_collaborators();
    let device = collaborators.device.as_mut();

    let fence = device.create_fence(true).unwrap();
    device.reset_fence(fence).unwrap();
    let _ = device.wait_fence(fence);
}

#[test]
fn test_mock_acquire_cycles_images() {
    let (mut collaborators, _probe) = mock_collaborators();
    let backend = collaborators.backend.as_mut();
    let id = ObjectId(1);

    backend.create_swapchain(id, SurfaceHandle(1), 100, 100).unwrap();
    let indices: Vec<u32> = (0..4)
        .map(|_| backend.acquire(id, Semaphore::from_raw(1)).unwrap().image_index)
        .collect();

    assert_eq!(indices, vec![0, 1, 2, 0]);
    assert_eq!(backend.max_image_count(), 3);
}
