use super::*;
use ash::vk::Handle;
use galaxy_3d_presenter::galaxy3d::Error;
use galaxy_3d_presenter::galaxy3d::backend::{PipelineStage, SurfaceHandle, SwapchainStatus};

// ============================================================================
// Acquire / present status mapping
// ============================================================================

#[test]
fn test_acquire_success_is_valid() {
    let outcome = acquire_outcome(Ok((2, false))).unwrap();
    assert_eq!(outcome.status, SwapchainStatus::Valid);
    assert_eq!(outcome.image_index, 2);
}

#[test]
fn test_acquire_suboptimal_needs_recreate() {
    let outcome = acquire_outcome(Ok((1, true))).unwrap();
    assert_eq!(outcome.status, SwapchainStatus::NeedsRecreate);
}

#[test]
fn test_acquire_out_of_date_needs_recreate() {
    let outcome = acquire_outcome(Err(vk::Result::ERROR_OUT_OF_DATE_KHR)).unwrap();
    assert_eq!(outcome.status, SwapchainStatus::NeedsRecreate);
}

#[test]
fn test_acquire_device_lost_is_error() {
    let result = acquire_outcome(Err(vk::Result::ERROR_DEVICE_LOST));
    assert!(matches!(result, Err(Error::BackendError(_))));
}

#[test]
fn test_acquire_surface_lost_is_surface_error() {
    let result = acquire_outcome(Err(vk::Result::ERROR_SURFACE_LOST_KHR));
    assert!(matches!(result, Err(Error::SurfaceLost(_))));
}

#[test]
fn test_present_mapping() {
    assert_eq!(present_status(Ok(false)).unwrap(), SwapchainStatus::Valid);
    assert_eq!(present_status(Ok(true)).unwrap(), SwapchainStatus::NeedsRecreate);
    assert_eq!(
        present_status(Err(vk::Result::ERROR_OUT_OF_DATE_KHR)).unwrap(),
        SwapchainStatus::NeedsRecreate
    );
    assert!(matches!(
        present_status(Err(vk::Result::ERROR_OUT_OF_DEVICE_MEMORY)),
        Err(Error::OutOfMemory)
    ));
}

// ============================================================================
// Extent and image count selection
// ============================================================================

fn capabilities(current: (u32, u32), min_count: u32, max_count: u32) -> vk::SurfaceCapabilitiesKHR {
    vk::SurfaceCapabilitiesKHR {
        min_image_count: min_count,
        max_image_count: max_count,
        current_extent: vk::Extent2D { width: current.0, height: current.1 },
        min_image_extent: vk::Extent2D { width: 1, height: 1 },
        max_image_extent: vk::Extent2D { width: 4096, height: 4096 },
        ..Default::default()
    }
}

#[test]
fn test_extent_follows_surface() {
    let caps = capabilities((1600, 1200), 2, 8);
    let extent = choose_extent(&caps, 800, 600);
    assert_eq!((extent.width, extent.height), (1600, 1200));
}

#[test]
fn test_extent_zero_surface_is_kept() {
    let caps = capabilities((0, 0), 2, 8);
    let extent = choose_extent(&caps, 800, 600);
    assert_eq!((extent.width, extent.height), (0, 0));
}

#[test]
fn test_extent_free_surface_clamps_request() {
    let caps = capabilities((u32::MAX, u32::MAX), 2, 8);
    let extent = choose_extent(&caps, 8000, 600);
    assert_eq!((extent.width, extent.height), (4096, 600));
}

#[test]
fn test_image_count() {
    assert_eq!(choose_image_count(&capabilities((1, 1), 2, 8)), 3);
    assert_eq!(choose_image_count(&capabilities((1, 1), 3, 3)), 3);
    assert_eq!(choose_image_count(&capabilities((1, 1), 2, 0)), 3);
}

// ============================================================================
// Handle and stage conversions
// ============================================================================

#[test]
fn test_surface_handle_conversion() {
    let surface = vk::SurfaceKHR::from_raw(0xdead_beef);
    let handle = surface_handle(surface);
    assert_eq!(handle, SurfaceHandle(0xdead_beef));
    assert_eq!(vk_surface(handle), surface);
}

#[test]
fn test_stage_flags() {
    assert_eq!(stage_flags(PipelineStage::TopOfPipe), vk::PipelineStageFlags::TOP_OF_PIPE);
    assert_eq!(
        stage_flags(PipelineStage::ColorAttachmentOutput),
        vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT
    );
    assert_eq!(stage_flags(PipelineStage::Transfer), vk::PipelineStageFlags::TRANSFER);
    assert_eq!(stage_flags(PipelineStage::BottomOfPipe), vk::PipelineStageFlags::BOTTOM_OF_PIPE);
}

#[test]
fn test_vk_error_mapping() {
    assert!(matches!(vk_error("x", vk::Result::ERROR_OUT_OF_HOST_MEMORY), Error::OutOfMemory));
    assert!(matches!(vk_error("x", vk::Result::ERROR_SURFACE_LOST_KHR), Error::SurfaceLost(_)));
    match vk_error("create_fence", vk::Result::ERROR_DEVICE_LOST) {
        Error::BackendError(msg) => assert!(msg.contains("create_fence")),
        other => panic!("unexpected error {:?}", other),
    }
}
