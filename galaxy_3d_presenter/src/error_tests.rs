//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("vkQueueSubmit failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("vkQueueSubmit failed"));
}

#[test]
fn test_out_of_memory_display() {
    assert_eq!(format!("{}", Error::OutOfMemory), "Out of GPU memory");
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("unknown fence 0x2a".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("0x2a"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("frames_in_flight must be > 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("frames_in_flight"));
}

#[test]
fn test_surface_lost_display() {
    let err = Error::SurfaceLost("window 0x1 closed".to_string());
    assert_eq!(format!("{}", err), "Surface lost: window 0x1 closed");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug_names_variant() {
    assert!(format!("{:?}", Error::BackendError("x".into())).contains("BackendError"));
    assert!(format!("{:?}", Error::OutOfMemory).contains("OutOfMemory"));
    assert!(format!("{:?}", Error::SurfaceLost("x".into())).contains("SurfaceLost"));
}

#[test]
fn test_error_clone_keeps_message() {
    let err = Error::InvalidResource("swapchain".to_string());
    assert_eq!(format!("{}", err.clone()), format!("{}", err));
}

// ============================================================================
// MACROS
// ============================================================================

#[test]
fn test_engine_err_builds_backend_error() {
    let err = crate::engine_err!("galaxy3d::test", "acquire failed with code {}", -1000001004);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "acquire failed with code -1000001004"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_engine_bail_returns_early() {
    fn check(count: u32) -> Result<u32> {
        if count == 0 {
            crate::engine_bail!("galaxy3d::test", "count must be > 0");
        }
        Ok(count * 2)
    }

    assert!(check(0).is_err());
    assert_eq!(check(4).unwrap(), 8);
}

#[test]
#[should_panic(expected = "unknown surface")]
fn test_engine_fatal_panics_with_message() {
    crate::engine_fatal!("galaxy3d::test", "unknown surface {}", 7);
}

// ============================================================================
// ERROR PROPAGATION TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::OutOfMemory)
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(matches!(outer(), Err(Error::OutOfMemory)));
}
