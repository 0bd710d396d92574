//! Frame synchronization module

mod frame_sync;

pub use frame_sync::FrameSync;

#[cfg(test)]
#[path = "frame_sync_tests.rs"]
mod tests;
