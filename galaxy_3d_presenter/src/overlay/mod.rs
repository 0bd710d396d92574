//! GUI overlay module

mod overlay;
mod overlay_registry;

pub use overlay::{Overlay, OverlayContext, OverlayFn, FpsOverlay, MonitorOverlay};
pub use overlay_registry::{OverlayRegistry, OverlayKey};

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
