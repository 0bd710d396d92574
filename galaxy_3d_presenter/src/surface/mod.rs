//! Surface module - canvas surfaces, frame timing, teardown and id lookups

mod surface;
mod frame_times;
mod teardown;
mod registry;

pub use surface::{Surface, scale_factor};
pub use frame_times::FrameTimes;
pub use teardown::{SurfaceTeardown, TeardownStage};
pub use registry::IdRegistry;

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;
