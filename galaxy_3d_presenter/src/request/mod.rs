//! Request model
//!
//! Boundary types for the command batches consumed from the upstream client,
//! plus the optional batch diagnostics (print / JSON export).

mod request;
mod batch_dump;

pub use request::{
    ObjectId, SurfaceId, CanvasFlags, RequestAction, RequestObject, RequestContent,
    Request, Batch,
};
pub use batch_dump::{print_batch, export_batch, export_batch_to_file, BATCH_EXPORT_VERSION};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
