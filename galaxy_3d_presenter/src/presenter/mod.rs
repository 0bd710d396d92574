//! Presenter module - surface lifecycle, frame driver and request router

mod presenter;
mod lifecycle;
mod frame;
mod router;
mod event;

pub use presenter::{Presenter, Collaborators};
pub use event::{ClientEvent, ResizeEvent};

#[cfg(test)]
#[path = "presenter_tests.rs"]
mod tests;
