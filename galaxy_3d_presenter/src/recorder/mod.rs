//! Command recorder module

mod recorder;

pub use recorder::{Recorder, RecordCommand};

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;
