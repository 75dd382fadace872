//! Convenience re-exports for common test utilities.

pub use crate::bus::{RecordingSink, ScriptedBus, pump};
pub use crate::must::{must, must_some, must_with};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
