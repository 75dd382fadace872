//! USB HID boot protocol decoding for famikb.
//!
//! Enumeration and report-descriptor parsing are done by the USB host stack;
//! this crate starts from raw boot-protocol input reports.
//!
//! ## Features
//! - Boot keyboard: modifier byte and six key slots diffed into key events
//! - Boot mouse: buttons, motion and wheel into mouse updates
//! - Absolute cursor mode clamped to the console's visible raster

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod keyboard;
pub mod mouse;

pub use keyboard::{
    BootKeyboardReport, KEY_SLOTS, KEYBOARD_REPORT_LEN, KeyboardDiffer, KeyboardUpdate,
    USAGE_ROLLOVER, translate_usage,
};
pub use mouse::{BootMouseReport, MOUSE_REPORT_MIN_LEN, MouseDecoder};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HidReportError {
    #[error("Invalid report size: expected at least {expected}, got {actual}")]
    InvalidReportSize { expected: usize, actual: usize },

    #[error("Keyboard reported rollover")]
    Rollover,
}

pub type HidResult<T> = Result<T, HidReportError>;
