//! Canonical key and mouse events shared by every famikb crate.
//!
//! Decoders translate their protocol into these types; the state store and
//! the bus responder only ever see canonical values.
//!
//! ```
//! use famikb_types::{KeyCode, KeyEvent};
//!
//! let event = KeyEvent::release(KeyCode::A);
//! assert_eq!(event.to_wire_byte(), 0x84);
//! assert_eq!(KeyEvent::from_wire_byte(0x84), Some(event));
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod event;
pub mod keycode;
pub mod mode;
pub mod mouse;

pub use event::{KeyEvent, KeyEventBatch, RELEASE_BIT};
pub use keycode::KeyCode;
pub use mode::{InputSource, Mode, VideoStandard};
pub use mouse::{
    MouseButtons, MouseExtra, MousePositioning, MouseSnapshot, MouseUpdate, saturate_i8,
};
