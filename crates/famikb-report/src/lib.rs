//! Per-mode report builders for the famikb bus responder.
//!
//! Every builder is a pure function of one frame's [`MouseSnapshot`] (or the
//! drained ring bytes), invoked once per latch edge. Each encoder has a
//! matching decoder for test harnesses and host tools.
//!
//! | Mode | Builder | Shape |
//! |------|---------|-------|
//! | Generic | [`mouse_word`], [`keyboard_word`] | inverted big-endian `u32` |
//! | Subor | [`encode_subor`] | 1 or 3 tagged bytes |
//! | Hori Track | [`encode_hori_track`] | tagged `u32` |
//!
//! [`MouseSnapshot`]: famikb_types::MouseSnapshot

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod generic;
pub mod hori;
pub mod subor;

pub use generic::{keyboard_word, mouse_word, pack_word, unpack_word};
pub use hori::{HORI_TAG, HoriMotion, decode_hori_track, encode_hori_track};
pub use subor::{SUBOR_MAX_MAGNITUDE, SuborMotion, SuborReport, decode_subor, encode_subor};
