//! PS/2 keyboard decoding for famikb.
//!
//! Turns the raw scancode set 2 byte stream of an attached keyboard into
//! canonical [`famikb_types::KeyEvent`]s. Byte framing and clock recovery are
//! the board layer's job; this crate starts at whole bytes.
//!
//! ## Features
//! - `E0` extended and `F0` release prefixes, in either combination
//! - US 104-key and JIS 106-key tables
//! - Unmapped codes are reported, never turned into a key

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod decoder;
pub mod layouts;

pub use decoder::{
    DecodeOutcome, DecoderState, EXTENDED_PREFIX, Ps2Decoder, RELEASE_PREFIX, encode_key,
};
pub use layouts::ScancodeLayout;
