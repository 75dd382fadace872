//! # famikb-state
//!
//! Shared key and mouse state between the famikb input decoders and the bus
//! responder.
//!
//! ## Safety Guarantees
//!
//! - **No heap allocations** after construction
//! - **No blocking operations**: atomics and a lock-free bounded queue only
//! - **Fixed writer discipline**: decoders write key and mouse state, the
//!   responder consumes it
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use famikb_state::SharedState;
//! use famikb_types::{KeyCode, KeyEvent, Mode};
//!
//! let state = Arc::new(SharedState::new(Mode::FamilyBasic));
//!
//! // Decoder side
//! state.apply_key_event(KeyEvent::press(KeyCode::A));
//!
//! // Responder side: row 12 holds A, S, W, F2
//! assert_eq!(state.matrix().row_bits(12), 0b1000);
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod counters;
pub mod layouts;
pub mod matrix;
pub mod mouse;
pub mod ring;
pub mod store;

pub use counters::{DiagnosticCounters, DiagnosticSnapshot};
pub use layouts::{FAMILY_BASIC, MatrixLayout, SUBOR};
pub use matrix::{KeyMatrix, MATRIX_CAPACITY, ROW_WIDTH};
pub use mouse::MouseState;
pub use ring::{DRAIN_WIDTH, KeyRing, RING_CAPACITY};
pub use store::{KeyApply, SharedState};
