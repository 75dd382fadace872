//! # famikb-responder
//!
//! The real-time loop behind the Famicom expansion port. Each iteration
//! samples the bus, derives edges, advances the active mode's state machine
//! and hands one 5-bit value to the output driver.
//!
//! ## RT Safety Guarantees
//!
//! - **No heap allocations** in [`BusResponder::step`]
//! - **No logging** on the step path; frames and row advances are counted in
//!   the shared diagnostic counters instead
//! - **Never blocks**: relaxed atomics and a lock-free ring pop only
//!
//! ## Output bits
//!
//! ```text
//! D4 D3 D2 D1 | D0
//! matrix row  | mouse / trackball bit     (matrix modes)
//! -- -- -- kb | mouse                     (Generic, inverted words)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use famikb_responder::{BusResponder, BusSnapshot, PORT_ENABLE, PORT_LATCH};
//! use famikb_state::SharedState;
//! use famikb_types::{KeyCode, KeyEvent, Mode};
//!
//! let state = Arc::new(SharedState::new(Mode::FamilyBasic));
//! state.apply_key_event(KeyEvent::press(KeyCode::RIGHTBRACE));
//!
//! let mut responder = BusResponder::new(Arc::clone(&state));
//! responder.step(BusSnapshot::from_port(PORT_LATCH | PORT_ENABLE, false));
//! let out = responder.step(BusSnapshot::from_port(PORT_ENABLE, false));
//! assert_eq!(out, 0b1_0000);
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod bus;
pub mod console;
pub mod responder;

pub use bus::{
    BitSink, BusEdges, BusSnapshot, BusSource, EdgeDetector, OUTPUT_MASK, PORT_ENABLE, PORT_LATCH,
    PORT_ROW_ADVANCE,
};
pub use console::{ConsoleHost, row_nibble};
pub use responder::{
    BusResponder, FamilyBasicResponder, GenericResponder, HoriTrackResponder, SuborResponder,
};
