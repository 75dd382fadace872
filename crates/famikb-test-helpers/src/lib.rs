//! Shared test utilities for famikb.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`bus`] - Scripted bus source and recording output sink
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! famikb-test-helpers = { workspace = true }
//! ```
//!
//! ```rust,ignore
//! use famikb_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod bus;
pub mod must;
pub mod prelude;

pub use bus::{RecordingSink, ScriptedBus, pump};
pub use must::*;
