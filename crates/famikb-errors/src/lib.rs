//! Error types for famikb.
//!
//! Two families live here:
//!
//! - [`fault`]: `Copy`, fixed-size fault codes for the decoder and responder
//!   contexts. These never allocate and are counted rather than propagated,
//!   because nothing on the bus side can report an error to the console.
//! - [`config`]: boot-time configuration errors, returned to the caller
//!   before any real-time context starts.
//!
//! # Example
//!
//! ```
//! use famikb_errors::{ErrorSeverity, FaultCode};
//!
//! let fault = FaultCode::RingOverflow;
//! assert_eq!(fault.code(), 2);
//! assert_eq!(fault.severity(), ErrorSeverity::Info);
//! assert_eq!(FaultCode::from_code(2), Some(fault));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod fault;

pub use config::{BridgeError, ConfigError};
pub use fault::{ErrorSeverity, FaultCode};

/// Result of a boot-time configuration step.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
