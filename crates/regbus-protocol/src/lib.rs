//! Register-bus protocol for famikb.
//!
//! A companion host (a single-board computer or another microcontroller)
//! writes key and mouse state into a small I2C slave window. This crate holds
//! both ends of that exchange:
//!
//! - [`RegbusWindow`]: the slave-side window and its transaction handlers
//! - [`HostMessage`]: the window image, decoded into canonical events or
//!   built by a host tool
//! - [`AbsoluteCursor`]: the raster-clamped pointer a host keeps for
//!   absolute mouse mode

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod message;
pub mod window;

pub use message::{AbsoluteCursor, BLOCK_LEN, HostFlags, HostMessage};
pub use window::{RegbusWindow, TransactionOutcome};

use thiserror::Error;

/// 7-bit slave address the bridge answers on.
pub const SLAVE_ADDRESS: u8 = 0x17;

/// Size of the addressable window.
pub const WINDOW_SIZE: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegbusError {
    #[error("Invalid window size: expected {expected}, got {actual}")]
    InvalidWindowSize { expected: usize, actual: usize },
}

pub type RegbusResult<T> = Result<T, RegbusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(SLAVE_ADDRESS, 23);
        assert_eq!(WINDOW_SIZE, BLOCK_LEN + 1);
    }
}
