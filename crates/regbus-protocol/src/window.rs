//! Slave-side register window.
//!
//! # RT Safety
//!
//! The handlers run in interrupt context. Each one is a bounded index update
//! on a fixed array: no allocation, no blocking, no logging.

use crate::WINDOW_SIZE;
use crate::message::HostMessage;

/// Outcome of a finished transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Nothing was written (pure read, or address byte only).
    NoData,
    /// The address byte was not `0`; the payload was discarded.
    Garbage,
    /// A valid write completed; the decoded window.
    Message(HostMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Address,
    Data,
    Discard,
}

/// Six-byte memory window with an auto-incrementing pointer.
///
/// The first byte written in a transaction is the register address. Only
/// address `0` is accepted; anything else turns the rest of the transaction
/// into a no-op. Later bytes are stored at the pointer, which wraps mod 6.
/// Reads return the byte at the pointer and advance it the same way.
///
/// A finished write is decoded from the slots that transaction wrote; slots
/// it left alone read as `0`, so stale bytes from an earlier write are never
/// applied twice. The memory itself keeps them for read-back.
///
/// ```rust
/// use famikb_regbus_protocol::{RegbusWindow, TransactionOutcome};
///
/// let mut window = RegbusWindow::new();
/// let outcome = window.run_write(&[0x00, 0x05, 0x04]);
/// assert!(matches!(outcome, TransactionOutcome::Message(_)));
/// assert_eq!(window.memory()[1], 0x04);
/// ```
#[derive(Debug, Clone)]
pub struct RegbusWindow {
    memory: [u8; WINDOW_SIZE],
    pointer: usize,
    phase: Phase,
    /// Bit `n` set once slot `n` was written in this transaction.
    written: u8,
}

impl Default for RegbusWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl RegbusWindow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            memory: [0; WINDOW_SIZE],
            pointer: 0,
            phase: Phase::Address,
            written: 0,
        }
    }

    /// Master wrote one byte.
    #[inline]
    pub fn on_receive(&mut self, byte: u8) {
        match self.phase {
            Phase::Address => {
                if byte == 0 {
                    self.pointer = 0;
                    self.phase = Phase::Data;
                } else {
                    self.phase = Phase::Discard;
                }
            }
            Phase::Data => {
                if let Some(slot) = self.memory.get_mut(self.pointer) {
                    *slot = byte;
                    self.written |= 1 << self.pointer;
                }
                self.pointer = (self.pointer + 1) % WINDOW_SIZE;
            }
            Phase::Discard => {}
        }
    }

    /// Master reads one byte.
    #[inline]
    pub fn on_request(&mut self) -> u8 {
        let byte = self.memory.get(self.pointer).copied().unwrap_or(0);
        self.pointer = (self.pointer + 1) % WINDOW_SIZE;
        byte
    }

    /// Stop or repeated start: the transaction is over.
    #[inline]
    pub fn on_finish(&mut self) -> TransactionOutcome {
        let outcome = match self.phase {
            Phase::Discard => TransactionOutcome::Garbage,
            _ if self.written == 0 => TransactionOutcome::NoData,
            _ => TransactionOutcome::Message(HostMessage::from_window(&self.written_image())),
        };
        self.phase = Phase::Address;
        self.written = 0;
        outcome
    }

    /// The memory with every slot this transaction did not write zeroed.
    fn written_image(&self) -> [u8; WINDOW_SIZE] {
        let mut image = [0; WINDOW_SIZE];
        for (n, (out, byte)) in image.iter_mut().zip(self.memory).enumerate() {
            if self.written & (1 << n) != 0 {
                *out = byte;
            }
        }
        image
    }

    /// Receive every byte of a write transaction and finish it.
    pub fn run_write(&mut self, bytes: &[u8]) -> TransactionOutcome {
        for byte in bytes {
            self.on_receive(*byte);
        }
        self.on_finish()
    }

    #[must_use]
    pub const fn memory(&self) -> &[u8; WINDOW_SIZE] {
        &self.memory
    }

    #[must_use]
    pub const fn pointer(&self) -> usize {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use famikb_types::{KeyCode, KeyEvent, MouseButtons};

    use super::*;

    #[test]
    fn test_address_zero_stores_from_start() {
        let mut window = RegbusWindow::new();
        let outcome = window.run_write(&[0, 5, 0x84, 0x26, 1, 2, 3]);
        assert_eq!(window.memory(), &[5, 0x84, 0x26, 1, 2, 3]);
        assert_eq!(window.pointer(), 0);
        match outcome {
            TransactionOutcome::Message(msg) => {
                assert_eq!(msg.key_event(), Some(KeyEvent::release(KeyCode::A)));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_garbage_leaves_memory_untouched() {
        let mut window = RegbusWindow::new();
        window.run_write(&[0, 5, 0x04]);
        let before = *window.memory();

        assert_eq!(
            window.run_write(&[3, 9, 9, 9, 9, 9, 9]),
            TransactionOutcome::Garbage
        );
        assert_eq!(window.memory(), &before);
    }

    #[test]
    fn test_garbage_does_not_poison_next_transaction() {
        let mut window = RegbusWindow::new();
        window.run_write(&[1, 2, 3]);
        assert!(matches!(
            window.run_write(&[0, 5, 0x04]),
            TransactionOutcome::Message(_)
        ));
    }

    #[test]
    fn test_address_only_is_no_data() {
        let mut window = RegbusWindow::new();
        assert_eq!(window.run_write(&[0]), TransactionOutcome::NoData);
        assert_eq!(window.run_write(&[]), TransactionOutcome::NoData);
    }

    #[test]
    fn test_pointer_wraps_mod_six() {
        let mut window = RegbusWindow::new();
        window.run_write(&[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(window.memory(), &[7, 2, 3, 4, 5, 6]);
        assert_eq!(window.pointer(), 1);
    }

    #[test]
    fn test_short_write_ignores_stale_slots() {
        let mut window = RegbusWindow::new();
        let first = HostMessage::mouse(
            MouseButtons::empty(),
            4,
            -4,
            famikb_types::MousePositioning::Relative,
        )
        .with_key(KeyEvent::press(KeyCode::A));
        window.run_write(&first.transaction());

        // Block count only: the old key and deltas stay in memory but are not
        // decoded again.
        match window.run_write(&[0x00, 0x05]) {
            TransactionOutcome::Message(msg) => {
                assert_eq!(msg.key_event(), None);
                assert_eq!(msg.mouse_update(), None);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(window.memory(), &first.to_window());
    }

    #[test]
    fn test_partial_write_decodes_written_prefix() {
        let mut window = RegbusWindow::new();
        window.run_write(&HostMessage::key(KeyEvent::press(KeyCode::Z)).transaction());

        match window.run_write(&[0x00, 0x05, 0x84]) {
            TransactionOutcome::Message(msg) => {
                assert_eq!(msg.key_event(), Some(KeyEvent::release(KeyCode::A)));
                assert!(msg.flags.is_empty());
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_reads_advance_pointer() {
        let mut window = RegbusWindow::new();
        window.run_write(&[0, 10, 11, 12, 13, 14, 15]);

        window.on_receive(0);
        let read: Vec<u8> = (0..7).map(|_| window.on_request()).collect();
        assert_eq!(read, vec![10, 11, 12, 13, 14, 15, 10]);
        assert_eq!(window.on_finish(), TransactionOutcome::NoData);
    }
}
