//! Bounded key-byte ring for Generic mode.
//!
//! # RT Safety
//!
//! - Fixed capacity, allocated once at construction
//! - Lock-free push and pop
//! - Overflow evicts the oldest byte instead of rejecting the new one

use crossbeam::queue::ArrayQueue;

/// Number of encoded key bytes retained.
pub const RING_CAPACITY: usize = 16;

/// Bytes drained per frame into the Generic keyboard register.
pub const DRAIN_WIDTH: usize = 4;

/// FIFO of wire-encoded key bytes (`keycode | released << 7`).
///
/// Decoders are the only producers; the bus responder is the only consumer.
///
/// ```rust
/// use famikb_state::KeyRing;
///
/// let ring = KeyRing::new();
/// for byte in 0..17u8 {
///     ring.push(byte);
/// }
/// assert_eq!(ring.len(), 16);
/// assert_eq!(ring.pop(), Some(1));
/// ```
#[derive(Debug)]
pub struct KeyRing {
    queue: ArrayQueue<u8>,
}

impl Default for KeyRing {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyRing {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: ArrayQueue::new(RING_CAPACITY),
        }
    }

    /// Append a byte, evicting the oldest when full.
    ///
    /// Returns the evicted byte, if any. Never blocks and never rejects.
    ///
    /// # RT Safety
    ///
    /// RT-safe. Bounded lock-free operation.
    #[inline]
    pub fn push(&self, byte: u8) -> Option<u8> {
        self.queue.force_push(byte)
    }

    /// Remove the oldest byte.
    #[inline]
    pub fn pop(&self) -> Option<u8> {
        self.queue.pop()
    }

    /// Remove up to [`DRAIN_WIDTH`] of the oldest bytes, oldest first.
    ///
    /// Missing bytes are left as `0x00`. Returns the number drained.
    ///
    /// # RT Safety
    ///
    /// RT-safe. At most four lock-free pops.
    #[inline]
    pub fn drain_word(&self, out: &mut [u8; DRAIN_WIDTH]) -> usize {
        let mut drained = 0;
        for slot in out.iter_mut() {
            match self.queue.pop() {
                Some(byte) => {
                    *slot = byte;
                    drained += 1;
                }
                None => *slot = 0,
            }
        }
        drained
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Discard every buffered byte.
    pub fn clear(&self) {
        while self.queue.pop().is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_fifo() {
        let ring = KeyRing::new();
        assert!(ring.is_empty());
        assert_eq!(ring.push(0x04), None);
        assert_eq!(ring.push(0x84), None);
        assert_eq!(ring.pop(), Some(0x04));
        assert_eq!(ring.pop(), Some(0x84));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let ring = KeyRing::new();
        for byte in 1..=16u8 {
            assert_eq!(ring.push(byte), None);
        }
        assert!(ring.is_full());
        assert_eq!(ring.push(17), Some(1));
        assert_eq!(ring.len(), RING_CAPACITY);

        let retained: Vec<u8> = std::iter::from_fn(|| ring.pop()).collect();
        assert_eq!(retained, (2..=17u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_drain_word_pads_with_zero() {
        let ring = KeyRing::new();
        ring.push(0x11);
        ring.push(0x22);

        let mut word = [0xFF; DRAIN_WIDTH];
        assert_eq!(ring.drain_word(&mut word), 2);
        assert_eq!(word, [0x11, 0x22, 0x00, 0x00]);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_drain_word_takes_oldest_four() {
        let ring = KeyRing::new();
        for byte in 1..=6u8 {
            ring.push(byte);
        }
        let mut word = [0; DRAIN_WIDTH];
        assert_eq!(ring.drain_word(&mut word), 4);
        assert_eq!(word, [1, 2, 3, 4]);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_clear() {
        let ring = KeyRing::new();
        ring.push(1);
        ring.push(2);
        ring.clear();
        assert!(ring.is_empty());
    }
}
