//! Canonical key events and fixed-capacity event batches.

use crate::KeyCode;

/// Release flag of the wire byte form.
pub const RELEASE_BIT: u8 = 0x80;

/// A single key transition, independent of the input protocol it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub keycode: KeyCode,
    pub pressed: bool,
}

impl KeyEvent {
    #[inline]
    pub const fn press(keycode: KeyCode) -> Self {
        Self {
            keycode,
            pressed: true,
        }
    }

    #[inline]
    pub const fn release(keycode: KeyCode) -> Self {
        Self {
            keycode,
            pressed: false,
        }
    }

    /// Encode as `keycode | (released << 7)`.
    #[inline]
    pub const fn to_wire_byte(self) -> u8 {
        if self.pressed {
            self.keycode.raw()
        } else {
            self.keycode.raw() | RELEASE_BIT
        }
    }

    /// Decode a wire byte. `0x00` (no data) and bytes whose low 7 bits are
    /// not a real key yield `None`.
    #[inline]
    pub const fn from_wire_byte(byte: u8) -> Option<Self> {
        match KeyCode::new(byte & !RELEASE_BIT) {
            Some(keycode) => Some(Self {
                keycode,
                pressed: byte & RELEASE_BIT == 0,
            }),
            None => None,
        }
    }
}

/// Fixed-capacity list of key events produced by a single decoder step.
///
/// Decoders run in contexts where allocation is not allowed, so a report diff
/// collects its events here instead of in a `Vec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEventBatch {
    events: [KeyEvent; KeyEventBatch::CAPACITY],
    len: usize,
}

impl KeyEventBatch {
    /// Six key slots (press + release each) plus eight modifier bits.
    pub const CAPACITY: usize = 20;

    pub const fn new() -> Self {
        Self {
            events: [KeyEvent::release(KeyCode::A); Self::CAPACITY],
            len: 0,
        }
    }

    /// Append an event.
    ///
    /// # Errors
    ///
    /// Returns the event back if the batch is full.
    pub fn push(&mut self, event: KeyEvent) -> Result<(), KeyEvent> {
        match self.events.get_mut(self.len) {
            Some(slot) => {
                *slot = event;
                self.len += 1;
                Ok(())
            }
            None => Err(event),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[KeyEvent] {
        self.events.get(..self.len).unwrap_or(&[])
    }

    pub fn iter(&self) -> core::slice::Iter<'_, KeyEvent> {
        self.as_slice().iter()
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for KeyEventBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a KeyEventBatch {
    type Item = &'a KeyEvent;
    type IntoIter = core::slice::Iter<'a, KeyEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
