//! Scancode set 2 state machine.

use famikb_types::{KeyCode, KeyEvent};
use tracing::trace;

use crate::layouts::ScancodeLayout;

/// Escape prefix selecting the extended table for the next code.
pub const EXTENDED_PREFIX: u8 = 0xE0;
/// Prefix marking the next code as a key release.
pub const RELEASE_PREFIX: u8 = 0xF0;

/// Prefix state between two bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Idle,
    /// `E0` seen.
    Extended,
    /// `F0` seen.
    PendingRelease,
    /// `E0 F0` seen.
    ExtendedRelease,
}

/// Result of feeding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A prefix byte was absorbed; no event yet.
    Prefix,
    /// A mapped code completed a key transition.
    Event(KeyEvent),
    /// The code has no mapping in the active table. Nothing is emitted.
    Unmapped { code: u8, extended: bool },
}

impl DecodeOutcome {
    /// The key event, if this byte produced one.
    #[must_use]
    pub fn event(self) -> Option<KeyEvent> {
        match self {
            DecodeOutcome::Event(event) => Some(event),
            _ => None,
        }
    }
}

/// Byte-at-a-time decoder for a PS/2 keyboard.
///
/// Both prefix flags are cleared after every non-prefix byte, mapped or not,
/// and the key of an earlier byte is never carried into a later one.
///
/// ```rust
/// use famikb_ps2_protocol::{Ps2Decoder, ScancodeLayout};
/// use famikb_types::{KeyCode, KeyEvent};
///
/// let mut decoder = Ps2Decoder::new(ScancodeLayout::Us104);
/// decoder.feed(0xE0);
/// decoder.feed(0xF0);
/// let outcome = decoder.feed(0x6B);
/// assert_eq!(outcome.event(), Some(KeyEvent::release(KeyCode::LEFT)));
/// ```
#[derive(Debug, Clone)]
pub struct Ps2Decoder {
    layout: ScancodeLayout,
    extended: bool,
    release: bool,
}

impl Ps2Decoder {
    #[must_use]
    pub const fn new(layout: ScancodeLayout) -> Self {
        Self {
            layout,
            extended: false,
            release: false,
        }
    }

    #[must_use]
    pub const fn layout(&self) -> ScancodeLayout {
        self.layout
    }

    #[must_use]
    pub const fn state(&self) -> DecoderState {
        match (self.extended, self.release) {
            (false, false) => DecoderState::Idle,
            (true, false) => DecoderState::Extended,
            (false, true) => DecoderState::PendingRelease,
            (true, true) => DecoderState::ExtendedRelease,
        }
    }

    /// Drop any half-received prefix.
    pub fn reset(&mut self) {
        self.extended = false;
        self.release = false;
    }

    /// Feed one raw byte from the keyboard.
    pub fn feed(&mut self, byte: u8) -> DecodeOutcome {
        match byte {
            EXTENDED_PREFIX => {
                self.extended = true;
                DecodeOutcome::Prefix
            }
            RELEASE_PREFIX => {
                self.release = true;
                DecodeOutcome::Prefix
            }
            code => {
                let extended = self.extended;
                let pressed = !self.release;
                self.reset();
                self.resolve(code, extended, pressed)
            }
        }
    }

    fn resolve(&self, code: u8, extended: bool, pressed: bool) -> DecodeOutcome {
        match self.layout.lookup(code, extended) {
            Some(keycode) => DecodeOutcome::Event(KeyEvent { keycode, pressed }),
            None => {
                trace!(code, extended, layout = self.layout.name(), "unmapped scancode");
                DecodeOutcome::Unmapped { code, extended }
            }
        }
    }

    /// Feed a whole byte sequence, handing every produced event to `sink`.
    ///
    /// Returns the number of unmapped codes seen.
    pub fn feed_all(&mut self, bytes: &[u8], mut sink: impl FnMut(KeyEvent)) -> usize {
        let mut unmapped = 0;
        for byte in bytes {
            match self.feed(*byte) {
                DecodeOutcome::Event(event) => sink(event),
                DecodeOutcome::Unmapped { .. } => unmapped += 1,
                DecodeOutcome::Prefix => {}
            }
        }
        unmapped
    }
}

/// The make-code sequence a keyboard sends for `key`, if the layout has one.
///
/// Used by host tools and tests to synthesise traffic.
#[must_use]
pub fn encode_key(layout: ScancodeLayout, event: KeyEvent) -> Option<([u8; 3], usize)> {
    let (code, extended) = raw_code(layout, event.keycode)?;
    let mut out = [0u8; 3];
    let mut len = 0;
    for byte in [
        extended.then_some(EXTENDED_PREFIX),
        (!event.pressed).then_some(RELEASE_PREFIX),
        Some(code),
    ]
    .into_iter()
    .flatten()
    {
        if let Some(slot) = out.get_mut(len) {
            *slot = byte;
            len += 1;
        }
    }
    Some((out, len))
}

fn raw_code(layout: ScancodeLayout, key: KeyCode) -> Option<(u8, bool)> {
    (0..=u8::MAX)
        .filter(|code| *code != EXTENDED_PREFIX && *code != RELEASE_PREFIX)
        .find_map(|code| {
            if layout.lookup(code, false) == Some(key) {
                Some((code, false))
            } else if layout.lookup(code, true) == Some(key) {
                Some((code, true))
            } else {
                None
            }
        })
}
