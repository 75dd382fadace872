//! Window image layout and the host-side message encoder.

use bitflags::bitflags;
use famikb_types::{
    KeyEvent, MouseButtons, MouseExtra, MousePositioning, MouseSnapshot, MouseUpdate,
    VideoStandard,
};

use crate::{RegbusError, RegbusResult, WINDOW_SIZE};

/// SMBus block length a host writes after the command byte.
pub const BLOCK_LEN: usize = WINDOW_SIZE - 1;

const BLOCK_COUNT: u8 = 5;
const _: () = assert!(BLOCK_COUNT as usize == BLOCK_LEN);

bitflags! {
    /// Window byte 2.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HostFlags: u8 {
        const LEFT = 0x80;
        const RIGHT = 0x40;
        const MOUSE_PRESENT = 0x20;
        const KEYBOARD_PRESENT = 0x10;
        /// X/Y are deltas; clear means an absolute cursor position.
        const RELATIVE = 0x08;
        /// Fixed bits every host writes; ignored on receipt.
        const SIGNATURE = 0x06;
        const MIDDLE = 0x01;
    }
}

/// One decoded window image.
///
/// | Byte | Meaning |
/// |------|---------|
/// | 0 | SMBus block count (not interpreted) |
/// | 1 | key wire byte, `0` for none |
/// | 2 | [`HostFlags`] |
/// | 3 | X: `i8` delta or `u8` position |
/// | 4 | Y: `i8` delta or `u8` position |
/// | 5 | [`MouseExtra`] bits |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostMessage {
    pub key: u8,
    pub flags: HostFlags,
    pub x: u8,
    pub y: u8,
    pub extra: u8,
}

impl HostMessage {
    /// A message carrying only a key event.
    #[must_use]
    pub fn key(event: KeyEvent) -> Self {
        Self {
            key: event.to_wire_byte(),
            flags: HostFlags::KEYBOARD_PRESENT | HostFlags::SIGNATURE,
            ..Self::default()
        }
    }

    /// A message carrying only mouse state. Relative deltas are saturated to
    /// `i8`; absolute positions are clamped to `0..=255`.
    #[must_use]
    pub fn mouse(buttons: MouseButtons, x: i32, y: i32, positioning: MousePositioning) -> Self {
        let mut flags = HostFlags::MOUSE_PRESENT | HostFlags::SIGNATURE;
        flags.set(HostFlags::LEFT, buttons.contains(MouseButtons::LEFT));
        flags.set(HostFlags::RIGHT, buttons.contains(MouseButtons::RIGHT));
        flags.set(HostFlags::MIDDLE, buttons.contains(MouseButtons::MIDDLE));
        flags.set(
            HostFlags::RELATIVE,
            positioning == MousePositioning::Relative,
        );
        let snapshot = MouseSnapshot {
            x,
            y,
            positioning,
            ..MouseSnapshot::default()
        };
        Self {
            key: 0,
            flags,
            x: snapshot.x_byte(),
            y: snapshot.y_byte(),
            extra: 0,
        }
    }

    /// Add a key event to this message.
    #[must_use]
    pub fn with_key(mut self, event: KeyEvent) -> Self {
        self.key = event.to_wire_byte();
        self.flags |= HostFlags::KEYBOARD_PRESENT;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: MouseExtra) -> Self {
        self.extra = extra.bits();
        self
    }

    /// Decode a full window image.
    #[must_use]
    pub fn from_window(window: &[u8; WINDOW_SIZE]) -> Self {
        let [_, key, flags, x, y, extra] = *window;
        Self {
            key,
            flags: HostFlags::from_bits_retain(flags),
            x,
            y,
            extra,
        }
    }

    /// Decode a window image of unchecked length.
    ///
    /// # Errors
    ///
    /// Returns [`RegbusError::InvalidWindowSize`] unless exactly
    /// [`WINDOW_SIZE`] bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> RegbusResult<Self> {
        let Ok(window) = <&[u8; WINDOW_SIZE]>::try_from(bytes) else {
            return Err(RegbusError::InvalidWindowSize {
                expected: WINDOW_SIZE,
                actual: bytes.len(),
            });
        };
        Ok(Self::from_window(window))
    }

    /// The SMBus block data a host sends: key, flags, x, y, extra.
    #[must_use]
    pub fn to_block(&self) -> [u8; BLOCK_LEN] {
        [self.key, self.flags.bits(), self.x, self.y, self.extra]
    }

    /// The window image a well-formed transaction leaves behind.
    #[must_use]
    pub fn to_window(&self) -> [u8; WINDOW_SIZE] {
        let [key, flags, x, y, extra] = self.to_block();
        [BLOCK_COUNT, key, flags, x, y, extra]
    }

    /// Every byte of the write transaction as the slave receives it:
    /// command (register address 0), block count, block data.
    #[must_use]
    pub fn transaction(&self) -> [u8; WINDOW_SIZE + 1] {
        let [count, key, flags, x, y, extra] = self.to_window();
        [0, count, key, flags, x, y, extra]
    }

    /// Key event carried in byte 1, if any.
    #[must_use]
    pub fn key_event(&self) -> Option<KeyEvent> {
        if self.key == 0 {
            None
        } else {
            KeyEvent::from_wire_byte(self.key)
        }
    }

    /// Mouse update carried in bytes 2 to 5; `None` when no mouse is present.
    #[must_use]
    pub fn mouse_update(&self) -> Option<MouseUpdate> {
        if !self.flags.contains(HostFlags::MOUSE_PRESENT) {
            return None;
        }
        let mut buttons = MouseButtons::empty();
        buttons.set(MouseButtons::LEFT, self.flags.contains(HostFlags::LEFT));
        buttons.set(MouseButtons::RIGHT, self.flags.contains(HostFlags::RIGHT));
        buttons.set(MouseButtons::MIDDLE, self.flags.contains(HostFlags::MIDDLE));

        let update = if self.flags.contains(HostFlags::RELATIVE) {
            MouseUpdate::relative(
                buttons,
                i32::from(self.x.cast_signed()),
                i32::from(self.y.cast_signed()),
            )
        } else {
            MouseUpdate::absolute(buttons, i32::from(self.x), i32::from(self.y))
        };
        Some(update.with_extra(MouseExtra::from_bits_truncate(self.extra)))
    }
}

/// Absolute pointer kept by a host, clamped to the visible raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsoluteCursor {
    x: i32,
    y: i32,
    video: VideoStandard,
}

impl AbsoluteCursor {
    /// Cursor at the top-left corner.
    #[must_use]
    pub const fn new(video: VideoStandard) -> Self {
        Self { x: 0, y: 0, video }
    }

    /// Apply a relative motion, clamping to `x <= 255` and the last visible line.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        let (max_x, max_y) = self.video.cursor_bounds();
        self.x = self.x.saturating_add(dx).clamp(0, max_x);
        self.y = self.y.saturating_add(dy).clamp(0, max_y);
    }

    /// Jump to a position, clamped the same way.
    pub fn set(&mut self, x: i32, y: i32) {
        let (max_x, max_y) = self.video.cursor_bounds();
        self.x = x.clamp(0, max_x);
        self.y = y.clamp(0, max_y);
    }

    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[must_use]
    pub const fn video(&self) -> VideoStandard {
        self.video
    }
}
