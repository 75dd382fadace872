//! Generic mode: raw bytes shifted out as inverted 32-bit words.

use famikb_types::MouseSnapshot;

/// Pack four bytes big-endian and invert them for the wire.
#[inline]
#[must_use]
pub const fn pack_word(bytes: [u8; 4]) -> u32 {
    !u32::from_be_bytes(bytes)
}

/// Inverse of [`pack_word`].
#[inline]
#[must_use]
pub const fn unpack_word(word: u32) -> [u8; 4] {
    (!word).to_be_bytes()
}

/// Mouse register for one frame: buttons, X, Y, extra.
#[inline]
#[must_use]
pub fn mouse_word(snapshot: &MouseSnapshot) -> u32 {
    pack_word([
        snapshot.buttons.bits(),
        snapshot.x_byte(),
        snapshot.y_byte(),
        snapshot.extra.bits(),
    ])
}

/// Keyboard register for one frame: the oldest four ring bytes, `0x00` padded.
#[inline]
#[must_use]
pub const fn keyboard_word(bytes: [u8; 4]) -> u32 {
    pack_word(bytes)
}
