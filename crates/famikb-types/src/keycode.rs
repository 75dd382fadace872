//! Canonical keycodes.
//!
//! The canonical set follows the USB HID keyboard usage table for `0x04..=0x65`
//! and diverges from `0x66` upward so every key fits in 7 bits: the Japanese and
//! LANG keys are packed at `0x66..=0x70`, media keys at `0x71..=0x77`, and the
//! eight modifiers at `0x78..=0x7F`. Bit 7 is reserved for the release flag of
//! the wire byte form.

use core::fmt;

/// Layout-independent key identifier (`0x04..=0x7F`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(u8);

impl KeyCode {
    /// "No key" marker, also the padding byte of the serial keyboard stream.
    pub const NONE: Self = Self(0x00);
    /// Too many keys pressed.
    pub const ERR_OVF: Self = Self(0x01);

    pub const A: Self = Self(0x04);
    pub const B: Self = Self(0x05);
    pub const C: Self = Self(0x06);
    pub const D: Self = Self(0x07);
    pub const E: Self = Self(0x08);
    pub const F: Self = Self(0x09);
    pub const G: Self = Self(0x0A);
    pub const H: Self = Self(0x0B);
    pub const I: Self = Self(0x0C);
    pub const J: Self = Self(0x0D);
    pub const K: Self = Self(0x0E);
    pub const L: Self = Self(0x0F);
    pub const M: Self = Self(0x10);
    pub const N: Self = Self(0x11);
    pub const O: Self = Self(0x12);
    pub const P: Self = Self(0x13);
    pub const Q: Self = Self(0x14);
    pub const R: Self = Self(0x15);
    pub const S: Self = Self(0x16);
    pub const T: Self = Self(0x17);
    pub const U: Self = Self(0x18);
    pub const V: Self = Self(0x19);
    pub const W: Self = Self(0x1A);
    pub const X: Self = Self(0x1B);
    pub const Y: Self = Self(0x1C);
    pub const Z: Self = Self(0x1D);
    pub const DIGIT_1: Self = Self(0x1E);
    pub const DIGIT_2: Self = Self(0x1F);
    pub const DIGIT_3: Self = Self(0x20);
    pub const DIGIT_4: Self = Self(0x21);
    pub const DIGIT_5: Self = Self(0x22);
    pub const DIGIT_6: Self = Self(0x23);
    pub const DIGIT_7: Self = Self(0x24);
    pub const DIGIT_8: Self = Self(0x25);
    pub const DIGIT_9: Self = Self(0x26);
    pub const DIGIT_0: Self = Self(0x27);
    pub const ENTER: Self = Self(0x28);
    pub const ESC: Self = Self(0x29);
    pub const BACKSPACE: Self = Self(0x2A);
    pub const TAB: Self = Self(0x2B);
    pub const SPACE: Self = Self(0x2C);
    pub const MINUS: Self = Self(0x2D);
    pub const EQUAL: Self = Self(0x2E);
    pub const LEFTBRACE: Self = Self(0x2F);
    pub const RIGHTBRACE: Self = Self(0x30);
    pub const BACKSLASH: Self = Self(0x31);
    pub const HASHTILDE: Self = Self(0x32);
    pub const SEMICOLON: Self = Self(0x33);
    pub const APOSTROPHE: Self = Self(0x34);
    pub const GRAVE: Self = Self(0x35);
    pub const COMMA: Self = Self(0x36);
    pub const DOT: Self = Self(0x37);
    pub const SLASH: Self = Self(0x38);
    pub const CAPSLOCK: Self = Self(0x39);
    pub const F1: Self = Self(0x3A);
    pub const F2: Self = Self(0x3B);
    pub const F3: Self = Self(0x3C);
    pub const F4: Self = Self(0x3D);
    pub const F5: Self = Self(0x3E);
    pub const F6: Self = Self(0x3F);
    pub const F7: Self = Self(0x40);
    pub const F8: Self = Self(0x41);
    pub const F9: Self = Self(0x42);
    pub const F10: Self = Self(0x43);
    pub const F11: Self = Self(0x44);
    pub const F12: Self = Self(0x45);
    pub const SYSRQ: Self = Self(0x46);
    pub const SCROLLLOCK: Self = Self(0x47);
    pub const PAUSE: Self = Self(0x48);
    pub const INSERT: Self = Self(0x49);
    pub const HOME: Self = Self(0x4A);
    pub const PAGEUP: Self = Self(0x4B);
    pub const DELETE: Self = Self(0x4C);
    pub const END: Self = Self(0x4D);
    pub const PAGEDOWN: Self = Self(0x4E);
    pub const RIGHT: Self = Self(0x4F);
    pub const LEFT: Self = Self(0x50);
    pub const DOWN: Self = Self(0x51);
    pub const UP: Self = Self(0x52);
    pub const NUMLOCK: Self = Self(0x53);
    pub const KPSLASH: Self = Self(0x54);
    pub const KPASTERISK: Self = Self(0x55);
    pub const KPMINUS: Self = Self(0x56);
    pub const KPPLUS: Self = Self(0x57);
    pub const KPENTER: Self = Self(0x58);
    pub const KP1: Self = Self(0x59);
    pub const KP2: Self = Self(0x5A);
    pub const KP3: Self = Self(0x5B);
    pub const KP4: Self = Self(0x5C);
    pub const KP5: Self = Self(0x5D);
    pub const KP6: Self = Self(0x5E);
    pub const KP7: Self = Self(0x5F);
    pub const KP8: Self = Self(0x60);
    pub const KP9: Self = Self(0x61);
    pub const KP0: Self = Self(0x62);
    pub const KPDOT: Self = Self(0x63);
    pub const NON_US_BACKSLASH: Self = Self(0x64);
    pub const COMPOSE: Self = Self(0x65);
    pub const RO: Self = Self(0x66);
    pub const KATAKANAHIRAGANA: Self = Self(0x67);
    pub const YEN: Self = Self(0x68);
    pub const HENKAN: Self = Self(0x69);
    pub const MUHENKAN: Self = Self(0x6A);
    pub const KPJPCOMMA: Self = Self(0x6B);
    pub const HANGEUL: Self = Self(0x6C);
    pub const HANJA: Self = Self(0x6D);
    pub const KATAKANA: Self = Self(0x6E);
    pub const HIRAGANA: Self = Self(0x6F);
    pub const ZENKAKUHANKAKU: Self = Self(0x70);
    pub const MEDIA_PLAYPAUSE: Self = Self(0x71);
    pub const MEDIA_STOPCD: Self = Self(0x72);
    pub const MEDIA_PREVIOUSSONG: Self = Self(0x73);
    pub const MEDIA_NEXTSONG: Self = Self(0x74);
    pub const MEDIA_VOLUMEUP: Self = Self(0x75);
    pub const MEDIA_VOLUMEDOWN: Self = Self(0x76);
    pub const MEDIA_MUTE: Self = Self(0x77);
    pub const LEFTCTRL: Self = Self(0x78);
    pub const LEFTSHIFT: Self = Self(0x79);
    pub const LEFTALT: Self = Self(0x7A);
    pub const LEFTMETA: Self = Self(0x7B);
    pub const RIGHTCTRL: Self = Self(0x7C);
    pub const RIGHTSHIFT: Self = Self(0x7D);
    pub const RIGHTALT: Self = Self(0x7E);
    pub const RIGHTMETA: Self = Self(0x7F);

    /// Lowest keycode that names a real key.
    pub const FIRST: u8 = 0x04;
    /// Highest representable keycode.
    pub const LAST: u8 = 0x7F;

    /// Build a keycode from a raw value, rejecting the reserved range and
    /// anything with bit 7 set.
    #[inline]
    pub const fn new(raw: u8) -> Option<Self> {
        if raw >= Self::FIRST && raw <= Self::LAST {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Raw 7-bit value.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// True for the eight modifier keys (`0x78..=0x7F`).
    #[inline]
    pub const fn is_modifier(self) -> bool {
        self.0 >= Self::LEFTCTRL.0
    }

    /// Modifier key for bit `index` of a HID modifier byte.
    #[inline]
    pub const fn modifier(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self(Self::LEFTCTRL.0 + index))
        } else {
            None
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key:{:#04x}", self.0)
    }
}

impl TryFrom<u8> for KeyCode {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(raw)
    }
}

impl From<KeyCode> for u8 {
    fn from(code: KeyCode) -> Self {
        code.0
    }
}
