//! Scancode set 2 tables: raw code to canonical key.
//!
//! Lookups scan linearly and the first match wins, so a layout's overrides
//! are consulted before the base table they extend.

use famikb_types::KeyCode;
use serde::{Deserialize, Serialize};

/// Physical keyboard layout of the attached PS/2 keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScancodeLayout {
    /// 104-key ANSI.
    #[default]
    Us104,
    /// 106-key JIS.
    Jis106,
}

impl ScancodeLayout {
    /// Canonical key for a raw code, using the extended table after `0xE0`.
    #[must_use]
    pub fn lookup(self, code: u8, extended: bool) -> Option<KeyCode> {
        if extended {
            return find(US104_EXTENDED, code);
        }
        match self {
            ScancodeLayout::Us104 => find(US104_NORMAL, code),
            ScancodeLayout::Jis106 => {
                find(JIS106_OVERRIDES, code).or_else(|| find(US104_NORMAL, code))
            }
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ScancodeLayout::Us104 => "us104",
            ScancodeLayout::Jis106 => "jis106",
        }
    }
}

fn find(table: &[(u8, KeyCode)], code: u8) -> Option<KeyCode> {
    table
        .iter()
        .find(|(raw, _)| *raw == code)
        .map(|(_, key)| *key)
}

#[rustfmt::skip]
static US104_NORMAL: &[(u8, KeyCode)] = &[
    (0x76, KeyCode::ESC),
    (0x05, KeyCode::F1), (0x06, KeyCode::F2), (0x04, KeyCode::F3), (0x0C, KeyCode::F4),
    (0x03, KeyCode::F5), (0x0B, KeyCode::F6), (0x83, KeyCode::F7), (0x0A, KeyCode::F8),
    (0x16, KeyCode::DIGIT_1), (0x1E, KeyCode::DIGIT_2), (0x26, KeyCode::DIGIT_3),
    (0x25, KeyCode::DIGIT_4), (0x2E, KeyCode::DIGIT_5), (0x36, KeyCode::DIGIT_6),
    (0x3D, KeyCode::DIGIT_7), (0x3E, KeyCode::DIGIT_8), (0x46, KeyCode::DIGIT_9),
    (0x45, KeyCode::DIGIT_0),
    (0x4E, KeyCode::MINUS), (0x66, KeyCode::BACKSPACE), (0x0D, KeyCode::TAB),
    (0x15, KeyCode::Q), (0x1D, KeyCode::W), (0x24, KeyCode::E), (0x2D, KeyCode::R),
    (0x2C, KeyCode::T), (0x35, KeyCode::Y), (0x3C, KeyCode::U), (0x43, KeyCode::I),
    (0x44, KeyCode::O), (0x4D, KeyCode::P),
    (0x54, KeyCode::LEFTBRACE), (0x5B, KeyCode::RIGHTBRACE),
    (0x1C, KeyCode::A), (0x1B, KeyCode::S), (0x23, KeyCode::D), (0x2B, KeyCode::F),
    (0x34, KeyCode::G), (0x33, KeyCode::H), (0x3B, KeyCode::J), (0x42, KeyCode::K),
    (0x4B, KeyCode::L),
    (0x4C, KeyCode::SEMICOLON), (0x52, KeyCode::APOSTROPHE), (0x5A, KeyCode::ENTER),
    (0x12, KeyCode::LEFTSHIFT),
    (0x1A, KeyCode::Z), (0x22, KeyCode::X), (0x21, KeyCode::C), (0x2A, KeyCode::V),
    (0x32, KeyCode::B), (0x31, KeyCode::N), (0x3A, KeyCode::M),
    (0x41, KeyCode::COMMA), (0x49, KeyCode::DOT), (0x4A, KeyCode::SLASH),
    (0x59, KeyCode::RIGHTSHIFT), (0x14, KeyCode::LEFTCTRL), (0x11, KeyCode::LEFTALT),
    (0x29, KeyCode::SPACE), (0x58, KeyCode::CAPSLOCK),
    (0x0E, KeyCode::GRAVE), (0x5D, KeyCode::BACKSLASH),
    (0x01, KeyCode::F9), (0x09, KeyCode::F10), (0x78, KeyCode::F11), (0x07, KeyCode::F12),
    (0x55, KeyCode::EQUAL),
    (0x77, KeyCode::NUMLOCK), (0x7C, KeyCode::KPASTERISK), (0x7B, KeyCode::KPMINUS),
    (0x79, KeyCode::KPPLUS), (0x71, KeyCode::KPDOT),
    (0x70, KeyCode::KP0), (0x69, KeyCode::KP1), (0x72, KeyCode::KP2), (0x7A, KeyCode::KP3),
    (0x6B, KeyCode::KP4), (0x73, KeyCode::KP5), (0x74, KeyCode::KP6), (0x6C, KeyCode::KP7),
    (0x75, KeyCode::KP8), (0x7D, KeyCode::KP9),
    (0x7E, KeyCode::SCROLLLOCK),
];

#[rustfmt::skip]
static US104_EXTENDED: &[(u8, KeyCode)] = &[
    (0x6B, KeyCode::LEFT), (0x72, KeyCode::DOWN), (0x74, KeyCode::RIGHT), (0x75, KeyCode::UP),
    (0x6C, KeyCode::HOME), (0x70, KeyCode::INSERT), (0x71, KeyCode::DELETE), (0x69, KeyCode::END),
    (0x7D, KeyCode::PAGEUP), (0x7A, KeyCode::PAGEDOWN),
    (0x14, KeyCode::RIGHTCTRL), (0x11, KeyCode::RIGHTALT),
    (0x1F, KeyCode::LEFTMETA), (0x27, KeyCode::RIGHTMETA), (0x2F, KeyCode::COMPOSE),
    (0x5A, KeyCode::KPENTER), (0x4A, KeyCode::KPSLASH),
];

// JIS keeps the ANSI positions except where the legends moved: `@` and `^`
// both land on the grave key, `[`/`]` shift one position right.
#[rustfmt::skip]
static JIS106_OVERRIDES: &[(u8, KeyCode)] = &[
    (0x13, KeyCode::KATAKANAHIRAGANA), (0x6A, KeyCode::YEN), (0x51, KeyCode::RO),
    (0x64, KeyCode::HENKAN), (0x67, KeyCode::MUHENKAN), (0x0E, KeyCode::ZENKAKUHANKAKU),
    (0x54, KeyCode::GRAVE), (0x55, KeyCode::GRAVE),
    (0x5B, KeyCode::LEFTBRACE), (0x5D, KeyCode::RIGHTBRACE),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us104_normal() {
        let layout = ScancodeLayout::Us104;
        assert_eq!(layout.lookup(0x1C, false), Some(KeyCode::A));
        assert_eq!(layout.lookup(0x83, false), Some(KeyCode::F7));
        assert_eq!(layout.lookup(0x5D, false), Some(KeyCode::BACKSLASH));
        assert_eq!(layout.lookup(0x13, false), None);
    }

    #[test]
    fn test_extended_table_is_shared() {
        for layout in [ScancodeLayout::Us104, ScancodeLayout::Jis106] {
            assert_eq!(layout.lookup(0x6B, true), Some(KeyCode::LEFT));
            assert_eq!(layout.lookup(0x14, true), Some(KeyCode::RIGHTCTRL));
            assert_eq!(layout.lookup(0x4A, true), Some(KeyCode::KPSLASH));
            assert_eq!(layout.lookup(0x1C, true), None);
        }
    }

    #[test]
    fn test_normal_and_extended_differ() {
        let layout = ScancodeLayout::Us104;
        assert_eq!(layout.lookup(0x6B, false), Some(KeyCode::KP4));
        assert_eq!(layout.lookup(0x5A, false), Some(KeyCode::ENTER));
        assert_eq!(layout.lookup(0x5A, true), Some(KeyCode::KPENTER));
    }

    #[test]
    fn test_jis_overrides() {
        let layout = ScancodeLayout::Jis106;
        assert_eq!(layout.lookup(0x13, false), Some(KeyCode::KATAKANAHIRAGANA));
        assert_eq!(layout.lookup(0x6A, false), Some(KeyCode::YEN));
        assert_eq!(layout.lookup(0x5D, false), Some(KeyCode::RIGHTBRACE));
        assert_eq!(layout.lookup(0x1C, false), Some(KeyCode::A));
    }

    #[test]
    fn test_tables_have_no_duplicate_codes() {
        for table in [US104_NORMAL, US104_EXTENDED, JIS106_OVERRIDES] {
            for (i, (code, _)) in table.iter().enumerate() {
                let later = table.iter().skip(i + 1).any(|(other, _)| other == code);
                assert!(!later, "duplicate raw code {code:#04x}");
            }
        }
    }
}
