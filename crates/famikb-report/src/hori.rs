//! Hori Track trackball word.
//!
//! ```text
//! 31 30 | 29..26  | 25..22  | 21 20  | 19..16 | 15..0
//!  L  R | ~dy[3:0]| ~dx[3:0]| up down|  1000  | 0
//! ```
//!
//! Deltas are clamped to a signed nibble (`-8..=7`) and sent one's
//! complemented.

use famikb_types::{MouseButtons, MouseExtra, MouseSnapshot};

/// Fixed tag in bits 19-16.
pub const HORI_TAG: u32 = 0b1000;

const DELTA_MIN: i32 = -8;
const DELTA_MAX: i32 = 7;

/// Contents of one Hori Track word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoriMotion {
    pub buttons: MouseButtons,
    pub dx: i32,
    pub dy: i32,
    pub wheel: MouseExtra,
}

/// Build the word for one frame.
#[must_use]
pub fn encode_hori_track(snapshot: &MouseSnapshot) -> u32 {
    let left = u32::from(snapshot.buttons.contains(MouseButtons::LEFT));
    let right = u32::from(snapshot.buttons.contains(MouseButtons::RIGHT));
    let up = u32::from(snapshot.extra.contains(MouseExtra::WHEEL_UP));
    let down = u32::from(snapshot.extra.contains(MouseExtra::WHEEL_DOWN));

    (left << 31)
        | (right << 30)
        | (complemented_nibble(snapshot.y) << 26)
        | (complemented_nibble(snapshot.x) << 22)
        | (up << 21)
        | (down << 20)
        | (HORI_TAG << 16)
}

/// Decode a word, `None` when the tag or the low half is wrong.
#[must_use]
pub fn decode_hori_track(word: u32) -> Option<HoriMotion> {
    if (word >> 16) & 0x0F != HORI_TAG || word & 0xFFFF != 0 {
        return None;
    }
    let mut buttons = MouseButtons::empty();
    buttons.set(MouseButtons::LEFT, word & (1 << 31) != 0);
    buttons.set(MouseButtons::RIGHT, word & (1 << 30) != 0);
    let mut wheel = MouseExtra::empty();
    wheel.set(MouseExtra::WHEEL_UP, word & (1 << 21) != 0);
    wheel.set(MouseExtra::WHEEL_DOWN, word & (1 << 20) != 0);

    Some(HoriMotion {
        buttons,
        dx: from_complemented_nibble(word >> 22),
        dy: from_complemented_nibble(word >> 26),
        wheel,
    })
}

fn complemented_nibble(delta: i32) -> u32 {
    let nibble = delta.clamp(DELTA_MIN, DELTA_MAX).cast_unsigned() & 0x0F;
    !nibble & 0x0F
}

fn from_complemented_nibble(bits: u32) -> i32 {
    let nibble = !bits & 0x0F;
    if nibble & 0x08 != 0 {
        nibble.cast_signed() - 16
    } else {
        nibble.cast_signed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_word() {
        let word = encode_hori_track(&MouseSnapshot::default());
        assert_eq!(word, 0x3FC8_0000);
    }

    #[test]
    fn test_buttons_in_top_bits() {
        let word = encode_hori_track(&MouseSnapshot::relative(
            MouseButtons::LEFT | MouseButtons::RIGHT,
            0,
            0,
        ));
        assert_eq!(word >> 30, 0b11);
    }

    #[test]
    fn test_deltas_clamp_to_nibble() {
        let word = encode_hori_track(&MouseSnapshot::relative(MouseButtons::empty(), 100, -100));
        let motion = decode_hori_track(word);
        assert_eq!(motion.map(|m| (m.dx, m.dy)), Some((7, -8)));
    }

    #[test]
    fn test_wheel_bits() {
        let snapshot = MouseSnapshot {
            extra: MouseExtra::WHEEL_DOWN,
            ..MouseSnapshot::default()
        };
        let word = encode_hori_track(&snapshot);
        assert_eq!((word >> 20) & 0b11, 0b01);
    }

    #[test]
    fn test_decode_rejects_bad_tag() {
        assert_eq!(decode_hori_track(0), None);
        assert_eq!(decode_hori_track(0x3FC8_0001), None);
    }
}
