//! Subor mouse reports.
//!
//! Small motion fits one byte:
//!
//! ```text
//! L R dx1 dx0 dy1 dy0 0 0        two's-complement 2-bit deltas
//! ```
//!
//! Anything larger takes three bytes, tagged in bits 1-0:
//!
//! ```text
//! L R sx hx sy hy 0 1            sign and bit 4 of each magnitude
//! 0 0 x3 x2 x1 x0 1 0            low nibble of |dx|
//! 0 0 y3 y2 y1 y0 1 1            low nibble of |dy|
//! ```
//!
//! Magnitudes saturate at 31.

use famikb_types::{MouseButtons, MouseSnapshot};

/// Largest magnitude the three-byte form carries.
pub const SUBOR_MAX_MAGNITUDE: i32 = 31;

const TAG_MASK: u8 = 0b11;
const TAG_SHORT: u8 = 0b00;
const TAG_HEAD: u8 = 0b01;
const TAG_X: u8 = 0b10;
const TAG_Y: u8 = 0b11;

/// One encoded Subor report, one or three bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuborReport {
    bytes: [u8; 3],
    len: usize,
}

impl SuborReport {
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.bytes.get(..self.len).unwrap_or_default()
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte `index`, or `0` past the end of the report.
    #[inline]
    #[must_use]
    pub fn byte(&self, index: usize) -> u8 {
        self.as_slice().get(index).copied().unwrap_or(0)
    }
}

/// Decoded report contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuborMotion {
    pub buttons: MouseButtons,
    pub dx: i32,
    pub dy: i32,
}

/// Build the report for one frame.
#[must_use]
pub fn encode_subor(snapshot: &MouseSnapshot) -> SuborReport {
    let dx = i32::from(snapshot.dx());
    let dy = i32::from(snapshot.dy());
    let head = button_bits(snapshot.buttons);

    if dx.abs() <= 1 && dy.abs() <= 1 {
        let byte = head | (two_bit(dx) << 4) | (two_bit(dy) << 2) | TAG_SHORT;
        return SuborReport {
            bytes: [byte, 0, 0],
            len: 1,
        };
    }

    let (sx, mx) = sign_magnitude(dx);
    let (sy, my) = sign_magnitude(dy);
    let byte0 = head
        | (u8::from(sx) << 5)
        | (((mx >> 4) & 1) << 4)
        | (u8::from(sy) << 3)
        | (((my >> 4) & 1) << 2)
        | TAG_HEAD;
    let byte1 = ((mx & 0x0F) << 2) | TAG_X;
    let byte2 = ((my & 0x0F) << 2) | TAG_Y;
    SuborReport {
        bytes: [byte0, byte1, byte2],
        len: 3,
    }
}

/// Decode a one- or three-byte report. Returns `None` for a malformed one.
#[must_use]
pub fn decode_subor(bytes: &[u8]) -> Option<SuborMotion> {
    match bytes {
        [byte] if byte & TAG_MASK == TAG_SHORT => Some(SuborMotion {
            buttons: buttons_from(*byte),
            dx: from_two_bit(byte >> 4),
            dy: from_two_bit(byte >> 2),
        }),
        [b0, b1, b2]
            if b0 & TAG_MASK == TAG_HEAD && b1 & TAG_MASK == TAG_X && b2 & TAG_MASK == TAG_Y =>
        {
            let mx = i32::from((((b0 >> 4) & 1) << 4) | ((b1 >> 2) & 0x0F));
            let my = i32::from((((b0 >> 2) & 1) << 4) | ((b2 >> 2) & 0x0F));
            Some(SuborMotion {
                buttons: buttons_from(*b0),
                dx: if b0 & 0x20 != 0 { -mx } else { mx },
                dy: if b0 & 0x08 != 0 { -my } else { my },
            })
        }
        _ => None,
    }
}

fn button_bits(buttons: MouseButtons) -> u8 {
    (u8::from(buttons.contains(MouseButtons::LEFT)) << 7)
        | (u8::from(buttons.contains(MouseButtons::RIGHT)) << 6)
}

fn buttons_from(byte: u8) -> MouseButtons {
    let mut buttons = MouseButtons::empty();
    buttons.set(MouseButtons::LEFT, byte & 0x80 != 0);
    buttons.set(MouseButtons::RIGHT, byte & 0x40 != 0);
    buttons
}

fn two_bit(value: i32) -> u8 {
    match value {
        -1 => 0b11,
        1 => 0b01,
        _ => 0b00,
    }
}

fn from_two_bit(bits: u8) -> i32 {
    match bits & 0b11 {
        0b01 => 1,
        0b11 => -1,
        _ => 0,
    }
}

fn sign_magnitude(value: i32) -> (bool, u8) {
    let magnitude = value.unsigned_abs().min(SUBOR_MAX_MAGNITUDE.unsigned_abs());
    (value < 0, u8::try_from(magnitude).unwrap_or(0x1F))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(buttons: MouseButtons, dx: i32, dy: i32) -> MouseSnapshot {
        MouseSnapshot::relative(buttons, dx, dy)
    }

    #[test]
    fn test_small_motion_is_one_byte() {
        let report = encode_subor(&snap(MouseButtons::LEFT, -1, 1));
        assert_eq!(report.as_slice(), &[0b1011_0100]);
    }

    #[test]
    fn test_idle_is_one_zero_byte() {
        let report = encode_subor(&snap(MouseButtons::empty(), 0, 0));
        assert_eq!(report.as_slice(), &[0]);
        assert_eq!(report.byte(1), 0);
    }

    #[test]
    fn test_large_motion_is_three_bytes() {
        let report = encode_subor(&snap(MouseButtons::RIGHT, 18, -2));
        assert_eq!(
            report.as_slice(),
            &[0b0101_1001, 0b0000_1010, 0b0000_1011]
        );
    }

    #[test]
    fn test_magnitude_saturates_at_31() {
        let report = encode_subor(&snap(MouseButtons::empty(), -200, 40));
        let motion = decode_subor(report.as_slice());
        assert_eq!(
            motion,
            Some(SuborMotion {
                buttons: MouseButtons::empty(),
                dx: -31,
                dy: 31
            })
        );
    }

    #[test]
    fn test_decode_rejects_bad_tags() {
        assert_eq!(decode_subor(&[0b0000_0001]), None);
        assert_eq!(decode_subor(&[0b01, 0b11, 0b10]), None);
        assert_eq!(decode_subor(&[]), None);
        assert_eq!(decode_subor(&[0, 0]), None);
    }

    #[test]
    fn test_middle_button_is_not_carried() {
        let report = encode_subor(&snap(MouseButtons::MIDDLE, 0, 0));
        assert_eq!(report.as_slice(), &[0]);
    }
}
