//! Canonical mouse updates.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Mouse buttons in canonical bit positions (HID boot-mouse order).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 0x01;
        const RIGHT = 0x02;
        const MIDDLE = 0x04;
    }
}

bitflags! {
    /// Wheel direction and auxiliary button bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseExtra: u8 {
        const WHEEL_UP = 0x01;
        const WHEEL_DOWN = 0x02;
        const AUX1 = 0x04;
        const AUX2 = 0x08;
    }
}

impl MouseExtra {
    /// Wheel bits for a signed wheel delta (positive = away from the user).
    pub fn from_wheel(delta: i8) -> Self {
        match delta {
            d if d > 0 => Self::WHEEL_UP,
            d if d < 0 => Self::WHEEL_DOWN,
            _ => Self::empty(),
        }
    }
}

/// How the X/Y fields of a mouse update are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MousePositioning {
    /// X/Y are deltas added to the accumulators.
    #[default]
    Relative,
    /// X/Y are a cursor position that replaces the accumulators.
    Absolute,
}

/// One mouse update produced by a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseUpdate {
    pub buttons: MouseButtons,
    pub x: i32,
    pub y: i32,
    pub extra: MouseExtra,
    pub positioning: MousePositioning,
}

impl MouseUpdate {
    pub fn relative(buttons: MouseButtons, dx: i32, dy: i32) -> Self {
        Self {
            buttons,
            x: dx,
            y: dy,
            extra: MouseExtra::empty(),
            positioning: MousePositioning::Relative,
        }
    }

    pub fn absolute(buttons: MouseButtons, x: i32, y: i32) -> Self {
        Self {
            buttons,
            x,
            y,
            extra: MouseExtra::empty(),
            positioning: MousePositioning::Absolute,
        }
    }

    #[must_use]
    pub fn with_extra(mut self, extra: MouseExtra) -> Self {
        self.extra = extra;
        self
    }
}

/// Saturate an accumulator to the signed-byte range used on every wire format.
#[inline]
pub fn saturate_i8(value: i32) -> i8 {
    match i8::try_from(value) {
        Ok(v) => v,
        Err(_) if value < 0 => i8::MIN,
        Err(_) => i8::MAX,
    }
}

/// Mouse state captured once per bus frame.
///
/// In relative mode `x`/`y` are the deltas accumulated since the previous
/// frame; in absolute mode they are the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseSnapshot {
    pub buttons: MouseButtons,
    pub x: i32,
    pub y: i32,
    pub extra: MouseExtra,
    pub positioning: MousePositioning,
}

impl MouseSnapshot {
    /// Relative snapshot, mainly for building reports in tests.
    pub fn relative(buttons: MouseButtons, dx: i32, dy: i32) -> Self {
        Self {
            buttons,
            x: dx,
            y: dy,
            extra: MouseExtra::empty(),
            positioning: MousePositioning::Relative,
        }
    }

    /// X delta saturated to the signed-byte range.
    #[inline]
    pub fn dx(&self) -> i8 {
        saturate_i8(self.x)
    }

    /// Y delta saturated to the signed-byte range.
    #[inline]
    pub fn dy(&self) -> i8 {
        saturate_i8(self.y)
    }

    /// X as a wire byte: two's-complement delta or unsigned position.
    #[inline]
    pub fn x_byte(&self) -> u8 {
        axis_byte(self.x, self.positioning)
    }

    /// Y as a wire byte: two's-complement delta or unsigned position.
    #[inline]
    pub fn y_byte(&self) -> u8 {
        axis_byte(self.y, self.positioning)
    }
}

#[inline]
fn axis_byte(value: i32, positioning: MousePositioning) -> u8 {
    match positioning {
        MousePositioning::Relative => saturate_i8(value).cast_unsigned(),
        MousePositioning::Absolute => u8::try_from(value.clamp(0, 255)).unwrap_or(u8::MAX),
    }
}
