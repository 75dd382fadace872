//! Property tests for the canonical event types.

use famikb_types::{KeyCode, KeyEvent, saturate_i8};
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Every byte whose low 7 bits name a key decodes, and re-encodes to itself.
    #[test]
    fn prop_wire_byte_is_canonical(byte in any::<u8>()) {
        match KeyEvent::from_wire_byte(byte) {
            Some(event) => prop_assert_eq!(event.to_wire_byte(), byte),
            None => prop_assert!((byte & 0x7F) < KeyCode::FIRST),
        }
    }

    /// Release events always carry bit 7, presses never do.
    #[test]
    fn prop_release_bit_matches_pressed(raw in KeyCode::FIRST..=KeyCode::LAST, pressed in any::<bool>()) {
        let keycode = KeyCode::new(raw);
        prop_assert!(keycode.is_some());
        if let Some(keycode) = keycode {
            let event = KeyEvent { keycode, pressed };
            prop_assert_eq!(event.to_wire_byte() & 0x80 == 0, pressed);
        }
    }

    /// Saturation is the identity inside the i8 range and clamps outside it.
    #[test]
    fn prop_saturate_i8(value in any::<i32>()) {
        let clamped = i32::from(saturate_i8(value));
        prop_assert_eq!(clamped, value.clamp(-128, 127));
    }
}
