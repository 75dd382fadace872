//! Property-based tests for the HID boot decoders.

use famikb_hid_boot_protocol::{
    HidReportError, KeyboardDiffer, MouseDecoder, USAGE_ROLLOVER, translate_usage,
};
use famikb_types::{MousePositioning, VideoStandard};
use proptest::prelude::*;

fn key_usage() -> impl Strategy<Value = u8> {
    prop_oneof![Just(0u8), 0x04u8..=0xFF]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Short keyboard reports are always rejected, never panicking.
    #[test]
    fn prop_short_keyboard_report_rejected(data in proptest::collection::vec(any::<u8>(), 0..8)) {
        let mut differ = KeyboardDiffer::new();
        let is_size_error = matches!(
            differ.update(&data),
            Err(HidReportError::InvalidReportSize { .. })
        );
        prop_assert!(is_size_error);
    }

    /// Releasing everything undoes exactly what the first report pressed.
    #[test]
    fn prop_release_mirrors_press(
        modifiers in any::<u8>(),
        keys in proptest::array::uniform6(key_usage()),
    ) {
        prop_assume!(!keys.contains(&USAGE_ROLLOVER));
        let mut differ = KeyboardDiffer::new();
        let mut report = vec![modifiers, 0];
        report.extend_from_slice(&keys);

        let pressed = differ.update(&report);
        prop_assert!(pressed.is_ok());
        let released = differ.update(&[0; 8]);
        prop_assert!(released.is_ok());

        if let (Ok(pressed), Ok(released)) = (pressed, released) {
            prop_assert!(pressed.events.iter().all(|e| e.pressed));
            prop_assert!(released.events.iter().all(|e| !e.pressed));
            let down: Vec<_> = pressed.events.iter().map(|e| e.keycode).collect();
            let up: Vec<_> = released.events.iter().map(|e| e.keycode).collect();
            prop_assert_eq!(down, up);

            let mapped = keys.iter().filter(|k| **k != 0 && translate_usage(**k).is_some()).count();
            prop_assert_eq!(pressed.events.len(), mapped + modifiers.count_ones() as usize);
        }
    }

    /// The absolute cursor never leaves the raster.
    #[test]
    fn prop_absolute_cursor_in_bounds(
        pal: bool,
        moves in proptest::collection::vec((any::<i8>(), any::<i8>()), 1..64),
    ) {
        let video = if pal { VideoStandard::Pal } else { VideoStandard::Ntsc };
        let (max_x, max_y) = video.cursor_bounds();
        let mut decoder = MouseDecoder::new(MousePositioning::Absolute, video);
        for (dx, dy) in moves {
            let update = decoder.update(&[0, dx.cast_unsigned(), dy.cast_unsigned()]);
            prop_assert!(update.is_ok());
            if let Ok(update) = update {
                prop_assert!((0..=max_x).contains(&update.x));
                prop_assert!((0..=max_y).contains(&update.y));
            }
        }
    }
}
