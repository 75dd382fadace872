//! Property tests for the per-mode report encoders.

use famikb_report::{
    SUBOR_MAX_MAGNITUDE, decode_hori_track, decode_subor, encode_hori_track, encode_subor,
    pack_word, unpack_word,
};
use famikb_types::{MouseButtons, MouseSnapshot};
use proptest::prelude::*;

fn buttons_strategy() -> impl Strategy<Value = MouseButtons> {
    (0u8..8).prop_map(MouseButtons::from_bits_truncate)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// A Subor report decodes back to the clamped motion and the left/right buttons.
    #[test]
    fn prop_subor_recovers_clamped_motion(
        buttons in buttons_strategy(),
        dx in -400i32..400,
        dy in -400i32..400,
    ) {
        let snapshot = MouseSnapshot::relative(buttons, dx, dy);
        let report = encode_subor(&snapshot);
        prop_assert!(report.len() == 1 || report.len() == 3);

        let decoded = decode_subor(report.as_slice());
        prop_assert!(decoded.is_some());
        if let Some(motion) = decoded {
            let expect = |v: i32| {
                let v = i32::from(famikb_types::saturate_i8(v));
                v.clamp(-SUBOR_MAX_MAGNITUDE, SUBOR_MAX_MAGNITUDE)
            };
            prop_assert_eq!(motion.dx, expect(dx));
            prop_assert_eq!(motion.dy, expect(dy));
            prop_assert_eq!(motion.buttons, buttons - MouseButtons::MIDDLE);
        }
    }

    /// The short form is used exactly when both deltas fit in -1..=1.
    #[test]
    fn prop_subor_short_form_choice(dx in -3i32..=3, dy in -3i32..=3) {
        let report = encode_subor(&MouseSnapshot::relative(MouseButtons::empty(), dx, dy));
        let short = dx.abs() <= 1 && dy.abs() <= 1;
        prop_assert_eq!(report.len() == 1, short);
    }

    /// A Hori Track word always carries its tag and decodes to the nibble-clamped deltas.
    #[test]
    fn prop_hori_recovers_clamped_motion(
        buttons in buttons_strategy(),
        dx in -100i32..100,
        dy in -100i32..100,
    ) {
        let word = encode_hori_track(&MouseSnapshot::relative(buttons, dx, dy));
        let decoded = decode_hori_track(word);
        prop_assert!(decoded.is_some());
        if let Some(motion) = decoded {
            prop_assert_eq!(motion.dx, dx.clamp(-8, 7));
            prop_assert_eq!(motion.dy, dy.clamp(-8, 7));
            prop_assert_eq!(motion.buttons, buttons - MouseButtons::MIDDLE);
        }
    }

    /// Generic words invert every bit of the big-endian bytes.
    #[test]
    fn prop_generic_word_is_inverted(bytes in any::<[u8; 4]>()) {
        let word = pack_word(bytes);
        prop_assert_eq!(word ^ u32::from_be_bytes(bytes), u32::MAX);
        prop_assert_eq!(unpack_word(word), bytes);
    }
}
