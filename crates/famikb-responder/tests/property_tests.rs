//! Property tests for the bus responder.

use std::sync::Arc;

use famikb_responder::{
    BusResponder, BusSnapshot, OUTPUT_MASK, PORT_ENABLE, PORT_LATCH, PORT_ROW_ADVANCE,
};
use famikb_state::SharedState;
use famikb_types::{KeyCode, KeyEvent, Mode, MouseButtons, MouseUpdate};
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Generic),
        Just(Mode::FamilyBasic),
        Just(Mode::Subor),
        Just(Mode::HoriTrack),
    ]
}

fn snapshot_strategy() -> impl Strategy<Value = BusSnapshot> {
    (0u8..8, any::<bool>()).prop_map(|(out, clock)| BusSnapshot::from_port(out, clock))
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Arbitrary bus traffic never selects a row outside the mode's matrix
    /// and never drives bits above D4.
    #[test]
    fn prop_row_and_output_bounded(
        mode in mode_strategy(),
        snapshots in proptest::collection::vec(snapshot_strategy(), 0..200),
        keys in proptest::collection::vec(KeyCode::FIRST..=KeyCode::LAST, 0..10),
    ) {
        let state = Arc::new(SharedState::new(mode));
        for raw in keys {
            if let Some(key) = KeyCode::new(raw) {
                state.apply_key_event(KeyEvent::press(key));
            }
        }
        let mut responder = BusResponder::new(Arc::clone(&state));
        for snapshot in snapshots {
            let out = responder.step(snapshot);
            prop_assert_eq!(out & !OUTPUT_MASK, 0);
            prop_assert!(responder.row() < mode.matrix_rows().max(1));
        }
    }

    /// A Subor report stays in flight for exactly as many row advances as it
    /// has bytes.
    #[test]
    fn prop_subor_remaining_matches_report_len(dx in -40i32..40, dy in -40i32..40) {
        let state = Arc::new(SharedState::new(Mode::Subor));
        state.apply_mouse_update(&MouseUpdate::relative(MouseButtons::empty(), dx, dy));
        let mut responder = BusResponder::new(Arc::clone(&state));

        responder.step(BusSnapshot::from_port(PORT_LATCH | PORT_ENABLE, false));
        responder.step(BusSnapshot::from_port(PORT_ENABLE, false));
        let len = if dx.abs() <= 1 && dy.abs() <= 1 { 1 } else { 3 };
        prop_assert_eq!(responder.pending_report_bytes(), len);

        let mut line = false;
        for advanced in 1..=len {
            line = !line;
            let out = if line { PORT_ROW_ADVANCE | PORT_ENABLE } else { PORT_ENABLE };
            responder.step(BusSnapshot::from_port(out, false));
            prop_assert_eq!(responder.pending_report_bytes(), len - advanced);
        }
    }
}
