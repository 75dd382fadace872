//! Decoder and responder contexts on their own threads, sharing only the
//! state block.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam::channel;
use famikb_integration_tests::fixtures::boot_mode;
use famikb_integration_tests::frames::{generic_registers, scan_rows};
use famikb_report::unpack_word;
use famikb_test_helpers::prelude::*;
use famikb_types::{Mode, MouseButtons, MouseUpdate};
use tracing::info;

const DEADLINE: Duration = Duration::from_secs(5);

#[test]
fn test_serial_key_visible_to_responder_thread() -> TestResult {
    let bridge = boot_mode(Mode::FamilyBasic)?;
    let state = Arc::clone(bridge.state());
    let (mut responder, mut decoders) = bridge.into_parts();
    let (bytes_tx, bytes_rx) = channel::bounded::<u8>(16);

    let seen = crossbeam::scope(|scope| {
        scope.spawn(move |_| {
            for byte in bytes_rx {
                decoders.feed_serial(byte);
            }
        });
        let scanner = scope.spawn(move |_| {
            let start = Instant::now();
            while start.elapsed() < DEADLINE {
                let rows = scan_rows(&mut responder, 18);
                if rows.get(12).copied() == Some(0b1000) {
                    return Some(rows);
                }
                std::thread::yield_now();
            }
            None
        });

        // Make code for A.
        let sent = bytes_tx.send(0x1C);
        drop(bytes_tx);
        sent.ok().and_then(|()| scanner.join().ok().flatten())
    })
    .or(Err("a pipeline thread panicked"))?;

    let rows = seen.ok_or("responder never saw the key")?;
    assert_eq!(rows.iter().filter(|nibble| **nibble != 0).count(), 1);
    assert!(state.counters().frames() >= 1);
    info!(frames = state.counters().frames(), "key seen across threads");
    Ok(())
}

#[test]
fn test_mouse_motion_accumulates_across_frames() -> TestResult {
    let bridge = boot_mode(Mode::Generic)?;
    let state = Arc::clone(bridge.state());
    let (mut responder, _decoders) = bridge.into_parts();
    let (done_tx, done_rx) = channel::bounded::<()>(1);

    let total = crossbeam::scope(|scope| {
        scope.spawn(move |_| {
            for _ in 0..50 {
                state.apply_mouse_update(&MouseUpdate::relative(MouseButtons::empty(), 1, -1));
            }
            if done_tx.send(()).is_err() {
                tracing::warn!("reader hung up before the writer finished");
            }
        });

        let mut total = (0i32, 0i32);
        let mut writer_done = false;
        loop {
            // Stop at the first empty frame taken after the writer finished.
            let finished = writer_done;
            writer_done = writer_done || done_rx.try_recv().is_ok();
            let (_, mouse) = generic_registers(&mut responder);
            let [_, x, y, _] = unpack_word(mouse);
            let (dx, dy) = (i32::from(x.cast_signed()), i32::from(y.cast_signed()));
            total = (total.0 + dx, total.1 + dy);
            if finished && dx == 0 && dy == 0 {
                break;
            }
        }
        total
    })
    .or(Err("a pipeline thread panicked"))?;

    // Every delta reaches exactly one frame; nothing is lost or doubled.
    assert_eq!(total, (50, -50));
    Ok(())
}
