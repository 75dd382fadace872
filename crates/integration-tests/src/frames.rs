//! Frame readers built on scripted bus traffic.
//!
//! Every reader queues the console's line changes into a [`ScriptedBus`],
//! pumps them through the responder and picks the samples console software
//! would read out of the recorded outputs.

use famikb_responder::{BusResponder, row_nibble};
use famikb_test_helpers::prelude::*;

/// Latch then advance through `rows` rows; one nibble per row, row 0 first.
pub fn scan_rows(responder: &mut BusResponder, rows: usize) -> Vec<u8> {
    if rows == 0 {
        return Vec::new();
    }
    let mut bus = ScriptedBus::new();
    bus.latch();
    for _ in 1..rows {
        bus.advance_row();
    }
    let mut sink = RecordingSink::new();
    pump(responder, &mut bus, &mut sink);
    // Sample 0 is taken with the latch high.
    sink.values().iter().skip(1).map(|out| row_nibble(*out)).collect()
}

/// Latch then clock out `bits` values, returning the D0 and D1 words,
/// MSB first: `(d1, d0)`.
pub fn shift_words(responder: &mut BusResponder, bits: usize) -> (u32, u32) {
    let mut bus = ScriptedBus::new();
    bus.latch();
    bus.clocks(bits.saturating_sub(1));
    let mut sink = RecordingSink::new();
    pump(responder, &mut bus, &mut sink);

    // Bit 0 follows the latch release; every strobe leaves the next bit on
    // the line until the following rising edge.
    let reads = sink
        .values()
        .iter()
        .skip(1)
        .step_by(2)
        .copied()
        .take(bits);
    reads.fold((0u32, 0u32), |(d1, d0), out| {
        (
            (d1 << 1) | u32::from((out >> 1) & 1),
            (d0 << 1) | u32::from(out & 1),
        )
    })
}

/// The keyboard and mouse registers of one Generic frame, raw (inverted).
pub fn generic_registers(responder: &mut BusResponder) -> (u32, u32) {
    shift_words(responder, 32)
}

/// Read one Subor report: latch, eight bits per byte, a row advance between
/// bytes. Stops once the responder has no bytes left for this frame.
pub fn subor_report(responder: &mut BusResponder) -> Vec<u8> {
    let mut report = Vec::new();
    let mut bus = ScriptedBus::new();
    bus.latch();
    let mut sink = RecordingSink::new();
    pump(responder, &mut bus, &mut sink);

    while responder.pending_report_bytes() > 0 {
        // The first bit is already on D0.
        let mut byte = sink.last().map_or(0, |out| out & 1);
        for _ in 1..8 {
            sink.clear();
            bus.clock();
            pump(responder, &mut bus, &mut sink);
            let bit = sink.values().first().map_or(0, |out| out & 1);
            byte = (byte << 1) | bit;
        }
        report.push(byte);
        sink.clear();
        bus.advance_row();
        pump(responder, &mut bus, &mut sink);
    }
    report
}
