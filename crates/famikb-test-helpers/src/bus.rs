//! Scripted bus traffic and output capture.
//!
//! [`ScriptedBus`] plays a fixed sequence of line levels into the responder
//! the way the firmware's edge capture would; [`RecordingSink`] keeps every
//! value the responder drives. [`pump`] is the finite counterpart of
//! `BusResponder::run`.

use std::collections::VecDeque;

use famikb_responder::{
    BitSink, BusResponder, BusSnapshot, BusSource, PORT_ENABLE, PORT_LATCH, PORT_ROW_ADVANCE,
};

/// A queue of bus snapshots built from console-level operations.
///
/// Once the script runs out, `sample` keeps returning the last levels.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBus {
    script: VecDeque<BusSnapshot>,
    current: BusSnapshot,
    row_line: bool,
    enable: bool,
}

impl ScriptedBus {
    /// Empty script, keyboard enabled, every line low.
    pub fn new() -> Self {
        Self {
            enable: true,
            current: BusSnapshot::from_port(PORT_ENABLE, false),
            ..Self::default()
        }
    }

    fn port(&self) -> u8 {
        (if self.row_line { PORT_ROW_ADVANCE } else { 0 })
            | (if self.enable { PORT_ENABLE } else { 0 })
    }

    /// Append a raw snapshot.
    pub fn push(&mut self, snapshot: BusSnapshot) -> &mut Self {
        self.script.push_back(snapshot);
        self
    }

    /// Hold the current levels for one sample.
    pub fn idle(&mut self) -> &mut Self {
        let out = self.port();
        self.push(BusSnapshot::from_port(out, false))
    }

    /// Latch high for one sample, then low.
    pub fn latch(&mut self) -> &mut Self {
        self.row_line = false;
        let out = self.port();
        self.push(BusSnapshot::from_port(out | PORT_LATCH, false));
        self.push(BusSnapshot::from_port(out, false))
    }

    /// Toggle the row-advance line.
    pub fn advance_row(&mut self) -> &mut Self {
        self.row_line = !self.row_line;
        self.idle()
    }

    /// Strobe the clock high then low.
    pub fn clock(&mut self) -> &mut Self {
        let out = self.port();
        self.push(BusSnapshot::from_port(out, true));
        self.push(BusSnapshot::from_port(out, false))
    }

    /// `count` clock strobes.
    pub fn clocks(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.clock();
        }
        self
    }

    pub fn set_enable(&mut self, enable: bool) -> &mut Self {
        self.enable = enable;
        self.idle()
    }

    /// Samples left in the script.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl BusSource for ScriptedBus {
    fn sample(&mut self) -> BusSnapshot {
        if let Some(next) = self.script.pop_front() {
            self.current = next;
        }
        self.current
    }
}

/// Every value driven, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    values: Vec<u8>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn last(&self) -> Option<u8> {
        self.values.last().copied()
    }

    /// D0 of every driven value.
    pub fn mouse_bits(&self) -> Vec<u8> {
        self.values.iter().map(|value| value & 1).collect()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl BitSink for RecordingSink {
    fn drive(&mut self, value: u8) {
        self.values.push(value);
    }
}

/// Step `responder` until the script is exhausted, driving every output into
/// `sink`. Returns the number of iterations.
pub fn pump(responder: &mut BusResponder, bus: &mut ScriptedBus, sink: &mut RecordingSink) -> usize {
    let mut steps = 0;
    while !bus.is_empty() {
        sink.drive(responder.step(bus.sample()));
        steps += 1;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_script_levels() {
        let mut bus = ScriptedBus::new();
        bus.latch();
        assert_eq!(bus.remaining(), 2);
        assert!(bus.sample().latch);
        let released = bus.sample();
        assert!(!released.latch);
        assert!(released.enable);
        // Exhausted scripts hold the last levels.
        assert_eq!(bus.sample(), released);
    }

    #[test]
    fn test_advance_row_toggles() {
        let mut bus = ScriptedBus::new();
        bus.advance_row().advance_row();
        assert!(bus.sample().row_advance);
        assert!(!bus.sample().row_advance);
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.drive(0b1_0001);
        sink.drive(0b0_0010);
        assert_eq!(sink.values(), &[0b1_0001, 0b0_0010]);
        assert_eq!(sink.mouse_bits(), vec![1, 0]);
        assert_eq!(sink.last(), Some(0b0_0010));
    }
}
