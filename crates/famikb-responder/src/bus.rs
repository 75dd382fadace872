//! Bus levels in, output bits out.

/// `$4016` bit driving the latch / row reset line.
pub const PORT_LATCH: u8 = 0b001;
/// `$4016` bit driving the row-advance line.
pub const PORT_ROW_ADVANCE: u8 = 0b010;
/// `$4016` bit enabling the keyboard.
pub const PORT_ENABLE: u8 = 0b100;

/// Bits of the value handed to a [`BitSink`]: D4..D0.
pub const OUTPUT_MASK: u8 = 0b1_1111;

/// Line levels sampled in one responder iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusSnapshot {
    pub latch: bool,
    pub clock: bool,
    pub row_advance: bool,
    pub enable: bool,
}

impl BusSnapshot {
    /// Decode the three console output bits plus the read strobe level.
    #[inline]
    #[must_use]
    pub const fn from_port(out: u8, clock: bool) -> Self {
        Self {
            latch: out & PORT_LATCH != 0,
            clock,
            row_advance: out & PORT_ROW_ADVANCE != 0,
            enable: out & PORT_ENABLE != 0,
        }
    }

    /// Inverse of [`from_port`](Self::from_port) for the output bits.
    #[inline]
    #[must_use]
    pub const fn port_bits(&self) -> u8 {
        (if self.latch { PORT_LATCH } else { 0 })
            | (if self.row_advance { PORT_ROW_ADVANCE } else { 0 })
            | (if self.enable { PORT_ENABLE } else { 0 })
    }
}

/// Edge capture for the responder loop.
///
/// Implementations must not block; the loop calls `sample` once per
/// iteration and reacts to whatever levels it gets.
pub trait BusSource {
    fn sample(&mut self) -> BusSnapshot;
}

/// Output driver. Receives one 5-bit value per iteration.
pub trait BitSink {
    fn drive(&mut self, value: u8);
}

impl<S: BusSource + ?Sized> BusSource for &mut S {
    fn sample(&mut self) -> BusSnapshot {
        (**self).sample()
    }
}

impl<S: BitSink + ?Sized> BitSink for &mut S {
    fn drive(&mut self, value: u8) {
        (**self).drive(value);
    }
}

/// Edges derived from two consecutive snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusEdges {
    /// Latch level; rows are held at zero while set.
    pub latch_high: bool,
    /// Latch rising edge.
    pub frame_start: bool,
    /// Row-advance level change while the latch is low.
    pub row_advance: bool,
    /// Clock rising edge.
    pub clock: bool,
}

/// Previous-level tracker turning snapshots into [`BusEdges`].
///
/// While the latch is high the row-advance reference is forced low, so a
/// row-advance line left high across a reset counts as one advance once the
/// latch drops.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    latch: bool,
    clock: bool,
    row_reference: bool,
}

impl EdgeDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latch: false,
            clock: false,
            row_reference: false,
        }
    }

    /// # RT Safety
    ///
    /// RT-safe. Pure bit logic.
    #[inline]
    pub fn update(&mut self, snapshot: BusSnapshot) -> BusEdges {
        let frame_start = snapshot.latch && !self.latch;
        let clock = snapshot.clock && !self.clock;
        let row_advance = if snapshot.latch {
            self.row_reference = false;
            false
        } else if snapshot.row_advance != self.row_reference {
            self.row_reference = snapshot.row_advance;
            true
        } else {
            false
        };
        self.latch = snapshot.latch;
        self.clock = snapshot.clock;

        BusEdges {
            latch_high: snapshot.latch,
            frame_start,
            row_advance,
            clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(out: u8) -> BusSnapshot {
        BusSnapshot::from_port(out, false)
    }

    #[test]
    fn test_port_bits_round_trip() {
        for out in 0..8u8 {
            assert_eq!(port(out).port_bits(), out);
        }
    }

    #[test]
    fn test_latch_rising_edge_only_once() {
        let mut edges = EdgeDetector::new();
        assert!(edges.update(port(PORT_LATCH)).frame_start);
        let held = edges.update(port(PORT_LATCH));
        assert!(!held.frame_start);
        assert!(held.latch_high);
    }

    #[test]
    fn test_row_advance_on_both_levels() {
        let mut edges = EdgeDetector::new();
        edges.update(port(0));
        assert!(edges.update(port(PORT_ROW_ADVANCE)).row_advance);
        assert!(!edges.update(port(PORT_ROW_ADVANCE)).row_advance);
        assert!(edges.update(port(0)).row_advance);
    }

    #[test]
    fn test_row_advance_ignored_while_latched() {
        let mut edges = EdgeDetector::new();
        assert!(!edges.update(port(PORT_LATCH | PORT_ROW_ADVANCE)).row_advance);
        assert!(!edges.update(port(PORT_LATCH)).row_advance);
        // Reference was reset low, so a high line after release is a change.
        assert!(edges.update(port(PORT_ROW_ADVANCE)).row_advance);
    }

    #[test]
    fn test_clock_rising_edge() {
        let mut edges = EdgeDetector::new();
        assert!(edges.update(BusSnapshot::from_port(0, true)).clock);
        assert!(!edges.update(BusSnapshot::from_port(0, true)).clock);
        assert!(!edges.update(BusSnapshot::from_port(0, false)).clock);
        assert!(edges.update(BusSnapshot::from_port(0, true)).clock);
    }
}
