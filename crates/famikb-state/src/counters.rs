//! Diagnostic counters shared by the decoder and responder contexts.
//!
//! # RT Safety
//!
//! Every `inc_*`/`record_*` method is a single relaxed atomic add:
//! - No heap allocations
//! - No blocking
//! - Bounded execution time

use core::sync::atomic::{AtomicU64, Ordering};

use famikb_errors::FaultCode;

/// Counter snapshot returned by [`DiagnosticCounters::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticSnapshot {
    /// Latch rising edges seen by the responder.
    pub frames: u64,
    /// Row-advance edges seen by the responder.
    pub row_advances: u64,
    /// Key events applied to the matrix or ring.
    pub key_events: u64,
    /// Mouse updates applied to the accumulator.
    pub mouse_updates: u64,
    /// Per-fault counts, indexed by [`FaultCode::index`].
    pub faults: [u64; FaultCode::COUNT],
}

impl DiagnosticSnapshot {
    /// Count recorded for one fault.
    #[must_use]
    pub fn fault(&self, fault: FaultCode) -> u64 {
        self.faults.get(fault.index()).copied().unwrap_or(0)
    }

    /// Sum of all fault counts.
    #[must_use]
    pub fn total_faults(&self) -> u64 {
        self.faults.iter().fold(0u64, |acc, n| acc.saturating_add(*n))
    }
}

/// Relaxed atomic counters.
///
/// Values are eventually consistent; there is no atomic snapshot across
/// counters, which is acceptable for diagnostics.
///
/// ```rust
/// use famikb_errors::FaultCode;
/// use famikb_state::DiagnosticCounters;
///
/// let counters = DiagnosticCounters::new();
/// counters.inc_frame();
/// counters.record_fault(FaultCode::RingOverflow);
///
/// let snapshot = counters.snapshot();
/// assert_eq!(snapshot.frames, 1);
/// assert_eq!(snapshot.fault(FaultCode::RingOverflow), 1);
/// ```
#[derive(Debug)]
pub struct DiagnosticCounters {
    frames: AtomicU64,
    row_advances: AtomicU64,
    key_events: AtomicU64,
    mouse_updates: AtomicU64,
    faults: [AtomicU64; FaultCode::COUNT],
}

impl Default for DiagnosticCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticCounters {
    /// All counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames: AtomicU64::new(0),
            row_advances: AtomicU64::new(0),
            key_events: AtomicU64::new(0),
            mouse_updates: AtomicU64::new(0),
            faults: [const { AtomicU64::new(0) }; FaultCode::COUNT],
        }
    }

    /// Count a frame start.
    ///
    /// # RT Safety
    ///
    /// RT-safe. Single atomic fetch-add instruction.
    #[inline]
    pub fn inc_frame(&self) {
        self.frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a row advance.
    ///
    /// # RT Safety
    ///
    /// RT-safe. Single atomic fetch-add instruction.
    #[inline]
    pub fn inc_row_advance(&self) {
        self.row_advances.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_key_event(&self) {
        self.key_events.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_mouse_update(&self) {
        self.mouse_updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one occurrence of a fault.
    ///
    /// # RT Safety
    ///
    /// RT-safe. Single atomic fetch-add instruction.
    #[inline]
    pub fn record_fault(&self, fault: FaultCode) {
        if let Some(counter) = self.faults.get(fault.index()) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Current count for one fault.
    #[inline]
    #[must_use]
    pub fn fault(&self, fault: FaultCode) -> u64 {
        self.faults
            .get(fault.index())
            .map_or(0, |counter| counter.load(Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    #[inline]
    #[must_use]
    pub fn row_advances(&self) -> u64 {
        self.row_advances.load(Ordering::Relaxed)
    }

    /// Read every counter without resetting.
    #[must_use]
    pub fn snapshot(&self) -> DiagnosticSnapshot {
        let mut faults = [0u64; FaultCode::COUNT];
        for (slot, counter) in faults.iter_mut().zip(self.faults.iter()) {
            *slot = counter.load(Ordering::Relaxed);
        }
        DiagnosticSnapshot {
            frames: self.frames.load(Ordering::Relaxed),
            row_advances: self.row_advances.load(Ordering::Relaxed),
            key_events: self.key_events.load(Ordering::Relaxed),
            mouse_updates: self.mouse_updates.load(Ordering::Relaxed),
            faults,
        }
    }

    /// Read every counter and reset it to zero.
    ///
    /// # RT Safety
    ///
    /// **NOT RT-safe**. Call from the decoder or host side only.
    #[must_use]
    pub fn snapshot_and_reset(&self) -> DiagnosticSnapshot {
        let mut faults = [0u64; FaultCode::COUNT];
        for (slot, counter) in faults.iter_mut().zip(self.faults.iter()) {
            *slot = counter.swap(0, Ordering::Relaxed);
        }
        DiagnosticSnapshot {
            frames: self.frames.swap(0, Ordering::Relaxed),
            row_advances: self.row_advances.swap(0, Ordering::Relaxed),
            key_events: self.key_events.swap(0, Ordering::Relaxed),
            mouse_updates: self.mouse_updates.swap(0, Ordering::Relaxed),
            faults,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero() {
        let counters = DiagnosticCounters::new();
        assert_eq!(counters.snapshot(), DiagnosticSnapshot::default());
    }

    #[test]
    fn test_record_each_fault() {
        let counters = DiagnosticCounters::new();
        for (n, fault) in FaultCode::ALL.iter().enumerate() {
            for _ in 0..=n {
                counters.record_fault(*fault);
            }
        }
        let snapshot = counters.snapshot();
        for (n, fault) in FaultCode::ALL.iter().enumerate() {
            assert_eq!(snapshot.fault(*fault), n as u64 + 1);
        }
        assert_eq!(snapshot.total_faults(), 28);
    }

    #[test]
    fn test_snapshot_and_reset() {
        let counters = DiagnosticCounters::new();
        counters.inc_frame();
        counters.inc_frame();
        counters.inc_row_advance();
        counters.record_fault(FaultCode::GarbageTransaction);

        let first = counters.snapshot_and_reset();
        assert_eq!(first.frames, 2);
        assert_eq!(first.row_advances, 1);
        assert_eq!(first.fault(FaultCode::GarbageTransaction), 1);

        assert_eq!(counters.snapshot(), DiagnosticSnapshot::default());
    }
}
