//! The one shared state block between decoders and the bus responder.

use famikb_errors::FaultCode;
use famikb_types::{KeyEvent, KeyEventBatch, Mode, MouseSnapshot, MouseUpdate};

use crate::counters::DiagnosticCounters;
use crate::layouts::MatrixLayout;
use crate::matrix::KeyMatrix;
use crate::mouse::MouseState;
use crate::ring::KeyRing;

/// What happened to one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyApply {
    /// Written to this many matrix cells.
    Matrix { cells: usize },
    /// Appended to the ring; `evicted` is the byte pushed out to make room.
    Queued { evicted: Option<u8> },
    /// No cell for this key in the active layout.
    Unmapped,
    /// No responder is consuming key state.
    Discarded,
}

/// Key matrix, key ring, mouse accumulator and counters for one bridge.
///
/// Built once at boot and shared by `Arc`. Writers and readers are fixed:
/// decoders write the matrix, the ring producer side and the mouse
/// accumulator; the responder reads rows, drains the ring and snapshots the
/// mouse. Every method is lock-free and allocation-free, and none of them
/// log: faults are counted, so the register-bus interrupt may call in.
#[derive(Debug)]
pub struct SharedState {
    mode: Option<Mode>,
    layout: Option<&'static MatrixLayout>,
    matrix: KeyMatrix,
    ring: KeyRing,
    mouse: MouseState,
    counters: DiagnosticCounters,
}

impl SharedState {
    /// State for a bridge running `mode`. All keys released, ring empty.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self::build(Some(mode))
    }

    /// State for a bridge with no supported mode; key events are discarded.
    #[must_use]
    pub fn absent() -> Self {
        Self::build(None)
    }

    fn build(mode: Option<Mode>) -> Self {
        Self {
            mode,
            layout: mode.and_then(MatrixLayout::for_mode),
            matrix: KeyMatrix::new(),
            ring: KeyRing::new(),
            mouse: MouseState::new(),
            counters: DiagnosticCounters::new(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    #[must_use]
    pub fn layout(&self) -> Option<&'static MatrixLayout> {
        self.layout
    }

    #[must_use]
    pub fn matrix(&self) -> &KeyMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn ring(&self) -> &KeyRing {
        &self.ring
    }

    #[must_use]
    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    #[must_use]
    pub fn counters(&self) -> &DiagnosticCounters {
        &self.counters
    }

    /// Apply one canonical key event the way the active mode consumes it.
    ///
    /// Matrix modes set or clear every cell holding the key; Generic mode
    /// queues the wire byte, evicting the oldest when the ring is full.
    pub fn apply_key_event(&self, event: KeyEvent) -> KeyApply {
        match (self.mode, self.layout) {
            (Some(Mode::Generic), _) => {
                let evicted = self.ring.push(event.to_wire_byte());
                if evicted.is_some() {
                    self.counters.record_fault(FaultCode::RingOverflow);
                }
                self.counters.inc_key_event();
                KeyApply::Queued { evicted }
            }
            (Some(_), Some(layout)) => {
                let mut cells = 0;
                for index in layout.cells_for(event.keycode) {
                    self.matrix.set(index, event.pressed);
                    cells += 1;
                }
                if cells == 0 {
                    self.counters.record_fault(FaultCode::UnmappedCell);
                    KeyApply::Unmapped
                } else {
                    self.counters.inc_key_event();
                    KeyApply::Matrix { cells }
                }
            }
            _ => KeyApply::Discarded,
        }
    }

    /// Apply every event of a decoder batch in order.
    pub fn apply_key_events(&self, batch: &KeyEventBatch) {
        for event in batch {
            self.apply_key_event(*event);
        }
    }

    /// Merge a mouse update into the accumulator.
    pub fn apply_mouse_update(&self, update: &MouseUpdate) {
        self.mouse.apply(update);
        self.counters.inc_mouse_update();
    }

    /// Capture and consume one frame of mouse state.
    #[inline]
    pub fn snapshot_mouse(&self) -> MouseSnapshot {
        self.mouse.snapshot()
    }
}
