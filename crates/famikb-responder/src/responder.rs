//! Per-mode bus state machines.

use std::sync::Arc;

use famikb_report::{
    SuborReport, encode_hori_track, encode_subor, keyboard_word, mouse_word, pack_word,
};
use famikb_state::{DRAIN_WIDTH, SharedState};
use famikb_types::Mode;

use crate::bus::{BitSink, BusEdges, BusSnapshot, BusSource, EdgeDetector};

const MOUSE_BIT: u8 = 0b0_0001;
const KEYBOARD_BIT: u8 = 0b0_0010;
const WORD_MSB: u32 = 1 << 31;

/// Row counter shared by the matrix modes.
#[derive(Debug, Clone, Copy)]
struct RowScanner {
    rows: usize,
    row: usize,
}

impl RowScanner {
    const fn new(rows: usize) -> Self {
        Self { rows, row: 0 }
    }

    #[inline]
    fn apply(&mut self, edges: &BusEdges, state: &SharedState) {
        if edges.latch_high {
            self.row = 0;
        }
        if edges.row_advance {
            let next = self.row.saturating_add(1);
            self.row = if next >= self.rows { 0 } else { next };
            state.counters().inc_row_advance();
        }
    }

    /// D4..D1 for the selected row, zero while the keyboard is disabled.
    #[inline]
    fn matrix_bits(&self, state: &SharedState, enable: bool) -> u8 {
        if enable {
            state.matrix().row_bits(self.row) << 1
        } else {
            0
        }
    }
}

/// Subor mouse report shifter.
#[derive(Debug, Clone, Copy, Default)]
struct SuborChannel {
    report: SuborReport,
    index: usize,
    remaining: usize,
    shift: u8,
}

impl SuborChannel {
    #[inline]
    fn on_frame(&mut self, state: &SharedState) {
        if self.remaining == 0 {
            self.report = encode_subor(&state.snapshot_mouse());
            self.index = 0;
            self.remaining = self.report.len();
        }
        self.shift = self.report.byte(self.index);
    }

    #[inline]
    fn on_row_advance(&mut self) {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.index = self.index.saturating_add(1);
            self.shift = self.report.byte(self.index);
        }
    }

    #[inline]
    fn on_clock(&mut self) {
        self.shift <<= 1;
    }

    #[inline]
    fn bit(&self) -> u8 {
        self.shift >> 7
    }
}

/// Two inverted 32-bit registers shifted out in parallel.
#[derive(Debug, Clone, Copy)]
struct GenericRegisters {
    keyboard: u32,
    mouse: u32,
}

impl GenericRegisters {
    const fn idle() -> Self {
        Self {
            keyboard: keyboard_word([0; DRAIN_WIDTH]),
            // Buttons, X, Y and extra all zero.
            mouse: pack_word([0; 4]),
        }
    }

    #[inline]
    fn on_frame(&mut self, state: &SharedState) {
        let mut bytes = [0u8; DRAIN_WIDTH];
        state.ring().drain_word(&mut bytes);
        self.keyboard = keyboard_word(bytes);
        self.mouse = mouse_word(&state.snapshot_mouse());
    }

    #[inline]
    fn on_clock(&mut self) {
        self.keyboard <<= 1;
        self.mouse <<= 1;
    }

    #[inline]
    fn bits(&self) -> u8 {
        (if self.keyboard & WORD_MSB != 0 { KEYBOARD_BIT } else { 0 })
            | (if self.mouse & WORD_MSB != 0 { MOUSE_BIT } else { 0 })
    }
}

#[derive(Debug)]
pub struct FamilyBasicResponder {
    state: Arc<SharedState>,
    edges: EdgeDetector,
    scanner: RowScanner,
}

#[derive(Debug)]
pub struct SuborResponder {
    state: Arc<SharedState>,
    edges: EdgeDetector,
    scanner: RowScanner,
    mouse: SuborChannel,
}

#[derive(Debug)]
pub struct HoriTrackResponder {
    state: Arc<SharedState>,
    edges: EdgeDetector,
    scanner: RowScanner,
    word: u32,
}

#[derive(Debug)]
pub struct GenericResponder {
    state: Arc<SharedState>,
    edges: EdgeDetector,
    registers: GenericRegisters,
}

impl FamilyBasicResponder {
    #[inline]
    fn step(&mut self, snapshot: BusSnapshot) -> u8 {
        let edges = self.edges.update(snapshot);
        if edges.frame_start {
            self.state.counters().inc_frame();
        }
        self.scanner.apply(&edges, &self.state);
        self.scanner.matrix_bits(&self.state, snapshot.enable)
    }
}

impl SuborResponder {
    #[inline]
    fn step(&mut self, snapshot: BusSnapshot) -> u8 {
        let edges = self.edges.update(snapshot);
        if edges.frame_start {
            self.state.counters().inc_frame();
            self.mouse.on_frame(&self.state);
        }
        self.scanner.apply(&edges, &self.state);
        if edges.row_advance {
            self.mouse.on_row_advance();
        }
        if edges.clock {
            self.mouse.on_clock();
        }
        self.scanner.matrix_bits(&self.state, snapshot.enable) | self.mouse.bit()
    }
}

impl HoriTrackResponder {
    #[inline]
    fn step(&mut self, snapshot: BusSnapshot) -> u8 {
        let edges = self.edges.update(snapshot);
        if edges.frame_start {
            self.state.counters().inc_frame();
            self.word = encode_hori_track(&self.state.snapshot_mouse());
        }
        self.scanner.apply(&edges, &self.state);
        if edges.clock {
            self.word <<= 1;
        }
        let bit = if self.word & WORD_MSB != 0 { MOUSE_BIT } else { 0 };
        self.scanner.matrix_bits(&self.state, snapshot.enable) | bit
    }
}

impl GenericResponder {
    #[inline]
    fn step(&mut self, snapshot: BusSnapshot) -> u8 {
        let edges = self.edges.update(snapshot);
        if edges.frame_start {
            self.state.counters().inc_frame();
            self.registers.on_frame(&self.state);
        }
        if edges.clock {
            self.registers.on_clock();
        }
        self.registers.bits()
    }
}

/// The responder selected at boot.
///
/// One variant per wire convention; `Absent` stands in for a mode value no
/// console device answers to and always drives `0`.
#[derive(Debug)]
pub enum BusResponder {
    FamilyBasic(FamilyBasicResponder),
    Subor(SuborResponder),
    HoriTrack(HoriTrackResponder),
    Generic(GenericResponder),
    Absent,
}

impl BusResponder {
    /// Build the responder for the mode `state` was created with.
    #[must_use]
    pub fn new(state: Arc<SharedState>) -> Self {
        let Some(mode) = state.mode() else {
            return Self::Absent;
        };
        let scanner = RowScanner::new(mode.matrix_rows());
        let edges = EdgeDetector::new();
        match mode {
            Mode::FamilyBasic => Self::FamilyBasic(FamilyBasicResponder {
                state,
                edges,
                scanner,
            }),
            Mode::Subor => Self::Subor(SuborResponder {
                state,
                edges,
                scanner,
                mouse: SuborChannel::default(),
            }),
            Mode::HoriTrack => Self::HoriTrack(HoriTrackResponder {
                state,
                edges,
                scanner,
                word: 0,
            }),
            Mode::Generic => Self::Generic(GenericResponder {
                state,
                edges,
                registers: GenericRegisters::idle(),
            }),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Self::FamilyBasic(_) => Some(Mode::FamilyBasic),
            Self::Subor(_) => Some(Mode::Subor),
            Self::HoriTrack(_) => Some(Mode::HoriTrack),
            Self::Generic(_) => Some(Mode::Generic),
            Self::Absent => None,
        }
    }

    /// React to one bus sample and return the 5-bit output.
    ///
    /// # RT Safety
    ///
    /// - **No heap allocations**
    /// - **No locks or syscalls**: relaxed atomics and a lock-free queue pop
    /// - **Bounded**: fixed-size lookups only, no loops over input
    #[inline]
    pub fn step(&mut self, snapshot: BusSnapshot) -> u8 {
        match self {
            Self::FamilyBasic(responder) => responder.step(snapshot),
            Self::Subor(responder) => responder.step(snapshot),
            Self::HoriTrack(responder) => responder.step(snapshot),
            Self::Generic(responder) => responder.step(snapshot),
            Self::Absent => 0,
        }
    }

    /// Sample, step and drive forever.
    pub fn run<S: BusSource, K: BitSink>(&mut self, mut source: S, mut sink: K) -> ! {
        loop {
            let output = self.step(source.sample());
            sink.drive(output);
        }
    }

    /// Currently selected matrix row; `0` outside the matrix modes.
    #[must_use]
    pub fn row(&self) -> usize {
        match self {
            Self::FamilyBasic(responder) => responder.scanner.row,
            Self::Subor(responder) => responder.scanner.row,
            Self::HoriTrack(responder) => responder.scanner.row,
            Self::Generic(_) | Self::Absent => 0,
        }
    }

    /// Subor report bytes still to be consumed by row advances.
    #[must_use]
    pub fn pending_report_bytes(&self) -> usize {
        match self {
            Self::Subor(responder) => responder.mouse.remaining,
            _ => 0,
        }
    }
}
