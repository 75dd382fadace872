//! Host-side model of the console's reads, for simulation and tests.
//!
//! Drives a [`BusResponder`] with the same `$4016` write / `$4017` read
//! sequences console software uses. Not for the real-time loop.

use crate::bus::{BusSnapshot, PORT_ENABLE, PORT_LATCH, PORT_ROW_ADVANCE};
use crate::responder::BusResponder;

/// Matrix bits D4..D1 of an output value as a row nibble.
#[inline]
#[must_use]
pub const fn row_nibble(output: u8) -> u8 {
    (output >> 1) & 0x0F
}

/// Plays the console side of the bus against a responder.
#[derive(Debug)]
pub struct ConsoleHost<'a> {
    responder: &'a mut BusResponder,
    row_line: bool,
    enable: bool,
}

impl<'a> ConsoleHost<'a> {
    /// Host with the keyboard enabled and every line low.
    pub fn new(responder: &'a mut BusResponder) -> Self {
        Self {
            responder,
            row_line: false,
            enable: true,
        }
    }

    /// The responder being driven.
    pub fn responder(&self) -> &BusResponder {
        self.responder
    }

    fn port(&self) -> u8 {
        (if self.row_line { PORT_ROW_ADVANCE } else { 0 })
            | (if self.enable { PORT_ENABLE } else { 0 })
    }

    fn write(&mut self, out: u8, clock: bool) -> u8 {
        self.responder.step(BusSnapshot::from_port(out, clock))
    }

    /// Sample the output without changing any line.
    pub fn read(&mut self) -> u8 {
        let out = self.port();
        self.write(out, false)
    }

    /// Enable or disable the keyboard.
    pub fn set_enable(&mut self, enable: bool) -> u8 {
        self.enable = enable;
        self.read()
    }

    /// Pulse the latch: row 0 selected, new frame started. Returns the
    /// output once the latch is released.
    pub fn latch(&mut self) -> u8 {
        self.row_line = false;
        let out = self.port();
        self.write(out | PORT_LATCH, false);
        self.write(out, false)
    }

    /// Toggle the row-advance line once.
    pub fn next_row(&mut self) -> u8 {
        self.row_line = !self.row_line;
        self.read()
    }

    /// One read strobe. Returns the output after the rising edge.
    pub fn clock(&mut self) -> u8 {
        let out = self.port();
        let value = self.write(out, true);
        self.write(out, false);
        value
    }

    /// Latch and read every row's nibble, row 0 first.
    pub fn scan_matrix(&mut self, rows: usize) -> Vec<u8> {
        let mut nibbles = Vec::with_capacity(rows);
        if rows == 0 {
            return nibbles;
        }
        nibbles.push(row_nibble(self.latch()));
        for _ in 1..rows {
            nibbles.push(row_nibble(self.next_row()));
        }
        nibbles
    }

    /// Read `bits` values of D0, MSB first. The first bit is read without a
    /// clock; every later one follows a strobe.
    pub fn read_mouse_bits(&mut self, bits: u32) -> u32 {
        let mut word = 0u32;
        for index in 0..bits {
            let out = if index == 0 { self.read() } else { self.clock() };
            word = (word << 1) | u32::from(out & 1);
        }
        word
    }

    /// Latch and read both Generic registers as raw (inverted) words:
    /// `(keyboard, mouse)`.
    pub fn read_generic_frame(&mut self) -> (u32, u32) {
        let mut keyboard = 0u32;
        let mut mouse = 0u32;
        for index in 0..32 {
            let out = if index == 0 { self.latch() } else { self.clock() };
            keyboard = (keyboard << 1) | u32::from((out >> 1) & 1);
            mouse = (mouse << 1) | u32::from(out & 1);
        }
        (keyboard, mouse)
    }
}
