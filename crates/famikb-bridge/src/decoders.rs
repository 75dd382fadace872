//! Decoder context: every input path feeding the shared state.

use std::sync::Arc;

use famikb_errors::{BridgeError, FaultCode};
use famikb_hid_boot_protocol::{HidReportError, KeyboardDiffer, MouseDecoder};
use famikb_ps2_protocol::{DecodeOutcome, Ps2Decoder};
use famikb_regbus_protocol::{HostMessage, RegbusWindow, TransactionOutcome};
use famikb_state::{KeyApply, SharedState};
use famikb_types::{InputSource, Mode, MousePositioning, MouseUpdate};
use tracing::{debug, trace};

use crate::config::BridgeConfig;

/// Owns the decoders and writes their output into [`SharedState`].
///
/// Runs on the decoder context. Only the path the input strap selected is
/// live: with [`InputSource::Serial`] the HID and register-bus entry points
/// do nothing, with [`InputSource::Host`] the PS/2 entry point does nothing.
/// Either way the dropped input is counted as [`FaultCode::InputDisabled`].
///
/// The register-bus handlers are meant to be called from its slave
/// interrupt; they only touch fixed fields and counters and never log.
#[derive(Debug)]
pub struct DecoderContext {
    state: Arc<SharedState>,
    input: InputSource,
    serial: Ps2Decoder,
    keyboard: KeyboardDiffer,
    mouse: MouseDecoder,
    window: RegbusWindow,
    /// Last absolute position written by the host, for delta-only modes.
    host_cursor: Option<(i32, i32)>,
}

impl DecoderContext {
    #[must_use]
    pub fn new(config: &BridgeConfig, state: Arc<SharedState>) -> Self {
        Self {
            state,
            input: config.input,
            serial: Ps2Decoder::new(config.layout),
            keyboard: KeyboardDiffer::new(),
            mouse: MouseDecoder::new(config.mouse, config.video),
            window: RegbusWindow::new(),
            host_cursor: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    #[must_use]
    pub fn input(&self) -> InputSource {
        self.input
    }

    fn accepts(&self, source: InputSource) -> bool {
        if self.input == source {
            true
        } else {
            self.state.counters().record_fault(FaultCode::InputDisabled);
            false
        }
    }

    /// One byte from the PS/2 keyboard. Returns what the state store did
    /// with the completed event, if the byte completed one.
    pub fn feed_serial(&mut self, byte: u8) -> Option<KeyApply> {
        if !self.accepts(InputSource::Serial) {
            trace!(byte, "serial input disabled by strap");
            return None;
        }
        match self.serial.feed(byte) {
            DecodeOutcome::Prefix => None,
            DecodeOutcome::Event(event) => {
                let applied = self.state.apply_key_event(event);
                trace!(
                    key = %event.keycode,
                    pressed = event.pressed,
                    ?applied,
                    "serial key"
                );
                Some(applied)
            }
            DecodeOutcome::Unmapped { .. } => {
                self.state.counters().record_fault(FaultCode::UnmappedKeycode);
                None
            }
        }
    }

    /// Feed a run of PS/2 bytes; returns the number of key events applied.
    pub fn feed_serial_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes
            .iter()
            .filter(|byte| self.feed_serial(**byte).is_some())
            .count()
    }

    /// One USB boot keyboard report. Returns the number of key events applied.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Fault`] with [`FaultCode::ShortReport`] or
    /// [`FaultCode::HidRollover`], or [`FaultCode::InputDisabled`] when the
    /// serial keyboard was selected; the report is ignored and the fault counted.
    pub fn hid_keyboard_report(&mut self, data: &[u8]) -> Result<usize, BridgeError> {
        if !self.accepts(InputSource::Host) {
            return Err(BridgeError::Fault(FaultCode::InputDisabled));
        }
        let update = self
            .keyboard
            .update(data)
            .map_err(|err| self.hid_fault(&err))?;
        for _ in 0..update.unmapped {
            self.state.counters().record_fault(FaultCode::UnmappedKeycode);
        }
        self.state.apply_key_events(&update.events);
        Ok(update.events.len())
    }

    /// One USB boot mouse report.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Fault`] with [`FaultCode::ShortReport`], or
    /// [`FaultCode::InputDisabled`] when the serial keyboard was selected;
    /// the report is ignored and the fault counted.
    pub fn hid_mouse_report(&mut self, data: &[u8]) -> Result<(), BridgeError> {
        if !self.accepts(InputSource::Host) {
            return Err(BridgeError::Fault(FaultCode::InputDisabled));
        }
        let update = self.mouse.update(data).map_err(|err| self.hid_fault(&err))?;
        self.state.apply_mouse_update(&update);
        Ok(())
    }

    fn hid_fault(&self, err: &HidReportError) -> BridgeError {
        let fault = match err {
            HidReportError::InvalidReportSize { .. } => FaultCode::ShortReport,
            HidReportError::Rollover => FaultCode::HidRollover,
        };
        debug!(error = %err, "HID report ignored");
        self.state.counters().record_fault(fault);
        BridgeError::Fault(fault)
    }

    /// Register bus: master wrote a byte.
    #[inline]
    pub fn regbus_receive(&mut self, byte: u8) {
        if self.input == InputSource::Host {
            self.window.on_receive(byte);
        }
    }

    /// Register bus: master reads a byte. Reads `0` when the bus is not the
    /// selected input.
    #[inline]
    pub fn regbus_request(&mut self) -> u8 {
        if self.input == InputSource::Host {
            self.window.on_request()
        } else {
            0
        }
    }

    /// Register bus: transaction ended. A valid write is applied to the
    /// shared state; a write to a nonzero address is counted and dropped.
    /// With the serial keyboard selected the transaction is counted and
    /// reported as [`TransactionOutcome::NoData`].
    pub fn regbus_finish(&mut self) -> TransactionOutcome {
        if !self.accepts(InputSource::Host) {
            return TransactionOutcome::NoData;
        }
        let outcome = self.window.on_finish();
        match outcome {
            TransactionOutcome::Message(message) => self.apply_host_message(&message),
            TransactionOutcome::Garbage => {
                self.state
                    .counters()
                    .record_fault(FaultCode::GarbageTransaction);
            }
            TransactionOutcome::NoData => {}
        }
        outcome
    }

    /// Run a whole write transaction through the register-bus handlers.
    pub fn regbus_write(&mut self, bytes: &[u8]) -> TransactionOutcome {
        for byte in bytes {
            self.regbus_receive(*byte);
        }
        self.regbus_finish()
    }

    fn apply_host_message(&mut self, message: &HostMessage) {
        if let Some(event) = message.key_event() {
            self.state.apply_key_event(event);
        } else if message.key != 0 {
            self.state.counters().record_fault(FaultCode::UnmappedKeycode);
        }
        if let Some(update) = message.mouse_update() {
            let update = self.host_mouse_update(update);
            self.state.apply_mouse_update(&update);
        }
    }

    /// In modes whose reports carry deltas, an absolute host position
    /// becomes the motion since the previous one. The first position only
    /// sets the origin.
    fn host_mouse_update(&mut self, update: MouseUpdate) -> MouseUpdate {
        let delta_only = self.state.mode().is_some_and(Mode::reports_mouse_deltas);
        if update.positioning == MousePositioning::Relative || !delta_only {
            return update;
        }
        let (dx, dy) = match self.host_cursor {
            Some((x, y)) => (update.x.saturating_sub(x), update.y.saturating_sub(y)),
            None => (0, 0),
        };
        self.host_cursor = Some((update.x, update.y));
        MouseUpdate::relative(update.buttons, dx, dy).with_extra(update.extra)
    }
}
