//! `simulate`: boot a bridge, feed scancodes, read one frame as the console would.

use anyhow::Result;
use famikb_bridge::{BridgeConfig, boot};
use famikb_report::{decode_hori_track, decode_subor, unpack_word};
use famikb_responder::{BusResponder, ConsoleHost, row_nibble};
use famikb_types::{InputSource, Mode, MouseButtons, MouseUpdate};
use serde::Serialize;
use tracing::debug;

use crate::commands::SimulateArgs;
use crate::error::parse_hex_byte;
use crate::output;

/// Longest Subor report, in bytes.
const SUBOR_MAX_BYTES: usize = 3;

/// What the console saw in one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameReadout {
    pub mode: String,
    /// Row nibbles, row 0 first.
    pub rows: Vec<u8>,
    /// Subor report bytes, the Hori Track word, or the Generic mouse window.
    pub report: Vec<u8>,
    /// Generic keyboard window.
    pub keyboard: Vec<u8>,
    /// Motion decoded back out of the report.
    pub motion: Option<(i32, i32)>,
}

#[derive(Debug, Serialize)]
pub struct SimulationOutput {
    pub events_applied: usize,
    pub frame: FrameReadout,
    pub faults: u64,
}

pub fn execute(args: &SimulateArgs, json: bool) -> Result<()> {
    let scancodes = args
        .scancodes
        .iter()
        .map(|text| parse_hex_byte(text))
        .collect::<Result<Vec<_>, _>>()?;

    let base = match &args.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };
    // Scancodes come from a PS/2 keyboard whatever the file selects.
    let config = BridgeConfig {
        layout: args.layout.into(),
        input: InputSource::Serial,
        ..base.with_raw_mode(args.mode)
    };
    let mut bridge = boot(&config)?;

    let events_applied = bridge.decoders_mut().feed_serial_bytes(&scancodes);
    debug!(events_applied, bytes = scancodes.len(), "scancodes fed");

    let mut buttons = MouseButtons::empty();
    buttons.set(MouseButtons::LEFT, args.left);
    buttons.set(MouseButtons::RIGHT, args.right);
    if !buttons.is_empty() || args.dx != 0 || args.dy != 0 {
        bridge
            .state()
            .apply_mouse_update(&MouseUpdate::relative(buttons, args.dx, args.dy));
    }

    let mode = bridge.mode();
    let frame = read_frame(mode, bridge.responder_mut());
    let faults = bridge.state().counters().snapshot().total_faults();

    output::print_simulation(
        &SimulationOutput {
            events_applied,
            frame,
            faults,
        },
        json,
    )
}

/// Read one frame through the responder in the order console software does.
pub fn read_frame(mode: Option<Mode>, responder: &mut BusResponder) -> FrameReadout {
    let mut host = ConsoleHost::new(responder);
    let mut frame = FrameReadout {
        mode: mode.map_or("absent", Mode::name).to_string(),
        ..FrameReadout::default()
    };

    match mode {
        Some(Mode::Generic) => {
            let (keyboard, mouse) = host.read_generic_frame();
            frame.keyboard = unpack_word(keyboard).to_vec();
            frame.report = unpack_word(mouse).to_vec();
        }
        Some(Mode::Subor) => {
            host.latch();
            for _ in 0..SUBOR_MAX_BYTES {
                if host.responder().pending_report_bytes() == 0 {
                    break;
                }
                let [.., byte] = host.read_mouse_bits(8).to_be_bytes();
                frame.report.push(byte);
                host.next_row();
            }
            frame.motion = decode_subor(&frame.report).map(|m| (m.dx, m.dy));
            frame.rows = host.scan_matrix(Mode::Subor.matrix_rows());
        }
        Some(Mode::HoriTrack) => {
            host.latch();
            let word = host.read_mouse_bits(32);
            frame.report = word.to_be_bytes().to_vec();
            frame.motion = decode_hori_track(word).map(|m| (m.dx, m.dy));
            frame.rows = host.scan_matrix(Mode::HoriTrack.matrix_rows());
        }
        Some(Mode::FamilyBasic) => {
            frame.rows = host.scan_matrix(Mode::FamilyBasic.matrix_rows());
        }
        None => {
            frame.rows = vec![row_nibble(host.latch())];
        }
    }
    frame
}
