//! Command implementations for famikbctl

pub mod config;
pub mod regbus;
pub mod simulate;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use famikb_ps2_protocol::ScancodeLayout;
use famikb_types::Mode;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Mode name (generic, family_basic, subor, hori_track) or raw strap value
    #[arg(short, long, default_value = "family_basic", value_parser = parse_mode)]
    pub mode: u8,

    /// Scancode table for the serial keyboard
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Us104)]
    pub layout: LayoutArg,

    /// Start from a configuration file; --mode and --layout still apply
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Relative mouse motion applied before the frame
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub dx: i32,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub dy: i32,

    /// Hold the left mouse button
    #[arg(long)]
    pub left: bool,

    /// Hold the right mouse button
    #[arg(long)]
    pub right: bool,

    /// PS/2 bytes in hex (e.g. 1C F0 1C)
    pub scancodes: Vec<String>,
}

#[derive(Args, Debug)]
pub struct EncodeRegbusArgs {
    /// Key wire byte in hex (keycode, bit 7 set for release)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Mark the key as released
    #[arg(long)]
    pub release: bool,

    #[arg(long)]
    pub left: bool,

    #[arg(long)]
    pub right: bool,

    #[arg(long)]
    pub middle: bool,

    /// X delta (relative) or column (absolute)
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    pub x: i32,

    /// Y delta (relative) or line (absolute)
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    pub y: i32,

    /// Send X/Y as deltas instead of a cursor position
    #[arg(short, long)]
    pub relative: bool,

    /// Extra bits: wheel up 1, wheel down 2, aux 4 and 8
    #[arg(short, long, default_value_t = 0)]
    pub extra: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Us104,
    Jis106,
}

impl From<LayoutArg> for ScancodeLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Us104 => ScancodeLayout::Us104,
            LayoutArg::Jis106 => ScancodeLayout::Jis106,
        }
    }
}

/// Accept a mode name or a raw number; unsupported numbers are kept so the
/// absent responder can be simulated.
pub fn parse_mode(text: &str) -> Result<u8, String> {
    if let Ok(raw) = text.parse::<u8>() {
        return Ok(raw);
    }
    [
        Mode::Generic,
        Mode::FamilyBasic,
        Mode::Subor,
        Mode::HoriTrack,
    ]
    .into_iter()
    .find(|mode| mode.name() == text)
    .map(Mode::raw)
    .ok_or_else(|| format!("unknown mode '{text}'"))
}
