//! Bridges and input traffic for end-to-end tests.

use anyhow::{Context, Result};
use famikb_bridge::{Bridge, BridgeConfig, boot};
use famikb_ps2_protocol::{ScancodeLayout, encode_key};
use famikb_types::{InputSource, KeyCode, KeyEvent, Mode};

/// Boot a bridge in `mode` with default settings: the PS/2 keyboard is the
/// live input.
pub fn boot_mode(mode: Mode) -> Result<Bridge> {
    crate::init_tracing();
    let config = BridgeConfig {
        mode: Some(mode),
        ..BridgeConfig::default()
    };
    boot(&config).with_context(|| format!("booting {mode}"))
}

/// Boot a bridge in `mode` with the host strap set: USB HID and the register
/// bus are live, the PS/2 keyboard is not.
pub fn boot_host(mode: Mode) -> Result<Bridge> {
    crate::init_tracing();
    let config = BridgeConfig {
        mode: Some(mode),
        input: InputSource::Host,
        ..BridgeConfig::default()
    };
    boot(&config).with_context(|| format!("booting {mode} with host input"))
}

/// Boot from an explicit configuration.
pub fn boot_config(config: &BridgeConfig) -> Result<Bridge> {
    crate::init_tracing();
    boot(config).context("booting from configuration")
}

/// Scancode bytes a keyboard on `layout` sends for `event`.
pub fn scancodes(layout: ScancodeLayout, event: KeyEvent) -> Result<Vec<u8>> {
    let (bytes, len) = encode_key(layout, event)
        .with_context(|| format!("no scancode for {} on {}", event.keycode, layout.name()))?;
    Ok(bytes.iter().take(len).copied().collect())
}

/// Make then break for each key, in order, on the US layout.
pub fn typed(keys: &[KeyCode]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for key in keys {
        out.extend(scancodes(ScancodeLayout::Us104, KeyEvent::press(*key))?);
        out.extend(scancodes(ScancodeLayout::Us104, KeyEvent::release(*key))?);
    }
    Ok(out)
}

/// A boot keyboard report with `keys` in the first slots.
pub fn keyboard_report(modifiers: u8, keys: &[u8]) -> [u8; 8] {
    let mut report = [0u8; 8];
    report[0] = modifiers;
    for (slot, key) in report.iter_mut().skip(2).zip(keys) {
        *slot = *key;
    }
    report
}
