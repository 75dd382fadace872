//! Boot keyboard reports and the report-to-report diff.

use famikb_types::{KeyCode, KeyEvent, KeyEventBatch};
use tracing::trace;

use crate::{HidReportError, HidResult};

/// Boot keyboard report length: modifiers, reserved, six key slots.
pub const KEYBOARD_REPORT_LEN: usize = 8;

/// Number of key slots.
pub const KEY_SLOTS: usize = 6;

/// Usage every slot carries when the keyboard detects phantom keys.
pub const USAGE_ROLLOVER: u8 = 0x01;

/// Parsed boot keyboard report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootKeyboardReport {
    pub modifiers: u8,
    pub keys: [u8; KEY_SLOTS],
}

impl BootKeyboardReport {
    /// Parse a raw report. Bytes past the first eight are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`HidReportError::InvalidReportSize`] for reports shorter than
    /// [`KEYBOARD_REPORT_LEN`].
    pub fn parse(data: &[u8]) -> HidResult<Self> {
        match data {
            [modifiers, _reserved, k0, k1, k2, k3, k4, k5, ..] => Ok(Self {
                modifiers: *modifiers,
                keys: [*k0, *k1, *k2, *k3, *k4, *k5],
            }),
            _ => Err(HidReportError::InvalidReportSize {
                expected: KEYBOARD_REPORT_LEN,
                actual: data.len(),
            }),
        }
    }

    /// True when the keyboard reported phantom state instead of keys.
    #[must_use]
    pub fn is_rollover(&self) -> bool {
        self.keys.contains(&USAGE_ROLLOVER)
    }
}

/// Map a HID keyboard usage to the canonical keycode set.
///
/// The usage table is used as-is up to `0x65`. International1 to 6 and
/// LANG1 to 5 are folded into `0x66..=0x70`; the modifier usages
/// `0xE0..=0xE7` become `0x78..=0x7F`. Everything else has no canonical key.
#[must_use]
pub fn translate_usage(usage: u8) -> Option<KeyCode> {
    match usage {
        0x04..=0x65 => KeyCode::new(usage),
        0x87..=0x8C => KeyCode::new(usage - 0x87 + KeyCode::RO.raw()),
        0x90..=0x94 => KeyCode::new(usage - 0x90 + KeyCode::HANGEUL.raw()),
        0xE0..=0xE7 => KeyCode::modifier(usage - 0xE0),
        _ => None,
    }
}

/// Events produced by one keyboard report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardUpdate {
    pub events: KeyEventBatch,
    /// Slot usages with no canonical key.
    pub unmapped: usize,
}

/// Turns successive boot keyboard reports into press/release events.
///
/// Slots are compared by index, not by content: a slot that changes to a
/// new nonzero usage is a press, a slot that goes to zero releases the usage
/// it held. If two held keys trade slots in one report, the release of the
/// key that left is not seen.
#[derive(Debug, Clone, Default)]
pub struct KeyboardDiffer {
    previous: BootKeyboardReport,
}

impl KeyboardDiffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted report.
    #[must_use]
    pub fn previous(&self) -> &BootKeyboardReport {
        &self.previous
    }

    /// Diff a raw report against the previous one.
    ///
    /// # Errors
    ///
    /// - [`HidReportError::InvalidReportSize`] if the report is too short
    /// - [`HidReportError::Rollover`] if the keyboard reported phantom state;
    ///   the previous report is kept
    pub fn update(&mut self, data: &[u8]) -> HidResult<KeyboardUpdate> {
        let report = BootKeyboardReport::parse(data)?;
        if report.is_rollover() {
            return Err(HidReportError::Rollover);
        }

        let mut update = KeyboardUpdate::default();
        self.diff_modifiers(report.modifiers, &mut update);
        self.diff_slots(&report.keys, &mut update);
        self.previous = report;
        Ok(update)
    }

    fn diff_modifiers(&self, modifiers: u8, update: &mut KeyboardUpdate) {
        let changed = self.previous.modifiers ^ modifiers;
        for bit in 0..8u8 {
            if changed & (1 << bit) == 0 {
                continue;
            }
            if let Some(keycode) = KeyCode::modifier(bit) {
                let pressed = modifiers & (1 << bit) != 0;
                push(update, KeyEvent { keycode, pressed });
            }
        }
    }

    fn diff_slots(&self, keys: &[u8; KEY_SLOTS], update: &mut KeyboardUpdate) {
        for (previous, current) in self.previous.keys.iter().zip(keys.iter()) {
            if previous == current {
                continue;
            }
            let (usage, pressed) = if *current == 0 {
                (*previous, false)
            } else {
                (*current, true)
            };
            match translate_usage(usage) {
                Some(keycode) => push(update, KeyEvent { keycode, pressed }),
                None => {
                    trace!(usage, "HID usage has no canonical key");
                    update.unmapped += 1;
                }
            }
        }
    }
}

fn push(update: &mut KeyboardUpdate, event: KeyEvent) {
    // 8 modifier bits + 6 slots always fit in a batch.
    if update.events.push(event).is_err() {
        trace!(?event, "key event batch full");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(modifiers: u8, keys: [u8; 6]) -> [u8; 8] {
        let [a, b, c, d, e, f] = keys;
        [modifiers, 0, a, b, c, d, e, f]
    }

    #[test]
    fn test_parse_rejects_short_report() {
        assert_eq!(
            BootKeyboardReport::parse(&[0; 7]),
            Err(HidReportError::InvalidReportSize {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn test_press_and_release() -> Result<(), HidReportError> {
        let mut differ = KeyboardDiffer::new();
        let update = differ.update(&report(0, [0x04, 0, 0, 0, 0, 0]))?;
        assert_eq!(update.events.as_slice(), &[KeyEvent::press(KeyCode::A)]);

        let update = differ.update(&report(0, [0; 6]))?;
        assert_eq!(update.events.as_slice(), &[KeyEvent::release(KeyCode::A)]);
        Ok(())
    }

    #[test]
    fn test_modifiers_are_diffed_by_bit() -> Result<(), HidReportError> {
        let mut differ = KeyboardDiffer::new();
        let update = differ.update(&report(0b0000_0010, [0; 6]))?;
        assert_eq!(
            update.events.as_slice(),
            &[KeyEvent::press(KeyCode::LEFTSHIFT)]
        );

        let update = differ.update(&report(0b0010_0000, [0; 6]))?;
        assert_eq!(
            update.events.as_slice(),
            &[
                KeyEvent::release(KeyCode::LEFTSHIFT),
                KeyEvent::press(KeyCode::RIGHTSHIFT)
            ]
        );
        Ok(())
    }

    #[test]
    fn test_rollover_report_is_ignored() -> Result<(), HidReportError> {
        let mut differ = KeyboardDiffer::new();
        differ.update(&report(0, [0x04, 0, 0, 0, 0, 0]))?;
        assert_eq!(
            differ.update(&report(0, [0x01; 6])),
            Err(HidReportError::Rollover)
        );
        assert_eq!(differ.previous().keys[0], 0x04);

        let update = differ.update(&report(0, [0; 6]))?;
        assert_eq!(update.events.as_slice(), &[KeyEvent::release(KeyCode::A)]);
        Ok(())
    }

    #[test]
    fn test_slot_swap_masks_release() -> Result<(), HidReportError> {
        let mut differ = KeyboardDiffer::new();
        differ.update(&report(0, [0x04, 0x05, 0, 0, 0, 0]))?;

        // A is released and B moves into slot 0.
        let update = differ.update(&report(0, [0x05, 0, 0, 0, 0, 0]))?;
        assert_eq!(
            update.events.as_slice(),
            &[KeyEvent::press(KeyCode::B), KeyEvent::release(KeyCode::B)]
        );
        assert!(
            !update
                .events
                .iter()
                .any(|e| *e == KeyEvent::release(KeyCode::A))
        );
        Ok(())
    }

    #[test]
    fn test_translate_usage() {
        assert_eq!(translate_usage(0x04), Some(KeyCode::A));
        assert_eq!(translate_usage(0x65), Some(KeyCode::COMPOSE));
        assert_eq!(translate_usage(0x87), Some(KeyCode::RO));
        assert_eq!(translate_usage(0x88), Some(KeyCode::KATAKANAHIRAGANA));
        assert_eq!(translate_usage(0x89), Some(KeyCode::YEN));
        assert_eq!(translate_usage(0x90), Some(KeyCode::HANGEUL));
        assert_eq!(translate_usage(0x94), Some(KeyCode::ZENKAKUHANKAKU));
        assert_eq!(translate_usage(0xE1), Some(KeyCode::LEFTSHIFT));
        assert_eq!(translate_usage(0x66), None);
        assert_eq!(translate_usage(0x00), None);
    }

    #[test]
    fn test_unmapped_usage_is_counted() -> Result<(), HidReportError> {
        let mut differ = KeyboardDiffer::new();
        let update = differ.update(&report(0, [0x70, 0x04, 0, 0, 0, 0]))?;
        assert_eq!(update.unmapped, 1);
        assert_eq!(update.events.as_slice(), &[KeyEvent::press(KeyCode::A)]);
        Ok(())
    }
}
