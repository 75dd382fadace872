//! Boot mouse reports.

use famikb_types::{MouseButtons, MouseExtra, MousePositioning, MouseUpdate, VideoStandard};

use crate::{HidReportError, HidResult};

/// Minimum boot mouse report: buttons, dx, dy.
pub const MOUSE_REPORT_MIN_LEN: usize = 3;

/// Parsed boot mouse report. The wheel byte is optional on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootMouseReport {
    pub buttons: u8,
    pub dx: i8,
    pub dy: i8,
    pub wheel: i8,
}

impl BootMouseReport {
    /// # Errors
    ///
    /// Returns [`HidReportError::InvalidReportSize`] for reports shorter than
    /// [`MOUSE_REPORT_MIN_LEN`].
    pub fn parse(data: &[u8]) -> HidResult<Self> {
        match data {
            [buttons, dx, dy, rest @ ..] => Ok(Self {
                buttons: *buttons,
                dx: dx.cast_signed(),
                dy: dy.cast_signed(),
                wheel: rest.first().map_or(0, |w| w.cast_signed()),
            }),
            _ => Err(HidReportError::InvalidReportSize {
                expected: MOUSE_REPORT_MIN_LEN,
                actual: data.len(),
            }),
        }
    }

    /// Left, right and middle (bits 0 to 2).
    #[must_use]
    pub fn mouse_buttons(&self) -> MouseButtons {
        MouseButtons::from_bits_truncate(self.buttons & 0x07)
    }

    /// Wheel direction plus the two auxiliary buttons (bits 3 and 4).
    #[must_use]
    pub fn extra(&self) -> MouseExtra {
        let mut extra = MouseExtra::from_wheel(self.wheel);
        extra.set(MouseExtra::AUX1, self.buttons & 0x08 != 0);
        extra.set(MouseExtra::AUX2, self.buttons & 0x10 != 0);
        extra
    }
}

/// Converts boot mouse reports into canonical mouse updates.
///
/// In relative mode each report's motion is passed through. In absolute mode
/// the motion moves a cursor clamped to the visible raster, and the cursor
/// position is reported.
#[derive(Debug, Clone)]
pub struct MouseDecoder {
    positioning: MousePositioning,
    video: VideoStandard,
    cursor: (i32, i32),
}

impl MouseDecoder {
    #[must_use]
    pub const fn new(positioning: MousePositioning, video: VideoStandard) -> Self {
        Self {
            positioning,
            video,
            cursor: (0, 0),
        }
    }

    #[must_use]
    pub const fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// # Errors
    ///
    /// Returns [`HidReportError::InvalidReportSize`] for short reports.
    pub fn update(&mut self, data: &[u8]) -> HidResult<MouseUpdate> {
        let report = BootMouseReport::parse(data)?;
        let buttons = report.mouse_buttons();
        let (dx, dy) = (i32::from(report.dx), i32::from(report.dy));

        let update = match self.positioning {
            MousePositioning::Relative => MouseUpdate::relative(buttons, dx, dy),
            MousePositioning::Absolute => {
                let (max_x, max_y) = self.video.cursor_bounds();
                let (x, y) = self.cursor;
                self.cursor = (
                    x.saturating_add(dx).clamp(0, max_x),
                    y.saturating_add(dy).clamp(0, max_y),
                );
                MouseUpdate::absolute(buttons, self.cursor.0, self.cursor.1)
            }
        };
        Ok(update.with_extra(report.extra()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_wheel() -> Result<(), HidReportError> {
        let report = BootMouseReport::parse(&[0x01, 0xFF, 0x02])?;
        assert_eq!(report.dx, -1);
        assert_eq!(report.dy, 2);
        assert_eq!(report.wheel, 0);
        assert_eq!(report.mouse_buttons(), MouseButtons::LEFT);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_short_report() {
        assert_eq!(
            BootMouseReport::parse(&[0, 0]),
            Err(HidReportError::InvalidReportSize {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_extra_bits() -> Result<(), HidReportError> {
        let report = BootMouseReport::parse(&[0x1C, 0, 0, 0xFF])?;
        assert_eq!(report.mouse_buttons(), MouseButtons::MIDDLE);
        assert_eq!(
            report.extra(),
            MouseExtra::WHEEL_DOWN | MouseExtra::AUX1 | MouseExtra::AUX2
        );
        Ok(())
    }

    #[test]
    fn test_relative_passthrough() -> Result<(), HidReportError> {
        let mut decoder = MouseDecoder::new(MousePositioning::Relative, VideoStandard::Ntsc);
        let update = decoder.update(&[0x02, 0x05, 0xFB, 0x01])?;
        assert_eq!(
            update,
            MouseUpdate::relative(MouseButtons::RIGHT, 5, -5).with_extra(MouseExtra::WHEEL_UP)
        );
        Ok(())
    }

    #[test]
    fn test_absolute_clamps_ntsc() -> Result<(), HidReportError> {
        let mut decoder = MouseDecoder::new(MousePositioning::Absolute, VideoStandard::Ntsc);
        for _ in 0..4 {
            decoder.update(&[0, 0x7F, 0x7F])?;
        }
        assert_eq!(decoder.cursor(), (255, 223));

        let update = decoder.update(&[0, 0x80, 0x00])?;
        assert_eq!((update.x, update.y), (127, 223));
        assert_eq!(update.positioning, MousePositioning::Absolute);
        Ok(())
    }

    #[test]
    fn test_absolute_clamps_pal() -> Result<(), HidReportError> {
        let mut decoder = MouseDecoder::new(MousePositioning::Absolute, VideoStandard::Pal);
        for _ in 0..4 {
            decoder.update(&[0, 0x00, 0x7F])?;
        }
        assert_eq!(decoder.cursor(), (0, 239));
        Ok(())
    }
}
