//! Boot-time selections: wire convention, input source, raster bounds.

use serde::{Deserialize, Serialize};

/// Wire convention presented on the expansion port. Chosen once at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Mode {
    /// Raw serialized keyboard and mouse byte streams.
    Generic = 0,
    /// Family Basic key matrix, 18 rows of 4 cells.
    FamilyBasic = 1,
    /// Subor keyboard matrix, 26 rows of 4 cells, plus serial mouse reports.
    Subor = 2,
    /// Hori Track trackball word plus the Family Basic matrix.
    HoriTrack = 3,
}

impl Mode {
    /// Decode the raw strap value. Values outside `0..=3` are unsupported.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Generic),
            1 => Some(Self::FamilyBasic),
            2 => Some(Self::Subor),
            3 => Some(Self::HoriTrack),
            _ => None,
        }
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Number of 4-cell rows scanned by the console, `0` for Generic.
    pub const fn matrix_rows(self) -> usize {
        match self {
            Self::Generic => 0,
            Self::FamilyBasic | Self::HoriTrack => 18,
            Self::Subor => 26,
        }
    }

    /// Number of matrix cells in use.
    pub const fn matrix_cells(self) -> usize {
        self.matrix_rows() * 4
    }

    pub const fn is_matrix(self) -> bool {
        !matches!(self, Self::Generic)
    }

    /// Whether the mouse report carries only motion deltas, so an absolute
    /// cursor position cannot be sent as is.
    pub const fn reports_mouse_deltas(self) -> bool {
        matches!(self, Self::Subor | Self::HoriTrack)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::FamilyBasic => "family_basic",
            Self::Subor => "subor",
            Self::HoriTrack => "hori_track",
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which upstream path feeds the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// Directly attached PS/2 keyboard.
    #[default]
    Serial,
    /// Companion host on the register bus, or a USB HID keyboard/mouse.
    Host,
}

/// Video standard of the console, bounds the absolute cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStandard {
    #[default]
    Ntsc,
    Pal,
}

impl VideoStandard {
    /// Visible scanlines.
    pub const fn visible_lines(self) -> i32 {
        match self {
            Self::Ntsc => 224,
            Self::Pal => 240,
        }
    }

    /// Inclusive cursor bounds `(max_x, max_y)`.
    pub const fn cursor_bounds(self) -> (i32, i32) {
        (255, self.visible_lines() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        assert_eq!(Mode::from_raw(0), Some(Mode::Generic));
        assert_eq!(Mode::from_raw(3), Some(Mode::HoriTrack));
        assert_eq!(Mode::from_raw(4), None);
        assert_eq!(Mode::from_raw(0xFF), None);
        for raw in 0..4 {
            assert_eq!(Mode::from_raw(raw).map(Mode::raw), Some(raw));
        }
    }

    #[test]
    fn test_matrix_geometry() {
        assert_eq!(Mode::FamilyBasic.matrix_cells(), 72);
        assert_eq!(Mode::HoriTrack.matrix_cells(), 72);
        assert_eq!(Mode::Subor.matrix_cells(), 104);
        assert_eq!(Mode::Generic.matrix_cells(), 0);
        assert!(!Mode::Generic.is_matrix());
    }

    #[test]
    fn test_delta_only_mouse_modes() {
        assert!(Mode::Subor.reports_mouse_deltas());
        assert!(Mode::HoriTrack.reports_mouse_deltas());
        assert!(!Mode::Generic.reports_mouse_deltas());
        assert!(!Mode::FamilyBasic.reports_mouse_deltas());
    }

    #[test]
    fn test_cursor_bounds() {
        assert_eq!(VideoStandard::Ntsc.cursor_bounds(), (255, 223));
        assert_eq!(VideoStandard::Pal.cursor_bounds(), (255, 239));
    }
}
