//! Fault codes for the decoder and responder contexts.
//!
//! Every condition here is local and non-fatal: the affected input is dropped
//! or a default is used, and the fault is counted. Fault codes are:
//! - `Copy` with a fixed `#[repr(u8)]` representation
//! - indexable, so counters can be kept in a fixed array

use core::fmt;

/// Severity used when faults are summarised for a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Expected in normal operation.
    Info = 0,
    /// Input was lost or ignored.
    Warning = 1,
    /// The bridge is running in a degraded configuration.
    Error = 2,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// Local, non-fatal fault conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaultCode {
    /// Register-bus transaction whose first byte was not address 0.
    GarbageTransaction = 1,
    /// Ring buffer was full; the oldest entry was evicted.
    RingOverflow = 2,
    /// Raw scancode or usage with no canonical mapping.
    UnmappedKeycode = 3,
    /// Canonical keycode with no cell in the active matrix layout.
    UnmappedCell = 4,
    /// Mode strap value outside the supported range.
    UnsupportedMode = 5,
    /// HID report shorter than the boot-protocol layout.
    ShortReport = 6,
    /// HID keyboard reported phantom/rollover state.
    HidRollover = 7,
    /// Input on a path the source strap did not select.
    InputDisabled = 8,
}

impl FaultCode {
    /// Number of distinct fault codes.
    pub const COUNT: usize = 8;

    /// All fault codes in code order.
    pub const ALL: [FaultCode; Self::COUNT] = [
        FaultCode::GarbageTransaction,
        FaultCode::RingOverflow,
        FaultCode::UnmappedKeycode,
        FaultCode::UnmappedCell,
        FaultCode::UnsupportedMode,
        FaultCode::ShortReport,
        FaultCode::HidRollover,
        FaultCode::InputDisabled,
    ];

    /// Numeric code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Zero-based index, for fixed-size counter arrays.
    pub const fn index(self) -> usize {
        (self as u8 - 1) as usize
    }

    /// Severity of the condition.
    pub const fn severity(self) -> ErrorSeverity {
        match self {
            FaultCode::RingOverflow
            | FaultCode::UnmappedKeycode
            | FaultCode::UnmappedCell
            | FaultCode::InputDisabled => ErrorSeverity::Info,
            FaultCode::GarbageTransaction | FaultCode::ShortReport | FaultCode::HidRollover => {
                ErrorSeverity::Warning
            }
            FaultCode::UnsupportedMode => ErrorSeverity::Error,
        }
    }

    /// Look a fault up by numeric code.
    ///
    /// Returns `None` if the code does not correspond to a known fault.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(FaultCode::GarbageTransaction),
            2 => Some(FaultCode::RingOverflow),
            3 => Some(FaultCode::UnmappedKeycode),
            4 => Some(FaultCode::UnmappedCell),
            5 => Some(FaultCode::UnsupportedMode),
            6 => Some(FaultCode::ShortReport),
            7 => Some(FaultCode::HidRollover),
            8 => Some(FaultCode::InputDisabled),
            _ => None,
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultCode::GarbageTransaction => write!(f, "Register-bus transaction discarded"),
            FaultCode::RingOverflow => write!(f, "Key ring overflow"),
            FaultCode::UnmappedKeycode => write!(f, "Unmapped raw keycode"),
            FaultCode::UnmappedCell => write!(f, "Keycode has no matrix cell"),
            FaultCode::UnsupportedMode => write!(f, "Unsupported mode strap value"),
            FaultCode::ShortReport => write!(f, "HID report too short"),
            FaultCode::HidRollover => write!(f, "HID keyboard rollover"),
            FaultCode::InputDisabled => write!(f, "Input from a path not selected at boot"),
        }
    }
}

impl std::error::Error for FaultCode {}
