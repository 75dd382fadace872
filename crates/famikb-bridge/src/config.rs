//! Boot configuration: strap values or a YAML file.

use std::path::Path;

use famikb_errors::{ConfigError, ConfigResult};
use famikb_ps2_protocol::ScancodeLayout;
use famikb_types::{InputSource, Mode, MousePositioning, VideoStandard};
use serde::{Deserialize, Serialize};

/// Everything the bridge reads once at boot.
///
/// ```yaml
/// mode: subor          # generic | family_basic | subor | hori_track, ~ for none
/// input: host          # serial | host
/// mouse: relative      # relative | absolute
/// layout: us104        # us104 | jis106
/// video: ntsc          # ntsc | pal
/// ```
///
/// Missing fields take the values both straps low would select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Wire convention; `None` boots the absent responder.
    pub mode: Option<Mode>,
    pub input: InputSource,
    pub mouse: MousePositioning,
    pub layout: ScancodeLayout,
    pub video: VideoStandard,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            mode: Some(Mode::Generic),
            input: InputSource::default(),
            mouse: MousePositioning::default(),
            layout: ScancodeLayout::default(),
            video: VideoStandard::default(),
        }
    }
}

impl BridgeConfig {
    /// Parse and validate YAML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed YAML or unknown values,
    /// [`ConfigError::InvalidValue`] for combinations [`validate`](Self::validate) rejects.
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_yaml_str`](Self::from_yaml_str).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Configuration selected by the board straps; every other field keeps
    /// its default.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStrap`] when a strap is not `0` or `1`.
    pub fn from_straps(straps: Straps) -> ConfigResult<Self> {
        Ok(Self {
            mode: Mode::from_raw(straps.mode_raw()?),
            input: straps.input_source()?,
            ..Self::default()
        })
    }

    /// Config for a raw mode value; values outside `0..=3` select no mode.
    #[must_use]
    pub fn with_raw_mode(mut self, raw: u8) -> Self {
        self.mode = Mode::from_raw(raw);
        self
    }

    /// Reject combinations the bridge cannot serve.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] when absolute positioning is requested
    /// for a mode whose report carries deltas.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.mouse == MousePositioning::Absolute
            && self.mode.is_some_and(Mode::reports_mouse_deltas)
        {
            return Err(ConfigError::invalid_value(
                "mouse",
                "absolute positioning is only carried by the generic mode",
            ));
        }
        Ok(())
    }
}

/// Raw strap levels as read by the board layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Straps {
    /// Mode bit 0.
    pub mode0: u8,
    /// Mode bit 1.
    pub mode1: u8,
    /// `0` serial keyboard, `1` host (register bus or USB).
    pub source: u8,
}

impl Straps {
    #[must_use]
    pub const fn new(mode0: u8, mode1: u8, source: u8) -> Self {
        Self {
            mode0,
            mode1,
            source,
        }
    }

    /// Raw mode value `mode1:mode0`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStrap`] when a mode strap is not `0` or `1`.
    pub fn mode_raw(&self) -> ConfigResult<u8> {
        let low = strap_bit("mode0", self.mode0)?;
        let high = strap_bit("mode1", self.mode1)?;
        Ok(u8::from(low) | (u8::from(high) << 1))
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidStrap`] when the source strap is not `0` or `1`.
    pub fn input_source(&self) -> ConfigResult<InputSource> {
        Ok(if strap_bit("source", self.source)? {
            InputSource::Host
        } else {
            InputSource::Serial
        })
    }
}

fn strap_bit(name: &'static str, value: u8) -> ConfigResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(ConfigError::InvalidStrap { name, value }),
    }
}
