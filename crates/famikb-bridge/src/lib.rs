//! # famikb-bridge
//!
//! Boot-time wiring for the keyboard bridge: resolve the mode from straps or
//! a configuration file, build the shared state, and hand back the two
//! execution contexts.
//!
//! ```text
//!             ┌──────────────────┐      ┌─────────────┐      ┌──────────────┐
//! PS/2 ─────► │                  │      │             │      │              │
//! regbus ───► │  DecoderContext  │ ───► │ SharedState │ ───► │ BusResponder │ ───► $4017
//! USB HID ──► │                  │      │             │      │              │
//!             └──────────────────┘      └─────────────┘      └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use famikb_bridge::{BridgeConfig, Straps, boot};
//! use famikb_types::Mode;
//!
//! # fn main() -> Result<(), famikb_errors::ConfigError> {
//! let config = BridgeConfig::from_straps(Straps::new(1, 0, 0))?;
//! let mut bridge = boot(&config)?;
//! assert_eq!(bridge.mode(), Some(Mode::FamilyBasic));
//!
//! // Make code for A
//! bridge.decoders_mut().feed_serial(0x1C);
//! assert!(bridge.state().matrix().get(48));
//! # Ok(())
//! # }
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod decoders;

pub use config::{BridgeConfig, Straps};
pub use decoders::DecoderContext;

use std::sync::Arc;

use famikb_errors::{ConfigResult, FaultCode};
use famikb_responder::BusResponder;
use famikb_state::SharedState;
use famikb_types::Mode;
use tracing::{info, warn};

/// A booted bridge: shared state plus both execution contexts.
#[derive(Debug)]
pub struct Bridge {
    config: BridgeConfig,
    state: Arc<SharedState>,
    responder: BusResponder,
    decoders: DecoderContext,
}

/// Validate `config` and build a bridge for it.
///
/// An unsupported mode is not an error: the bridge boots with the absent
/// responder, which drives `0` forever.
///
/// # Errors
///
/// [`ConfigError::InvalidValue`](famikb_errors::ConfigError::InvalidValue)
/// from [`BridgeConfig::validate`].
pub fn boot(config: &BridgeConfig) -> ConfigResult<Bridge> {
    config.validate()?;

    let state = Arc::new(match config.mode {
        Some(mode) => SharedState::new(mode),
        None => SharedState::absent(),
    });
    let responder = BusResponder::new(Arc::clone(&state));
    let decoders = DecoderContext::new(config, Arc::clone(&state));

    match config.mode {
        Some(mode) => info!(
            mode = %mode,
            input = ?config.input,
            layout = config.layout.name(),
            "famikb bridge booted"
        ),
        None => {
            state.counters().record_fault(FaultCode::UnsupportedMode);
            warn!("unsupported mode selected, responder outputs 0");
        }
    }

    Ok(Bridge {
        config: *config,
        state,
        responder,
        decoders,
    })
}

impl Bridge {
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.config.mode
    }

    #[must_use]
    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    pub fn responder_mut(&mut self) -> &mut BusResponder {
        &mut self.responder
    }

    pub fn decoders_mut(&mut self) -> &mut DecoderContext {
        &mut self.decoders
    }

    /// Split into the responder and decoder contexts, to be moved onto their
    /// own cores or threads.
    #[must_use]
    pub fn into_parts(self) -> (BusResponder, DecoderContext) {
        (self.responder, self.decoders)
    }
}
