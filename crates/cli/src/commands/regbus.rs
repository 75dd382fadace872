//! `encode-regbus`: the window image a host writes to the bridge.

use anyhow::Result;
use famikb_regbus_protocol::{HostFlags, HostMessage, SLAVE_ADDRESS};
use famikb_types::{KeyEvent, MouseButtons, MouseExtra, MousePositioning, RELEASE_BIT};
use serde::Serialize;

use crate::commands::EncodeRegbusArgs;
use crate::error::{CliError, parse_hex_byte};
use crate::output;

#[derive(Debug, Serialize)]
pub struct EncodedMessage {
    pub address: u8,
    pub window: Vec<u8>,
    pub transaction: Vec<u8>,
}

pub fn execute(args: &EncodeRegbusArgs, json: bool) -> Result<()> {
    let message = build_message(args)?;
    output::print_encoded(
        &EncodedMessage {
            address: SLAVE_ADDRESS,
            window: message.to_window().to_vec(),
            transaction: message.transaction().to_vec(),
        },
        json,
    )
}

pub fn build_message(args: &EncodeRegbusArgs) -> Result<HostMessage, CliError> {
    let has_mouse = args.left
        || args.right
        || args.middle
        || args.relative
        || args.x != 0
        || args.y != 0
        || args.extra != 0;

    let mut message = if has_mouse {
        let mut buttons = MouseButtons::empty();
        buttons.set(MouseButtons::LEFT, args.left);
        buttons.set(MouseButtons::RIGHT, args.right);
        buttons.set(MouseButtons::MIDDLE, args.middle);
        let positioning = if args.relative {
            MousePositioning::Relative
        } else {
            MousePositioning::Absolute
        };
        HostMessage::mouse(buttons, args.x, args.y, positioning)
            .with_extra(MouseExtra::from_bits_truncate(args.extra))
    } else {
        HostMessage {
            flags: HostFlags::SIGNATURE,
            ..HostMessage::default()
        }
    };

    if let Some(key) = &args.key {
        let mut byte = parse_hex_byte(key)?;
        if args.release {
            byte |= RELEASE_BIT;
        }
        let event = KeyEvent::from_wire_byte(byte)
            .ok_or_else(|| CliError::InvalidArgument(format!("no key for byte {byte:#04x}")))?;
        message = message.with_key(event);
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> EncodeRegbusArgs {
        EncodeRegbusArgs {
            key: None,
            release: false,
            left: false,
            right: false,
            middle: false,
            x: 0,
            y: 0,
            relative: false,
            extra: 0,
        }
    }

    #[test]
    fn test_key_release_window() -> Result<(), CliError> {
        let message = build_message(&EncodeRegbusArgs {
            key: Some("04".to_string()),
            release: true,
            ..args()
        })?;
        let window = message.to_window();
        assert_eq!(window.get(1).copied(), Some(0x84));
        assert!(message.flags.contains(HostFlags::KEYBOARD_PRESENT));
        assert!(!message.flags.contains(HostFlags::MOUSE_PRESENT));
        Ok(())
    }

    #[test]
    fn test_relative_mouse_window() -> Result<(), CliError> {
        let message = build_message(&EncodeRegbusArgs {
            left: true,
            x: -3,
            y: 200,
            relative: true,
            ..args()
        })?;
        assert!(message.flags.contains(HostFlags::RELATIVE | HostFlags::LEFT));
        assert_eq!(message.x, 0xFD);
        assert_eq!(message.y, 0x7F);
        Ok(())
    }

    #[test]
    fn test_bad_key_rejected() {
        let result = build_message(&EncodeRegbusArgs {
            key: Some("02".to_string()),
            ..args()
        });
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
