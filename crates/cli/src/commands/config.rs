//! `straps` and `check-config`: show the configuration the bridge would boot with.

use std::path::Path;

use anyhow::Result;
use famikb_bridge::{BridgeConfig, Straps};

use crate::output;

pub fn straps(mode0: u8, mode1: u8, source: u8, json: bool) -> Result<()> {
    let config = BridgeConfig::from_straps(Straps::new(mode0, mode1, source))?;
    output::print_config(&config, json)
}

pub fn check(path: &Path, json: bool) -> Result<()> {
    let config = BridgeConfig::load(path)?;
    output::print_config(&config, json)
}
