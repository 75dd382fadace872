//! Output formatting for CLI responses

use anyhow::{Error, Result};
use colored::*;
use famikb_bridge::BridgeConfig;
use serde::Serialize;
use serde_json::json;

use crate::commands::regbus::EncodedMessage;
use crate::commands::simulate::SimulationOutput;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_simulation(output: &SimulationOutput, json: bool) -> Result<()> {
    if json {
        return print_json(output);
    }
    let frame = &output.frame;
    println!("{} {}", "Mode:".bold(), frame.mode);
    println!("Key events applied: {}", output.events_applied);
    for (row, nibble) in frame.rows.iter().enumerate() {
        let bits = format!("{nibble:04b}");
        if *nibble == 0 {
            println!("  row {row:2}: {bits}");
        } else {
            println!("  row {row:2}: {}", bits.green());
        }
    }
    if !frame.keyboard.is_empty() {
        println!("Keyboard window: {}", hex(&frame.keyboard));
    }
    if !frame.report.is_empty() {
        println!("Mouse report:    {}", hex(&frame.report));
    }
    if let Some((dx, dy)) = frame.motion {
        println!("Decoded motion:  dx={dx} dy={dy}");
    }
    if output.faults > 0 {
        println!("{} {}", "Faults:".yellow(), output.faults);
    }
    Ok(())
}

pub fn print_encoded(message: &EncodedMessage, json: bool) -> Result<()> {
    if json {
        return print_json(message);
    }
    println!("{} {:#04x}", "Slave address:".bold(), message.address);
    println!("Window:      {}", hex(&message.window));
    println!("Transaction: {}", hex(&message.transaction));
    Ok(())
}

pub fn print_config(config: &BridgeConfig, json: bool) -> Result<()> {
    if json {
        return print_json(config);
    }
    let mode = config
        .mode
        .map_or_else(|| "absent".red().to_string(), |mode| mode.name().green().to_string());
    println!("{} {}", "Mode:".bold(), mode);
    println!("Input:  {:?}", config.input);
    println!("Mouse:  {:?}", config.mouse);
    println!("Layout: {}", config.layout.name());
    println!("Video:  {:?}", config.video);
    Ok(())
}
