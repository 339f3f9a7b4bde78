//! dip-switch CLI: inspect and follow the state of the USB DIP-switch panel.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use dip_switch_core::device::{self, DIP_SWITCH};
use dip_switch_core::mirror::{StateEvent, SwitchStateMirror};
use dip_switch_core::session::{DeviceSession, SessionEvent};
use dip_switch_core::{dispatch, SWITCH_COUNT};

/// How long `read` waits for the device to answer the state request.
const FIRST_REPORT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(
    name = "dip-switch",
    version,
    about = "Mirror the state of an 8-position USB DIP-switch panel"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List attached DIP-switch units.
    ListDevices {
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
    },
    /// Read the current switch state once and exit.
    Read {
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
    },
    /// Follow switch-state changes until the device disconnects.
    Watch,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ListDevices { json } => {
            let devices = device::discover_devices(DIP_SWITCH)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&devices)?);
            } else if devices.is_empty() {
                println!("No DIP-switch device found ({DIP_SWITCH}).");
                println!("Ensure the panel is connected.");
            } else {
                for dev in &devices {
                    println!(
                        "DIP switch panel (VID: 0x{:04X}, PID: 0x{:04X}, path: {}{})",
                        dev.vid,
                        dev.pid,
                        dev.path,
                        dev.serial
                            .as_deref()
                            .map(|s| format!(", serial: {s}"))
                            .unwrap_or_default()
                    );
                }
            }
        }
        Commands::Read { json } => {
            let session = DeviceSession::open(DIP_SWITCH)?;
            dispatch::request_state(&session)?;
            let events = session.start_reader();

            let mut mirror = SwitchStateMirror::new();
            let deadline = std::time::Instant::now() + FIRST_REPORT_TIMEOUT;
            let states = loop {
                let remaining = deadline
                    .checked_duration_since(std::time::Instant::now())
                    .ok_or_else(|| anyhow::anyhow!("no state report received from device"))?;
                match events.recv_timeout(remaining) {
                    Ok(SessionEvent::Report(report)) => {
                        if let Some(states) = mirror.apply_report(&report) {
                            break states;
                        }
                    }
                    Ok(SessionEvent::Disconnected) => {
                        anyhow::bail!("device disconnected before reporting its state");
                    }
                    Err(_) => anyhow::bail!("no state report received from device"),
                }
            };

            if json {
                println!("{}", serde_json::to_string(&states)?);
            } else {
                print_states(&states);
            }
        }
        Commands::Watch => {
            let session = DeviceSession::open(DIP_SWITCH)?;
            dispatch::request_state(&session)?;
            let events = session.start_reader();

            let mut mirror = SwitchStateMirror::new();
            let result = mirror.drive(events, |event| match event {
                StateEvent::Updated(states) => println!("{states}"),
                StateEvent::Disconnected => eprintln!("Device disconnected."),
            });
            if result.is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_states(states: &dip_switch_core::switches::SwitchVector) {
    for index in 0..SWITCH_COUNT {
        println!(
            "Switch {index}: {}",
            if states.get(index) { "ON" } else { "OFF" }
        );
    }
}
