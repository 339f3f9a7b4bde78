//! dip-switch-core: HID report protocol, device discovery, and switch-state mirroring.
//!
//! This crate provides the cross-platform core logic for mirroring the
//! physical state of an 8-position USB DIP-switch peripheral via USB HID.

pub mod device;
pub mod dispatch;
pub mod error;
pub mod mirror;
pub mod report;
pub mod session;
pub mod switches;
pub mod transport;

/// DIP-switch peripheral USB Vendor ID.
pub const DIP_SWITCH_VID: u16 = 0x4247;

/// DIP-switch peripheral USB Product ID.
pub const DIP_SWITCH_PID: u16 = 0x0019;

/// Number of switch positions on the peripheral.
pub const SWITCH_COUNT: usize = 8;
