//! Device identity and discovery.

use crate::error::{Error, Result};
use crate::{DIP_SWITCH_PID, DIP_SWITCH_VID};
use tracing::{debug, info};

/// Immutable vendor/product ID pair identifying which device to bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub vid: u16,
    pub pid: u16,
}

/// Identity of the supported DIP-switch peripheral.
pub const DIP_SWITCH: DeviceIdentity = DeviceIdentity {
    vid: DIP_SWITCH_VID,
    pid: DIP_SWITCH_PID,
};

impl std::fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VID=0x{:04X} PID=0x{:04X}", self.vid, self.pid)
    }
}

/// Information about a discovered DIP-switch unit.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DeviceInfo {
    pub vid: u16,
    pub pid: u16,
    pub path: String,
    pub serial: Option<String>,
}

/// Discover all attached units matching `identity`.
///
/// Enumerates USB HID devices and returns info for every exact
/// vendor/product match, in enumeration order. Session open takes the
/// first; with more than one unit attached the tie-break is whatever
/// order the platform enumerates in.
pub fn discover_devices(identity: DeviceIdentity) -> Result<Vec<DeviceInfo>> {
    debug!("Starting HID device enumeration");
    let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;

    let mut devices = Vec::new();
    for info in api.device_list() {
        if info.vendor_id() != identity.vid || info.product_id() != identity.pid {
            continue;
        }

        info!(
            vid = format_args!("0x{:04X}", info.vendor_id()),
            pid = format_args!("0x{:04X}", info.product_id()),
            path = %info.path().to_string_lossy(),
            "Found DIP-switch device"
        );
        devices.push(DeviceInfo {
            vid: info.vendor_id(),
            pid: info.product_id(),
            path: info.path().to_string_lossy().into_owned(),
            serial: info.serial_number().map(|s| s.to_string()),
        });
    }

    debug!(count = devices.len(), "Device enumeration complete");
    Ok(devices)
}

/// Select the unit a session should bind to: first exact match.
pub fn select_device(identity: DeviceIdentity, devices: &[DeviceInfo]) -> Result<&DeviceInfo> {
    devices
        .first()
        .ok_or_else(|| Error::DeviceNotFound(identity.to_string()))
}
