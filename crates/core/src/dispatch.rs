//! Outgoing commands toward the device.
//!
//! The peripheral defines exactly one host→device command: the state
//! request. User toggles stay local to the mirror and are deliberately
//! not round-tripped to hardware (the panel is a read-only mirror of the
//! physical switches).

use crate::error::Result;
use crate::report::Report;
use crate::session::DeviceSession;
use tracing::debug;

/// Ask the device to report its current switch state.
///
/// Sends one output report `{0x02, [0x55]}`. Call this once, right after
/// a session opens and before consuming any input report, so the mirror
/// starts from the live hardware state instead of all-off.
pub fn request_state(session: &DeviceSession) -> Result<()> {
    debug!("Requesting switch state");
    session.send(&Report::state_request())
}
