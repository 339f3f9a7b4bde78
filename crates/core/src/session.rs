//! Device session: owns one open HID connection and its read loop.
//!
//! The transport's inbound side is pumped by a background thread that
//! pushes decoded reports into a single-consumer channel. Draining that
//! channel from one owner thread serializes all state mutation, so the
//! switch vector itself needs no locking.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::device::{discover_devices, select_device, DeviceIdentity};
use crate::error::{Error, Result};
use crate::report::Report;
use crate::transport::HidTransport;
use tracing::{debug, info, trace, warn};

/// Per-read timeout for the background loop. Short enough that a dropped
/// receiver is noticed promptly, long enough to stay off the CPU.
const READ_TIMEOUT_MS: i32 = 100;

/// Read buffer size; generous for a 2-byte report, matches the usual
/// hidapi endpoint buffer.
const READ_BUF_LEN: usize = 64;

/// Events delivered by the session's read loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// An inbound report arrived.
    Report(Report),
    /// The read loop stopped; no further events will be delivered.
    Disconnected,
}

/// An open connection to one physical DIP-switch unit.
pub struct DeviceSession {
    transport: Arc<dyn HidTransport>,
}

impl DeviceSession {
    /// Enumerate devices matching `identity` and open the first match.
    ///
    /// Fails with [`Error::DeviceNotFound`] when no unit is attached;
    /// callers must treat that as a hard stop.
    pub fn open(identity: DeviceIdentity) -> Result<Self> {
        let devices = discover_devices(identity)?;
        let selected = select_device(identity, &devices)?;

        let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;
        let device = api
            .open(selected.vid, selected.pid)
            .map_err(|e| Error::Hid(format!("open ({identity}): {e}")))?;

        info!(path = %selected.path, "Opened DIP-switch device");
        Ok(Self::from_transport(Arc::new(HidapiTransport {
            device: std::sync::Mutex::new(device),
        })))
    }

    /// Build a session over an already-open transport (tests, mocks).
    pub fn from_transport(transport: Arc<dyn HidTransport>) -> Self {
        Self { transport }
    }

    /// Write one report to the device.
    pub fn send(&self, report: &Report) -> Result<()> {
        let encoded = report.encode();
        trace!(
            report_id = format_args!("0x{:02X}", report.report_id),
            report_hex = format_args!("{:02X?}", encoded),
            "HID TX"
        );
        self.transport.write_report(&encoded)
    }

    /// Spawn the background read loop and return its event channel.
    ///
    /// The loop re-arms after every report, so reports are delivered in
    /// transport order with at most one read in flight. It stops when the
    /// receiver is dropped or the transport fails, sending a final
    /// [`SessionEvent::Disconnected`] in the failure case. Intended to be
    /// called once per session.
    pub fn start_reader(&self) -> mpsc::Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        let transport = Arc::clone(&self.transport);
        thread::spawn(move || read_loop(transport.as_ref(), &tx));
        rx
    }
}

fn read_loop(transport: &dyn HidTransport, tx: &mpsc::Sender<SessionEvent>) {
    let mut buf = [0u8; READ_BUF_LEN];
    loop {
        match transport.read_report(&mut buf, READ_TIMEOUT_MS) {
            Ok(0) => {
                // Timeout with no report; a dropped receiver shows up here
                // as a closed channel on the next send.
                continue;
            }
            Ok(n) => {
                trace!(report_hex = format_args!("{:02X?}", &buf[..n]), "HID RX");
                match Report::decode(&buf[..n]) {
                    Ok(report) => {
                        if tx.send(SessionEvent::Report(report)).is_err() {
                            debug!("Event receiver dropped, stopping read loop");
                            return;
                        }
                    }
                    Err(e) => warn!(error = %e, "Dropping undecodable report"),
                }
            }
            Err(e) => {
                warn!(error = %e, "Read loop terminated");
                let _ = tx.send(SessionEvent::Disconnected);
                return;
            }
        }
    }
}

/// hidapi-backed transport used by [`DeviceSession::open`].
///
/// The handle sits behind a mutex because the read loop and the owner
/// thread share it; reads hold it for at most [`READ_TIMEOUT_MS`].
struct HidapiTransport {
    device: std::sync::Mutex<hidapi::HidDevice>,
}

impl HidTransport for HidapiTransport {
    fn write_report(&self, data: &[u8]) -> Result<()> {
        let device = self.device.lock().unwrap_or_else(|e| e.into_inner());
        let written = device
            .write(data)
            .map_err(|e| Error::WriteFailed(format!("hid write: {e}")))?;
        if written < data.len() {
            return Err(Error::WriteFailed(format!(
                "short write: {written} of {} bytes",
                data.len()
            )));
        }
        Ok(())
    }

    fn read_report(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize> {
        let device = self.device.lock().unwrap_or_else(|e| e.into_inner());
        device
            .read_timeout(buf, timeout_ms)
            .map_err(|e| Error::Hid(format!("hid read: {e}")))
    }
}
