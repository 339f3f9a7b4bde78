//! HID report encoding and decoding for the DIP-switch peripheral.
//!
//! The device uses two fixed-format reports, each a 1-byte report ID
//! followed by a 1-byte payload:
//! - Input report (0x01, device → host): payload is the switch bitmask.
//! - Output report (0x02, host → device): payload is a command byte.
//!
//! The only defined command is 0x55, "report current state": the firmware
//! answers it with one input report carrying the live bitmask.

use crate::error::{Error, Result};

/// Report ID for input reports (device → host, switch bitmask).
pub const INPUT_REPORT_ID: u8 = 0x01;
/// Report ID for output reports (host → device, command byte).
pub const OUTPUT_REPORT_ID: u8 = 0x02;

/// Command byte requesting the device report its current switch state.
pub const STATE_REQUEST: u8 = 0x55;

/// Payload length for both report directions.
pub const REPORT_DATA_LEN: usize = 1;
/// Total report length on the wire (report ID + payload).
pub const REPORT_LEN: usize = 1 + REPORT_DATA_LEN;

/// A tagged fixed-size HID report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Report ID distinguishing report semantics.
    pub report_id: u8,
    /// Payload bytes (at least one used by the device).
    pub data: Vec<u8>,
}

impl Report {
    /// Create a report with the given ID and payload.
    pub fn new(report_id: u8, data: Vec<u8>) -> Self {
        Self { report_id, data }
    }

    /// Build the output report requesting the current switch state.
    pub fn state_request() -> Self {
        Self::new(OUTPUT_REPORT_ID, vec![STATE_REQUEST])
    }

    /// Encode into a wire buffer, padding the payload to the device's
    /// fixed report length.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + self.data.len().max(REPORT_DATA_LEN));
        buf.push(self.report_id);
        buf.extend_from_slice(&self.data);
        while buf.len() < REPORT_LEN {
            buf.push(0x00);
        }
        buf
    }

    /// Decode a raw HID buffer into a structured report.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        if raw.len() < 2 {
            return Err(Error::Malformed(format!(
                "report too short: {} bytes (minimum 2)",
                raw.len()
            )));
        }

        Ok(Self {
            report_id: raw[0],
            data: raw[1..].to_vec(),
        })
    }

    /// Whether this is an input report carrying a switch bitmask.
    pub fn is_input(&self) -> bool {
        self.report_id == INPUT_REPORT_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_state_request() {
        let encoded = Report::state_request().encode();
        assert_eq!(encoded, vec![OUTPUT_REPORT_ID, STATE_REQUEST]);
    }

    #[test]
    fn encode_pads_empty_payload() {
        let encoded = Report::new(OUTPUT_REPORT_ID, vec![]).encode();
        assert_eq!(encoded, vec![OUTPUT_REPORT_ID, 0x00]);
    }

    #[test]
    fn decode_input_report() {
        let report = Report::decode(&[INPUT_REPORT_ID, 0xB0]).unwrap();
        assert!(report.is_input());
        assert_eq!(report.data, vec![0xB0]);
    }

    #[test]
    fn decode_keeps_oversized_payload() {
        // Some platforms hand back the full endpoint buffer.
        let report = Report::decode(&[INPUT_REPORT_ID, 0xFF, 0x00, 0x00]).unwrap();
        assert_eq!(report.data.len(), 3);
        assert_eq!(report.data[0], 0xFF);
    }

    #[test]
    fn decode_rejects_short_buffer() {
        assert!(Report::decode(&[]).is_err());
        assert!(Report::decode(&[INPUT_REPORT_ID]).is_err());
    }

    #[test]
    fn roundtrip() {
        let report = Report::new(INPUT_REPORT_ID, vec![0xA5]);
        let decoded = Report::decode(&report.encode()).unwrap();
        assert_eq!(decoded, report);
    }
}
