//! HID transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that real HID devices and
//! mock devices share the same interface.

use crate::error::Result;

/// Abstraction over raw HID read/write.
///
/// Implementations must support blocking writes and timed reads. `Sync` is
/// required because the session's background read loop and the owner thread
/// hold the same transport.
pub trait HidTransport: Send + Sync {
    /// Write a raw HID report buffer (report ID first).
    fn write_report(&self, data: &[u8]) -> Result<()>;

    /// Read one raw HID report into `buf`, waiting up to `timeout_ms`.
    ///
    /// Returns the number of bytes read; 0 means the timeout elapsed with
    /// no report available.
    fn read_report(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize>;
}


#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;

    #[test]
    fn mock_records_writes() {
        let mock = MockTransport::new();
        mock.write_report(&[0x02, 0x55]).unwrap();
        assert_eq!(mock.written(), vec![vec![0x02, 0x55]]);
    }

    #[test]
    fn mock_serves_scripted_reads() {
        let mock = MockTransport::new();
        mock.push_inbound(vec![0x01, 0xB0]);
        mock.push_timeout();

        let mut buf = [0u8; 8];
        assert_eq!(mock.read_report(&mut buf, 100).unwrap(), 2);
        assert_eq!(&buf[..2], &[0x01, 0xB0]);
        assert_eq!(mock.read_report(&mut buf, 100).unwrap(), 0);
        assert!(mock.read_report(&mut buf, 100).is_err());
    }

    #[test]
    fn mock_write_failure() {
        let mock = MockTransport::new();
        mock.fail_writes("unplugged");
        assert!(mock.write_report(&[0x02, 0x55]).is_err());
        assert!(mock.written().is_empty());
    }
}
