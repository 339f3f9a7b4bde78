//! Switch-state mirror: the authoritative in-memory copy of the panel.

use std::sync::mpsc;

use crate::error::{Error, Result};
use crate::report::Report;
use crate::session::SessionEvent;
use crate::switches::SwitchVector;
use crate::SWITCH_COUNT;
use tracing::{debug, info};

/// State-change notifications for the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// The switch vector was replaced by an inbound report.
    Updated(SwitchVector),
    /// The device went away; no further updates will follow.
    Disconnected,
}

/// Holds the last-known switch vector and applies inbound reports to it.
///
/// All mutation is expected to happen on one owner thread (see
/// [`drive`](Self::drive)); the mirror itself carries no locking.
#[derive(Debug, Default)]
pub struct SwitchStateMirror {
    states: SwitchVector,
}

impl SwitchStateMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an inbound report.
    ///
    /// Input reports (ID 0x01) replace the whole vector and return the new
    /// one; anything else leaves the state untouched and returns `None`.
    /// Applying the same report twice yields the same vector.
    pub fn apply_report(&mut self, report: &Report) -> Option<SwitchVector> {
        if !report.is_input() {
            return None;
        }
        let byte = *report.data.first()?;

        self.states = SwitchVector::from_byte(byte);
        debug!(switches = %self.states, "Applied input report");
        Some(self.states)
    }

    /// Last applied vector; all-off before the first input report.
    pub fn current(&self) -> SwitchVector {
        self.states
    }

    /// Flip one switch in the local mirror only.
    ///
    /// No command is sent to the device; the hardware remains the source
    /// of truth and the next input report overwrites this.
    pub fn toggle_local(&mut self, index: usize) -> Result<SwitchVector> {
        if index >= SWITCH_COUNT {
            return Err(Error::IndexOutOfRange {
                index,
                max: SWITCH_COUNT - 1,
            });
        }
        self.states.flip(index);
        Ok(self.states)
    }

    /// Drain session events on the owner thread, applying each input
    /// report and forwarding notifications to `on_event`.
    ///
    /// Returns [`Error::ReadLoopTerminated`] once the session disconnects
    /// (after forwarding [`StateEvent::Disconnected`]), or `Ok(())` if the
    /// session's channel closes without an explicit disconnect.
    pub fn drive(
        &mut self,
        events: mpsc::Receiver<SessionEvent>,
        mut on_event: impl FnMut(StateEvent),
    ) -> Result<()> {
        for event in events {
            match event {
                SessionEvent::Report(report) => {
                    if let Some(states) = self.apply_report(&report) {
                        on_event(StateEvent::Updated(states));
                    }
                }
                SessionEvent::Disconnected => {
                    info!("Device disconnected, stopping mirror");
                    on_event(StateEvent::Disconnected);
                    return Err(Error::ReadLoopTerminated("device disconnected".into()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{INPUT_REPORT_ID, OUTPUT_REPORT_ID};

    #[test]
    fn apply_input_report_replaces_vector() {
        let mut mirror = SwitchStateMirror::new();
        let report = Report::new(INPUT_REPORT_ID, vec![0b1011_0000]);

        let updated = mirror.apply_report(&report).unwrap();
        let expected = [true, false, true, true, false, false, false, false];
        assert_eq!(<[bool; 8]>::from(updated), expected);
        assert_eq!(mirror.current(), updated);
    }

    #[test]
    fn apply_ignores_other_report_ids() {
        let mut mirror = SwitchStateMirror::new();
        mirror
            .apply_report(&Report::new(INPUT_REPORT_ID, vec![0xFF]))
            .unwrap();

        let before = mirror.current();
        assert!(mirror
            .apply_report(&Report::new(OUTPUT_REPORT_ID, vec![0x00]))
            .is_none());
        assert!(mirror.apply_report(&Report::new(0x7F, vec![0x00])).is_none());
        assert_eq!(mirror.current(), before);
    }

    #[test]
    fn apply_ignores_empty_payload() {
        let mut mirror = SwitchStateMirror::new();
        assert!(mirror
            .apply_report(&Report::new(INPUT_REPORT_ID, vec![]))
            .is_none());
        assert_eq!(mirror.current(), SwitchVector::default());
    }

    #[test]
    fn apply_is_idempotent_for_identical_reports() {
        let mut mirror = SwitchStateMirror::new();
        let report = Report::new(INPUT_REPORT_ID, vec![0xA5]);

        let first = mirror.apply_report(&report).unwrap();
        let second = mirror.apply_report(&report).unwrap();
        assert_eq!(first, second);
        assert_eq!(mirror.current(), second);
    }

    #[test]
    fn current_starts_all_off() {
        assert_eq!(SwitchStateMirror::new().current(), SwitchVector::default());
    }

    #[test]
    fn toggle_local_is_an_involution() {
        let mut mirror = SwitchStateMirror::new();
        mirror
            .apply_report(&Report::new(INPUT_REPORT_ID, vec![0b0100_0010]))
            .unwrap();
        let original = mirror.current();

        for index in 0..SWITCH_COUNT {
            let flipped = mirror.toggle_local(index).unwrap();
            assert_ne!(flipped.get(index), original.get(index));
            let restored = mirror.toggle_local(index).unwrap();
            assert_eq!(restored, original);
        }
    }

    #[test]
    fn toggle_local_rejects_out_of_range() {
        let mut mirror = SwitchStateMirror::new();
        mirror
            .apply_report(&Report::new(INPUT_REPORT_ID, vec![0x3C]))
            .unwrap();
        let before = mirror.current();

        let result = mirror.toggle_local(8);
        assert!(matches!(
            result,
            Err(Error::IndexOutOfRange { index: 8, max: 7 })
        ));
        assert_eq!(mirror.current(), before);
    }
}
