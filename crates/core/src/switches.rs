//! The 8-position switch vector and its bitmask mapping.

use crate::SWITCH_COUNT;

/// Ordered state of the 8 physical switches.
///
/// Index 0 corresponds to the most-significant bit of the input report
/// payload: switch `i` is bit `0x80 >> i`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SwitchVector([bool; SWITCH_COUNT]);

impl SwitchVector {
    /// Decode a switch bitmask byte, MSB first.
    pub fn from_byte(byte: u8) -> Self {
        let mut states = [false; SWITCH_COUNT];
        for (i, state) in states.iter_mut().enumerate() {
            let mask = 0x80u8 >> i;
            *state = byte & mask == mask;
        }
        Self(states)
    }

    /// Encode back into the bitmask byte. Exact inverse of [`from_byte`].
    ///
    /// [`from_byte`]: Self::from_byte
    pub fn to_byte(&self) -> u8 {
        let mut byte = 0u8;
        for (i, &state) in self.0.iter().enumerate() {
            if state {
                byte |= 0x80 >> i;
            }
        }
        byte
    }

    /// State of a single switch. Panics if `index` is out of range;
    /// callers holding untrusted indices go through
    /// [`SwitchStateMirror::toggle_local`](crate::mirror::SwitchStateMirror::toggle_local).
    pub fn get(&self, index: usize) -> bool {
        self.0[index]
    }

    /// Iterate over the switch states in panel order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn flip(&mut self, index: usize) {
        self.0[index] = !self.0[index];
    }
}

impl From<SwitchVector> for [bool; SWITCH_COUNT] {
    fn from(vector: SwitchVector) -> Self {
        vector.0
    }
}

impl std::fmt::Display for SwitchVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for state in self.0 {
            write!(f, "{}", if state { '1' } else { '0' })?;
        }
        Ok(())
    }
}
