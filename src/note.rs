/*
Note payload
============

A `PressedNote` is a key that is held down: a MIDI note number and the
velocity it was (last) struck with. Both voice slots and the overflow store
carry this payload; neither uses velocity 0 as an "empty" marker, that job
belongs to their own tagged states.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest MIDI note number (7 bits)
pub const MAX_NOTE: u8 = 0x7F;

/// Highest MIDI velocity (7 bits)
pub const MAX_VELOCITY: u8 = 0x7F;

/// Highest MIDI channel index (4 bits)
pub const MAX_CHANNEL: u8 = 0x0F;

/// A held key: note number plus strike velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PressedNote {
    pub note: u8,
    pub velocity: u8,
}

impl PressedNote {
    pub fn new(note: u8, velocity: u8) -> Self {
        Self { note, velocity }
    }

    /// `(note, velocity)` as a renderer reads it
    pub fn as_pair(&self) -> (u8, u8) {
        (self.note, self.velocity)
    }
}

impl From<(u8, u8)> for PressedNote {
    fn from((note, velocity): (u8, u8)) -> Self {
        Self::new(note, velocity)
    }
}
