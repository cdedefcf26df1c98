#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::note::{MAX_CHANNEL, MAX_NOTE, MAX_VELOCITY};

/// A structured MIDI message as an upstream decoder hands it over.
/// Only the note messages reach a voice manager.
#[derive(Debug, Clone, Copy)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

/// The only input a voice manager consumes.
///
/// Velocity 0 is a release, anything else is a press or a retrigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoteEvent {
    pub channel: u8,
    pub note: u8,
    pub velocity: u8,
}

impl NoteEvent {
    /// Build an event, masking every field to its MIDI bit width
    pub fn new(channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            channel: channel & MAX_CHANNEL,
            note: note & MAX_NOTE,
            velocity: velocity & MAX_VELOCITY,
        }
    }

    pub fn press(channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(channel, note, velocity)
    }

    pub fn release(channel: u8, note: u8) -> Self {
        Self::new(channel, note, 0)
    }

    pub fn is_release(&self) -> bool {
        self.velocity == 0
    }
}
