//! Computer keyboard as a one-octave MIDI keyboard
//!
//! Terminals report key presses but not releases, so each key toggles its
//! note: first press sends note-on, the next sends note-off.

use voicesteal::{note::MAX_NOTE, NoteEvent};

/// Home row plus the black keys above it, C to C
const KEYS: [char; 13] = ['a', 'w', 's', 'e', 'd', 'f', 't', 'g', 'y', 'h', 'u', 'j', 'k'];

const MAX_OCTAVE: u8 = 9;

pub struct Keyboard {
    channel: u8,
    octave: u8,
    velocity: u8,
    held: [bool; 128],
}

impl Keyboard {
    pub fn new(channel: u8) -> Self {
        Self {
            channel,
            octave: 4,
            velocity: 100,
            held: [false; 128],
        }
    }

    /// MIDI note for a key at the current octave
    pub fn note_for(&self, key: char) -> Option<u8> {
        let offset = KEYS.iter().position(|&k| k == key)?;
        let note = 12 * (self.octave as usize + 1) + offset;
        (note <= MAX_NOTE as usize).then_some(note as u8)
    }

    /// Flip a note between held and released
    pub fn toggle(&mut self, note: u8) -> NoteEvent {
        let held = &mut self.held[(note & MAX_NOTE) as usize];
        *held = !*held;
        if *held {
            NoteEvent::press(self.channel, note, self.velocity)
        } else {
            NoteEvent::release(self.channel, note)
        }
    }

    pub fn octave_down(&mut self) {
        self.octave = self.octave.saturating_sub(1);
    }

    pub fn octave_up(&mut self) {
        self.octave = (self.octave + 1).min(MAX_OCTAVE);
    }

    /// Digits 1-9 span the velocity range
    pub fn set_velocity_step(&mut self, step: u32) {
        let step = step.clamp(1, 9);
        self.velocity = (step * 127 / 9) as u8;
    }

    pub fn release_all(&mut self) {
        self.held = [false; 128];
    }

    pub fn is_held(&self, note: u8) -> bool {
        self.held[(note & MAX_NOTE) as usize]
    }

    /// Each key of the current octave with whether its note is held
    pub fn keys(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        KEYS.iter().map(move |&key| {
            let held = self.note_for(key).is_some_and(|note| self.is_held(note));
            (key, held)
        })
    }

    pub fn octave(&self) -> u8 {
        self.octave
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }
}
