// Purpose - external interfaces: the structured events a decoder hands over

pub mod converter;
pub mod midi;

pub use converter::midi_to_note;
pub use midi::{MidiEvent, NoteEvent};
