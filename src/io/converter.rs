use crate::io::midi::{MidiEvent, NoteEvent};

/// Reduce a decoded MIDI message to the note event a voice manager handles.
///
/// Note-off becomes a zero-velocity event; its release velocity is discarded.
/// Controllers, pitch bend and program changes are not voice-allocation input
/// and map to `None`. Channel filtering is left to the manager.
pub fn midi_to_note(midi: MidiEvent) -> Option<NoteEvent> {
    match midi {
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        } => Some(NoteEvent::new(channel, key, velocity)),
        MidiEvent::NoteOff { channel, key, .. } => Some(NoteEvent::release(channel, key)),
        _ => None,
    }
}
