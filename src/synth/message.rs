#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::{
    io::midi::NoteEvent,
    synth::manager::{Allocation, VoiceManager},
};

/// Control messages a host queues for a voice manager
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VoiceMessage {
    Note(NoteEvent),
    /// All notes off
    Reset,
}

impl From<NoteEvent> for VoiceMessage {
    fn from(event: NoteEvent) -> Self {
        VoiceMessage::Note(event)
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<VoiceMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<VoiceMessage> {
    fn pop(&mut self) -> Option<VoiceMessage> {
        Consumer::pop(self).ok()
    }
}

impl<const V: usize, const C: usize> VoiceManager<V, C> {
    /// Apply every pending message in arrival order.
    ///
    /// `on_allocation` sees the outcome of each note event. Returns how many
    /// messages were consumed.
    pub fn drain<R, F>(&mut self, rx: &mut R, mut on_allocation: F) -> usize
    where
        R: MessageReceiver + ?Sized,
        F: FnMut(Allocation),
    {
        let mut count = 0;
        while let Some(msg) = rx.pop() {
            match msg {
                VoiceMessage::Note(event) => on_allocation(self.handle(event)),
                VoiceMessage::Reset => self.reset(),
            }
            count += 1;
        }
        count
    }
}
