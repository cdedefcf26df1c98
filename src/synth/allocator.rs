use crate::{
    io::midi::NoteEvent,
    synth::{
        manager::{Allocation, VoiceManager},
        voice::VoiceSlot,
    },
};

/// Host-facing view of a voice allocator, independent of its slot and
/// overflow sizes
pub trait VoiceAllocator {
    fn handle_event(&mut self, event: NoteEvent) -> Allocation;
    fn reset(&mut self);
    fn voice(&self, index: usize) -> Option<VoiceSlot>;
    fn voice_count(&self) -> usize;
}

impl<const V: usize, const C: usize> VoiceAllocator for VoiceManager<V, C> {
    fn handle_event(&mut self, event: NoteEvent) -> Allocation {
        self.handle(event)
    }

    fn reset(&mut self) {
        VoiceManager::reset(self)
    }

    fn voice(&self, index: usize) -> Option<VoiceSlot> {
        VoiceManager::voice(self, index)
    }

    fn voice_count(&self) -> usize {
        VoiceManager::voice_count(self)
    }
}
