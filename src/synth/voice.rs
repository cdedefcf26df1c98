use crate::note::PressedNote;

/// One sound-generation voice as the manager sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceSlot {
    #[default]
    Idle, // Available for allocation
    Sounding(PressedNote),
}

impl VoiceSlot {
    pub fn start(&mut self, pressed: PressedNote) {
        *self = VoiceSlot::Sounding(pressed);
    }

    pub fn free(&mut self) {
        *self = VoiceSlot::Idle;
    }

    pub fn is_free(&self) -> bool {
        matches!(self, VoiceSlot::Idle)
    }

    pub fn is_sounding(&self) -> bool {
        !self.is_free()
    }

    /// Note currently sounding, if any
    pub fn note(&self) -> Option<u8> {
        self.pressed().map(|pressed| pressed.note)
    }

    pub fn pressed(&self) -> Option<PressedNote> {
        match self {
            VoiceSlot::Idle => None,
            VoiceSlot::Sounding(pressed) => Some(*pressed),
        }
    }

    /// `(note, velocity)` for a renderer; an idle voice reads `(0, 0)`
    pub fn as_pair(&self) -> (u8, u8) {
        self.pressed().map_or((0, 0), |pressed| pressed.as_pair())
    }
}
