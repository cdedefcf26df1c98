use tracing::{debug, trace};

use crate::{
    io::midi::NoteEvent,
    note::{PressedNote, MAX_CHANNEL},
    store::overflow::OverflowStore,
    synth::{
        config::{ConfigError, ManagerConfig},
        voice::VoiceSlot,
    },
    OVERFLOW_CAPACITY,
};

/// The voice every steal lands on
pub const STEAL_VOICE: usize = 0;

/// What a single event did to the manager's state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// Event was addressed to another channel
    Ignored,
    /// New note took an idle voice
    Assigned { voice: usize, note: PressedNote },
    /// Note was already sounding; its velocity was replaced
    Retriggered { voice: usize, note: PressedNote },
    /// Note was already waiting in the overflow store; its velocity was replaced
    RetriggeredQueued { note: PressedNote },
    /// No voice was free, so `voice` was taken from `displaced`.
    /// `queued` is false when the overflow store was full and `displaced` is gone.
    Stolen {
        voice: usize,
        note: PressedNote,
        displaced: PressedNote,
        queued: bool,
    },
    /// Released note's voice went to the most recently stolen note
    Restored {
        voice: usize,
        released: u8,
        note: PressedNote,
    },
    /// Released note's voice went silent
    Silenced { voice: usize, released: u8 },
    /// Released note was waiting in the overflow store and has been dropped from it
    Dequeued { note: PressedNote },
    /// Release for a note that is neither sounding nor queued
    Untracked { note: u8 },
}

/// Assigns notes on one MIDI channel to a fixed set of voices.
///
/// When every voice is busy a new note steals voice 0 and the displaced note
/// waits in an overflow store of `C` entries. Releasing a sounding note hands
/// its voice to the most recently displaced note, so held keys come back as
/// others are let go. Nothing is allocated after construction and every event
/// is handled in O(V + C) without failing.
#[derive(Debug, Clone)]
pub struct VoiceManager<const V: usize, const C: usize = OVERFLOW_CAPACITY> {
    channel: u8,
    voices: usize,
    slots: [VoiceSlot; V],
    overflow: OverflowStore<C>,
}

impl<const V: usize, const C: usize> VoiceManager<V, C> {
    const HAS_VOICES: () = assert!(V > 0, "voice manager needs at least one voice");

    /// Manager on `channel` using all `V` voices.
    ///
    /// The channel is masked to its low 4 bits the same way
    /// [`NoteEvent::new`] masks incoming events, so `new(18)` listens on
    /// channel 2. Use [`from_config`](Self::from_config) to reject
    /// out-of-range channels instead.
    pub fn new(channel: u8) -> Self {
        let () = Self::HAS_VOICES;

        Self {
            channel: channel & MAX_CHANNEL,
            voices: V,
            slots: [VoiceSlot::Idle; V],
            overflow: OverflowStore::new(),
        }
    }

    /// Manager using the first `config.voices` of its `V` slots
    pub fn from_config(config: &ManagerConfig) -> Result<Self, ConfigError> {
        config.validate(V)?;

        let mut manager = Self::new(config.channel);
        manager.voices = config.voices;
        debug!(
            channel = config.channel,
            voices = config.voices,
            overflow = C,
            "voice manager configured"
        );
        Ok(manager)
    }

    pub fn handle(&mut self, event: NoteEvent) -> Allocation {
        if event.channel != self.channel {
            return Allocation::Ignored;
        }

        if event.is_release() {
            self.release(event.note)
        } else {
            self.press(PressedNote::new(event.note, event.velocity))
        }
    }

    fn press(&mut self, pressed: PressedNote) -> Allocation {
        // One pass: an existing voice for this note wins over the first idle one
        let mut idle = None;
        for (voice, slot) in self.slots[..self.voices].iter_mut().enumerate() {
            match slot {
                VoiceSlot::Sounding(current) if current.note == pressed.note => {
                    current.velocity = pressed.velocity;
                    return Allocation::Retriggered {
                        voice,
                        note: pressed,
                    };
                }
                VoiceSlot::Idle if idle.is_none() => idle = Some(voice),
                _ => {}
            }
        }

        if let Some(voice) = idle {
            self.slots[voice].start(pressed);
            return Allocation::Assigned {
                voice,
                note: pressed,
            };
        }

        if self.overflow.retrigger(pressed.note, pressed.velocity) {
            trace!(note = pressed.note, "retriggered queued note");
            return Allocation::RetriggeredQueued { note: pressed };
        }

        let previous = std::mem::replace(&mut self.slots[STEAL_VOICE], VoiceSlot::Sounding(pressed));
        match previous {
            VoiceSlot::Sounding(displaced) => {
                let queued = self.overflow.insert(displaced);
                if queued {
                    trace!(
                        note = pressed.note,
                        displaced = displaced.note,
                        "stole voice"
                    );
                } else {
                    debug!(
                        note = pressed.note,
                        displaced = displaced.note,
                        capacity = C,
                        "overflow store full, stolen note dropped"
                    );
                }
                Allocation::Stolen {
                    voice: STEAL_VOICE,
                    note: pressed,
                    displaced,
                    queued,
                }
            }
            VoiceSlot::Idle => Allocation::Assigned {
                voice: STEAL_VOICE,
                note: pressed,
            },
        }
    }

    fn release(&mut self, note: u8) -> Allocation {
        let sounding = self.slots[..self.voices]
            .iter()
            .position(|slot| slot.note() == Some(note));

        if let Some(voice) = sounding {
            return match self.overflow.take_most_recent() {
                Some(restored) => {
                    self.slots[voice].start(restored);
                    trace!(voice, released = note, restored = restored.note, "restored note");
                    Allocation::Restored {
                        voice,
                        released: note,
                        note: restored,
                    }
                }
                None => {
                    self.slots[voice].free();
                    Allocation::Silenced {
                        voice,
                        released: note,
                    }
                }
            };
        }

        match self.overflow.remove_by_note(note) {
            Some(pressed) => Allocation::Dequeued { note: pressed },
            None => {
                // pressed before we were listening, or dropped from a full store
                debug!(note, "release for untracked note");
                Allocation::Untracked { note }
            }
        }
    }

    /// All notes off: every voice idle, overflow store emptied
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(VoiceSlot::free);
        self.overflow.clear();
    }

    pub fn voice(&self, index: usize) -> Option<VoiceSlot> {
        self.slots().get(index).copied()
    }

    /// `(note, velocity)` of a voice; velocity 0 means silent
    pub fn state(&self, index: usize) -> Option<(u8, u8)> {
        self.voice(index).map(|slot| slot.as_pair())
    }

    /// The voices in use, in index order
    pub fn slots(&self) -> &[VoiceSlot] {
        &self.slots[..self.voices]
    }

    pub fn voice_count(&self) -> usize {
        self.voices
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn overflow(&self) -> &OverflowStore<C> {
        &self.overflow
    }

    pub fn is_sounding(&self, note: u8) -> bool {
        self.slots().iter().any(|slot| slot.note() == Some(note))
    }

    pub fn is_queued(&self, note: u8) -> bool {
        self.overflow.contains(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(note: u8, velocity: u8) -> NoteEvent {
        NoteEvent::new(0, note, velocity)
    }

    fn off(note: u8) -> NoteEvent {
        NoteEvent::release(0, note)
    }

    fn states<const V: usize, const C: usize>(manager: &VoiceManager<V, C>) -> Vec<(u8, u8)> {
        manager.slots().iter().map(VoiceSlot::as_pair).collect()
    }

    #[test]
    fn press_takes_first_idle_voice() {
        let mut manager = VoiceManager::<4>::new(0);
        assert_eq!(
            manager.handle(on(60, 100)),
            Allocation::Assigned {
                voice: 0,
                note: PressedNote::new(60, 100)
            }
        );
        assert!(matches!(
            manager.handle(on(64, 90)),
            Allocation::Assigned { voice: 1, .. }
        ));
        assert_eq!(states(&manager), vec![(60, 100), (64, 90), (0, 0), (0, 0)]);
    }

    #[test]
    fn release_frees_voice_for_reuse() {
        let mut manager = VoiceManager::<2>::new(0);
        manager.handle(on(60, 100));
        manager.handle(on(64, 100));
        assert_eq!(
            manager.handle(off(60)),
            Allocation::Silenced {
                voice: 0,
                released: 60
            }
        );
        manager.handle(on(67, 80));
        assert_eq!(states(&manager), vec![(67, 80), (64, 100)]);
    }

    #[test]
    fn duplicate_press_retriggers_existing_voice_even_behind_idle_one() {
        let mut manager = VoiceManager::<2>::new(0);
        manager.handle(on(49, 100));
        manager.handle(on(50, 100));
        manager.handle(off(49));

        assert_eq!(
            manager.handle(on(50, 30)),
            Allocation::Retriggered {
                voice: 1,
                note: PressedNote::new(50, 30)
            }
        );
        assert_eq!(states(&manager), vec![(0, 0), (50, 30)]);
    }

    #[test]
    fn steal_reports_displaced_note() {
        let mut manager = VoiceManager::<1>::new(0);
        manager.handle(on(45, 127));
        assert_eq!(
            manager.handle(on(50, 127)),
            Allocation::Stolen {
                voice: 0,
                note: PressedNote::new(50, 127),
                displaced: PressedNote::new(45, 127),
                queued: true,
            }
        );
        assert!(manager.is_queued(45));
        assert!(manager.is_sounding(50));
    }

    #[test]
    fn release_restores_most_recent_stolen_note() {
        let mut manager = VoiceManager::<1>::new(0);
        manager.handle(on(45, 127));
        manager.handle(on(50, 127));
        manager.handle(on(52, 127));

        assert_eq!(
            manager.handle(off(52)),
            Allocation::Restored {
                voice: 0,
                released: 52,
                note: PressedNote::new(50, 127)
            }
        );
        assert_eq!(manager.state(0), Some((50, 127)));
        manager.handle(off(50));
        assert_eq!(manager.state(0), Some((45, 127)));
        manager.handle(off(45));
        assert_eq!(manager.state(0), Some((0, 0)));
    }

    #[test]
    fn full_overflow_drops_stolen_note() {
        let mut manager = VoiceManager::<1, 2>::new(0);
        manager.handle(on(40, 100));
        manager.handle(on(41, 100));
        manager.handle(on(42, 100));

        assert_eq!(
            manager.handle(on(43, 100)),
            Allocation::Stolen {
                voice: 0,
                note: PressedNote::new(43, 100),
                displaced: PressedNote::new(42, 100),
                queued: false,
            }
        );
        assert!(!manager.is_queued(42));
        assert_eq!(manager.handle(off(42)), Allocation::Untracked { note: 42 });
    }

    #[test]
    fn press_of_queued_note_updates_it_in_place() {
        let mut manager = VoiceManager::<1>::new(0);
        manager.handle(on(45, 127));
        manager.handle(on(50, 127));

        assert_eq!(
            manager.handle(on(45, 20)),
            Allocation::RetriggeredQueued {
                note: PressedNote::new(45, 20)
            }
        );
        assert_eq!(manager.state(0), Some((50, 127)));
        assert_eq!(manager.overflow().len(), 1);

        manager.handle(off(50));
        assert_eq!(manager.state(0), Some((45, 20)));
    }

    #[test]
    fn wrong_channel_is_ignored() {
        let mut manager = VoiceManager::<1>::new(2);
        assert_eq!(manager.handle(NoteEvent::new(1, 45, 127)), Allocation::Ignored);
        assert_eq!(manager.state(0), Some((0, 0)));
    }

    #[test]
    fn untracked_release_changes_nothing() {
        let mut manager = VoiceManager::<2>::new(0);
        manager.handle(on(60, 100));
        assert_eq!(manager.handle(off(61)), Allocation::Untracked { note: 61 });
        assert_eq!(states(&manager), vec![(60, 100), (0, 0)]);
        assert!(manager.overflow().is_empty());
    }

    #[test]
    fn config_limits_active_voices() {
        let config = ManagerConfig::new(0, 2);
        let mut manager = VoiceManager::<4>::from_config(&config).unwrap();
        assert_eq!(manager.voice_count(), 2);

        manager.handle(on(60, 100));
        manager.handle(on(62, 100));
        manager.handle(on(64, 100));
        assert_eq!(states(&manager), vec![(64, 100), (62, 100)]);
        assert_eq!(manager.voice(2), None);
        assert!(manager.is_queued(60));
    }

    #[test]
    fn config_errors_surface() {
        let result = VoiceManager::<4>::from_config(&ManagerConfig::new(0, 5));
        assert!(matches!(result, Err(ConfigError::TooManyVoices { .. })));
    }

    #[test]
    fn reset_silences_everything() {
        let mut manager = VoiceManager::<2>::new(0);
        for note in 60..66 {
            manager.handle(on(note, 100));
        }
        manager.reset();

        assert_eq!(states(&manager), vec![(0, 0), (0, 0)]);
        assert!(manager.overflow().is_empty());
        assert_eq!(manager.handle(off(60)), Allocation::Untracked { note: 60 });
    }

    #[test]
    fn state_out_of_range_is_none() {
        let manager = VoiceManager::<2>::new(0);
        assert_eq!(manager.state(2), None);
    }

    #[test]
    fn new_masks_channel_like_events_do() {
        let mut manager = VoiceManager::<1>::new(18);
        assert_eq!(manager.channel(), 2);
        assert!(matches!(
            manager.handle(NoteEvent::new(18, 60, 100)),
            Allocation::Assigned { voice: 0, .. }
        ));

        let config = ManagerConfig::new(18, 1);
        assert_eq!(
            VoiceManager::<1>::from_config(&config).unwrap_err(),
            ConfigError::ChannelOutOfRange { channel: 18 }
        );
    }
}
