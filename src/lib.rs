pub mod io; // Structured note events from an upstream decoder
pub mod note;
pub mod store; // Fixed-capacity overflow storage
pub mod synth; // Voice management and stealing

pub use io::NoteEvent;
pub use note::PressedNote;
pub use store::OverflowStore;
pub use synth::{Allocation, ManagerConfig, VoiceManager, VoiceSlot};

/// Overflow entries per manager unless a different capacity is chosen
pub const OVERFLOW_CAPACITY: usize = 16;

/// Voices per manager in the default config
pub const DEFAULT_VOICES: usize = 4;
