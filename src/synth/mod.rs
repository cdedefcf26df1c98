// Purpose: voice management, polyphony, note stealing
// This layer turns note events into per-voice (note, velocity) state

pub mod allocator;
pub mod config;
pub mod manager;
pub mod message;
pub mod voice;

pub use allocator::VoiceAllocator;
pub use config::{ConfigError, ManagerConfig};
pub use manager::{Allocation, VoiceManager, STEAL_VOICE};
pub use message::{MessageReceiver, VoiceMessage};
pub use voice::VoiceSlot;
