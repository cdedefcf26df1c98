#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{note::MAX_CHANNEL, DEFAULT_VOICES};

/// Construction-time settings for a voice manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ManagerConfig {
    /// MIDI channel to listen on (0-15)
    pub channel: u8,
    /// Number of voices to allocate across, at most the manager's slot count
    pub voices: usize,
}

impl ManagerConfig {
    pub fn new(channel: u8, voices: usize) -> Self {
        Self { channel, voices }
    }

    /// Check the settings against a manager with `max_voices` slots
    pub fn validate(&self, max_voices: usize) -> Result<(), ConfigError> {
        if self.channel > MAX_CHANNEL {
            return Err(ConfigError::ChannelOutOfRange {
                channel: self.channel,
            });
        }
        if self.voices == 0 {
            return Err(ConfigError::NoVoices);
        }
        if self.voices > max_voices {
            return Err(ConfigError::TooManyVoices {
                requested: self.voices,
                max: max_voices,
            });
        }
        Ok(())
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new(0, DEFAULT_VOICES)
    }
}

/// Errors that can occur when building a manager from a config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Channel does not fit in 4 bits
    ChannelOutOfRange { channel: u8 },
    /// A manager needs at least one voice
    NoVoices,
    /// More voices requested than the manager has slots for
    TooManyVoices { requested: usize, max: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ChannelOutOfRange { channel } => {
                write!(f, "MIDI channel {} out of range (expected 0-15)", channel)
            }
            ConfigError::NoVoices => write!(f, "voice count must be at least 1"),
            ConfigError::TooManyVoices { requested, max } => {
                write!(
                    f,
                    "requested {} voices but the manager only has {} slots",
                    requested, max
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid_for_default_voices() {
        assert!(ManagerConfig::default().validate(DEFAULT_VOICES).is_ok());
    }

    #[test]
    fn rejects_channel_above_15() {
        let result = ManagerConfig::new(16, 1).validate(4);
        assert_eq!(result, Err(ConfigError::ChannelOutOfRange { channel: 16 }));
    }

    #[test]
    fn rejects_zero_voices() {
        assert_eq!(ManagerConfig::new(0, 0).validate(4), Err(ConfigError::NoVoices));
    }

    #[test]
    fn rejects_more_voices_than_slots() {
        let result = ManagerConfig::new(0, 8).validate(4);
        assert!(matches!(
            result,
            Err(ConfigError::TooManyVoices { requested: 8, max: 4 })
        ));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let message = ConfigError::TooManyVoices { requested: 8, max: 4 }.to_string();
        assert!(message.contains('8') && message.contains('4'));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_from_json() {
        let config: ManagerConfig = serde_json::from_str(r#"{"channel":2,"voices":3}"#).unwrap();
        assert_eq!(config, ManagerConfig::new(2, 3));
    }
}
