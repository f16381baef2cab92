// Configuration management
//
// TOML-persisted emulator settings: video preferences and the key-to-button
// mapping a front-end consults.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::KeyMapping;

/// Errors produced while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML parse error
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmulatorConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Controller 1 key bindings
    pub keys: KeyMapping,
}

/// Video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Integer window scale a front-end should apply (1-4)
    pub scale: u32,

    /// Target frames per second (60 for NTSC)
    pub fps: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig { scale: 3, fps: 60 }
    }
}

impl EmulatorConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file is missing or malformed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("using default config: {}", err);
                Self::default()
            }
        }
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Save configuration as TOML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;

    #[test]
    fn test_default_config() {
        let config = EmulatorConfig::default();
        assert_eq!(config.video.scale, 3);
        assert_eq!(config.video.fps, 60);
        assert_eq!(config.keys.button_for_key("Z"), Some(Button::A));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EmulatorConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: EmulatorConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.video.scale, config.video.scale);
        assert_eq!(parsed.keys.a, config.keys.a);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = EmulatorConfig::load_or_default("/nonexistent/config.toml");
        assert_eq!(config.video.fps, 60);
    }
}
