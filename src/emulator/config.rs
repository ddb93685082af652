// Emulator configuration
//
// Persistent settings stored as TOML. Every section has defaults, so a
// partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::input::InputConfig;
use crate::logger::LogLevel;

/// Default configuration file name
pub const CONFIG_FILE: &str = "nes_config.toml";

/// Main emulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EmulatorConfig {
    pub audio: AudioConfig,
    pub input: InputConfig,
    pub log: LogConfig,
    pub screenshot: ScreenshotConfig,
}

/// Audio configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Enable audio output
    pub enabled: bool,
    /// Gain applied to every channel (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            master_volume: 0.5,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    /// Log file; stderr when absent
    pub file: Option<PathBuf>,
}

/// Screenshot configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Directory for screenshots
    pub directory: PathBuf,
    /// Include timestamp in filename
    pub include_timestamp: bool,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("screenshots"),
            include_timestamp: true,
        }
    }
}

impl EmulatorConfig {
    /// Load configuration from file or create default
    ///
    /// If the file can't be read or parsed, the default configuration is
    /// returned and written back to `path`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_core::emulator::{EmulatorConfig, CONFIG_FILE};
    ///
    /// let config = EmulatorConfig::load_or_default(CONFIG_FILE);
    /// ```
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|err| {
            log::info!("Using default configuration ({}: {})", path.display(), err);
            let config = Self::default();
            if let Err(err) = config.save(path) {
                log::warn!("Could not write {}: {}", path.display(), err);
            }
            config
        })
    }

    /// Load configuration from file
    ///
    /// # Errors
    /// I/O errors from reading, or `InvalidData` when the TOML is malformed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }
}
