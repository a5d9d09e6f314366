//! Application settings and configuration management

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Application settings, loaded once at startup and never mutated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Plexamp base URL
    pub player_url: String,
    /// machineIdentifier of the Plex server, empty disables PlayMedia and autoplay
    pub plex_id: String,

    /// Rotary encoder CLK line (BCM numbering)
    pub clk_pin: u8,
    /// Rotary encoder DT line
    pub dt_pin: u8,
    /// Rotary encoder push switch
    pub sw_pin: u8,
    /// Next track touch pad
    pub next_pin: u8,
    /// Previous track touch pad
    pub prev_pin: u8,
    /// Backlight output line, `None` when the display has no controllable backlight
    pub backlight_pin: Option<u8>,
    /// Drive the backlight line low to switch the backlight on
    pub backlight_active_low: bool,

    /// Presses shorter than this are ignored, 0 accepts every release
    pub short_press_ms: u64,
    /// Holding the switch this long triggers shutdown
    pub long_press_ms: u64,
    /// Debounce for the push switch and touch pads
    pub debounce_ms: u64,
    /// Debounce for the encoder lines
    pub encoder_bounce_ms: u64,

    /// Volume change per encoder detent
    pub volume_step: u8,
    /// Start playback when the daemon starts
    pub autoplay: bool,
    /// Volume applied before autoplay, 0 leaves the volume alone
    pub start_volume: u8,
    /// Minutes without playback before the backlight goes off, 0 never
    pub screen_timeout_min: u64,
    /// Seconds between two timeline polls of the idle monitor
    pub poll_interval_secs: u64,
    /// Upper bound for every HTTP request to Plexamp
    pub request_timeout_ms: u64,
    /// Program and arguments run on a long press
    pub shutdown_command: Vec<String>,
}

/// Error types for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    IoError(io::Error),
    ParseError(String),
    ValidationError(String),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigError::ParseError(s) => write!(f, "Parse error: {}", s),
            ConfigError::ValidationError(s) => write!(f, "Validation error: {}", s),
        }
    }
}

impl Error for ConfigError {}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            player_url: "http://localhost:32500".to_string(),
            plex_id: String::new(),
            clk_pin: 7,
            dt_pin: 8,
            sw_pin: 5,
            next_pin: 12,
            prev_pin: 16,
            backlight_pin: None,
            backlight_active_low: false,
            short_press_ms: 0,
            long_press_ms: 3000,
            debounce_ms: 50,
            encoder_bounce_ms: 10,
            volume_step: 5,
            autoplay: false,
            start_volume: 0,
            screen_timeout_min: 5,
            poll_interval_secs: 5,
            request_timeout_ms: 2000,
            shutdown_command: vec![
                "sudo".to_string(),
                "shutdown".to_string(),
                "-h".to_string(),
                "now".to_string(),
            ],
        }
    }
}

impl Settings {
    /// Load settings from a file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("plexpanel").join("config.json")
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_url.is_empty() {
            return Err(ConfigError::ValidationError("Player URL cannot be empty".to_string()));
        }
        let url = Url::parse(&self.player_url)
            .map_err(|e| ConfigError::ValidationError(format!("Invalid player URL '{}': {}", self.player_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::ValidationError(format!(
                "Player URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.volume_step == 0 || self.volume_step > 100 {
            return Err(ConfigError::ValidationError("Volume step must be between 1 and 100".to_string()));
        }
        if self.start_volume > 100 {
            return Err(ConfigError::ValidationError("Start volume must be between 0 and 100".to_string()));
        }
        if self.long_press_ms == 0 {
            return Err(ConfigError::ValidationError("Long press time cannot be zero".to_string()));
        }
        if self.short_press_ms != 0 && self.short_press_ms >= self.long_press_ms {
            return Err(ConfigError::ValidationError(
                "Short press time must be below the long press time".to_string(),
            ));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError("Poll interval cannot be zero".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError("Request timeout cannot be zero".to_string()));
        }
        if self.shutdown_command.first().map_or(true, |program| program.is_empty()) {
            return Err(ConfigError::ValidationError("Shutdown command cannot be empty".to_string()));
        }

        let mut seen = HashSet::new();
        let pins = [self.clk_pin, self.dt_pin, self.sw_pin, self.next_pin, self.prev_pin]
            .into_iter()
            .chain(self.backlight_pin);
        for pin in pins {
            if !seen.insert(pin) {
                return Err(ConfigError::ValidationError(format!("GPIO {} is assigned twice", pin)));
            }
        }

        Ok(())
    }

    /// Start volume to apply during autoplay, if one is configured
    pub fn autoplay_start_volume(&self) -> Option<u8> {
        (1..=100).contains(&self.start_volume).then_some(self.start_volume)
    }

    pub fn short_press(&self) -> Duration {
        Duration::from_millis(self.short_press_ms)
    }

    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    /// Switch and pad debounce, `None` when disabled
    pub fn debounce(&self) -> Option<Duration> {
        (self.debounce_ms > 0).then(|| Duration::from_millis(self.debounce_ms))
    }

    pub fn encoder_bounce(&self) -> Option<Duration> {
        (self.encoder_bounce_ms > 0).then(|| Duration::from_millis(self.encoder_bounce_ms))
    }

    /// Idle time before the backlight is switched off, `None` keeps it on forever
    pub fn screen_timeout(&self) -> Option<Duration> {
        (self.screen_timeout_min > 0).then(|| Duration::from_secs(self.screen_timeout_min * 60))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
