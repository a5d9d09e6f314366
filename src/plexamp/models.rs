//! Data models for the Plexamp player API

use std::fmt;

/// Library radio started by PlayMedia, relative to the Plex server.
const LIBRARY_STATION_PATH: &str = "com.plexapp.plugins.library/library/sections/15/stations/1";

/// Symbolic playback commands produced by the front panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    PlayMedia,
    PlayPause,
    Stop,
    Next,
    Prev,
    VolumeUp,
    VolumeDown,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::PlayMedia => "playMedia",
            Command::PlayPause => "playPause",
            Command::Stop => "stop",
            Command::Next => "next",
            Command::Prev => "prev",
            Command::VolumeUp => "volUp",
            Command::VolumeDown => "volDown",
        };
        f.write_str(name)
    }
}

/// Playback state reported by the music timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,
    Unknown,
}

impl PlaybackState {
    /// Maps the `state` attribute of a timeline entry.
    pub fn from_timeline(value: &str) -> Self {
        match value {
            "playing" => PlaybackState::Playing,
            "paused" => PlaybackState::Paused,
            "stopped" => PlaybackState::Stopped,
            _ => PlaybackState::Unknown,
        }
    }

    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}

/// The music entry of one timeline poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineSnapshot {
    pub state: PlaybackState,
    pub volume: Option<u8>,
}

impl TimelineSnapshot {
    /// What callers see when Plexamp could not be reached or answered garbage.
    pub fn unavailable() -> Self {
        TimelineSnapshot {
            state: PlaybackState::Stopped,
            volume: None,
        }
    }
}

/// A concrete request against the player's playback endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerRequest {
    PlayMedia { uri: String },
    PlayPause,
    Stop,
    SkipNext,
    SkipPrevious,
    SetVolume(u8),
}

impl PlayerRequest {
    /// Path and query string relative to the player base URL.
    pub fn path_and_query(&self) -> String {
        match self {
            PlayerRequest::PlayMedia { uri } => {
                format!("/player/playback/playMedia?uri={}", uri)
            }
            PlayerRequest::PlayPause => "/player/playback/playPause".to_string(),
            PlayerRequest::Stop => "/player/playback/stop".to_string(),
            PlayerRequest::SkipNext => "/player/playback/skipNext".to_string(),
            PlayerRequest::SkipPrevious => "/player/playback/skipPrevious".to_string(),
            PlayerRequest::SetVolume(volume) => {
                format!("/player/playback/setParameters?volume={}", volume)
            }
        }
    }
}

/// Builds the library radio URI for a Plex server identifier.
pub fn media_uri(plex_id: &str) -> String {
    format!("server://{}/{}", urlencoding::encode(plex_id), LIBRARY_STATION_PATH)
}

/// Clamps a computed volume into the range Plexamp accepts.
pub fn clamp_volume(volume: i32) -> u8 {
    volume.clamp(0, 100) as u8
}
