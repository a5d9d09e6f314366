use crate::config::Settings;
use crate::plexamp::{Command, CommandOutcome, Remote};
use tracing::{info, instrument};

const LOG_TARGET: &str = "r_plexpanel::router::autoplay";

/// Playback started once when the daemon comes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autoplay {
    pub enabled: bool,
    /// Exact level applied before playback starts.
    pub start_volume: Option<u8>,
}

impl Autoplay {
    pub fn from_settings(settings: &Settings) -> Self {
        Autoplay {
            enabled: settings.autoplay,
            start_volume: settings.autoplay_start_volume(),
        }
    }

    /// Sets the start volume and starts the library radio. Needs a Plex server identifier.
    #[instrument(skip(remote))]
    pub async fn run(&self, remote: &Remote) -> Option<CommandOutcome> {
        if !self.enabled {
            return None;
        }
        if !remote.has_library() {
            info!(target: LOG_TARGET, "Autoplay enabled but no Plex server identifier configured, skipping");
            return None;
        }

        if let Some(volume) = self.start_volume {
            info!(target: LOG_TARGET, "Setting start volume to {}", volume);
            remote.set_volume(volume).await;
        }
        Some(remote.execute(Command::PlayMedia).await)
    }
}
