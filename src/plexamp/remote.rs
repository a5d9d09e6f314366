//! Command dispatch on top of the player API

use crate::backlight::BacklightWaker;
use crate::plexamp::api::PlayerApi;
use crate::plexamp::models::{
    clamp_volume, media_uri, Command, PlaybackState, PlayerRequest, TimelineSnapshot,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const LOG_TARGET: &str = "r_plexpanel::plexamp::remote";

/// What happened to a command handed to [`Remote::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The request reached Plexamp and the backlight was woken.
    Sent(PlayerRequest),
    /// Nothing to send (no library configured, volume unknown).
    Skipped,
    /// The request failed and was dropped.
    Failed,
}

/// Translates panel commands into player requests.
///
/// Never surfaces a network error: polls fall back to
/// [`TimelineSnapshot::unavailable`] and failed commands are dropped.
pub struct Remote {
    api: Arc<dyn PlayerApi>,
    plex_id: String,
    volume_step: u8,
    waker: BacklightWaker,
}

impl Remote {
    pub fn new(api: Arc<dyn PlayerApi>, plex_id: &str, volume_step: u8, waker: BacklightWaker) -> Self {
        Remote {
            api,
            plex_id: plex_id.trim().to_string(),
            volume_step,
            waker,
        }
    }

    /// True when a Plex server identifier is configured.
    pub fn has_library(&self) -> bool {
        !self.plex_id.is_empty()
    }

    /// Polls the music timeline.
    pub async fn poll(&self) -> TimelineSnapshot {
        match self.api.poll_timeline().await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!(target: LOG_TARGET, "No music timeline in poll response");
                TimelineSnapshot::unavailable()
            }
            Err(e) => {
                debug!(target: LOG_TARGET, "Timeline poll failed: {}", e);
                TimelineSnapshot::unavailable()
            }
        }
    }

    pub async fn state(&self) -> PlaybackState {
        self.poll().await.state
    }

    pub async fn volume(&self) -> Option<u8> {
        self.poll().await.volume
    }

    /// Resolves a command to the request it maps to, reading the volume when needed.
    pub async fn resolve(&self, command: Command) -> Option<PlayerRequest> {
        match command {
            Command::PlayMedia => self
                .has_library()
                .then(|| PlayerRequest::PlayMedia { uri: media_uri(&self.plex_id) }),
            Command::PlayPause => Some(PlayerRequest::PlayPause),
            Command::Stop => Some(PlayerRequest::Stop),
            Command::Next => Some(PlayerRequest::SkipNext),
            Command::Prev => Some(PlayerRequest::SkipPrevious),
            Command::VolumeUp | Command::VolumeDown => {
                let current = i32::from(self.volume().await?);
                let step = i32::from(self.volume_step);
                let target = if command == Command::VolumeUp {
                    current + step
                } else {
                    current - step
                };
                Some(PlayerRequest::SetVolume(clamp_volume(target)))
            }
        }
    }

    /// Executes a command; wakes the backlight when Plexamp accepted it.
    #[instrument(skip(self), fields(command = %command))]
    pub async fn execute(&self, command: Command) -> CommandOutcome {
        match self.resolve(command).await {
            Some(request) => self.dispatch(request).await,
            None => {
                debug!(target: LOG_TARGET, "Command {} resolved to nothing, skipping", command);
                CommandOutcome::Skipped
            }
        }
    }

    /// Sets an absolute volume level.
    pub async fn set_volume(&self, level: u8) -> CommandOutcome {
        self.dispatch(PlayerRequest::SetVolume(clamp_volume(i32::from(level)))).await
    }

    async fn dispatch(&self, request: PlayerRequest) -> CommandOutcome {
        match self.api.send(&request).await {
            Ok(()) => {
                info!(target: LOG_TARGET, "Sent {}", request.path_and_query());
                self.waker.wake();
                CommandOutcome::Sent(request)
            }
            Err(e) => {
                warn!(target: LOG_TARGET, "Dropping {:?}: {}", request, e);
                CommandOutcome::Failed
            }
        }
    }
}
