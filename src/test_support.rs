//! Fakes shared by the unit tests

use crate::backlight::{Backlight, BacklightState};
use crate::plexamp::{PlaybackState, PlayerApi, PlayerRequest, PlexampError, TimelineSnapshot};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory Plexamp that records every request it receives.
pub struct FakePlayer {
    timeline: Mutex<Option<TimelineSnapshot>>,
    reachable: AtomicBool,
    sent: Mutex<Vec<PlayerRequest>>,
    polls: AtomicUsize,
}

impl FakePlayer {
    pub fn playing(volume: u8) -> Self {
        Self::with_timeline(Some(TimelineSnapshot {
            state: PlaybackState::Playing,
            volume: Some(volume),
        }))
    }

    pub fn with_timeline(timeline: Option<TimelineSnapshot>) -> Self {
        FakePlayer {
            timeline: Mutex::new(timeline),
            reachable: AtomicBool::new(true),
            sent: Mutex::new(Vec::new()),
            polls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        let player = Self::with_timeline(None);
        player.set_reachable(false);
        player
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn set_state(&self, state: PlaybackState) {
        let mut timeline = self.timeline.lock().unwrap();
        let volume = timeline.and_then(|t| t.volume);
        *timeline = Some(TimelineSnapshot { state, volume });
    }

    pub fn sent(&self) -> Vec<PlayerRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerApi for FakePlayer {
    async fn poll_timeline(&self) -> Result<Option<TimelineSnapshot>, PlexampError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(PlexampError::InvalidResponse("connection refused".to_string()));
        }
        Ok(*self.timeline.lock().unwrap())
    }

    async fn send(&self, request: &PlayerRequest) -> Result<(), PlexampError> {
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(PlexampError::InvalidResponse("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(request.clone());
        Ok(())
    }
}

/// Backlight that remembers every state change.
pub struct RecordingBacklight {
    state: Mutex<BacklightState>,
    transitions: Mutex<Vec<BacklightState>>,
}

impl RecordingBacklight {
    pub fn new(initial: BacklightState) -> Self {
        RecordingBacklight {
            state: Mutex::new(initial),
            transitions: Mutex::new(Vec::new()),
        }
    }

    pub fn transitions(&self) -> Vec<BacklightState> {
        self.transitions.lock().unwrap().clone()
    }
}

impl Backlight for RecordingBacklight {
    fn set(&self, state: BacklightState) {
        let mut current = self.state.lock().unwrap();
        if *current != state {
            *current = state;
            self.transitions.lock().unwrap().push(state);
        }
    }

    fn state(&self) -> BacklightState {
        *self.state.lock().unwrap()
    }
}
