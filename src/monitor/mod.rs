//! Idle monitor: keeps the backlight on while music plays and switches it
//! off once playback has been idle for the configured timeout.

use crate::backlight::{Backlight, BacklightState, BacklightWaker};
use crate::plexamp::{PlaybackState, Remote};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};


const LOG_TARGET: &str = "r_plexpanel::monitor";

/// Owner of the backlight's off switch.
pub struct IdleMonitor {
    remote: Arc<Remote>,
    backlight: Arc<dyn Backlight>,
    activity: BacklightWaker,
    poll_interval: Duration,
    timeout: Option<Duration>,
    was_playing: bool,
    idle_since: Instant,
}

impl IdleMonitor {
    /// `timeout` of `None` keeps the backlight on forever.
    pub fn new(
        remote: Arc<Remote>,
        backlight: Arc<dyn Backlight>,
        activity: BacklightWaker,
        poll_interval: Duration,
        timeout: Option<Duration>,
    ) -> Self {
        IdleMonitor {
            remote,
            backlight,
            activity,
            poll_interval,
            timeout,
            was_playing: false,
            idle_since: Instant::now(),
        }
    }

    /// Folds one observed playback state into the monitor and returns the
    /// backlight state to apply, if any.
    pub fn observe(&mut self, state: PlaybackState, now: Instant) -> Option<BacklightState> {
        if state.is_playing() {
            if self.was_playing {
                return None;
            }
            debug!(target: LOG_TARGET, "Playback started");
            self.was_playing = true;
            return Some(BacklightState::On);
        }

        if self.was_playing {
            debug!(target: LOG_TARGET, "Playback stopped ({:?}), idle timer started", state);
            self.was_playing = false;
            self.idle_since = now;
        }

        let timeout = self.timeout?;
        let idle_start = match self.activity.last_wake() {
            Some(wake) if wake > self.idle_since => wake,
            _ => self.idle_since,
        };
        let idle_for = now.saturating_duration_since(idle_start);
        trace!(target: LOG_TARGET, "Idle for {:?}", idle_for);

        (idle_for > timeout).then_some(BacklightState::Off)
    }

    /// Polls once and applies the result.
    pub async fn tick(&mut self) {
        let state = self.remote.state().await;
        if let Some(target) = self.observe(state, Instant::now()) {
            self.backlight.set(target);
        }
    }

    /// Runs forever. Poll failures already degrade to `Stopped` inside the
    /// remote, so there is nothing here that can end the loop.
    pub async fn run(mut self) {
        info!(
            target: LOG_TARGET,
            "Idle monitor started: polling every {:?}, timeout {:?}",
            self.poll_interval, self.timeout
        );
        self.backlight.set(BacklightState::On);
        self.idle_since = Instant::now();

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }
}
