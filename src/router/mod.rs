//! Maps front panel input to player commands

mod autoplay;
mod power;

pub use autoplay::Autoplay;
pub use power::{CommandPower, PowerError, SystemPower};

use crate::input::{InputEvent, InputSource, Pad};
use crate::plexamp::{Command, CommandOutcome, PlaybackState, Remote};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

const LOG_TARGET: &str = "r_plexpanel::router";

/// Whether the router keeps serving events after a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterFlow {
    Continue,
    /// The device is powering off.
    Halt,
}

/// How one press-release cycle of the encoder switch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressEvent {
    ShortRelease,
    LongHold,
}

/// State machine for the panel controls.
///
/// Handlers run one at a time and to completion, each awaiting its request.
/// Events raised meanwhile wait in the input source.
pub struct InputRouter {
    remote: Arc<Remote>,
    power: Arc<dyn SystemPower>,
    short_press: Duration,
    long_press_fired: bool,
    pressed_at: Option<Instant>,
}

impl InputRouter {
    /// Releases after presses shorter than `short_press` are ignored.
    pub fn new(remote: Arc<Remote>, power: Arc<dyn SystemPower>, short_press: Duration) -> Self {
        InputRouter {
            remote,
            power,
            short_press,
            long_press_fired: false,
            pressed_at: None,
        }
    }

    /// Serves events until the source closes or the device powers off.
    pub async fn run<S: InputSource + ?Sized>(&mut self, source: &mut S) {
        info!(target: LOG_TARGET, "Waiting for input");
        while let Some(event) = source.next_event().await {
            if self.handle(event).await == RouterFlow::Halt {
                info!(target: LOG_TARGET, "Powering off, no further input is handled");
                return;
            }
        }
        info!(target: LOG_TARGET, "Input source closed");
    }

    #[instrument(skip(self))]
    pub async fn handle(&mut self, event: InputEvent) -> RouterFlow {
        match event {
            InputEvent::RotaryClockwise => {
                self.remote.execute(Command::VolumeUp).await;
            }
            InputEvent::RotaryCounterClockwise => {
                self.remote.execute(Command::VolumeDown).await;
            }
            InputEvent::PadPressed(Pad::Next) => {
                self.remote.execute(Command::Next).await;
            }
            InputEvent::PadPressed(Pad::Prev) => {
                self.remote.execute(Command::Prev).await;
            }
            InputEvent::ButtonPressed => {
                self.pressed_at = Some(Instant::now());
            }
            InputEvent::ButtonHeld => return self.handle_hold().await,
            InputEvent::ButtonReleased => self.handle_release().await,
        }
        RouterFlow::Continue
    }

    async fn handle_hold(&mut self) -> RouterFlow {
        if self.pressed_at.is_none() {
            debug!(target: LOG_TARGET, "Hold arrived after its release, ignoring");
            return RouterFlow::Continue;
        }
        if self.long_press_fired {
            debug!(target: LOG_TARGET, "Hold already handled for this press");
            return RouterFlow::Continue;
        }
        self.long_press_fired = true;

        info!(target: LOG_TARGET, "Long press: stopping playback and shutting down");
        self.remote.execute(Command::Stop).await;
        match self.power.power_off().await {
            Ok(()) => RouterFlow::Halt,
            Err(e) => {
                error!(target: LOG_TARGET, "Shutdown failed: {}", e);
                RouterFlow::Continue
            }
        }
    }

    async fn handle_release(&mut self) {
        let held_for = self.pressed_at.take().map(|at| at.elapsed());
        let press = if self.long_press_fired {
            PressEvent::LongHold
        } else {
            PressEvent::ShortRelease
        };
        self.long_press_fired = false;

        if press == PressEvent::LongHold {
            return;
        }
        if let Some(held_for) = held_for {
            if held_for < self.short_press {
                debug!(target: LOG_TARGET, "Ignoring {:?} press, shorter than {:?}", held_for, self.short_press);
                return;
            }
        }

        let command = match self.remote.state().await {
            PlaybackState::Stopped => Command::PlayMedia,
            _ => Command::PlayPause,
        };
        if let CommandOutcome::Failed = self.remote.execute(command).await {
            warn!(target: LOG_TARGET, "Short press had no effect");
        }
    }
}
