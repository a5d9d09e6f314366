//! Display backlight control

use crate::input::HardwareError;
use rppal::gpio::{Gpio, Level, OutputPin};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::time::Instant;
use tracing::{debug, info};


const LOG_TARGET: &str = "r_plexpanel::backlight";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacklightState {
    On,
    Off,
}

/// A binary backlight. Setting the current state again is harmless.
pub trait Backlight: Send + Sync {
    fn set(&self, state: BacklightState);

    /// Last state written.
    fn state(&self) -> BacklightState;
}

struct GpioLine {
    pin: OutputPin,
    state: BacklightState,
}

/// Backlight driven by a GPIO output line.
pub struct GpioBacklight {
    line: Mutex<GpioLine>,
    on_level: Level,
    off_level: Level,
}

impl GpioBacklight {
    /// Claims `pin` as an output. With `active_low` the backlight is lit by a low level.
    pub fn open(pin: u8, active_low: bool) -> Result<Self, HardwareError> {
        let (on_level, off_level) = if active_low {
            (Level::Low, Level::High)
        } else {
            (Level::High, Level::Low)
        };

        let mut output = Gpio::new()?.get(pin)?.into_output();
        output.write(on_level);
        info!(target: LOG_TARGET, "Backlight claimed on GPIO {} (active {})", pin, if active_low { "low" } else { "high" });

        Ok(GpioBacklight {
            line: Mutex::new(GpioLine {
                pin: output,
                state: BacklightState::On,
            }),
            on_level,
            off_level,
        })
    }
}

impl Backlight for GpioBacklight {
    fn set(&self, state: BacklightState) {
        let mut line = self.line.lock().unwrap_or_else(PoisonError::into_inner);
        let level = match state {
            BacklightState::On => self.on_level,
            BacklightState::Off => self.off_level,
        };
        line.pin.write(level);
        if line.state != state {
            info!(target: LOG_TARGET, "Backlight {:?}", state);
            line.state = state;
        }
    }

    fn state(&self) -> BacklightState {
        self.line.lock().unwrap_or_else(PoisonError::into_inner).state
    }
}

/// Stand-in for displays without a switchable backlight.
pub struct NullBacklight {
    state: Mutex<BacklightState>,
}

impl NullBacklight {
    pub fn new() -> Self {
        NullBacklight {
            state: Mutex::new(BacklightState::On),
        }
    }
}

impl Default for NullBacklight {
    fn default() -> Self {
        Self::new()
    }
}

impl Backlight for NullBacklight {
    fn set(&self, state: BacklightState) {
        let mut current = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != state {
            debug!(target: LOG_TARGET, "Backlight {:?} (no backlight pin configured)", state);
            *current = state;
        }
    }

    fn state(&self) -> BacklightState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Wake-only handle on the backlight.
///
/// Only the idle monitor switches the backlight off; everything else holds a
/// waker. Each wake is remembered so the monitor can restart its idle timer.
#[derive(Clone)]
pub struct BacklightWaker {
    backlight: Arc<dyn Backlight>,
    last_wake: Arc<Mutex<Option<Instant>>>,
}

impl BacklightWaker {
    pub fn new(backlight: Arc<dyn Backlight>) -> Self {
        BacklightWaker {
            backlight,
            last_wake: Arc::new(Mutex::new(None)),
        }
    }

    pub fn wake(&self) {
        *self.last_wake.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
        self.backlight.set(BacklightState::On);
    }

    /// When the backlight was last woken by user activity.
    pub fn last_wake(&self) -> Option<Instant> {
        *self.last_wake.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
