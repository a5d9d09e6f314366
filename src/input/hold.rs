use super::{EventSender, InputEvent};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::trace;

const LOG_TARGET: &str = "r_plexpanel::input::hold";

#[derive(Debug, Default)]
struct SwitchState {
    pressed: bool,
    generation: u64,
}

/// Turns switch edges into press, hold and release events.
///
/// Each press arms a timer on the runtime; if the switch is still down from
/// the same press when it expires, `ButtonHeld` is sent. Repeated edges in
/// the same direction are dropped. Events are sent while the switch state is
/// locked, so `ButtonHeld` never lands after the release of its press.
pub struct HoldDetector {
    tx: EventSender,
    hold_time: Duration,
    runtime: Handle,
    switch: Arc<Mutex<SwitchState>>,
}

impl HoldDetector {
    /// Must be called from within the runtime that will run the hold timers.
    pub fn new(tx: EventSender, hold_time: Duration) -> Self {
        HoldDetector {
            tx,
            hold_time,
            runtime: Handle::current(),
            switch: Arc::new(Mutex::new(SwitchState::default())),
        }
    }

    pub fn press(&self) {
        let mut switch = self.switch.lock().unwrap_or_else(PoisonError::into_inner);
        if switch.pressed {
            return;
        }
        switch.pressed = true;
        switch.generation += 1;
        let press_id = switch.generation;
        let _ = self.tx.send(InputEvent::ButtonPressed);
        drop(switch);

        let tx = self.tx.clone();
        let hold_time = self.hold_time;
        let state = self.switch.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(hold_time).await;
            let switch = state.lock().unwrap_or_else(PoisonError::into_inner);
            if switch.pressed && switch.generation == press_id {
                trace!(target: LOG_TARGET, "Switch held for {:?}", hold_time);
                let _ = tx.send(InputEvent::ButtonHeld);
            }
        });
    }

    pub fn release(&self) {
        let mut switch = self.switch.lock().unwrap_or_else(PoisonError::into_inner);
        if !switch.pressed {
            return;
        }
        switch.pressed = false;
        switch.generation += 1;
        let _ = self.tx.send(InputEvent::ButtonReleased);
    }
}
