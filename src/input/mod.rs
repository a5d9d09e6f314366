//! Front panel input events and the sources that produce them

mod encoder;
mod error;
mod gpio;
mod hold;

pub use encoder::QuadratureDecoder;
pub use error::HardwareError;
pub use gpio::GpioInputs;
pub use hold::HoldDetector;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Touch pads next to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pad {
    Next,
    Prev,
}

/// Debounced events raised by the panel hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    RotaryClockwise,
    RotaryCounterClockwise,
    /// The encoder switch went down.
    ButtonPressed,
    /// The encoder switch stayed down for the long-press time. Raised once per press.
    ButtonHeld,
    ButtonReleased,
    PadPressed(Pad),
}

/// Something that yields input events, one at a time.
#[async_trait]
pub trait InputSource: Send {
    /// Waits for the next event; `None` once the source is closed.
    async fn next_event(&mut self) -> Option<InputEvent>;
}

pub type EventSender = mpsc::UnboundedSender<InputEvent>;

/// Input source fed through a channel.
///
/// Unbounded so that interrupt threads never block while a handler is busy
/// with a slow request.
pub struct ChannelInput {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl ChannelInput {
    pub fn new() -> (EventSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, ChannelInput { rx })
    }
}

#[async_trait]
impl InputSource for ChannelInput {
    async fn next_event(&mut self) -> Option<InputEvent> {
        self.rx.recv().await
    }
}
