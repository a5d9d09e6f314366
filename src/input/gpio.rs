use super::{ChannelInput, EventSender, HardwareError, HoldDetector, InputEvent, InputSource, Pad, QuadratureDecoder};
use crate::config::Settings;
use async_trait::async_trait;
use rppal::gpio::{Event, Gpio, InputPin, Trigger};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, trace};

const LOG_TARGET: &str = "r_plexpanel::input::gpio";

/// Encoder, switch and touch pads wired to the Raspberry Pi header.
///
/// All lines use the internal pull-ups, so a pressed switch reads low.
/// Interrupt callbacks run on rppal's threads and only push events into a
/// channel; the pins stay claimed for as long as this value lives.
pub struct GpioInputs {
    _pins: Vec<InputPin>,
    events: ChannelInput,
}

impl GpioInputs {
    /// Claims the configured pins. Must be called from within the tokio runtime.
    pub fn open(settings: &Settings) -> Result<Self, HardwareError> {
        let gpio = Gpio::new()?;
        let (tx, events) = ChannelInput::new();

        let mut clk = gpio.get(settings.clk_pin)?.into_input_pullup();
        let mut dt = gpio.get(settings.dt_pin)?.into_input_pullup();
        let decoder = Arc::new(Mutex::new(QuadratureDecoder::new(clk.is_high(), dt.is_high())));

        let clk_decoder = decoder.clone();
        let clk_tx = tx.clone();
        clk.set_async_interrupt(Trigger::Both, settings.encoder_bounce(), move |event: Event| {
            let mut decoder = clk_decoder.lock().unwrap_or_else(PoisonError::into_inner);
            forward(&clk_tx, decoder.update_clk(is_rising(&event)));
        })?;

        let dt_decoder = decoder;
        let dt_tx = tx.clone();
        dt.set_async_interrupt(Trigger::Both, settings.encoder_bounce(), move |event: Event| {
            let mut decoder = dt_decoder.lock().unwrap_or_else(PoisonError::into_inner);
            forward(&dt_tx, decoder.update_dt(is_rising(&event)));
        })?;

        let mut sw = gpio.get(settings.sw_pin)?.into_input_pullup();
        let detector = HoldDetector::new(tx.clone(), settings.long_press());
        sw.set_async_interrupt(Trigger::Both, settings.debounce(), move |event: Event| {
            if is_rising(&event) {
                detector.release();
            } else {
                detector.press();
            }
        })?;

        let next = pad(&gpio, settings.next_pin, Pad::Next, settings, &tx)?;
        let prev = pad(&gpio, settings.prev_pin, Pad::Prev, settings, &tx)?;

        info!(
            target: LOG_TARGET,
            "Inputs claimed: encoder CLK {} DT {}, switch {}, pads next {} prev {}",
            settings.clk_pin, settings.dt_pin, settings.sw_pin, settings.next_pin, settings.prev_pin
        );

        Ok(GpioInputs {
            _pins: vec![clk, dt, sw, next, prev],
            events,
        })
    }
}

#[async_trait]
impl InputSource for GpioInputs {
    async fn next_event(&mut self) -> Option<InputEvent> {
        self.events.next_event().await
    }
}

fn pad(gpio: &Gpio, pin: u8, pad: Pad, settings: &Settings, tx: &EventSender) -> Result<InputPin, HardwareError> {
    let mut input = gpio.get(pin)?.into_input_pullup();
    let tx = tx.clone();
    input.set_async_interrupt(Trigger::FallingEdge, settings.debounce(), move |_: Event| {
        let _ = tx.send(InputEvent::PadPressed(pad));
    })?;
    Ok(input)
}

fn is_rising(event: &Event) -> bool {
    event.trigger == Trigger::RisingEdge
}

fn forward(tx: &EventSender, event: Option<InputEvent>) {
    if let Some(event) = event {
        trace!(target: LOG_TARGET, "Encoder {:?}", event);
        let _ = tx.send(event);
    }
}
