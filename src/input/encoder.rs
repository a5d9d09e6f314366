use super::InputEvent;

/// Both lines high: the encoder rests in a detent.
const IDLE: u8 = 0b11;

/// Decodes the CLK/DT lines of a mechanical rotary encoder.
///
/// States are `(clk << 1) | dt`. Turning clockwise walks
/// `11 -> 01 -> 00 -> 10 -> 11`, counter-clockwise walks it backwards. One
/// rotation is reported per detent, when the lines return to idle after at
/// least half a cycle in one direction. Skipped states are ignored.
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: u8,
    steps: i8,
}

impl QuadratureDecoder {
    pub fn new(clk_high: bool, dt_high: bool) -> Self {
        QuadratureDecoder {
            state: encode(clk_high, dt_high),
            steps: 0,
        }
    }

    pub fn update_clk(&mut self, high: bool) -> Option<InputEvent> {
        let dt = self.state & 0b01 != 0;
        self.advance(encode(high, dt))
    }

    pub fn update_dt(&mut self, high: bool) -> Option<InputEvent> {
        let clk = self.state & 0b10 != 0;
        self.advance(encode(clk, high))
    }

    fn advance(&mut self, next: u8) -> Option<InputEvent> {
        self.steps = self.steps.saturating_add(transition(self.state, next));
        self.state = next;

        if next != IDLE {
            return None;
        }

        let steps = std::mem::take(&mut self.steps);
        if steps >= 2 {
            Some(InputEvent::RotaryClockwise)
        } else if steps <= -2 {
            Some(InputEvent::RotaryCounterClockwise)
        } else {
            None
        }
    }
}

fn encode(clk_high: bool, dt_high: bool) -> u8 {
    (u8::from(clk_high) << 1) | u8::from(dt_high)
}

fn transition(from: u8, to: u8) -> i8 {
    match (from, to) {
        (0b11, 0b01) | (0b01, 0b00) | (0b00, 0b10) | (0b10, 0b11) => 1,
        (0b11, 0b10) | (0b10, 0b00) | (0b00, 0b01) | (0b01, 0b11) => -1,
        _ => 0,
    }
}
