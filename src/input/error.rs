use std::error::Error;
use std::fmt;

/// Error types for GPIO access.
#[derive(Debug)]
pub enum HardwareError {
    Gpio(rppal::gpio::Error),
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::Gpio(e) => write!(f, "GPIO error: {}", e),
        }
    }
}

impl Error for HardwareError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HardwareError::Gpio(e) => Some(e),
        }
    }
}

impl From<rppal::gpio::Error> for HardwareError {
    fn from(e: rppal::gpio::Error) -> Self {
        HardwareError::Gpio(e)
    }
}
