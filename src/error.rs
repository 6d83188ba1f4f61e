use core::fmt;

use embedded_time::{clock, ConversionError};

use crate::input::InputKind;

/// A fatal control loop error.
///
/// HAL error payloads are logged where they are converted, the variant only
/// records which collaborator failed.
#[derive(Debug)]
pub enum Error {
    Input(InputKind),
    Esc,
    Indicator,
    Storage,
    Clock(clock::Error),
    Time(ConversionError),
    InvalidConfig,
}

impl From<clock::Error> for Error {
    fn from(clock_error: clock::Error) -> Self {
        Error::Clock(clock_error)
    }
}

impl From<ConversionError> for Error {
    fn from(time_error: ConversionError) -> Self {
        Error::Time(time_error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Input(kind) => write!(f, "failed to read {:?} input", kind),
            Error::Esc => f.write_str("ESC driver failure"),
            Error::Indicator => f.write_str("failed to drive indicator"),
            Error::Storage => f.write_str("failed to write setpoint storage"),
            Error::Clock(e) => write!(f, "tick clock error: {:?}", e),
            Error::Time(e) => write!(f, "time conversion error: {:?}", e),
            Error::InvalidConfig => f.write_str("invalid configuration"),
        }
    }
}
