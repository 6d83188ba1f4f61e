//! # embedded-speed-control
//! A `#![no_std]` speed setpoint controller for a single ESC, driven by an
//! up button, a down button and a set-mode enable switch.
//!
//! # Components
//! [`input`] debounces the three inputs once per tick.
//!
//! [`control`] is the set mode state machine that steps the [`DriveValue`].
//!
//! [`store`] restores the setpoint from non-volatile storage at startup.
//!
//! [`hal`] contains the hardware abstraction layer: the [`EscDriver`]
//! collaborator (see [`RCESC`] for a PWM implementation) and the status
//! [`Leds`].
//!
//! [`SpeedController`] ties them together into the control loop, paced by
//! the [`Ticker`].
//!
//! ```ignore
//! let config = Config::default();
//! let esc = RCESC::<Pwm>::builder().min(1000).max(2000).config(&config).build([pwm]);
//! let inputs = Inputs::from_config(up, down, enable, &config);
//! let mut controller =
//!     SpeedController::new(esc, inputs, Leds::new(red, green), eeprom, config);
//!
//! let mut ticker = Ticker::from_config(clock, &config);
//! let error = controller.run(&mut delay, &mut ticker).unwrap_err();
//! ```

#![cfg_attr(not(test), no_std)]

pub mod config;
pub use config::Config;

pub mod control;
pub use control::{ControlState, Mode, TickOutput};

pub mod controller;
pub use controller::SpeedController;

pub mod drive;
pub use drive::{DriveValue, SpeedRange};

mod error;
pub use error::Error;

pub mod hal;
pub use hal::{EscDriver, Indicator, IndicatorSink, Leds, RCESC};

pub mod input;
pub use input::{InputSampler, Inputs};

pub mod scheduler;
pub use scheduler::Ticker;

pub mod store;
pub use store::{MemoryStorage, SetpointStorage, SetpointStore};

#[cfg(test)]
mod mock;
