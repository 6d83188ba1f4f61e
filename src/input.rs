//! Debounced button and switch inputs.
//!
//! Inputs are sampled once per tick. A raw level that disagrees with the
//! stable state has to keep disagreeing for the whole debounce window before
//! the stable state flips. A single agreeing sample restarts the window, so
//! a contact that keeps bouncing never registers.

use core::fmt::Debug;

use embedded_hal::digital::v2::InputPin;

use crate::{Config, Error};

/// Result of one debounce update.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Stable logical state, `true` when pressed.
    pub state: bool,
    /// Set for exactly one tick when `state` flips.
    pub changed: bool,
}

impl Sample {
    /// A confirmed press edge.
    pub fn pressed(&self) -> bool {
        self.changed && self.state
    }

    /// A confirmed release edge.
    pub fn released(&self) -> bool {
        self.changed && !self.state
    }
}

/// Schedule based debounce filter.
///
/// The counter is reloaded with `threshold` whenever the raw level agrees
/// with the stable state. Each disagreeing tick counts it down, and the flip
/// is committed on the disagreeing tick that finds it already at zero,
/// i.e. after `threshold + 1` consecutive disagreeing samples.
///
/// The stable state starts released with a full window, so a level already
/// held at power-up also needs `threshold + 1` samples to register.
#[derive(Debug, Clone)]
pub struct Debouncer {
    state: bool,
    changed: bool,
    count: u8,
    threshold: u8,
}

impl Debouncer {
    pub fn new(threshold: u8) -> Self {
        Self {
            state: false,
            changed: false,
            count: threshold,
            threshold,
        }
    }

    pub fn update(&mut self, raw: bool) -> Sample {
        self.changed = false;

        if raw == self.state {
            self.count = self.threshold;
        } else if self.count == 0 {
            self.state = raw;
            self.changed = true;
            self.count = self.threshold;
        } else {
            self.count -= 1;
        }

        self.sample()
    }

    pub fn sample(&self) -> Sample {
        Sample {
            state: self.state,
            changed: self.changed,
        }
    }
}

/// A debounced input pin.
///
/// Inputs use the pull-up convention: the pin reads low while pressed.
pub struct DebouncedInput<P> {
    pin: P,
    debouncer: Debouncer,
}

impl<P: InputPin> DebouncedInput<P> {
    pub fn new(pin: P, threshold: u8) -> Self {
        Self {
            pin,
            debouncer: Debouncer::new(threshold),
        }
    }

    pub fn sample(&mut self) -> Result<Sample, P::Error> {
        let raw = self.pin.is_low()?;
        Ok(self.debouncer.update(raw))
    }

    /// The last reported sample without reading the pin.
    pub fn last(&self) -> Sample {
        self.debouncer.sample()
    }

    pub fn free(self) -> P {
        self.pin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Up,
    Down,
    Enable,
}

/// One tick's worth of debounced inputs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputSamples {
    pub up: Sample,
    pub down: Sample,
    pub enable: Sample,
}

/// Source of debounced input samples for the control loop.
pub trait InputSampler {
    fn sample(&mut self) -> Result<InputSamples, Error>;
}

impl<T: InputSampler> InputSampler for &mut T {
    fn sample(&mut self) -> Result<InputSamples, Error> {
        (&mut **self).sample()
    }
}

/// The up, down and set-enable inputs.
pub struct Inputs<U, D, E> {
    up: DebouncedInput<U>,
    down: DebouncedInput<D>,
    enable: DebouncedInput<E>,
}

impl<U, D, E> Inputs<U, D, E>
where
    U: InputPin,
    D: InputPin,
    E: InputPin,
{
    pub fn new(up: U, down: D, enable: E, threshold: u8) -> Self {
        Self {
            up: DebouncedInput::new(up, threshold),
            down: DebouncedInput::new(down, threshold),
            enable: DebouncedInput::new(enable, threshold),
        }
    }

    /// Debounce all three inputs over `config.debounce_ticks()` ticks.
    pub fn from_config(up: U, down: D, enable: E, config: &Config) -> Self {
        Self::new(up, down, enable, config.debounce_ticks())
    }

    pub fn free(self) -> (U, D, E) {
        (self.up.free(), self.down.free(), self.enable.free())
    }
}

impl<U, D, E> InputSampler for Inputs<U, D, E>
where
    U: InputPin,
    D: InputPin,
    E: InputPin,
    U::Error: Debug,
    D::Error: Debug,
    E::Error: Debug,
{
    fn sample(&mut self) -> Result<InputSamples, Error> {
        let up = self.up.sample().map_err(|e| read_error(InputKind::Up, e))?;
        let down = self
            .down
            .sample()
            .map_err(|e| read_error(InputKind::Down, e))?;
        let enable = self
            .enable
            .sample()
            .map_err(|e| read_error(InputKind::Enable, e))?;

        Ok(InputSamples { up, down, enable })
    }
}

fn read_error<E: Debug>(kind: InputKind, error: E) -> Error {
    log::error!("{:?} input read failed: {:?}", kind, error);
    Error::Input(kind)
}
