//! Loop timing and setpoint bounds.

use crate::{drive::SpeedRange, Error};

/// Period of one control loop tick in milliseconds.
pub const CHECK_MS: u16 = 20;

/// How long an input has to disagree with its stable state before it flips.
pub const DEBOUNCE_MS: u16 = 100;

/// Drive value that holds the actuator stopped.
pub const STOP_SPEED: u8 = 0;

/// Highest drive value the buttons can reach.
pub const MAX_SPEED: u8 = 100;

/// The green heartbeat follows bit 5 of the tick counter (32 ticks per phase).
pub const HEARTBEAT_SHIFT: u8 = 5;

/// Hold time for each end of the ESC calibration sweep.
pub const CALIBRATION_MS: u16 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub tick_ms: u16,
    pub debounce_ms: u16,
    pub range: SpeedRange,
    pub heartbeat_shift: u8,
    pub calibration_ms: u16,
    /// Write the drive value back to storage when leaving set mode.
    pub persist_on_lock: bool,
}

impl Config {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Debounce window expressed in ticks.
    pub fn debounce_ticks(&self) -> u8 {
        let ticks = self.debounce_ms / self.tick_ms.max(1);
        ticks.min(u8::MAX as u16) as u8
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: CHECK_MS,
            debounce_ms: DEBOUNCE_MS,
            range: SpeedRange::DEFAULT,
            heartbeat_shift: HEARTBEAT_SHIFT,
            calibration_ms: CALIBRATION_MS,
            persist_on_lock: false,
        }
    }
}

pub struct Builder {
    config: Config,
    stop: u8,
    max: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            stop: STOP_SPEED,
            max: MAX_SPEED,
        }
    }
}

impl Builder {
    pub fn tick_ms(mut self, ms: u16) -> Self {
        self.config.tick_ms = ms;
        self
    }

    pub fn debounce_ms(mut self, ms: u16) -> Self {
        self.config.debounce_ms = ms;
        self
    }

    pub fn stop_speed(mut self, stop: u8) -> Self {
        self.stop = stop;
        self
    }

    pub fn max_speed(mut self, max: u8) -> Self {
        self.max = max;
        self
    }

    pub fn heartbeat_shift(mut self, shift: u8) -> Self {
        self.config.heartbeat_shift = shift;
        self
    }

    pub fn calibration_ms(mut self, ms: u16) -> Self {
        self.config.calibration_ms = ms;
        self
    }

    pub fn persist_on_lock(mut self, persist: bool) -> Self {
        self.config.persist_on_lock = persist;
        self
    }

    pub fn build(self) -> Result<Config, Error> {
        let range = SpeedRange::new(self.stop, self.max).ok_or(Error::InvalidConfig)?;
        if self.config.tick_ms == 0 || self.config.heartbeat_shift >= u8::BITS as u8 {
            return Err(Error::InvalidConfig);
        }

        Ok(Config {
            range,
            ..self.config
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::Error;

    #[test]
    fn defaults_match_firmware_constants() {
        let config = Config::default();
        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.debounce_ticks(), 5);
        assert_eq!(config.range.stop(), 0);
        assert_eq!(config.range.max(), 100);
        assert!(!config.persist_on_lock);
        assert_eq!(Config::builder().build().unwrap(), config);
    }

    #[test]
    fn builder_overrides() {
        let config = Config::builder()
            .tick_ms(10)
            .debounce_ms(50)
            .stop_speed(20)
            .max_speed(80)
            .persist_on_lock(true)
            .build()
            .unwrap();

        assert_eq!(config.debounce_ticks(), 5);
        assert_eq!(config.range.stop(), 20);
        assert_eq!(config.range.max(), 80);
        assert!(config.persist_on_lock);
    }

    #[test]
    fn builder_rejects_bad_values() {
        assert!(matches!(
            Config::builder().stop_speed(50).max_speed(50).build(),
            Err(Error::InvalidConfig)
        ));
        assert!(matches!(
            Config::builder().tick_ms(0).build(),
            Err(Error::InvalidConfig)
        ));
        assert!(matches!(
            Config::builder().heartbeat_shift(8).build(),
            Err(Error::InvalidConfig)
        ));
    }
}
