use embedded_hal::PwmPin;

use crate::{
    config::{Config, CALIBRATION_MS},
    drive::SpeedRange,
};

use super::RCESC;

pub struct Builder<T> {
    arm: Option<T>,
    min: T,
    max: Option<T>,
    range: SpeedRange,
    delay_ms: u16,
}

impl<T: Default> Default for Builder<T> {
    fn default() -> Self {
        Self {
            arm: None,
            min: T::default(),
            max: None,
            range: SpeedRange::DEFAULT,
            delay_ms: CALIBRATION_MS,
        }
    }
}

impl<T> Builder<T> {
    /// Duty emitted after setup and calibration. Defaults to `min`.
    pub fn arm(mut self, arm: T) -> Self {
        self.arm = Some(arm);
        self
    }

    pub fn min(mut self, min: T) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    pub fn range(mut self, range: SpeedRange) -> Self {
        self.range = range;
        self
    }

    /// Hold time for each end of the calibration sweep.
    pub fn delay(mut self, ms: u16) -> Self {
        self.delay_ms = ms;
        self
    }

    /// Take the drive range and calibration timing from the loop config.
    pub fn config(self, config: &Config) -> Self {
        self.range(config.range).delay(config.calibration_ms)
    }

    pub fn build<P, const N: usize>(self, pins: [P; N]) -> RCESC<P, N>
    where
        P: PwmPin<Duty = T>,
        T: Copy,
    {
        let max = match self.max {
            Some(max) => max,
            None => pins.first().map_or(self.min, |pin| pin.get_max_duty()),
        };

        RCESC {
            arm: self.arm.unwrap_or(self.min),
            min: self.min,
            max,
            range: self.range,
            calibration_ms: self.delay_ms,
            pins,
            commands: [self.range.stop(); N],
        }
    }
}
