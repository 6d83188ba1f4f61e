mod builder;

pub use builder::Builder;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::PwmPin;
use num_traits::{Float, Num, NumCast, ToPrimitive};

use crate::{config::CALIBRATION_MS, drive::SpeedRange};

use super::EscDriver;

/// The computed duty cycle doesn't fit the pin's duty type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyError;

/// An ESC implementation for RCESC motor controllers on hardware PWM channels.
///
/// Drive values in the configured [`SpeedRange`] map linearly onto
/// `[min, max]` duty. Each channel holds one command slot, written by
/// [`set_command`](EscDriver::set_command) and emitted by
/// [`service`](EscDriver::service).
pub struct RCESC<T: PwmPin, const N: usize = 1> {
    arm: T::Duty,
    min: T::Duty,
    max: T::Duty,
    range: SpeedRange,
    calibration_ms: u16,
    pins: [T; N],
    commands: [u8; N],
}

impl<T, const N: usize> RCESC<T, N>
where
    T: PwmPin,
    T::Duty: Num + NumCast + ToPrimitive + Copy,
{
    pub fn new(arm: T::Duty, min: T::Duty, max: T::Duty, pins: [T; N]) -> Self {
        let range = SpeedRange::DEFAULT;
        Self {
            arm,
            min,
            max,
            range,
            calibration_ms: CALIBRATION_MS,
            pins,
            commands: [range.stop(); N],
        }
    }

    pub fn builder() -> Builder<T::Duty>
    where
        T::Duty: Default,
    {
        Builder::default()
    }

    /// The drive value waiting to be emitted on `actuator`.
    pub fn command(&self, actuator: usize) -> Option<u8> {
        self.commands.get(actuator).copied()
    }

    pub fn pins(&self) -> &[T; N] {
        &self.pins
    }

    pub fn free(self) -> [T; N] {
        self.pins
    }

    /// Duty cycle for a drive value. Values outside the range are clamped.
    pub fn duty(&self, drive: u8) -> Result<T::Duty, DutyError> {
        let min = self.min.to_f32().ok_or(DutyError)?;
        let max = self.max.to_f32().ok_or(DutyError)?;

        let steps = drive.clamp(self.range.stop(), self.range.max()) - self.range.stop();
        let duty = min + (max - min) * <f32 as From<u8>>::from(steps) / <f32 as From<u8>>::from(self.range.span());

        <T::Duty as NumCast>::from(Float::round(duty)).ok_or(DutyError)
    }

    fn set_all(&mut self, duty: T::Duty) {
        for pin in self.pins.iter_mut() {
            pin.set_duty(duty);
        }
    }

    fn arm_inner(&mut self) {
        self.set_all(self.arm)
    }
}

impl<T, const N: usize> EscDriver for RCESC<T, N>
where
    T: PwmPin,
    T::Duty: Num + NumCast + ToPrimitive + Copy,
{
    type Error = DutyError;

    fn setup(&mut self) -> Result<(), Self::Error> {
        for pin in self.pins.iter_mut() {
            pin.enable();
        }
        self.arm_inner();

        log::info!("ESC armed on {} channel(s)", N);
        Ok(())
    }

    fn calibrate<D: DelayMs<u16>>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        self.set_all(self.max);
        delay.delay_ms(self.calibration_ms);

        self.set_all(self.min);
        delay.delay_ms(self.calibration_ms);

        self.arm_inner();
        Ok(())
    }

    fn service(&mut self) -> Result<(), Self::Error> {
        for actuator in 0..N {
            let duty = self.duty(self.commands[actuator])?;
            self.pins[actuator].set_duty(duty);
        }
        Ok(())
    }

    fn set_command(&mut self, actuator: usize, drive: u8) {
        if let Some(slot) = self.commands.get_mut(actuator) {
            *slot = drive;
        }
    }
}
