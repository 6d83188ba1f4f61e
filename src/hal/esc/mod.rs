mod rcesc;
pub use rcesc::{Builder, DutyError, RCESC};

use embedded_hal::blocking::delay::DelayMs;

/// Electronic speed controller driving one or more actuators.
///
/// The control loop only stores drive values with [`set_command`](Self::set_command)
/// and calls [`service`](Self::service) once per tick; pulse generation is
/// entirely up to the driver.
pub trait EscDriver {
    type Error;

    /// One-time initialization. Must run before any command is issued.
    fn setup(&mut self) -> Result<(), Self::Error>;

    /// Teach the ESC its input range. Blocks until done.
    fn calibrate<D: DelayMs<u16>>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Emit the stored commands. Must be called at least once per tick.
    fn service(&mut self) -> Result<(), Self::Error>;

    /// Store a drive value for the next [`service`](Self::service) call.
    /// Range checking is the caller's job.
    fn set_command(&mut self, actuator: usize, drive: u8);
}

impl<T: EscDriver> EscDriver for &mut T {
    type Error = T::Error;

    fn setup(&mut self) -> Result<(), Self::Error> {
        (&mut **self).setup()
    }

    fn calibrate<D: DelayMs<u16>>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        (&mut **self).calibrate(delay)
    }

    fn service(&mut self) -> Result<(), Self::Error> {
        (&mut **self).service()
    }

    fn set_command(&mut self, actuator: usize, drive: u8) {
        (&mut **self).set_command(actuator, drive)
    }
}
