use core::convert::Infallible;
use core::fmt::Debug;

use embedded_hal::blocking::delay::DelayMs;
use embedded_time::Clock;

use crate::{
    config::Config,
    control::{ControlState, Mode, TickOutput},
    drive::DriveValue,
    hal::{EscDriver, Indicator, IndicatorSink},
    input::InputSampler,
    scheduler::Ticker,
    store::{SetpointStorage, SetpointStore},
    Error,
};

/// The single actuator this loop commands.
pub const ACTUATOR: usize = 0;

/// Speed setpoint controller for one ESC.
///
/// Owns every collaborator of the control loop. Call
/// [`startup`](Self::startup) once, then [`tick`](Self::tick) once per
/// period, or hand both to [`run`](Self::run).
pub struct SpeedController<E, I, L, S> {
    esc: E,
    inputs: I,
    indicators: L,
    store: SetpointStore<S>,
    config: Config,
    state: ControlState,
}

impl<E, I, L, S> SpeedController<E, I, L, S>
where
    E: EscDriver,
    E::Error: Debug,
    I: InputSampler,
    L: IndicatorSink,
    L::Error: Debug,
    S: SetpointStorage,
    S::Error: Debug,
{
    pub fn new(esc: E, inputs: I, indicators: L, storage: S, config: Config) -> Self {
        Self {
            esc,
            inputs,
            indicators,
            store: SetpointStore::new(storage),
            state: ControlState::new(DriveValue::stop(config.range), config.heartbeat_shift),
            config,
        }
    }

    /// Bring up the ESC and restore the persisted setpoint.
    ///
    /// The LEDs mark each phase: both on during setup, green alone during
    /// calibration, red alone once the loop is ready.
    pub fn startup<D>(&mut self, delay: &mut D) -> Result<DriveValue, Error>
    where
        D: DelayMs<u16>,
    {
        self.indicate(Indicator::Red, true)?;
        self.indicate(Indicator::Green, true)?;

        log::info!("ESC setup");
        self.esc.setup().map_err(esc_error)?;
        self.indicate(Indicator::Red, false)?;

        log::info!("ESC calibration");
        self.esc.calibrate(delay).map_err(esc_error)?;
        self.indicate(Indicator::Green, false)?;
        self.indicate(Indicator::Red, true)?;

        let drive = self.store.load(self.config.range);
        self.state = ControlState::new(drive, self.config.heartbeat_shift);
        log::info!("restored drive {}", drive.get());

        Ok(drive)
    }

    /// Run one iteration of the control loop.
    ///
    /// The ESC is serviced before the inputs are read, so a drive change made
    /// here is emitted on the next tick.
    pub fn tick(&mut self) -> Result<TickOutput, Error> {
        self.esc.service().map_err(esc_error)?;

        let samples = self.inputs.sample()?;

        let previous = self.state.mode();
        let output = self.state.step(&samples);
        if output.mode != previous {
            log::debug!("{:?} -> {:?}", previous, output.mode);

            if output.mode == Mode::Locked && self.config.persist_on_lock {
                self.persist()?;
            }
        }

        if let Some(green) = output.green {
            self.indicate(Indicator::Green, green)?;
        }
        if let Some(red) = output.red {
            self.indicate(Indicator::Red, red)?;
        }

        self.esc.set_command(ACTUATOR, output.drive.get());

        Ok(output)
    }

    /// Start up, then tick forever at the configured period.
    ///
    /// Only returns on a fatal error.
    pub fn run<D, C>(&mut self, delay: &mut D, ticker: &mut Ticker<C>) -> Result<Infallible, Error>
    where
        D: DelayMs<u16>,
        C: Clock<T = u32>,
    {
        self.startup(delay)?;

        loop {
            ticker.wait()?;
            self.tick()?;
        }
    }

    pub fn drive(&self) -> DriveValue {
        self.state.drive()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn esc(&self) -> &E {
        &self.esc
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    fn persist(&mut self) -> Result<(), Error> {
        self.store.save(self.state.drive()).map_err(|e| {
            log::error!("setpoint write failed: {:?}", e);
            Error::Storage
        })?;
        Ok(())
    }

    fn indicate(&mut self, indicator: Indicator, on: bool) -> Result<(), Error> {
        self.indicators.set_indicator(indicator, on).map_err(|e| {
            log::error!("{:?} indicator failed: {:?}", indicator, e);
            Error::Indicator
        })
    }
}

fn esc_error<E: Debug>(error: E) -> Error {
    log::error!("ESC driver failed: {:?}", error);
    Error::Esc
}
