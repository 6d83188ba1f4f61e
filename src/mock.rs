//! Hand rolled hardware doubles shared by the unit tests.

use core::{cell::Cell, convert::Infallible};
use std::{collections::VecDeque, rc::Rc, vec::Vec};

use embedded_hal::{
    blocking::delay::DelayMs,
    digital::v2::{InputPin, OutputPin},
    PwmPin,
};
use embedded_time::{clock, rate::Fraction, Clock, Instant};

use crate::{
    hal::EscDriver,
    input::{InputSampler, InputSamples, Sample},
    Error,
};

/// Push button wired to ground, shared between the test and the input.
#[derive(Clone, Default)]
pub struct MockButton(Rc<Cell<bool>>);

impl MockButton {
    pub fn press(&self) {
        self.0.set(true);
    }

    pub fn release(&self) {
        self.0.set(false);
    }
}

impl InputPin for MockButton {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }
}

#[derive(Debug)]
pub struct PinFault;

/// A pin that fails every access.
pub struct BrokenPin;

impl InputPin for BrokenPin {
    type Error = PinFault;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }
}

impl OutputPin for BrokenPin {
    type Error = PinFault;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }
}

/// LED whose level can be read back by the test.
#[derive(Clone, Default)]
pub struct MockLed(Rc<Cell<bool>>);

impl MockLed {
    pub fn is_on(&self) -> bool {
        self.0.get()
    }
}

impl OutputPin for MockLed {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

/// PWM channel with a floating point duty so mappings can be compared exactly.
pub struct MockPwm {
    pub duty: f32,
    pub max_duty: f32,
    pub enabled: bool,
}

impl MockPwm {
    pub fn new(max_duty: f32) -> Self {
        Self {
            duty: 0.,
            max_duty,
            enabled: false,
        }
    }
}

impl PwmPin for MockPwm {
    type Duty = f32;

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn get_duty(&self) -> Self::Duty {
        self.duty
    }

    fn get_max_duty(&self) -> Self::Duty {
        self.max_duty
    }

    fn set_duty(&mut self, duty: Self::Duty) {
        self.duty = duty;
    }
}

/// Records requested delays instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    pub delays: Vec<u16>,
}

impl DelayMs<u16> for MockDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.delays.push(ms);
    }
}

/// Microsecond clock that moves forward by `step` on every read.
pub struct MockClock {
    now: Cell<u32>,
    step: u32,
}

impl MockClock {
    pub fn new(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }

    pub fn advance(&self, us: u32) {
        self.now.set(self.now.get().wrapping_add(us));
    }
}

impl Clock for MockClock {
    type T = u32;

    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

    fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        Ok(Instant::new(now))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscCall {
    Setup,
    Calibrate,
    Service,
    Command(usize, u8),
}

/// ESC driver that logs every call in order.
#[derive(Default)]
pub struct MockEsc {
    pub calls: Vec<EscCall>,
}

impl MockEsc {
    pub fn commands(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                EscCall::Command(_, drive) => Some(*drive),
                _ => None,
            })
            .collect()
    }
}

impl EscDriver for MockEsc {
    type Error = Infallible;

    fn setup(&mut self) -> Result<(), Self::Error> {
        self.calls.push(EscCall::Setup);
        Ok(())
    }

    fn calibrate<D: DelayMs<u16>>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.calls.push(EscCall::Calibrate);
        Ok(())
    }

    fn service(&mut self) -> Result<(), Self::Error> {
        self.calls.push(EscCall::Service);
        Ok(())
    }

    fn set_command(&mut self, actuator: usize, drive: u8) {
        self.calls.push(EscCall::Command(actuator, drive));
    }
}

/// Feeds pre-debounced samples to the loop, one per tick.
///
/// Once the script runs out the enable state of the last sample is held
/// with no edges.
#[derive(Default)]
pub struct ScriptedInputs {
    script: VecDeque<InputSamples>,
    last: InputSamples,
}

impl ScriptedInputs {
    pub fn push(&mut self, samples: InputSamples) {
        self.script.push_back(samples);
    }
}

impl InputSampler for ScriptedInputs {
    fn sample(&mut self) -> Result<InputSamples, Error> {
        let samples = match self.script.pop_front() {
            Some(samples) => samples,
            None => InputSamples {
                enable: Sample {
                    state: self.last.enable.state,
                    changed: false,
                },
                ..InputSamples::default()
            },
        };
        self.last = samples;
        Ok(samples)
    }
}

/// Builds one tick of scripted samples.
pub fn tick(enable: bool, up: bool, down: bool) -> InputSamples {
    let edge = |pressed| Sample {
        state: pressed,
        changed: pressed,
    };

    InputSamples {
        up: edge(up),
        down: edge(down),
        enable: Sample {
            state: enable,
            changed: false,
        },
    }
}
