//! Runs the control loop on the host against simulated pins.
//!
//! The enable switch and buttons follow a fixed script; every drive change
//! and the ESC duty it produces are printed.

use std::{cell::Cell, convert::Infallible, rc::Rc, thread, time::Duration};

use embedded_hal::{
    blocking::delay::DelayMs,
    digital::v2::{InputPin, OutputPin},
    PwmPin,
};
use embedded_speed_control::{
    Config, Inputs, Leds, MemoryStorage, SpeedController, Ticker, RCESC,
};
use embedded_time::{clock, rate::Fraction, Clock, Instant};

struct HostClock(std::time::Instant);

impl Clock for HostClock {
    type T = u32;

    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

    fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
        Ok(Instant::new(self.0.elapsed().as_micros() as u32))
    }
}

struct HostDelay;

impl DelayMs<u16> for HostDelay {
    fn delay_ms(&mut self, ms: u16) {
        thread::sleep(Duration::from_millis(ms.into()));
    }
}

#[derive(Clone, Default)]
struct Button(Rc<Cell<bool>>);

impl InputPin for Button {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }
}

struct Led;

impl OutputPin for Led {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Default)]
struct Pwm {
    duty: u16,
}

impl PwmPin for Pwm {
    type Duty = u16;

    fn disable(&mut self) {}

    fn enable(&mut self) {}

    fn get_duty(&self) -> Self::Duty {
        self.duty
    }

    fn get_max_duty(&self) -> Self::Duty {
        2000
    }

    fn set_duty(&mut self, duty: Self::Duty) {
        self.duty = duty;
    }
}

fn main() {
    let config = Config::builder()
        .calibration_ms(200)
        .persist_on_lock(true)
        .build()
        .unwrap();

    let up = Button::default();
    let down = Button::default();
    let enable = Button::default();
    let inputs = Inputs::from_config(up.clone(), down.clone(), enable.clone(), &config);

    let esc = RCESC::<Pwm>::builder()
        .min(1000)
        .max(2000)
        .config(&config)
        .build([Pwm::default()]);

    let mut controller = SpeedController::new(
        esc,
        inputs,
        Leds::new(Led, Led),
        MemoryStorage::with_byte(50),
        config,
    );
    let mut ticker = Ticker::from_config(HostClock(std::time::Instant::now()), &config);

    if let Err(error) = controller.startup(&mut HostDelay) {
        eprintln!("startup failed: {}", error);
        return;
    }

    let mut drive = controller.drive().get();
    for tick in 0..300u32 {
        enable.0.set((10..220).contains(&tick));
        up.0.set([30..45, 60..75, 90..105].iter().any(|t| t.contains(&tick)));
        down.0.set((140..155).contains(&tick));

        if let Err(error) = ticker.wait().and_then(|_| controller.tick()) {
            eprintln!("control loop halted: {}", error);
            return;
        }

        if controller.drive().get() != drive {
            drive = controller.drive().get();
            dbg!(tick, drive, controller.mode());
        }
    }

    dbg!(
        controller.esc().pins()[0].get_duty(),
        controller.storage().byte(),
        ticker.overruns()
    );
}
