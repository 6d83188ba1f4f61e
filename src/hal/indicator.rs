use embedded_hal::digital::v2::OutputPin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Boundary reached, or a startup phase marker.
    Red,
    /// Set mode heartbeat, or a startup phase marker.
    Green,
}

/// Binary status outputs driven by the control loop.
pub trait IndicatorSink {
    type Error;

    fn set_indicator(&mut self, indicator: Indicator, on: bool) -> Result<(), Self::Error>;
}

impl<T: IndicatorSink> IndicatorSink for &mut T {
    type Error = T::Error;

    fn set_indicator(&mut self, indicator: Indicator, on: bool) -> Result<(), Self::Error> {
        (&mut **self).set_indicator(indicator, on)
    }
}

#[derive(Debug)]
pub enum LedError<R, G> {
    Red(R),
    Green(G),
}

/// A red and a green LED on active high output pins.
pub struct Leds<R, G> {
    red: R,
    green: G,
}

impl<R, G> Leds<R, G>
where
    R: OutputPin,
    G: OutputPin,
{
    pub fn new(red: R, green: G) -> Self {
        Self { red, green }
    }

    pub fn free(self) -> (R, G) {
        (self.red, self.green)
    }
}

impl<R, G> IndicatorSink for Leds<R, G>
where
    R: OutputPin,
    G: OutputPin,
{
    type Error = LedError<R::Error, G::Error>;

    fn set_indicator(&mut self, indicator: Indicator, on: bool) -> Result<(), Self::Error> {
        match indicator {
            Indicator::Red => set(&mut self.red, on).map_err(LedError::Red),
            Indicator::Green => set(&mut self.green, on).map_err(LedError::Green),
        }
    }
}

fn set<P: OutputPin>(pin: &mut P, on: bool) -> Result<(), P::Error> {
    if on {
        pin.set_high()
    } else {
        pin.set_low()
    }
}
