pub mod esc;
pub use esc::{EscDriver, RCESC};

pub mod indicator;
pub use indicator::{Indicator, IndicatorSink, Leds};
