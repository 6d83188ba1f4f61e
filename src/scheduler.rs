//! Fixed period tick pacing.

use embedded_time::{duration::Microseconds, Clock};

use crate::{Config, Error};

/// Paces the control loop at a fixed period on a free running clock.
///
/// Ticks are anchored to an absolute schedule so the period doesn't drift
/// with the time spent inside each tick. A tick that runs past the start of
/// the next one is counted as an overrun and the schedule restarts from now.
pub struct Ticker<C> {
    clock: C,
    period_us: u32,
    next_tick_us: Option<u32>,
    ticks: u32,
    overruns: u32,
}

impl<C> Ticker<C>
where
    C: Clock<T = u32>,
{
    pub fn new(clock: C, period_ms: u16) -> Self {
        Self {
            clock,
            period_us: u32::from(period_ms) * 1000,
            next_tick_us: None,
            ticks: 0,
            overruns: 0,
        }
    }

    /// Tick every `config.tick_ms`.
    pub fn from_config(clock: C, config: &Config) -> Self {
        Self::new(clock, config.tick_ms)
    }

    /// Block until the next tick is due and return its start time.
    ///
    /// The first call returns immediately.
    pub fn wait(&mut self) -> Result<Microseconds<u32>, Error> {
        let mut now = self.micros_since_epoch()?.0;

        let start = match self.next_tick_us {
            None => now,
            Some(deadline) if is_after(now, deadline) => {
                self.overruns = self.overruns.wrapping_add(1);
                log::warn!(
                    "tick {} overran by {}us",
                    self.ticks,
                    now.wrapping_sub(deadline)
                );
                now
            }
            Some(deadline) => {
                while is_before(now, deadline) {
                    now = self.micros_since_epoch()?.0;
                }
                deadline
            }
        };

        self.next_tick_us = Some(start.wrapping_add(self.period_us));
        self.ticks = self.ticks.wrapping_add(1);

        Ok(Microseconds::new(start))
    }

    /// Ticks started so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Ticks that ran longer than one period.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn micros_since_epoch(&mut self) -> Result<Microseconds<u32>, Error> {
        let instant = self.clock.try_now()?;
        Microseconds::try_from(instant.duration_since_epoch()).map_err(Into::into)
    }
}

// Timestamps wrap, so compare through the signed difference.
fn is_before(a: u32, b: u32) -> bool {
    (a.wrapping_sub(b) as i32) < 0
}

fn is_after(a: u32, b: u32) -> bool {
    (a.wrapping_sub(b) as i32) > 0
}
