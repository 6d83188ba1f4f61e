use crate::config::{MAX_SPEED, STOP_SPEED};

/// Inclusive bounds of the commanded drive value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedRange {
    stop: u8,
    max: u8,
}

impl SpeedRange {
    /// The firmware defaults, `STOP_SPEED..=MAX_SPEED`.
    pub const DEFAULT: Self = Self {
        stop: STOP_SPEED,
        max: MAX_SPEED,
    };

    /// Returns `None` unless `stop < max`.
    pub const fn new(stop: u8, max: u8) -> Option<Self> {
        if stop < max {
            Some(Self { stop, max })
        } else {
            None
        }
    }

    pub const fn stop(&self) -> u8 {
        self.stop
    }

    pub const fn max(&self) -> u8 {
        self.max
    }

    pub const fn contains(&self, value: u8) -> bool {
        value >= self.stop && value <= self.max
    }

    /// Number of steps between stop and max.
    pub const fn span(&self) -> u8 {
        self.max - self.stop
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The commanded actuator speed.
///
/// A `DriveValue` can only be built inside its range and only moves one step
/// at a time, so it never leaves `[stop, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveValue {
    value: u8,
    range: SpeedRange,
}

impl DriveValue {
    pub const fn new(value: u8, range: SpeedRange) -> Option<Self> {
        if range.contains(value) {
            Some(Self { value, range })
        } else {
            None
        }
    }

    /// The stopped setpoint, also the value of a never written store.
    pub const fn stop(range: SpeedRange) -> Self {
        Self {
            value: range.stop,
            range,
        }
    }

    pub const fn get(&self) -> u8 {
        self.value
    }

    pub const fn range(&self) -> SpeedRange {
        self.range
    }

    /// Step up by one. Returns `false` if already at max.
    pub fn increment(&mut self) -> bool {
        if self.value < self.range.max {
            self.value += 1;
            true
        } else {
            false
        }
    }

    /// Step down by one. Returns `false` if already stopped.
    pub fn decrement(&mut self) -> bool {
        if self.value > self.range.stop {
            self.value -= 1;
            true
        } else {
            false
        }
    }

    /// True at either boundary, where one of the buttons can't go further.
    pub const fn is_at_limit(&self) -> bool {
        self.value == self.range.stop || self.value == self.range.max
    }
}

impl From<DriveValue> for u8 {
    fn from(drive: DriveValue) -> Self {
        drive.value
    }
}
