//! The set mode state machine.
//!
//! While the enable switch is held the loop is in [`Mode::Adjusting`] and
//! confirmed button presses step the drive value. Otherwise the loop is
//! [`Mode::Locked`] and the drive value is frozen. The mode follows the
//! enable switch's debounced level, not its edges.

use crate::{drive::DriveValue, input::InputSamples};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Locked,
    Adjusting,
}

impl Mode {
    fn from_enable(enabled: bool) -> Self {
        if enabled {
            Mode::Adjusting
        } else {
            Mode::Locked
        }
    }
}

/// What one tick asks of the outputs.
///
/// Indicators are `None` when the tick leaves them as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutput {
    pub mode: Mode,
    pub drive: DriveValue,
    pub green: Option<bool>,
    pub red: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ControlState {
    drive: DriveValue,
    mode: Mode,
    count: u8,
    heartbeat_shift: u8,
}

impl ControlState {
    pub fn new(drive: DriveValue, heartbeat_shift: u8) -> Self {
        Self {
            drive,
            mode: Mode::Locked,
            count: 0,
            heartbeat_shift,
        }
    }

    pub fn drive(&self) -> DriveValue {
        self.drive
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Advance one tick.
    pub fn step(&mut self, samples: &InputSamples) -> TickOutput {
        self.count = self.count.wrapping_add(1);
        self.mode = Mode::from_enable(samples.enable.state);

        if self.mode == Mode::Locked {
            return TickOutput {
                mode: self.mode,
                drive: self.drive,
                green: None,
                red: None,
            };
        }

        // Both edges in one tick cancel out.
        if samples.down.pressed() && self.drive.decrement() {
            log::debug!("drive down to {}", self.drive.get());
        }
        if samples.up.pressed() && self.drive.increment() {
            log::debug!("drive up to {}", self.drive.get());
        }

        TickOutput {
            mode: self.mode,
            drive: self.drive,
            green: Some(self.heartbeat()),
            red: Some(self.drive.is_at_limit()),
        }
    }

    fn heartbeat(&self) -> bool {
        self.count
            .checked_shr(u32::from(self.heartbeat_shift))
            .map_or(false, |bits| bits & 1 == 1)
    }
}
