//! Non-volatile copy of the drive setpoint.
//!
//! The setpoint is a single byte. A store that was never written holds
//! `STOP_SPEED`, the value the image ships with.

use core::fmt::Debug;

use crate::{
    config::STOP_SPEED,
    drive::{DriveValue, SpeedRange},
};

/// Byte sized persistent storage, e.g. one EEPROM cell.
pub trait SetpointStorage {
    type Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error>;
}

impl<T: SetpointStorage> SetpointStorage for &mut T {
    type Error = T::Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        (&mut **self).read_byte()
    }

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        (&mut **self).write_byte(value)
    }
}

pub struct SetpointStore<S> {
    storage: S,
    /// Last byte known to be in storage.
    stored: Option<u8>,
}

impl<S> SetpointStore<S>
where
    S: SetpointStorage,
    S::Error: Debug,
{
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            stored: None,
        }
    }

    /// Read the persisted setpoint.
    ///
    /// An unreadable store or a byte outside `range` falls back to the stop
    /// speed rather than halting, so the loop always starts in range.
    pub fn load(&mut self, range: SpeedRange) -> DriveValue {
        let byte = match self.storage.read_byte() {
            Ok(byte) => byte,
            Err(error) => {
                log::warn!("setpoint read failed ({:?}), starting stopped", error);
                return DriveValue::stop(range);
            }
        };
        self.stored = Some(byte);

        DriveValue::new(byte, range).unwrap_or_else(|| {
            log::warn!(
                "stored setpoint {} outside {}..={}, starting stopped",
                byte,
                range.stop(),
                range.max()
            );
            DriveValue::stop(range)
        })
    }

    /// Write `drive` back if it differs from what storage already holds.
    ///
    /// Returns `true` if a write happened.
    pub fn save(&mut self, drive: DriveValue) -> Result<bool, S::Error> {
        let value = drive.get();
        if self.stored == Some(value) {
            return Ok(false);
        }

        self.storage.write_byte(value)?;
        self.stored = Some(value);
        log::debug!("setpoint {} saved", value);
        Ok(true)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    Read,
    Write,
}

/// RAM backed storage, for hosts without EEPROM and for tests.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    byte: u8,
    writes: u32,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStorage {
    pub const fn new() -> Self {
        Self::with_byte(STOP_SPEED)
    }

    pub const fn with_byte(byte: u8) -> Self {
        Self {
            byte,
            writes: 0,
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn fail_reads(mut self, fail: bool) -> Self {
        self.fail_reads = fail;
        self
    }

    pub fn fail_writes(mut self, fail: bool) -> Self {
        self.fail_writes = fail;
        self
    }

    pub fn byte(&self) -> u8 {
        self.byte
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SetpointStorage for MemoryStorage {
    type Error = MemoryError;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        if self.fail_reads {
            return Err(MemoryError::Read);
        }
        Ok(self.byte)
    }

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MemoryError::Write);
        }
        self.byte = value;
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryError, MemoryStorage, SetpointStore};
    use crate::drive::{DriveValue, SpeedRange};

    #[test]
    fn fresh_store_loads_stop_speed() {
        let mut store = SetpointStore::new(MemoryStorage::default());
        assert_eq!(store.load(SpeedRange::DEFAULT).get(), 0);
    }

    #[test]
    fn loads_persisted_value() {
        let mut store = SetpointStore::new(MemoryStorage::with_byte(50));
        assert_eq!(store.load(SpeedRange::DEFAULT).get(), 50);
    }

    #[test]
    fn out_of_range_byte_falls_back() {
        let range = SpeedRange::new(10, 100).unwrap();

        let mut store = SetpointStore::new(MemoryStorage::with_byte(0xff));
        assert_eq!(store.load(range).get(), 10);

        let mut store = SetpointStore::new(MemoryStorage::with_byte(3));
        assert_eq!(store.load(range).get(), 10);
    }

    #[test]
    fn read_failure_falls_back() {
        let mut store = SetpointStore::new(MemoryStorage::with_byte(50).fail_reads(true));
        assert_eq!(store.load(SpeedRange::DEFAULT).get(), 0);
    }

    #[test]
    fn save_skips_unchanged_value() {
        let mut store = SetpointStore::new(MemoryStorage::with_byte(50));
        let drive = store.load(SpeedRange::DEFAULT);

        assert_eq!(store.save(drive), Ok(false));
        assert_eq!(store.storage().writes(), 0);

        let drive = DriveValue::new(51, SpeedRange::DEFAULT).unwrap();
        assert_eq!(store.save(drive), Ok(true));
        assert_eq!(store.save(drive), Ok(false));
        assert_eq!(store.storage().writes(), 1);
        assert_eq!(store.into_inner().byte(), 51);
    }

    #[test]
    fn save_reports_write_failure() {
        let mut store = SetpointStore::new(MemoryStorage::new().fail_writes(true));
        let drive = DriveValue::new(5, SpeedRange::DEFAULT).unwrap();
        assert_eq!(store.save(drive), Err(MemoryError::Write));
    }
}
