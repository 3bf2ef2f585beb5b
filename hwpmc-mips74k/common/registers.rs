use std::sync::Arc;

use mips74k_raw::cp0::PERFCNT_SELECTS;
use mips74k_raw::Cp0Error;
use parking_lot::Mutex;

use crate::error::Result;

/// Register 25 selects backing the performance counter pairs
pub trait CounterRegisters {
    fn read(&self, select: u32) -> Result<u32>;

    fn write(&self, select: u32, value: u32) -> Result<()>;
}

impl<R: CounterRegisters + ?Sized> CounterRegisters for &R {
    fn read(&self, select: u32) -> Result<u32> {
        (**self).read(select)
    }

    fn write(&self, select: u32, value: u32) -> Result<()> {
        (**self).write(select, value)
    }
}

impl<R: CounterRegisters + ?Sized> CounterRegisters for Arc<R> {
    fn read(&self, select: u32) -> Result<u32> {
        (**self).read(select)
    }

    fn write(&self, select: u32, value: u32) -> Result<()> {
        (**self).write(select, value)
    }
}

/// CP0 register 25 of the executing core
#[derive(Debug, Clone, Copy, Default)]
pub struct Cp0Registers;

impl CounterRegisters for Cp0Registers {
    fn read(&self, select: u32) -> Result<u32> {
        let value = mips74k_raw::read_perfcnt(select)?;
        tracing::trace!("CP0 read: $25 sel {} = 0x{:08x}", select, value);
        Ok(value)
    }

    fn write(&self, select: u32, value: u32) -> Result<()> {
        mips74k_raw::write_perfcnt(select, value)?;
        tracing::trace!("CP0 write: $25 sel {} <- 0x{:08x}", select, value);
        Ok(())
    }
}

const SELECTS: usize = PERFCNT_SELECTS as usize;

#[derive(Debug, Default)]
struct RegisterFile {
    regs: [u32; SELECTS],
    accesses: usize,
}

/// In-memory register file for hosts without CP0
///
/// Value registers only move when [`SimulatedRegisters::advance`] is called.
#[derive(Debug, Default)]
pub struct SimulatedRegisters {
    file: Mutex<RegisterFile>,
}

impl SimulatedRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `events` occurrences on the value register at `select`
    pub fn advance(&self, select: u32, events: u32) -> Result<()> {
        let mut file = self.file.lock();
        let slot = file
            .regs
            .get_mut(select as usize)
            .ok_or(Cp0Error::InvalidSelect(select))?;
        *slot = slot.wrapping_add(events);
        Ok(())
    }

    /// Raw contents of every select
    pub fn snapshot(&self) -> [u32; SELECTS] {
        self.file.lock().regs
    }

    /// Number of reads and writes served so far
    pub fn accesses(&self) -> usize {
        self.file.lock().accesses
    }
}

impl CounterRegisters for SimulatedRegisters {
    fn read(&self, select: u32) -> Result<u32> {
        let mut file = self.file.lock();
        let value = *file
            .regs
            .get(select as usize)
            .ok_or(Cp0Error::InvalidSelect(select))?;
        file.accesses += 1;
        tracing::trace!("simulated read: sel {} = 0x{:08x}", select, value);
        Ok(value)
    }

    fn write(&self, select: u32, value: u32) -> Result<()> {
        let mut file = self.file.lock();
        let slot = file
            .regs
            .get_mut(select as usize)
            .ok_or(Cp0Error::InvalidSelect(select))?;
        *slot = value;
        file.accesses += 1;
        tracing::trace!("simulated write: sel {} <- 0x{:08x}", select, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PmcError;

    #[test]
    fn test_simulated_read_write() {
        let regs = SimulatedRegisters::new();
        regs.write(2, 0xC0).unwrap();
        assert_eq!(regs.read(2).unwrap(), 0xC0);
        assert_eq!(regs.accesses(), 2);
    }

    #[test]
    fn test_simulated_counter_wraps() {
        let regs = SimulatedRegisters::new();
        regs.write(1, u32::MAX).unwrap();
        regs.advance(1, 3).unwrap();
        assert_eq!(regs.snapshot()[1], 2);
    }

    #[test]
    fn test_simulated_unwired_select() {
        let regs = SimulatedRegisters::new();
        assert!(matches!(regs.read(4), Err(PmcError::Register(_))));
        assert!(regs.advance(9, 1).is_err());
        assert_eq!(regs.accesses(), 0);
    }

    #[cfg(not(any(target_arch = "mips", target_arch = "mips64")))]
    #[test]
    fn test_cp0_unavailable_on_host() {
        let err = Cp0Registers.read(1).unwrap_err();
        assert_eq!(err, PmcError::Register(Cp0Error::Unsupported));
    }
}
