//! CP0 register 25 (PerfCtl/PerfCnt) read/write primitives
//!
//! Register 25 holds the performance counter pairs: even selects are PerfCtl
//! control registers and odd selects are PerfCnt value registers. On MIPS
//! targets the host kernel exports one C-ABI accessor per select
//! (`mips_rd_perfcntN` / `mips_wr_perfcntN`). Other targets have no CP0 and
//! every access reports [`Cp0Error::Unsupported`].

pub type Result<T> = std::result::Result<T, Cp0Error>;

/// Number of register 25 selects wired by the host kernel
pub const PERFCNT_SELECTS: u32 = 4;

/// Errors that can occur during CP0 performance register access
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Cp0Error {
    #[error("CP0 register 25 select {0} is not wired")]
    InvalidSelect(u32),

    #[error("CP0 performance registers are not available on this target")]
    Unsupported,
}

/// Register 25 select of the PerfCtl register for counter `counter`
pub const fn control_select(counter: usize) -> u32 {
    (counter as u32) * 2
}

/// Register 25 select of the PerfCnt register for counter `counter`
pub const fn value_select(counter: usize) -> u32 {
    (counter as u32) * 2 + 1
}

#[cfg(any(target_arch = "mips", target_arch = "mips64"))]
mod hw {
    extern "C" {
        fn mips_rd_perfcnt0() -> u32;
        fn mips_rd_perfcnt1() -> u32;
        fn mips_rd_perfcnt2() -> u32;
        fn mips_rd_perfcnt3() -> u32;
        fn mips_wr_perfcnt0(value: u32);
        fn mips_wr_perfcnt1(value: u32);
        fn mips_wr_perfcnt2(value: u32);
        fn mips_wr_perfcnt3(value: u32);
    }

    pub(super) fn read(select: u32) -> Option<u32> {
        // SAFETY: the accessors only execute mfc0 on an existing select.
        unsafe {
            match select {
                0 => Some(mips_rd_perfcnt0()),
                1 => Some(mips_rd_perfcnt1()),
                2 => Some(mips_rd_perfcnt2()),
                3 => Some(mips_rd_perfcnt3()),
                _ => None,
            }
        }
    }

    pub(super) fn write(select: u32, value: u32) -> bool {
        // SAFETY: the accessors only execute mtc0 on an existing select.
        unsafe {
            match select {
                0 => mips_wr_perfcnt0(value),
                1 => mips_wr_perfcnt1(value),
                2 => mips_wr_perfcnt2(value),
                3 => mips_wr_perfcnt3(value),
                _ => return false,
            }
        }
        true
    }
}

/// Read a 32-bit value from a register 25 select
///
/// # Errors
///
/// Returns an error if:
/// - `select` is not wired by the host kernel
/// - the build target has no CP0
pub fn read_perfcnt(select: u32) -> Result<u32> {
    if select >= PERFCNT_SELECTS {
        return Err(Cp0Error::InvalidSelect(select));
    }

    #[cfg(any(target_arch = "mips", target_arch = "mips64"))]
    {
        hw::read(select).ok_or(Cp0Error::InvalidSelect(select))
    }

    #[cfg(not(any(target_arch = "mips", target_arch = "mips64")))]
    {
        Err(Cp0Error::Unsupported)
    }
}

/// Write a 32-bit value to a register 25 select
///
/// # Errors
///
/// Returns an error if:
/// - `select` is not wired by the host kernel
/// - the build target has no CP0
///
/// Writing a PerfCtl select reprograms a live counter. The caller must hold
/// exclusive ownership of the counter on the current core.
pub fn write_perfcnt(select: u32, value: u32) -> Result<()> {
    if select >= PERFCNT_SELECTS {
        return Err(Cp0Error::InvalidSelect(select));
    }

    #[cfg(any(target_arch = "mips", target_arch = "mips64"))]
    {
        if hw::write(select, value) {
            Ok(())
        } else {
            Err(Cp0Error::InvalidSelect(select))
        }
    }

    #[cfg(not(any(target_arch = "mips", target_arch = "mips64")))]
    {
        let _ = value;
        Err(Cp0Error::Unsupported)
    }
}
