//! MIPS 74K performance counter definitions
//!
//! The 74K implements MIPS32 Release 2 performance counters in CP0
//! register 25. The host kernel wires two PerfCtl/PerfCnt pairs.
//!
//! ## References
//!
//! - MIPS32® 74K™ Processor Core Family Software User's Manual,
//!   Chapter 8: Performance Counters

pub mod perfctl;

/// Number of PerfCtl/PerfCnt pairs driven by the host kernel
pub const COUNTER_PAIRS: usize = 2;

/// Bit width of a PerfCnt register
pub const COUNTER_WIDTH_BITS: u32 = 32;
