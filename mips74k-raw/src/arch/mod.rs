//! Core-specific register definitions
//!
//! MIPS32 cores share the CP0 register 25 PerfCtl/PerfCnt scheme but differ
//! in how many counter pairs are wired, which event codes exist and how wide
//! the event field is.
//!
//! ## Supported Cores
//!
//! - **74K** (`mips74k` feature)

#[cfg(feature = "mips74k")]
pub mod mips74k;
