//! # mips74k-raw
//!
//! Coprocessor 0 performance counter register definitions for the MIPS 74K.
//!
//! This crate provides type-safe layouts for the PerfCtl control registers,
//! the fixed ABI bit positions a performance counter framework must agree on,
//! and thin accessors for the CP0 register 25 select pairs.
//!
//! ## Features
//!
//! Select the target core via feature flags:
//! - `mips74k` (default) - MIPS 74K register definitions
//!
//! ## Usage
//!
//! ```ignore
//! use mips74k_raw::current_arch::perfctl::PerfCtl;
//! use mips74k_raw::{cp0, write_perfcnt, RegisterLayout};
//!
//! let ctl = PerfCtl {
//!     event: 0x01,
//!     user: true,
//!     ..Default::default()
//! };
//!
//! write_perfcnt(cp0::control_select(0), ctl.to_reg_value())?;
//! ```

pub mod arch;
pub mod cp0;
pub mod register;

pub use cp0::{read_perfcnt, write_perfcnt, Cp0Error, Result};
pub use register::RegisterLayout;

#[cfg(feature = "mips74k")]
pub use arch::mips74k as current_arch;
