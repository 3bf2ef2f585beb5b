//! # hwpmc-mips74k
//!
//! MIPS 74K back end for a hardware performance monitoring counter framework.
//!
//! The machine-independent framework resolves a requested event through the
//! event table, builds the PerfCtl word with the encoder and programs the
//! counter through a [`CounterAccessor`].
//!
//! ```ignore
//! use hwpmc_mips74k::{encode, BackendConfig, Capabilities, CounterAccessor, Cp0Registers};
//! use hwpmc_mips74k::{lookup_name, MIPS74K_SPEC};
//!
//! let caps = Capabilities::USER | Capabilities::INTERRUPT;
//! MIPS74K_SPEC.check_capabilities(caps)?;
//!
//! let mapping = lookup_name("DCACHE_MISSES")?;
//! let pmc = CounterAccessor::new(Cp0Registers, BackendConfig::for_cpu(0))?;
//! let index = pmc.counters_for(mapping.group).next().unwrap();
//!
//! pmc.write(index, 0);
//! pmc.configure(index, encode(mapping.code, mapping.group, caps));
//! let misses = pmc.read(index);
//! ```

//! ## Testing
//!
//! Out-of-range counter indices panic in debug builds and degrade silently in
//! release builds. Run both `cargo test` and `cargo test --release` to cover
//! each behaviour.

// Macros (must be first for visibility)
#[macro_use]
pub mod macros;

pub mod common;
pub mod config;
pub mod counters;
pub mod error;

pub use common::{Capabilities, Cp0Registers, CounterRegisters, MicroarchSpec, SimulatedRegisters};
pub use common::MIPS74K_SPEC;
pub use config::BackendConfig;
pub use counters::{
    encode, encode_event, lookup, lookup_id, lookup_name, ControlWord, CounterAccessor,
    CounterGroup, CounterIndex, EventMapping, Mips74kEvent,
};
pub use error::{PmcError, Result};
