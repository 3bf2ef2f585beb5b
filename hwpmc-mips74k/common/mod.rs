pub mod arch;
pub mod registers;

pub use arch::{Capabilities, MicroarchSpec, MIPS74K_SPEC};
pub use registers::{Cp0Registers, CounterRegisters, SimulatedRegisters};
