// MIPS 74K microarchitecture descriptor

use bitflags::bitflags;
use mips74k_raw::current_arch::COUNTER_WIDTH_BITS;

use crate::error::{PmcError, Result};

bitflags! {
    /// Counting behaviour a framework request may ask for
    ///
    /// Bit positions are shared with the machine-independent framework.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        const INTERRUPT = 1 << 0;
        const USER = 1 << 1;
        const SYSTEM = 1 << 2;
        const EDGE = 1 << 3;
        const THRESHOLD = 1 << 4;
        const READ = 1 << 5;
        const WRITE = 1 << 6;
        const INVERT = 1 << 7;
        const QUALIFIER = 1 << 8;
        const PRECISE = 1 << 9;
        const TAGGING = 1 << 10;
        const CASCADE = 1 << 11;
    }
}

/// Capabilities the 74K counters implement
pub const MIPS74K_CAPS: Capabilities = Capabilities::INTERRUPT
    .union(Capabilities::USER)
    .union(Capabilities::SYSTEM)
    .union(Capabilities::EDGE)
    .union(Capabilities::THRESHOLD)
    .union(Capabilities::READ)
    .union(Capabilities::WRITE)
    .union(Capabilities::INVERT)
    .union(Capabilities::QUALIFIER);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PmcClass {
    Mips74k,
}

impl PmcClass {
    pub fn id(&self) -> u32 {
        match self {
            PmcClass::Mips74k => 0x11,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PmcClass::Mips74k => "MIPS74K",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuType {
    Mips74k,
}

impl CpuType {
    pub fn id(&self) -> u32 {
        match self {
            CpuType::Mips74k => 0x202,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CpuType::Mips74k => "MIPS 74K",
        }
    }
}

/// Static description of the counters the framework validates requests against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicroarchSpec {
    pub class: PmcClass,
    pub cpu_type: CpuType,
    pub capabilities: Capabilities,
    pub counter_width: u32,
}

pub static MIPS74K_SPEC: MicroarchSpec = MicroarchSpec {
    class: PmcClass::Mips74k,
    cpu_type: CpuType::Mips74k,
    capabilities: MIPS74K_CAPS,
    counter_width: COUNTER_WIDTH_BITS,
};

impl MicroarchSpec {
    /// True if every requested capability is implemented
    pub fn supports(&self, requested: Capabilities) -> bool {
        self.capabilities.contains(requested)
    }

    /// Reject requests carrying capability bits this core lacks
    pub fn check_capabilities(&self, requested: Capabilities) -> Result<()> {
        let unsupported = requested.difference(self.capabilities);
        if unsupported.is_empty() {
            Ok(())
        } else {
            Err(PmcError::UnsupportedCapabilities(unsupported.bits()))
        }
    }

    /// Mask of the bits a counter value register holds
    pub fn counter_mask(&self) -> u64 {
        if self.counter_width >= u64::BITS {
            u64::MAX
        } else {
            (1u64 << self.counter_width) - 1
        }
    }
}
