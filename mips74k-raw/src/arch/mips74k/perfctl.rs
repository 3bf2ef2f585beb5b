//! PerfCtl control register definitions for the MIPS 74K
//!
//! ## References
//!
//! - MIPS32® 74K™ Processor Core Family Software User's Manual,
//!   Section 8.2: Performance Counter Control Registers

use crate::register::RegisterLayout;

/// Bit position where the event select field starts
pub const SELECT_OFFSET: u32 = 5;

/// Width mask of the event select field (7 bits)
pub const EVENT_MASK: u32 = 0x7F;

/// Count while in exception level (EXL)
pub const EXL_ENABLE: u32 = 0x01;

/// Count in kernel mode
pub const KERNEL_ENABLE: u32 = 0x02;

/// Count in supervisor mode
pub const SUPER_ENABLE: u32 = 0x04;

/// Count in user mode
pub const USER_ENABLE: u32 = 0x08;

/// Raise an interrupt on counter overflow
pub const INTERRUPT_ENABLE: u32 = 0x10;

/// All execution-mode scopes
pub const SCOPE_ENABLE: u32 = USER_ENABLE | SUPER_ENABLE | KERNEL_ENABLE;

/// Another counter pair follows this one (read-only)
pub const MORE: u32 = 1 << 31;

/// PerfCtl register layout
///
/// ## Register Format
///
/// | Bits   | Field     | Description                        |
/// |--------|-----------|------------------------------------|
/// | 0      | exl       | Count at exception level           |
/// | 1      | kernel    | Count in kernel mode               |
/// | 2      | supervisor| Count in supervisor mode           |
/// | 3      | user      | Count in user mode                 |
/// | 4      | interrupt | Interrupt on overflow              |
/// | 5-11   | event     | Event select                       |
/// | 12-30  | reserved  |                                    |
/// | 31     | more      | Another pair is implemented (RO)   |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerfCtl {
    /// Count at exception level (bit 0)
    pub exl: bool,

    /// Count in kernel mode (bit 1)
    pub kernel: bool,

    /// Count in supervisor mode (bit 2)
    pub supervisor: bool,

    /// Count in user mode (bit 3)
    pub user: bool,

    /// Interrupt on overflow (bit 4)
    pub interrupt: bool,

    /// Event select (bits 5-11)
    pub event: u8,

    /// More pairs follow (bit 31)
    pub more: bool,
}

impl PerfCtl {
    /// True if at least one execution-mode scope is enabled
    pub fn counts_anywhere(&self) -> bool {
        self.kernel || self.supervisor || self.user
    }
}

impl RegisterLayout for PerfCtl {
    fn to_reg_value(&self) -> u32 {
        (if self.exl { EXL_ENABLE } else { 0 })
            | (if self.kernel { KERNEL_ENABLE } else { 0 })
            | (if self.supervisor { SUPER_ENABLE } else { 0 })
            | (if self.user { USER_ENABLE } else { 0 })
            | (if self.interrupt { INTERRUPT_ENABLE } else { 0 })
            | ((self.event as u32 & EVENT_MASK) << SELECT_OFFSET)
            | (if self.more { MORE } else { 0 })
    }

    fn from_reg_value(value: u32) -> Self {
        Self {
            exl: (value & EXL_ENABLE) != 0,
            kernel: (value & KERNEL_ENABLE) != 0,
            supervisor: (value & SUPER_ENABLE) != 0,
            user: (value & USER_ENABLE) != 0,
            interrupt: (value & INTERRUPT_ENABLE) != 0,
            event: ((value >> SELECT_OFFSET) & EVENT_MASK) as u8,
            more: (value & MORE) != 0,
        }
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.event as u32 > EVENT_MASK {
            return Err("Event select must fit in 7 bits");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfctl_bit_positions() {
        let ctl = PerfCtl {
            event: 6,
            kernel: true,
            supervisor: true,
            interrupt: true,
            ..Default::default()
        };

        assert_eq!(ctl.to_reg_value(), (6 << 5) | 0x02 | 0x04 | 0x10);
    }

    #[test]
    fn test_perfctl_round_trip() {
        let ctl = PerfCtl {
            event: 0x4C,
            user: true,
            exl: true,
            ..Default::default()
        };

        let decoded = PerfCtl::from_reg_value(ctl.to_reg_value());
        assert_eq!(decoded, ctl);
        assert!(decoded.counts_anywhere());
    }

    #[test]
    fn test_perfctl_event_truncated_to_field() {
        let ctl = PerfCtl {
            event: 0xFF,
            ..Default::default()
        };

        assert!(ctl.validate().is_err());
        assert_eq!(ctl.to_reg_value(), EVENT_MASK << SELECT_OFFSET);
    }

    #[test]
    fn test_more_bit_decoded() {
        let ctl = PerfCtl::from_reg_value(MORE | USER_ENABLE);
        assert!(ctl.more);
        assert!(ctl.user);
        assert_eq!(ctl.event, 0);
    }
}
