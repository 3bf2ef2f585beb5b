//! PerfCtl control word synthesis
//!
//! Turns an event select code and the requested capabilities into the value
//! written to a counter's control register. Nothing here touches hardware.

use std::fmt;

use mips74k_raw::current_arch::perfctl::{PerfCtl, SELECT_OFFSET};
use mips74k_raw::RegisterLayout;

use crate::common::arch::Capabilities;
use crate::counters::events::{self, CounterGroup, Mips74kEvent};
use crate::error::Result;

/// Complete PerfCtl register value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ControlWord(u32);

impl ControlWord {
    pub(crate) fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Decode the word into its register fields
    pub fn layout(&self) -> PerfCtl {
        PerfCtl::from_reg_value(self.0)
    }
}

impl From<ControlWord> for u32 {
    fn from(word: ControlWord) -> Self {
        word.0
    }
}

impl fmt::Display for ControlWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Build the control word for event select `code`
///
/// `code` is shifted into place unmasked; codes wider than the select field
/// spill into the reserved bits above it. Scope bits follow the requested
/// capabilities. A request naming neither USER nor SYSTEM counts in every
/// mode. INTERRUPT only adds the overflow interrupt enable.
pub fn encode(code: u8, group: CounterGroup, capabilities: Capabilities) -> ControlWord {
    let mut ctl = PerfCtl::default();

    if capabilities.contains(Capabilities::SYSTEM) {
        ctl.supervisor = true;
        ctl.kernel = true;
    }
    if capabilities.contains(Capabilities::USER) {
        ctl.user = true;
    }
    if !capabilities.intersects(Capabilities::USER | Capabilities::SYSTEM) {
        ctl.user = true;
        ctl.supervisor = true;
        ctl.kernel = true;
    }
    if capabilities.contains(Capabilities::INTERRUPT) {
        ctl.interrupt = true;
    }
    debug_assert!(ctl.counts_anywhere());

    let word = ControlWord(((code as u32) << SELECT_OFFSET) | ctl.to_reg_value());
    tracing::trace!(
        "mips74k get_perfctl group={} code={} -> config={}",
        group.name(),
        code,
        word
    );
    word
}

/// Look `event` up and build its control word
pub fn encode_event(event: Mips74kEvent, capabilities: Capabilities) -> Result<ControlWord> {
    let mapping = events::lookup(event)?;
    Ok(encode(mapping.code, mapping.group, capabilities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mips74k_raw::current_arch::perfctl::{
        INTERRUPT_ENABLE, KERNEL_ENABLE, SCOPE_ENABLE, SUPER_ENABLE, USER_ENABLE,
    };

    const GROUP: CounterGroup = CounterGroup::Primary;

    #[test]
    fn test_default_scope_counts_everywhere() {
        let word = encode(5, GROUP, Capabilities::empty());
        assert_eq!(word.bits(), (5 << SELECT_OFFSET) | SCOPE_ENABLE);

        let ctl = word.layout();
        assert!(ctl.user && ctl.supervisor && ctl.kernel);
        assert!(!ctl.interrupt);
    }

    #[test]
    fn test_system_scope() {
        let word = encode(5, GROUP, Capabilities::SYSTEM);
        assert_eq!(word.bits(), (5 << SELECT_OFFSET) | SUPER_ENABLE | KERNEL_ENABLE);
        assert_eq!(word.bits() & USER_ENABLE, 0);
    }

    #[test]
    fn test_user_scope() {
        let word = encode(5, GROUP, Capabilities::USER);
        assert_eq!(word.bits(), (5 << SELECT_OFFSET) | USER_ENABLE);
    }

    #[test]
    fn test_user_and_system_scope() {
        let word = encode(5, GROUP, Capabilities::USER | Capabilities::SYSTEM);
        assert_eq!(word.bits(), (5 << SELECT_OFFSET) | SCOPE_ENABLE);
    }

    #[test]
    fn test_interrupt_is_orthogonal_to_scope() {
        for scope in [
            Capabilities::empty(),
            Capabilities::USER,
            Capabilities::SYSTEM,
            Capabilities::USER | Capabilities::SYSTEM,
        ] {
            let plain = encode(5, GROUP, scope);
            let interrupting = encode(5, GROUP, scope | Capabilities::INTERRUPT);
            assert_eq!(interrupting.bits(), plain.bits() | INTERRUPT_ENABLE);
        }
    }

    #[test]
    fn test_unrelated_capabilities_ignored() {
        let word = encode(5, GROUP, Capabilities::EDGE | Capabilities::THRESHOLD);
        assert_eq!(word, encode(5, GROUP, Capabilities::empty()));
    }

    #[test]
    fn test_secondary_system_interrupt_word() {
        let word = encode(
            6,
            CounterGroup::Secondary,
            Capabilities::SYSTEM | Capabilities::INTERRUPT,
        );

        assert_eq!(
            u32::from(word),
            (6 << SELECT_OFFSET) | SUPER_ENABLE | KERNEL_ENABLE | INTERRUPT_ENABLE
        );
        assert_eq!(word.bits() & USER_ENABLE, 0);
        assert_eq!(word.to_string(), "0x000000d6");
    }

    #[test]
    fn test_wide_code_is_not_folded_into_the_field() {
        let word = encode(128, CounterGroup::Any, Capabilities::empty());
        assert_eq!(word.bits(), (128 << SELECT_OFFSET) | SCOPE_ENABLE);
        assert_eq!(word.bits(), 0x100e);
        assert_ne!(word, encode(0, CounterGroup::Any, Capabilities::empty()));
    }

    #[test]
    fn test_encode_event() {
        let word = encode_event(Mips74kEvent::IcacheMisses, Capabilities::USER).unwrap();
        let ctl = word.layout();
        assert_eq!(ctl.event, 6);
        assert!(ctl.user);
        assert!(!ctl.kernel);
    }
}
