//! Bounds-checked access to the counter register pairs
//!
//! Counter `i` is the PerfCtl/PerfCnt pair at register 25 selects
//! `(2i, 2i + 1)`. The caller serializes access per core; nothing here locks.
//!
//! `read`, `write`, `configure` and `read_control` treat an out-of-range
//! index as caller misuse: debug builds panic, release builds leave the
//! registers untouched and return 0, `false` or an empty word. The `try_*`
//! variants report [`PmcError::CounterOutOfRange`] in every build.
//!
//! The release-build fallback is only exercised by `cargo test --release`;
//! a debug `cargo test` covers the assertion instead.

use mips74k_raw::cp0::{control_select, value_select};

use crate::common::arch::MIPS74K_SPEC;
use crate::common::registers::CounterRegisters;
use crate::config::BackendConfig;
use crate::counters::encoder::ControlWord;
use crate::counters::events::CounterGroup;
use crate::error::{PmcError, Result};

/// Counter pair index validated against the configured counter count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CounterIndex(usize);

impl CounterIndex {
    pub fn new(index: usize, total: usize) -> Result<Self> {
        if index < total {
            Ok(Self(index))
        } else {
            Err(PmcError::CounterOutOfRange { index, total })
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }

    fn control_select(&self) -> u32 {
        control_select(self.0)
    }

    fn value_select(&self) -> u32 {
        value_select(self.0)
    }
}

pub struct CounterAccessor<R> {
    registers: R,
    config: BackendConfig,
}

impl<R: CounterRegisters> CounterAccessor<R> {
    pub fn new(registers: R, config: BackendConfig) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            "Initialized mips74k PMC accessor for CPU {} ({} counters)",
            config.cpu,
            config.counters
        );

        Ok(Self { registers, config })
    }

    pub fn total_counters(&self) -> usize {
        self.config.counters
    }

    pub fn cpu(&self) -> u32 {
        self.config.cpu
    }

    pub fn registers(&self) -> &R {
        &self.registers
    }

    /// Configured counters an event in `group` may be bound to
    pub fn counters_for(&self, group: CounterGroup) -> impl Iterator<Item = usize> {
        group.counters(self.config.counters)
    }

    pub fn index(&self, index: usize) -> Result<CounterIndex> {
        CounterIndex::new(index, self.config.counters)
    }

    /// Current value of counter `index`
    pub fn try_read(&self, index: usize) -> Result<u64> {
        let index = self.index(index)?;
        let value = self.registers.read(index.value_select())?;
        Ok(u64::from(value))
    }

    /// Preload counter `index`; bits above the counter width are dropped
    pub fn try_write(&self, index: usize, value: u64) -> Result<()> {
        let index = self.index(index)?;
        let masked = (value & MIPS74K_SPEC.counter_mask()) as u32;
        self.registers.write(index.value_select(), masked)
    }

    /// Program the control register of counter `index`
    pub fn try_configure(&self, index: usize, word: ControlWord) -> Result<()> {
        let index = self.index(index)?;
        self.registers.write(index.control_select(), word.bits())
    }

    pub fn try_read_control(&self, index: usize) -> Result<ControlWord> {
        let index = self.index(index)?;
        let bits = self.registers.read(index.control_select())?;
        Ok(ControlWord::from_bits(bits))
    }

    fn checked(&self, index: usize) -> Option<CounterIndex> {
        debug_assert!(
            index < self.config.counters,
            "[mips74k] illegal PMC number {index} on CPU {}",
            self.config.cpu
        );

        match self.index(index) {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!("CPU {}: {}", self.config.cpu, e);
                None
            }
        }
    }

    /// Current value of counter `index`, 0 if it cannot be read
    pub fn read(&self, index: usize) -> u64 {
        let Some(index) = self.checked(index) else {
            return 0;
        };

        match self.registers.read(index.value_select()) {
            Ok(value) => u64::from(value),
            Err(e) => {
                tracing::warn!("CPU {}: failed to read PMC {}: {}", self.cpu(), index.get(), e);
                0
            }
        }
    }

    /// Preload counter `index`; `false` if nothing was written
    pub fn write(&self, index: usize, value: u64) -> bool {
        let Some(index) = self.checked(index) else {
            return false;
        };

        let masked = (value & MIPS74K_SPEC.counter_mask()) as u32;
        match self.registers.write(index.value_select(), masked) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("CPU {}: failed to write PMC {}: {}", self.cpu(), index.get(), e);
                false
            }
        }
    }

    /// Program the control register of counter `index`; `false` if nothing was written
    pub fn configure(&self, index: usize, word: ControlWord) -> bool {
        let Some(index) = self.checked(index) else {
            return false;
        };

        match self.registers.write(index.control_select(), word.bits()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "CPU {}: failed to configure PMC {}: {}",
                    self.cpu(),
                    index.get(),
                    e
                );
                false
            }
        }
    }

    pub fn read_control(&self, index: usize) -> ControlWord {
        let Some(index) = self.checked(index) else {
            return ControlWord::default();
        };

        match self.registers.read(index.control_select()) {
            Ok(bits) => ControlWord::from_bits(bits),
            Err(e) => {
                tracing::warn!(
                    "CPU {}: failed to read PMC {} control: {}",
                    self.cpu(),
                    index.get(),
                    e
                );
                ControlWord::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::arch::Capabilities;
    use crate::common::registers::SimulatedRegisters;
    use crate::counters::encoder::{encode, encode_event};
    use crate::counters::events::{self, Mips74kEvent};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn accessor(regs: &SimulatedRegisters) -> CounterAccessor<&SimulatedRegisters> {
        CounterAccessor::new(regs, BackendConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let regs = SimulatedRegisters::new();
        assert!(CounterAccessor::new(&regs, BackendConfig::new(0, 0)).is_err());
        assert!(CounterAccessor::new(&regs, BackendConfig::new(0, 3)).is_err());
    }

    #[test]
    fn test_counter_value_follows_hardware() {
        init_tracing();
        let regs = SimulatedRegisters::new();
        let pmc = accessor(&regs);

        assert!(pmc.write(1, 1000));
        regs.advance(value_select(1), 5).unwrap();

        assert_eq!(pmc.read(1), 1005);
        assert_eq!(pmc.read(0), 0);
        assert_eq!(regs.snapshot(), [0, 0, 0, 1005]);
    }

    #[test]
    fn test_write_masks_to_counter_width() {
        let regs = SimulatedRegisters::new();
        let pmc = accessor(&regs);

        pmc.try_write(0, 0x1_0000_0005).unwrap();
        assert_eq!(pmc.try_read(0).unwrap(), 5);
    }

    #[test]
    fn test_configure_targets_control_register() {
        let regs = SimulatedRegisters::new();
        let pmc = accessor(&regs);
        let word = encode(6, CounterGroup::Secondary, Capabilities::USER);

        assert!(pmc.configure(1, word));
        assert_eq!(regs.snapshot()[2], word.bits());
        assert_eq!(pmc.read_control(1), word);
        assert_eq!(pmc.try_read_control(1).unwrap().layout().event, 6);
    }

    #[test]
    fn test_try_accessors_report_out_of_range() {
        let regs = SimulatedRegisters::new();
        let pmc = accessor(&regs);
        let total = pmc.total_counters();
        let expected = PmcError::CounterOutOfRange { index: total, total };

        assert_eq!(pmc.try_read(total), Err(expected.clone()));
        assert_eq!(pmc.try_write(total, 1), Err(expected.clone()));
        assert_eq!(
            pmc.try_configure(total, ControlWord::default()),
            Err(expected.clone())
        );
        assert_eq!(pmc.try_read_control(total), Err(expected));
        assert_eq!(regs.accesses(), 0);
    }

    // Only built by `cargo test --release`
    #[cfg(not(debug_assertions))]
    #[test]
    fn test_out_of_range_degrades_in_release() {
        let regs = SimulatedRegisters::new();
        let pmc = accessor(&regs);
        let total = pmc.total_counters();

        assert_eq!(pmc.read(total), 0);
        assert!(!pmc.write(total, 42));
        assert!(!pmc.configure(total, ControlWord::default()));
        assert_eq!(pmc.read_control(total), ControlWord::default());
        assert_eq!(regs.accesses(), 0);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "illegal PMC number")]
    fn test_out_of_range_read_asserts_in_debug() {
        let regs = SimulatedRegisters::new();
        accessor(&regs).read(2);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "illegal PMC number")]
    fn test_out_of_range_write_asserts_in_debug() {
        let regs = SimulatedRegisters::new();
        accessor(&regs).write(2, 42);
    }

    #[cfg(not(any(target_arch = "mips", target_arch = "mips64")))]
    #[test]
    fn test_missing_cp0_degrades() {
        use crate::common::registers::Cp0Registers;

        let pmc = CounterAccessor::new(Cp0Registers, BackendConfig::default()).unwrap();
        assert_eq!(pmc.read(0), 0);
        assert!(!pmc.write(0, 1));
        assert!(matches!(pmc.try_read(0), Err(PmcError::Register(_))));
    }

    #[test]
    fn test_allocate_secondary_event_end_to_end() {
        init_tracing();
        let regs = SimulatedRegisters::new();
        let pmc = accessor(&regs);
        let caps = Capabilities::SYSTEM | Capabilities::INTERRUPT;

        let mapping = events::lookup(Mips74kEvent::IcacheMisses).unwrap();
        assert_eq!(mapping.group, CounterGroup::Secondary);
        assert_eq!(mapping.code, 6);
        MIPS74K_SPEC.check_capabilities(caps).unwrap();

        let index = pmc.counters_for(mapping.group).next().unwrap();
        let word = encode_event(Mips74kEvent::IcacheMisses, caps).unwrap();
        assert!(pmc.write(index, 0));
        assert!(pmc.configure(index, word));

        let programmed = pmc.read_control(index).layout();
        assert_eq!(programmed.event, 6);
        assert!(programmed.supervisor && programmed.kernel && programmed.interrupt);
        assert!(!programmed.user);

        regs.advance(value_select(index), 17).unwrap();
        assert_eq!(pmc.read(index), 17);
        assert_eq!(pmc.registers().snapshot()[value_select(index) as usize], 17);
    }

    #[test]
    fn test_single_counter_config_limits_groups() {
        let regs = SimulatedRegisters::new();
        let pmc = CounterAccessor::new(&regs, BackendConfig::new(0, 1)).unwrap();

        assert_eq!(pmc.counters_for(CounterGroup::Any).collect::<Vec<_>>(), vec![0]);
        assert_eq!(pmc.counters_for(CounterGroup::Secondary).next(), None);

        let mapping = events::lookup(Mips74kEvent::Cycles).unwrap();
        let index = pmc.counters_for(mapping.group).next().unwrap();
        let word = encode(mapping.code, mapping.group, Capabilities::USER);
        assert!(pmc.configure(index, word));
        assert_eq!(pmc.registers().accesses(), 1);
    }
}
