use mips74k_raw::cp0::PERFCNT_SELECTS;
use mips74k_raw::current_arch::COUNTER_PAIRS;

use crate::error::{PmcError, Result};

/// Counter layout handed to the back end by the framework for one core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub cpu: u32,
    pub counters: usize,
}

impl BackendConfig {
    /// Create a configuration for `cpu` driving `counters` counter pairs
    pub fn new(cpu: u32, counters: usize) -> Self {
        Self { cpu, counters }
    }

    /// Configuration for `cpu` with every counter pair the core wires
    pub fn for_cpu(cpu: u32) -> Self {
        Self::new(cpu, COUNTER_PAIRS)
    }

    /// Reject layouts the register file cannot back
    pub fn validate(&self) -> Result<()> {
        let max = (PERFCNT_SELECTS / 2) as usize;

        if self.counters == 0 {
            return Err(PmcError::InvalidConfiguration(format!(
                "CPU {} has no counters configured",
                self.cpu
            )));
        }

        if self.counters > max {
            return Err(PmcError::InvalidConfiguration(format!(
                "CPU {} configured with {} counters, register file wires {max}",
                self.cpu, self.counters
            )));
        }

        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::for_cpu(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_all_pairs() {
        let config = BackendConfig::default();
        assert_eq!(config.cpu, 0);
        assert_eq!(config.counters, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_counter_counts() {
        assert!(matches!(
            BackendConfig::new(1, 0).validate(),
            Err(PmcError::InvalidConfiguration(_))
        ));

        let err = BackendConfig::new(3, 5).validate().unwrap_err();
        assert!(err.to_string().contains("CPU 3"));
    }
}
