use mips74k_raw::Cp0Error;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PmcError {
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Counter index {index} out of range ({total} counters)")]
    CounterOutOfRange { index: usize, total: usize },

    #[error("Unsupported capabilities: 0x{0:x}")]
    UnsupportedCapabilities(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Register access failed: {0}")]
    Register(#[from] Cp0Error),
}

pub type Result<T> = std::result::Result<T, PmcError>;
