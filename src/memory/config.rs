//! Engine configuration
//!
//! The bridge passes structured arguments and results through one
//! well-known region of linear memory, the transfer region. Its location
//! is decided when the foreign module is instantiated (usually the module's
//! heap base) and handed to the engine here.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{MemoryError, MemoryResult};
use crate::observability::{Event, Logger, Severity};

/// Size of one wasm page
pub const WASM_PAGE_SIZE: u32 = 64 * 1024;

/// Location of the transfer region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferConfig {
    /// First address of the region (default: 0)
    #[serde(default)]
    pub base: u32,

    /// Region size in bytes (default: one wasm page)
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

fn default_capacity() -> u32 {
    WASM_PAGE_SIZE
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            base: 0,
            capacity: default_capacity(),
        }
    }
}

impl TransferConfig {
    pub fn new(base: u32, capacity: u32) -> Self {
        Self { base, capacity }
    }

    /// One page starting at the module's heap base
    pub fn at_heap_base(heap_base: u32) -> Self {
        Self {
            base: heap_base,
            ..Default::default()
        }
    }

    /// One past the last address of the region
    pub fn end(&self) -> u64 {
        u64::from(self.base) + u64::from(self.capacity)
    }

    pub fn validate(&self) -> MemoryResult<()> {
        if self.capacity == 0 {
            return Err(MemoryError::EmptyTransferRegion);
        }
        if self.end() > u64::from(u32::MAX) + 1 {
            return Err(MemoryError::TransferRegionOverflow {
                base: self.base,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub transfer: TransferConfig,

    /// Minimum severity written by the logger (default: WARN)
    #[serde(default)]
    pub log_severity: Severity,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> MemoryResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.transfer.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> MemoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| MemoryError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Install the log filter.
    pub fn apply(&self) {
        Logger::set_min_severity(self.log_severity);

        let base = self.transfer.base.to_string();
        let capacity = self.transfer.capacity.to_string();
        Logger::info(
            Event::ConfigLoaded,
            &[
                ("log_severity", self.log_severity.as_str()),
                ("transfer_base", base.as_str()),
                ("transfer_capacity", capacity.as_str()),
            ],
        );
    }
}
