//! Memory boundary and configuration errors

use thiserror::Error;

/// Result type for memory boundary operations
pub type MemoryResult<T> = Result<T, MemoryError>;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("instance exports no memory named '{0}'")]
    MissingExport(String),

    #[error("transfer region [{base}, {base} + {capacity}) exceeds the 32-bit address space")]
    TransferRegionOverflow { base: u32, capacity: u32 },

    #[error("transfer region must not be empty")]
    EmptyTransferRegion,

    #[error("failed to read config '{path}': {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    MalformedConfig(#[from] serde_json::Error),
}

impl MemoryError {
    /// Stable string code
    pub fn code(&self) -> &'static str {
        match self {
            MemoryError::MissingExport(_) => "MEMLAYOUT_MISSING_MEMORY_EXPORT",
            MemoryError::TransferRegionOverflow { .. } | MemoryError::EmptyTransferRegion => {
                "MEMLAYOUT_INVALID_TRANSFER_REGION"
            }
            MemoryError::ConfigIo { .. } | MemoryError::MalformedConfig(_) => {
                "MEMLAYOUT_CONFIG_INVALID"
            }
        }
    }
}
