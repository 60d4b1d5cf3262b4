//! # Configuration Management
//!
//! Handles all configuration for KirokuDB components.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub concurrency: ConcurrencyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            concurrency: ConcurrencyConfig::default(),
        }
    }
}

/// Log store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum number of internal keys the store can assign.
    pub max_keys: u32,
    /// Maximum number of payload bytes the data log can hold.
    pub log_capacity: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_keys: 1 << 27,          // 128M records
            log_capacity: u32::MAX,     // 4GB data log
        }
    }
}

impl StoreConfig {
    /// Validate configuration before the store allocates its structures
    pub fn validate(&self) -> Result<()> {
        if self.max_keys == 0 {
            return Err(Error::Configuration {
                message: "max_keys must be non-zero".to_string(),
            });
        }
        if self.log_capacity == 0 {
            return Err(Error::Configuration {
                message: "log_capacity must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Concurrency configuration
///
/// The store itself never spawns threads; the worker pool is an external
/// collaborator. `max_threads` sizes the per-thread aggregate shards: an
/// `Aggregate` built via `Aggregate::with_config` gets one writer slot per
/// configured worker thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcurrencyConfig {
    pub max_threads: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}
