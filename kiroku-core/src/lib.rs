//! # KirokuDB Core
//!
//! This crate provides the fundamental building blocks for KirokuDB:
//! - Core type aliases and statistics structures
//! - Error types
//! - Configuration
//! - Metrics collection
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   kiroku-core                   │
//! ├─────────────────────────────────────────────────┤
//! │  • types      - Keys, versions, stats           │
//! │  • error      - Error handling                  │
//! │  • config     - Store & concurrency settings    │
//! │  • metrics    - Operation counters              │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConcurrencyConfig, StoreConfig};
pub use error::{Error, Result};
pub use metrics::{Metrics, MetricsSnapshot};
pub use types::{InternalKey, StoreStats, Version};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
