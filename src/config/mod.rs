//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! hero-bridge.toml (optional)
//!     → loader.rs (parse & deserialize, defaults when absent)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → passed by reference into vault, directory, gateways, orchestrator
//! ```
//!
//! # Design Decisions
//! - Config is an explicit value handed to constructors; nothing reads globals
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::BridgeConfig;
pub use schema::DirectoryConfig;
pub use schema::NetworkConfig;
pub use schema::TransactionConfig;
pub use schema::VaultConfig;
