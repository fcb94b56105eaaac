//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters via the `metrics` facade)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG or config)
//!     → any metrics recorder the embedding binary installs
//! ```
//!
//! # Design Decisions
//! - Private keys and passphrases never appear in log fields
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
