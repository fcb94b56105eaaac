//! DeFi Kingdoms hero bridge library.
//!
//! Finds heroes owned by an encrypted key's address and moves selected
//! heroes between realms through the on-chain hero bridge.

// Core workflow
pub mod bridge;
pub mod session;

// Collaborators
pub mod blockchain;
pub mod directory;
pub mod vault;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use bridge::{BridgeEvent, BridgeOrchestrator};
pub use config::BridgeConfig;
pub use session::{Session, SessionError};
