//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Unlocked private key (vault)
//!     → wallet.rs (address derivation, signing)
//!     → transaction.rs (sendHero calldata, fee fields, nonce)
//!     → gateway.rs (sign, broadcast, poll receipt)
//!     → client.rs (RPC connection with timeouts and failover)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - A transaction is broadcast to exactly one endpoint

pub mod client;
pub mod gateway;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use gateway::{ChainGateway, EvmGateway};
pub use transaction::{BridgeTransaction, FeeRate, TransactionSettings};
pub use types::{BlockchainError, BlockchainResult, BridgeReceipt, ChainId, GatewayProgress};
pub use wallet::Wallet;
