//! Chain-specific types and error definitions.

use alloy::primitives::TxHash;
use thiserror::Error;

// Re-export NetworkConfig from config module to avoid duplication
pub use crate::config::schema::NetworkConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The node refused the signed transaction.
    #[error("Transaction rejected: {0}")]
    Submission(String),

    /// No receipt arrived within the polling bound.
    #[error("No receipt for {tx_hash} after {secs} seconds")]
    ReceiptTimeout { tx_hash: TxHash, secs: u64 },

    /// Transaction was mined but reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(TxHash),

    /// Invalid private key format or signing error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Network entry could not be turned into a client.
    #[error("Invalid network configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Mined bridge transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeReceipt {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Block the transaction was included in, when the node reports it.
    pub block_number: Option<u64>,
    /// Gas consumed.
    pub gas_used: u64,
}

/// Progress reported by a gateway while a bridge transaction is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayProgress {
    /// The node accepted the raw transaction.
    Submitted { tx_hash: TxHash },
    /// A receipt was found.
    Mined { tx_hash: TxHash, block_number: Option<u64> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(53935u64);
        assert_eq!(chain_id.0, 53935);
        assert_eq!(u64::from(chain_id), 53935);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::ReceiptTimeout {
            tx_hash: TxHash::ZERO,
            secs: 60,
        };
        assert!(err.to_string().ends_with("after 60 seconds"));

        let err = BlockchainError::ChainMismatch {
            expected: 8217,
            actual: 1,
        };
        assert_eq!(err.to_string(), "Chain ID mismatch: expected 8217, got 1");
    }
}
