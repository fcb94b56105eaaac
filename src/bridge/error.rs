//! Per-hero failure classification.

use thiserror::Error;

use crate::blockchain::BlockchainError;

/// Why one hero's transfer failed. The hero stays selected in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeFailure {
    /// No route or gateway for the hero's network, or the route is unusable.
    #[error("{0}")]
    Configuration(String),

    /// The node refused the transaction, or it reverted.
    #[error("{0}")]
    Submission(String),

    /// No receipt within the configured bound.
    #[error("{0}")]
    Timeout(String),

    /// The per-hero step panicked.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl BridgeFailure {
    /// Label used for the outcome metric.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeFailure::Configuration(_) => "configuration",
            BridgeFailure::Submission(_) => "submission",
            BridgeFailure::Timeout(_) => "timeout",
            BridgeFailure::Unexpected(_) => "unexpected",
        }
    }
}

impl From<BlockchainError> for BridgeFailure {
    fn from(err: BlockchainError) -> Self {
        match err {
            BlockchainError::ReceiptTimeout { .. } => BridgeFailure::Timeout(err.to_string()),
            BlockchainError::InvalidConfig(_) | BlockchainError::ChainMismatch { .. } => {
                BridgeFailure::Configuration(err.to_string())
            }
            BlockchainError::Rpc(_)
            | BlockchainError::Submission(_)
            | BlockchainError::Reverted(_)
            | BlockchainError::Wallet(_) => BridgeFailure::Submission(err.to_string()),
        }
    }
}
