//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every route parses (addresses, URLs, fee amounts)
//! - Validate value ranges (timeouts > 0, page size > 0)
//! - Detect duplicate network tags
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use alloy::primitives::utils::parse_ether;
use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::{BridgeConfig, NetworkConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no networks configured")]
    NoNetworks,

    #[error("network tag '{0}' is configured more than once")]
    DuplicateTag(String),

    #[error("network '{tag}': invalid contract address '{value}'")]
    InvalidContractAddress { tag: String, value: String },

    #[error("network '{tag}': invalid RPC URL '{value}'")]
    InvalidRpcUrl { tag: String, value: String },

    #[error("network '{tag}': invalid bridge fee '{value}'")]
    InvalidFee { tag: String, value: String },

    #[error("network '{tag}': destination chain id equals origin chain id {chain_id}")]
    SameChain { tag: String, chain_id: u64 },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("poll interval ({poll_secs}s) exceeds receipt timeout ({timeout_secs}s)")]
    PollExceedsTimeout { poll_secs: u64, timeout_secs: u64 },

    #[error("max priority fee ({priority} gwei) exceeds max fee ({max} gwei)")]
    PriorityExceedsMaxFee { priority: u64, max: u64 },

    #[error("invalid directory endpoint '{0}'")]
    InvalidEndpoint(String),
}

/// Validate a loaded configuration, collecting every problem found.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.networks.is_empty() {
        errors.push(ValidationError::NoNetworks);
    }

    let mut seen = HashSet::new();
    for network in &config.networks {
        if !seen.insert(network.tag.as_str()) {
            errors.push(ValidationError::DuplicateTag(network.tag.clone()));
        }
        validate_network(network, &mut errors);
    }

    if config.directory.page_size == 0 {
        errors.push(ValidationError::Zero { field: "directory.page_size" });
    }
    if config.directory.endpoint.parse::<url::Url>().is_err() {
        errors.push(ValidationError::InvalidEndpoint(config.directory.endpoint.clone()));
    }

    let tx = &config.transaction;
    if tx.receipt_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "transaction.receipt_timeout_secs" });
    }
    if tx.poll_interval_secs == 0 {
        errors.push(ValidationError::Zero { field: "transaction.poll_interval_secs" });
    } else if tx.poll_interval_secs > tx.receipt_timeout_secs {
        errors.push(ValidationError::PollExceedsTimeout {
            poll_secs: tx.poll_interval_secs,
            timeout_secs: tx.receipt_timeout_secs,
        });
    }
    if tx.max_priority_fee_per_gas_gwei > tx.max_fee_per_gas_gwei {
        errors.push(ValidationError::PriorityExceedsMaxFee {
            priority: tx.max_priority_fee_per_gas_gwei,
            max: tx.max_fee_per_gas_gwei,
        });
    }
    if tx.gas_limit == Some(0) {
        errors.push(ValidationError::Zero { field: "transaction.gas_limit" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_network(network: &NetworkConfig, errors: &mut Vec<ValidationError>) {
    let tag = network.tag.clone();

    if network.contract_address.parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidContractAddress {
            tag: tag.clone(),
            value: network.contract_address.clone(),
        });
    }

    for url in std::iter::once(&network.rpc_url).chain(network.failover_urls.iter()) {
        if url.parse::<url::Url>().is_err() {
            errors.push(ValidationError::InvalidRpcUrl {
                tag: tag.clone(),
                value: url.clone(),
            });
        }
    }

    if parse_ether(&network.bridge_fee).is_err() {
        errors.push(ValidationError::InvalidFee {
            tag: tag.clone(),
            value: network.bridge_fee.clone(),
        });
    }

    if network.chain_id == network.destination_chain_id {
        errors.push(ValidationError::SameChain {
            tag: tag.clone(),
            chain_id: network.chain_id,
        });
    }

    if network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "networks.rpc_timeout_secs" });
    }
}
