//! Bridge transaction construction.
//!
//! # Responsibilities
//! - Encode the `sendHero` contract call
//! - Attach the bridge fee, caller-supplied fee fields and nonce
//! - Convert gwei/ether amounts into wei

use alloy::network::TransactionBuilder;
use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;
use std::time::Duration;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::TransactionConfig;

sol! {
    /// Hero bridge contract on each realm.
    interface IHeroBridge {
        function sendHero(uint256 heroId, uint256 dstChainId) external payable;
    }
}

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// EIP-1559 fee fields in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeRate {
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
}

impl FeeRate {
    /// Build fee fields from gwei amounts.
    pub fn from_gwei(max_fee_per_gas: u64, max_priority_fee_per_gas: u64) -> Self {
        Self {
            max_fee_per_gas: max_fee_per_gas as u128 * WEI_PER_GWEI,
            max_priority_fee_per_gas: max_priority_fee_per_gas as u128 * WEI_PER_GWEI,
        }
    }
}

/// Parameters shared by every bridge transaction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSettings {
    pub fee_rate: FeeRate,
    pub gas_limit: Option<u64>,
    pub receipt_timeout: Duration,
    pub poll_interval: Duration,
}

impl From<&TransactionConfig> for TransactionSettings {
    fn from(config: &TransactionConfig) -> Self {
        Self {
            fee_rate: FeeRate::from_gwei(
                config.max_fee_per_gas_gwei,
                config.max_priority_fee_per_gas_gwei,
            ),
            gas_limit: config.gas_limit,
            receipt_timeout: Duration::from_secs(config.receipt_timeout_secs),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
        }
    }
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self::from(&TransactionConfig::default())
    }
}

/// One hero transfer, built right before submission and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeTransaction {
    pub hero_id: u64,
    pub destination_chain_id: u64,
    /// Bridge fee attached as call value, in wei.
    pub fee: U256,
    pub nonce: u64,
    pub settings: TransactionSettings,
}

impl BridgeTransaction {
    /// ABI-encoded `sendHero(heroId, dstChainId)` calldata.
    pub fn calldata(&self) -> Vec<u8> {
        IHeroBridge::sendHeroCall {
            heroId: U256::from(self.hero_id),
            dstChainId: U256::from(self.destination_chain_id),
        }
        .abi_encode()
    }

    /// Unsigned request to `contract` on the origin chain. The gas limit is
    /// only set when configured; otherwise the gateway fills in an estimate.
    pub fn to_request(&self, from: Address, contract: Address, chain_id: u64) -> TransactionRequest {
        let fee_rate = self.settings.fee_rate;
        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(contract)
            .with_value(self.fee)
            .with_input(self.calldata())
            .with_nonce(self.nonce)
            .with_chain_id(chain_id)
            .with_max_fee_per_gas(fee_rate.max_fee_per_gas)
            .with_max_priority_fee_per_gas(fee_rate.max_priority_fee_per_gas);

        match self.settings.gas_limit {
            Some(gas_limit) => request.with_gas_limit(gas_limit),
            None => request,
        }
    }
}

/// Convert a decimal native-unit amount (e.g. "0.0045") into wei.
pub fn fee_to_wei(amount: &str) -> BlockchainResult<U256> {
    parse_ether(amount.trim())
        .map_err(|e| BlockchainError::InvalidConfig(format!("Invalid fee amount '{}': {}", amount, e)))
}
