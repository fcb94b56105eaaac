//! Per-network bridge gateway.
//!
//! # Responsibilities
//! - Nonce lookup for the sender on the origin network
//! - Sign and broadcast one `sendHero` transaction
//! - Poll for its receipt, bounded by the transaction's timeout
//!
//! Nothing here retries: a rejected or timed-out transaction is reported
//! once and the caller decides what to do next.

use alloy::eips::eip2718::Encodable2718;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::transaction::BridgeTransaction;
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, BridgeReceipt, GatewayProgress, NetworkConfig,
};
use crate::blockchain::wallet::Wallet;

/// A bridge endpoint on one origin network.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Network tag this gateway serves.
    fn network(&self) -> &str;

    /// Check that the endpoint serves the configured chain.
    async fn verify_chain(&self) -> BlockchainResult<()>;

    /// Current transaction count of `address` on this network.
    async fn nonce(&self, address: Address) -> BlockchainResult<u64>;

    /// Sign and broadcast `tx`, returning the hash once the node accepts it.
    async fn send_hero(&self, tx: &BridgeTransaction, wallet: &Wallet) -> BlockchainResult<TxHash>;

    /// Poll for the receipt of `tx_hash` every `poll_interval` until `limit` elapses.
    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        limit: Duration,
        poll_interval: Duration,
    ) -> BlockchainResult<BridgeReceipt>;

    /// Submit and confirm one bridge transaction, reporting progress as it goes.
    async fn submit_bridge(
        &self,
        tx: &BridgeTransaction,
        wallet: &Wallet,
        progress: &(dyn Fn(GatewayProgress) + Send + Sync),
    ) -> BlockchainResult<BridgeReceipt> {
        let tx_hash = self.send_hero(tx, wallet).await?;
        progress(GatewayProgress::Submitted { tx_hash });

        let receipt = self
            .wait_for_receipt(tx_hash, tx.settings.receipt_timeout, tx.settings.poll_interval)
            .await?;
        progress(GatewayProgress::Mined {
            tx_hash,
            block_number: receipt.block_number,
        });
        Ok(receipt)
    }
}

/// Gateway backed by an EVM JSON-RPC node and the hero bridge contract.
#[derive(Debug, Clone)]
pub struct EvmGateway {
    client: BlockchainClient,
    contract: Address,
}

impl EvmGateway {
    /// Create a gateway for one routing entry.
    pub fn new(config: NetworkConfig) -> BlockchainResult<Self> {
        let contract: Address = config.contract_address.parse().map_err(|e| {
            BlockchainError::InvalidConfig(format!(
                "Invalid contract address '{}': {}",
                config.contract_address, e
            ))
        })?;
        let client = BlockchainClient::new(config)?;
        Ok(Self { client, contract })
    }
}

#[async_trait]
impl ChainGateway for EvmGateway {
    fn network(&self) -> &str {
        &self.client.config().tag
    }

    async fn verify_chain(&self) -> BlockchainResult<()> {
        self.client.verify_chain_id().await
    }

    async fn nonce(&self, address: Address) -> BlockchainResult<u64> {
        self.client.get_transaction_count(address).await
    }

    async fn send_hero(&self, tx: &BridgeTransaction, wallet: &Wallet) -> BlockchainResult<TxHash> {
        let chain_id = self.client.config().chain_id;
        let mut request = tx.to_request(wallet.address(), self.contract, chain_id);

        if request.gas.is_none() {
            let gas_limit = self.client.estimate_gas(&request).await?;
            tracing::debug!(hero_id = tx.hero_id, gas_limit, "Using estimated gas limit");
            request.set_gas_limit(gas_limit);
        }

        let envelope = wallet.sign_request(request).await?;
        let tx_hash = self.client.send_raw_transaction(&envelope.encoded_2718()).await?;

        tracing::info!(
            network = %self.network(),
            hero_id = tx.hero_id,
            nonce = tx.nonce,
            tx_hash = %tx_hash,
            "Bridge transaction submitted"
        );
        Ok(tx_hash)
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        limit: Duration,
        poll_interval: Duration,
    ) -> BlockchainResult<BridgeReceipt> {
        let result = timeout(limit, async {
            let mut ticker = interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await {
                    Ok(Some(r)) => r,
                    Ok(None) => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                    Err(e) => {
                        tracing::debug!(tx_hash = %tx_hash, error = %e, "Receipt poll failed");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(BlockchainError::Reverted(tx_hash));
                }

                return Ok(BridgeReceipt {
                    tx_hash,
                    block_number: receipt.block_number,
                    gas_used: receipt.gas_used,
                });
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(BlockchainError::ReceiptTimeout {
                tx_hash,
                secs: limit.as_secs(),
            }),
        }
    }
}
