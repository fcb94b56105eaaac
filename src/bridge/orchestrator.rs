//! Sequential bridge run over a snapshot of selected heroes.
//!
//! # Per-hero state machine
//! ```text
//! Pending → Submitting → AwaitingReceipt → Confirmed
//!                 └──────────┴───────────→ Failed
//! ```
//!
//! A failure never aborts the run. Heroes are processed strictly one after
//! another, each with a nonce read at the moment it is processed.

use alloy::primitives::TxHash;
use futures_util::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::blockchain::{
    BlockchainError, BlockchainResult, BridgeTransaction, ChainGateway, EvmGateway,
    GatewayProgress, TransactionSettings, Wallet,
};
use crate::bridge::error::BridgeFailure;
use crate::bridge::events::{BridgeEvent, HeroOutcome, HeroState, RunSummary};
use crate::bridge::route::RouteTable;
use crate::config::BridgeConfig;
use crate::directory::Hero;
use crate::observability::metrics::record_bridge_outcome;

/// Pause after every hero, whatever its outcome.
pub const INTER_HERO_DELAY: Duration = Duration::from_millis(500);

/// Drives bridge runs through the per-network gateways.
pub struct BridgeOrchestrator {
    routes: RouteTable,
    gateways: HashMap<String, Arc<dyn ChainGateway>>,
    settings: TransactionSettings,
}

impl BridgeOrchestrator {
    pub fn new(
        routes: RouteTable,
        gateways: HashMap<String, Arc<dyn ChainGateway>>,
        settings: TransactionSettings,
    ) -> Self {
        Self {
            routes,
            gateways,
            settings,
        }
    }

    /// Build routes and one RPC gateway per configured network.
    pub fn from_config(config: &BridgeConfig) -> BlockchainResult<Self> {
        let routes = RouteTable::from_networks(&config.networks)?;
        if routes.is_empty() {
            tracing::warn!("No networks configured; every hero will fail to route");
        } else {
            tracing::debug!(routes = routes.len(), "Route table built");
        }
        let mut gateways: HashMap<String, Arc<dyn ChainGateway>> = HashMap::new();
        for network in &config.networks {
            let gateway = EvmGateway::new(network.clone())?;
            gateways.insert(network.tag.clone(), Arc::new(gateway));
        }
        Ok(Self::new(routes, gateways, TransactionSettings::from(&config.transaction)))
    }

    /// Check every gateway against its configured chain id. Returns the
    /// networks that failed; an unreachable network is not fatal here.
    pub async fn verify_networks(&self) -> Vec<(String, BlockchainError)> {
        let mut problems = Vec::new();
        for (tag, gateway) in &self.gateways {
            if let Err(e) = gateway.verify_chain().await {
                tracing::warn!(network = %tag, error = %e, "Network verification failed");
                problems.push((tag.clone(), e));
            }
        }
        problems
    }

    /// Bridge `heroes` in order and report everything on `events`.
    ///
    /// Ends with [`BridgeEvent::Finished`]. A closed receiver does not stop the run.
    pub async fn run(
        &self,
        heroes: Vec<Hero>,
        wallet: &Wallet,
        events: UnboundedSender<BridgeEvent>,
    ) -> RunSummary {
        let run_id = Uuid::new_v4();
        let mut summary = RunSummary {
            run_id,
            confirmed: 0,
            failed: 0,
        };
        tracing::info!(%run_id, heroes = heroes.len(), sender = %wallet.address(), "Bridge run started");

        for hero in &heroes {
            let _ = events.send(BridgeEvent::StateChanged {
                hero_id: hero.id,
                state: HeroState::Pending,
            });
            emit_log(&events, format!("Starting to bridge hero {}...", hero.id));

            let result = AssertUnwindSafe(self.bridge_one(hero, wallet, &events))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(BridgeFailure::Unexpected(panic_message(panic))));

            match &result {
                Ok(tx_hash) => {
                    summary.confirmed += 1;
                    record_bridge_outcome(&hero.network, "confirmed");
                    tracing::info!(%run_id, hero_id = hero.id, %tx_hash, "Hero bridged");
                    let _ = events.send(BridgeEvent::StateChanged {
                        hero_id: hero.id,
                        state: HeroState::Confirmed,
                    });
                    let _ = events.send(BridgeEvent::Removed(hero.id));
                    emit_log(&events, format!("Hero ID {} bridged successfully.", hero.id));
                }
                Err(failure) => {
                    summary.failed += 1;
                    record_bridge_outcome(&hero.network, failure.kind());
                    tracing::warn!(%run_id, hero_id = hero.id, kind = failure.kind(), error = %failure, "Hero bridge failed");
                    let _ = events.send(BridgeEvent::StateChanged {
                        hero_id: hero.id,
                        state: HeroState::Failed,
                    });
                    emit_log(
                        &events,
                        format!("Error during bridging hero {}: {}", hero.id, failure),
                    );
                }
            }

            let _ = events.send(BridgeEvent::Outcome(HeroOutcome {
                hero_id: hero.id,
                network: hero.network.clone(),
                result,
            }));

            tokio::time::sleep(INTER_HERO_DELAY).await;
        }

        tracing::info!(%run_id, confirmed = summary.confirmed, failed = summary.failed, "Bridge run finished");
        let _ = events.send(BridgeEvent::Finished(summary));
        summary
    }

    async fn bridge_one(
        &self,
        hero: &Hero,
        wallet: &Wallet,
        events: &UnboundedSender<BridgeEvent>,
    ) -> Result<TxHash, BridgeFailure> {
        let route = self.routes.resolve(&hero.network).ok_or_else(|| {
            BridgeFailure::Configuration(format!("No route for network '{}'", hero.network))
        })?;
        let gateway = self.gateways.get(&route.tag).ok_or_else(|| {
            BridgeFailure::Configuration(format!("No gateway for network '{}'", route.tag))
        })?;

        let nonce = gateway.nonce(wallet.address()).await?;
        let tx = BridgeTransaction {
            hero_id: hero.id,
            destination_chain_id: route.destination_chain_id,
            fee: route.fee,
            nonce,
            settings: self.settings,
        };

        let _ = events.send(BridgeEvent::StateChanged {
            hero_id: hero.id,
            state: HeroState::Submitting,
        });

        let hero_id = hero.id;
        let progress = move |update: GatewayProgress| match update {
            GatewayProgress::Submitted { tx_hash } => {
                let _ = events.send(BridgeEvent::StateChanged {
                    hero_id,
                    state: HeroState::AwaitingReceipt,
                });
                emit_log(events, format!("Transaction sent for hero {}: {}", hero_id, tx_hash));
            }
            GatewayProgress::Mined { block_number, .. } => {
                tracing::debug!(hero_id, ?block_number, "Receipt received");
            }
        };

        let receipt = gateway.submit_bridge(&tx, wallet, &progress).await?;
        Ok(receipt.tx_hash)
    }
}

fn emit_log(events: &UnboundedSender<BridgeEvent>, line: String) {
    let _ = events.send(BridgeEvent::Log(line));
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic during bridge step".to_string()
    }
}
