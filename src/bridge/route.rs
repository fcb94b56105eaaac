//! Network routing table.

use alloy::primitives::U256;
use std::collections::HashMap;

use crate::blockchain::transaction::fee_to_wei;
use crate::blockchain::{BlockchainError, BlockchainResult};
use crate::config::NetworkConfig;

/// Where a hero on one network is sent and what it costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub tag: String,
    pub destination_chain_id: u64,
    /// Bridge fee in wei of the origin network's native token.
    pub fee: U256,
}

impl TryFrom<&NetworkConfig> for Route {
    type Error = BlockchainError;

    fn try_from(network: &NetworkConfig) -> BlockchainResult<Self> {
        Ok(Self {
            tag: network.tag.clone(),
            destination_chain_id: network.destination_chain_id,
            fee: fee_to_wei(&network.bridge_fee)?,
        })
    }
}

/// Routes keyed by origin network tag.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, Route>,
}

impl RouteTable {
    pub fn from_networks(networks: &[NetworkConfig]) -> BlockchainResult<Self> {
        let routes = networks
            .iter()
            .map(|n| Route::try_from(n).map(|route| (route.tag.clone(), route)))
            .collect::<BlockchainResult<HashMap<_, _>>>()?;
        Ok(Self { routes })
    }

    pub fn resolve(&self, tag: &str) -> Option<&Route> {
        self.routes.get(tag)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
