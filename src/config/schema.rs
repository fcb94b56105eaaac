//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge tool.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the hero bridge.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Hero directory (GraphQL index) settings.
    pub directory: DirectoryConfig,

    /// Per-network routing table: one entry per origin network tag.
    pub networks: Vec<NetworkConfig>,

    /// Fee fields and receipt polling for bridge transactions.
    pub transaction: TransactionConfig,

    /// Encrypted key file location.
    pub vault: VaultConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            directory: DirectoryConfig::default(),
            networks: default_networks(),
            transaction: TransactionConfig::default(),
            vault: VaultConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Hero directory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,

    /// Records requested per page.
    pub page_size: usize,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.defikingdoms.com/graphql".to_string(),
            page_size: 250,
            request_timeout_secs: 30,
        }
    }
}

/// Routing entry for one origin network.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Network tag as reported by the hero directory (e.g. "kla", "dfk").
    pub tag: String,

    /// Human-readable realm name for logging.
    pub name: String,

    /// JSON-RPC endpoint URL of the origin network.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID of the origin network (used for EIP-155 signing).
    pub chain_id: u64,

    /// Hero bridge contract on the origin network.
    pub contract_address: String,

    /// Chain ID the hero is sent to.
    pub destination_chain_id: u64,

    /// Bridge fee in the origin network's native unit (decimal string, e.g. "0.0045").
    pub bridge_fee: String,

    /// RPC request timeout in seconds.
    #[serde(default = "default_rpc_timeout_secs")]
    pub rpc_timeout_secs: u64,
}

fn default_rpc_timeout_secs() -> u64 {
    10
}

/// Routing table for the two supported realms.
pub fn default_networks() -> Vec<NetworkConfig> {
    vec![
        NetworkConfig {
            tag: "kla".to_string(),
            name: "serendale2".to_string(),
            rpc_url: "https://klaytn.rpc.defikingdoms.com/".to_string(),
            failover_urls: Vec::new(),
            chain_id: 8217,
            contract_address: "0xEE258eF5F4338B37E9BA9dE6a56382AdB32056E2".to_string(),
            destination_chain_id: 53935,
            bridge_fee: "0.0045".to_string(),
            rpc_timeout_secs: default_rpc_timeout_secs(),
        },
        NetworkConfig {
            tag: "dfk".to_string(),
            name: "crystalvale".to_string(),
            rpc_url: "https://subnets.avax.network/defi-kingdoms/dfk-chain/rpc".to_string(),
            failover_urls: Vec::new(),
            chain_id: 53935,
            contract_address: "0x739B1666c2956f601f095298132773074c3E184b".to_string(),
            destination_chain_id: 8217,
            bridge_fee: "0.075".to_string(),
            rpc_timeout_secs: default_rpc_timeout_secs(),
        },
    ]
}

/// Bridge transaction parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// EIP-1559 max fee per gas in gwei.
    pub max_fee_per_gas_gwei: u64,

    /// EIP-1559 max priority fee per gas in gwei.
    pub max_priority_fee_per_gas_gwei: u64,

    /// Fixed gas limit. When unset the node's gas estimate is used.
    pub gas_limit: Option<u64>,

    /// Maximum time to wait for a receipt in seconds.
    pub receipt_timeout_secs: u64,

    /// Receipt polling interval in seconds.
    pub poll_interval_secs: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            max_fee_per_gas_gwei: 26,
            max_priority_fee_per_gas_gwei: 0,
            gas_limit: None,
            receipt_timeout_secs: 60,
            poll_interval_secs: 2,
        }
    }
}

/// Key vault configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Directory searched for a `*.key` file.
    pub key_dir: String,

    /// Explicit key file path; overrides discovery in `key_dir`.
    pub key_file: Option<String>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            key_dir: ".".to_string(),
            key_file: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
