//! EVM gateway against a stub JSON-RPC node.

mod common;

use alloy::consensus::{Transaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{hex, Address, TxHash, U256};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{rpc_error, rpc_result, start_programmable_backend, TEST_ADDRESS, TEST_PRIVATE_KEY};
use hero_bridge::blockchain::transaction::fee_to_wei;
use hero_bridge::blockchain::{
    BlockchainError, BridgeTransaction, ChainGateway, EvmGateway, GatewayProgress,
    TransactionSettings, Wallet,
};
use hero_bridge::config::schema::default_networks;

const TX_HASH: &str = "0x8c3d8c9b2c0e4f8b9a1d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b";
const KLA_CONTRACT: &str = "0xEE258eF5F4338B37E9BA9dE6a56382AdB32056E2";

#[derive(Clone, Copy)]
enum Node {
    /// Accepts the transaction; receipt appears on the second poll with this status.
    Mines { status: u8 },
    Rejects,
    NeverMines,
}

struct Stub {
    addr: SocketAddr,
    methods: Arc<Mutex<Vec<String>>>,
    raw_txs: Arc<Mutex<Vec<String>>>,
}

fn receipt_json(status: u8) -> Value {
    json!({
        "transactionHash": TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "11".repeat(32)),
        "blockNumber": "0x10",
        "from": TEST_ADDRESS,
        "to": KLA_CONTRACT,
        "cumulativeGasUsed": "0x3d090",
        "gasUsed": "0x3d090",
        "effectiveGasPrice": "0x60db88400",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "type": "0x2",
        "status": format!("0x{:x}", status)
    })
}

async fn start_node(node: Node, chain_id: u64) -> Stub {
    let methods = Arc::new(Mutex::new(Vec::new()));
    let raw_txs = Arc::new(Mutex::new(Vec::new()));
    let receipt_polls = Arc::new(AtomicUsize::new(0));

    let (m, r) = (methods.clone(), raw_txs.clone());
    let addr = start_programmable_backend(move |request: Value| {
        let (methods, raw_txs, polls) = (m.clone(), r.clone(), receipt_polls.clone());
        async move {
            let method = request["method"].as_str().unwrap_or_default().to_string();
            methods.lock().unwrap().push(method.clone());

            let body = match method.as_str() {
                "eth_chainId" => rpc_result(&request, json!(format!("0x{:x}", chain_id))),
                "eth_getTransactionCount" => rpc_result(&request, json!("0x5")),
                "eth_estimateGas" => rpc_result(&request, json!("0x3d090")),
                "eth_sendRawTransaction" => {
                    raw_txs
                        .lock()
                        .unwrap()
                        .push(request["params"][0].as_str().unwrap_or_default().to_string());
                    match node {
                        Node::Rejects => rpc_error(&request, "insufficient funds for gas * price + value"),
                        _ => rpc_result(&request, json!(TX_HASH)),
                    }
                }
                "eth_getTransactionReceipt" => {
                    let poll = polls.fetch_add(1, Ordering::SeqCst);
                    match node {
                        Node::Mines { status } if poll >= 1 => rpc_result(&request, receipt_json(status)),
                        _ => rpc_result(&request, Value::Null),
                    }
                }
                other => rpc_error(&request, &format!("method {} not stubbed", other)),
            };
            (200, body)
        }
    })
    .await;

    Stub {
        addr,
        methods,
        raw_txs,
    }
}

fn gateway(addr: SocketAddr) -> EvmGateway {
    let mut network = default_networks().remove(0);
    network.rpc_url = format!("http://{}", addr);
    network.rpc_timeout_secs = 5;
    EvmGateway::new(network).unwrap()
}

fn bridge_tx(nonce: u64, receipt_timeout: Duration) -> BridgeTransaction {
    BridgeTransaction {
        hero_id: 42,
        destination_chain_id: 53935,
        fee: fee_to_wei("0.0045").unwrap(),
        nonce,
        settings: TransactionSettings {
            receipt_timeout,
            poll_interval: Duration::from_millis(50),
            ..TransactionSettings::default()
        },
    }
}

#[tokio::test]
async fn test_bridge_confirmed() {
    let stub = start_node(Node::Mines { status: 1 }, 8217).await;
    let gateway = gateway(stub.addr);
    let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();

    let nonce = gateway.nonce(wallet.address()).await.unwrap();
    assert_eq!(nonce, 5);

    let progress = Arc::new(Mutex::new(Vec::new()));
    let recorder = progress.clone();
    let report = move |p: GatewayProgress| recorder.lock().unwrap().push(p);

    let receipt = gateway
        .submit_bridge(&bridge_tx(nonce, Duration::from_secs(5)), &wallet, &report)
        .await
        .unwrap();

    let expected: TxHash = TX_HASH.parse().unwrap();
    assert_eq!(receipt.tx_hash, expected);
    assert_eq!(receipt.block_number, Some(16));
    assert_eq!(receipt.gas_used, 250_000);
    assert_eq!(
        *progress.lock().unwrap(),
        vec![
            GatewayProgress::Submitted { tx_hash: expected },
            GatewayProgress::Mined {
                tx_hash: expected,
                block_number: Some(16)
            },
        ]
    );

    // gas limit was unset, so the node was asked for an estimate
    assert!(stub.methods.lock().unwrap().contains(&"eth_estimateGas".to_string()));

    let raw = stub.raw_txs.lock().unwrap()[0].clone();
    let bytes = hex::decode(raw).unwrap();
    let envelope = TxEnvelope::decode_2718(&mut bytes.as_slice()).unwrap();
    assert_eq!(envelope.to(), Some(KLA_CONTRACT.parse::<Address>().unwrap()));
    assert_eq!(envelope.value(), U256::from(4_500_000_000_000_000u64));
    assert_eq!(envelope.nonce(), 5);
    assert_eq!(envelope.chain_id(), Some(8217));
    assert_eq!(envelope.gas_limit(), 250_000);
    assert_eq!(envelope.max_fee_per_gas(), 26_000_000_000);
    assert_eq!(envelope.input().as_ref(), bridge_tx(5, Duration::ZERO).calldata().as_slice());
}

#[tokio::test]
async fn test_fixed_gas_limit_skips_estimate() {
    let stub = start_node(Node::Mines { status: 1 }, 8217).await;
    let gateway = gateway(stub.addr);
    let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();

    let mut tx = bridge_tx(0, Duration::from_secs(5));
    tx.settings.gas_limit = Some(300_000);
    gateway.submit_bridge(&tx, &wallet, &|_| {}).await.unwrap();

    assert!(!stub.methods.lock().unwrap().contains(&"eth_estimateGas".to_string()));
    let raw = stub.raw_txs.lock().unwrap()[0].clone();
    let envelope = TxEnvelope::decode_2718(&mut hex::decode(raw).unwrap().as_slice()).unwrap();
    assert_eq!(envelope.gas_limit(), 300_000);
}

#[tokio::test]
async fn test_rejected_submission() {
    let stub = start_node(Node::Rejects, 8217).await;
    let gateway = gateway(stub.addr);
    let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();

    let result = gateway
        .submit_bridge(&bridge_tx(0, Duration::from_secs(5)), &wallet, &|_| {})
        .await;
    assert!(matches!(result, Err(BlockchainError::Submission(msg)) if msg.contains("insufficient funds")));
    assert!(!stub
        .methods
        .lock()
        .unwrap()
        .contains(&"eth_getTransactionReceipt".to_string()));
}

#[tokio::test]
async fn test_receipt_timeout() {
    let stub = start_node(Node::NeverMines, 8217).await;
    let gateway = gateway(stub.addr);
    let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();

    let submitted = Arc::new(AtomicUsize::new(0));
    let counter = submitted.clone();
    let report = move |p: GatewayProgress| {
        if matches!(p, GatewayProgress::Submitted { .. }) {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    };

    let result = gateway
        .submit_bridge(&bridge_tx(0, Duration::from_millis(400)), &wallet, &report)
        .await;
    assert!(matches!(result, Err(BlockchainError::ReceiptTimeout { .. })));
    assert_eq!(submitted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_reverted_receipt() {
    let stub = start_node(Node::Mines { status: 0 }, 8217).await;
    let gateway = gateway(stub.addr);
    let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();

    let result = gateway
        .submit_bridge(&bridge_tx(0, Duration::from_secs(5)), &wallet, &|_| {})
        .await;
    assert!(matches!(result, Err(BlockchainError::Reverted(_))));
}

#[tokio::test]
async fn test_chain_verification() {
    let good = start_node(Node::NeverMines, 8217).await;
    assert!(gateway(good.addr).verify_chain().await.is_ok());

    let wrong = start_node(Node::NeverMines, 1).await;
    assert!(matches!(
        gateway(wrong.addr).verify_chain().await,
        Err(BlockchainError::ChainMismatch {
            expected: 8217,
            actual: 1
        })
    ));
}
