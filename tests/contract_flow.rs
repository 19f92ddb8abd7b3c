//! End-to-end receipt processing against a wire-format receipt.

use std::sync::Arc;

use alloy::primitives::{address, Address, U256};
use alloy::rpc::types::TransactionReceipt;
use chaincall::{ContractBinding, HttpRpc, Interface};
use serde_json::json;

const ESCROW_ABI: &str = r#"[
    {
        "type": "function",
        "name": "deposit",
        "inputs": [{"name": "amount", "type": "uint256"}],
        "outputs": [],
        "stateMutability": "nonpayable"
    },
    {
        "type": "event",
        "name": "DepositFunds",
        "inputs": [
            {"name": "sender", "type": "address", "indexed": true},
            {"name": "amount", "type": "uint256", "indexed": false}
        ],
        "anonymous": false
    },
    {
        "type": "event",
        "name": "WithdrawFunds",
        "inputs": [
            {"name": "recipient", "type": "address", "indexed": true},
            {"name": "amount", "type": "uint256", "indexed": false}
        ],
        "anonymous": false
    }
]"#;

const CONTRACT: Address = address!("00000000000000000000000000000000000000c0");

fn binding() -> ContractBinding<HttpRpc> {
    let interface = Arc::new(Interface::from_json(ESCROW_ABI).unwrap());
    // No traffic in these tests; connecting only builds the transport.
    let rpc = Arc::new(HttpRpc::connect("http://localhost:8545").unwrap());
    ContractBinding::new(CONTRACT, interface, rpc)
}

fn log_json(address: Address, topics: Vec<String>, amount: u64, log_index: u64) -> serde_json::Value {
    json!({
        "address": address.to_string(),
        "topics": topics,
        "data": format!("0x{:064x}", amount),
        "blockHash": format!("0x{:064x}", 1),
        "blockNumber": "0x1",
        "transactionHash": format!("0x{:064x}", 2),
        "transactionIndex": "0x0",
        "logIndex": format!("0x{log_index:x}"),
        "removed": false
    })
}

fn receipt_json(logs: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "transactionHash": format!("0x{:064x}", 2),
        "transactionIndex": "0x0",
        "blockHash": format!("0x{:064x}", 1),
        "blockNumber": "0x1",
        "from": address!("00000000000000000000000000000000000000aa").to_string(),
        "to": CONTRACT.to_string(),
        "gasUsed": "0x5208",
        "cumulativeGasUsed": "0x5208",
        "contractAddress": null,
        "effectiveGasPrice": "0x3b9aca00",
        "status": "0x1",
        "type": "0x0",
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "logs": logs
    })
}

#[test]
fn decodes_wire_format_receipt_in_catalog_order() {
    let contract = binding();
    let sender = address!("1111111111111111111111111111111111111111");

    let deposit = contract.interface().event("DepositFunds").unwrap().selector();
    let withdraw = contract.interface().event("WithdrawFunds").unwrap().selector();

    // Receipt order: WithdrawFunds first, then noise from another contract,
    // then DepositFunds. Catalog order is DepositFunds, WithdrawFunds.
    let logs = vec![
        log_json(
            CONTRACT,
            vec![withdraw.to_string(), sender.into_word().to_string()],
            7,
            0,
        ),
        log_json(
            address!("00000000000000000000000000000000000000dd"),
            vec![deposit.to_string(), sender.into_word().to_string()],
            99,
            1,
        ),
        log_json(
            CONTRACT,
            vec![deposit.to_string(), sender.into_word().to_string()],
            42,
            2,
        ),
    ];

    let receipt: TransactionReceipt = serde_json::from_value(receipt_json(logs)).unwrap();
    let events = contract.process_receipt(&receipt);

    let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["DepositFunds", "WithdrawFunds"]);
    assert_eq!(events[0].arg("amount"), Some(&U256::from(42).into()));
    assert_eq!(events[0].arg("sender"), Some(&sender.into()));
    assert_eq!(events[1].arg("amount"), Some(&U256::from(7).into()));
}

#[test]
fn receipt_processing_is_idempotent() {
    let contract = binding();
    let sender = address!("1111111111111111111111111111111111111111");
    let deposit = contract.interface().event("DepositFunds").unwrap().selector();

    let logs = vec![log_json(
        CONTRACT,
        vec![deposit.to_string(), sender.into_word().to_string()],
        42,
        0,
    )];
    let receipt: TransactionReceipt = serde_json::from_value(receipt_json(logs)).unwrap();

    let first = contract.process_receipt(&receipt);
    let second = contract.process_receipt(&receipt);
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[test]
fn receipt_with_only_foreign_logs_decodes_to_nothing() {
    let contract = binding();
    let sender = address!("1111111111111111111111111111111111111111");
    let deposit = contract.interface().event("DepositFunds").unwrap().selector();

    let logs = vec![log_json(
        address!("00000000000000000000000000000000000000dd"),
        vec![deposit.to_string(), sender.into_word().to_string()],
        42,
        0,
    )];
    let receipt: TransactionReceipt = serde_json::from_value(receipt_json(logs)).unwrap();

    assert!(contract.process_receipt(&receipt).is_empty());
}
