//! Transfer an ERC-20 token and print the decoded Transfer event.
//!
//! Usage:
//!   RPC_URL=https://... PRIVATE_KEY=0x... TOKEN=0x... RECIPIENT=0x... \
//!     cargo run --example token_transfer

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use chaincall::{CallArgs, ChainClient, Interface, LocalSigner, NetworkConfig};
use eyre::{Context, Result};

const ERC20_ABI: &str = r#"[
    {
        "type": "function",
        "name": "balanceOf",
        "inputs": [{"name": "account", "type": "address"}],
        "outputs": [{"name": "", "type": "uint256"}],
        "stateMutability": "view"
    },
    {
        "type": "function",
        "name": "transfer",
        "inputs": [
            {"name": "to", "type": "address"},
            {"name": "amount", "type": "uint256"}
        ],
        "outputs": [{"name": "", "type": "bool"}],
        "stateMutability": "nonpayable"
    },
    {
        "type": "event",
        "name": "Transfer",
        "inputs": [
            {"name": "from", "type": "address", "indexed": true},
            {"name": "to", "type": "address", "indexed": true},
            {"name": "value", "type": "uint256", "indexed": false}
        ],
        "anonymous": false
    }
]"#;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = NetworkConfig::from_env()?;
    let private_key = std::env::var("PRIVATE_KEY").context("PRIVATE_KEY must be set")?;
    let token_address: Address = std::env::var("TOKEN")
        .context("TOKEN must be set")?
        .parse()
        .context("TOKEN is not a valid address")?;
    let recipient: Address = std::env::var("RECIPIENT")
        .context("RECIPIENT must be set")?
        .parse()
        .context("RECIPIENT is not a valid address")?;

    let signer = LocalSigner::from_private_key(private_key)?;
    let client = ChainClient::new(signer, config)?;

    let interface = Arc::new(Interface::from_json(ERC20_ABI)?);
    let token = client.bind(token_address, interface);

    let balance = token
        .call("balanceOf", CallArgs::new().arg(client.address()))
        .await?;
    println!("balance before: {balance:?}");

    let outcome = client
        .execute(
            &token,
            "transfer",
            CallArgs::new().arg(recipient).named("amount", U256::from(1)),
            None,
        )
        .await?;

    println!("mined in tx {}", outcome.tx_hash);
    for event in &outcome.events {
        println!("{}", event.to_json());
    }

    Ok(())
}
