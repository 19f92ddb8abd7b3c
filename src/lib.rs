//! chaincall - ABI-driven client SDK for EVM smart contracts
//!
//! Works with interface definitions (ABIs) loaded at runtime: bind a
//! deployed contract to its parsed ABI, invoke read functions, build and
//! sign state-changing transactions, and decode the events a receipt
//! carries.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chaincall::{CallArgs, ChainClient, Interface, LocalSigner, NetworkConfig};
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let config = NetworkConfig::sepolia();
//!     let signer = LocalSigner::from_private_key("0x...")?;
//!     let client = ChainClient::new(signer, config)?;
//!
//!     let interface = Arc::new(Interface::from_json(&std::fs::read_to_string("token.json")?)?);
//!     let token = client.bind("0x...".parse()?, interface);
//!
//!     // Read path: no gas, no signature.
//!     let balance = token
//!         .call("balanceOf", CallArgs::new().arg(client.address()))
//!         .await?;
//!     println!("balance: {balance:?}");
//!
//!     // Write path: build -> sign -> broadcast -> await receipt -> decode.
//!     let outcome = client
//!         .execute(
//!             &token,
//!             "transfer",
//!             CallArgs::new().arg("0x...".parse::<alloy::primitives::Address>()?).named("amount", alloy::primitives::U256::from(5)),
//!             None,
//!         )
//!         .await?;
//!     for event in &outcome.events {
//!         println!("{}", event.to_json());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod events;
pub mod rpc;
pub mod signer;
pub mod tx;

// Re-export main types for convenience
pub use abi::{Interface, InterfaceEntry};
pub use client::{ChainClient, TxOutcome};
pub use config::NetworkConfig;
pub use contract::{CallArgs, ContractBinding};
pub use error::{eyre, ContractError, Context, Report, Result};
pub use events::DecodedEvent;
pub use rpc::{ChainRpc, HttpRpc};
pub use signer::{LocalSigner, TransactionSigner};
pub use tx::UnsignedTransaction;
