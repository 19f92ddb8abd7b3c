//! ChainClient - transaction lifecycle orchestrator.
//!
//! Composes the contract binding, the signing capability, and the RPC
//! transport into the full write path: build unsigned transaction, sign,
//! broadcast, await the mined receipt, decode its events.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionReceipt;
use eyre::{Context, Result};

use crate::abi::Interface;
use crate::config::NetworkConfig;
use crate::contract::{CallArgs, ContractBinding};
use crate::error::ContractError;
use crate::events::DecodedEvent;
use crate::rpc::{ChainRpc, HttpRpc};
use crate::signer::TransactionSigner;

/// Result of a confirmed contract transaction.
#[derive(Debug)]
pub struct TxOutcome {
    /// Hash of the broadcast transaction
    pub tx_hash: TxHash,
    /// The mined receipt
    pub receipt: TransactionReceipt,
    /// Events decoded from the receipt, catalog-order grouped
    pub events: Vec<DecodedEvent>,
}

/// Client tying a signing identity to a network.
pub struct ChainClient<S: TransactionSigner> {
    signer: S,
    config: NetworkConfig,
    rpc: Arc<HttpRpc>,
}

impl<S: TransactionSigner> ChainClient<S> {
    /// Create a new client for the configured network.
    pub fn new(signer: S, config: NetworkConfig) -> Result<Self> {
        let rpc = HttpRpc::connect(&config.rpc_url)?;
        Ok(Self {
            signer,
            config,
            rpc: Arc::new(rpc),
        })
    }

    /// The signing identity's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The network configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Bind a deployed contract to an interface definition on this client's
    /// transport.
    pub fn bind(&self, address: Address, interface: Arc<Interface>) -> ContractBinding<HttpRpc> {
        ContractBinding::new(address, interface, Arc::clone(&self.rpc))
    }

    /// Native token balance of the signing identity.
    pub async fn eth_balance(&self) -> Result<U256> {
        self.rpc
            .balance(self.signer.address())
            .await
            .context("Failed to get balance")
    }

    // ========== Transaction Lifecycle ==========

    /// Execute a state-changing contract function end to end.
    ///
    /// Builds the unsigned transaction (fresh nonce and chain id), fills the
    /// gas limit by estimation (falling back to the configured default),
    /// signs through the identity's capability, broadcasts, awaits the mined
    /// receipt, and decodes its events.
    ///
    /// Callers issuing concurrent writes for the same identity must
    /// serialize them externally: two in-flight builds for one sender can
    /// observe the same nonce.
    pub async fn execute(
        &self,
        contract: &ContractBinding<HttpRpc>,
        function_name: &str,
        args: CallArgs,
        gas_price: Option<u128>,
    ) -> Result<TxOutcome> {
        let gas_price = match gas_price {
            Some(price) => price,
            None => self
                .rpc
                .gas_price()
                .await
                .context("Failed to fetch gas price")?,
        };

        let mut tx = contract
            .build_transaction(function_name, self.signer.address(), gas_price, args)
            .await
            .with_context(|| format!("Failed to build '{function_name}' transaction"))?;

        if tx.gas.is_none() {
            match contract.estimate_gas(&tx).await {
                Ok(estimate) => tx = tx.with_gas_limit(estimate),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        default = self.config.default_gas_limit,
                        "gas estimation failed, using configured default"
                    );
                    tx = tx.with_gas_limit(self.config.default_gas_limit);
                }
            }
        }

        let raw = self
            .signer
            .sign(&tx)
            .await
            .with_context(|| format!("Failed to sign '{function_name}' transaction"))?;

        let tx_hash = self
            .rpc
            .send_raw_transaction(raw)
            .await
            .context("Failed to broadcast transaction")?;
        tracing::info!(%tx_hash, function = function_name, "transaction submitted");

        let receipt = self.wait_for_receipt(tx_hash).await?;
        if !receipt.status() {
            tracing::warn!(%tx_hash, "transaction reverted");
        }

        let events = contract.process_receipt(&receipt);
        tracing::info!(%tx_hash, events = events.len(), "transaction confirmed");

        Ok(TxOutcome {
            tx_hash,
            receipt,
            events,
        })
    }

    /// Poll for a transaction's receipt until mined or the configured
    /// attempt budget runs out.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt> {
        for _ in 0..self.config.receipt_poll_attempts {
            let receipt = self
                .rpc
                .transaction_receipt(tx_hash)
                .await
                .context("Failed to get transaction receipt")?;

            if let Some(receipt) = receipt {
                return Ok(receipt);
            }

            tokio::time::sleep(self.config.receipt_poll_interval).await;
        }

        Err(ContractError::MissingReceipt(tx_hash).into())
    }
}
