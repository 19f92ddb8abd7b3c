//! RPC capability consumed by the contract surface.
//!
//! The binding and builder talk to the chain through the [`ChainRpc`] trait
//! rather than a concrete provider, so tests can substitute a mock and count
//! round trips. [`HttpRpc`] is the production implementation backed by an
//! alloy HTTP provider. Timeout and retry policy live in the transport, not
//! here.

use std::future::Future;
use std::sync::Arc;

use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::http::reqwest::Url;
use eyre::{Context, Result};

use crate::error::ContractError;
use crate::tx::UnsignedTransaction;

/// Read/write chain operations used by the SDK.
pub trait ChainRpc: Send + Sync {
    /// Execute a read-only call (`eth_call`) against a contract.
    fn call(
        &self,
        to: Address,
        data: Bytes,
    ) -> impl Future<Output = Result<Bytes, ContractError>> + Send;

    /// Current transaction count (nonce) of an address.
    fn transaction_count(
        &self,
        address: Address,
    ) -> impl Future<Output = Result<u64, ContractError>> + Send;

    /// Network id as reported on the wire (`net_version`, a decimal string).
    fn net_version(&self) -> impl Future<Output = Result<String, ContractError>> + Send;

    /// Current gas price in wei.
    fn gas_price(&self) -> impl Future<Output = Result<u128, ContractError>> + Send;

    /// Estimate the gas an unsigned transaction would consume.
    fn estimate_gas(
        &self,
        tx: &UnsignedTransaction,
    ) -> impl Future<Output = Result<u64, ContractError>> + Send;

    /// Native token balance of an address.
    fn balance(&self, address: Address)
        -> impl Future<Output = Result<U256, ContractError>> + Send;

    /// Broadcast a raw signed transaction, returning its hash.
    fn send_raw_transaction(
        &self,
        raw: Bytes,
    ) -> impl Future<Output = Result<TxHash, ContractError>> + Send;

    /// Fetch the receipt for a transaction, if mined.
    fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> impl Future<Output = Result<Option<TransactionReceipt>, ContractError>> + Send;
}

/// HTTP-backed [`ChainRpc`] implementation.
#[derive(Debug, Clone)]
pub struct HttpRpc {
    provider: Arc<RootProvider<Ethereum>>,
}

impl HttpRpc {
    /// Connect to an RPC endpoint.
    ///
    /// No fillers: nonce, gas, and chain id resolution are explicit in the
    /// transaction builder, and signing happens outside the provider.
    pub fn connect(rpc_url: &str) -> Result<Self> {
        let url: Url = rpc_url.parse().context("Invalid RPC URL")?;
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url);

        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    /// Access the underlying provider.
    pub fn provider(&self) -> &Arc<RootProvider<Ethereum>> {
        &self.provider
    }
}

impl ChainRpc for HttpRpc {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ContractError> {
        self.provider
            .call(TransactionRequest::default().to(to).input(data.into()))
            .await
            .map_err(|e| ContractError::network("eth_call", e))
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, ContractError> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(|e| ContractError::network("eth_getTransactionCount", e))
    }

    async fn net_version(&self) -> Result<String, ContractError> {
        // raw_request keeps the wire representation: net_version returns a
        // decimal string, and the builder owns the integer parse.
        self.provider
            .raw_request("net_version".into(), ())
            .await
            .map_err(|e| ContractError::network("net_version", e))
    }

    async fn gas_price(&self) -> Result<u128, ContractError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| ContractError::network("eth_gasPrice", e))
    }

    async fn estimate_gas(&self, tx: &UnsignedTransaction) -> Result<u64, ContractError> {
        let request = TransactionRequest::default()
            .from(tx.from)
            .to(tx.to)
            .value(tx.value)
            .input(tx.data.clone().into());

        self.provider
            .estimate_gas(request)
            .await
            .map_err(|e| ContractError::network("eth_estimateGas", e))
    }

    async fn balance(&self, address: Address) -> Result<U256, ContractError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ContractError::network("eth_getBalance", e))
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash, ContractError> {
        let pending = self
            .provider
            .send_raw_transaction(raw.as_ref())
            .await
            .map_err(|e| ContractError::network("eth_sendRawTransaction", e))?;

        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, ContractError> {
        self.provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| ContractError::network("eth_getTransactionReceipt", e))
    }
}
