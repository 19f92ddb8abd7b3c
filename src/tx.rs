//! Unsigned transaction record and assembly.
//!
//! [`assemble`] merges encoded call data with live chain state. Nonce and
//! chain id are fetched fresh on every build, never cached: a stale nonce
//! gets the transaction rejected, and a stale chain id risks cross-chain
//! replay. An `UnsignedTransaction` is consumed exactly once by a signing
//! capability; its nonce goes stale after that.

use alloy::consensus::TxLegacy;
use alloy::primitives::{Address, Bytes, TxKind, U256};

use crate::error::ContractError;
use crate::rpc::ChainRpc;

/// A fully resolved, not yet signed legacy transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    /// Sender address
    pub from: Address,
    /// Target contract address
    pub to: Address,
    /// Encoded calldata
    pub data: Bytes,
    /// Sender's transaction count at build time
    pub nonce: u64,
    /// Gas price in wei
    pub gas_price: u128,
    /// Chain id the transaction is valid on
    pub chain_id: u64,
    /// Transaction value in wei
    pub value: U256,
    /// Optional gas limit; filled by estimation or a configured default
    /// before signing
    pub gas: Option<u64>,
}

impl UnsignedTransaction {
    /// Set the transaction value.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Set the gas limit.
    pub fn with_gas_limit(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    /// Convert into a signable legacy transaction, using `default_gas` when
    /// no gas limit was set.
    pub fn to_legacy(&self, default_gas: u64) -> TxLegacy {
        TxLegacy {
            chain_id: Some(self.chain_id),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas.unwrap_or(default_gas),
            to: TxKind::Call(self.to),
            value: self.value,
            input: self.data.clone(),
        }
    }
}

/// Resolve chain state and assemble an unsigned transaction.
///
/// Issues exactly two read-only queries: the sender's transaction count and
/// the network's chain id. The chain id arrives as a decimal string on the
/// wire and must parse as an integer; anything else is
/// [`ContractError::InvalidChainId`]. Either query failing is
/// [`ContractError::NetworkQueryFailed`] and the caller must not proceed to
/// sign.
pub async fn assemble<R: ChainRpc>(
    rpc: &R,
    from: Address,
    to: Address,
    data: Bytes,
    gas_price: u128,
) -> Result<UnsignedTransaction, ContractError> {
    let nonce = rpc.transaction_count(from).await?;
    let version = rpc.net_version().await?;
    let chain_id = version
        .trim()
        .parse::<u64>()
        .map_err(|_| ContractError::InvalidChainId(version.clone()))?;

    Ok(UnsignedTransaction {
        from,
        to,
        data,
        nonce,
        gas_price,
        chain_id,
        value: U256::ZERO,
        gas: None,
    })
}
