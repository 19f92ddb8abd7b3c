//! Local private key signer implementation.

use alloy::consensus::{SignableTransaction, TxEnvelope};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes};
use alloy::signers::local::PrivateKeySigner;
use eyre::{Context, Result};

use super::TransactionSigner;
use crate::error::ContractError;
use crate::tx::UnsignedTransaction;

// Used when neither estimation nor the caller supplied a gas limit.
const FALLBACK_GAS_LIMIT: u64 = 300_000;

/// Signer holding a decrypted private key in memory.
///
/// Key material arrives already decrypted; loading it from a keystore file
/// or prompting for a password is the caller's concern.
pub struct LocalSigner {
    signer: PrivateKeySigner,
    address: Address,
}

impl LocalSigner {
    /// Create a signer from a hex-encoded private key (with or without the
    /// 0x prefix).
    pub fn from_private_key(private_key: impl AsRef<str>) -> Result<Self> {
        let key = private_key.as_ref().trim();
        let key = key.strip_prefix("0x").unwrap_or(key);

        let signer: PrivateKeySigner = key.parse().context("Failed to parse private key")?;
        let address = signer.address();

        Ok(Self { signer, address })
    }
}

impl TransactionSigner for LocalSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign(&self, tx: &UnsignedTransaction) -> Result<Bytes, ContractError> {
        let mut legacy = tx.to_legacy(FALLBACK_GAS_LIMIT);
        let signature = self
            .signer
            .sign_transaction_sync(&mut legacy)
            .map_err(|e| ContractError::Signing(e.to_string()))?;

        let envelope = TxEnvelope::Legacy(legacy.into_signed(signature));
        Ok(envelope.encoded_2718().into())
    }
}
