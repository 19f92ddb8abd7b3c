//! Transaction signer abstraction.
//!
//! The SDK never touches key storage, keystore encryption, or password
//! prompting: it consumes a capability that turns an unsigned transaction
//! into raw signed bytes. [`LocalSigner`] backs that capability with an
//! in-memory private key; hardware or remote signers implement the same
//! trait.

mod local;

pub use local::LocalSigner;

use std::future::Future;

use alloy::primitives::{Address, Bytes};

use crate::error::ContractError;
use crate::tx::UnsignedTransaction;

/// Capability for signing EVM transactions on behalf of an identity.
pub trait TransactionSigner: Send + Sync {
    /// Returns the identity's EVM address.
    fn address(&self) -> Address;

    /// Signs an unsigned transaction, returning the raw encoded signed
    /// transaction ready for `eth_sendRawTransaction`.
    fn sign(
        &self,
        tx: &UnsignedTransaction,
    ) -> impl Future<Output = Result<Bytes, ContractError>> + Send;
}
