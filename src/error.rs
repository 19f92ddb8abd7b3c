//! Error types for the chaincall SDK.
//!
//! The contract surface returns the typed [`ContractError`] taxonomy so
//! callers can match on lookup misses, argument-shape problems, and network
//! failures. The orchestration layer (`client`) wraps these with `eyre`
//! context.

use alloy::primitives::TxHash;
use alloy::transports::TransportError;
use thiserror::Error;

pub use eyre::{eyre, Context, Report, Result};

/// Errors surfaced by the contract binding, transaction builder, interface
/// loader, and signer.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The requested function name is not declared in the contract interface.
    #[error("function '{0}' not found in contract interface")]
    UnknownFunction(String),

    /// The requested event name is not declared in the contract interface.
    #[error("event '{0}' not found in contract interface")]
    UnknownEvent(String),

    /// The supplied arguments do not line up with the function's declared
    /// inputs: wrong count, a duplicate slot, or an unknown name.
    #[error("function '{function}' expects {expected} argument(s), got {supplied}")]
    ArityMismatch {
        function: String,
        expected: usize,
        supplied: usize,
    },

    /// A supplied argument value does not match the declared input type.
    #[error("argument '{argument}' does not match declared type '{expected}'")]
    TypeMismatch { argument: String, expected: String },

    /// The raw interface description failed to parse or validate.
    #[error("malformed contract interface: {0}")]
    MalformedInterface(String),

    /// The network returned a chain id that is not parseable as an integer.
    #[error("chain id '{0}' is not an integer")]
    InvalidChainId(String),

    /// A read-only RPC query (call, nonce, chain id, gas) failed.
    #[error("network query '{op}' failed: {source}")]
    NetworkQueryFailed {
        op: &'static str,
        #[source]
        source: TransportError,
    },

    /// ABI encoding or decoding failed after lookup and validation passed.
    #[error("abi coding failed: {0}")]
    Abi(#[from] alloy::dyn_abi::Error),

    /// The signing capability rejected the transaction.
    #[error("signing failed: {0}")]
    Signing(String),

    /// No receipt appeared for a broadcast transaction within the polling
    /// budget.
    #[error("transaction receipt not found after timeout: {0}")]
    MissingReceipt(TxHash),
}

impl ContractError {
    /// Wrap a transport error from a named RPC operation.
    pub fn network(op: &'static str, source: TransportError) -> Self {
        Self::NetworkQueryFailed { op, source }
    }
}
