//! Contract binding: a deployed address plus its interface.
//!
//! The binding is the single point of access to a contract's callable
//! surface. It is created once per interaction session and never mutated;
//! the interface is shared via `Arc` so the exact definition set that
//! encoded a call also decodes the matching receipt.

use std::sync::Arc;

use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt, Specifier};
use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes};
use alloy::rpc::types::TransactionReceipt;

use crate::abi::Interface;
use crate::error::ContractError;
use crate::events::{self, DecodedEvent};
use crate::rpc::ChainRpc;
use crate::tx::{self, UnsignedTransaction};

/// Positional and named arguments for a function invocation.
///
/// Positional values fill the leading declared inputs; named values fill the
/// rest by declared name. The combined shape must cover every input exactly
/// once.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    positional: Vec<DynSolValue>,
    named: Vec<(String, DynSolValue)>,
}

impl CallArgs {
    /// No arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<DynSolValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Append a named argument.
    pub fn named(mut self, name: impl Into<String>, value: impl Into<DynSolValue>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    /// Validate against a function's declared inputs and produce the values
    /// in declaration order.
    fn resolve(&self, function: &Function) -> Result<Vec<DynSolValue>, ContractError> {
        let expected = function.inputs.len();
        let supplied = self.positional.len() + self.named.len();
        let arity_error = || ContractError::ArityMismatch {
            function: function.name.clone(),
            expected,
            supplied,
        };

        if supplied != expected {
            return Err(arity_error());
        }

        let mut slots: Vec<Option<DynSolValue>> = vec![None; expected];
        for (index, value) in self.positional.iter().enumerate() {
            slots[index] = Some(value.clone());
        }

        for (name, value) in &self.named {
            let index = function
                .inputs
                .iter()
                .position(|input| &input.name == name)
                .ok_or_else(arity_error)?;
            // A named argument may not re-fill a positional slot.
            if slots[index].is_some() {
                return Err(arity_error());
            }
            slots[index] = Some(value.clone());
        }

        let mut values = Vec::with_capacity(expected);
        for (index, (slot, input)) in slots.into_iter().zip(&function.inputs).enumerate() {
            let value = slot.ok_or_else(arity_error)?;
            let ty = input.resolve()?;
            if !ty.matches(&value) {
                let argument = if input.name.is_empty() {
                    format!("arg{index}")
                } else {
                    input.name.clone()
                };
                return Err(ContractError::TypeMismatch {
                    argument,
                    expected: input.ty.clone(),
                });
            }
            values.push(value);
        }

        Ok(values)
    }
}

/// A deployed contract bound to its interface and an RPC capability.
#[derive(Debug, Clone)]
pub struct ContractBinding<R: ChainRpc> {
    address: Address,
    interface: Arc<Interface>,
    rpc: Arc<R>,
}

impl<R: ChainRpc> ContractBinding<R> {
    /// Bind a deployed contract address to its interface.
    pub fn new(address: Address, interface: Arc<Interface>, rpc: Arc<R>) -> Self {
        Self {
            address,
            interface,
            rpc,
        }
    }

    /// The bound contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The interface definition this binding was created with.
    pub fn interface(&self) -> &Arc<Interface> {
        &self.interface
    }

    /// Look up a function, validate the argument shape, and encode calldata.
    /// Purely local; issues no network traffic.
    fn encode_call(
        &self,
        function_name: &str,
        args: &CallArgs,
    ) -> Result<(Bytes, &Function), ContractError> {
        let function = self.interface.function(function_name)?;
        let values = args.resolve(function)?;
        let data = function.abi_encode_input(&values)?;
        Ok((data.into(), function))
    }

    /// Invoke a read-only function and decode its return value(s) per the
    /// declared output types.
    ///
    /// No state change, no gas, no signature; a single `eth_call` round
    /// trip.
    pub async fn call(
        &self,
        function_name: &str,
        args: CallArgs,
    ) -> Result<Vec<DynSolValue>, ContractError> {
        let (data, function) = self.encode_call(function_name, &args)?;
        let raw = self.rpc.call(self.address, data).await?;
        let decoded = function.abi_decode_output(&raw)?;
        Ok(decoded)
    }

    /// Build an unsigned transaction invoking a state-changing function.
    ///
    /// Lookup and argument validation happen before any network traffic;
    /// an unknown function costs zero round trips. Nonce and chain id are
    /// then fetched fresh (see [`tx::assemble`]).
    pub async fn build_transaction(
        &self,
        function_name: &str,
        from: Address,
        gas_price: u128,
        args: CallArgs,
    ) -> Result<UnsignedTransaction, ContractError> {
        let (data, _) = self.encode_call(function_name, &args)?;
        tx::assemble(self.rpc.as_ref(), from, self.address, data, gas_price).await
    }

    /// Estimate the gas an unsigned transaction would consume.
    pub async fn estimate_gas(&self, tx: &UnsignedTransaction) -> Result<u64, ContractError> {
        self.rpc.estimate_gas(tx).await
    }

    /// Decode every event in a receipt that belongs to this contract.
    ///
    /// Results are grouped by event type in catalog (declaration) order,
    /// then by log order within each type; logs from other contracts or
    /// unknown signatures are silently dropped. See
    /// [`events::decode_receipt`].
    pub fn process_receipt(&self, receipt: &TransactionReceipt) -> Vec<DecodedEvent> {
        events::decode_receipt(&self.interface, self.address, receipt)
    }
}
