//! Receipt log decoding against a contract interface.
//!
//! Decoding is a pure function of `(interface, receipt)`: no network, no
//! state across calls. A receipt can carry logs from every contract touched
//! by the transaction, so logs that belong to another address, match no
//! declared event signature, or fail to decode are silently dropped rather
//! than surfaced.

use alloy::dyn_abi::{DynSolValue, EventExt};
use alloy::json_abi::Event;
use alloy::primitives::{Address, Log as RawLog};
use alloy::rpc::types::{Log, TransactionReceipt};

use crate::abi::Interface;

/// A single decoded event: its declared name and its arguments in
/// declaration order, reassembled from the log's indexed topics and data.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    /// The event's declared ABI name.
    pub name: String,
    /// Argument name/value pairs in declaration order. Unnamed parameters
    /// get positional `arg{n}` names.
    pub args: Vec<(String, DynSolValue)>,
}

impl DecodedEvent {
    /// Look up an argument by name.
    pub fn arg(&self, name: &str) -> Option<&DynSolValue> {
        self.args
            .iter()
            .find(|(arg_name, _)| arg_name == name)
            .map(|(_, value)| value)
    }

    /// Display-friendly JSON projection for CLI layers.
    pub fn to_json(&self) -> serde_json::Value {
        let args: serde_json::Map<String, serde_json::Value> = self
            .args
            .iter()
            .map(|(name, value)| (name.clone(), value_to_json(value)))
            .collect();

        serde_json::json!({ "event": self.name, "args": args })
    }
}

/// Decode every event in `receipt` that belongs to the contract at `address`
/// per `interface`.
///
/// Ordering: results are grouped by event type in catalog (declaration)
/// order, then by original log order within each type. A receipt with logs
/// `[EventB, EventA]` and catalog `[EventA, EventB]` decodes to
/// `[EventA, EventB]`. Callers that need strict receipt-log chronological
/// order across event types must sort by log position themselves.
pub fn decode_receipt(
    interface: &Interface,
    address: Address,
    receipt: &TransactionReceipt,
) -> Vec<DecodedEvent> {
    decode_logs(interface, address, receipt.inner.logs())
}

/// Decode a raw log sequence. See [`decode_receipt`] for the ordering
/// contract.
pub fn decode_logs(interface: &Interface, address: Address, logs: &[Log]) -> Vec<DecodedEvent> {
    let mut decoded = Vec::new();

    // Per-event-type pass over the whole log list: each candidate decode is
    // independently skippable, so one malformed log never aborts the rest.
    for event in interface.events() {
        if event.anonymous {
            // No topic-0 signature to match on.
            continue;
        }
        let selector = event.selector();

        for log in logs {
            if log.address() != address {
                continue;
            }
            if log.topics().first() != Some(&selector) {
                continue;
            }
            match decode_log(event, &log.inner) {
                Some(record) => decoded.push(record),
                None => {
                    tracing::debug!(
                        event = %event.name,
                        "log matched signature but failed to decode, skipping"
                    );
                }
            }
        }
    }

    decoded
}

fn decode_log(event: &Event, log: &RawLog) -> Option<DecodedEvent> {
    let decoded = event
        .decode_log_parts(log.data.topics().iter().copied(), log.data.data.as_ref())
        .ok()?;

    // Indexed values decode from topics, the rest from the data section, and
    // declaration order may interleave the two.
    let mut indexed = decoded.indexed.into_iter();
    let mut body = decoded.body.into_iter();

    let mut args = Vec::with_capacity(event.inputs.len());
    for (position, input) in event.inputs.iter().enumerate() {
        let value = if input.indexed {
            indexed.next()?
        } else {
            body.next()?
        };
        let name = if input.name.is_empty() {
            format!("arg{position}")
        } else {
            input.name.clone()
        };
        args.push((name, value));
    }

    Some(DecodedEvent {
        name: event.name.clone(),
        args,
    })
}

fn value_to_json(value: &DynSolValue) -> serde_json::Value {
    match value {
        DynSolValue::Address(addr) => serde_json::Value::String(addr.to_checksum(None)),
        DynSolValue::Uint(num, _) => serde_json::Value::String(num.to_string()),
        DynSolValue::Int(num, _) => serde_json::Value::String(num.to_string()),
        DynSolValue::Bool(b) => serde_json::Value::Bool(*b),
        DynSolValue::String(s) => serde_json::Value::String(s.clone()),
        DynSolValue::Bytes(bytes) => {
            serde_json::Value::String(alloy::hex::encode_prefixed(bytes))
        }
        DynSolValue::FixedBytes(word, len) => {
            serde_json::Value::String(alloy::hex::encode_prefixed(&word[..*len]))
        }
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            serde_json::Value::Array(items.iter().map(value_to_json).collect())
        }
        other => serde_json::Value::String(format!("{other:?}")),
    }
}
