//! Contract interface model and loader.
//!
//! This crate works with ABIs loaded at runtime, so the interface is held as
//! data rather than generated with the `sol!` macro: an ordered list of
//! function and event entries plus name lookup tables. Declaration order is
//! preserved because event decoding walks the catalog in that order.

use std::collections::HashMap;

use alloy::dyn_abi::Specifier;
use alloy::json_abi::{AbiItem, Event, Function};

use crate::error::ContractError;

/// A single entry of a contract interface: a callable function or an
/// emittable event. Constructors, errors, and fallback/receive entries are
/// not part of the callable surface and are dropped at load time.
#[derive(Debug, Clone)]
pub enum InterfaceEntry {
    Function(Function),
    Event(Event),
}

impl InterfaceEntry {
    /// The declared ABI name of this entry.
    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Event(e) => &e.name,
        }
    }
}

/// A parsed, validated contract interface.
///
/// Immutable once loaded. Lookup by declared ABI name is an explicit table
/// rather than reflection; a miss is [`ContractError::UnknownFunction`] or
/// [`ContractError::UnknownEvent`]. When a name is overloaded the first
/// declaration wins and later overloads are unreachable by name.
#[derive(Debug, Clone)]
pub struct Interface {
    entries: Vec<InterfaceEntry>,
    functions: HashMap<String, usize>,
    events: HashMap<String, usize>,
}

impl Interface {
    /// Build an interface from already-parsed entries.
    ///
    /// Validates that every entry has a name and that every declared input
    /// type resolves to a concrete Solidity type.
    pub fn new(entries: Vec<InterfaceEntry>) -> Result<Self, ContractError> {
        let mut functions = HashMap::new();
        let mut events = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.name().is_empty() {
                return Err(ContractError::MalformedInterface(format!(
                    "entry #{index} has no name"
                )));
            }
            match entry {
                InterfaceEntry::Function(function) => {
                    validate_inputs(&function.name, &function.inputs)?;
                    functions.entry(function.name.clone()).or_insert(index);
                }
                InterfaceEntry::Event(event) => {
                    validate_inputs(&event.name, &event.inputs)?;
                    events.entry(event.name.clone()).or_insert(index);
                }
            }
        }

        Ok(Self {
            entries,
            functions,
            events,
        })
    }

    /// Parse a JSON ABI array into an interface.
    ///
    /// Parses into an ordered item list (not [`alloy::json_abi::JsonAbi`],
    /// which groups entries by name and loses declaration order).
    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        let items: Vec<AbiItem<'_>> = serde_json::from_str(json)
            .map_err(|e| ContractError::MalformedInterface(e.to_string()))?;

        let entries = items
            .into_iter()
            .filter_map(|item| match item {
                AbiItem::Function(f) => Some(InterfaceEntry::Function(f.into_owned())),
                AbiItem::Event(e) => Some(InterfaceEntry::Event(e.into_owned())),
                _ => None,
            })
            .collect();

        Self::new(entries)
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[InterfaceEntry] {
        &self.entries
    }

    /// Look up a function by its declared ABI name.
    pub fn function(&self, name: &str) -> Result<&Function, ContractError> {
        match self.functions.get(name).map(|&i| &self.entries[i]) {
            Some(InterfaceEntry::Function(f)) => Ok(f),
            _ => Err(ContractError::UnknownFunction(name.to_string())),
        }
    }

    /// Look up an event by its declared ABI name.
    pub fn event(&self, name: &str) -> Result<&Event, ContractError> {
        match self.events.get(name).map(|&i| &self.entries[i]) {
            Some(InterfaceEntry::Event(e)) => Ok(e),
            _ => Err(ContractError::UnknownEvent(name.to_string())),
        }
    }

    /// The event catalog in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter().filter_map(|entry| match entry {
            InterfaceEntry::Event(e) => Some(e),
            _ => None,
        })
    }

    /// The declared functions in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.entries.iter().filter_map(|entry| match entry {
            InterfaceEntry::Function(f) => Some(f),
            _ => None,
        })
    }
}

// Tuple/struct params carry their element types in `components`, so
// resolution goes through `Specifier` rather than type-string parsing.
fn validate_inputs<P>(name: &str, params: &[P]) -> Result<(), ContractError>
where
    P: Specifier<alloy::dyn_abi::DynSolType>,
{
    for param in params {
        param.resolve().map_err(|e| {
            ContractError::MalformedInterface(format!(
                "entry '{name}' has an unresolvable input type: {e}"
            ))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERC20_ABI: &str = r#"[
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
            "type": "function",
            "name": "balanceOf",
            "inputs": [{"name": "account", "type": "address"}],
            "outputs": [{"name": "", "type": "uint256"}],
            "stateMutability": "view"
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
        },
        {
            "type": "event",
            "name": "Approval",
            "inputs": [
                {"name": "owner", "type": "address", "indexed": true},
                {"name": "spender", "type": "address", "indexed": true},
                {"name": "value", "type": "uint256", "indexed": false}
            ],
            "anonymous": false
        }
    ]"#;

    #[test]
    fn parses_functions_and_events_in_declaration_order() {
        let interface = Interface::from_json(ERC20_ABI).unwrap();
        assert_eq!(interface.entries().len(), 4);

        let functions: Vec<_> = interface.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, ["transfer", "balanceOf"]);

        let events: Vec<_> = interface.events().map(|e| e.name.as_str()).collect();
        assert_eq!(events, ["Transfer", "Approval"]);
    }

    #[test]
    fn function_lookup_by_name() {
        let interface = Interface::from_json(ERC20_ABI).unwrap();
        let transfer = interface.function("transfer").unwrap();
        assert_eq!(transfer.inputs.len(), 2);
        assert_eq!(transfer.inputs[0].name, "to");

        let err = interface.function("mint").unwrap_err();
        assert!(matches!(err, ContractError::UnknownFunction(name) if name == "mint"));
    }

    #[test]
    fn event_lookup_does_not_see_functions() {
        let interface = Interface::from_json(ERC20_ABI).unwrap();
        assert!(interface.event("Transfer").is_ok());
        let err = interface.event("transfer").unwrap_err();
        assert!(matches!(err, ContractError::UnknownEvent(_)));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = Interface::from_json("not json").unwrap_err();
        assert!(matches!(err, ContractError::MalformedInterface(_)));
    }

    #[test]
    fn rejects_entry_without_name() {
        let abi = r#"[{"type": "function", "name": "", "inputs": [], "outputs": [], "stateMutability": "view"}]"#;
        let err = Interface::from_json(abi).unwrap_err();
        assert!(matches!(err, ContractError::MalformedInterface(_)));
    }

    #[test]
    fn rejects_unresolvable_input_type() {
        let abi = r#"[{
            "type": "function",
            "name": "broken",
            "inputs": [{"name": "x", "type": "uint257"}],
            "outputs": [],
            "stateMutability": "view"
        }]"#;
        let err = Interface::from_json(abi).unwrap_err();
        assert!(matches!(err, ContractError::MalformedInterface(_)));
    }

    #[test]
    fn first_declaration_wins_for_overloads() {
        let abi = r#"[
            {
                "type": "function",
                "name": "withdraw",
                "inputs": [{"name": "amount", "type": "uint256"}],
                "outputs": [],
                "stateMutability": "nonpayable"
            },
            {
                "type": "function",
                "name": "withdraw",
                "inputs": [],
                "outputs": [],
                "stateMutability": "nonpayable"
            }
        ]"#;
        let interface = Interface::from_json(abi).unwrap();
        assert_eq!(interface.function("withdraw").unwrap().inputs.len(), 1);
    }

    #[test]
    fn skips_constructor_and_error_entries() {
        let abi = r#"[
            {"type": "constructor", "inputs": [], "stateMutability": "nonpayable"},
            {"type": "error", "name": "Unauthorized", "inputs": []},
            {
                "type": "function",
                "name": "owner",
                "inputs": [],
                "outputs": [{"name": "", "type": "address"}],
                "stateMutability": "view"
            }
        ]"#;
        let interface = Interface::from_json(abi).unwrap();
        assert_eq!(interface.entries().len(), 1);
        assert!(interface.function("owner").is_ok());
    }
}
