//! Network configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{eyre, Result};

/// Connection and transaction-policy settings for one network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// RPC endpoint URL
    pub rpc_url: String,
    /// Gas limit used when estimation fails and the caller set none
    pub default_gas_limit: u64,
    /// How many times to poll for a receipt before giving up
    pub receipt_poll_attempts: u32,
    /// Delay between receipt polls
    pub receipt_poll_interval: Duration,
}

impl NetworkConfig {
    /// Configuration for a custom RPC endpoint with default policies.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            default_gas_limit: 300_000,
            // 60 attempts * 2 seconds = 2 minutes timeout
            receipt_poll_attempts: 60,
            receipt_poll_interval: Duration::from_secs(2),
        }
    }

    /// Ethereum mainnet via a public endpoint.
    pub fn mainnet() -> Self {
        Self::new("https://eth.llamarpc.com")
    }

    /// Sepolia testnet via a public endpoint.
    pub fn sepolia() -> Self {
        Self::new("https://ethereum-sepolia-rpc.publicnode.com")
    }

    /// Read the endpoint from the `RPC_URL` environment variable (loading a
    /// `.env` file if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let rpc_url = std::env::var("RPC_URL")
            .map_err(|_| eyre!("RPC_URL environment variable must be set"))?;
        Ok(Self::new(rpc_url))
    }

    /// Override the RPC endpoint.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    /// Override the fallback gas limit.
    pub fn with_default_gas_limit(mut self, gas_limit: u64) -> Self {
        self.default_gas_limit = gas_limit;
        self
    }

    /// Override the receipt polling policy.
    pub fn with_receipt_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.receipt_poll_attempts = attempts;
        self.receipt_poll_interval = interval;
        self
    }
}
