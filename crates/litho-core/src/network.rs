//! Predefined Lithosphere network identities.
//!
//! A client resolves at most one [`NetworkIdentity`], either from a network
//! label at construction time, or by exact RPC URL match afterwards. Clients
//! built from any other URL run in "custom RPC" mode with no identity.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ==============================================================================
// Network Name
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkName {
    Mainnet,
    Staging,
    Devnet,
    Local,
}

impl NetworkName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Staging => "staging",
            Self::Devnet => "devnet",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for NetworkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkName {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "staging" => Ok(Self::Staging),
            "devnet" => Ok(Self::Devnet),
            "local" => Ok(Self::Local),
            other => Err(UnknownNetwork(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network `{0}`; expected mainnet, staging, devnet or local")]
pub struct UnknownNetwork(pub String);

// ==============================================================================
// Network Identity
// ==============================================================================

/// Native currency metadata of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkIdentity {
    pub name: NetworkName,
    pub chain_id: u64,
    pub rpc_url: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<&'static str>,
    pub currency: Currency,
}

/// Native currency of every Lithosphere network; custom RPC endpoints are
/// assumed to use it too.
pub const NATIVE_CURRENCY: Currency = Currency {
    name: "Lithosphere",
    symbol: "LITHO",
    decimals: 18,
};

pub static NETWORKS: [NetworkIdentity; 4] = [
    NetworkIdentity {
        name: NetworkName::Mainnet,
        chain_id: 999,
        rpc_url: "https://mainnet.lithosphere.network/rpc",
        explorer_url: Some("https://explorer.lithosphere.network"),
        currency: NATIVE_CURRENCY,
    },
    NetworkIdentity {
        name: NetworkName::Staging,
        chain_id: 1001,
        rpc_url: "https://staging.lithosphere.network/rpc",
        explorer_url: Some("https://staging-explorer.lithosphere.network"),
        currency: NATIVE_CURRENCY,
    },
    NetworkIdentity {
        name: NetworkName::Devnet,
        chain_id: 1000,
        rpc_url: "https://devnet.lithosphere.network/rpc",
        explorer_url: Some("https://devnet-explorer.lithosphere.network"),
        currency: NATIVE_CURRENCY,
    },
    NetworkIdentity {
        name: NetworkName::Local,
        chain_id: 31337,
        rpc_url: "http://localhost:8545",
        explorer_url: None,
        currency: NATIVE_CURRENCY,
    },
];

impl NetworkIdentity {
    pub fn by_name(name: NetworkName) -> &'static NetworkIdentity {
        let index = match name {
            NetworkName::Mainnet => 0,
            NetworkName::Staging => 1,
            NetworkName::Devnet => 2,
            NetworkName::Local => 3,
        };
        &NETWORKS[index]
    }

    /// Exact, case-sensitive match on the RPC URL.
    pub fn by_rpc_url(rpc_url: &str) -> Option<&'static NetworkIdentity> {
        NETWORKS.iter().find(|network| network.rpc_url == rpc_url)
    }
}
