//! Agent name normalization and address derivation.
//!
//! # Canonical names
//!
//! The canonical name is the lower-cased agent name. It is only valid when
//! every character is an ASCII letter or digit, which rules out separators,
//! whitespace and unicode look-alikes.
//!
//! # Addresses
//!
//! An address is derived as follows:
//! 1. Take the canonical name
//! 2. Take the first 8 characters of the public key hex, as submitted
//! 3. Join them as `RTC-<name>-<prefix>`
//!
//! The address is a convenience handle. It is not collision resistant and
//! must not be used as a security token.
//!
//! # Example
//!
//! ```
//! use agent_registry_core::identity::{DerivedAddress, NormalizedIdentity};
//!
//! let identity = NormalizedIdentity::normalize("Node7").unwrap();
//! assert_eq!(identity.canonical_name(), "node7");
//!
//! let address = DerivedAddress::derive(&identity, "0a1b2c3d4e5f");
//! assert_eq!(address.as_str(), "RTC-node7-0a1b2c3d");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of public key hex characters carried into an address.
pub const ADDRESS_KEY_PREFIX_LEN: usize = 8;

/// Address prefix shared by every registered agent.
pub const ADDRESS_PREFIX: &str = "RTC";

/// Error returned when an agent name cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("agent name is empty")]
    Empty,

    #[error("agent name must be alphanumeric")]
    NotAlphanumeric,
}

/// Canonical form of a claimed agent name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedIdentity {
    canonical_name: String,
}

impl NormalizedIdentity {
    /// Lower-case `agent_name` and check that it is pure ASCII alphanumeric.
    pub fn normalize(agent_name: &str) -> Result<Self, NameError> {
        if agent_name.is_empty() {
            return Err(NameError::Empty);
        }

        // Checked before lowering: some non-ASCII letters lower-case to ASCII.
        if !agent_name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(NameError::NotAlphanumeric);
        }

        Ok(Self {
            canonical_name: agent_name.to_ascii_lowercase(),
        })
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn into_canonical_name(self) -> String {
        self.canonical_name
    }
}

/// Network address issued to an admitted agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedAddress(String);

impl DerivedAddress {
    /// Derive the address for `identity` from its public key hex.
    ///
    /// A key shorter than the prefix length contributes all of its
    /// characters.
    pub fn derive(identity: &NormalizedIdentity, public_key_hex: &str) -> Self {
        let key_prefix: String = public_key_hex
            .chars()
            .take(ADDRESS_KEY_PREFIX_LEN)
            .collect();
        DerivedAddress(format!(
            "{}-{}-{}",
            ADDRESS_PREFIX,
            identity.canonical_name(),
            key_prefix
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DerivedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
