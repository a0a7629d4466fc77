//! Ledger identifiers
//!
//! Account addresses, on-chain object handles and transaction hashes. All of
//! them travel as `0x`-prefixed hex strings on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum number of hex digits in an account or object address.
const MAX_ADDRESS_HEX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must start with 0x: {0}")]
    MissingPrefix(String),
    #[error("address is empty")]
    Empty,
    #[error("address is longer than 64 hex digits: {0}")]
    TooLong(String),
    #[error("invalid hex in {0}")]
    InvalidHex(String),
}

fn validate_hex_address(value: &str) -> Result<(), AddressError> {
    let body = value
        .strip_prefix("0x")
        .ok_or_else(|| AddressError::MissingPrefix(value.to_string()))?;
    if body.is_empty() {
        return Err(AddressError::Empty);
    }
    if body.len() > MAX_ADDRESS_HEX_LEN {
        return Err(AddressError::TooLong(value.to_string()));
    }
    // Short forms like 0x1 are legal, so pad to an even length before decoding.
    let padded = if body.len() % 2 == 1 {
        format!("0{}", body)
    } else {
        body.to_string()
    };
    hex::decode(padded).map_err(|_| AddressError::InvalidHex(value.to_string()))?;
    Ok(())
}

//-----------------------------------------------------------------------------
// Account Address
//-----------------------------------------------------------------------------

/// Address of a ledger account, as reported by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Parse and validate a user-supplied address.
    pub fn parse(value: &str) -> Result<Self, AddressError> {
        let value = value.trim();
        validate_hex_address(value)?;
        Ok(Self(value.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x1234…abcd` form used in tables.
    pub fn shorten(&self) -> String {
        if self.0.len() <= 12 {
            return self.0.clone();
        }
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//-----------------------------------------------------------------------------
// Object Handle
//-----------------------------------------------------------------------------

/// Address of an on-chain object (offer or borrow object) that a lending
/// function operates on. Copied verbatim from the off-chain record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectHandle(String);

impl ObjectHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Records sometimes carry an empty string instead of omitting the field.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//-----------------------------------------------------------------------------
// Transaction Hash
//-----------------------------------------------------------------------------

/// Hash returned by the wallet after broadcasting a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
