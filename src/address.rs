//! Address extraction from deployment files.
//!
//! Two file shapes are understood: free text containing an address somewhere
//! (`compile` mode) and a single `KEY=VALUE` line (`consolidate` mode).

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `0x` + 40 hex anywhere in free text
static PREFIXED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x([0-9a-fA-F]{40})").unwrap());

/// Bare 40-hex token, only consulted when no prefixed address exists
static BARE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9a-fA-F]{40})\b").unwrap());

/// Whole-value match used when the value must be nothing but an address.
static STRICT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:0x)?([0-9a-fA-F]{40})$").unwrap());

/// Errors produced when a value cannot be read as an address
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Empty address value")]
    Empty,

    #[error("Malformed address: {value}")]
    Malformed { value: String },
}

/// A 20-byte address, stored as the 40 hex digits found in the source.
///
/// Case is kept as written so repeated runs reproduce the input exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    hex: String,
}

impl Address {
    fn from_digits(digits: &str) -> Self {
        Address {
            hex: digits.to_string(),
        }
    }

    /// The 40 hex digits without prefix
    pub fn digits(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.hex)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AddressError::Empty);
        }
        STRICT_PATTERN
            .captures(value)
            .and_then(|caps| caps.get(1))
            .map(|m| Address::from_digits(m.as_str()))
            .ok_or_else(|| AddressError::Malformed {
                value: value.to_string(),
            })
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One resolved entry of a consolidation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub name: String,
    pub address: Address,
    /// Key label from a `KEY=VALUE` file, if the file had one
    pub source_key: Option<String>,
}

impl AddressRecord {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        AddressRecord {
            name: name.into(),
            address,
            source_key: None,
        }
    }

    pub fn with_key(name: impl Into<String>, address: Address, key: impl Into<String>) -> Self {
        AddressRecord {
            name: name.into(),
            address,
            source_key: Some(key.into()),
        }
    }
}

/// Find the first address anywhere in `content`.
///
/// A `0x`-prefixed address always wins over a bare 40-hex token, even one
/// that appears earlier (commit hashes in deploy logs are bare).
pub fn extract_address(content: &str) -> Option<Address> {
    PREFIXED_PATTERN
        .captures(content)
        .or_else(|| BARE_PATTERN.captures(content))
        .and_then(|caps| caps.get(1))
        .map(|m| Address::from_digits(m.as_str()))
}

/// Parse `KEY=VALUE` content into its key and address.
///
/// The split happens at the first `=`. Returns `None` when either side is
/// empty or the value is not an address.
pub fn parse_key_value(content: &str) -> Option<(String, Address)> {
    let (key, value) = content.trim().split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let address = value.parse::<Address>().ok()?;
    Some((key.to_string(), address))
}
