//! # Addresses & Validator Keys
//!
//! Two fixed-length identifiers with protocol-prefixed hex renderings:
//!
//! - [`Address`] — a 20-byte account identifier, the trailing 20 bytes of
//!   `keccak256(uncompressed_pubkey[1..])`. Text form `Mx` + 40 hex chars.
//! - [`ValidatorPublicKey`] — a 32-byte consensus key used by candidacy and
//!   staking operations. Text form `Mp` + 64 hex chars. Opaque to this
//!   crate: validators produce it, transactions carry it.
//!
//! An address is a pure function of the public key. Same key, same address,
//! every time, on every machine.

use crate::config::{
    ADDRESS_LENGTH, ADDRESS_PREFIX, VALIDATOR_KEY_LENGTH, VALIDATOR_KEY_PREFIX,
};
use crate::crypto::{keccak256, PublicKey};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a textual address or validator key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The string does not start with the required protocol prefix.
    #[error("missing `{0}` prefix")]
    MissingPrefix(&'static str),

    /// The hex part is malformed or the wrong length.
    #[error("invalid hex payload: expected {0} hex characters")]
    InvalidHex(usize),
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account address, rendered as `Mx` + lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Wraps raw address bytes.
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derives the address of a public key: keccak-256 over the 64-byte
    /// uncompressed point (SEC1 prefix stripped), keep the trailing 20.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let digest = keccak256(&public_key.uncompressed_bytes()[1..]);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest[12..]);
        Self(bytes)
    }

    /// The raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = s
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or(AddressError::MissingPrefix(ADDRESS_PREFIX))?;
        let bytes =
            hex::decode(payload).map_err(|_| AddressError::InvalidHex(ADDRESS_LENGTH * 2))?;
        let arr: [u8; ADDRESS_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidHex(ADDRESS_LENGTH * 2))?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ADDRESS_PREFIX, hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ValidatorPublicKey
// ---------------------------------------------------------------------------

/// A validator's 32-byte consensus public key, rendered as `Mp` + hex.
///
/// Not a secp256k1 key — validators run a different signature scheme for
/// consensus, and this crate treats the value as opaque bytes to put on the
/// wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatorPublicKey([u8; VALIDATOR_KEY_LENGTH]);

impl ValidatorPublicKey {
    /// Wraps raw key bytes.
    pub fn from_bytes(bytes: [u8; VALIDATOR_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; VALIDATOR_KEY_LENGTH] {
        &self.0
    }
}

impl FromStr for ValidatorPublicKey {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = s
            .strip_prefix(VALIDATOR_KEY_PREFIX)
            .ok_or(AddressError::MissingPrefix(VALIDATOR_KEY_PREFIX))?;
        let bytes =
            hex::decode(payload).map_err(|_| AddressError::InvalidHex(VALIDATOR_KEY_LENGTH * 2))?;
        let arr: [u8; VALIDATOR_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidHex(VALIDATOR_KEY_LENGTH * 2))?;
        Ok(Self(arr))
    }
}

impl fmt::Display for ValidatorPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", VALIDATOR_KEY_PREFIX, hex::encode(self.0))
    }
}

impl fmt::Debug for ValidatorPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidatorPublicKey({self})")
    }
}

impl Serialize for ValidatorPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ValidatorPublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
