//! # Transaction Vocabulary
//!
//! The small value types every transaction is spelled with: the operation
//! tag, the chain selector, the signature-mode discriminator, and coin
//! symbols. Kept `Copy`-friendly where possible — these travel through every
//! encode and decode call.

use crate::config::{COIN_SYMBOL_MAX_LENGTH, COIN_SYMBOL_MIN_LENGTH};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::SchemaError;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Discriminant for the operation a transaction performs.
///
/// The tag value is consensus-critical: it is the `type` field on the wire
/// and selects which field schema the `data` payload must follow. Adding an
/// operation means adding a variant here and a schema in `data/` — the
/// envelope never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TransactionType {
    /// Direct coin transfer to one recipient.
    Send = 0x01,
    /// Market sell: fixed input amount, minimum acceptable output.
    SellCoin = 0x02,
    /// Market sell of the sender's entire balance of a coin.
    SellAllCoins = 0x03,
    /// Market buy: fixed output amount, maximum acceptable input.
    BuyCoin = 0x04,
    /// Issue a brand-new coin with a reserve and CRR.
    CreateCoin = 0x05,
    /// Declare validator candidacy.
    DeclareCandidacy = 0x06,
    /// Delegate stake to a validator.
    Delegate = 0x07,
    /// Unbond previously delegated stake.
    Unbond = 0x08,
    /// Redeem a signed off-chain check.
    RedeemCheck = 0x09,
    /// Switch a candidate on (eligible for block rewards).
    SetCandidateOn = 0x0A,
    /// Switch a candidate off.
    SetCandidateOff = 0x0B,
    /// Create a multisig account from weighted participant addresses.
    CreateMultisig = 0x0C,
    /// Batched transfer to many recipients in one transaction.
    Multisend = 0x0D,
    /// Edit a candidate's reward and owner addresses.
    EditCandidate = 0x0E,
}

impl TransactionType {
    /// The wire tag.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Looks a tag up, returning `None` for anything the protocol does not
    /// define.
    pub fn from_tag(tag: u64) -> Option<Self> {
        Some(match tag {
            0x01 => Self::Send,
            0x02 => Self::SellCoin,
            0x03 => Self::SellAllCoins,
            0x04 => Self::BuyCoin,
            0x05 => Self::CreateCoin,
            0x06 => Self::DeclareCandidacy,
            0x07 => Self::Delegate,
            0x08 => Self::Unbond,
            0x09 => Self::RedeemCheck,
            0x0A => Self::SetCandidateOn,
            0x0B => Self::SetCandidateOff,
            0x0C => Self::CreateMultisig,
            0x0D => Self::Multisend,
            0x0E => Self::EditCandidate,
            _ => return None,
        })
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Send => "Send",
            Self::SellCoin => "SellCoin",
            Self::SellAllCoins => "SellAllCoins",
            Self::BuyCoin => "BuyCoin",
            Self::CreateCoin => "CreateCoin",
            Self::DeclareCandidacy => "DeclareCandidacy",
            Self::Delegate => "Delegate",
            Self::Unbond => "Unbond",
            Self::RedeemCheck => "RedeemCheck",
            Self::SetCandidateOn => "SetCandidateOn",
            Self::SetCandidateOff => "SetCandidateOff",
            Self::CreateMultisig => "CreateMultisig",
            Self::Multisend => "Multisend",
            Self::EditCandidate => "EditCandidate",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// ChainId
// ---------------------------------------------------------------------------

/// Which network a transaction is bound to. Part of the signing digest, so
/// a testnet transaction can never be replayed on mainnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChainId {
    /// The production network.
    Mainnet = 1,
    /// The test network.
    Testnet = 2,
}

impl ChainId {
    /// The wire value.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Looks a chain id up; unknown ids are rejected at decode time.
    pub fn from_value(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Mainnet),
            2 => Some(Self::Testnet),
            _ => None,
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => f.write_str("mainnet"),
            Self::Testnet => f.write_str("testnet"),
        }
    }
}

// ---------------------------------------------------------------------------
// SignatureType
// ---------------------------------------------------------------------------

/// Single-key or multisig signing mode. Part of the signed bytes: a signer
/// commits to the mode, not just the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureType {
    /// One sender, one recoverable signature.
    Single = 0x01,
    /// A multisig account with up to 32 indexed co-signers.
    Multi = 0x02,
}

impl SignatureType {
    /// The wire value.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Looks a discriminator up; only the two known values exist.
    pub fn from_value(value: u64) -> Option<Self> {
        match value {
            0x01 => Some(Self::Single),
            0x02 => Some(Self::Multi),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// CoinSymbol
// ---------------------------------------------------------------------------

/// A coin ticker: 1 to 10 bytes of printable ASCII, exact length on the
/// wire.
///
/// Validated at construction and again at decode time — an out-of-range
/// symbol fails, it is never truncated or padded. (The wire carries the
/// exact bytes; there is no fixed-width padding anywhere.)
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoinSymbol(String);

impl CoinSymbol {
    /// Validates and wraps a ticker string.
    pub fn new(symbol: impl Into<String>) -> Result<Self, SchemaError> {
        let symbol = symbol.into();
        let len = symbol.len();
        if !(COIN_SYMBOL_MIN_LENGTH..=COIN_SYMBOL_MAX_LENGTH).contains(&len)
            || !symbol.bytes().all(|b| b.is_ascii_graphic())
        {
            return Err(SchemaError::InvalidCoinSymbol(symbol));
        }
        Ok(Self(symbol))
    }

    /// The network's base coin, `MNT`.
    pub fn base_coin() -> Self {
        Self("MNT".to_string())
    }

    /// Validates raw wire bytes into a symbol.
    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self, SchemaError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| SchemaError::InvalidCoinSymbol(hex::encode(bytes)))?;
        Self::new(text)
    }

    /// The ticker text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The exact bytes that go on the wire.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for CoinSymbol {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CoinSymbol {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CoinSymbol> for String {
    fn from(symbol: CoinSymbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for CoinSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for CoinSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoinSymbol({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Amount helpers
// ---------------------------------------------------------------------------

/// The base coin carries 18 decimal places, like wei.
pub const COIN_DECIMALS: u32 = 18;

/// Converts a whole-coin count into base units (`n * 10^18`).
///
/// Purely a convenience for building transactions and tests; the wire and
/// every signature operate on base units only. No floating point anywhere
/// near money.
pub fn to_base_units(whole_coins: u64) -> BigUint {
    BigUint::from(whole_coins) * BigUint::from(10u64).pow(COIN_DECIMALS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_roundtrips() {
        for tag in 0x01..=0x0E {
            let ty = TransactionType::from_tag(tag).unwrap();
            assert_eq!(u64::from(ty.tag()), tag);
        }
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert_eq!(TransactionType::from_tag(0x00), None);
        assert_eq!(TransactionType::from_tag(0x0F), None);
        assert_eq!(TransactionType::from_tag(0xFF), None);
    }

    #[test]
    fn chain_id_values() {
        assert_eq!(ChainId::Mainnet.value(), 1);
        assert_eq!(ChainId::Testnet.value(), 2);
        assert_eq!(ChainId::from_value(3), None);
    }

    #[test]
    fn signature_type_values() {
        assert_eq!(SignatureType::from_value(1), Some(SignatureType::Single));
        assert_eq!(SignatureType::from_value(2), Some(SignatureType::Multi));
        assert_eq!(SignatureType::from_value(0), None);
        assert_eq!(SignatureType::from_value(3), None);
    }

    #[test]
    fn coin_symbol_accepts_boundary_lengths() {
        assert!(CoinSymbol::new("A").is_ok());
        assert!(CoinSymbol::new("ABCDEFGHIJ").is_ok());
    }

    #[test]
    fn coin_symbol_rejects_out_of_range() {
        assert!(CoinSymbol::new("").is_err());
        assert!(CoinSymbol::new("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn coin_symbol_rejects_non_printable() {
        assert!(CoinSymbol::new("MN\0").is_err());
        assert!(CoinSymbol::new("MN T").is_err());
    }

    #[test]
    fn coin_symbol_wire_bytes_are_exact() {
        let symbol = CoinSymbol::new("MNT").unwrap();
        assert_eq!(symbol.as_bytes(), b"MNT");
        assert_eq!(CoinSymbol::from_wire_bytes(b"MNT").unwrap(), symbol);
        // Zero-padded symbols from other encodings do not decode.
        assert!(CoinSymbol::from_wire_bytes(b"MNT\0\0\0\0\0\0\0").is_err());
    }

    #[test]
    fn base_unit_conversion() {
        assert_eq!(
            to_base_units(1),
            BigUint::parse_bytes(b"1000000000000000000", 10).unwrap()
        );
        assert_eq!(to_base_units(0), BigUint::from(0u32));
    }

    #[test]
    fn coin_symbol_serde_roundtrip() {
        let symbol = CoinSymbol::new("MNT").unwrap();
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"MNT\"");
        let back: CoinSymbol = serde_json::from_str(&json).unwrap();
        assert_eq!(back, symbol);
        assert!(serde_json::from_str::<CoinSymbol>("\"TOOLONGSYMBOL\"").is_err());
    }
}
