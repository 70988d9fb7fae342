//! Operation payloads.
//!
//! Each of the 14 transaction types carries a type-specific payload that is
//! RLP-encoded on its own and then embedded in the envelope as an opaque
//! byte string. The schemas here are positional and exact: a decoded list
//! with the wrong field count, a wrong-width address, or an over-wide
//! amount is an error, not a best-effort parse.

mod check;
mod coin;
mod exchange;
mod multisig;
mod staking;
mod transfer;

pub use check::RedeemCheckData;
pub use coin::CreateCoinData;
pub use exchange::{BuyCoinData, SellAllCoinsData, SellCoinData};
pub use multisig::CreateMultisigData;
pub use staking::{
    DeclareCandidacyData, DelegateData, EditCandidateData, SetCandidateData, UnbondData,
};
pub use transfer::{MultisendData, SendData};

use super::types::{CoinSymbol, TransactionType};
use super::{SchemaError, TransactionError};
use crate::address::{Address, ValidatorPublicKey};
use crate::config::{ADDRESS_LENGTH, MAX_AMOUNT_WIDTH, VALIDATOR_KEY_LENGTH};
use crate::rlp::{self, RlpError, RlpItem};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field codecs shared by the payload schemas
// ---------------------------------------------------------------------------

fn amount_item(value: &BigUint) -> Result<RlpItem, SchemaError> {
    if value.bits().div_ceil(8) as usize > MAX_AMOUNT_WIDTH {
        return Err(SchemaError::AmountTooWide);
    }
    Ok(RlpItem::uint(value))
}

fn decode_amount(item: &RlpItem) -> Result<BigUint, RlpError> {
    item.as_uint(MAX_AMOUNT_WIDTH)
}

fn coin_item(symbol: &CoinSymbol) -> RlpItem {
    RlpItem::bytes(symbol.as_bytes())
}

fn decode_coin(item: &RlpItem) -> Result<CoinSymbol, TransactionError> {
    Ok(CoinSymbol::from_wire_bytes(item.as_bytes()?)?)
}

fn address_item(address: &Address) -> RlpItem {
    RlpItem::bytes(address.as_bytes().to_vec())
}

fn decode_address(item: &RlpItem) -> Result<Address, RlpError> {
    Ok(Address::from_bytes(item.as_fixed::<ADDRESS_LENGTH>()?))
}

fn validator_key_item(key: &ValidatorPublicKey) -> RlpItem {
    RlpItem::bytes(key.as_bytes().to_vec())
}

fn decode_validator_key(item: &RlpItem) -> Result<ValidatorPublicKey, RlpError> {
    Ok(ValidatorPublicKey::from_bytes(
        item.as_fixed::<VALIDATOR_KEY_LENGTH>()?,
    ))
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// The payload of a transaction, one variant per wire tag.
///
/// [`SetCandidateData`] backs both the on and off switches: the payloads are
/// identical, only the envelope's type tag distinguishes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    Send(SendData),
    SellCoin(SellCoinData),
    SellAllCoins(SellAllCoinsData),
    BuyCoin(BuyCoinData),
    CreateCoin(CreateCoinData),
    DeclareCandidacy(DeclareCandidacyData),
    Delegate(DelegateData),
    Unbond(UnbondData),
    RedeemCheck(RedeemCheckData),
    SetCandidateOn(SetCandidateData),
    SetCandidateOff(SetCandidateData),
    CreateMultisig(CreateMultisigData),
    Multisend(MultisendData),
    EditCandidate(EditCandidateData),
}

impl TransactionData {
    /// The wire tag this payload travels under.
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Send(_) => TransactionType::Send,
            Self::SellCoin(_) => TransactionType::SellCoin,
            Self::SellAllCoins(_) => TransactionType::SellAllCoins,
            Self::BuyCoin(_) => TransactionType::BuyCoin,
            Self::CreateCoin(_) => TransactionType::CreateCoin,
            Self::DeclareCandidacy(_) => TransactionType::DeclareCandidacy,
            Self::Delegate(_) => TransactionType::Delegate,
            Self::Unbond(_) => TransactionType::Unbond,
            Self::RedeemCheck(_) => TransactionType::RedeemCheck,
            Self::SetCandidateOn(_) => TransactionType::SetCandidateOn,
            Self::SetCandidateOff(_) => TransactionType::SetCandidateOff,
            Self::CreateMultisig(_) => TransactionType::CreateMultisig,
            Self::Multisend(_) => TransactionType::Multisend,
            Self::EditCandidate(_) => TransactionType::EditCandidate,
        }
    }

    /// The payload as an RLP item, validating schema constraints on the way.
    pub fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        match self {
            Self::Send(d) => d.to_rlp(),
            Self::SellCoin(d) => d.to_rlp(),
            Self::SellAllCoins(d) => d.to_rlp(),
            Self::BuyCoin(d) => d.to_rlp(),
            Self::CreateCoin(d) => d.to_rlp(),
            Self::DeclareCandidacy(d) => d.to_rlp(),
            Self::Delegate(d) => d.to_rlp(),
            Self::Unbond(d) => d.to_rlp(),
            Self::RedeemCheck(d) => d.to_rlp(),
            Self::SetCandidateOn(d) | Self::SetCandidateOff(d) => d.to_rlp(),
            Self::CreateMultisig(d) => d.to_rlp(),
            Self::Multisend(d) => d.to_rlp(),
            Self::EditCandidate(d) => d.to_rlp(),
        }
    }

    /// The standalone RLP bytes embedded in the envelope's data field.
    pub fn encode(&self) -> Result<Vec<u8>, SchemaError> {
        Ok(rlp::encode(&self.to_rlp()?))
    }

    /// Parses a payload item under the schema the type tag selects.
    pub fn from_rlp(
        transaction_type: TransactionType,
        item: &RlpItem,
    ) -> Result<Self, TransactionError> {
        Ok(match transaction_type {
            TransactionType::Send => Self::Send(SendData::from_rlp(item)?),
            TransactionType::SellCoin => Self::SellCoin(SellCoinData::from_rlp(item)?),
            TransactionType::SellAllCoins => Self::SellAllCoins(SellAllCoinsData::from_rlp(item)?),
            TransactionType::BuyCoin => Self::BuyCoin(BuyCoinData::from_rlp(item)?),
            TransactionType::CreateCoin => Self::CreateCoin(CreateCoinData::from_rlp(item)?),
            TransactionType::DeclareCandidacy => {
                Self::DeclareCandidacy(DeclareCandidacyData::from_rlp(item)?)
            }
            TransactionType::Delegate => Self::Delegate(DelegateData::from_rlp(item)?),
            TransactionType::Unbond => Self::Unbond(UnbondData::from_rlp(item)?),
            TransactionType::RedeemCheck => Self::RedeemCheck(RedeemCheckData::from_rlp(item)?),
            TransactionType::SetCandidateOn => {
                Self::SetCandidateOn(SetCandidateData::from_rlp(item)?)
            }
            TransactionType::SetCandidateOff => {
                Self::SetCandidateOff(SetCandidateData::from_rlp(item)?)
            }
            TransactionType::CreateMultisig => {
                Self::CreateMultisig(CreateMultisigData::from_rlp(item)?)
            }
            TransactionType::Multisend => Self::Multisend(MultisendData::from_rlp(item)?),
            TransactionType::EditCandidate => {
                Self::EditCandidate(EditCandidateData::from_rlp(item)?)
            }
        })
    }

    /// Parses standalone payload bytes under the schema the type tag selects.
    pub fn decode(
        transaction_type: TransactionType,
        bytes: &[u8],
    ) -> Result<Self, TransactionError> {
        Self::from_rlp(transaction_type, &rlp::decode(bytes)?)
    }
}
