//! Validator and delegation operations.

use super::{
    address_item, amount_item, coin_item, decode_address, decode_amount, decode_coin,
    decode_validator_key, validator_key_item,
};
use crate::address::{Address, ValidatorPublicKey};
use crate::rlp::RlpItem;
use crate::transaction::types::CoinSymbol;
use crate::transaction::{SchemaError, TransactionError};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Register a new validator candidate.
///
/// Wire schema: `[address, pub_key, commission, coin, stake]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareCandidacyData {
    /// Account that owns the candidacy and collects rewards.
    pub address: Address,
    /// The candidate's consensus public key.
    pub pub_key: ValidatorPublicKey,
    /// Share of block rewards kept by the validator, in whole percent.
    pub commission: u32,
    /// Coin the initial stake is bonded in.
    pub coin: CoinSymbol,
    /// Initial self-bonded stake in base units.
    pub stake: BigUint,
}

impl DeclareCandidacyData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        if self.commission > 100 {
            return Err(SchemaError::CommissionOutOfRange(u64::from(self.commission)));
        }
        Ok(RlpItem::list(vec![
            address_item(&self.address),
            validator_key_item(&self.pub_key),
            RlpItem::uint_u64(u64::from(self.commission)),
            coin_item(&self.coin),
            amount_item(&self.stake)?,
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(5)?;
        let commission = fields[2].as_u64()?;
        if commission > 100 {
            return Err(SchemaError::CommissionOutOfRange(commission).into());
        }
        let commission = commission as u32;
        Ok(Self {
            address: decode_address(&fields[0])?,
            pub_key: decode_validator_key(&fields[1])?,
            commission,
            coin: decode_coin(&fields[3])?,
            stake: decode_amount(&fields[4])?,
        })
    }
}

/// Bond stake to an existing candidate.
///
/// Wire schema: `[pub_key, coin, value]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateData {
    pub pub_key: ValidatorPublicKey,
    pub coin: CoinSymbol,
    /// Stake in base units.
    pub value: BigUint,
}

impl DelegateData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        Ok(RlpItem::list(vec![
            validator_key_item(&self.pub_key),
            coin_item(&self.coin),
            amount_item(&self.value)?,
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(3)?;
        Ok(Self {
            pub_key: decode_validator_key(&fields[0])?,
            coin: decode_coin(&fields[1])?,
            value: decode_amount(&fields[2])?,
        })
    }
}

/// Unbond previously delegated stake. Same shape as [`DelegateData`],
/// distinguished only by the envelope's type tag.
///
/// Wire schema: `[pub_key, coin, value]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbondData {
    pub pub_key: ValidatorPublicKey,
    pub coin: CoinSymbol,
    /// Stake to release, in base units.
    pub value: BigUint,
}

impl UnbondData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        Ok(RlpItem::list(vec![
            validator_key_item(&self.pub_key),
            coin_item(&self.coin),
            amount_item(&self.value)?,
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(3)?;
        Ok(Self {
            pub_key: decode_validator_key(&fields[0])?,
            coin: decode_coin(&fields[1])?,
            value: decode_amount(&fields[2])?,
        })
    }
}

/// Flip a candidate's eligibility switch. The payload carries only the key;
/// on versus off lives in the envelope's type tag.
///
/// Wire schema: `[pub_key]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCandidateData {
    pub pub_key: ValidatorPublicKey,
}

impl SetCandidateData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        Ok(RlpItem::list(vec![validator_key_item(&self.pub_key)]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(1)?;
        Ok(Self {
            pub_key: decode_validator_key(&fields[0])?,
        })
    }
}

/// Repoint a candidate's reward and owner addresses.
///
/// Wire schema: `[pub_key, reward_address, owner_address]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCandidateData {
    pub pub_key: ValidatorPublicKey,
    /// Where block rewards accrue from now on.
    pub reward_address: Address,
    /// Account allowed to edit the candidate from now on.
    pub owner_address: Address,
}

impl EditCandidateData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        Ok(RlpItem::list(vec![
            validator_key_item(&self.pub_key),
            address_item(&self.reward_address),
            address_item(&self.owner_address),
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(3)?;
        Ok(Self {
            pub_key: decode_validator_key(&fields[0])?,
            reward_address: decode_address(&fields[1])?,
            owner_address: decode_address(&fields[2])?,
        })
    }
}
