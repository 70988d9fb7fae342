//! Coin issuance.

use super::{amount_item, coin_item, decode_amount, decode_coin};
use crate::config::{COIN_NAME_MAX_LENGTH, CRR_MAX, CRR_MIN};
use crate::rlp::RlpItem;
use crate::transaction::types::CoinSymbol;
use crate::transaction::{SchemaError, TransactionError};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Issue a new coin backed by a reserve of the base coin.
///
/// Wire schema: `[name, symbol, initial_amount, initial_reserve, crr]`.
/// The constant reserve ratio (CRR) fixes how much of the coin's market
/// value the reserve covers, in whole percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCoinData {
    /// Human-readable name, up to 64 bytes. May be empty.
    pub name: String,
    /// Ticker the new coin trades under.
    pub symbol: CoinSymbol,
    /// Initial supply in base units.
    pub initial_amount: BigUint,
    /// Base-coin reserve backing the supply, in base units.
    pub initial_reserve: BigUint,
    /// Constant reserve ratio, 10..=100 percent.
    pub crr: u32,
}

impl CreateCoinData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        self.validate()?;
        Ok(RlpItem::list(vec![
            RlpItem::bytes(self.name.as_bytes().to_vec()),
            coin_item(&self.symbol),
            amount_item(&self.initial_amount)?,
            amount_item(&self.initial_reserve)?,
            RlpItem::uint_u64(u64::from(self.crr)),
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(5)?;
        let name = String::from_utf8(fields[0].as_bytes()?.to_vec())
            .map_err(|_| SchemaError::InvalidCoinName)?;
        let crr = fields[4].as_u64()?;
        let data = Self {
            name,
            symbol: decode_coin(&fields[1])?,
            initial_amount: decode_amount(&fields[2])?,
            initial_reserve: decode_amount(&fields[3])?,
            crr: u32::try_from(crr).map_err(|_| SchemaError::CrrOutOfRange(crr))?,
        };
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if self.name.len() > COIN_NAME_MAX_LENGTH {
            return Err(SchemaError::CoinNameTooLong(self.name.len()));
        }
        if !(CRR_MIN..=CRR_MAX).contains(&self.crr) {
            return Err(SchemaError::CrrOutOfRange(u64::from(self.crr)));
        }
        Ok(())
    }
}
