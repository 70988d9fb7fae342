//! Market exchange between coins via their shared reserve.
//!
//! All three operations quote against the bonding-curve price at execution
//! time; the `min`/`max` bounds are the sender's slippage protection.

use super::{amount_item, coin_item, decode_amount, decode_coin};
use crate::rlp::RlpItem;
use crate::transaction::types::CoinSymbol;
use crate::transaction::{SchemaError, TransactionError};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Sell a fixed amount of one coin for another.
///
/// Wire schema: `[coin_to_sell, value_to_sell, coin_to_buy, min_value_to_buy]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellCoinData {
    pub coin_to_sell: CoinSymbol,
    /// Input amount in base units.
    pub value_to_sell: BigUint,
    pub coin_to_buy: CoinSymbol,
    /// Reject the trade if the output would fall below this.
    pub min_value_to_buy: BigUint,
}

impl SellCoinData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        Ok(RlpItem::list(vec![
            coin_item(&self.coin_to_sell),
            amount_item(&self.value_to_sell)?,
            coin_item(&self.coin_to_buy),
            amount_item(&self.min_value_to_buy)?,
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(4)?;
        Ok(Self {
            coin_to_sell: decode_coin(&fields[0])?,
            value_to_sell: decode_amount(&fields[1])?,
            coin_to_buy: decode_coin(&fields[2])?,
            min_value_to_buy: decode_amount(&fields[3])?,
        })
    }
}

/// Sell the sender's entire balance of a coin. No input amount travels on
/// the wire; the node reads the balance at execution time.
///
/// Wire schema: `[coin_to_sell, coin_to_buy, min_value_to_buy]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellAllCoinsData {
    pub coin_to_sell: CoinSymbol,
    pub coin_to_buy: CoinSymbol,
    /// Reject the trade if the output would fall below this.
    pub min_value_to_buy: BigUint,
}

impl SellAllCoinsData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        Ok(RlpItem::list(vec![
            coin_item(&self.coin_to_sell),
            coin_item(&self.coin_to_buy),
            amount_item(&self.min_value_to_buy)?,
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(3)?;
        Ok(Self {
            coin_to_sell: decode_coin(&fields[0])?,
            coin_to_buy: decode_coin(&fields[1])?,
            min_value_to_buy: decode_amount(&fields[2])?,
        })
    }
}

/// Buy a fixed amount of one coin, paying with another.
///
/// Wire schema: `[coin_to_buy, value_to_buy, coin_to_sell, max_value_to_sell]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyCoinData {
    pub coin_to_buy: CoinSymbol,
    /// Desired output amount in base units.
    pub value_to_buy: BigUint,
    pub coin_to_sell: CoinSymbol,
    /// Reject the trade if the input would rise above this.
    pub max_value_to_sell: BigUint,
}

impl BuyCoinData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        Ok(RlpItem::list(vec![
            coin_item(&self.coin_to_buy),
            amount_item(&self.value_to_buy)?,
            coin_item(&self.coin_to_sell),
            amount_item(&self.max_value_to_sell)?,
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(4)?;
        Ok(Self {
            coin_to_buy: decode_coin(&fields[0])?,
            value_to_buy: decode_amount(&fields[1])?,
            coin_to_sell: decode_coin(&fields[2])?,
            max_value_to_sell: decode_amount(&fields[3])?,
        })
    }
}
