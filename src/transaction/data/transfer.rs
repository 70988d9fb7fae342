//! Single and batched coin transfers.

use super::{
    address_item, amount_item, coin_item, decode_address, decode_amount, decode_coin,
};
use crate::address::Address;
use crate::rlp::RlpItem;
use crate::transaction::types::CoinSymbol;
use crate::transaction::{SchemaError, TransactionError};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Transfer of `value` base units of `coin` to one recipient.
///
/// Wire schema: `[coin, to, value]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendData {
    /// Symbol of the coin being moved.
    pub coin: CoinSymbol,
    /// Recipient account.
    pub to: Address,
    /// Amount in base units (1 coin = 10^18 units).
    pub value: BigUint,
}

impl SendData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        Ok(RlpItem::list(vec![
            coin_item(&self.coin),
            address_item(&self.to),
            amount_item(&self.value)?,
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(3)?;
        Ok(Self {
            coin: decode_coin(&fields[0])?,
            to: decode_address(&fields[1])?,
            value: decode_amount(&fields[2])?,
        })
    }
}

/// Batched transfer: many `[coin, to, value]` items settled atomically.
///
/// Wire schema: `[[[coin, to, value], ...]]` — the item list is the single
/// field of the payload, matching how the node encodes its struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisendData {
    /// Recipients, in sender-chosen order. Must be non-empty.
    pub items: Vec<SendData>,
}

impl MultisendData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        if self.items.is_empty() {
            return Err(SchemaError::EmptyMultisend);
        }
        let items = self
            .items
            .iter()
            .map(SendData::to_rlp)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RlpItem::list(vec![RlpItem::list(items)]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(1)?;
        let raw_items = fields[0].as_list()?;
        if raw_items.is_empty() {
            return Err(SchemaError::EmptyMultisend.into());
        }
        let items = raw_items
            .iter()
            .map(SendData::from_rlp)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rlp;
    use crate::transaction::types::to_base_units;

    fn mnt() -> CoinSymbol {
        CoinSymbol::new("MNT").unwrap()
    }

    #[test]
    fn send_encodes_to_known_bytes() {
        let data = SendData {
            coin: mnt(),
            to: Address::from_bytes([0u8; 20]),
            value: to_base_units(1),
        };
        let encoded = rlp::encode(&data.to_rlp().unwrap());
        assert_eq!(
            hex::encode(encoded),
            "e2834d4e54940000000000000000000000000000000000000000880de0b6b3a7640000"
        );
    }

    #[test]
    fn send_decodes_back() {
        let data = SendData {
            coin: mnt(),
            to: Address::from_bytes([0x11; 20]),
            value: to_base_units(7),
        };
        let bytes = rlp::encode(&data.to_rlp().unwrap());
        let decoded = SendData::from_rlp(&rlp::decode(&bytes).unwrap()).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn send_rejects_short_address() {
        // [coin, 19-byte address, value]
        let item = RlpItem::list(vec![
            RlpItem::bytes(b"MNT".to_vec()),
            RlpItem::bytes(vec![0u8; 19]),
            RlpItem::uint_u64(1),
        ]);
        let bytes = rlp::encode(&item);
        assert!(SendData::from_rlp(&rlp::decode(&bytes).unwrap()).is_err());
    }

    #[test]
    fn send_rejects_extra_field() {
        let item = RlpItem::list(vec![
            RlpItem::bytes(b"MNT".to_vec()),
            RlpItem::bytes(vec![0u8; 20]),
            RlpItem::uint_u64(1),
            RlpItem::uint_u64(2),
        ]);
        let bytes = rlp::encode(&item);
        assert!(SendData::from_rlp(&rlp::decode(&bytes).unwrap()).is_err());
    }

    #[test]
    fn send_rejects_overwide_amount() {
        let data = SendData {
            coin: mnt(),
            to: Address::from_bytes([0u8; 20]),
            value: BigUint::from(1u8) << 256,
        };
        assert_eq!(data.to_rlp(), Err(SchemaError::AmountTooWide));
    }

    #[test]
    fn multisend_round_trips() {
        let data = MultisendData {
            items: vec![
                SendData {
                    coin: mnt(),
                    to: Address::from_bytes([0x01; 20]),
                    value: to_base_units(1),
                },
                SendData {
                    coin: mnt(),
                    to: Address::from_bytes([0x02; 20]),
                    value: to_base_units(2),
                },
            ],
        };
        let bytes = rlp::encode(&data.to_rlp().unwrap());
        let decoded = MultisendData::from_rlp(&rlp::decode(&bytes).unwrap()).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn multisend_rejects_empty() {
        let data = MultisendData { items: Vec::new() };
        assert_eq!(data.to_rlp(), Err(SchemaError::EmptyMultisend));
    }
}
