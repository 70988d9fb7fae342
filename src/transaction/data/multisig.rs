//! Multisig account creation.

use super::{address_item, decode_address};
use crate::address::Address;
use crate::config::MAX_MULTISIG_SIGNERS;
use crate::rlp::RlpItem;
use crate::transaction::{SchemaError, TransactionError};
use serde::{Deserialize, Serialize};

/// Create a weighted multisig account.
///
/// Wire schema: `[threshold, [weight, ...], [address, ...]]`. Weights pair
/// with addresses positionally; a transaction from the resulting account is
/// valid once the signers' combined weight reaches the threshold. Whether a
/// given weight assignment can ever reach the threshold is the node's call,
/// not ours — only the shape is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMultisigData {
    /// Combined weight required to act for the account.
    pub threshold: u64,
    /// Per-participant voting weights.
    pub weights: Vec<u64>,
    /// Participant accounts, same order as `weights`.
    pub addresses: Vec<Address>,
}

impl CreateMultisigData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        self.validate()?;
        Ok(RlpItem::list(vec![
            RlpItem::uint_u64(self.threshold),
            RlpItem::list(self.weights.iter().map(|w| RlpItem::uint_u64(*w)).collect()),
            RlpItem::list(self.addresses.iter().map(address_item).collect()),
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(3)?;
        let weights = fields[1]
            .as_list()?
            .iter()
            .map(RlpItem::as_u64)
            .collect::<Result<Vec<_>, _>>()?;
        let addresses = fields[2]
            .as_list()?
            .iter()
            .map(decode_address)
            .collect::<Result<Vec<_>, _>>()?;
        let data = Self {
            threshold: fields[0].as_u64()?,
            weights,
            addresses,
        };
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if self.threshold == 0 {
            return Err(SchemaError::ZeroThreshold);
        }
        if self.weights.len() != self.addresses.len() {
            return Err(SchemaError::MultisigShapeMismatch {
                weights: self.weights.len(),
                addresses: self.addresses.len(),
            });
        }
        if self.addresses.is_empty() || self.addresses.len() > MAX_MULTISIG_SIGNERS {
            return Err(SchemaError::MultisigParticipantCount(self.addresses.len()));
        }
        Ok(())
    }
}
