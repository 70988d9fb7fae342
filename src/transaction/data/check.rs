//! Off-chain check redemption.

use crate::config::CHECK_PROOF_LENGTH;
use crate::rlp::RlpItem;
use crate::transaction::{SchemaError, TransactionError};
use serde::{Deserialize, Serialize};

/// Cash a check the issuer signed off-chain.
///
/// Wire schema: `[check, proof]`. The check itself is an opaque RLP blob
/// signed by the issuer; the proof is a fixed 65-byte signature binding the
/// redeemer's address to the check's password. Neither is interpreted here —
/// the node validates both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemCheckData {
    /// The issuer-signed check, verbatim.
    pub check: Vec<u8>,
    /// 65-byte redeemer proof.
    pub proof: Vec<u8>,
}

impl RedeemCheckData {
    pub(super) fn to_rlp(&self) -> Result<RlpItem, SchemaError> {
        if self.proof.len() != CHECK_PROOF_LENGTH {
            return Err(SchemaError::BadProofLength(self.proof.len()));
        }
        Ok(RlpItem::list(vec![
            RlpItem::bytes(self.check.clone()),
            RlpItem::bytes(self.proof.clone()),
        ]))
    }

    pub(super) fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(2)?;
        let proof = fields[1].as_bytes()?.to_vec();
        if proof.len() != CHECK_PROOF_LENGTH {
            return Err(SchemaError::BadProofLength(proof.len()).into());
        }
        Ok(Self {
            check: fields[0].as_bytes()?.to_vec(),
            proof,
        })
    }
}
