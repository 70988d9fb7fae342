//! Signature blocks and the signing paths.
//!
//! Two ways to authorize a transaction:
//!
//! * **Single** — one key signs the digest; the node recovers the sender's
//!   address from the signature alone, so no address travels on the wire.
//! * **Multi** — co-signers of a previously created multisig account each
//!   sign the same digest; the signature block names the multisig account
//!   and carries one `[index, v, r, s]` tuple per participating signer,
//!   ordered by index.
//!
//! The recovery byte `v` is offset by 27, Ethereum-style. Signatures are
//! deterministic, so collecting the same co-signatures in any order yields
//! byte-identical broadcast bytes.

use super::envelope::{SignedTransaction, Transaction};
use super::types::SignatureType;
use super::{SchemaError, TransactionError};
use crate::address::Address;
use crate::config::{MAX_MULTISIG_SIGNERS, RECOVERY_ID_OFFSET};
use crate::crypto::{PrivateKey, RecoverableSignature};
use crate::rlp::{RlpError, RlpItem};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Signature encoding
// ---------------------------------------------------------------------------

/// One recoverable signature as it appears on the wire: `[v, r, s]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSignature {
    /// Recovery byte: 27 or 28.
    pub v: u8,
    /// `r` scalar, big-endian.
    pub r: [u8; 32],
    /// `s` scalar, big-endian, low-s normalized.
    pub s: [u8; 32],
}

impl SingleSignature {
    fn from_recoverable(sig: RecoverableSignature) -> Self {
        Self {
            v: RECOVERY_ID_OFFSET + sig.recovery_id,
            r: sig.r,
            s: sig.s,
        }
    }

    pub(super) fn to_recoverable(self) -> Result<RecoverableSignature, TransactionError> {
        let recovery_id = self
            .v
            .checked_sub(RECOVERY_ID_OFFSET)
            .filter(|id| *id <= 1)
            .ok_or(TransactionError::InvalidSignature)?;
        Ok(RecoverableSignature {
            r: self.r,
            s: self.s,
            recovery_id,
        })
    }

    fn scalar_items(self) -> [RlpItem; 3] {
        [
            RlpItem::uint_u64(u64::from(self.v)),
            RlpItem::uint(&BigUint::from_bytes_be(&self.r)),
            RlpItem::uint(&BigUint::from_bytes_be(&self.s)),
        ]
    }

    fn to_rlp(self) -> RlpItem {
        RlpItem::list(self.scalar_items().to_vec())
    }

    fn from_scalar_fields(fields: &[RlpItem]) -> Result<Self, TransactionError> {
        let v = u8::try_from(fields[0].as_u64()?).map_err(|_| TransactionError::InvalidSignature)?;
        Ok(Self {
            v,
            r: scalar32(&fields[1])?,
            s: scalar32(&fields[2])?,
        })
    }

    fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        Self::from_scalar_fields(item.as_fields(3)?)
    }
}

/// Scalars travel as minimal unsigned integers; widen back to 32 bytes.
fn scalar32(item: &RlpItem) -> Result<[u8; 32], RlpError> {
    let value = item.as_uint(32)?;
    let raw = value.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - raw.len()..].copy_from_slice(&raw);
    Ok(out)
}

/// A multisig signature block: the account being acted for, plus one
/// signature tuple per co-signer, ascending by signer index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSignature {
    /// The multisig account this transaction spends from.
    pub address: Address,
    /// `(signer index, signature)` pairs, strictly ascending by index.
    pub signatures: Vec<(u8, SingleSignature)>,
}

impl MultiSignature {
    fn to_rlp(&self) -> RlpItem {
        let tuples = self
            .signatures
            .iter()
            .map(|(index, sig)| {
                let mut fields = vec![RlpItem::uint_u64(u64::from(*index))];
                fields.extend(sig.scalar_items());
                RlpItem::list(fields)
            })
            .collect();
        RlpItem::list(vec![
            RlpItem::bytes(self.address.as_bytes().to_vec()),
            RlpItem::list(tuples),
        ])
    }

    fn from_rlp(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_fields(2)?;
        let address = Address::from_bytes(fields[0].as_fixed()?);
        let raw_tuples = fields[1].as_list()?;
        if raw_tuples.is_empty() {
            return Err(TransactionError::NoSignatures);
        }
        if raw_tuples.len() > MAX_MULTISIG_SIGNERS {
            return Err(SchemaError::MultisigParticipantCount(raw_tuples.len()).into());
        }

        let mut signatures = Vec::with_capacity(raw_tuples.len());
        let mut previous: Option<u8> = None;
        for tuple in raw_tuples {
            let parts = tuple.as_fields(4)?;
            let wire_index = parts[0].as_u64()?;
            let index = u8::try_from(wire_index)
                .map_err(|_| SchemaError::SignerIndexOutOfRange(wire_index))?;
            if usize::from(index) >= MAX_MULTISIG_SIGNERS {
                return Err(SchemaError::SignerIndexOutOfRange(wire_index).into());
            }
            // Strictly ascending keeps the encoding canonical and the
            // indices unique in one check.
            if previous.is_some_and(|p| p >= index) {
                return Err(TransactionError::DuplicateSigner(index));
            }
            previous = Some(index);
            signatures.push((index, SingleSignature::from_scalar_fields(&parts[1..])?));
        }
        Ok(Self {
            address,
            signatures,
        })
    }
}

/// The signature block of a broadcast transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureData {
    Single(SingleSignature),
    Multi(MultiSignature),
}

impl SignatureData {
    /// The discriminator that travels in the envelope's ninth field.
    pub fn signature_type(&self) -> SignatureType {
        match self {
            Self::Single(_) => SignatureType::Single,
            Self::Multi(_) => SignatureType::Multi,
        }
    }

    pub(super) fn to_rlp(&self) -> RlpItem {
        match self {
            Self::Single(sig) => sig.to_rlp(),
            Self::Multi(sig) => sig.to_rlp(),
        }
    }

    pub(super) fn from_rlp(
        signature_type: SignatureType,
        item: &RlpItem,
    ) -> Result<Self, TransactionError> {
        Ok(match signature_type {
            SignatureType::Single => Self::Single(SingleSignature::from_rlp(item)?),
            SignatureType::Multi => Self::Multi(MultiSignature::from_rlp(item)?),
        })
    }
}

// ---------------------------------------------------------------------------
// Single-key signing
// ---------------------------------------------------------------------------

impl Transaction {
    /// Signs with one key, producing a broadcast-ready transaction.
    pub fn sign_single(&self, key: &PrivateKey) -> Result<SignedTransaction, TransactionError> {
        let digest = self.signing_digest(SignatureType::Single)?;
        let signature = key.sign_digest(&digest)?;
        tracing::debug!(nonce = self.nonce, "signed transaction");
        Ok(SignedTransaction {
            transaction: self.clone(),
            signature: SignatureData::Single(SingleSignature::from_recoverable(signature)),
        })
    }
}

// ---------------------------------------------------------------------------
// Multisig session
// ---------------------------------------------------------------------------

/// Collects co-signatures for one transaction from a multisig account.
///
/// Signatures can arrive in any order and from any mix of local keys and
/// externally produced `(v, r, s)` tuples; the finalized encoding orders
/// them by signer index, so every collection order produces the same bytes.
///
/// Re-adding the identical signature for a slot is a no-op. A *different*
/// signature for an occupied slot is rejected: with deterministic signing
/// that can only mean two parties disagree about the transaction.
#[derive(Debug, Clone)]
pub struct MultisigSession {
    transaction: Transaction,
    address: Address,
    digest: [u8; 32],
    signatures: BTreeMap<u8, SingleSignature>,
}

impl MultisigSession {
    /// Starts a session for `transaction`, spending from the multisig
    /// account at `address`. The digest is fixed here; the transaction can
    /// no longer change.
    pub fn new(transaction: Transaction, address: Address) -> Result<Self, TransactionError> {
        let digest = transaction.signing_digest(SignatureType::Multi)?;
        Ok(Self {
            transaction,
            address,
            digest,
            signatures: BTreeMap::new(),
        })
    }

    /// The digest every co-signer must sign. Hand this to external signers.
    pub fn digest(&self) -> [u8; 32] {
        self.digest
    }

    /// Signs locally as the participant at `index`.
    pub fn sign_with(&mut self, index: u8, key: &PrivateKey) -> Result<(), TransactionError> {
        let signature = key.sign_digest(&self.digest)?;
        self.add_signature(index, SingleSignature::from_recoverable(signature))
    }

    /// Adds an externally produced signature for the participant at `index`.
    pub fn add_signature(
        &mut self,
        index: u8,
        signature: SingleSignature,
    ) -> Result<(), TransactionError> {
        if usize::from(index) >= MAX_MULTISIG_SIGNERS {
            return Err(SchemaError::SignerIndexOutOfRange(u64::from(index)).into());
        }
        match self.signatures.get(&index) {
            Some(existing) if *existing != signature => {
                Err(TransactionError::DuplicateSigner(index))
            }
            Some(_) => Ok(()),
            None => {
                self.signatures.insert(index, signature);
                Ok(())
            }
        }
    }

    /// Number of signatures collected so far.
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Assembles the broadcast transaction. Requires at least one
    /// signature; whether the collected weight reaches the account's
    /// threshold is the node's call.
    pub fn finalize(self) -> Result<SignedTransaction, TransactionError> {
        if self.signatures.is_empty() {
            return Err(TransactionError::NoSignatures);
        }
        tracing::debug!(
            nonce = self.transaction.nonce,
            signers = self.signatures.len(),
            "finalized multisig transaction"
        );
        Ok(SignedTransaction {
            transaction: self.transaction,
            signature: SignatureData::Multi(MultiSignature {
                address: self.address,
                signatures: self.signatures.into_iter().collect(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::data::{SendData, TransactionData};
    use crate::transaction::types::{to_base_units, ChainId, CoinSymbol};
    use crate::transaction::TransactionBuilder;

    const TEST_KEY: &str = "df1f236d0396cc43147e44206c341a65573326e907d033690e31a21323c03a9f";

    fn send_tx() -> Transaction {
        TransactionBuilder::new(ChainId::Mainnet)
            .nonce(1)
            .build(TransactionData::Send(SendData {
                coin: CoinSymbol::new("MNT").unwrap(),
                to: Address::from_bytes([0u8; 20]),
                value: to_base_units(1),
            }))
            .unwrap()
    }

    #[test]
    fn single_signature_matches_known_vector() {
        let key = PrivateKey::from_hex(TEST_KEY).unwrap();
        let signed = send_tx().sign_single(&key).unwrap();
        let SignatureData::Single(sig) = signed.signature else {
            panic!("expected single signature");
        };
        assert_eq!(sig.v, 27);
        assert_eq!(
            hex::encode(sig.r),
            "40fb59d043c15d2ce374d1cdb95684cbdfd0ccffea0f3c82ce3596339bab00fb"
        );
        assert_eq!(
            hex::encode(sig.s),
            "291fb4fe69de8c62b462800695d5768f0e199f878b7c7e9a50dba984199d88f0"
        );
    }

    #[test]
    fn session_orders_signatures_by_index() {
        let keys: Vec<PrivateKey> = (1u8..=3).map(|_| PrivateKey::generate()).collect();
        let tx = send_tx();
        let address = Address::from_bytes([0xAA; 20]);

        let mut forward = MultisigSession::new(tx.clone(), address).unwrap();
        forward.sign_with(0, &keys[0]).unwrap();
        forward.sign_with(1, &keys[1]).unwrap();
        forward.sign_with(2, &keys[2]).unwrap();

        let mut shuffled = MultisigSession::new(tx, address).unwrap();
        shuffled.sign_with(2, &keys[2]).unwrap();
        shuffled.sign_with(0, &keys[0]).unwrap();
        shuffled.sign_with(1, &keys[1]).unwrap();

        let a = forward.finalize().unwrap().encode().unwrap();
        let b = shuffled.finalize().unwrap().encode().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn readding_identical_signature_is_a_noop() {
        let key = PrivateKey::generate();
        let mut session =
            MultisigSession::new(send_tx(), Address::from_bytes([0xAA; 20])).unwrap();
        session.sign_with(0, &key).unwrap();
        session.sign_with(0, &key).unwrap();
        assert_eq!(session.signature_count(), 1);
    }

    #[test]
    fn conflicting_signature_for_slot_is_rejected() {
        let mut session =
            MultisigSession::new(send_tx(), Address::from_bytes([0xAA; 20])).unwrap();
        session.sign_with(3, &PrivateKey::generate()).unwrap();
        let result = session.sign_with(3, &PrivateKey::generate());
        assert_eq!(result, Err(TransactionError::DuplicateSigner(3)));
    }

    #[test]
    fn index_past_signer_cap_is_rejected() {
        let mut session =
            MultisigSession::new(send_tx(), Address::from_bytes([0xAA; 20])).unwrap();
        let result = session.sign_with(32, &PrivateKey::generate());
        assert_eq!(
            result,
            Err(TransactionError::Schema(SchemaError::SignerIndexOutOfRange(
                32
            )))
        );
    }

    #[test]
    fn empty_session_cannot_finalize() {
        let session = MultisigSession::new(send_tx(), Address::from_bytes([0xAA; 20])).unwrap();
        assert_eq!(
            session.finalize().map(|_| ()),
            Err(TransactionError::NoSignatures)
        );
    }

    #[test]
    fn signature_block_rejects_descending_indices() {
        let sig = SingleSignature {
            v: 27,
            r: [0x11; 32],
            s: [0x22; 32],
        };
        let block = MultiSignature {
            address: Address::from_bytes([0xAA; 20]),
            signatures: vec![(2, sig), (1, sig)],
        };
        let item = block.to_rlp();
        assert_eq!(
            MultiSignature::from_rlp(&item),
            Err(TransactionError::DuplicateSigner(1))
        );
    }

    #[test]
    fn decoded_signer_index_error_names_the_wire_value() {
        let block = RlpItem::list(vec![
            RlpItem::bytes(vec![0xAA; 20]),
            RlpItem::list(vec![RlpItem::list(vec![
                RlpItem::uint_u64(300),
                RlpItem::uint_u64(27),
                RlpItem::uint_u64(1),
                RlpItem::uint_u64(2),
            ])]),
        ]);
        assert_eq!(
            MultiSignature::from_rlp(&block),
            Err(SchemaError::SignerIndexOutOfRange(300).into())
        );
    }

    #[test]
    fn signature_v_outside_27_28_does_not_recover() {
        let sig = SingleSignature {
            v: 29,
            r: [0x11; 32],
            s: [0x22; 32],
        };
        assert_eq!(
            sig.to_recoverable().map(|_| ()),
            Err(TransactionError::InvalidSignature)
        );
    }
}
