//! Signature verification by public-key recovery.
//!
//! There is no stored sender address to compare against: the sender *is*
//! whatever address the signature recovers to over the recomputed digest.
//! Any mutation of a signed field changes the digest, which makes recovery
//! yield a different address (or fail outright) — tamper evidence falls out
//! of the arithmetic.

use super::envelope::SignedTransaction;
use super::signing::SignatureData;
use super::types::SignatureType;
use super::{SchemaError, TransactionError};
use crate::address::Address;

impl SignedTransaction {
    /// Verifies the signature block and returns the sender's address.
    ///
    /// For a single-signer transaction this is the address recovered from
    /// the signature. For a multisig transaction every tuple must recover
    /// to *some* valid key; the returned address is the multisig account's.
    /// Which keys are registered for that account lives on chain — use
    /// [`verify_with_key_set`](Self::verify_with_key_set) when the
    /// participant list is known.
    pub fn verify(&self) -> Result<Address, TransactionError> {
        match &self.signature {
            SignatureData::Single(sig) => {
                let digest = self.transaction.signing_digest(SignatureType::Single)?;
                let public_key = sig
                    .to_recoverable()?
                    .recover(&digest)
                    .map_err(|_| TransactionError::InvalidSignature)?;
                Ok(Address::from_public_key(&public_key))
            }
            SignatureData::Multi(block) => {
                let digest = self.transaction.signing_digest(SignatureType::Multi)?;
                for (_, sig) in &block.signatures {
                    sig.to_recoverable()?
                        .recover(&digest)
                        .map_err(|_| TransactionError::InvalidSignature)?;
                }
                Ok(block.address)
            }
        }
    }

    /// The addresses each signature recovers to, with signer indices.
    ///
    /// A single-signer transaction yields one entry at index 0.
    pub fn recovered_signers(&self) -> Result<Vec<(u8, Address)>, TransactionError> {
        match &self.signature {
            SignatureData::Single(sig) => {
                let digest = self.transaction.signing_digest(SignatureType::Single)?;
                let public_key = sig
                    .to_recoverable()?
                    .recover(&digest)
                    .map_err(|_| TransactionError::InvalidSignature)?;
                Ok(vec![(0, Address::from_public_key(&public_key))])
            }
            SignatureData::Multi(block) => {
                let digest = self.transaction.signing_digest(SignatureType::Multi)?;
                block
                    .signatures
                    .iter()
                    .map(|(index, sig)| {
                        let public_key = sig
                            .to_recoverable()?
                            .recover(&digest)
                            .map_err(|_| TransactionError::InvalidSignature)?;
                        Ok((*index, Address::from_public_key(&public_key)))
                    })
                    .collect()
            }
        }
    }

    /// Verifies against a known participant list.
    ///
    /// For a multisig transaction, each tuple's recovered address must be
    /// the registered key at its claimed index. For a single-signer
    /// transaction, the recovered sender must appear in the list.
    pub fn verify_with_key_set(&self, registered: &[Address]) -> Result<Address, TransactionError> {
        match &self.signature {
            SignatureData::Single(_) => {
                let sender = self.verify()?;
                if registered.contains(&sender) {
                    Ok(sender)
                } else {
                    Err(TransactionError::InvalidSignature)
                }
            }
            SignatureData::Multi(block) => {
                for (index, recovered) in self.recovered_signers()? {
                    let expected = registered
                        .get(usize::from(index))
                        .ok_or(SchemaError::SignerIndexOutOfRange(u64::from(index)))?;
                    if recovered != *expected {
                        return Err(TransactionError::InvalidSignature);
                    }
                }
                Ok(block.address)
            }
        }
    }
}
