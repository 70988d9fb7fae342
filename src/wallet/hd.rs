//! # Deterministic Key Derivation
//!
//! BIP-32 over secp256k1, but deliberately not a full hierarchical wallet:
//! the network fixes a single derivation path (`m/44'/60'/0'/0/0`, the
//! Ethereum coin type — keys are portable between wallets that agree on the
//! convention), and this module walks exactly that path from the seed to one
//! signing key. Account discovery, gap limits, and xpub watching are other
//! people's problems.

use crate::address::Address;
use crate::config::DERIVATION_PATH;
use crate::crypto::{KeyError, PrivateKey};
use crate::wallet::mnemonic::{Mnemonic, Seed};
use bip32::{DerivationPath, XPrv};

/// Derives the signing key at the fixed wallet path.
///
/// Deterministic: the same seed always yields the same key. A derived
/// scalar of zero or at/above the curve order is astronomically unlikely
/// but still rejected as [`KeyError::InvalidPrivateKey`] rather than
/// reduced — the derivation has no business "fixing" key material.
pub fn derive_private_key(seed: &Seed) -> Result<PrivateKey, KeyError> {
    let path: DerivationPath = DERIVATION_PATH
        .parse()
        .map_err(|_| KeyError::InvalidPrivateKey)?;
    let xprv =
        XPrv::derive_from_path(seed.as_bytes(), &path).map_err(|_| KeyError::InvalidPrivateKey)?;
    let scalar: [u8; 32] = xprv.private_key().to_bytes().into();
    PrivateKey::from_bytes(&scalar)
}

/// The full pipeline: phrase → seed → private key.
pub fn private_key_from_mnemonic(
    mnemonic: &Mnemonic,
    passphrase: &str,
) -> Result<PrivateKey, KeyError> {
    derive_private_key(&mnemonic.to_seed(passphrase))
}

/// Convenience: phrase → address, for callers that only need to show the
/// account a phrase controls.
pub fn address_from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Result<Address, KeyError> {
    let key = private_key_from_mnemonic(mnemonic, passphrase)?;
    Ok(Address::from_public_key(&key.public_key()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VECTOR_PHRASE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn derives_published_vector() {
        // The standard `abandon … about` phrase at m/44'/60'/0'/0/0 is a
        // widely published cross-wallet vector.
        let mnemonic = Mnemonic::from_phrase(VECTOR_PHRASE).unwrap();
        let key = private_key_from_mnemonic(&mnemonic, "").unwrap();
        assert_eq!(
            hex::encode(key.to_bytes()),
            "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727"
        );
        let address = address_from_mnemonic(&mnemonic, "").unwrap();
        assert_eq!(
            address.to_string(),
            "Mx9858effd232b4033e47d90003d41ec34ecaeda94"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let mnemonic = Mnemonic::from_phrase(VECTOR_PHRASE).unwrap();
        let a = private_key_from_mnemonic(&mnemonic, "").unwrap();
        let b = private_key_from_mnemonic(&mnemonic, "").unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn passphrase_selects_a_different_key() {
        let mnemonic = Mnemonic::from_phrase(VECTOR_PHRASE).unwrap();
        let plain = private_key_from_mnemonic(&mnemonic, "").unwrap();
        let salted = private_key_from_mnemonic(&mnemonic, "TREZOR").unwrap();
        assert_ne!(plain.to_bytes(), salted.to_bytes());
    }

    #[test]
    fn fresh_mnemonics_yield_distinct_keys() {
        let a = private_key_from_mnemonic(&Mnemonic::generate(), "").unwrap();
        let b = private_key_from_mnemonic(&Mnemonic::generate(), "").unwrap();
        assert_ne!(a.to_bytes(), b.to_bytes());
    }
}
