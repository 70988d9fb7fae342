//! # Mnemonics & Seeds
//!
//! BIP-39: twelve English words in, 64-byte seed out. The word list is an
//! external, fixed collaborator (2048 entries) supplied by the `bip39`
//! crate; this module only consumes it.
//!
//! The seed is PBKDF2-HMAC-SHA512 over the normalized phrase, salted with
//! `"mnemonic" + passphrase`, 2048 iterations — deterministic, so the same
//! words and passphrase always reproduce the same keys. Treat a phrase with
//! the same respect as the private key it generates, because that is exactly
//! what it is.

use crate::config::MNEMONIC_WORD_COUNT;
use bip39::Language;
use std::fmt;
use thiserror::Error;

/// Why a phrase was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    /// A word is not in the 2048-entry word list.
    #[error("invalid mnemonic: unknown word")]
    UnknownWord,

    /// The phrase is not 12 words long.
    #[error("invalid mnemonic: expected {MNEMONIC_WORD_COUNT} words, got {0}")]
    WrongWordCount(usize),

    /// The words are valid but the embedded checksum does not match.
    #[error("invalid mnemonic: checksum mismatch")]
    ChecksumMismatch,
}

// ---------------------------------------------------------------------------
// Mnemonic
// ---------------------------------------------------------------------------

/// A validated 12-word recovery phrase.
///
/// Construction always validates: word list membership, word count, and the
/// entropy checksum. An instance of this type is a phrase that can actually
/// recover a wallet.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    inner: bip39::Mnemonic,
}

impl Mnemonic {
    /// Generates a fresh 12-word phrase from OS randomness.
    ///
    /// Entropy is drawn once, here, from a cryptographically secure source —
    /// never cached, never reused. Everything downstream is deterministic.
    pub fn generate() -> Self {
        let inner = bip39::Mnemonic::generate_in(Language::English, MNEMONIC_WORD_COUNT)
            .expect("12 is a valid BIP-39 word count");
        Self { inner }
    }

    /// Parses and validates a phrase supplied by the caller.
    pub fn from_phrase(phrase: &str) -> Result<Self, MnemonicError> {
        let inner =
            bip39::Mnemonic::parse_in(Language::English, phrase).map_err(map_bip39_error)?;
        if inner.word_count() != MNEMONIC_WORD_COUNT {
            return Err(MnemonicError::WrongWordCount(inner.word_count()));
        }
        Ok(Self { inner })
    }

    /// The phrase as a single space-separated string.
    pub fn phrase(&self) -> String {
        self.inner.to_string()
    }

    /// Derives the 64-byte seed, optionally salted with a passphrase.
    ///
    /// Pass `""` for the conventional no-passphrase wallet.
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        Seed(self.inner.to_seed_normalized(passphrase))
    }
}

fn map_bip39_error(error: bip39::Error) -> MnemonicError {
    match error {
        bip39::Error::UnknownWord(_) => MnemonicError::UnknownWord,
        bip39::Error::BadWordCount(n) => MnemonicError::WrongWordCount(n),
        bip39::Error::InvalidChecksum => MnemonicError::ChecksumMismatch,
        // Entropy-length errors only arise from the entropy constructors,
        // which this type does not expose.
        _ => MnemonicError::WrongWordCount(0),
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A recovery phrase in a log file is a stolen wallet waiting to
        // happen.
        write!(f, "Mnemonic(<{} words>)", self.inner.word_count())
    }
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// The 64-byte BIP-39 seed. Root of all derived key material.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Wraps raw seed bytes (for callers that store seeds, not phrases).
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// The raw 64 bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(<64 bytes>)")
    }
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
    fn known_seed_vector() {
        // Standard BIP-39 English test vector, empty passphrase.
        let mnemonic = Mnemonic::from_phrase(VECTOR_PHRASE).unwrap();
        let seed = mnemonic.to_seed("");
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn passphrase_changes_the_seed() {
        let mnemonic = Mnemonic::from_phrase(VECTOR_PHRASE).unwrap();
        assert_ne!(mnemonic.to_seed(""), mnemonic.to_seed("TREZOR"));
    }

    #[test]
    fn seed_is_deterministic() {
        let mnemonic = Mnemonic::from_phrase(VECTOR_PHRASE).unwrap();
        assert_eq!(mnemonic.to_seed(""), mnemonic.to_seed(""));
    }

    #[test]
    fn generate_produces_valid_distinct_phrases() {
        let a = Mnemonic::generate();
        let b = Mnemonic::generate();
        assert_ne!(a.phrase(), b.phrase());
        // A generated phrase must parse back.
        assert!(Mnemonic::from_phrase(&a.phrase()).is_ok());
    }

    #[test]
    fn rejects_unknown_word() {
        let err = Mnemonic::from_phrase(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon zzzzzz",
        )
        .unwrap_err();
        assert_eq!(err, MnemonicError::UnknownWord);
    }

    #[test]
    fn rejects_wrong_word_count() {
        let err = Mnemonic::from_phrase("abandon abandon abandon").unwrap_err();
        assert!(matches!(err, MnemonicError::WrongWordCount(_)));
    }

    #[test]
    fn rejects_bad_checksum() {
        // Twelve valid words, wrong checksum word.
        let err = Mnemonic::from_phrase(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
        )
        .unwrap_err();
        assert_eq!(err, MnemonicError::ChecksumMismatch);
    }

    #[test]
    fn debug_does_not_reveal_words() {
        let mnemonic = Mnemonic::from_phrase(VECTOR_PHRASE).unwrap();
        let debug = format!("{mnemonic:?}");
        assert!(!debug.contains("abandon"));
    }
}
