//! # Key Material
//!
//! secp256k1 key pairs and recoverable ECDSA signatures — thin, type-safe
//! wrappers around `k256`. Nothing in here is novel cryptography, and that
//! is the point: the curve and the signing scheme are fixed by the network,
//! and `k256` is the audited implementation the rest of the ecosystem uses.
//!
//! Signing is deterministic (RFC 6979): the nonce is derived from the key
//! and the digest, so the same transaction signed with the same key yields
//! the same bytes every time. No ambient randomness at signing time, no
//! nonce-reuse disasters from a weak RNG. Randomness is consumed only by
//! [`PrivateKey::generate`], and only from the OS CSPRNG.
//!
//! Key bytes are never logged and never appear in `Debug` output. If you add
//! logging to this module, you will be asked to leave.

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use rand_core::OsRng;
use std::fmt;
use thiserror::Error;

/// Errors from key construction and signature recovery.
///
/// Deliberately vague about *why* a key was rejected — error messages that
/// describe secret material are a classic leak.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Private scalar is zero, not below the curve order, or not 32 bytes.
    #[error("invalid private key material")]
    InvalidPrivateKey,

    /// Bytes do not describe a valid curve point.
    #[error("invalid public key material")]
    InvalidPublicKey,

    /// The signing backend refused the digest (wrong length).
    #[error("signing failed")]
    SigningFailed,

    /// No public key can be recovered from this (digest, signature) pair.
    #[error("public key recovery failed")]
    RecoveryFailed,
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A secp256k1 private scalar. The one secret in the whole system.
///
/// The library never persists this — it lives in the caller's hands for the
/// duration of a signing call and that's it. `Debug` prints the public key
/// only.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generates a fresh key from the OS cryptographic RNG.
    ///
    /// The backend rejection-samples internally, so a scalar of zero or one
    /// at or above the curve order can never escape this function — that
    /// retry loop is the generator's own business, not a visible policy.
    pub fn generate() -> Self {
        Self {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Constructs a key from a raw 32-byte scalar.
    ///
    /// Zero and values at or above the curve order are rejected, never
    /// silently reduced.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, KeyError> {
        let inner = SigningKey::from_slice(bytes).map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self { inner })
    }

    /// Constructs a key from 64 hex characters.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidPrivateKey)?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        Self::from_bytes(&arr)
    }

    /// Exports the raw scalar. Handle with the care the name implies.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// Returns the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: *self.inner.verifying_key(),
        }
    }

    /// Signs a 32-byte digest, producing (r, s) plus the recovery id.
    ///
    /// RFC 6979 deterministic nonces, low-s normalized output. Byte-for-byte
    /// reproducible for a given (key, digest) pair.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<RecoverableSignature, KeyError> {
        let (signature, recovery_id) = self
            .inner
            .sign_prehash_recoverable(digest)
            .map_err(|_| KeyError::SigningFailed)?;
        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(RecoverableSignature {
            r,
            s,
            recovery_id: recovery_id.to_byte(),
        })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the scalar. Not even "partially".
        write!(f, "PrivateKey(pub={})", self.public_key())
    }
}

impl PartialEq for PrivateKey {
    /// Compared by public key — comparing secret material byte-by-byte in
    /// non-constant time is a habit worth not having.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for PrivateKey {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A secp256k1 public point. Safe to share, print, and hash into addresses.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Parses a SEC1-encoded point (compressed 33 bytes or uncompressed 65).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let inner = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { inner })
    }

    /// The 65-byte uncompressed encoding: `0x04 || x || y`.
    ///
    /// Address derivation hashes bytes 1..65 of this — the format prefix is
    /// not part of the key material.
    pub fn uncompressed_bytes(&self) -> [u8; 65] {
        let point = self.inner.to_encoded_point(false);
        point
            .as_bytes()
            .try_into()
            .expect("uncompressed SEC1 point is 65 bytes")
    }

    /// The 33-byte compressed encoding.
    pub fn compressed_bytes(&self) -> [u8; 33] {
        let point = self.inner.to_encoded_point(true);
        point
            .as_bytes()
            .try_into()
            .expect("compressed SEC1 point is 33 bytes")
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.compressed_bytes()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

// ---------------------------------------------------------------------------
// RecoverableSignature
// ---------------------------------------------------------------------------

/// An ECDSA signature with its recovery id: everything needed to recover the
/// signer's public key from the digest alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// Signature `r` scalar, big-endian.
    pub r: [u8; 32],
    /// Signature `s` scalar, big-endian, low-s normalized.
    pub s: [u8; 32],
    /// Recovery id, 0 or 1 (2 and 3 are theoretical for secp256k1 and never
    /// produced by this crate's signer).
    pub recovery_id: u8,
}

impl RecoverableSignature {
    /// Recovers the public key that produced this signature over `digest`.
    ///
    /// Fails if (r, s) is not a valid scalar pair, the recovery id is out of
    /// range, or no curve point satisfies the equation — all of which mean
    /// the signature does not belong to this digest.
    pub fn recover(&self, digest: &[u8; 32]) -> Result<PublicKey, KeyError> {
        let signature = EcdsaSignature::from_scalars(self.r, self.s)
            .map_err(|_| KeyError::RecoveryFailed)?;
        let recovery_id =
            RecoveryId::from_byte(self.recovery_id).ok_or(KeyError::RecoveryFailed)?;
        let inner = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
            .map_err(|_| KeyError::RecoveryFailed)?;
        Ok(PublicKey { inner })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
