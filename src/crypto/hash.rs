//! # Hashing
//!
//! One digest function, used everywhere: keccak-256. Signing digests,
//! address derivation, check hashes — all keccak, all 32 bytes. Note that
//! this is the original Keccak padding, not the NIST SHA-3 variant; the two
//! disagree on every single output, so the distinction matters.

use sha3::{Digest, Keccak256};

/// Computes the keccak-256 digest of `data`.
///
/// Returns a fixed-size array because every caller feeds the result straight
/// into a signature or a 20-byte address slice.
///
/// # Example
///
/// ```
/// use minter_tx::crypto::keccak256;
///
/// let digest = keccak256(b"");
/// assert_eq!(
///     hex::encode(digest),
///     "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
/// );
/// ```
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
