//! # Cryptographic Primitives
//!
//! The foundation everything security-related rests on: keccak-256 for
//! digests and secp256k1 for signatures, both fixed by the network's
//! consensus rules. We deliberately wrap audited implementations (`sha3`,
//! `k256`) instead of rolling anything ourselves — if you feel the urge to
//! optimize these functions, go read about timing attacks first.

pub mod hash;
pub mod keys;

// Re-export what callers actually reach for, so using the crate doesn't
// require memorizing the module tree.
pub use hash::keccak256;
pub use keys::{KeyError, PrivateKey, PublicKey, RecoverableSignature};
