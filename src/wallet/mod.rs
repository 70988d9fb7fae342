//! # Wallet Derivation
//!
//! Everything between a recovery phrase and a usable signing key:
//!
//! ```text
//! mnemonic.rs — BIP-39 phrases, validation, 64-byte seeds
//! hd.rs       — BIP-32 walk down the fixed path to one secp256k1 key
//! ```
//!
//! The library never stores any of it. Phrases and keys are the caller's to
//! keep; this module only transforms one into the other, deterministically.

pub mod hd;
pub mod mnemonic;

pub use hd::{address_from_mnemonic, derive_private_key, private_key_from_mnemonic};
pub use mnemonic::{Mnemonic, MnemonicError, Seed};
