// Copyright (c) 2026 Minter SDK contributors. MIT License.
// See LICENSE for details.

//! # minter-tx — Minter transaction construction and signing
//!
//! A client-side SDK for the Minter network: build any of the fourteen
//! transaction types, RLP-encode them canonically, sign with secp256k1
//! (single key or multisig), and get back the exact bytes a node accepts.
//! The reverse path — decode, validate, recover the sender — is just as
//! strict: if bytes decode at all, re-encoding them is byte-identical.
//!
//! No network code lives here. This crate turns intent into bytes and
//! bytes back into intent; broadcasting them is somebody else's job.
//!
//! ## Modules
//!
//! - **rlp** — Canonical RLP codec. Strict on decode: one valid encoding
//!   per value, everything else is an error.
//! - **crypto** — Keccak-256 and secp256k1 recoverable signatures over
//!   `k256`. Deterministic signing per RFC 6979.
//! - **address** — Account addresses (`Mx…`) and validator keys (`Mp…`).
//! - **wallet** — BIP-39 mnemonics and the network's fixed BIP-44 path.
//! - **transaction** — The fourteen operation payloads, the envelope, the
//!   signing paths, and verification by key recovery.
//! - **config** — Protocol constants in one place.
//!
//! ## A complete round trip
//!
//! ```
//! use minter_tx::address::Address;
//! use minter_tx::crypto::PrivateKey;
//! use minter_tx::transaction::data::SendData;
//! use minter_tx::transaction::types::to_base_units;
//! use minter_tx::transaction::{
//!     ChainId, CoinSymbol, SignedTransaction, TransactionBuilder, TransactionData,
//! };
//!
//! let key = PrivateKey::generate();
//! let tx = TransactionBuilder::new(ChainId::Testnet)
//!     .nonce(1)
//!     .build(TransactionData::Send(SendData {
//!         coin: CoinSymbol::base_coin(),
//!         to: Address::from_bytes([0u8; 20]),
//!         value: to_base_units(10),
//!     }))
//!     .unwrap();
//!
//! let signed = tx.sign_single(&key).unwrap();
//! let bytes = signed.encode().unwrap();
//!
//! let decoded = SignedTransaction::decode(&bytes).unwrap();
//! let sender = decoded.verify().unwrap();
//! assert_eq!(sender, Address::from_public_key(&key.public_key()));
//! ```

pub mod address;
pub mod config;
pub mod crypto;
pub mod rlp;
pub mod transaction;
pub mod wallet;

pub use address::{Address, ValidatorPublicKey};
pub use crypto::{keccak256, PrivateKey, PublicKey};
pub use transaction::{
    ChainId, CoinSymbol, MultisigSession, SignatureType, SignedTransaction, Transaction,
    TransactionBuilder, TransactionData, TransactionError, TransactionType,
};
pub use wallet::{Mnemonic, Seed};
