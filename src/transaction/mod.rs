//! # Transactions
//!
//! Construction, encoding, signing, and verification of Minter
//! transactions. The module layout mirrors the lifecycle:
//!
//! ```text
//! types.rs        — Tags, chain ids, signature modes, coin symbols
//! data/           — The 14 operation payloads and their wire schemas
//! envelope.rs     — The common wrapper: nonce, fees, embedded data, digest
//! signing.rs      — Single-key signing and the multisig accumulator
//! verification.rs — Digest recomputation and signer recovery
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** — assemble a [`Transaction`] with a [`TransactionBuilder`].
//! 2. **Sign** — [`Transaction::sign_single`], or collect co-signatures in a
//!    [`MultisigSession`].
//! 3. **Encode** — [`SignedTransaction::encode`] yields the exact bytes a
//!    node accepts.
//! 4. **Verify / decode** — the reverse path recovers every field and the
//!    signer's address, bit-exactly.
//!
//! Everything here is a pure function over owned values: no I/O, no shared
//! state, no randomness (signing is deterministic per RFC 6979).

pub mod data;
pub mod envelope;
pub mod signing;
pub mod types;
pub mod verification;

pub use data::TransactionData;
pub use envelope::{SignedTransaction, Transaction, TransactionBuilder};
pub use signing::{MultisigSession, SignatureData, SingleSignature};
pub use types::{ChainId, CoinSymbol, SignatureType, TransactionType};

use crate::config::{
    COIN_NAME_MAX_LENGTH, CRR_MAX, CRR_MIN, MAX_MULTISIG_SIGNERS, MAX_PAYLOAD_LENGTH,
};
use crate::crypto::KeyError;
use crate::rlp::RlpError;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A field value that violates its schema before any encoding is attempted.
///
/// These fire on the construction path: the library refuses to build (or
/// decode) a structurally illegal transaction rather than hand the node
/// something it will reject. Nothing is ever truncated, padded, or clamped
/// to "help".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Coin symbols are 1–10 printable ASCII bytes, exact length.
    #[error("invalid coin symbol {0:?}: must be 1-10 printable ASCII bytes")]
    InvalidCoinSymbol(String),

    /// Coin names are capped at [`COIN_NAME_MAX_LENGTH`] bytes.
    #[error("coin name too long: {0} bytes, maximum {COIN_NAME_MAX_LENGTH}")]
    CoinNameTooLong(usize),

    /// Coin names must be valid UTF-8.
    #[error("coin name is not valid UTF-8")]
    InvalidCoinName,

    /// Constant reserve ratio must sit in [`CRR_MIN`]..=[`CRR_MAX`].
    #[error("constant reserve ratio {0} outside {CRR_MIN}..={CRR_MAX}")]
    CrrOutOfRange(u64),

    /// Validator commission is a percentage.
    #[error("commission {0} exceeds 100 percent")]
    CommissionOutOfRange(u64),

    /// Amounts are at most 32 bytes wide on the wire.
    #[error("amount does not fit 32 bytes")]
    AmountTooWide,

    /// Payload and service-data fields are capped at 1 KiB.
    #[error("payload too long: {0} bytes, maximum {MAX_PAYLOAD_LENGTH}")]
    PayloadTooLong(usize),

    /// Check proofs are exactly 65 bytes.
    #[error("check proof must be 65 bytes, got {0}")]
    BadProofLength(usize),

    /// A multisend with no recipients is meaningless.
    #[error("multisend requires at least one recipient")]
    EmptyMultisend,

    /// Multisig weights and addresses pair positionally.
    #[error("multisig weights ({weights}) and addresses ({addresses}) must pair up")]
    MultisigShapeMismatch {
        /// Number of weights supplied.
        weights: usize,
        /// Number of addresses supplied.
        addresses: usize,
    },

    /// Multisig accounts have 1..=[`MAX_MULTISIG_SIGNERS`] participants.
    #[error("multisig participant count {0} outside 1..={MAX_MULTISIG_SIGNERS}")]
    MultisigParticipantCount(usize),

    /// A multisig threshold of zero would make every transaction valid.
    #[error("multisig threshold must be positive")]
    ZeroThreshold,

    /// Signer indices address one of at most 32 registered keys.
    #[error("signer index {0} exceeds the {MAX_MULTISIG_SIGNERS}-signer cap")]
    SignerIndexOutOfRange(u64),
}

/// Top-level failure taxonomy for transaction operations.
///
/// Every public operation returns either a fully valid value or one of
/// these — never a partially populated result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// Malformed or non-canonical wire bytes.
    #[error("decode error: {0}")]
    Decode(#[from] RlpError),

    /// A constructed or decoded field violates its schema.
    #[error("schema violation: {0}")]
    Schema(#[from] SchemaError),

    /// The `type` field names no known operation.
    #[error("unknown transaction type tag {0:#04x}")]
    UnknownType(u64),

    /// The `chain_id` field names no known network.
    #[error("unknown chain id {0}")]
    UnknownChainId(u64),

    /// The signature-type discriminator is neither single nor multi.
    #[error("unknown signature type {0:#04x}")]
    UnknownSignatureType(u64),

    /// A different signature was supplied for an already-filled signer slot.
    #[error("conflicting signature for signer index {0}")]
    DuplicateSigner(u8),

    /// Finalizing a multisig session with no signatures at all.
    #[error("multisig session holds no signatures")]
    NoSignatures,

    /// Recovery or verification did not produce a matching signer.
    #[error("invalid signature")]
    InvalidSignature,

    /// Key material was rejected by the crypto layer.
    #[error("key error: {0}")]
    Key(#[from] KeyError),
}
