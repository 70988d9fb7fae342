//! # Protocol Constants
//!
//! Every magic number in the SDK lives here. These values are fixed by the
//! network's consensus rules — change one and your transactions stop being
//! transactions as far as any node is concerned.

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Mainnet chain id. Real coins, real consequences.
pub const CHAIN_ID_MAINNET: u8 = 1;

/// Testnet chain id. Where mistakes are free.
pub const CHAIN_ID_TESTNET: u8 = 2;

// ---------------------------------------------------------------------------
// Text Prefixes
// ---------------------------------------------------------------------------

/// Account address prefix: `Mx` followed by 40 lowercase hex characters.
pub const ADDRESS_PREFIX: &str = "Mx";

/// Validator public key prefix: `Mp` followed by 64 lowercase hex characters.
pub const VALIDATOR_KEY_PREFIX: &str = "Mp";

// ---------------------------------------------------------------------------
// Field Sizes & Limits
// ---------------------------------------------------------------------------

/// Account addresses are the trailing 20 bytes of a keccak-256 digest.
pub const ADDRESS_LENGTH: usize = 20;

/// Validator (consensus) public keys are 32 bytes.
pub const VALIDATOR_KEY_LENGTH: usize = 32;

/// Coin symbols are 1 to 10 bytes of printable ASCII, exact length on the
/// wire.
pub const COIN_SYMBOL_MIN_LENGTH: usize = 1;
/// See [`COIN_SYMBOL_MIN_LENGTH`].
pub const COIN_SYMBOL_MAX_LENGTH: usize = 10;

/// Coin names (CreateCoin) are capped at 64 bytes.
pub const COIN_NAME_MAX_LENGTH: usize = 64;

/// Constant reserve ratio bounds for newly created coins, in percent.
pub const CRR_MIN: u32 = 10;
/// See [`CRR_MIN`].
pub const CRR_MAX: u32 = 100;

/// Free-form payload and service-data fields are capped at 1 KiB.
pub const MAX_PAYLOAD_LENGTH: usize = 1024;

/// The node caps multisig accounts at 32 co-signers, so signer indices fit
/// in 0..=31 and a signature list can never exceed 32 tuples.
pub const MAX_MULTISIG_SIGNERS: usize = 32;

/// Check redemption proofs are a 65-byte recoverable signature (r, s, v).
pub const CHECK_PROOF_LENGTH: usize = 65;

/// Amounts are big-endian unsigned integers of at most 32 bytes.
pub const MAX_AMOUNT_WIDTH: usize = 32;

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// Legacy offset added to the recovery id in the wire-format `v` field.
/// `v` is 27 or 28; the recovery id is `v - 27`.
pub const RECOVERY_ID_OFFSET: u8 = 27;

// ---------------------------------------------------------------------------
// Key Derivation
// ---------------------------------------------------------------------------

/// The fixed BIP-44 path the wallet derives signing keys from. The network
/// reuses the Ethereum coin type, so keys are portable between wallets that
/// follow the same convention.
pub const DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// BIP-39 mnemonics carry 12 words (128 bits of entropy) by default.
pub const MNEMONIC_WORD_COUNT: usize = 12;
