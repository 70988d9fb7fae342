//! The transaction envelope.
//!
//! Every operation travels inside the same ten-field wrapper:
//!
//! ```text
//! [nonce, chain_id, gas_price, gas_coin, type,
//!  data, payload, service_data, signature_type, signature_data]
//! ```
//!
//! `data` is the operation payload, RLP-encoded on its own and embedded as
//! an opaque byte string; `signature_data` is embedded the same way. The
//! signing digest is the keccak-256 of the first nine fields — the
//! signature-type discriminator is covered, so a single-signer signature
//! can never be replayed as a multisig one.

use super::data::TransactionData;
use super::signing::SignatureData;
use super::types::{ChainId, CoinSymbol, SignatureType, TransactionType};
use super::{SchemaError, TransactionError};
use crate::config::MAX_PAYLOAD_LENGTH;
use crate::crypto::keccak256;
use crate::rlp::{self, RlpItem};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Unsigned transaction
// ---------------------------------------------------------------------------

/// A fully specified, not yet signed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender's sequence number, starting at 1.
    pub nonce: u64,
    /// Network this transaction is valid on.
    pub chain_id: ChainId,
    /// Fee multiplier the sender is willing to pay.
    pub gas_price: u64,
    /// Coin the fee is paid in.
    pub gas_coin: CoinSymbol,
    /// The operation payload.
    pub data: TransactionData,
    /// Free-form message, at most 1024 bytes. Covered by the signature.
    pub payload: Vec<u8>,
    /// Reserved field, same cap as `payload`.
    pub service_data: Vec<u8>,
}

impl Transaction {
    /// The nine signed fields, in wire order.
    fn signed_fields(
        &self,
        signature_type: SignatureType,
    ) -> Result<Vec<RlpItem>, TransactionError> {
        self.check_payloads()?;
        Ok(vec![
            RlpItem::uint_u64(self.nonce),
            RlpItem::uint_u64(u64::from(self.chain_id.value())),
            RlpItem::uint_u64(self.gas_price),
            RlpItem::bytes(self.gas_coin.as_bytes()),
            RlpItem::uint_u64(u64::from(self.data.transaction_type().tag())),
            RlpItem::bytes(self.data.encode()?),
            RlpItem::bytes(self.payload.clone()),
            RlpItem::bytes(self.service_data.clone()),
            RlpItem::uint_u64(u64::from(signature_type.value())),
        ])
    }

    /// The digest a signer commits to: keccak-256 over the RLP of the nine
    /// signed fields.
    pub fn signing_digest(
        &self,
        signature_type: SignatureType,
    ) -> Result<[u8; 32], TransactionError> {
        let fields = self.signed_fields(signature_type)?;
        Ok(keccak256(&rlp::encode(&RlpItem::list(fields))))
    }

    fn check_payloads(&self) -> Result<(), SchemaError> {
        if self.payload.len() > MAX_PAYLOAD_LENGTH {
            return Err(SchemaError::PayloadTooLong(self.payload.len()));
        }
        if self.service_data.len() > MAX_PAYLOAD_LENGTH {
            return Err(SchemaError::PayloadTooLong(self.service_data.len()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Fluent construction of a [`Transaction`].
///
/// Gas price defaults to 1 and the gas coin to the base coin; nonce and
/// data have no sensible defaults and are required.
///
/// ```
/// use minter_tx::transaction::{ChainId, CoinSymbol, TransactionBuilder, TransactionData};
/// use minter_tx::transaction::data::SendData;
/// use minter_tx::address::Address;
/// use minter_tx::transaction::types::to_base_units;
///
/// let tx = TransactionBuilder::new(ChainId::Mainnet)
///     .nonce(1)
///     .build(TransactionData::Send(SendData {
///         coin: CoinSymbol::new("MNT").unwrap(),
///         to: Address::from_bytes([0u8; 20]),
///         value: to_base_units(10),
///     }))
///     .unwrap();
/// assert_eq!(tx.gas_price, 1);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    nonce: u64,
    chain_id: ChainId,
    gas_price: u64,
    gas_coin: CoinSymbol,
    payload: Vec<u8>,
    service_data: Vec<u8>,
}

impl TransactionBuilder {
    /// Starts a builder for the given network.
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            nonce: 1,
            chain_id,
            gas_price: 1,
            gas_coin: CoinSymbol::base_coin(),
            payload: Vec::new(),
            service_data: Vec::new(),
        }
    }

    /// The sender's sequence number.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Fee multiplier. Defaults to 1.
    pub fn gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Coin the fee is paid in. Defaults to the base coin.
    pub fn gas_coin(mut self, gas_coin: CoinSymbol) -> Self {
        self.gas_coin = gas_coin;
        self
    }

    /// Free-form message attached to the transaction.
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Reserved service-data field.
    pub fn service_data(mut self, service_data: impl Into<Vec<u8>>) -> Self {
        self.service_data = service_data.into();
        self
    }

    /// Attaches the operation payload and validates the whole envelope.
    pub fn build(self, data: TransactionData) -> Result<Transaction, TransactionError> {
        let tx = Transaction {
            nonce: self.nonce,
            chain_id: self.chain_id,
            gas_price: self.gas_price,
            gas_coin: self.gas_coin,
            data,
            payload: self.payload,
            service_data: self.service_data,
        };
        tx.check_payloads()?;
        // Payload schemas validate eagerly, not at encode time.
        tx.data.to_rlp()?;
        Ok(tx)
    }
}

// ---------------------------------------------------------------------------
// Signed transaction
// ---------------------------------------------------------------------------

/// A transaction plus its signature block, ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: SignatureData,
}

impl SignedTransaction {
    /// The exact bytes a node accepts.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        let mut fields = self
            .transaction
            .signed_fields(self.signature.signature_type())?;
        fields.push(RlpItem::bytes(rlp::encode(&self.signature.to_rlp())));
        Ok(rlp::encode(&RlpItem::list(fields)))
    }

    /// Parses and fully validates broadcast bytes.
    ///
    /// Decoding is strict: non-canonical RLP, unknown tags, wrong field
    /// counts, and schema violations are all rejected. A successful decode
    /// re-encodes to the identical bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        let top = rlp::decode(bytes)?;
        let fields = top.as_fields(10)?;

        let chain_raw = fields[1].as_u64()?;
        let chain_id =
            ChainId::from_value(chain_raw).ok_or(TransactionError::UnknownChainId(chain_raw))?;
        let tag = fields[4].as_u64()?;
        let transaction_type =
            TransactionType::from_tag(tag).ok_or(TransactionError::UnknownType(tag))?;
        let data = TransactionData::decode(transaction_type, fields[5].as_bytes()?)?;

        let payload = fields[6].as_bytes()?.to_vec();
        let service_data = fields[7].as_bytes()?.to_vec();

        let sig_raw = fields[8].as_u64()?;
        let signature_type = SignatureType::from_value(sig_raw)
            .ok_or(TransactionError::UnknownSignatureType(sig_raw))?;
        let signature =
            SignatureData::from_rlp(signature_type, &rlp::decode(fields[9].as_bytes()?)?)?;

        let transaction = Transaction {
            nonce: fields[0].as_u64()?,
            chain_id,
            gas_price: fields[2].as_u64()?,
            gas_coin: CoinSymbol::from_wire_bytes(fields[3].as_bytes()?)?,
            data,
            payload,
            service_data,
        };
        transaction.check_payloads()?;

        tracing::debug!(
            nonce = transaction.nonce,
            tx_type = %transaction_type,
            "decoded transaction"
        );
        Ok(Self {
            transaction,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::transaction::data::SendData;
    use crate::transaction::types::to_base_units;

    fn send_tx() -> Transaction {
        TransactionBuilder::new(ChainId::Mainnet)
            .nonce(1)
            .build(TransactionData::Send(SendData {
                coin: CoinSymbol::new("MNT").unwrap(),
                to: Address::from_bytes([0u8; 20]),
                value: to_base_units(1),
            }))
            .unwrap()
    }

    #[test]
    fn digest_matches_known_vector() {
        let digest = send_tx().signing_digest(SignatureType::Single).unwrap();
        assert_eq!(
            hex::encode(digest),
            "dff758863cdd0697fbee16059789111199a85e5b726aed3f3396213c74f8b1fd"
        );
    }

    #[test]
    fn digest_covers_signature_type() {
        let tx = send_tx();
        let single = tx.signing_digest(SignatureType::Single).unwrap();
        let multi = tx.signing_digest(SignatureType::Multi).unwrap();
        assert_ne!(single, multi);
    }

    #[test]
    fn builder_defaults() {
        let tx = send_tx();
        assert_eq!(tx.gas_price, 1);
        assert_eq!(tx.gas_coin.as_str(), "MNT");
        assert!(tx.payload.is_empty());
        assert!(tx.service_data.is_empty());
    }

    #[test]
    fn builder_rejects_oversized_payload() {
        let result = TransactionBuilder::new(ChainId::Mainnet)
            .nonce(1)
            .payload(vec![0u8; 1025])
            .build(TransactionData::Send(SendData {
                coin: CoinSymbol::new("MNT").unwrap(),
                to: Address::from_bytes([0u8; 20]),
                value: to_base_units(1),
            }));
        assert_eq!(
            result,
            Err(TransactionError::Schema(SchemaError::PayloadTooLong(1025)))
        );
    }

    #[test]
    fn payload_at_cap_is_accepted() {
        let tx = TransactionBuilder::new(ChainId::Testnet)
            .nonce(5)
            .payload(vec![0x41; 1024])
            .build(TransactionData::Send(SendData {
                coin: CoinSymbol::new("MNT").unwrap(),
                to: Address::from_bytes([0u8; 20]),
                value: to_base_units(1),
            }));
        assert!(tx.is_ok());
    }

    #[test]
    fn decode_rejects_unknown_type_tag() {
        // Hand-build an envelope with type tag 0x0F.
        let fields = vec![
            RlpItem::uint_u64(1),
            RlpItem::uint_u64(1),
            RlpItem::uint_u64(1),
            RlpItem::bytes(b"MNT".to_vec()),
            RlpItem::uint_u64(0x0F),
            RlpItem::bytes(vec![0xC0]),
            RlpItem::bytes(Vec::new()),
            RlpItem::bytes(Vec::new()),
            RlpItem::uint_u64(1),
            RlpItem::bytes(vec![0xC0]),
        ];
        let bytes = rlp::encode(&RlpItem::list(fields));
        assert_eq!(
            SignedTransaction::decode(&bytes),
            Err(TransactionError::UnknownType(0x0F))
        );
    }

    #[test]
    fn decode_rejects_unknown_chain() {
        let fields = vec![
            RlpItem::uint_u64(1),
            RlpItem::uint_u64(9),
            RlpItem::uint_u64(1),
            RlpItem::bytes(b"MNT".to_vec()),
            RlpItem::uint_u64(0x01),
            RlpItem::bytes(vec![0xC0]),
            RlpItem::bytes(Vec::new()),
            RlpItem::bytes(Vec::new()),
            RlpItem::uint_u64(1),
            RlpItem::bytes(vec![0xC0]),
        ];
        let bytes = rlp::encode(&RlpItem::list(fields));
        assert_eq!(
            SignedTransaction::decode(&bytes),
            Err(TransactionError::UnknownChainId(9))
        );
    }
}
