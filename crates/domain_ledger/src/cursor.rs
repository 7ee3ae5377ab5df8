//! Opaque pagination cursors
//!
//! A cursor encodes the last transaction id the client has seen, as base64
//! over a small JSON object. Keeping the encoding reversible but opaque
//! lets the ordering key change later without breaking the wire contract.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use core_kernel::TransactionId;

/// The decoded form of a history cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Last transaction id the previous page ended on; the next page
    /// contains ids strictly less than this
    pub last_id: TransactionId,
}

impl Cursor {
    pub fn new(last_id: TransactionId) -> Self {
        Self { last_id }
    }

    /// Encodes to the opaque wire form
    pub fn encode(&self) -> String {
        // Serializing a two-field-free struct cannot fail.
        let json = serde_json::to_vec(self).expect("cursor serialization");
        BASE64.encode(json)
    }

    /// Decodes an opaque cursor string
    ///
    /// Rejects anything that is not base64-wrapped JSON with a positive
    /// `last_id`, so a corrupted or fabricated cursor yields
    /// [`LedgerError::InvalidCursor`] rather than a crash or a bad query.
    pub fn decode(raw: &str) -> Result<Self, LedgerError> {
        let bytes = BASE64
            .decode(raw)
            .map_err(|_| LedgerError::InvalidCursor("not valid base64".to_string()))?;
        let cursor: Cursor = serde_json::from_slice(&bytes)
            .map_err(|_| LedgerError::InvalidCursor("malformed cursor payload".to_string()))?;

        if cursor.last_id.value() < 1 {
            return Err(LedgerError::InvalidCursor(
                "cursor references an impossible id".to_string(),
            ));
        }

        Ok(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let cursor = Cursor::new(TransactionId::new(42));
        let decoded = Cursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn test_encoding_is_wire_compatible() {
        // base64 of {"last_id":42}
        let cursor = Cursor::new(TransactionId::new(42));
        let bytes = BASE64.decode(cursor.encode()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"last_id":42}"#);
    }

    #[test]
    fn test_decode_rejects_non_base64() {
        assert!(matches!(
            Cursor::decode("not base64 at all!!!"),
            Err(LedgerError::InvalidCursor(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_json_payload() {
        let raw = BASE64.encode(b"plain text");
        assert!(matches!(
            Cursor::decode(&raw),
            Err(LedgerError::InvalidCursor(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_positive_id() {
        let raw = BASE64.encode(br#"{"last_id":0}"#);
        assert!(matches!(
            Cursor::decode(&raw),
            Err(LedgerError::InvalidCursor(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_roundtrip_any_positive_id(id in 1i64..i64::MAX) {
            let cursor = Cursor::new(TransactionId::new(id));
            prop_assert_eq!(Cursor::decode(&cursor.encode()).unwrap(), cursor);
        }
    }
}
