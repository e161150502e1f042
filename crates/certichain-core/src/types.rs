use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document_state::DocumentStatus;
use crate::error::CoreError;

/// A 20-byte account address in `0x`-prefixed hex form, normalized to
/// lowercase. Identifies holders, issuers, and the registry owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address from a `0x`-prefixed hex string.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        let digits = raw.strip_prefix("0x").ok_or_else(|| {
            CoreError::InvalidAddress(format!("address must start with '0x', got: {}", raw))
        })?;
        if digits.len() != 40 {
            return Err(CoreError::InvalidAddress(format!(
                "address must have 40 hex digits, got {} in: {}",
                digits.len(),
                raw
            )));
        }
        hex::decode(digits)
            .map_err(|_| CoreError::InvalidAddress(format!("non-hex characters in: {}", raw)))?;
        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    /// The all-zero address. Not a valid participant identity.
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(40)))
    }

    /// Whether this is the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }

    /// The normalized address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document record submitted by a holder for verification.
///
/// Records are append-only: `index` is assigned once and never reused or
/// reassigned, and a record is never destroyed. The only mutation a record
/// ever sees is the single Pending → Verified transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Address of the holder who submitted the document.
    pub holder: Address,
    /// Position in the holder's collection, stable for the life of the record.
    pub index: u64,
    /// Content identifier of the document in IPFS.
    pub ipfs_hash: String,
    /// Human-readable document name (e.g., "Bachelor Degree").
    pub name: String,
    /// The one issuer the holder tagged at submission; only this issuer may verify.
    pub intended_issuer: Address,
    /// Set exactly when the document is verified; equals the verifying issuer.
    pub verified_by: Option<Address>,
    /// Verification status.
    pub status: DocumentStatus,
    /// When the document was submitted.
    pub submitted_at: DateTime<Utc>,
    /// When the document was verified, if it has been.
    pub verified_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Whether the document has been verified.
    pub fn is_verified(&self) -> bool {
        self.status == DocumentStatus::Verified
    }
}

/// A lightweight reference into a holder's document collection, recording
/// that the document awaits action from a specific issuer.
///
/// Pointers never own document content; the referenced document's status
/// must be re-checked before acting on a pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuePointer {
    /// Holder whose document awaits verification.
    pub holder: Address,
    /// Index of the document in the holder's collection.
    pub doc_index: u64,
}
