use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

use certichain_core::Address;

/// A state-changing event recorded in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEvent {
    /// The owner registered a new issuer.
    IssuerAdded { issuer: Address, added_by: Address },
    /// A holder submitted a document; `queued` records whether a pointer
    /// reached the intended issuer's queue.
    DocumentSubmitted {
        holder: Address,
        index: u64,
        intended_issuer: Address,
        queued: bool,
    },
    /// An issuer verified a document.
    DocumentVerified {
        holder: Address,
        index: u64,
        verifier: Address,
    },
}

/// A single audit trail entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Time-ordered record id.
    pub id: Uuid,
    /// When the mutation committed.
    pub at: DateTime<Utc>,
    /// What happened.
    pub event: AuditEvent,
}

/// Append-only audit trail of committed mutations.
///
/// Records are only ever appended; nothing mutates or removes an entry.
pub struct AuditLog {
    records: RwLock<Vec<AuditRecord>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Append an event to the trail.
    pub(crate) fn record(&self, event: AuditEvent) {
        self.records.write().unwrap().push(AuditRecord {
            id: Uuid::now_v7(),
            at: Utc::now(),
            event,
        });
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    /// Snapshot of the full trail in commit order.
    pub fn snapshot(&self) -> Vec<AuditRecord> {
        self.records.read().unwrap().clone()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
