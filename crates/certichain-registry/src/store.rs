use chrono::Utc;
use dashmap::DashMap;

use certichain_core::{Address, Document, DocumentEvent, DocumentStateMachine, DocumentStatus};

use crate::error::RegistryError;

/// Append-only, per-holder document collections. The source of truth for
/// document content and verification status.
///
/// The store exclusively owns its records: holders can only append, and the
/// single status mutation is reached through the engine's `set_verified`.
/// Records are never destroyed and indices are never reassigned.
pub struct CredentialStore {
    /// Holder address → ordered document collection.
    documents: DashMap<Address, Vec<Document>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Append a new Pending document to the holder's collection and return
    /// its index (= previous collection length).
    ///
    /// The intended issuer is not required to be registered at this point;
    /// that gate applies to queueing, not to recording.
    pub(crate) fn append(
        &self,
        holder: &Address,
        ipfs_hash: &str,
        name: &str,
        intended_issuer: &Address,
    ) -> Result<u64, RegistryError> {
        if ipfs_hash.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "ipfs hash must not be empty".into(),
            ));
        }
        if name.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "document name must not be empty".into(),
            ));
        }
        if intended_issuer.is_zero() {
            return Err(RegistryError::InvalidArgument(
                "intended issuer must not be the zero address".into(),
            ));
        }

        let mut entry = self.documents.entry(holder.clone()).or_default();
        let index = entry.len() as u64;
        entry.push(Document {
            holder: holder.clone(),
            index,
            ipfs_hash: ipfs_hash.to_string(),
            name: name.to_string(),
            intended_issuer: intended_issuer.clone(),
            verified_by: None,
            status: DocumentStatus::Pending,
            submitted_at: Utc::now(),
            verified_at: None,
        });
        Ok(index)
    }

    /// Get a snapshot of a document by holder and index.
    pub fn get(&self, holder: &Address, index: u64) -> Result<Document, RegistryError> {
        self.documents
            .get(holder)
            .and_then(|docs| docs.get(index as usize).cloned())
            .ok_or_else(|| RegistryError::DocumentNotFound {
                holder: holder.clone(),
                index,
            })
    }

    /// Total documents ever appended for a holder. Monotonically
    /// non-decreasing.
    pub fn count(&self, holder: &Address) -> u64 {
        self.documents
            .get(holder)
            .map(|docs| docs.len() as u64)
            .unwrap_or(0)
    }

    /// Flip a document's status to Verified, stamping the verifier.
    /// Invoked only by the engine, which holds the write serializer.
    pub(crate) fn set_verified(
        &self,
        holder: &Address,
        index: u64,
        verifier: &Address,
    ) -> Result<(), RegistryError> {
        let mut docs =
            self.documents
                .get_mut(holder)
                .ok_or_else(|| RegistryError::DocumentNotFound {
                    holder: holder.clone(),
                    index,
                })?;
        let doc = docs
            .get_mut(index as usize)
            .ok_or_else(|| RegistryError::DocumentNotFound {
                holder: holder.clone(),
                index,
            })?;

        doc.status = DocumentStateMachine::transition(doc.status, DocumentEvent::Verify)
            .map_err(|_| RegistryError::AlreadyVerified {
                holder: holder.clone(),
                index,
            })?;
        doc.verified_by = Some(verifier.clone());
        doc.verified_at = Some(Utc::now());
        Ok(())
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
