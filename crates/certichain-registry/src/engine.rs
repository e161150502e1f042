use std::sync::Mutex;

use certichain_core::{Address, Document, QueuePointer, RegistryConfig};

use crate::audit::{AuditEvent, AuditLog, AuditRecord};
use crate::directory::IssuerDirectory;
use crate::error::RegistryError;
use crate::queue::VerificationQueue;
use crate::store::CredentialStore;

/// Outcome of a document submission.
///
/// A submission always records the document; whether a pointer reached the
/// intended issuer's queue depends on that issuer being registered at
/// submission time. An unqueued submission is still a success — the warning
/// carries the reason for the caller to surface.
#[derive(Debug)]
pub struct Submission {
    /// Index assigned to the new document in the holder's collection.
    pub index: u64,
    /// Whether a pointer was enqueued for the intended issuer.
    pub queued: bool,
    /// Non-fatal warning when the document could not be queued.
    pub warning: Option<RegistryError>,
}

/// Per-holder verification summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VerificationStats {
    pub total: u64,
    pub verified: u64,
    pub pending: u64,
    /// Verified share as an integer percent, 0 for an empty collection.
    pub verification_rate: u64,
}

/// The credential registry: issuer directory, credential store, verification
/// queue, and audit trail behind a single mutation path.
///
/// All state-changing operations serialize through one lock, so at most one
/// mutation commits at a time; reads are unserialized snapshots. Within
/// `verify_document` the store write commits before the queue removal, so
/// the only transient a reader can observe is a verified document whose
/// queue pointer is still present — which pointer re-validation covers.
pub struct CredentialRegistry {
    directory: IssuerDirectory,
    store: CredentialStore,
    queue: VerificationQueue,
    audit: AuditLog,
    /// Global write serializer for mutations.
    write_lock: Mutex<()>,
}

impl CredentialRegistry {
    /// Create a registry owned by `owner`. The owner is fixed for the life
    /// of the registry.
    pub fn new(owner: Address) -> Result<Self, RegistryError> {
        if owner.is_zero() {
            return Err(RegistryError::InvalidArgument(
                "owner must not be the zero address".into(),
            ));
        }
        Ok(Self {
            directory: IssuerDirectory::new(owner),
            store: CredentialStore::new(),
            queue: VerificationQueue::new(),
            audit: AuditLog::new(),
            write_lock: Mutex::new(()),
        })
    }

    /// Create a registry from a config, registering its initial issuers.
    pub fn from_config(config: RegistryConfig) -> Result<Self, RegistryError> {
        let owner = config.owner.clone();
        let registry = Self::new(config.owner)?;
        for issuer in &config.issuers {
            registry.add_issuer(&owner, issuer)?;
        }
        Ok(registry)
    }

    /// The registry owner.
    pub fn owner(&self) -> &Address {
        self.directory.owner()
    }

    /// Check if an address is a registered issuer.
    pub fn is_issuer(&self, addr: &Address) -> bool {
        self.directory.is_issuer(addr)
    }

    /// Number of registered issuers.
    pub fn issuer_count(&self) -> usize {
        self.directory.count()
    }

    /// Register a new issuer. Only the owner may call this.
    pub fn add_issuer(&self, caller: &Address, new_issuer: &Address) -> Result<(), RegistryError> {
        let _guard = self.write_lock.lock().unwrap();

        self.directory.add(caller, new_issuer)?;
        self.audit.record(AuditEvent::IssuerAdded {
            issuer: new_issuer.clone(),
            added_by: caller.clone(),
        });

        tracing::info!(issuer = %new_issuer, by = %caller, "issuer registered");
        Ok(())
    }

    /// Record a new Pending document for `holder` and, if the intended
    /// issuer is registered, enqueue a pointer for it.
    ///
    /// An intended issuer registered only after submission never sees this
    /// document in its queue; the document stays retrievable and permanently
    /// Pending unless resubmitted.
    pub fn add_document(
        &self,
        holder: &Address,
        ipfs_hash: &str,
        name: &str,
        intended_issuer: &Address,
    ) -> Result<Submission, RegistryError> {
        let _guard = self.write_lock.lock().unwrap();

        let index = self.store.append(holder, ipfs_hash, name, intended_issuer)?;

        let warning = if self.directory.is_issuer(intended_issuer) {
            self.queue.enqueue(intended_issuer, holder, index);
            None
        } else {
            tracing::warn!(
                holder = %holder,
                intended_issuer = %intended_issuer,
                index,
                "intended issuer is not registered; document recorded but not queued"
            );
            Some(RegistryError::NotRegisteredIssuer(intended_issuer.clone()))
        };
        let queued = warning.is_none();

        self.audit.record(AuditEvent::DocumentSubmitted {
            holder: holder.clone(),
            index,
            intended_issuer: intended_issuer.clone(),
            queued,
        });

        tracing::info!(holder = %holder, index, queued, "document submitted");
        Ok(Submission {
            index,
            queued,
            warning,
        })
    }

    /// Snapshot a holder's document by index.
    pub fn get_document(&self, user: &Address, index: u64) -> Result<Document, RegistryError> {
        self.store.get(user, index)
    }

    /// Total documents ever submitted by a holder.
    pub fn get_document_count(&self, user: &Address) -> u64 {
        self.store.count(user)
    }

    /// Number of work items pending an issuer's action.
    pub fn issuer_queue_count(&self, issuer: &Address) -> u64 {
        self.queue.count(issuer)
    }

    /// Snapshot the queue pointer at a position in an issuer's queue.
    /// Positions are not stable across mutations; re-check the referenced
    /// document's status before acting on the pointer.
    pub fn issuer_queue_entry(
        &self,
        issuer: &Address,
        position: u64,
    ) -> Result<QueuePointer, RegistryError> {
        self.queue.peek(issuer, position)
    }

    /// Verify a holder's document. Only the document's intended issuer may
    /// call this, and only once per document.
    ///
    /// The store write is the commit point; the queue pointer is removed
    /// after it. A pointer that was never enqueued (issuer unregistered at
    /// submission time) is tolerated here.
    pub fn verify_document(
        &self,
        caller: &Address,
        user: &Address,
        doc_index: u64,
    ) -> Result<(), RegistryError> {
        let _guard = self.write_lock.lock().unwrap();

        let doc = self.store.get(user, doc_index)?;
        if doc.is_verified() {
            return Err(RegistryError::AlreadyVerified {
                holder: user.clone(),
                index: doc_index,
            });
        }
        if *caller != doc.intended_issuer {
            return Err(RegistryError::Unauthorized {
                caller: caller.clone(),
                action: "verify a document tagged to another issuer",
            });
        }

        self.store.set_verified(user, doc_index, caller)?;
        if !self.queue.remove(caller, user, doc_index) {
            tracing::debug!(
                holder = %user,
                index = doc_index,
                "no queue pointer to remove; document was never enqueued"
            );
        }

        self.audit.record(AuditEvent::DocumentVerified {
            holder: user.clone(),
            index: doc_index,
            verifier: caller.clone(),
        });

        tracing::info!(holder = %user, index = doc_index, verifier = %caller, "document verified");
        Ok(())
    }

    /// Verification summary for a holder's collection.
    pub fn verification_stats(&self, user: &Address) -> VerificationStats {
        let total = self.store.count(user);
        let verified = (0..total)
            .filter(|i| {
                self.store
                    .get(user, *i)
                    .map(|d| d.is_verified())
                    .unwrap_or(false)
            })
            .count() as u64;
        let verification_rate = if total > 0 {
            (verified * 100 + total / 2) / total
        } else {
            0
        };
        VerificationStats {
            total,
            verified,
            pending: total - verified,
            verification_rate,
        }
    }

    /// Snapshot of the append-only audit trail.
    pub fn audit(&self) -> Vec<AuditRecord> {
        self.audit.snapshot()
    }
}
