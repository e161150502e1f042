use dashmap::DashMap;

use certichain_core::{Address, QueuePointer};

use crate::error::RegistryError;

/// Per-issuer ordered collections of pointers into the credential store,
/// representing work items awaiting that issuer's action.
///
/// Removal uses swap-remove: the last pointer moves into the removed slot
/// and the collection shrinks by one. Positions are therefore NOT stable
/// across a removal — an enumeration interleaved with a removal may observe
/// a pointer twice or skip one. Callers that enumerate and then act must
/// re-check the referenced document's status before acting on a pointer.
pub struct VerificationQueue {
    /// Issuer address → pending work items, in no guaranteed order.
    queues: DashMap<Address, Vec<QueuePointer>>,
}

impl VerificationQueue {
    pub fn new() -> Self {
        Self {
            queues: DashMap::new(),
        }
    }

    /// Append a pointer to an issuer's queue. The engine performs the
    /// registered-issuer gate before calling this.
    pub(crate) fn enqueue(&self, issuer: &Address, holder: &Address, doc_index: u64) {
        self.queues
            .entry(issuer.clone())
            .or_default()
            .push(QueuePointer {
                holder: holder.clone(),
                doc_index,
            });
    }

    /// Number of pending work items for an issuer.
    pub fn count(&self, issuer: &Address) -> u64 {
        self.queues
            .get(issuer)
            .map(|q| q.len() as u64)
            .unwrap_or(0)
    }

    /// Snapshot the pointer at a position in an issuer's queue.
    ///
    /// Positions are only meaningful within a single call; see the type-level
    /// note on swap-remove reordering.
    pub fn peek(&self, issuer: &Address, position: u64) -> Result<QueuePointer, RegistryError> {
        self.queues
            .get(issuer)
            .and_then(|q| q.get(position as usize).cloned())
            .ok_or_else(|| RegistryError::QueueEntryNotFound {
                issuer: issuer.clone(),
                position,
            })
    }

    /// Remove the pointer for `(holder, doc_index)` from an issuer's queue
    /// by swapping the last pointer into its slot. O(1).
    ///
    /// Returns whether a pointer was found and removed.
    pub(crate) fn remove(&self, issuer: &Address, holder: &Address, doc_index: u64) -> bool {
        let Some(mut queue) = self.queues.get_mut(issuer) else {
            return false;
        };
        let Some(position) = queue
            .iter()
            .position(|p| p.holder == *holder && p.doc_index == doc_index)
        else {
            return false;
        };
        queue.swap_remove(position);
        true
    }
}

impl Default for VerificationQueue {
    fn default() -> Self {
        Self::new()
    }
}
