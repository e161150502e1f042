use chrono::{DateTime, Utc};
use dashmap::DashMap;

use certichain_core::Address;

use crate::error::RegistryError;

/// Owner-controlled issuer membership.
///
/// The owner is fixed at creation and is not itself a member unless added
/// explicitly. Membership is add-only: there is no removal operation, so
/// the set grows monotonically.
pub struct IssuerDirectory {
    /// Registry owner, the only party allowed to add issuers.
    owner: Address,
    /// Issuer address → registration time.
    issuers: DashMap<Address, DateTime<Utc>>,
}

impl IssuerDirectory {
    /// Create a directory with the given owner and no members.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            issuers: DashMap::new(),
        }
    }

    /// The registry owner.
    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// Check if an address is a registered issuer.
    pub fn is_issuer(&self, addr: &Address) -> bool {
        self.issuers.contains_key(addr)
    }

    /// When an issuer was registered, if it is one.
    pub fn registered_at(&self, addr: &Address) -> Option<DateTime<Utc>> {
        self.issuers.get(addr).map(|e| *e.value())
    }

    /// Number of registered issuers.
    pub fn count(&self) -> usize {
        self.issuers.len()
    }

    /// Register a new issuer. Only the owner may do this.
    ///
    /// Duplicate additions are rejected rather than silently ignored, so a
    /// caller always learns whether its call changed the membership set.
    pub(crate) fn add(
        &self,
        caller: &Address,
        new_issuer: &Address,
    ) -> Result<(), RegistryError> {
        if *caller != self.owner {
            return Err(RegistryError::Unauthorized {
                caller: caller.clone(),
                action: "add an issuer",
            });
        }
        if new_issuer.is_zero() {
            return Err(RegistryError::InvalidArgument(
                "issuer address must not be the zero address".into(),
            ));
        }
        if self.issuers.contains_key(new_issuer) {
            return Err(RegistryError::InvalidArgument(format!(
                "{} is already a registered issuer",
                new_issuer
            )));
        }
        self.issuers.insert(new_issuer.clone(), Utc::now());
        Ok(())
    }
}
