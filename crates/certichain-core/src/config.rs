use serde::{Deserialize, Serialize};

use crate::types::Address;

/// Configuration for a credential registry instance.
///
/// The owner is fixed at creation and never changes; the issuer list seeds
/// the directory at startup (membership can only grow afterwards).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Address of the registry owner, the only party allowed to add issuers.
    pub owner: Address,
    /// Issuers to register at creation time.
    #[serde(default)]
    pub issuers: Vec<Address>,
}

impl RegistryConfig {
    /// Create a config with the given owner and no initial issuers.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            issuers: Vec::new(),
        }
    }

    /// Add an issuer to be registered at creation time.
    pub fn with_issuer(mut self, issuer: Address) -> Self {
        self.issuers.push(issuer);
        self
    }
}
