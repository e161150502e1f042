use certichain_core::Address;

/// Registry errors. Every operation either fully commits or has no
/// observable effect; these are always returned synchronously to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unauthorized: {caller} may not {action}")]
    Unauthorized {
        caller: Address,
        action: &'static str,
    },

    #[error("document {index} not found for holder {holder}")]
    DocumentNotFound { holder: Address, index: u64 },

    #[error("no queue entry at position {position} for issuer {issuer}")]
    QueueEntryNotFound { issuer: Address, position: u64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("document {index} of holder {holder} is already verified")]
    AlreadyVerified { holder: Address, index: u64 },

    #[error("{0} is not a registered issuer")]
    NotRegisteredIssuer(Address),

    #[error("core error: {0}")]
    Core(#[from] certichain_core::CoreError),
}
