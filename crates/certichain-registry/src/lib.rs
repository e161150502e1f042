//! CertiChain Registry — Issuer directory, credential store, verification
//! queue, and the engine that keeps them consistent.

pub mod audit;
pub mod directory;
pub mod engine;
pub mod error;
pub mod queue;
pub mod store;

pub use audit::{AuditEvent, AuditLog, AuditRecord};
pub use directory::IssuerDirectory;
pub use engine::{CredentialRegistry, Submission, VerificationStats};
pub use error::RegistryError;
pub use queue::VerificationQueue;
pub use store::CredentialStore;
