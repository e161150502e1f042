//! CertiChain Core — Fundamental types, errors, and configuration for the
//! CertiChain credential registry.

pub mod config;
pub mod document_state;
pub mod error;
pub mod types;

pub use config::RegistryConfig;
pub use document_state::{DocumentEvent, DocumentStateMachine, DocumentStatus};
pub use error::CoreError;
pub use types::{Address, Document, QueuePointer};
