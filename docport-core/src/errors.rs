//! errors.rs - Custom error types for the docport-core library.
//!
//! The normalization pipeline and the alert scanner are total functions and
//! never fail. These variants cover the fallible edges around them:
//! configuration parsing and validation. Everything else at the edges
//! (file access, collaborators) reports through `anyhow::Error`.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All distinguished error types in the `docport-core` library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IntakeError {
    #[error("Invalid intake configuration:\n{0}")]
    InvalidConfig(String),

    #[error("Failed to parse intake configuration '{0}': {1}")]
    ConfigParse(String, serde_yml::Error),
}
