//! Error types for stratum-platform

use thiserror::Error;

/// Errors that can occur when resolving platform identifiers
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("unknown operating system: {0}")]
    UnknownOs(String),

    #[error("unknown shell: {0}")]
    UnknownShell(String),
}
