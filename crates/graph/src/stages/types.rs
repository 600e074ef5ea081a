//! Error types for stage builders.

use std::path::PathBuf;

use thiserror::Error;

/// Errors a stage builder can fail with.
///
/// Stage failures abort the whole compilation; the orchestrator wraps them
/// with the failing stage's name.
#[derive(Debug, Error)]
pub enum StageError {
  /// Public key material could not be read.
  #[error("failed to read public key {path}: {source}")]
  ReadPublicKey {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Public key material does not look like an OpenSSH public key.
  #[error("malformed public key material in {path}")]
  MalformedPublicKey { path: PathBuf },

  /// An editor extension id is not of the form `publisher.name`.
  #[error("malformed editor extension id: {id:?}")]
  MalformedExtensionId { id: String },

  /// A version-control identity carries an email that is not an address.
  #[error("invalid version-control identity: email {email:?} is not an address")]
  InvalidGitIdentity { email: String },
}
