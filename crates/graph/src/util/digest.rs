//! Content digests for marshaled plan ops.
//!
//! Plan ops are content-addressed: the digest covers the op payload and the
//! digests of its inputs, so equal subgraphs marshal to equal digests
//! regardless of when or where they were built.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::OP_DIGEST_LEN;

/// A content-addressed digest identifying one marshaled plan op.
///
/// Truncated SHA-256 over the serialized payload and the input digests,
/// lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpDigest(pub String);

impl std::fmt::Display for OpDigest {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Digest a serialized payload together with the digests of its inputs.
pub fn digest_parts(payload: &str, inputs: &[OpDigest]) -> OpDigest {
  let mut hasher = Sha256::new();
  hasher.update(payload.as_bytes());
  for input in inputs {
    hasher.update(input.0.as_bytes());
  }
  let full = format!("{:x}", hasher.finalize());
  OpDigest(full[..OP_DIGEST_LEN].to_string())
}
