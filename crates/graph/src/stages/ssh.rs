//! SSH key provisioning.

use std::fs;
use std::path::Path;

use super::types::StageError;
use crate::snapshot::Snapshot;

/// Prefixes accepted as OpenSSH public key material.
const KEY_PREFIXES: &[&str] = &["ssh-rsa ", "ssh-ed25519 ", "ssh-dss ", "ecdsa-sha2-"];

/// Provision the declared public key as the root `authorized_keys`.
///
/// No declared key is a no-op. Unreadable or malformed key material fails
/// the stage; the key is read and validated at compile time so a bad key
/// never reaches the executing engine.
pub fn provision(snapshot: &Snapshot, pubkey: Option<&Path>) -> Result<Snapshot, StageError> {
  let Some(path) = pubkey else {
    return Ok(snapshot.clone());
  };

  let material = fs::read_to_string(path).map_err(|source| StageError::ReadPublicKey {
    path: path.to_path_buf(),
    source,
  })?;
  let material = material.trim();
  if !KEY_PREFIXES.iter().any(|prefix| material.starts_with(prefix)) {
    return Err(StageError::MalformedPublicKey {
      path: path.to_path_buf(),
    });
  }

  Ok(snapshot.mkfile("/root/.ssh/authorized_keys", format!("{material}\n"), 0o600))
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use tempfile::NamedTempFile;

  use crate::snapshot::LayerOp;

  use super::*;

  #[test]
  fn no_key_is_a_no_op() {
    let base = Snapshot::source("img");
    let out = provision(&base, None).unwrap();
    assert_eq!(out.id(), base.id());
  }

  #[test]
  fn valid_key_lands_in_authorized_keys() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIMw9 user@host").unwrap();

    let base = Snapshot::source("img");
    let out = provision(&base, Some(file.path())).unwrap();

    match out.layers().last().unwrap() {
      LayerOp::Mkfile { path, contents, mode } => {
        assert_eq!(path, "/root/.ssh/authorized_keys");
        assert!(contents.starts_with("ssh-ed25519 "));
        assert_eq!(*mode, 0o600);
      }
      other => panic!("expected a mkfile layer, got {other:?}"),
    }
  }

  #[test]
  fn malformed_key_fails_the_stage() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "this is not a public key").unwrap();

    let base = Snapshot::source("img");
    let err = provision(&base, Some(file.path())).unwrap_err();
    assert!(matches!(err, StageError::MalformedPublicKey { .. }));
  }

  #[test]
  fn missing_key_file_fails_the_stage() {
    let base = Snapshot::source("img");
    let err = provision(&base, Some(Path::new("/nonexistent/key.pub"))).unwrap_err();
    assert!(matches!(err, StageError::ReadPublicKey { .. }));
  }
}
