//! Version-control metadata injection.

use super::types::StageError;
use crate::snapshot::Snapshot;
use crate::spec::GitIdentity;

/// Write the version-control identity configuration.
///
/// No declared identity is a no-op. An identity whose email is not an
/// address fails the stage.
pub fn configure(snapshot: &Snapshot, identity: Option<&GitIdentity>) -> Result<Snapshot, StageError> {
  let Some(identity) = identity else {
    return Ok(snapshot.clone());
  };
  if !identity.email.contains('@') {
    return Err(StageError::InvalidGitIdentity {
      email: identity.email.clone(),
    });
  }

  let mut config = format!("[user]\n\tname = {}\n\temail = {}\n", identity.name, identity.email);
  if let Some(editor) = &identity.editor {
    config.push_str(&format!("[core]\n\teditor = {editor}\n"));
  }
  Ok(snapshot.mkfile("/root/.gitconfig", config, 0o644))
}

#[cfg(test)]
mod tests {
  use crate::snapshot::LayerOp;

  use super::*;

  fn identity(email: &str) -> GitIdentity {
    GitIdentity {
      name: "Test User".to_string(),
      email: email.to_string(),
      editor: None,
    }
  }

  #[test]
  fn no_identity_is_a_no_op() {
    let base = Snapshot::source("img");
    let out = configure(&base, None).unwrap();
    assert_eq!(out.id(), base.id());
  }

  #[test]
  fn identity_writes_gitconfig() {
    let base = Snapshot::source("img");
    let out = configure(&base, Some(&identity("test@example.com"))).unwrap();

    match out.layers().last().unwrap() {
      LayerOp::Mkfile { path, contents, .. } => {
        assert_eq!(path, "/root/.gitconfig");
        assert!(contents.contains("email = test@example.com"));
      }
      other => panic!("expected a mkfile layer, got {other:?}"),
    }
  }

  #[test]
  fn editor_is_written_when_declared() {
    let base = Snapshot::source("img");
    let with_editor = GitIdentity {
      editor: Some("vim".to_string()),
      ..identity("test@example.com")
    };
    let out = configure(&base, Some(&with_editor)).unwrap();

    match out.layers().last().unwrap() {
      LayerOp::Mkfile { contents, .. } => assert!(contents.contains("editor = vim")),
      other => panic!("expected a mkfile layer, got {other:?}"),
    }
  }

  #[test]
  fn malformed_email_fails_the_stage() {
    let base = Snapshot::source("img");
    let err = configure(&base, Some(&identity("not-an-email"))).unwrap_err();
    assert!(matches!(err, StageError::InvalidGitIdentity { .. }));
  }
}
