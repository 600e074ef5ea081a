//! Editor extension installation.

use super::types::StageError;
use crate::snapshot::Snapshot;

const EXTENSION_DIR: &str = "/root/.vscode-server/extensions";

/// Install the declared editor extensions.
///
/// Returns `None` when no extensions are declared — the merge set tolerates
/// the missing delta. Extension ids must be `publisher.name`; anything else
/// fails the stage before a snapshot is produced.
pub fn install(snapshot: &Snapshot, extensions: &[String]) -> Result<Option<Snapshot>, StageError> {
  if extensions.is_empty() {
    return Ok(None);
  }

  let mut out = snapshot.exec(format!("mkdir -p {EXTENSION_DIR}"));
  for extension in extensions {
    let Some((publisher, name)) = extension.split_once('.') else {
      return Err(StageError::MalformedExtensionId {
        id: extension.clone(),
      });
    };
    out = out.exec(format!(
      "curl -fsSL 'https://marketplace.visualstudio.com/_apis/public/gallery/publishers/{publisher}/vsextensions/{name}/latest/vspackage' \
       -o /tmp/{extension}.vsix && unzip -o /tmp/{extension}.vsix 'extension/*' -d {EXTENSION_DIR}/{extension}"
    ));
  }
  Ok(Some(out))
}

#[cfg(test)]
mod tests {
  use crate::snapshot::LayerOp;

  use super::*;

  #[test]
  fn no_extensions_means_no_stage() {
    let base = Snapshot::source("img");
    assert!(install(&base, &[]).unwrap().is_none());
  }

  #[test]
  fn extensions_download_from_the_gallery() {
    let base = Snapshot::source("img");
    let out = install(&base, &["rust-lang.rust-analyzer".to_string()])
      .unwrap()
      .unwrap();

    match out.layers().last().unwrap() {
      LayerOp::Exec { command, .. } => {
        assert!(command.contains("publishers/rust-lang/vsextensions/rust-analyzer"));
        assert!(command.contains(EXTENSION_DIR));
      }
      other => panic!("expected an exec layer, got {other:?}"),
    }
  }

  #[test]
  fn malformed_extension_id_fails_the_stage() {
    let base = Snapshot::source("img");
    let err = install(&base, &["not-an-extension-id".to_string()]).unwrap_err();
    assert!(matches!(err, StageError::MalformedExtensionId { .. }));
  }
}
