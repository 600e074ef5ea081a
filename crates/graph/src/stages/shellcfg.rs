//! Shell and interpreter configuration.

use stratum_platform::Shell;

use super::system::apt_caches;
use crate::consts::CONDA_ROOT;
use crate::snapshot::Snapshot;

/// Configure the login shell and interpreter hooks.
///
/// Conda changes how both the shell and the interpreter behave, so package
/// installs that go through conda must derive from this stage's output
/// instead of running beside it.
pub fn configure(snapshot: &Snapshot, shell: Shell, cache_prefix: &str) -> Snapshot {
  let with_shell = if shell.preinstalled() {
    snapshot.clone()
  } else {
    snapshot.exec_cached(
      format!(
        "apt-get update && apt-get install --no-install-recommends --yes {}",
        shell.as_str()
      ),
      apt_caches(cache_prefix),
    )
  };

  let rc = format!("eval \"$({CONDA_ROOT}/bin/conda shell.{} hook)\"\n", shell.as_str());
  with_shell
    .mkfile(format!("/root/{}", shell.rc_file()), rc, 0o644)
    .env("SHELL", shell.binary())
}

#[cfg(test)]
mod tests {
  use crate::snapshot::LayerOp;

  use super::*;

  #[test]
  fn bash_writes_rc_without_installing() {
    let base = Snapshot::source("img");
    let out = configure(&base, Shell::Bash, "test");

    // source + mkfile + env: no apt install for the stock shell
    let layers = out.layers();
    assert_eq!(layers.len(), 3);
    assert!(matches!(&layers[1], LayerOp::Mkfile { path, .. } if path == "/root/.bashrc"));
    assert!(matches!(&layers[2], LayerOp::Env { name, value } if name == "SHELL" && value == "/bin/bash"));
  }

  #[test]
  fn zsh_is_installed_before_configuration() {
    let base = Snapshot::source("img");
    let out = configure(&base, Shell::Zsh, "test");

    let layers = out.layers();
    assert_eq!(layers.len(), 4);
    assert!(matches!(&layers[1], LayerOp::Exec { command, .. } if command.ends_with("--yes zsh")));
    assert!(matches!(&layers[2], LayerOp::Mkfile { path, .. } if path == "/root/.zshrc"));
  }

  #[test]
  fn rc_file_hooks_conda_into_the_shell() {
    let base = Snapshot::source("img");
    let out = configure(&base, Shell::Bash, "test");

    match &out.layers()[1] {
      LayerOp::Mkfile { contents, .. } => {
        assert!(contents.contains("conda shell.bash hook"));
      }
      other => panic!("expected a mkfile layer, got {other:?}"),
    }
  }
}
