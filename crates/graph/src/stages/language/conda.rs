//! Conda channel configuration and package installs.

use crate::consts::CONDA_ROOT;
use crate::snapshot::{CacheMount, Snapshot};

/// Write the conda channel configuration.
///
/// No declared channel leaves the snapshot untouched. The PyPI index stage
/// must derive from this stage's output, not race it: the index
/// configuration reads the environment this stage sets up.
pub fn channel(snapshot: &Snapshot, channel: Option<&str>) -> Snapshot {
  let Some(channel) = channel else {
    return snapshot.clone();
  };
  let condarc = format!("channels:\n  - {channel}\n  - defaults\n");
  snapshot.mkfile(format!("{CONDA_ROOT}/.condarc"), condarc, 0o644)
}

/// Install conda packages.
///
/// Callers hand in the shell-configuration stage's output so interpreter
/// hooks are in place before installation, and diff the result against the
/// pre-shell snapshot: the shell configuration travels inside this delta.
pub fn install(snapshot: &Snapshot, packages: &[String], cache_prefix: &str) -> Snapshot {
  if packages.is_empty() {
    return snapshot.clone();
  }
  let command = format!("{CONDA_ROOT}/bin/conda install --yes {}", packages.join(" "));
  snapshot.exec_cached(
    command,
    vec![CacheMount {
      id: format!("{cache_prefix}-conda-pkgs"),
      target: format!("{CONDA_ROOT}/pkgs"),
    }],
  )
}
